//! Tiered quota policy
//!
//! Pure functions mapping a user's tier and current usage to an allow/deny
//! decision and a remaining-request count. Tier validity (1..=5) is enforced
//! at registration time, so the policy can index the limits table directly.

use crate::model::User;

/// Lowest accepted quota tier
pub const MIN_TIER: u8 = 1;

/// Highest accepted quota tier
pub const MAX_TIER: u8 = 5;

/// Maximum allowed shorten operations per tier, indexed by `tier - 1`
pub const TIER_LIMITS: [u64; 5] = [5, 25, 100, 500, 1000];

/// Returns the maximum allowed request count for the given tier
///
/// Assumes `tier` is within 1..=5; registration rejects anything else.
pub fn tier_limit(tier: u8) -> u64 {
    TIER_LIMITS[(tier - 1) as usize]
}

/// True iff the user has quota left for one more shorten operation
pub fn can_make_request(user: &User) -> bool {
    user.request_count < tier_limit(user.tier)
}

/// Number of shorten operations the user has left, clamped at 0
pub fn remaining_requests(user: &User) -> u64 {
    tier_limit(user.tier).saturating_sub(user.request_count)
}
