//! Data models for the URL shortener application
//!
//! This module defines all the data structures used throughout the application,
//! including request/response models and database record structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a registered user stored in the database
///
/// A user's tier bounds the total number of shorten operations they may
/// perform; `request_count` tracks how many they have already used.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique username chosen at registration
    pub username: String,

    /// Quota tier, in the range 1..=5 (validated at registration)
    pub tier: u8,

    /// Number of successful shorten operations performed so far
    ///
    /// Incremented by exactly 1 per successful shorten; never decremented
    /// or reset.
    #[serde(default)]
    pub request_count: u64,
}

/// Represents a shortened URL record stored in the database
///
/// Records are immutable once written and are never deleted. The owning
/// user is linked by username only; no referential integrity is enforced.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    /// Unique short identifier (generated base-62 string or a caller-chosen one)
    pub short_id: String,

    /// The original long URL that was shortened
    pub long_url: String,

    /// Username of the owner of this record
    pub username: String,

    /// Timestamp when this record was created
    pub created_at: DateTime<Utc>,
}

/// Request payload for registering a new user
///
/// Both fields are optional at the serde level so that missing values
/// produce the service's own 400 response rather than a body-rejection.
///
/// # Example
/// ```json
/// { "username": "alice", "tier": 1 }
/// ```
#[derive(Deserialize)]
pub struct RegisterRequest {
    /// Desired username; must not already be registered
    pub username: Option<String>,

    /// Quota tier, 1..=5
    pub tier: Option<i64>,
}

/// Response returned by `GET /user/info`
///
/// # Example
/// ```json
/// { "tier": 1, "totalRequests": 3, "remainingRequests": 2 }
/// ```
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    /// The user's quota tier
    pub tier: u8,

    /// Total shorten operations performed so far
    pub total_requests: u64,

    /// Shorten operations left before the tier limit is reached
    pub remaining_requests: u64,
}

/// Request payload for creating a new short URL
///
/// # Example
/// ```json
/// {
///   "username": "alice",
///   "longUrl": "https://example.com/very/long/url",
///   "preferredShortId": "my-link"  // Optional
/// }
/// ```
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// Username of the registered user making the request
    pub username: Option<String>,

    /// The original URL to be shortened
    pub long_url: Option<String>,

    /// Optional caller-chosen short identifier
    ///
    /// If provided and free, it is used in place of a generated one and the
    /// allocation counter is left untouched. If already taken, the request
    /// fails with a conflict.
    pub preferred_short_id: Option<String>,
}

/// Response returned after successfully creating a short URL
///
/// # Example
/// ```json
/// {
///   "shortUrl": "http://localhost:8080/b1",
///   "remainingRequests": 4
/// }
/// ```
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    /// The complete shortened URL
    pub short_url: String,

    /// Shorten operations left after this one
    pub remaining_requests: u64,
}

/// A single entry in a user's URL history
///
/// # Example
/// ```json
/// {
///   "longUrl": "https://example.com",
///   "shortId": "b1",
///   "createdAt": "2026-01-17T13:40:00Z"
/// }
/// ```
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The original long URL
    pub long_url: String,

    /// The short identifier it was assigned
    pub short_id: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl From<UrlRecord> for HistoryEntry {
    fn from(record: UrlRecord) -> Self {
        HistoryEntry {
            long_url: record.long_url,
            short_id: record.short_id,
            created_at: record.created_at,
        }
    }
}

/// Query parameters for the user-scoped endpoints
///
/// Used by `GET /user/info` and `GET /url/history`; the username is
/// required by both, enforced in the handlers.
#[derive(Deserialize)]
pub struct UserQuery {
    /// Username to look up
    pub username: Option<String>,
}
