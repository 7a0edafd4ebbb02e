//! Short-identifier allocation
//!
//! Combines the persisted allocation counter, the base-62 generator and a
//! uniqueness check against existing URL records to produce a short
//! identifier that is guaranteed free at the moment of allocation.
//!
//! Allocation runs inside the caller's write transaction. redb serializes
//! write transactions, so the check-then-insert sequence of a shorten
//! request cannot interleave with another allocator; the storage layer's
//! single-writer discipline is the uniqueness backstop.

use redb::{ReadableTable, WriteTransaction};

use crate::database::{TABLE_COUNTERS, TABLE_URLS, URL_COUNT_KEY};
use crate::error::ApiError;
use crate::shortid::generate_short_id;

/// Allocates a unique short identifier within the given write transaction
///
/// With a preferred identifier, checks it for availability: taken fails
/// with a conflict and leaves the counter untouched; free is returned
/// as-is.
///
/// Without one, walks the allocation counter: generate a candidate from
/// the current count, increment, retry while the candidate is already in
/// use, then persist the updated counter exactly once after the loop. A
/// collision therefore costs an extra increment but only one counter
/// write per allocation.
///
/// The returned identifier must be inserted into the URL table before the
/// transaction commits, otherwise the uniqueness guarantee does not
/// survive the commit.
pub fn allocate_short_id(
    txn: &WriteTransaction,
    preferred: Option<String>,
) -> Result<String, ApiError> {
    let urls = txn.open_table(TABLE_URLS)?;

    if let Some(preferred_id) = preferred {
        if urls.get(preferred_id.as_str())?.is_some() {
            return Err(ApiError::Conflict(
                "Preferred short URL already in use".to_string(),
            ));
        }
        return Ok(preferred_id);
    }

    let mut counters = txn.open_table(TABLE_COUNTERS)?;

    // Counter starts at 1; generate_short_id(0) would be empty.
    let mut count = counters.get(URL_COUNT_KEY)?.map(|v| v.value()).unwrap_or(1);

    let short_id = loop {
        let candidate = generate_short_id(count);
        count += 1;
        if urls.get(candidate.as_str())?.is_none() {
            break candidate;
        }
    };

    counters.insert(URL_COUNT_KEY, count)?;

    Ok(short_id)
}
