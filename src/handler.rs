//! HTTP request handlers for the URL shortener API
//!
//! This module implements the request-level business logic for:
//! - Registering users with a quota tier
//! - Reporting a user's tier and remaining quota
//! - Shortening URLs behind the quota gate, with generated or preferred
//!   identifiers
//! - Listing a user's shortening history
//! - Redirecting short identifiers to their original destinations

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};
use serde_json::json;

use crate::allocator::allocate_short_id;
use crate::database::{history_index_key, AppState, TABLE_URLS, TABLE_USERS, TABLE_USER_INDEX};
use crate::error::ApiError;
use crate::model::{
    HistoryEntry, RegisterRequest, ShortenRequest, ShortenResponse, User, UserInfoResponse,
    UserQuery, UrlRecord,
};
use crate::quota::{can_make_request, remaining_requests, MAX_TIER, MIN_TIER};
use crate::validate::is_valid_url;

/// Base URL that generated short links are prefixed with
///
/// Follows the `URL` and `PORT` environment variables, defaulting to
/// "http://localhost:8080".
fn base_url() -> String {
    let base = std::env::var("URL").unwrap_or_else(|_| "http://localhost".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    format!("{}:{}", base, port)
}

/// Registers a new user with a quota tier
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "tier": 1 }
/// ```
///
/// # Response
///
/// - **201 Created** - User registered
/// - **400 Bad Request** - Missing username/tier, or tier outside 1..=5
/// - **409 Conflict** - Username already registered
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // A body that fails to deserialize (wrong types, malformed JSON) gets
    // the same 400 as a missing field, not the extractor's default reply
    let Json(payload) = payload
        .map_err(|_| ApiError::Validation("Username and tier are required".to_string()))?;

    let username = payload
        .username
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::Validation("Username and tier are required".to_string()))?;
    let tier = payload
        .tier
        .ok_or_else(|| ApiError::Validation("Username and tier are required".to_string()))?;

    if tier < MIN_TIER as i64 || tier > MAX_TIER as i64 {
        return Err(ApiError::Validation(
            "Invalid tier. Please choose a tier between 1 and 5.".to_string(),
        ));
    }

    let user = User {
        username: username.clone(),
        tier: tier as u8,
        request_count: 0,
    };
    let user_json = serde_json::to_string(&user)?;

    let write_txn = state.db.begin_write()?;
    {
        let mut users = write_txn.open_table(TABLE_USERS)?;

        if users.get(username.as_str())?.is_some() {
            return Err(ApiError::Conflict("User already exists.".to_string()));
        }

        users.insert(username.as_str(), user_json.as_str())?;
    }
    write_txn.commit()?;

    tracing::info!(username = %username, tier, "registered user");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// Reports a user's tier, total usage and remaining quota
///
/// # Query Parameters
///
/// - `username` (required)
///
/// # Response
///
/// - **200 OK** - `{tier, totalRequests, remainingRequests}`
/// - **400 Bad Request** - Missing username parameter
/// - **404 Not Found** - Unknown user
pub async fn user_info(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let username = params
        .username
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::Validation("Username is required".to_string()))?;

    let read_txn = state.db.begin_read()?;
    let users = read_txn.open_table(TABLE_USERS)?;

    let user = match users.get(username.as_str())? {
        Some(value) => serde_json::from_str::<User>(value.value())?,
        None => return Err(ApiError::NotFound("User not found".to_string())),
    };

    Ok(Json(UserInfoResponse {
        tier: user.tier,
        total_requests: user.request_count,
        remaining_requests: remaining_requests(&user),
    }))
}

/// Shortens a long URL for a registered user
///
/// This handler:
/// 1. Validates the payload and the URL syntax
/// 2. Gates the request on the user's tier quota
/// 3. Allocates a short identifier (generated, or the caller's preferred one)
/// 4. Stores the record in the main table and the per-user history index
/// 5. Increments the user's request count
///
/// All writes happen in a single transaction, so a failure leaves neither a
/// dangling record nor a consumed quota slot.
///
/// # Request Body
///
/// ```json
/// {
///   "username": "alice",
///   "longUrl": "https://example.com/very/long/url",
///   "preferredShortId": "my-link"  // Optional
/// }
/// ```
///
/// # Response
///
/// - **200 OK** - `{shortUrl, remainingRequests}`
/// - **400 Bad Request** - Missing fields, invalid URL, or a preferred short
///   URL that is not shorter than the long URL
/// - **404 Not Found** - Unknown user
/// - **409 Conflict** - Preferred identifier already in use
/// - **429 Too Many Requests** - Tier limit reached
pub async fn shorten_url(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload
        .map_err(|_| ApiError::Validation("Username and long URL are required".to_string()))?;

    let username = payload
        .username
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::Validation("Username and long URL are required".to_string()))?;
    let long_url = payload
        .long_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::Validation("Username and long URL are required".to_string()))?;

    if !is_valid_url(&long_url) {
        return Err(ApiError::Validation("Invalid URL provided".to_string()));
    }

    // Treat an empty preferred identifier as absent
    let preferred_short_id = payload.preferred_short_id.filter(|id| !id.is_empty());

    let domain = base_url();

    // A preferred short URL that is no shorter than the long URL defeats
    // the point of shortening; reject it before touching storage.
    if let Some(preferred) = &preferred_short_id {
        let full_preferred = format!("{}/{}", domain, preferred);
        if full_preferred.len() >= long_url.len() {
            return Err(ApiError::Validation(
                "Length of short URL should not be greater than or equal to length of long URL"
                    .to_string(),
            ));
        }
    }

    let write_txn = state.db.begin_write()?;

    // Deserialize in a statement of its own: the access guard returned by
    // get() borrows the table and must not outlive it.
    let stored_user = {
        let users = write_txn.open_table(TABLE_USERS)?;
        let user = users
            .get(username.as_str())?
            .map(|value| serde_json::from_str::<User>(value.value()))
            .transpose()?;
        user
    };
    let mut user = stored_user.ok_or_else(|| {
        ApiError::NotFound("User does not exist. Please register first.".to_string())
    })?;

    if !can_make_request(&user) {
        return Err(ApiError::QuotaExceeded {
            remaining: remaining_requests(&user),
        });
    }

    // Allocation and the record insert share this transaction, so the
    // returned identifier stays free until the commit below.
    let short_id = allocate_short_id(&write_txn, preferred_short_id)?;

    let record = UrlRecord {
        short_id: short_id.clone(),
        long_url,
        username: user.username.clone(),
        created_at: Utc::now(),
    };
    let record_json = serde_json::to_string(&record)?;

    {
        let mut urls = write_txn.open_table(TABLE_URLS)?;
        urls.insert(short_id.as_str(), record_json.as_str())?;
    }
    {
        let index_key = history_index_key(&user.username, &record.created_at, &short_id);
        let mut index = write_txn.open_table(TABLE_USER_INDEX)?;
        index.insert(index_key.as_str(), record_json.as_str())?;
    }
    {
        user.request_count += 1;
        let user_json = serde_json::to_string(&user)?;
        let mut users = write_txn.open_table(TABLE_USERS)?;
        users.insert(username.as_str(), user_json.as_str())?;
    }

    write_txn.commit()?;

    tracing::debug!(username = %user.username, short_id = %short_id, "shortened url");

    Ok(Json(ShortenResponse {
        short_url: format!("{}/{}", domain, short_id),
        remaining_requests: remaining_requests(&user),
    }))
}

/// Lists a user's shortening history in chronological order
///
/// Uses a range query on the per-user history index for O(log n) lookup
/// instead of scanning the main table. Results are additionally filtered
/// on the record's own username so that usernames containing ':' cannot
/// bleed into a neighboring range.
///
/// # Query Parameters
///
/// - `username` (required)
///
/// # Response
///
/// - **200 OK** - Array of `{longUrl, shortId, createdAt}`
/// - **400 Bad Request** - Missing username parameter
/// - **404 Not Found** - No URLs recorded for this user
pub async fn url_history(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let username = params
        .username
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::Validation("Username is required".to_string()))?;

    let read_txn = state.db.begin_read()?;
    let index = read_txn.open_table(TABLE_USER_INDEX)?;

    // start_key: "alice:" matches every entry for this user
    // end_key: "alice:{" - '{' is lexicographically after ':', so this
    //          forms the upper bound of the user's range
    let start_key = format!("{}:", username);
    let end_key = format!("{}:{{", username);

    let entries: Vec<HistoryEntry> = index
        .range(start_key.as_str()..end_key.as_str())?
        .filter_map(|res| {
            res.ok()
                .and_then(|(_, value)| serde_json::from_str::<UrlRecord>(value.value()).ok())
        })
        .filter(|record| record.username == username)
        .map(HistoryEntry::from)
        .collect();

    if entries.is_empty() {
        return Err(ApiError::NotFound("No URLs found for this user".to_string()));
    }

    Ok(Json(entries))
}

/// Redirects a short identifier to its original destination
///
/// # Path Parameters
///
/// - `short_id` - The short identifier to resolve
///
/// # Response
///
/// - **302 Found** - Redirects to the stored long URL
/// - **404 Not Found** - Unknown short identifier
pub async fn redirect_url(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let read_txn = state.db.begin_read()?;
    let urls = read_txn.open_table(TABLE_URLS)?;

    match urls.get(short_id.as_str())? {
        Some(value) => {
            let record = serde_json::from_str::<UrlRecord>(value.value())?;
            Ok((StatusCode::FOUND, [(header::LOCATION, record.long_url)]))
        }
        None => Err(ApiError::NotFound("URL not found".to_string())),
    }
}
