//! User models for the API service

use serde::{Deserialize, Serialize};

/// Request for user creation.
///
/// All scalar fields are optional and stored as given; `locations` is a list
/// of location names resolved with get-or-create semantics.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Partial update for a user; only fields that are present are applied.
///
/// A present `locations` list replaces the whole association set. `role` is
/// not updatable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub age: Option<i64>,
    pub locations: Option<Vec<String>>,
}

/// User representation with resolved location names
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub age: Option<i64>,
    pub locations: Vec<String>,
}

/// Listing row: the user representation annotated with the count of that
/// user's published ads.
#[derive(Debug, Serialize)]
pub struct UserListItem {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub age: Option<i64>,
    pub locations: Vec<String>,
    pub total_ads: i64,
}

/// Response for the paginated user listing
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub total: i64,
    pub total_page: i64,
    pub items: Vec<UserListItem>,
}
