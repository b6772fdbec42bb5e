//! Ad models for the API service

use serde::{Deserialize, Serialize};

/// Request for ad creation
#[derive(Debug, Deserialize)]
pub struct CreateAdRequest {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub author_id: i64,
    pub category_id: i64,
    #[serde(default)]
    pub is_published: Option<bool>,
}

/// Partial update for an ad; only fields that are present are applied.
///
/// `author_id` and `is_published` are not part of the update contract and are
/// silently dropped when sent.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAdRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category_id: Option<i64>,
}

/// Full ad representation with resolved author username and category name
#[derive(Debug, Serialize)]
pub struct AdResponse {
    pub id: i64,
    pub name: String,
    pub author: Option<String>,
    pub price: i64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_published: bool,
    /// URL under /media/, null while no image has been uploaded
    pub image: Option<String>,
}

/// Response for the paginated ad listing
#[derive(Debug, Serialize)]
pub struct AdListResponse {
    pub total: i64,
    pub total_page: i64,
    pub items: Vec<AdResponse>,
}
