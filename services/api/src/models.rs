//! API models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod ads;
pub mod users;

/// Request body for category create and update.
///
/// `name` is deliberately optional: a create without a name stores NULL, and
/// an update without a name clears it. Anything else in the payload is
/// ignored.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: Option<String>,
}

/// Response for category operations
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: Option<String>,
}

/// Query parameters for paginated listings.
///
/// The page is taken as a raw string so that a non-numeric value falls back
/// to the first page instead of rejecting the request.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based)
    pub page: Option<String>,
}

impl PageQuery {
    pub fn number(&self) -> Option<i64> {
        self.page.as_deref().and_then(|p| p.parse().ok())
    }
}
