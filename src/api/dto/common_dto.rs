//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for the venue and artist search endpoints.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Name fragment; matched case-insensitively anywhere in the name.
    /// Empty matches everything.
    #[serde(default)]
    pub search_term: String,
}
