//! Data Transfer Objects for REST request/response serialization.
//!
//! Request DTOs convert into validated domain drafts with `TryFrom`;
//! response DTOs are built from service results with `From`.

pub mod artist_dto;
pub mod common_dto;
pub mod show_dto;
pub mod venue_dto;

pub use artist_dto::*;
pub use common_dto::*;
pub use show_dto::*;
pub use venue_dto::*;
