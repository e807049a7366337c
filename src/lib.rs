//! # fyyur
//!
//! REST API for listing music venues, artists, and the shows that connect
//! them.
//!
//! Venues are browsed grouped by city and state, artists and venues are
//! searched by name, and every detail page splits its shows into past and
//! upcoming relative to the current local time. The grouping, splitting,
//! and ordering rules live in [`domain::aggregation`] as pure functions;
//! everything else is plumbing around them.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ListingService + Clock (service/)
//!     │
//!     ├── Aggregation Engine, records, form catalogs (domain/)
//!     │
//!     └── RecordStore (persistence/)
//!           ├── PostgresStore (sqlx)
//!           └── MemoryStore
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
