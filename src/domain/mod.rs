//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains what it needs of:
//! - `mod.rs`: Rich domain types (validated, display-ready)
//! - `wire.rs`: Raw serde structs matching upstream responses
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `state.rs`: State containers with update methods (app-owned)
//! - `client.rs`: Sub-client with HTTP methods

pub mod dashboard;
pub mod market;
pub mod price_history;
