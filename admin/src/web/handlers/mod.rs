//! HTTP request handlers for the admin console API.
//!
//! This module is organized by domain:
//! - `common` - Shared types, query structs, and the error responder
//! - `health` - Connection-status polling
//! - `databases` - Database and collection listing, create/drop
//! - `documents` - Paginated listing and single-document CRUD
//! - `transfer` - Whole-database export and import

pub mod common;
pub mod databases;
pub mod documents;
pub mod health;
pub mod transfer;

// Re-export all public handler functions for convenience
// Note: common module is internal, used only by sibling modules
pub use databases::*;
pub use documents::*;
pub use health::*;
pub use transfer::*;
