//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic, with separate
//! `New*` structs for creation input.

pub mod url_mapping;
pub mod user;

pub use url_mapping::{NewUrlMapping, UrlMapping};
pub use user::{NewUser, User};
