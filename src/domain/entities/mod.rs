//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - A shortened URL with validity window and click history
//! - [`ClickEvent`] - One successful resolution of a short code
//!
//! Creation input lives in separate structs ([`NewLink`], [`ClickContext`]),
//! following the same "New Type" split as persisted records.

pub mod click;
pub mod link;

pub use click::{ClickContext, ClickEvent, DIRECT_SOURCE, UNKNOWN_LOCATION};
pub use link::{LinkRecord, LinkStatus, NewLink, RedirectTarget};
