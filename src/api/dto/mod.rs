//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Field names are camelCase to match the stored records.

pub mod health;
pub mod shorten;
pub mod stats;
