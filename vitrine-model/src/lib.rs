//! Core data model definitions shared across Vitrine crates.
#![allow(missing_docs)]

pub mod date;
pub mod error;
pub mod ids;
pub mod item;
pub mod list;
pub mod text;

// Intentionally curated re-exports for downstream consumers.
pub use date::ShootingDate;
pub use error::{ModelError, Result as ModelResult};
pub use ids::ItemId;
pub use item::{Item, Photo};
pub use list::ItemList;
pub use text::rich_text_to_plain;
