//! Serde helpers for reading rows from the hosted store.
//!
//! Columns there are nullable even where the API treats the value as
//! always present, and pgvector columns come back as text. These helpers
//! keep that mess out of the entity definitions.

pub mod columns;

pub use columns::{deserialize_embedding, null_as_default};
