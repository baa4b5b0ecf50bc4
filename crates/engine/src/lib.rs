//! Lore Keeper Engine library.
//!
//! Server-side code for the Lore Keeper campaign notebook.
//!
//! ## Structure
//!
//! - `use_cases/` - Ownership-checked CRUD and the AI assistant
//! - `infrastructure/` - Ports plus the hosted store, identity provider and LLM adapters
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
