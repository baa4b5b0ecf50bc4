//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across repository ports to fulfill user stories.

pub mod ai;
pub mod management;

pub use ai::AiUseCases;
pub use management::ManagementUseCases;
