//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod anthropic;
pub mod config;
pub mod ports;
pub mod supabase;
