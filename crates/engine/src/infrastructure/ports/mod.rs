//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The hosted store (one repo per table)
//! - Bearer token verification against the identity provider
//! - LLM calls

mod error;
mod external;
mod repos;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CampaignRepo, CharacterRepo, LoreEntryRepo, RelationshipRepo};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    ChatMessage, FinishReason, IdentityPort, LlmPort, LlmRequest, LlmResponse, TokenUsage,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockCampaignRepo, MockCharacterRepo, MockLoreEntryRepo, MockRelationshipRepo};

#[cfg(test)]
pub use external::{MockIdentityPort, MockLlmPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{AuthError, LlmError, RepoError};
