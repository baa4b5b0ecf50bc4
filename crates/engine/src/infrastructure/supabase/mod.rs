//! Hosted store (PostgREST) and identity provider adapters.

use std::sync::Arc;

mod auth;
mod rest;

mod campaign_repo;
mod character_repo;
mod lore_entry_repo;
mod relationship_repo;

pub use auth::SupabaseAuth;
pub use rest::SupabaseClient;

pub use campaign_repo::SupabaseCampaignRepo;
pub use character_repo::SupabaseCharacterRepo;
pub use lore_entry_repo::SupabaseLoreEntryRepo;
pub use relationship_repo::SupabaseRelationshipRepo;

/// Create all hosted-store repositories from one client.
pub struct SupabaseRepositories {
    pub campaign: Arc<SupabaseCampaignRepo>,
    pub character: Arc<SupabaseCharacterRepo>,
    pub relationship: Arc<SupabaseRelationshipRepo>,
    pub lore_entry: Arc<SupabaseLoreEntryRepo>,
}

impl SupabaseRepositories {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            campaign: Arc::new(SupabaseCampaignRepo::new(client.clone())),
            character: Arc::new(SupabaseCharacterRepo::new(client.clone())),
            relationship: Arc::new(SupabaseRelationshipRepo::new(client.clone())),
            lore_entry: Arc::new(SupabaseLoreEntryRepo::new(client)),
        }
    }
}
