//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    ports::{CampaignRepo, CharacterRepo, IdentityPort, LlmPort, LoreEntryRepo, RelationshipRepo},
    supabase::SupabaseRepositories,
};
use crate::use_cases;
use crate::use_cases::management::{
    CampaignCrud, CharacterCrud, LoreEntryCrud, OwnershipGuard, RelationshipCrud,
};

/// Main application state.
///
/// Holds the use cases and the identity port used by the auth gate.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub identity: Arc<dyn IdentityPort>,
}

/// Container for all repository ports.
pub struct Repositories {
    pub campaign: Arc<dyn CampaignRepo>,
    pub character: Arc<dyn CharacterRepo>,
    pub relationship: Arc<dyn RelationshipRepo>,
    pub lore_entry: Arc<dyn LoreEntryRepo>,
}

impl From<SupabaseRepositories> for Repositories {
    fn from(repos: SupabaseRepositories) -> Self {
        Self {
            campaign: repos.campaign,
            character: repos.character,
            relationship: repos.relationship,
            lore_entry: repos.lore_entry,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub management: use_cases::ManagementUseCases,
    pub ai: use_cases::AiUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repos: Repositories,
        llm: Arc<dyn LlmPort>,
        identity: Arc<dyn IdentityPort>,
    ) -> Self {
        let ownership = OwnershipGuard::new(repos.campaign.clone());

        let management = use_cases::ManagementUseCases::new(
            CampaignCrud::new(repos.campaign.clone()),
            CharacterCrud::new(repos.character.clone(), ownership.clone()),
            RelationshipCrud::new(
                repos.relationship.clone(),
                repos.character.clone(),
                ownership.clone(),
            ),
            LoreEntryCrud::new(repos.lore_entry.clone(), ownership),
        );

        let assistant = Arc::new(use_cases::ai::AssistantOps::new(
            llm,
            repos.campaign,
            repos.lore_entry,
        ));

        Self {
            use_cases: UseCases {
                management,
                ai: use_cases::AiUseCases::new(assistant),
            },
            identity,
        }
    }
}
