//! Repository port traits for the hosted store.
//!
//! Ownership is never decided here. Repos answer questions about rows;
//! the management use cases decide who may see or change them.

use async_trait::async_trait;
use lorekeeper_domain::*;

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepo: Send + Sync {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Campaign>, RepoError>;

    /// The campaign, only if `user_id` owns it.
    async fn get_owned(
        &self,
        id: CampaignId,
        user_id: UserId,
    ) -> Result<Option<Campaign>, RepoError>;

    async fn insert(&self, campaign: &NewCampaign) -> Result<Campaign, RepoError>;

    /// Returns `None` when no row matched both id and owner.
    async fn update_owned(
        &self,
        id: CampaignId,
        user_id: UserId,
        patch: &CampaignPatch,
    ) -> Result<Option<Campaign>, RepoError>;

    async fn delete_owned(&self, id: CampaignId, user_id: UserId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn insert(&self, character: &NewCharacter) -> Result<Character, RepoError>;
    async fn update(
        &self,
        id: CharacterId,
        patch: &CharacterPatch,
    ) -> Result<Option<Character>, RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;

    // Queries
    async fn list_for_campaign(&self, campaign_id: CampaignId)
        -> Result<Vec<Character>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: RelationshipId) -> Result<Option<Relationship>, RepoError>;
    async fn insert(&self, relationship: &NewRelationship) -> Result<Relationship, RepoError>;
    async fn update(
        &self,
        id: RelationshipId,
        patch: &RelationshipPatch,
    ) -> Result<Option<Relationship>, RepoError>;
    async fn delete(&self, id: RelationshipId) -> Result<(), RepoError>;

    // Queries
    async fn list_for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Relationship>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoreEntryRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: LoreEntryId) -> Result<Option<LoreEntry>, RepoError>;
    async fn insert(&self, entry: &NewLoreEntry) -> Result<LoreEntry, RepoError>;
    async fn update(
        &self,
        id: LoreEntryId,
        patch: &LoreEntryPatch,
    ) -> Result<Option<LoreEntry>, RepoError>;
    async fn delete(&self, id: LoreEntryId) -> Result<(), RepoError>;

    // Queries
    async fn list_for_campaign(&self, campaign_id: CampaignId)
        -> Result<Vec<LoreEntry>, RepoError>;
    /// Only the `content` column of every entry, for prompt building.
    async fn list_contents(&self, campaign_id: CampaignId) -> Result<Vec<String>, RepoError>;
}
