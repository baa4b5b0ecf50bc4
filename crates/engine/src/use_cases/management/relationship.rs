//! Relationship CRUD operations.

use std::sync::Arc;

use lorekeeper_domain::{
    CampaignId, CharacterId, NewRelationship, Relationship, RelationshipId, RelationshipPatch,
    UserId,
};
use serde::Deserialize;

use super::{required, ManagementError, OwnershipGuard};
use crate::infrastructure::ports::{CharacterRepo, RelationshipRepo};

/// Body of a relationship create request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRelationshipInput {
    pub campaign_id: Option<CampaignId>,
    pub source_character_id: Option<CharacterId>,
    pub target_character_id: Option<CharacterId>,
    pub relation_type: Option<String>,
    pub description: Option<String>,
}

pub struct RelationshipCrud {
    relationships: Arc<dyn RelationshipRepo>,
    characters: Arc<dyn CharacterRepo>,
    ownership: OwnershipGuard,
}

impl RelationshipCrud {
    pub fn new(
        relationships: Arc<dyn RelationshipRepo>,
        characters: Arc<dyn CharacterRepo>,
        ownership: OwnershipGuard,
    ) -> Self {
        Self {
            relationships,
            characters,
            ownership,
        }
    }

    pub async fn list(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
    ) -> Result<Vec<Relationship>, ManagementError> {
        self.ownership.require_campaign(campaign_id, user_id).await?;
        Ok(self.relationships.list_for_campaign(campaign_id).await?)
    }

    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateRelationshipInput,
    ) -> Result<Relationship, ManagementError> {
        let campaign_id = required("campaign_id", input.campaign_id)?;
        let relationship = NewRelationship::new(
            campaign_id,
            required("source_character_id", input.source_character_id)?,
            required("target_character_id", input.target_character_id)?,
            required("relation_type", input.relation_type)?,
        )?
        .with_description(input.description);

        self.ownership.require_campaign(campaign_id, user_id).await?;
        self.require_member("source_character_id", relationship.source_character_id, campaign_id)
            .await?;
        self.require_member("target_character_id", relationship.target_character_id, campaign_id)
            .await?;

        let created = self.relationships.insert(&relationship).await?;
        tracing::info!(
            user_id = %user_id,
            campaign_id = %campaign_id,
            relationship_id = %created.id,
            "Relationship created"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        user_id: UserId,
        relationship_id: RelationshipId,
        patch: RelationshipPatch,
    ) -> Result<Relationship, ManagementError> {
        patch.validate()?;

        let existing = self.load(relationship_id).await?;
        self.ownership
            .require_parent(existing.campaign_id, user_id)
            .await?;

        let updated = self
            .relationships
            .update(relationship_id, &patch)
            .await?
            .ok_or(ManagementError::NotFound("relationship"))?;
        tracing::info!(
            user_id = %user_id,
            relationship_id = %relationship_id,
            "Relationship updated"
        );
        Ok(updated)
    }

    pub async fn delete(
        &self,
        user_id: UserId,
        relationship_id: RelationshipId,
    ) -> Result<(), ManagementError> {
        let existing = self.load(relationship_id).await?;
        self.ownership
            .require_parent(existing.campaign_id, user_id)
            .await?;

        self.relationships.delete(relationship_id).await?;
        tracing::info!(
            user_id = %user_id,
            relationship_id = %relationship_id,
            "Relationship deleted"
        );
        Ok(())
    }

    async fn load(&self, relationship_id: RelationshipId) -> Result<Relationship, ManagementError> {
        self.relationships
            .get(relationship_id)
            .await?
            .ok_or(ManagementError::NotFound("relationship"))
    }

    // Both ends of a relationship must live in the campaign it is filed under.
    async fn require_member(
        &self,
        field: &'static str,
        character_id: CharacterId,
        campaign_id: CampaignId,
    ) -> Result<(), ManagementError> {
        match self.characters.get(character_id).await? {
            Some(character) if character.campaign_id == campaign_id => Ok(()),
            _ => Err(ManagementError::InvalidInput(format!(
                "{field} must reference a character in the campaign"
            ))),
        }
    }
}
