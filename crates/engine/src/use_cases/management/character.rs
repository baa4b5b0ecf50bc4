//! Character CRUD operations.

use std::sync::Arc;

use lorekeeper_domain::{
    Attributes, CampaignId, Character, CharacterId, CharacterPatch, NewCharacter, UserId,
};
use serde::Deserialize;

use super::{required, ManagementError, OwnershipGuard};
use crate::infrastructure::ports::CharacterRepo;

/// Body of a character create request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCharacterInput {
    pub campaign_id: Option<CampaignId>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub attributes: Option<Attributes>,
    pub background: Option<String>,
}

pub struct CharacterCrud {
    characters: Arc<dyn CharacterRepo>,
    ownership: OwnershipGuard,
}

impl CharacterCrud {
    pub fn new(characters: Arc<dyn CharacterRepo>, ownership: OwnershipGuard) -> Self {
        Self {
            characters,
            ownership,
        }
    }

    pub async fn list(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
    ) -> Result<Vec<Character>, ManagementError> {
        self.ownership.require_campaign(campaign_id, user_id).await?;
        Ok(self.characters.list_for_campaign(campaign_id).await?)
    }

    pub async fn get(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<Character, ManagementError> {
        let character = self.load(character_id).await?;
        self.ownership
            .require_parent(character.campaign_id, user_id)
            .await?;
        Ok(character)
    }

    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateCharacterInput,
    ) -> Result<Character, ManagementError> {
        let campaign_id = required("campaign_id", input.campaign_id)?;
        let character = NewCharacter::new(campaign_id, required("name", input.name)?)?
            .with_role(input.role.unwrap_or_default())
            .with_attributes(input.attributes.unwrap_or_default())
            .with_background(input.background);

        self.ownership.require_campaign(campaign_id, user_id).await?;

        let created = self.characters.insert(&character).await?;
        tracing::info!(
            user_id = %user_id,
            campaign_id = %campaign_id,
            character_id = %created.id,
            "Character created"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        user_id: UserId,
        character_id: CharacterId,
        patch: CharacterPatch,
    ) -> Result<Character, ManagementError> {
        patch.validate()?;

        let existing = self.load(character_id).await?;
        self.ownership
            .require_parent(existing.campaign_id, user_id)
            .await?;

        let updated = self
            .characters
            .update(character_id, &patch)
            .await?
            .ok_or(ManagementError::NotFound("character"))?;
        tracing::info!(user_id = %user_id, character_id = %character_id, "Character updated");
        Ok(updated)
    }

    pub async fn delete(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<(), ManagementError> {
        let existing = self.load(character_id).await?;
        self.ownership
            .require_parent(existing.campaign_id, user_id)
            .await?;

        self.characters.delete(character_id).await?;
        tracing::info!(user_id = %user_id, character_id = %character_id, "Character deleted");
        Ok(())
    }

    async fn load(&self, character_id: CharacterId) -> Result<Character, ManagementError> {
        self.characters
            .get(character_id)
            .await?
            .ok_or(ManagementError::NotFound("character"))
    }
}
