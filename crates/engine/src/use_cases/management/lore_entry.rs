//! Lore entry CRUD operations.

use std::sync::Arc;

use lorekeeper_domain::{CampaignId, LoreEntry, LoreEntryId, LoreEntryPatch, NewLoreEntry, UserId};
use serde::Deserialize;

use super::{required, ManagementError, OwnershipGuard};
use crate::infrastructure::ports::LoreEntryRepo;

/// Body of a lore entry create request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLoreEntryInput {
    pub campaign_id: Option<CampaignId>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
}

pub struct LoreEntryCrud {
    entries: Arc<dyn LoreEntryRepo>,
    ownership: OwnershipGuard,
}

impl LoreEntryCrud {
    pub fn new(entries: Arc<dyn LoreEntryRepo>, ownership: OwnershipGuard) -> Self {
        Self { entries, ownership }
    }

    pub async fn list(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
    ) -> Result<Vec<LoreEntry>, ManagementError> {
        self.ownership.require_campaign(campaign_id, user_id).await?;
        Ok(self.entries.list_for_campaign(campaign_id).await?)
    }

    pub async fn get(
        &self,
        user_id: UserId,
        entry_id: LoreEntryId,
    ) -> Result<LoreEntry, ManagementError> {
        let entry = self.load(entry_id).await?;
        self.ownership.require_parent(entry.campaign_id, user_id).await?;
        Ok(entry)
    }

    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateLoreEntryInput,
    ) -> Result<LoreEntry, ManagementError> {
        let campaign_id = required("campaign_id", input.campaign_id)?;
        let entry = NewLoreEntry::new(
            campaign_id,
            required("title", input.title)?,
            required("content", input.content)?,
        )?
        .with_category(input.category);

        self.ownership.require_campaign(campaign_id, user_id).await?;

        let created = self.entries.insert(&entry).await?;
        tracing::info!(
            user_id = %user_id,
            campaign_id = %campaign_id,
            lore_entry_id = %created.id,
            "Lore entry created"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        user_id: UserId,
        entry_id: LoreEntryId,
        patch: LoreEntryPatch,
    ) -> Result<LoreEntry, ManagementError> {
        patch.validate()?;

        let existing = self.load(entry_id).await?;
        self.ownership
            .require_parent(existing.campaign_id, user_id)
            .await?;

        let updated = self
            .entries
            .update(entry_id, &patch)
            .await?
            .ok_or(ManagementError::NotFound("lore entry"))?;
        tracing::info!(user_id = %user_id, lore_entry_id = %entry_id, "Lore entry updated");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: UserId, entry_id: LoreEntryId) -> Result<(), ManagementError> {
        let existing = self.load(entry_id).await?;
        self.ownership
            .require_parent(existing.campaign_id, user_id)
            .await?;

        self.entries.delete(entry_id).await?;
        tracing::info!(user_id = %user_id, lore_entry_id = %entry_id, "Lore entry deleted");
        Ok(())
    }

    async fn load(&self, entry_id: LoreEntryId) -> Result<LoreEntry, ManagementError> {
        self.entries
            .get(entry_id)
            .await?
            .ok_or(ManagementError::NotFound("lore entry"))
    }
}
