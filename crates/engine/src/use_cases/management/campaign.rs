//! Campaign CRUD operations.

use std::sync::Arc;

use lorekeeper_domain::{Campaign, CampaignId, CampaignPatch, NewCampaign, UserId};
use serde::Deserialize;

use super::{required, ManagementError};
use crate::infrastructure::ports::CampaignRepo;

/// Body of a campaign create request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCampaignInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub struct CampaignCrud {
    campaigns: Arc<dyn CampaignRepo>,
}

impl CampaignCrud {
    pub fn new(campaigns: Arc<dyn CampaignRepo>) -> Self {
        Self { campaigns }
    }

    pub async fn list(&self, user_id: UserId) -> Result<Vec<Campaign>, ManagementError> {
        Ok(self.campaigns.list_for_user(user_id).await?)
    }

    pub async fn get(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
    ) -> Result<Campaign, ManagementError> {
        self.campaigns
            .get_owned(campaign_id, user_id)
            .await?
            .ok_or(ManagementError::NotFound("campaign"))
    }

    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateCampaignInput,
    ) -> Result<Campaign, ManagementError> {
        let campaign = NewCampaign::new(user_id, required("title", input.title)?)?
            .with_description(input.description);

        let created = self.campaigns.insert(&campaign).await?;
        tracing::info!(user_id = %user_id, campaign_id = %created.id, "Campaign created");
        Ok(created)
    }

    pub async fn update(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
        patch: CampaignPatch,
    ) -> Result<Campaign, ManagementError> {
        patch.validate()?;

        let updated = self
            .campaigns
            .update_owned(campaign_id, user_id, &patch)
            .await?
            .ok_or(ManagementError::NotFound("campaign"))?;
        tracing::info!(user_id = %user_id, campaign_id = %campaign_id, "Campaign updated");
        Ok(updated)
    }

    pub async fn delete(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
    ) -> Result<(), ManagementError> {
        self.get(user_id, campaign_id).await?;
        self.campaigns.delete_owned(campaign_id, user_id).await?;
        tracing::info!(user_id = %user_id, campaign_id = %campaign_id, "Campaign deleted");
        Ok(())
    }
}
