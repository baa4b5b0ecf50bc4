//! Parent-campaign ownership checks shared by the child entity CRUDs.

use std::sync::Arc;

use lorekeeper_domain::{Campaign, CampaignId, UserId};

use super::ManagementError;
use crate::infrastructure::ports::CampaignRepo;

/// Decides whether a user may act on things filed under a campaign.
#[derive(Clone)]
pub struct OwnershipGuard {
    campaigns: Arc<dyn CampaignRepo>,
}

impl OwnershipGuard {
    pub fn new(campaigns: Arc<dyn CampaignRepo>) -> Self {
        Self { campaigns }
    }

    /// The campaign a new or listed child refers to. A missing campaign and
    /// a foreign one are reported the same way.
    pub async fn require_campaign(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
    ) -> Result<Campaign, ManagementError> {
        match self.campaigns.get_owned(campaign_id, user_id).await? {
            Some(campaign) => Ok(campaign),
            None => {
                tracing::warn!(
                    user_id = %user_id,
                    campaign_id = %campaign_id,
                    "Campaign not found or not owned by caller"
                );
                Err(ManagementError::Forbidden(
                    "campaign not found or access denied",
                ))
            }
        }
    }

    /// Re-check ownership of an existing child's parent before touching it.
    pub async fn require_parent(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
    ) -> Result<(), ManagementError> {
        match self.require_campaign(campaign_id, user_id).await {
            Ok(_) => Ok(()),
            Err(ManagementError::Forbidden(_)) => Err(ManagementError::Forbidden("access denied")),
            Err(e) => Err(e),
        }
    }
}
