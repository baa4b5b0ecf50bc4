//! Campaign rows. Every read and write is scoped to the owning user.

use async_trait::async_trait;
use lorekeeper_domain::*;

use super::rest::SupabaseClient;
use crate::infrastructure::ports::{CampaignRepo, RepoError};

const TABLE: &str = "campaigns";

pub struct SupabaseCampaignRepo {
    client: SupabaseClient,
}

impl SupabaseCampaignRepo {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CampaignRepo for SupabaseCampaignRepo {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Campaign>, RepoError> {
        self.client.from(TABLE).eq("user_id", user_id).fetch().await
    }

    async fn get_owned(
        &self,
        id: CampaignId,
        user_id: UserId,
    ) -> Result<Option<Campaign>, RepoError> {
        self.client
            .from(TABLE)
            .eq("id", id)
            .eq("user_id", user_id)
            .fetch_one()
            .await
    }

    async fn insert(&self, campaign: &NewCampaign) -> Result<Campaign, RepoError> {
        self.client.from(TABLE).insert(campaign).await
    }

    async fn update_owned(
        &self,
        id: CampaignId,
        user_id: UserId,
        patch: &CampaignPatch,
    ) -> Result<Option<Campaign>, RepoError> {
        self.client
            .from(TABLE)
            .eq("id", id)
            .eq("user_id", user_id)
            .update(patch)
            .await
    }

    async fn delete_owned(&self, id: CampaignId, user_id: UserId) -> Result<(), RepoError> {
        self.client
            .from(TABLE)
            .eq("id", id)
            .eq("user_id", user_id)
            .delete()
            .await
    }
}
