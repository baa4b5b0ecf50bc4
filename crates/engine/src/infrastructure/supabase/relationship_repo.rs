//! Relationship rows.

use async_trait::async_trait;
use lorekeeper_domain::*;

use super::rest::SupabaseClient;
use crate::infrastructure::ports::{RelationshipRepo, RepoError};

const TABLE: &str = "relationships";

pub struct SupabaseRelationshipRepo {
    client: SupabaseClient,
}

impl SupabaseRelationshipRepo {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RelationshipRepo for SupabaseRelationshipRepo {
    async fn get(&self, id: RelationshipId) -> Result<Option<Relationship>, RepoError> {
        self.client.from(TABLE).eq("id", id).fetch_one().await
    }

    async fn insert(&self, relationship: &NewRelationship) -> Result<Relationship, RepoError> {
        self.client.from(TABLE).insert(relationship).await
    }

    async fn update(
        &self,
        id: RelationshipId,
        patch: &RelationshipPatch,
    ) -> Result<Option<Relationship>, RepoError> {
        self.client.from(TABLE).eq("id", id).update(patch).await
    }

    async fn delete(&self, id: RelationshipId) -> Result<(), RepoError> {
        self.client.from(TABLE).eq("id", id).delete().await
    }

    async fn list_for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Relationship>, RepoError> {
        self.client
            .from(TABLE)
            .eq("campaign_id", campaign_id)
            .fetch()
            .await
    }
}
