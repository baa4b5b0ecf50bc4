//! Lore entry rows.

use async_trait::async_trait;
use lorekeeper_domain::*;
use serde::Deserialize;

use super::rest::SupabaseClient;
use crate::infrastructure::ports::{LoreEntryRepo, RepoError};

const TABLE: &str = "lore_entries";

#[derive(Deserialize)]
struct ContentOnly {
    content: String,
}

pub struct SupabaseLoreEntryRepo {
    client: SupabaseClient,
}

impl SupabaseLoreEntryRepo {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LoreEntryRepo for SupabaseLoreEntryRepo {
    async fn get(&self, id: LoreEntryId) -> Result<Option<LoreEntry>, RepoError> {
        self.client.from(TABLE).eq("id", id).fetch_one().await
    }

    async fn insert(&self, entry: &NewLoreEntry) -> Result<LoreEntry, RepoError> {
        self.client.from(TABLE).insert(entry).await
    }

    async fn update(
        &self,
        id: LoreEntryId,
        patch: &LoreEntryPatch,
    ) -> Result<Option<LoreEntry>, RepoError> {
        self.client.from(TABLE).eq("id", id).update(patch).await
    }

    async fn delete(&self, id: LoreEntryId) -> Result<(), RepoError> {
        self.client.from(TABLE).eq("id", id).delete().await
    }

    async fn list_for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<LoreEntry>, RepoError> {
        self.client
            .from(TABLE)
            .eq("campaign_id", campaign_id)
            .fetch()
            .await
    }

    async fn list_contents(&self, campaign_id: CampaignId) -> Result<Vec<String>, RepoError> {
        let rows: Vec<ContentOnly> = self
            .client
            .from(TABLE)
            .select("content")
            .eq("campaign_id", campaign_id)
            .fetch()
            .await?;
        Ok(rows.into_iter().map(|row| row.content).collect())
    }
}
