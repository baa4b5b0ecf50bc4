//! Character rows.

use async_trait::async_trait;
use lorekeeper_domain::*;

use super::rest::SupabaseClient;
use crate::infrastructure::ports::{CharacterRepo, RepoError};

const TABLE: &str = "characters";

pub struct SupabaseCharacterRepo {
    client: SupabaseClient,
}

impl SupabaseCharacterRepo {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CharacterRepo for SupabaseCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        self.client.from(TABLE).eq("id", id).fetch_one().await
    }

    async fn insert(&self, character: &NewCharacter) -> Result<Character, RepoError> {
        self.client.from(TABLE).insert(character).await
    }

    async fn update(
        &self,
        id: CharacterId,
        patch: &CharacterPatch,
    ) -> Result<Option<Character>, RepoError> {
        self.client.from(TABLE).eq("id", id).update(patch).await
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.client.from(TABLE).eq("id", id).delete().await
    }

    async fn list_for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Character>, RepoError> {
        self.client
            .from(TABLE)
            .eq("campaign_id", campaign_id)
            .fetch()
            .await
    }
}
