//! AI assistant use cases: idea expansion and lore consistency checks.

use std::sync::Arc;

use lorekeeper_domain::{Campaign, CampaignId, UserId};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{
    CampaignRepo, ChatMessage, FinishReason, LlmError, LlmPort, LlmRequest, LoreEntryRepo,
    RepoError,
};

mod prompts;
mod reply;

pub use reply::ConsistencyVerdict;

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Body of a deep-dive request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeepDiveInput {
    /// Free-form description of a character or concept.
    pub input: Option<serde_json::Value>,
    /// Campaign whose setting should frame the suggestions.
    pub campaign_id: Option<CampaignId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeepDiveResult {
    pub suggestions: Vec<String>,
}

/// Body of a consistency-check request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsistencyCheckInput {
    pub campaign_id: Option<CampaignId>,
    pub new_content: Option<String>,
}

pub struct AiUseCases {
    pub assistant: Arc<AssistantOps>,
}

impl AiUseCases {
    pub fn new(assistant: Arc<AssistantOps>) -> Self {
        Self { assistant }
    }
}

pub struct AssistantOps {
    llm: Arc<dyn LlmPort>,
    campaigns: Arc<dyn CampaignRepo>,
    lore: Arc<dyn LoreEntryRepo>,
}

impl AssistantOps {
    pub fn new(
        llm: Arc<dyn LlmPort>,
        campaigns: Arc<dyn CampaignRepo>,
        lore: Arc<dyn LoreEntryRepo>,
    ) -> Self {
        Self {
            llm,
            campaigns,
            lore,
        }
    }

    /// Expand a character or concept into 3-5 suggestions.
    pub async fn deep_dive(
        &self,
        user_id: UserId,
        request: DeepDiveInput,
    ) -> Result<DeepDiveResult, AssistantError> {
        let input = match request.input {
            Some(value @ serde_json::Value::Object(_)) => value,
            Some(_) => {
                return Err(AssistantError::InvalidInput(
                    "input must be a JSON object".to_string(),
                ))
            }
            None => return Err(AssistantError::InvalidInput("input is required".to_string())),
        };

        let setting = match request.campaign_id {
            Some(campaign_id) => Some(self.owned_campaign(campaign_id, user_id).await?),
            None => None,
        };

        let input_json = serde_json::to_string_pretty(&input)
            .map_err(|e| AssistantError::Serialization(e.to_string()))?;
        let prompt = prompts::deep_dive(&input_json, setting.as_ref());

        let reply = self.complete(prompt).await?;
        let suggestions = reply::parse_suggestions(&reply);

        tracing::info!(
            user_id = %user_id,
            suggestion_count = suggestions.len(),
            "Generated deep-dive suggestions"
        );
        Ok(DeepDiveResult { suggestions })
    }

    /// Compare new content against every lore entry in the campaign.
    pub async fn check_consistency(
        &self,
        user_id: UserId,
        request: ConsistencyCheckInput,
    ) -> Result<ConsistencyVerdict, AssistantError> {
        let campaign_id = request
            .campaign_id
            .ok_or_else(|| AssistantError::InvalidInput("campaign_id is required".to_string()))?;
        let new_content = request
            .new_content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AssistantError::InvalidInput("new_content is required".to_string()))?;

        self.owned_campaign(campaign_id, user_id).await?;

        let existing = self.lore.list_contents(campaign_id).await?;
        let prompt = prompts::consistency_check(&prompts::join_lore(&existing), &new_content);

        let reply = self.complete(prompt).await?;
        let verdict = reply::parse_verdict(&reply);

        tracing::info!(
            user_id = %user_id,
            campaign_id = %campaign_id,
            lore_count = existing.len(),
            is_consistent = verdict.is_consistent,
            "Checked lore consistency"
        );
        Ok(verdict)
    }

    async fn owned_campaign(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
    ) -> Result<Campaign, AssistantError> {
        self.campaigns
            .get_owned(campaign_id, user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    user_id = %user_id,
                    campaign_id = %campaign_id,
                    "Assistant request for campaign not owned by caller"
                );
                AssistantError::Forbidden("campaign not found or access denied")
            })
    }

    async fn complete(&self, prompt: String) -> Result<String, AssistantError> {
        let request =
            LlmRequest::new(vec![ChatMessage::user(prompt)]).with_system_prompt(prompts::SYSTEM_PROMPT);

        let response = self.llm.generate(request).await.map_err(|e| {
            tracing::error!(error = %e, "LLM request failed");
            AssistantError::Llm(e)
        })?;

        if let Some(usage) = response.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "LLM token usage"
            );
        }

        if response.finish_reason == FinishReason::Length {
            tracing::warn!("LLM reply hit the token limit and may be truncated");
        }

        Ok(response.content)
    }
}
