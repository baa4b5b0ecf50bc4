//! Lore entry entity - a piece of written world knowledge in a campaign

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::deserialize_embedding;
use crate::error::{require_text, DomainError};
use crate::ids::{CampaignId, LoreEntryId};

/// A stored lore entry row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreEntry {
    pub id: LoreEntryId,
    pub campaign_id: CampaignId,
    pub title: String,
    /// Free text such as "history", "religion", "geography"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub content: String,
    /// Reserved for semantic search; never written by this service.
    #[serde(default, deserialize_with = "deserialize_embedding", skip_serializing)]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a lore entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLoreEntry {
    pub campaign_id: CampaignId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub content: String,
}

impl NewLoreEntry {
    pub fn new(
        campaign_id: CampaignId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let content = content.into();
        require_text("title", &title)?;
        require_text("content", &content)?;
        Ok(Self {
            campaign_id,
            title,
            category: None,
            content,
        })
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }
}

/// Partial update for a lore entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoreEntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl LoreEntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.content.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation(
                "update must set at least one of: title, category, content",
            ));
        }
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(content) = &self.content {
            require_text("content", content)?;
        }
        Ok(())
    }
}
