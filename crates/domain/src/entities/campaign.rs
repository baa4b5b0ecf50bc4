//! Campaign entity - a user's worldbuilding project
//!
//! A campaign is the unit of ownership: characters, relationships and lore
//! entries all hang off one, and access to them is decided by who owns it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require_text, DomainError};
use crate::ids::{CampaignId, UserId};

/// A stored campaign row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    /// Identity-provider subject of the creator
    pub user_id: UserId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}

/// Insert payload for a campaign. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCampaign {
    pub user_id: UserId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewCampaign {
    pub fn new(user_id: UserId, title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        require_text("title", &title)?;
        Ok(Self {
            user_id,
            title,
            description: None,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Partial update for a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CampaignPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation(
                "update must set at least one of: title, description",
            ));
        }
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        Ok(())
    }
}
