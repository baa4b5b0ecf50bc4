//! Character entity - a person (or creature) in a campaign
//!
//! `attributes` is an open JSON object. The service never interprets it;
//! clients use it for stat blocks, traits, whatever the table needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{deserialize_embedding, null_as_default};
use crate::error::{require_text, DomainError};
use crate::ids::{CampaignId, CharacterId};

/// Free-form character attributes.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A stored character row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub campaign_id: CampaignId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Reserved for semantic search; never written by this service.
    #[serde(default, deserialize_with = "deserialize_embedding", skip_serializing)]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCharacter {
    pub campaign_id: CampaignId,
    pub name: String,
    pub role: String,
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl NewCharacter {
    pub fn new(campaign_id: CampaignId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        require_text("name", &name)?;
        Ok(Self {
            campaign_id,
            name,
            role: String::new(),
            attributes: Attributes::new(),
            background: None,
        })
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_background(mut self, background: Option<String>) -> Self {
        self.background = background;
        self
    }
}

/// Partial update for a character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl CharacterPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.attributes.is_none()
            && self.background.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation(
                "update must set at least one of: name, role, attributes, background",
            ));
        }
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        Ok(())
    }
}
