//! Relationship entity - a directed link between two characters of a campaign

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require_text, DomainError};
use crate::ids::{CampaignId, CharacterId, RelationshipId};

/// A stored relationship row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub campaign_id: CampaignId,
    pub source_character_id: CharacterId,
    pub target_character_id: CharacterId,
    /// Free text such as "rival", "mentor", "sibling"
    pub relation_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRelationship {
    pub campaign_id: CampaignId,
    pub source_character_id: CharacterId,
    pub target_character_id: CharacterId,
    pub relation_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewRelationship {
    pub fn new(
        campaign_id: CampaignId,
        source_character_id: CharacterId,
        target_character_id: CharacterId,
        relation_type: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let relation_type = relation_type.into();
        require_text("relation_type", &relation_type)?;
        Ok(Self {
            campaign_id,
            source_character_id,
            target_character_id,
            relation_type,
            description: None,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Partial update for a relationship. Endpoints are fixed once created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RelationshipPatch {
    pub fn is_empty(&self) -> bool {
        self.relation_type.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation(
                "update must set at least one of: relation_type, description",
            ));
        }
        if let Some(relation_type) = &self.relation_type {
            require_text("relation_type", relation_type)?;
        }
        Ok(())
    }
}
