//! Management use cases for CRUD-style operations.
//!
//! Every operation takes the authenticated caller and decides access
//! through the campaign that owns the target. Campaigns themselves are
//! only ever visible to their owner, so a foreign campaign looks missing.
//! Child entities report a foreign parent as forbidden.

mod campaign;
mod character;
mod lore_entry;
mod ownership;
mod relationship;

pub use campaign::{CampaignCrud, CreateCampaignInput};
pub use character::{CharacterCrud, CreateCharacterInput};
pub use lore_entry::{CreateLoreEntryInput, LoreEntryCrud};
pub use ownership::OwnershipGuard;
pub use relationship::{CreateRelationshipInput, RelationshipCrud};

use lorekeeper_domain::DomainError;

use crate::infrastructure::ports::RepoError;

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for ManagementError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::InvalidInput(msg),
        }
    }
}

/// Unwrap a required create field.
fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ManagementError> {
    value.ok_or_else(|| ManagementError::InvalidInput(format!("{field} is required")))
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub campaign: CampaignCrud,
    pub character: CharacterCrud,
    pub relationship: RelationshipCrud,
    pub lore_entry: LoreEntryCrud,
}

impl ManagementUseCases {
    pub fn new(
        campaign: CampaignCrud,
        character: CharacterCrud,
        relationship: RelationshipCrud,
        lore_entry: LoreEntryCrud,
    ) -> Self {
        Self {
            campaign,
            character,
            relationship,
            lore_entry,
        }
    }
}
