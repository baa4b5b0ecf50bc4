//! Lore Keeper domain types.
//!
//! Pure data: ids, entities with their insert/patch payloads, and the
//! validation rules that do not need a database round trip.

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{
    Attributes, Campaign, CampaignPatch, Character, CharacterPatch, LoreEntry, LoreEntryPatch,
    NewCampaign, NewCharacter, NewLoreEntry, NewRelationship, Relationship, RelationshipPatch,
};

pub use error::DomainError;

pub use ids::{CampaignId, CharacterId, LoreEntryId, RelationshipId, UserId};
