//! Entities owned (directly or through a campaign) by a user.
//!
//! Each entity comes with the payload used to insert it and the patch used
//! to partially update it. Patches only carry the fields a client may
//! change; anything left `None` is not sent to the store.

mod campaign;
mod character;
mod lore_entry;
mod relationship;

pub use campaign::{Campaign, CampaignPatch, NewCampaign};
pub use character::{Attributes, Character, CharacterPatch, NewCharacter};
pub use lore_entry::{LoreEntry, LoreEntryPatch, NewLoreEntry};
pub use relationship::{NewRelationship, Relationship, RelationshipPatch};
