//! PREMIS element models
//!
//! One immutable value type per PREMIS entity, composed of the primitives in
//! [`crate::types`]. Models never validate raw input themselves; they are
//! constructed either from already-validated values by a caller, or by the
//! codec after it has enforced the schema mapping.

pub mod agent;
pub mod event;
pub mod object;
pub mod rights;

pub use agent::Agent;
pub use event::{Event, EventDetailInformation, EventOutcomeInformation};
pub use object::{
    ContentLocation, Fixity, Format, FormatDesignation, FormatRegistry, Object,
    ObjectCharacteristics, OriginalName, Relationship, SignificantProperties, Storage,
};
pub use rights::{Rights, RightsStatement};
