//! The Event entity
//!
//! An event records one preservation action: what happened, when, with what
//! outcome, and which agents and objects were involved.

use crate::types::{EventType, Identifier, LinkingIdentifier, StringPlusAuthority};
use crate::utils::PremisDateTime;

/// A preservation action
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// The event's identifier, unique among events in the document
    pub identifier: Identifier,
    /// What kind of action took place
    pub kind: EventType,
    /// When the action took place
    pub datetime: PremisDateTime,
    /// Detail records about the action, in document order
    pub detail_information: Vec<EventDetailInformation>,
    /// Outcomes of the action, in document order
    pub outcome_information: Vec<EventOutcomeInformation>,
    /// Agents responsible for the action (weak references)
    pub linking_agent_identifiers: Vec<LinkingIdentifier>,
    /// Objects the action was performed on (weak references)
    pub linking_object_identifiers: Vec<LinkingIdentifier>,
}

impl Event {
    /// Create an event with only the required fields set
    pub fn new(identifier: Identifier, kind: EventType, datetime: PremisDateTime) -> Self {
        Self {
            identifier,
            kind,
            datetime,
            detail_information: Vec::new(),
            outcome_information: Vec::new(),
            linking_agent_identifiers: Vec::new(),
            linking_object_identifiers: Vec::new(),
        }
    }

    /// Add a free-text detail record
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail_information
            .push(EventDetailInformation::new(detail));
        self
    }

    /// Add an outcome
    pub fn with_outcome(mut self, outcome: EventOutcomeInformation) -> Self {
        self.outcome_information.push(outcome);
        self
    }
}

/// One detail record about an event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventDetailInformation {
    /// Free-text detail
    pub detail: Option<String>,
}

impl EventDetailInformation {
    /// Create a detail record from its text
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }
}

/// Outcome of an event, with an optional explanatory note
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventOutcomeInformation {
    /// The outcome term, e.g. "success"
    pub outcome: Option<StringPlusAuthority>,
    /// Free-text note expanding on the outcome
    pub detail_note: Option<String>,
}

impl EventOutcomeInformation {
    /// Create an outcome from its term
    pub fn new(outcome: impl Into<String>) -> Self {
        Self {
            outcome: Some(StringPlusAuthority::new(outcome)),
            detail_note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = Event::new(
            Identifier::new("UUID", "evt-1"),
            EventType::Ingestion,
            PremisDateTime::utc(2023, 6, 1, 12, 0, 0),
        )
        .with_detail("SIP accepted")
        .with_outcome(EventOutcomeInformation::new("success"));

        assert_eq!(event.identifier.value, "evt-1");
        assert_eq!(event.kind, EventType::Ingestion);
        assert_eq!(
            event.detail_information[0].detail.as_deref(),
            Some("SIP accepted")
        );
        assert_eq!(
            event.outcome_information[0].outcome.as_ref().unwrap().text,
            "success"
        );
    }
}
