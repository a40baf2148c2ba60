//! The Agent entity

use crate::types::{AgentType, Identifier, StringPlusAuthority};

/// A person, organization, or software responsible for events
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    /// The agent's identifier, unique among agents in the document
    pub identifier: Identifier,
    /// The agent's name
    pub name: StringPlusAuthority,
    /// What kind of agent this is
    pub kind: AgentType,
}

impl Agent {
    /// Create an agent
    pub fn new(identifier: Identifier, name: impl Into<String>, kind: AgentType) -> Self {
        Self {
            identifier,
            name: StringPlusAuthority::new(name),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent() {
        let agent = Agent::new(
            Identifier::new("UUID", "agent-1"),
            "ingest-service",
            AgentType::Software,
        );
        assert_eq!(agent.name.text, "ingest-service");
        assert_eq!(agent.kind, AgentType::Software);
    }
}
