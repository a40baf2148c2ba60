//! Closed controlled vocabularies
//!
//! PREMIS restricts several semantic units to Library of Congress
//! vocabularies. The codec rejects any term outside these sets, reporting
//! the offending literal and the accepted terms. Each enum maps one-to-one
//! onto the vocabulary's literal terms.

use std::fmt;

/// Common interface over the closed vocabularies, used by the codec
pub trait Vocabulary: Sized + Copy {
    /// All accepted vocabulary terms, in declaration order
    const ACCEPTED: &'static [&'static str];

    /// Look up a vocabulary term, `None` when outside the set
    fn from_term(term: &str) -> Option<Self>;

    /// The vocabulary term for this value
    fn as_term(&self) -> &'static str;
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $term:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// All accepted vocabulary terms, in declaration order
            pub const ACCEPTED: &'static [&'static str] = &[$($term),+];

            /// The vocabulary term for this value
            pub fn as_term(&self) -> &'static str {
                match self {
                    $(Self::$variant => $term,)+
                }
            }

            /// Look up a vocabulary term, `None` when outside the set
            pub fn from_term(term: &str) -> Option<Self> {
                match term {
                    $($term => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Vocabulary for $name {
            const ACCEPTED: &'static [&'static str] = &[$($term),+];

            fn from_term(term: &str) -> Option<Self> {
                match term {
                    $($term => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn as_term(&self) -> &'static str {
                match self {
                    $(Self::$variant => $term,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_term())
            }
        }
    };
}

vocabulary! {
    /// Object category (bound to xsi:type on the object element)
    ObjectCategory {
        /// A conceptual work, e.g. one archival item
        IntellectualEntity => "intellectualEntity",
        /// One rendition of an intellectual entity
        Representation => "representation",
        /// A named, stored sequence of bytes
        File => "file",
        /// Contiguous data within a file that needs its own description
        Bitstream => "bitstream",
    }
}

vocabulary! {
    /// Preservation event types (LOC eventType vocabulary)
    EventType {
        /// Content acquired from outside the repository
        Capture => "capture",
        /// Lossless size reduction
        Compression => "compression",
        /// A new object came into existence
        Creation => "creation",
        /// Formal removal from repository custody
        Deaccession => "deaccession",
        /// Reversal of a compression event
        Decompression => "decompression",
        /// Reversal of an encryption event
        Decryption => "decryption",
        /// Object content destroyed
        Deletion => "deletion",
        /// Digest comparison against a stored digest
        FixityCheck => "fixity check",
        /// Content formally accepted into the repository
        Ingestion => "ingestion",
        /// Digest computed for later fixity checking
        MessageDigestCalculation => "message digest calculation",
        /// Transformation to a successor format
        Migration => "migration",
        /// Transformation to a preservation-friendly format at ingest
        Normalization => "normalization",
        /// Copy created on other media or storage
        Replication => "replication",
        /// Object checked against its format specification
        Validation => "validation",
        /// Scan for malicious content
        VirusCheck => "virus check",
    }
}

vocabulary! {
    /// Agent types (LOC agentType vocabulary)
    AgentType {
        /// A natural person
        Person => "person",
        /// An organization or organizational unit
        Organization => "organization",
        /// A software application or service
        Software => "software",
        /// A hardware device
        Hardware => "hardware",
    }
}

vocabulary! {
    /// Basis of a rights statement (LOC rightsBasis vocabulary)
    RightsBasis {
        /// Rights granted by copyright law
        Copyright => "copyright",
        /// Rights granted by a license agreement
        License => "license",
        /// Rights granted by statute
        Statute => "statute",
        /// Rights granted by institutional policy
        Policy => "policy",
        /// Any other basis
        Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_round_trip() {
        for term in EventType::ACCEPTED {
            let parsed = EventType::from_term(term).unwrap();
            assert_eq!(parsed.as_term(), *term);
        }
        for term in ObjectCategory::ACCEPTED {
            let parsed = ObjectCategory::from_term(term).unwrap();
            assert_eq!(parsed.as_term(), *term);
        }
    }

    #[test]
    fn test_unknown_term_is_rejected() {
        assert_eq!(EventType::from_term("teleportation"), None);
        assert_eq!(ObjectCategory::from_term("folder"), None);
        assert_eq!(AgentType::from_term("robot"), None);
        assert_eq!(RightsBasis::from_term("handshake"), None);
    }

    #[test]
    fn test_multi_word_terms() {
        assert_eq!(EventType::FixityCheck.as_term(), "fixity check");
        assert_eq!(
            EventType::from_term("message digest calculation"),
            Some(EventType::MessageDigestCalculation)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ObjectCategory::File.to_string(), "file");
        assert_eq!(AgentType::Software.to_string(), "software");
    }
}
