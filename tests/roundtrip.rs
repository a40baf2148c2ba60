//! Tests for serializing PREMIS documents
//!
//! These verify that the codec is bidirectional: parsing a serialized
//! document restores the same model, and serializing is stable.

use pretty_assertions::assert_eq;
use premiskit::{
    Agent, AgentType, Event, EventType, Identifier, LinkingIdentifier, Object, ObjectCategory,
    Premis, PremisDateTime, Rights, RightsBasis, RightsStatement,
};

fn built_document() -> Premis {
    let mut premis = Premis::new();

    premis.push_object(Object::new(
        Identifier::new("UUID", "file-1"),
        ObjectCategory::File,
    ));

    let mut event = Event::new(
        Identifier::new("UUID", "evt-1"),
        EventType::FixityCheck,
        PremisDateTime::utc(2024, 3, 1, 12, 0, 0),
    )
    .with_detail("scheduled check");
    event.linking_agent_identifiers.push(LinkingIdentifier::with_role(
        "UUID",
        "agent-1",
        "executing program",
    ));
    event
        .linking_object_identifiers
        .push(LinkingIdentifier::new("UUID", "file-1"));
    premis.push_event(event);

    premis.push_agent(Agent::new(
        Identifier::new("UUID", "agent-1"),
        "fixity-daemon",
        AgentType::Software,
    ));

    premis.push_rights(Rights::new(RightsStatement::new(
        Identifier::new("UUID", "rights-1"),
        RightsBasis::Copyright,
    )));

    premis
}

#[test]
fn built_document_survives_a_round_trip() {
    let original = built_document();
    let xml = original.serialize().unwrap();
    let reparsed = xml.parse::<Premis>().unwrap();

    assert_eq!(original.objects(), reparsed.objects());
    assert_eq!(original.events(), reparsed.events());
    assert_eq!(original.agents(), reparsed.agents());
    assert_eq!(original.rights(), reparsed.rights());
}

#[test]
fn serialization_is_idempotent() {
    let first = built_document().serialize().unwrap();
    let reparsed = first.parse::<Premis>().unwrap();
    let second = reparsed.serialize().unwrap();
    assert_eq!(first, second);
}

#[test]
fn vocabulary_terms_round_trip_literally() {
    let xml = built_document().serialize().unwrap();
    assert!(xml.contains("<premis:eventType>fixity check</premis:eventType>"));
    assert!(xml.contains("<premis:agentType>software</premis:agentType>"));
    assert!(xml.contains("<premis:rightsBasis>copyright</premis:rightsBasis>"));
    assert!(xml.contains(r#"xsi:type="premis:file""#));
}

#[test]
fn event_detail_is_wrapped_in_its_information_element() {
    let xml = built_document().serialize().unwrap();
    assert!(xml.contains("<premis:eventDetailInformation>"));
    assert!(xml.contains("<premis:eventDetail>scheduled check</premis:eventDetail>"));

    let reparsed = xml.parse::<Premis>().unwrap();
    assert_eq!(
        reparsed.events()[0].detail_information[0].detail.as_deref(),
        Some("scheduled check")
    );
}

#[test]
fn special_characters_survive_a_round_trip() {
    let mut premis = Premis::new();
    premis.push_agent(Agent::new(
        Identifier::new("UUID", "agent-1"),
        "a & b <tool> \"quoted\"",
        AgentType::Software,
    ));
    let xml = premis.serialize().unwrap();
    let reparsed = xml.parse::<Premis>().unwrap();
    assert_eq!(reparsed.agents()[0].name.text, "a & b <tool> \"quoted\"");
    assert_eq!(premis.agents(), reparsed.agents());
}

#[test]
fn linking_roles_round_trip() {
    let xml = built_document().serialize().unwrap();
    let reparsed = xml.parse::<Premis>().unwrap();
    let link = &reparsed.events()[0].linking_agent_identifiers[0];
    assert_eq!(link.identifier.value, "agent-1");
    assert_eq!(link.roles[0].text, "executing program");
}

#[test]
fn declared_prefixes_are_reused() {
    let xml = r#"<p:premis xmlns:p="http://www.loc.gov/premis/v3"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" version="3.0">
      <p:object xsi:type="p:file">
        <p:objectIdentifier>
          <p:objectIdentifierType>UUID</p:objectIdentifierType>
          <p:objectIdentifierValue>abc-123</p:objectIdentifierValue>
        </p:objectIdentifier>
      </p:object>
    </p:premis>"#;

    let premis = xml.parse::<Premis>().unwrap();
    let out = premis.serialize().unwrap();
    assert!(out.contains("<p:premis"));
    assert!(out.contains(r#"xmlns:p="http://www.loc.gov/premis/v3""#));
    assert!(out.contains(r#"xsi:type="p:file""#));

    // The re-serialized form parses back to the same model.
    let reparsed = out.parse::<Premis>().unwrap();
    assert_eq!(premis.objects(), reparsed.objects());
}

#[test]
fn parsed_document_round_trips_with_full_content() {
    let xml = r#"<premis:premis xmlns:premis="http://www.loc.gov/premis/v3"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" version="3.0">
      <premis:object xsi:type="premis:file">
        <premis:objectIdentifier simpleLink="https://archive.example.org/file-1">
          <premis:objectIdentifierType>UUID</premis:objectIdentifierType>
          <premis:objectIdentifierValue>file-1</premis:objectIdentifierValue>
        </premis:objectIdentifier>
        <premis:significantProperties>
          <premis:significantPropertiesType>content</premis:significantPropertiesType>
          <premis:significantPropertiesValue>all pages</premis:significantPropertiesValue>
        </premis:significantProperties>
        <premis:objectCharacteristics>
          <premis:fixity>
            <premis:messageDigestAlgorithm authority="cryptographicHashFunctions" authorityURI="http://id.loc.gov/vocabulary/preservation/cryptographicHashFunctions">SHA-256</premis:messageDigestAlgorithm>
            <premis:messageDigest>deadbeef</premis:messageDigest>
          </premis:fixity>
          <premis:size>2048</premis:size>
          <premis:format>
            <premis:formatDesignation>
              <premis:formatName>PDF/A-1b</premis:formatName>
            </premis:formatDesignation>
          </premis:format>
        </premis:objectCharacteristics>
        <premis:originalName simpleLink="https://archive.example.org/report.pdf">report.pdf</premis:originalName>
      </premis:object>
    </premis:premis>"#;

    let premis = xml.parse::<Premis>().unwrap();
    let reparsed = premis.serialize().unwrap().parse::<Premis>().unwrap();
    assert_eq!(premis.objects(), reparsed.objects());

    let object = &reparsed.objects()[0];
    let characteristics = object.characteristics.as_ref().unwrap();
    assert_eq!(
        characteristics.fixity[0].algorithm.authority_uri.as_deref(),
        Some("http://id.loc.gov/vocabulary/preservation/cryptographicHashFunctions")
    );
    assert_eq!(
        object.identifier.simple_link.as_deref(),
        Some("https://archive.example.org/file-1")
    );
    assert_eq!(
        object.significant_properties[0].value.as_deref(),
        Some("all pages")
    );
    assert_eq!(
        object.original_name.as_ref().unwrap().simple_link.as_deref(),
        Some("https://archive.example.org/report.pdf")
    );
}

#[test]
fn datetime_is_emitted_canonically() {
    let xml = built_document().serialize().unwrap();
    assert!(xml.contains("<premis:eventDateTime>2024-03-01T12:00:00Z</premis:eventDateTime>"));
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::built_document;
    use premiskit::Premis;

    #[test]
    fn document_survives_a_json_round_trip() {
        let original = built_document();
        let json = serde_json::to_string(&original).unwrap();
        let restored: Premis = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
