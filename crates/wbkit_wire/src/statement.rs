//! Codec for statements, qualifiers and references.

use crate::error::{CodecError, CodecResult};
use crate::json::{expect_object, optional_array, optional_object, optional_str, require_str};
use crate::value::{decode_snak, encode_snak};
use serde_json::{Map, Value};
use wbkit_datamodel::{EntityId, Rank, Reference, Snak, SnakGroup, Statement};

/// Encodes ordered snak groups as a property-keyed object.
fn encode_snak_groups(groups: &[SnakGroup]) -> CodecResult<Value> {
    let mut map = Map::new();
    for group in groups {
        let property = group.property().id().ok_or_else(|| {
            CodecError::invalid_structure("a snak group property id must not be a placeholder")
        })?;
        let snaks: CodecResult<Vec<Value>> = group.snaks().iter().map(encode_snak).collect();
        map.insert(property.to_owned(), Value::Array(snaks?));
    }
    Ok(Value::Object(map))
}

/// Decodes a property-keyed object of snak lists, preserving key order.
fn decode_snak_groups(map: &Map<String, Value>, site_iri: &str) -> CodecResult<Vec<SnakGroup>> {
    let mut groups = Vec::with_capacity(map.len());
    for (property, snaks) in map {
        let property = EntityId::parse(property, site_iri)?;
        let snaks = snaks.as_array().ok_or_else(|| {
            CodecError::invalid_structure("snak group must be a JSON array")
        })?;
        let snaks: CodecResult<Vec<Snak>> =
            snaks.iter().map(|s| decode_snak(s, site_iri)).collect();
        groups.push(SnakGroup::new(property, snaks?));
    }
    Ok(groups)
}

/// Encodes a statement to its wire shape.
///
/// The `id` key is omitted for drafts; empty qualifier and reference
/// collections are omitted entirely.
pub fn encode_statement(statement: &Statement) -> CodecResult<Value> {
    let mut map = Map::new();
    if let Some(id) = statement.id() {
        map.insert("id".into(), Value::String(id.to_owned()));
    }
    map.insert(
        "rank".into(),
        Value::String(statement.rank().wire_name().into()),
    );
    map.insert("mainsnak".into(), encode_snak(statement.mainsnak())?);
    if !statement.qualifiers().is_empty() {
        map.insert(
            "qualifiers".into(),
            encode_snak_groups(statement.qualifiers())?,
        );
    }
    if !statement.references().is_empty() {
        let references: CodecResult<Vec<Value>> = statement
            .references()
            .iter()
            .map(|reference| {
                let mut entry = Map::new();
                entry.insert("snaks".into(), encode_snak_groups(reference.snak_groups())?);
                Ok(Value::Object(entry))
            })
            .collect();
        map.insert("references".into(), Value::Array(references?));
    }
    map.insert("type".into(), Value::String("statement".into()));
    Ok(Value::Object(map))
}

/// Decodes a statement from its wire shape.
///
/// The owning subject is not part of the statement's wire shape and
/// must be supplied by the caller (usually the enclosing document).
pub fn decode_statement(
    json: &Value,
    subject: &EntityId,
    site_iri: &str,
) -> CodecResult<Statement> {
    let map = expect_object(json, "statement")?;
    if let Some(tag) = optional_str(map, "type") {
        if tag != "statement" {
            return Err(CodecError::unsupported_wire_type(tag));
        }
    }

    let mainsnak = map
        .get("mainsnak")
        .ok_or_else(|| CodecError::invalid_structure("statement requires \"mainsnak\""))?;
    let mainsnak = decode_snak(mainsnak, site_iri)?;

    let rank_name = require_str(map, "rank", "statement")?;
    let rank = Rank::from_wire_name(rank_name)
        .ok_or_else(|| CodecError::unsupported_wire_type(rank_name))?;

    let qualifiers = match optional_object(map, "qualifiers") {
        Some(qualifiers) => decode_snak_groups(qualifiers, site_iri)?,
        None => Vec::new(),
    };

    let mut references = Vec::new();
    for entry in optional_array(map, "references") {
        let entry = expect_object(entry, "reference")?;
        let snaks = match optional_object(entry, "snaks") {
            Some(snaks) => decode_snak_groups(snaks, site_iri)?,
            None => Vec::new(),
        };
        references.push(Reference::new(snaks));
    }

    let mut statement = Statement::draft(subject.clone(), mainsnak)
        .with_rank(rank)
        .with_qualifiers(qualifiers)
        .with_references(references);
    if let Some(id) = optional_str(map, "id") {
        statement = statement.with_id(id);
    }
    Ok(statement)
}
