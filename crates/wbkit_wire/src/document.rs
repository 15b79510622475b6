//! Codec for entity documents and their term/alias/claims sections.

use crate::error::{CodecError, CodecResult};
use crate::json::{expect_object, optional_array, optional_object, optional_str, optional_u64, require_str};
use crate::statement::{decode_statement, encode_statement};
use serde_json::{json, Map, Value};
use wbkit_datamodel::{
    AliasMap, EntityDocument, EntityId, EntityType, FormDocument, ItemDocument, LexemeDocument,
    MediaInfoDocument, PropertyDocument, SenseDocument, Statement, StatementGroup, Term, TermMap,
};

/// Encodes a term map as a language-keyed object, in insertion order.
pub fn encode_term_map(terms: &TermMap) -> Value {
    let mut map = Map::new();
    for term in terms.iter() {
        map.insert(
            term.language().to_owned(),
            json!({ "language": term.language(), "value": term.text() }),
        );
    }
    Value::Object(map)
}

/// Decodes a language-keyed term object; a missing section is empty.
pub fn decode_term_map(section: Option<&Map<String, Value>>) -> CodecResult<TermMap> {
    let mut terms = TermMap::new();
    let Some(section) = section else {
        return Ok(terms);
    };
    for entry in section.values() {
        let entry = expect_object(entry, "term")?;
        let language = require_str(entry, "language", "term")?;
        let text = require_str(entry, "value", "term")?;
        terms.insert(Term::new(language, text));
    }
    Ok(terms)
}

/// Encodes an alias map as a language-keyed object of term lists.
pub fn encode_alias_map(aliases: &AliasMap) -> Value {
    let mut map = Map::new();
    for (language, texts) in aliases.iter() {
        let entries: Vec<Value> = texts
            .iter()
            .map(|text| json!({ "language": language, "value": text }))
            .collect();
        map.insert(language.to_owned(), Value::Array(entries));
    }
    Value::Object(map)
}

/// Decodes a language-keyed alias object; a missing section is empty.
pub fn decode_alias_map(section: Option<&Map<String, Value>>) -> CodecResult<AliasMap> {
    let mut aliases = AliasMap::new();
    let Some(section) = section else {
        return Ok(aliases);
    };
    for (language, entries) in section {
        let entries = entries.as_array().ok_or_else(|| {
            CodecError::invalid_structure("alias list must be a JSON array")
        })?;
        let mut texts = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry = expect_object(entry, "alias")?;
            texts.push(require_str(entry, "value", "alias")?.to_owned());
        }
        aliases.set(language.clone(), texts);
    }
    Ok(aliases)
}

/// Encodes statement groups as the `claims` object.
pub fn encode_claims(groups: &[StatementGroup]) -> CodecResult<Value> {
    let mut map = Map::new();
    for group in groups {
        let property = group.property().id().ok_or_else(|| {
            CodecError::invalid_structure("a claims property id must not be a placeholder")
        })?;
        let statements: CodecResult<Vec<Value>> =
            group.statements().iter().map(encode_statement).collect();
        map.insert(property.to_owned(), Value::Array(statements?));
    }
    Ok(Value::Object(map))
}

/// Decodes the `claims` object into a flat statement list, preserving
/// property and statement order.
pub fn decode_claims(
    section: Option<&Map<String, Value>>,
    subject: &EntityId,
    site_iri: &str,
) -> CodecResult<Vec<Statement>> {
    let mut statements = Vec::new();
    let Some(section) = section else {
        return Ok(statements);
    };
    for entries in section.values() {
        let entries = entries.as_array().ok_or_else(|| {
            CodecError::invalid_structure("claims entry must be a JSON array")
        })?;
        for entry in entries {
            statements.push(decode_statement(entry, subject, site_iri)?);
        }
    }
    Ok(statements)
}

fn encode_id(map: &mut Map<String, Value>, id: &EntityId) {
    if let Some(id) = id.id() {
        map.insert("id".into(), Value::String(id.to_owned()));
    }
}

fn decode_id(
    map: &Map<String, Value>,
    entity_type: EntityType,
    site_iri: &str,
) -> CodecResult<EntityId> {
    match optional_str(map, "id") {
        Some(id) => Ok(EntityId::from_parts(entity_type, id, site_iri)?),
        None => Ok(EntityId::placeholder(entity_type, site_iri)),
    }
}

/// Encodes any entity document to its wire shape.
pub fn encode_entity_document(document: &EntityDocument) -> CodecResult<Value> {
    match document {
        EntityDocument::Item(doc) => encode_item(doc),
        EntityDocument::Property(doc) => encode_property(doc),
        EntityDocument::Lexeme(doc) => encode_lexeme(doc),
        EntityDocument::Form(doc) => encode_form(doc),
        EntityDocument::Sense(doc) => encode_sense(doc),
        EntityDocument::MediaInfo(doc) => encode_media_info(doc),
    }
}

/// Decodes any entity document, dispatching on the `type` tag.
pub fn decode_entity_document(json: &Value, site_iri: &str) -> CodecResult<EntityDocument> {
    let map = expect_object(json, "entity document")?;
    let tag = require_str(map, "type", "entity document")?;
    match tag {
        "item" => Ok(EntityDocument::Item(decode_item(map, site_iri)?)),
        "property" => Ok(EntityDocument::Property(decode_property(map, site_iri)?)),
        "lexeme" => Ok(EntityDocument::Lexeme(decode_lexeme(map, site_iri)?)),
        "form" => Ok(EntityDocument::Form(decode_form(map, site_iri)?)),
        "sense" => Ok(EntityDocument::Sense(decode_sense(map, site_iri)?)),
        "mediainfo" => Ok(EntityDocument::MediaInfo(decode_media_info(map, site_iri)?)),
        other => Err(CodecError::unsupported_wire_type(other)),
    }
}

fn encode_item(doc: &ItemDocument) -> CodecResult<Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::String("item".into()));
    encode_id(&mut map, doc.id());
    map.insert("labels".into(), encode_term_map(doc.labels()));
    map.insert("descriptions".into(), encode_term_map(doc.descriptions()));
    map.insert("aliases".into(), encode_alias_map(doc.aliases()));
    map.insert("claims".into(), encode_claims(doc.statement_groups())?);
    if doc.revision_id() != 0 {
        map.insert("lastrevid".into(), Value::from(doc.revision_id()));
    }
    Ok(Value::Object(map))
}

fn decode_item(map: &Map<String, Value>, site_iri: &str) -> CodecResult<ItemDocument> {
    let id = decode_id(map, EntityType::Item, site_iri)?;
    let labels = decode_term_map(optional_object(map, "labels"))?;
    let descriptions = decode_term_map(optional_object(map, "descriptions"))?;
    let aliases = decode_alias_map(optional_object(map, "aliases"))?;
    let statements = decode_claims(optional_object(map, "claims"), &id, site_iri)?;
    let revision_id = optional_u64(map, "lastrevid").unwrap_or(0);
    Ok(ItemDocument::new(
        id,
        labels,
        descriptions,
        aliases,
        statements,
        revision_id,
    )?)
}

fn encode_property(doc: &PropertyDocument) -> CodecResult<Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::String("property".into()));
    encode_id(&mut map, doc.id());
    map.insert("datatype".into(), Value::String(doc.datatype().into()));
    map.insert("labels".into(), encode_term_map(doc.labels()));
    map.insert("descriptions".into(), encode_term_map(doc.descriptions()));
    map.insert("aliases".into(), encode_alias_map(doc.aliases()));
    map.insert("claims".into(), encode_claims(doc.statement_groups())?);
    if doc.revision_id() != 0 {
        map.insert("lastrevid".into(), Value::from(doc.revision_id()));
    }
    Ok(Value::Object(map))
}

fn decode_property(map: &Map<String, Value>, site_iri: &str) -> CodecResult<PropertyDocument> {
    let id = decode_id(map, EntityType::Property, site_iri)?;
    let datatype = require_str(map, "datatype", "property document")?;
    let labels = decode_term_map(optional_object(map, "labels"))?;
    let descriptions = decode_term_map(optional_object(map, "descriptions"))?;
    let aliases = decode_alias_map(optional_object(map, "aliases"))?;
    let statements = decode_claims(optional_object(map, "claims"), &id, site_iri)?;
    let revision_id = optional_u64(map, "lastrevid").unwrap_or(0);
    Ok(PropertyDocument::new(
        id,
        labels,
        descriptions,
        aliases,
        datatype,
        statements,
        revision_id,
    )?)
}

fn encode_form(doc: &FormDocument) -> CodecResult<Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::String("form".into()));
    encode_id(&mut map, doc.id());
    map.insert(
        "representations".into(),
        encode_term_map(doc.representations()),
    );
    let features: CodecResult<Vec<Value>> = doc
        .grammatical_features()
        .iter()
        .map(|feature| {
            feature
                .id()
                .map(|id| Value::String(id.to_owned()))
                .ok_or_else(|| {
                    CodecError::invalid_structure(
                        "a grammatical feature id must not be a placeholder",
                    )
                })
        })
        .collect();
    map.insert("grammaticalFeatures".into(), Value::Array(features?));
    map.insert("claims".into(), encode_claims(doc.statement_groups())?);
    if doc.revision_id() != 0 {
        map.insert("lastrevid".into(), Value::from(doc.revision_id()));
    }
    Ok(Value::Object(map))
}

fn decode_form(map: &Map<String, Value>, site_iri: &str) -> CodecResult<FormDocument> {
    let id = decode_id(map, EntityType::Form, site_iri)?;
    let representations = decode_term_map(optional_object(map, "representations"))?;
    let mut features = Vec::new();
    for feature in optional_array(map, "grammaticalFeatures") {
        let feature = feature.as_str().ok_or_else(|| {
            CodecError::invalid_structure("grammatical features must be id strings")
        })?;
        features.push(EntityId::parse(feature, site_iri)?);
    }
    let statements = decode_claims(optional_object(map, "claims"), &id, site_iri)?;
    let revision_id = optional_u64(map, "lastrevid").unwrap_or(0);
    Ok(FormDocument::new(
        id,
        representations,
        features,
        statements,
        revision_id,
    )?)
}

fn encode_sense(doc: &SenseDocument) -> CodecResult<Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::String("sense".into()));
    encode_id(&mut map, doc.id());
    map.insert("glosses".into(), encode_term_map(doc.glosses()));
    map.insert("claims".into(), encode_claims(doc.statement_groups())?);
    if doc.revision_id() != 0 {
        map.insert("lastrevid".into(), Value::from(doc.revision_id()));
    }
    Ok(Value::Object(map))
}

fn decode_sense(map: &Map<String, Value>, site_iri: &str) -> CodecResult<SenseDocument> {
    let id = decode_id(map, EntityType::Sense, site_iri)?;
    let glosses = decode_term_map(optional_object(map, "glosses"))?;
    let statements = decode_claims(optional_object(map, "claims"), &id, site_iri)?;
    let revision_id = optional_u64(map, "lastrevid").unwrap_or(0);
    Ok(SenseDocument::new(id, glosses, statements, revision_id)?)
}

fn encode_lexeme(doc: &LexemeDocument) -> CodecResult<Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::String("lexeme".into()));
    encode_id(&mut map, doc.id());
    map.insert("lemmas".into(), encode_term_map(doc.lemmas()));
    let category = doc.lexical_category().id().ok_or_else(|| {
        CodecError::invalid_structure("a lexical category id must not be a placeholder")
    })?;
    let language = doc.language().id().ok_or_else(|| {
        CodecError::invalid_structure("a lexeme language id must not be a placeholder")
    })?;
    map.insert("lexicalCategory".into(), Value::String(category.into()));
    map.insert("language".into(), Value::String(language.into()));
    map.insert("claims".into(), encode_claims(doc.statement_groups())?);
    let forms: CodecResult<Vec<Value>> = doc.forms().iter().map(encode_form).collect();
    map.insert("forms".into(), Value::Array(forms?));
    let senses: CodecResult<Vec<Value>> = doc.senses().iter().map(encode_sense).collect();
    map.insert("senses".into(), Value::Array(senses?));
    if doc.revision_id() != 0 {
        map.insert("lastrevid".into(), Value::from(doc.revision_id()));
    }
    Ok(Value::Object(map))
}

fn decode_lexeme(map: &Map<String, Value>, site_iri: &str) -> CodecResult<LexemeDocument> {
    let id = decode_id(map, EntityType::Lexeme, site_iri)?;
    let lemmas = decode_term_map(optional_object(map, "lemmas"))?;
    let category = require_str(map, "lexicalCategory", "lexeme document")?;
    let category = EntityId::parse(category, site_iri)?;
    let language = require_str(map, "language", "lexeme document")?;
    let language = EntityId::parse(language, site_iri)?;
    let statements = decode_claims(optional_object(map, "claims"), &id, site_iri)?;

    let mut forms = Vec::new();
    for form in optional_array(map, "forms") {
        forms.push(decode_form(expect_object(form, "form document")?, site_iri)?);
    }
    let mut senses = Vec::new();
    for sense in optional_array(map, "senses") {
        senses.push(decode_sense(expect_object(sense, "sense document")?, site_iri)?);
    }

    let revision_id = optional_u64(map, "lastrevid").unwrap_or(0);
    Ok(LexemeDocument::new(
        id,
        lemmas,
        category,
        language,
        statements,
        forms,
        senses,
        revision_id,
    )?)
}

fn encode_media_info(doc: &MediaInfoDocument) -> CodecResult<Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::String("mediainfo".into()));
    encode_id(&mut map, doc.id());
    map.insert("labels".into(), encode_term_map(doc.labels()));
    map.insert("claims".into(), encode_claims(doc.statement_groups())?);
    if doc.revision_id() != 0 {
        map.insert("lastrevid".into(), Value::from(doc.revision_id()));
    }
    Ok(Value::Object(map))
}

fn decode_media_info(map: &Map<String, Value>, site_iri: &str) -> CodecResult<MediaInfoDocument> {
    let id = decode_id(map, EntityType::MediaInfo, site_iri)?;
    let labels = decode_term_map(optional_object(map, "labels"))?;
    let statements = decode_claims(optional_object(map, "claims"), &id, site_iri)?;
    let revision_id = optional_u64(map, "lastrevid").unwrap_or(0);
    Ok(MediaInfoDocument::new(id, labels, statements, revision_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wbkit_datamodel::{DataValue, Snak};

    const SITE: &str = "http://www.wikidata.org/entity/";

    fn q42() -> EntityId {
        EntityId::parse("Q42", SITE).unwrap()
    }

    fn item_with_content() -> ItemDocument {
        let p31 = EntityId::parse("P31", SITE).unwrap();
        let q5 = EntityId::parse("Q5", SITE).unwrap();
        ItemDocument::empty(q42())
            .unwrap()
            .with_label(Term::new("en", "Douglas Adams"))
            .with_label(Term::new("de", "Douglas Adams"))
            .with_description(Term::new("en", "English writer"))
            .with_aliases("en", vec!["DNA".into()])
            .with_statement(
                Statement::draft(q42(), Snak::value(p31, DataValue::Entity(q5)))
                    .with_id("Q42$F078E5B3-F9A8-480E-B7AC-D97778CBBEF9"),
            )
            .with_revision_id(1234)
    }

    #[test]
    fn item_round_trip() {
        let doc = EntityDocument::Item(item_with_content());
        let encoded = encode_entity_document(&doc).unwrap();
        assert_eq!(encoded["type"], "item");
        assert_eq!(encoded["id"], "Q42");
        assert_eq!(encoded["lastrevid"], 1234);

        let decoded = decode_entity_document(&encoded, SITE).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn term_map_order_survives_round_trip() {
        let doc = item_with_content();
        let encoded = encode_entity_document(&EntityDocument::Item(doc.clone())).unwrap();
        let labels: Vec<&String> = encoded["labels"].as_object().unwrap().keys().collect();
        assert_eq!(labels, vec!["en", "de"]);

        let decoded = decode_entity_document(&encoded, SITE).unwrap();
        let EntityDocument::Item(decoded) = decoded else {
            panic!("expected item");
        };
        assert_eq!(decoded.labels(), doc.labels());
    }

    #[test]
    fn property_round_trip() {
        let p = EntityId::parse("P31", SITE).unwrap();
        let doc = PropertyDocument::new(
            p,
            TermMap::from_terms(vec![Term::new("en", "instance of")]),
            TermMap::new(),
            AliasMap::new(),
            "wikibase-item",
            Vec::new(),
            77,
        )
        .unwrap();
        let encoded = encode_entity_document(&EntityDocument::Property(doc.clone())).unwrap();
        assert_eq!(encoded["datatype"], "wikibase-item");
        assert_eq!(
            decode_entity_document(&encoded, SITE).unwrap(),
            EntityDocument::Property(doc)
        );
    }

    #[test]
    fn lexeme_round_trip_with_forms_and_senses() {
        let lexeme_id = EntityId::parse("L21", SITE).unwrap();
        let form = FormDocument::new(
            EntityId::parse("L21-F1", SITE).unwrap(),
            TermMap::from_terms(vec![Term::new("en", "walked")]),
            vec![q42()],
            Vec::new(),
            0,
        )
        .unwrap();
        let sense = SenseDocument::new(
            EntityId::parse("L21-S1", SITE).unwrap(),
            TermMap::from_terms(vec![Term::new("en", "to move on foot")]),
            Vec::new(),
            0,
        )
        .unwrap();
        let doc = LexemeDocument::new(
            lexeme_id,
            TermMap::from_terms(vec![Term::new("en", "walk")]),
            q42(),
            q42(),
            Vec::new(),
            vec![form],
            vec![sense],
            9,
        )
        .unwrap();

        let encoded = encode_entity_document(&EntityDocument::Lexeme(doc.clone())).unwrap();
        assert_eq!(encoded["forms"][0]["id"], "L21-F1");
        assert_eq!(
            decode_entity_document(&encoded, SITE).unwrap(),
            EntityDocument::Lexeme(doc)
        );
    }

    #[test]
    fn media_info_round_trip() {
        let doc = MediaInfoDocument::new(
            EntityId::parse("M77", SITE).unwrap(),
            TermMap::from_terms(vec![Term::new("en", "A photograph")]),
            Vec::new(),
            3,
        )
        .unwrap();
        let encoded = encode_entity_document(&EntityDocument::MediaInfo(doc.clone())).unwrap();
        assert_eq!(
            decode_entity_document(&encoded, SITE).unwrap(),
            EntityDocument::MediaInfo(doc)
        );
    }

    #[test]
    fn placeholder_id_is_omitted() {
        let placeholder = EntityId::placeholder(EntityType::Item, SITE);
        let doc = EntityDocument::Item(ItemDocument::empty(placeholder).unwrap());
        let encoded = encode_entity_document(&doc).unwrap();
        assert!(encoded.get("id").is_none());
        assert!(encoded.get("lastrevid").is_none());

        let decoded = decode_entity_document(&encoded, SITE).unwrap();
        assert!(decoded.id().is_placeholder());
    }

    #[test]
    fn unknown_document_type_fails() {
        let json = json!({ "type": "gadget", "id": "G1" });
        assert!(matches!(
            decode_entity_document(&json, SITE),
            Err(CodecError::UnsupportedWireType { .. })
        ));
    }

    #[test]
    fn missing_sections_decode_empty() {
        let json = json!({ "type": "item", "id": "Q42" });
        let decoded = decode_entity_document(&json, SITE).unwrap();
        let EntityDocument::Item(item) = decoded else {
            panic!("expected item");
        };
        assert!(item.labels().is_empty());
        assert!(item.statement_groups().is_empty());
        assert_eq!(item.revision_id(), 0);
    }

    #[test]
    fn unknown_document_keys_are_ignored() {
        let json = json!({
            "type": "item",
            "id": "Q42",
            "sitelinks": { "enwiki": { "site": "enwiki", "title": "Douglas Adams" } },
            "pageid": 138,
        });
        assert!(decode_entity_document(&json, SITE).is_ok());
    }
}
