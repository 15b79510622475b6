//! Codec for data values and snaks.

use crate::error::{CodecError, CodecResult};
use crate::json::{expect_object, optional_str, optional_u64, require_f64, require_str};
use serde_json::{json, Map, Value};
use wbkit_datamodel::{
    DataValue, EntityId, EntityType, GlobeCoordinateValue, QuantityValue, Snak, Term, TimeValue,
};

/// Encodes a data value to its wire shape.
///
/// Fails for a placeholder entity id, which has no wire representation
/// as a value.
pub fn encode_data_value(value: &DataValue) -> CodecResult<Value> {
    let encoded = match value {
        DataValue::Entity(id) => {
            let string_id = id.id().ok_or_else(|| {
                CodecError::invalid_structure("a placeholder entity id cannot be encoded as a value")
            })?;
            let mut inner = Map::new();
            inner.insert(
                "entity-type".into(),
                Value::String(id.entity_type().wire_name().into()),
            );
            inner.insert("id".into(), Value::String(string_id.into()));
            if let Some(numeric) = id.numeric_id() {
                inner.insert("numeric-id".into(), Value::from(numeric));
            }
            json!({ "type": "wikibase-entityid", "value": inner })
        }
        DataValue::Text(text) => json!({ "type": "string", "value": text }),
        DataValue::Monolingual(term) => json!({
            "type": "monolingualtext",
            "value": { "text": term.text(), "language": term.language() },
        }),
        DataValue::Quantity(quantity) => {
            let mut inner = Map::new();
            inner.insert("amount".into(), Value::String(quantity.amount().into()));
            inner.insert("unit".into(), Value::String(quantity.unit().into()));
            if let Some(lower) = quantity.lower_bound() {
                inner.insert("lowerBound".into(), Value::String(lower.into()));
            }
            if let Some(upper) = quantity.upper_bound() {
                inner.insert("upperBound".into(), Value::String(upper.into()));
            }
            json!({ "type": "quantity", "value": inner })
        }
        DataValue::Time(time) => json!({
            "type": "time",
            "value": {
                "time": time.time(),
                "timezone": time.timezone(),
                "before": time.before(),
                "after": time.after(),
                "precision": time.precision(),
                "calendarmodel": time.calendar_model(),
            },
        }),
        DataValue::Coordinate(coordinate) => json!({
            "type": "globecoordinate",
            "value": {
                "latitude": coordinate.latitude(),
                "longitude": coordinate.longitude(),
                "precision": coordinate.precision(),
                "globe": coordinate.globe(),
            },
        }),
    };
    Ok(encoded)
}

/// Decodes a data value from its wire shape.
///
/// Dispatches on the `type` tag; an unknown tag fails with
/// [`CodecError::UnsupportedWireType`]. The site IRI is not part of
/// the wire format and must be supplied by the caller.
pub fn decode_data_value(json: &Value, site_iri: &str) -> CodecResult<DataValue> {
    let map = expect_object(json, "data value")?;
    let tag = require_str(map, "type", "data value")?;
    let inner = map
        .get("value")
        .ok_or_else(|| CodecError::invalid_structure("data value requires \"value\""))?;

    match tag {
        "wikibase-entityid" => {
            let inner = expect_object(inner, "entity id value")?;
            Ok(DataValue::Entity(decode_entity_id(inner, site_iri)?))
        }
        "string" => {
            let text = inner.as_str().ok_or_else(|| {
                CodecError::invalid_structure("string value must be a JSON string")
            })?;
            Ok(DataValue::Text(text.to_owned()))
        }
        "monolingualtext" => {
            let inner = expect_object(inner, "monolingual text value")?;
            let text = require_str(inner, "text", "monolingual text value")?;
            let language = require_str(inner, "language", "monolingual text value")?;
            Ok(DataValue::Monolingual(Term::new(language, text)))
        }
        "quantity" => {
            let inner = expect_object(inner, "quantity value")?;
            let amount = require_str(inner, "amount", "quantity value")?;
            let unit = require_str(inner, "unit", "quantity value")?;
            let mut quantity = QuantityValue::new(amount, unit);
            if let (Some(lower), Some(upper)) = (
                optional_str(inner, "lowerBound"),
                optional_str(inner, "upperBound"),
            ) {
                quantity = quantity.with_bounds(lower, upper);
            }
            Ok(DataValue::Quantity(quantity))
        }
        "time" => {
            let inner = expect_object(inner, "time value")?;
            let time = require_str(inner, "time", "time value")?;
            let calendar = require_str(inner, "calendarmodel", "time value")?;
            let timezone = inner.get("timezone").and_then(Value::as_i64).unwrap_or(0);
            let before = optional_u64(inner, "before").unwrap_or(0);
            let after = optional_u64(inner, "after").unwrap_or(0);
            let precision =
                optional_u64(inner, "precision").unwrap_or(TimeValue::PRECISION_DAY as u64);
            Ok(DataValue::Time(TimeValue::new(
                time,
                timezone as i32,
                before as u32,
                after as u32,
                precision as u8,
                calendar,
            )))
        }
        "globecoordinate" => {
            let inner = expect_object(inner, "globe coordinate value")?;
            let latitude = require_f64(inner, "latitude", "globe coordinate value")?;
            let longitude = require_f64(inner, "longitude", "globe coordinate value")?;
            let precision = require_f64(inner, "precision", "globe coordinate value")?;
            let globe = require_str(inner, "globe", "globe coordinate value")?;
            Ok(DataValue::Coordinate(GlobeCoordinateValue::new(
                latitude, longitude, precision, globe,
            )))
        }
        other => Err(CodecError::unsupported_wire_type(other)),
    }
}

/// Decodes the inner entity id object.
///
/// Accepts either the canonical string id alone, or an entity-type tag
/// plus numeric id; if both forms are present they must agree.
pub(crate) fn decode_entity_id(
    inner: &Map<String, Value>,
    site_iri: &str,
) -> CodecResult<EntityId> {
    let string_id = optional_str(inner, "id");
    let tag = optional_str(inner, "entity-type");
    let numeric_id = optional_u64(inner, "numeric-id");

    let entity_type = tag
        .map(|t| {
            EntityType::from_wire_name(t).ok_or_else(|| CodecError::unsupported_wire_type(t))
        })
        .transpose()?;

    match (string_id, entity_type, numeric_id) {
        (Some(id), None, None) => Ok(EntityId::parse(id, site_iri)?),
        (Some(id), Some(entity_type), None) => {
            Ok(EntityId::from_parts(entity_type, id, site_iri)?)
        }
        (Some(id), Some(entity_type), Some(numeric)) => {
            let built = EntityId::from_numeric(entity_type, numeric, site_iri)?;
            if built.id() != Some(id) {
                return Err(CodecError::inconsistent_id(id, built.to_string()));
            }
            Ok(built)
        }
        (Some(id), None, Some(numeric)) => {
            let parsed = EntityId::parse(id, site_iri)?;
            if parsed.numeric_id() != Some(numeric) {
                return Err(CodecError::inconsistent_id(
                    id,
                    format!("numeric id {numeric}"),
                ));
            }
            Ok(parsed)
        }
        (None, Some(entity_type), Some(numeric)) => {
            Ok(EntityId::from_numeric(entity_type, numeric, site_iri)?)
        }
        _ => Err(CodecError::invalid_structure(
            "entity id value requires an id, or an entity-type and a numeric-id",
        )),
    }
}

/// Encodes a snak to its wire shape.
pub fn encode_snak(snak: &Snak) -> CodecResult<Value> {
    let property = snak.property().id().ok_or_else(|| {
        CodecError::invalid_structure("a snak property id must not be a placeholder")
    })?;
    let encoded = match snak {
        Snak::Value { value, .. } => json!({
            "snaktype": "value",
            "property": property,
            "datavalue": encode_data_value(value)?,
        }),
        Snak::NoValue { .. } => json!({ "snaktype": "novalue", "property": property }),
        Snak::SomeValue { .. } => json!({ "snaktype": "somevalue", "property": property }),
    };
    Ok(encoded)
}

/// Decodes a snak from its wire shape.
pub fn decode_snak(json: &Value, site_iri: &str) -> CodecResult<Snak> {
    let map = expect_object(json, "snak")?;
    let snak_type = require_str(map, "snaktype", "snak")?;
    let property = require_str(map, "property", "snak")?;
    let property = EntityId::parse(property, site_iri)?;

    match snak_type {
        "value" => {
            let datavalue = map.get("datavalue").ok_or_else(|| {
                CodecError::invalid_structure("value snak requires \"datavalue\"")
            })?;
            Ok(Snak::value(property, decode_data_value(datavalue, site_iri)?))
        }
        "novalue" => Ok(Snak::no_value(property)),
        "somevalue" => Ok(Snak::some_value(property)),
        other => Err(CodecError::unsupported_wire_type(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SITE: &str = "http://www.wikidata.org/entity/";

    #[test]
    fn entity_id_round_trip() {
        let value = DataValue::Entity(EntityId::parse("Q42", SITE).unwrap());
        let encoded = encode_data_value(&value).unwrap();
        assert_eq!(
            encoded,
            json!({
                "type": "wikibase-entityid",
                "value": { "entity-type": "item", "id": "Q42", "numeric-id": 42 },
            })
        );
        assert_eq!(decode_data_value(&encoded, SITE).unwrap(), value);
    }

    #[test]
    fn compound_id_omits_numeric_id() {
        let value = DataValue::Entity(EntityId::parse("L21-F3", SITE).unwrap());
        let encoded = encode_data_value(&value).unwrap();
        assert_eq!(
            encoded,
            json!({
                "type": "wikibase-entityid",
                "value": { "entity-type": "form", "id": "L21-F3" },
            })
        );
        assert_eq!(decode_data_value(&encoded, SITE).unwrap(), value);
    }

    #[test]
    fn entity_id_accepts_tag_and_numeric_alone() {
        let json = json!({
            "type": "wikibase-entityid",
            "value": { "entity-type": "property", "numeric-id": 31 },
        });
        let decoded = decode_data_value(&json, SITE).unwrap();
        assert_eq!(
            decoded,
            DataValue::Entity(EntityId::parse("P31", SITE).unwrap())
        );
    }

    #[test]
    fn entity_id_disagreement_fails() {
        let json = json!({
            "type": "wikibase-entityid",
            "value": { "entity-type": "item", "id": "Q42", "numeric-id": 43 },
        });
        assert!(matches!(
            decode_data_value(&json, SITE),
            Err(CodecError::InconsistentId { .. })
        ));
    }

    #[test]
    fn unknown_entity_type_tag_fails() {
        let json = json!({
            "type": "wikibase-entityid",
            "value": { "entity-type": "constellation", "numeric-id": 1 },
        });
        assert!(matches!(
            decode_data_value(&json, SITE),
            Err(CodecError::UnsupportedWireType { .. })
        ));
    }

    #[test]
    fn unknown_value_type_tag_fails() {
        let json = json!({ "type": "hypertext", "value": "x" });
        assert!(matches!(
            decode_data_value(&json, SITE),
            Err(CodecError::UnsupportedWireType { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let json = json!({
            "type": "string",
            "value": "hello",
            "hash": "0123abcd",
        });
        assert_eq!(
            decode_data_value(&json, SITE).unwrap(),
            DataValue::Text("hello".into())
        );
    }

    #[test]
    fn quantity_round_trip() {
        let plain = DataValue::Quantity(QuantityValue::new("+42", "1"));
        let encoded = encode_data_value(&plain).unwrap();
        assert_eq!(decode_data_value(&encoded, SITE).unwrap(), plain);

        let bounded =
            DataValue::Quantity(QuantityValue::new("+42", "1").with_bounds("+41", "+43"));
        let encoded = encode_data_value(&bounded).unwrap();
        assert_eq!(decode_data_value(&encoded, SITE).unwrap(), bounded);
    }

    #[test]
    fn time_round_trip() {
        let value = DataValue::Time(TimeValue::new(
            "+2020-01-15T00:00:00Z",
            0,
            0,
            0,
            TimeValue::PRECISION_DAY,
            "http://www.wikidata.org/entity/Q1985727",
        ));
        let encoded = encode_data_value(&value).unwrap();
        assert_eq!(decode_data_value(&encoded, SITE).unwrap(), value);
    }

    #[test]
    fn coordinate_round_trip() {
        let value = DataValue::Coordinate(GlobeCoordinateValue::new(
            52.516666666667,
            13.383333333333,
            0.016666666666667,
            "http://www.wikidata.org/entity/Q2",
        ));
        let encoded = encode_data_value(&value).unwrap();
        assert_eq!(decode_data_value(&encoded, SITE).unwrap(), value);
    }

    #[test]
    fn monolingual_round_trip() {
        let value = DataValue::Monolingual(Term::new("en", "Berlin"));
        let encoded = encode_data_value(&value).unwrap();
        assert_eq!(decode_data_value(&encoded, SITE).unwrap(), value);
    }

    #[test]
    fn snak_round_trips() {
        let p31 = EntityId::parse("P31", SITE).unwrap();

        for snak in [
            Snak::value(p31.clone(), DataValue::Text("x".into())),
            Snak::no_value(p31.clone()),
            Snak::some_value(p31.clone()),
        ] {
            let encoded = encode_snak(&snak).unwrap();
            assert_eq!(decode_snak(&encoded, SITE).unwrap(), snak);
        }
    }

    #[test]
    fn unknown_snak_type_fails() {
        let json = json!({ "snaktype": "guess", "property": "P31" });
        assert!(matches!(
            decode_snak(&json, SITE),
            Err(CodecError::UnsupportedWireType { .. })
        ));
    }

    #[test]
    fn placeholder_id_cannot_be_encoded() {
        let value = DataValue::Entity(EntityId::placeholder(EntityType::Item, SITE));
        assert!(encode_data_value(&value).is_err());
    }
}
