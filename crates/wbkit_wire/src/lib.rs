//! # wbkit Wire Codec
//!
//! JSON encoding/decoding between the wbkit data model and the
//! Wikibase API wire format.
//!
//! This crate guarantees:
//! - Round-trip fidelity: decode then encode reproduces equivalent JSON
//! - Insertion order of term, alias and claims maps is preserved
//! - Unknown type tags are rejected, unknown document keys are ignored
//!
//! ## Wire Rules
//!
//! - Data values carry a `type` tag and a `value` payload
//! - Entity id values may appear as string id, (tag, numeric id) pair,
//!   or both; when both appear they must agree
//! - Statement ids are omitted for drafts; empty qualifier and
//!   reference collections are omitted entirely
//! - A missing `lastrevid` decodes as revision zero
//!
//! ## Usage
//!
//! ```
//! use wbkit_wire::{decode_entity_document, encode_entity_document};
//! use serde_json::json;
//!
//! let site = "http://www.wikidata.org/entity/";
//! let json = json!({ "type": "item", "id": "Q42", "lastrevid": 1234 });
//! let document = decode_entity_document(&json, site).unwrap();
//! assert_eq!(document.revision_id(), 1234);
//!
//! let encoded = encode_entity_document(&document).unwrap();
//! assert_eq!(encoded["id"], "Q42");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod error;
mod json;
mod statement;
mod value;

pub use document::{
    decode_alias_map, decode_claims, decode_entity_document, decode_term_map, encode_alias_map,
    encode_claims, encode_entity_document, encode_term_map,
};
pub use error::{CodecError, CodecResult};
pub use statement::{decode_statement, encode_statement};
pub use value::{decode_data_value, decode_snak, encode_data_value, encode_snak};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wbkit_datamodel::{DataValue, EntityId, ItemDocument, Snak, Statement, Term};

    const SITE: &str = "http://www.wikidata.org/entity/";

    fn arb_language() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["en", "de", "fr", "pt-br", "zh-hans"])
            .prop_map(str::to_owned)
    }

    proptest! {
        #[test]
        fn text_value_round_trips(text in ".{0,40}") {
            let value = DataValue::Text(text);
            let encoded = encode_data_value(&value).unwrap();
            prop_assert_eq!(decode_data_value(&encoded, SITE).unwrap(), value);
        }

        #[test]
        fn monolingual_value_round_trips(language in arb_language(), text in ".{0,40}") {
            let value = DataValue::Monolingual(Term::new(language, text));
            let encoded = encode_data_value(&value).unwrap();
            prop_assert_eq!(decode_data_value(&encoded, SITE).unwrap(), value);
        }

        #[test]
        fn item_document_round_trips(
            serial in 1u64..1_000_000,
            revision in 0u64..1_000_000,
            label in ".{1,40}",
        ) {
            let id = EntityId::item(serial, SITE).unwrap();
            let property = EntityId::property(7, SITE).unwrap();
            let doc = ItemDocument::empty(id.clone())
                .unwrap()
                .with_label(Term::new("en", label))
                .with_statement(
                    Statement::draft(id, Snak::some_value(property))
                        .with_id(format!("Q{serial}$00000000-0000-0000-0000-000000000000")),
                )
                .with_revision_id(revision);
            let doc = wbkit_datamodel::EntityDocument::Item(doc);

            let encoded = encode_entity_document(&doc).unwrap();
            prop_assert_eq!(decode_entity_document(&encoded, SITE).unwrap(), doc);
        }
    }
}
