//! # Wikibase Kit Data Model
//!
//! Immutable value objects for a collaboratively-edited structured
//! knowledge base: entity identifiers, terms, snaks, statements and
//! entity documents.
//!
//! This crate provides:
//! - Validated entity identifiers for all entity kinds
//! - Terms and insertion-ordered term/alias maps
//! - The closed set of data value kinds
//! - Statements with qualifiers, references and ranks
//! - Per-kind entity documents with functional `with_*` derivations
//!
//! ## Key Invariants
//!
//! - Invalid identifiers are unrepresentable: every constructor
//!   validates before a value escapes
//! - Every statement in a document carries the document's own entity id
//!   as its subject
//! - Values are never mutated after construction; all change is by
//!   derivation of a new value
//! - Equality and hashing are fully structural, including revision ids

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod error;
mod id;
mod snak;
mod statement;
mod term;
mod value;

pub use document::{
    EntityDocument, FormDocument, ItemDocument, LexemeDocument, MediaInfoDocument,
    PropertyDocument, SenseDocument,
};
pub use error::{ModelError, ModelResult};
pub use id::{EntityId, EntityType};
pub use snak::Snak;
pub use statement::{Rank, Reference, SnakGroup, Statement, StatementGroup};
pub use term::{AliasMap, Term, TermMap};
pub use value::{DataValue, GlobeCoordinateValue, QuantityValue, TimeValue};
