//! # wbkit Updates
//!
//! Normalizing update builders describing intended changes to an
//! entity relative to a base revision.
//!
//! Builders accumulate operations in any order; `build()` returns an
//! immutable update normalized by these merge rules:
//! - At most one pending term operation per language survives; the
//!   last staged operation wins.
//! - Alias adds and removes of an equal term cancel; duplicates keep
//!   their first occurrence.
//! - A staged draft statement is cancelled only through the handle the
//!   builder issued for it.
//! - For one statement id targeted by both replace and remove, the
//!   last staged operation wins.
//!
//! ## Usage
//!
//! ```
//! use wbkit_datamodel::{EntityId, Term};
//! use wbkit_updates::ItemUpdateBuilder;
//!
//! let site = "http://www.wikidata.org/entity/";
//! let q42 = EntityId::parse("Q42", site).unwrap();
//!
//! let mut builder = ItemUpdateBuilder::for_entity(q42, 1234).unwrap();
//! builder
//!     .set_label(Term::new("en", "Douglas Adams"))
//!     .add_alias("en", "DNA")
//!     .remove_alias("en", "DNA");
//! let update = builder.build();
//!
//! // The alias add and remove cancelled out.
//! assert!(update.aliases().is_empty());
//! assert_eq!(update.labels().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod alias;
mod entity;
mod statement;
mod term;

pub use alias::{AliasChange, AliasesUpdate, AliasesUpdateBuilder};
pub use entity::{
    EntityUpdate, FormUpdate, FormUpdateBuilder, ItemUpdate, ItemUpdateBuilder, LexemeUpdate,
    LexemeUpdateBuilder, MediaInfoUpdate, MediaInfoUpdateBuilder, PropertyUpdate,
    PropertyUpdateBuilder, SenseUpdate, SenseUpdateBuilder,
};
pub use statement::{DraftHandle, StatementUpdate, StatementUpdateBuilder};
pub use term::{TermOp, TermUpdate, TermUpdateBuilder};
