//! # wbkit Editor
//!
//! Write-side editor for Wikibase entities.
//!
//! The editor takes a normalized update, reduces it to the cheapest
//! remote call shape, and drives the call to completion:
//! - No net changes cost no remote call at all.
//! - A single term, alias-language, or statement change uses the
//!   matching single-field call; anything else is a full entity edit.
//! - Maxlag rejections back off exponentially up to a configured
//!   attempt bound; a rejected CSRF token is refreshed exactly once.
//! - An optional edit budget refuses further edits locally once
//!   exhausted.
//!
//! Network transport and token acquisition stay behind the
//! [`ApiTransport`] and [`TokenProvider`] traits; the crate ships mock
//! implementations for testing.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod editor;
mod error;
mod guid;
mod reduction;
mod token;
mod transport;

pub use config::{EditOptions, EditorConfig};
pub use editor::WikibaseEditor;
pub use error::{EditorError, EditorResult};
pub use guid::{FixedGuidGenerator, GuidGenerator, RandomGuidGenerator};
pub use reduction::{reduce, EditCall};
pub use token::{StaticTokenProvider, TokenProvider};
pub use transport::{ApiTransport, MockTransport, Params};
