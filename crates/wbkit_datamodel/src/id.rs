//! Entity identifiers.

use crate::error::{ModelError, ModelResult};
use std::fmt;

/// The kind of entity an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    /// An item (`Q` ids).
    Item,
    /// A property (`P` ids).
    Property,
    /// A lexeme (`L` ids).
    Lexeme,
    /// A form of a lexeme (`L<n>-F<n>` ids).
    Form,
    /// A sense of a lexeme (`L<n>-S<n>` ids).
    Sense,
    /// A media info entity (`M` ids).
    MediaInfo,
}

impl EntityType {
    /// Returns the `entity-type` tag used on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            EntityType::Item => "item",
            EntityType::Property => "property",
            EntityType::Lexeme => "lexeme",
            EntityType::Form => "form",
            EntityType::Sense => "sense",
            EntityType::MediaInfo => "mediainfo",
        }
    }

    /// Looks up an entity type from its wire tag.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "item" => Some(EntityType::Item),
            "property" => Some(EntityType::Property),
            "lexeme" => Some(EntityType::Lexeme),
            "form" => Some(EntityType::Form),
            "sense" => Some(EntityType::Sense),
            "mediainfo" => Some(EntityType::MediaInfo),
            _ => None,
        }
    }

    /// Returns the id prefix letter for kinds with simple ids.
    ///
    /// Form and sense ids are compound (`L<n>-F<n>`, `L<n>-S<n>`) and
    /// have no single prefix letter.
    pub fn letter(&self) -> Option<char> {
        match self {
            EntityType::Item => Some('Q'),
            EntityType::Property => Some('P'),
            EntityType::Lexeme => Some('L'),
            EntityType::MediaInfo => Some('M'),
            EntityType::Form | EntityType::Sense => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// A validated identifier for one entity, together with its site IRI.
///
/// The canonical string id, the numeric component and the entity type
/// are mutually derivable: parsing `"Q42"` yields the same value as
/// constructing an item id from the number 42.
///
/// A placeholder id ("not yet assigned") carries no string or numeric
/// id and never compares equal to any concrete id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    entity_type: EntityType,
    id: Option<String>,
    site_iri: String,
}

impl EntityId {
    /// Parses a canonical id string, inferring the entity type.
    ///
    /// Media info ids (`M`) and lexeme ids (`L`) share no prefix with
    /// compound form/sense ids, so the shape is unambiguous.
    pub fn parse(id: &str, site_iri: impl Into<String>) -> ModelResult<Self> {
        let entity_type = infer_type(id)?;
        validate_id(entity_type, id)?;
        Ok(Self {
            entity_type,
            id: Some(id.to_owned()),
            site_iri: site_iri.into(),
        })
    }

    /// Builds an id from an entity type and a canonical id string.
    ///
    /// Fails if the string does not have the shape required by the type.
    pub fn from_parts(
        entity_type: EntityType,
        id: &str,
        site_iri: impl Into<String>,
    ) -> ModelResult<Self> {
        validate_id(entity_type, id)?;
        Ok(Self {
            entity_type,
            id: Some(id.to_owned()),
            site_iri: site_iri.into(),
        })
    }

    /// Builds an id from an entity type and a numeric id.
    ///
    /// Fails for form and sense ids, which are compound, and for zero,
    /// which is not a positive integer.
    pub fn from_numeric(
        entity_type: EntityType,
        numeric_id: u64,
        site_iri: impl Into<String>,
    ) -> ModelResult<Self> {
        let letter = entity_type.letter().ok_or_else(|| {
            ModelError::malformed_id(
                numeric_id.to_string(),
                format!("{entity_type} ids are compound and have no numeric form"),
            )
        })?;
        if numeric_id == 0 {
            return Err(ModelError::malformed_id(
                format!("{letter}0"),
                "numeric ids must be positive",
            ));
        }
        Ok(Self {
            entity_type,
            id: Some(format!("{letter}{numeric_id}")),
            site_iri: site_iri.into(),
        })
    }

    /// Builds an item id from a numeric id.
    pub fn item(numeric_id: u64, site_iri: impl Into<String>) -> ModelResult<Self> {
        Self::from_numeric(EntityType::Item, numeric_id, site_iri)
    }

    /// Builds a property id from a numeric id.
    pub fn property(numeric_id: u64, site_iri: impl Into<String>) -> ModelResult<Self> {
        Self::from_numeric(EntityType::Property, numeric_id, site_iri)
    }

    /// Builds a lexeme id from a numeric id.
    pub fn lexeme(numeric_id: u64, site_iri: impl Into<String>) -> ModelResult<Self> {
        Self::from_numeric(EntityType::Lexeme, numeric_id, site_iri)
    }

    /// Builds a media info id from a numeric id.
    pub fn media_info(numeric_id: u64, site_iri: impl Into<String>) -> ModelResult<Self> {
        Self::from_numeric(EntityType::MediaInfo, numeric_id, site_iri)
    }

    /// Builds a compound form id `L<lexeme>-F<form>`.
    pub fn form(lexeme_id: u64, form_id: u64, site_iri: impl Into<String>) -> ModelResult<Self> {
        let id = format!("L{lexeme_id}-F{form_id}");
        if lexeme_id == 0 || form_id == 0 {
            return Err(ModelError::malformed_id(id, "numeric ids must be positive"));
        }
        Ok(Self {
            entity_type: EntityType::Form,
            id: Some(id),
            site_iri: site_iri.into(),
        })
    }

    /// Builds a compound sense id `L<lexeme>-S<sense>`.
    pub fn sense(lexeme_id: u64, sense_id: u64, site_iri: impl Into<String>) -> ModelResult<Self> {
        let id = format!("L{lexeme_id}-S{sense_id}");
        if lexeme_id == 0 || sense_id == 0 {
            return Err(ModelError::malformed_id(id, "numeric ids must be positive"));
        }
        Ok(Self {
            entity_type: EntityType::Sense,
            id: Some(id),
            site_iri: site_iri.into(),
        })
    }

    /// Creates the placeholder id for an entity that is not yet assigned.
    ///
    /// A placeholder never equals a concrete id; it is used as the
    /// subject of documents that are about to be created remotely.
    pub fn placeholder(entity_type: EntityType, site_iri: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: None,
            site_iri: site_iri.into(),
        }
    }

    /// Returns the entity type.
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Returns the canonical string id, or `None` for a placeholder.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the numeric component for simple (non-compound) ids.
    pub fn numeric_id(&self) -> Option<u64> {
        let id = self.id.as_deref()?;
        self.entity_type.letter()?;
        parse_serial(&id[1..])
    }

    /// Returns the site IRI this id belongs to.
    pub fn site_iri(&self) -> &str {
        &self.site_iri
    }

    /// Returns the full IRI (site IRI + id), or `None` for a placeholder.
    pub fn iri(&self) -> Option<String> {
        self.id.as_deref().map(|id| format!("{}{id}", self.site_iri))
    }

    /// Returns true if this is the "not yet assigned" sentinel.
    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{id}"),
            None => write!(f, "(new {})", self.entity_type),
        }
    }
}

/// Infers the entity type from the shape of a canonical id string.
fn infer_type(id: &str) -> ModelResult<EntityType> {
    let mut chars = id.chars();
    let letter = chars.next().ok_or_else(|| {
        ModelError::malformed_id(id, "entity ids must not be empty")
    })?;
    match letter {
        'Q' => Ok(EntityType::Item),
        'P' => Ok(EntityType::Property),
        'M' => Ok(EntityType::MediaInfo),
        'L' => {
            if id.contains("-F") {
                Ok(EntityType::Form)
            } else if id.contains("-S") {
                Ok(EntityType::Sense)
            } else {
                Ok(EntityType::Lexeme)
            }
        }
        _ => Err(ModelError::malformed_id(id, "unrecognized id prefix")),
    }
}

/// Validates that an id string has the exact shape required by a type.
fn validate_id(entity_type: EntityType, id: &str) -> ModelResult<()> {
    match entity_type {
        EntityType::Form => validate_compound(id, 'F'),
        EntityType::Sense => validate_compound(id, 'S'),
        EntityType::Item => validate_simple(entity_type, 'Q', id),
        EntityType::Property => validate_simple(entity_type, 'P', id),
        EntityType::Lexeme => validate_simple(entity_type, 'L', id),
        EntityType::MediaInfo => validate_simple(entity_type, 'M', id),
    }
}

fn validate_simple(entity_type: EntityType, letter: char, id: &str) -> ModelResult<()> {
    let serial = id.strip_prefix(letter).ok_or_else(|| {
        ModelError::malformed_id(id, format!("{entity_type} ids must start with {letter:?}"))
    })?;
    if parse_serial(serial).is_none() {
        return Err(ModelError::malformed_id(
            id,
            format!("{entity_type} ids must have the form {letter}<positive integer>"),
        ));
    }
    Ok(())
}

fn validate_compound(id: &str, sub_letter: char) -> ModelResult<()> {
    let err = || {
        ModelError::malformed_id(
            id,
            format!("compound ids must have the form L<positive integer>-{sub_letter}<positive integer>"),
        )
    };
    let rest = id.strip_prefix('L').ok_or_else(err)?;
    let (lexeme_part, sub_part) = rest.split_once('-').ok_or_else(err)?;
    let sub_serial = sub_part
        .strip_prefix(sub_letter)
        .ok_or_else(err)?;
    if parse_serial(lexeme_part).is_none() || parse_serial(sub_serial).is_none() {
        return Err(err());
    }
    Ok(())
}

/// Parses the numeric part of an id.
///
/// Leading zeros are rejected so that the string and numeric forms
/// stay mutually derivable.
fn parse_serial(serial: &str) -> Option<u64> {
    if serial.is_empty() || !serial.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if serial.starts_with('0') {
        return None;
    }
    serial.parse().ok()
}
