//! Per-kind entity updates and their builders.
//!
//! Each update carries the base entity id, the base revision the
//! caller read (absent when creating a new entity), and the sub-update
//! sections that exist for that entity kind.

use crate::alias::{AliasesUpdate, AliasesUpdateBuilder};
use crate::statement::{DraftHandle, StatementUpdate, StatementUpdateBuilder};
use crate::term::{TermUpdate, TermUpdateBuilder};
use wbkit_datamodel::{EntityId, EntityType, ModelError, ModelResult, Statement, Term};

fn check_kind(id: &EntityId, expected: EntityType) -> ModelResult<()> {
    if id.entity_type() == expected {
        Ok(())
    } else {
        Err(ModelError::malformed_id(
            id.to_string(),
            format!(
                "expected {} id, found {}",
                expected.wire_name(),
                id.entity_type().wire_name()
            ),
        ))
    }
}

macro_rules! base_accessors {
    () => {
        /// Returns the id of the entity being updated.
        pub fn base_id(&self) -> &EntityId {
            &self.base_id
        }

        /// Returns the revision the update is based on, if any.
        ///
        /// `None` means the update creates a new entity.
        pub fn base_revision(&self) -> Option<u64> {
            self.base_revision
        }

        /// Returns the staged statement changes.
        pub fn statements(&self) -> &StatementUpdate {
            &self.statements
        }
    };
}

macro_rules! statement_builder_methods {
    () => {
        /// Stages a draft statement for addition. The statement's
        /// subject is rewritten to the update's base id.
        pub fn add_statement(&mut self, statement: Statement) -> DraftHandle {
            self.statements
                .add(statement.with_subject(self.base_id.clone()))
        }

        /// Cancels a draft staged in this builder.
        pub fn cancel_statement(&mut self, handle: DraftHandle) -> &mut Self {
            self.statements.cancel(handle);
            self
        }

        /// Stages a replacement of a persisted statement.
        pub fn replace_statement(&mut self, statement: Statement) -> &mut Self {
            self.statements
                .replace(statement.with_subject(self.base_id.clone()));
            self
        }

        /// Stages a removal of a persisted statement by id.
        pub fn remove_statement(&mut self, id: impl Into<String>) -> &mut Self {
            self.statements.remove(id);
            self
        }
    };
}

/// Changes to an item relative to a base revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemUpdate {
    base_id: EntityId,
    base_revision: Option<u64>,
    labels: TermUpdate,
    descriptions: TermUpdate,
    aliases: AliasesUpdate,
    statements: StatementUpdate,
}

impl ItemUpdate {
    base_accessors!();

    /// Returns the staged label changes.
    pub fn labels(&self) -> &TermUpdate {
        &self.labels
    }

    /// Returns the staged description changes.
    pub fn descriptions(&self) -> &TermUpdate {
        &self.descriptions
    }

    /// Returns the staged alias changes.
    pub fn aliases(&self) -> &AliasesUpdate {
        &self.aliases
    }

    /// Returns true when the update stages no changes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
            && self.descriptions.is_empty()
            && self.aliases.is_empty()
            && self.statements.is_empty()
    }
}

/// Staged accumulator for an [`ItemUpdate`].
#[derive(Debug, Clone)]
pub struct ItemUpdateBuilder {
    base_id: EntityId,
    base_revision: Option<u64>,
    labels: TermUpdateBuilder,
    descriptions: TermUpdateBuilder,
    aliases: AliasesUpdateBuilder,
    statements: StatementUpdateBuilder,
}

impl ItemUpdateBuilder {
    /// Starts an update of an existing item at a base revision.
    pub fn for_entity(base_id: EntityId, base_revision: u64) -> ModelResult<Self> {
        check_kind(&base_id, EntityType::Item)?;
        Ok(Self::with_base(base_id, Some(base_revision)))
    }

    /// Starts an update that creates a new item.
    pub fn for_new(site_iri: impl Into<String>) -> Self {
        Self::with_base(EntityId::placeholder(EntityType::Item, site_iri), None)
    }

    fn with_base(base_id: EntityId, base_revision: Option<u64>) -> Self {
        Self {
            base_id,
            base_revision,
            labels: TermUpdateBuilder::new(),
            descriptions: TermUpdateBuilder::new(),
            aliases: AliasesUpdateBuilder::new(),
            statements: StatementUpdateBuilder::new(),
        }
    }

    /// Stages a label upsert.
    pub fn set_label(&mut self, term: Term) -> &mut Self {
        self.labels.put(term);
        self
    }

    /// Stages a label removal.
    pub fn remove_label(&mut self, language: impl Into<String>) -> &mut Self {
        self.labels.remove(language);
        self
    }

    /// Stages a description upsert.
    pub fn set_description(&mut self, term: Term) -> &mut Self {
        self.descriptions.put(term);
        self
    }

    /// Stages a description removal.
    pub fn remove_description(&mut self, language: impl Into<String>) -> &mut Self {
        self.descriptions.remove(language);
        self
    }

    /// Stages an alias addition.
    pub fn add_alias(&mut self, language: &str, alias: impl Into<String>) -> &mut Self {
        self.aliases.add(language, alias);
        self
    }

    /// Stages an alias removal.
    pub fn remove_alias(&mut self, language: &str, alias: impl Into<String>) -> &mut Self {
        self.aliases.remove(language, alias);
        self
    }

    statement_builder_methods!();

    /// Returns the normalized update.
    pub fn build(&self) -> ItemUpdate {
        ItemUpdate {
            base_id: self.base_id.clone(),
            base_revision: self.base_revision,
            labels: self.labels.build(),
            descriptions: self.descriptions.build(),
            aliases: self.aliases.build(),
            statements: self.statements.build(),
        }
    }
}

/// Changes to a property relative to a base revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyUpdate {
    base_id: EntityId,
    base_revision: Option<u64>,
    labels: TermUpdate,
    descriptions: TermUpdate,
    aliases: AliasesUpdate,
    statements: StatementUpdate,
}

impl PropertyUpdate {
    base_accessors!();

    /// Returns the staged label changes.
    pub fn labels(&self) -> &TermUpdate {
        &self.labels
    }

    /// Returns the staged description changes.
    pub fn descriptions(&self) -> &TermUpdate {
        &self.descriptions
    }

    /// Returns the staged alias changes.
    pub fn aliases(&self) -> &AliasesUpdate {
        &self.aliases
    }

    /// Returns true when the update stages no changes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
            && self.descriptions.is_empty()
            && self.aliases.is_empty()
            && self.statements.is_empty()
    }
}

/// Staged accumulator for a [`PropertyUpdate`].
///
/// Properties cannot be created through an update; the datatype of a
/// property is fixed at creation time by the remote service.
#[derive(Debug, Clone)]
pub struct PropertyUpdateBuilder {
    base_id: EntityId,
    base_revision: Option<u64>,
    labels: TermUpdateBuilder,
    descriptions: TermUpdateBuilder,
    aliases: AliasesUpdateBuilder,
    statements: StatementUpdateBuilder,
}

impl PropertyUpdateBuilder {
    /// Starts an update of an existing property at a base revision.
    pub fn for_entity(base_id: EntityId, base_revision: u64) -> ModelResult<Self> {
        check_kind(&base_id, EntityType::Property)?;
        Ok(Self {
            base_id,
            base_revision: Some(base_revision),
            labels: TermUpdateBuilder::new(),
            descriptions: TermUpdateBuilder::new(),
            aliases: AliasesUpdateBuilder::new(),
            statements: StatementUpdateBuilder::new(),
        })
    }

    /// Stages a label upsert.
    pub fn set_label(&mut self, term: Term) -> &mut Self {
        self.labels.put(term);
        self
    }

    /// Stages a label removal.
    pub fn remove_label(&mut self, language: impl Into<String>) -> &mut Self {
        self.labels.remove(language);
        self
    }

    /// Stages a description upsert.
    pub fn set_description(&mut self, term: Term) -> &mut Self {
        self.descriptions.put(term);
        self
    }

    /// Stages a description removal.
    pub fn remove_description(&mut self, language: impl Into<String>) -> &mut Self {
        self.descriptions.remove(language);
        self
    }

    /// Stages an alias addition.
    pub fn add_alias(&mut self, language: &str, alias: impl Into<String>) -> &mut Self {
        self.aliases.add(language, alias);
        self
    }

    /// Stages an alias removal.
    pub fn remove_alias(&mut self, language: &str, alias: impl Into<String>) -> &mut Self {
        self.aliases.remove(language, alias);
        self
    }

    statement_builder_methods!();

    /// Returns the normalized update.
    pub fn build(&self) -> PropertyUpdate {
        PropertyUpdate {
            base_id: self.base_id.clone(),
            base_revision: self.base_revision,
            labels: self.labels.build(),
            descriptions: self.descriptions.build(),
            aliases: self.aliases.build(),
            statements: self.statements.build(),
        }
    }
}

/// Changes to a lexeme's lemmas and statements.
///
/// Form and sense changes are staged through their own updates against
/// the form or sense id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LexemeUpdate {
    base_id: EntityId,
    base_revision: Option<u64>,
    lemmas: TermUpdate,
    statements: StatementUpdate,
}

impl LexemeUpdate {
    base_accessors!();

    /// Returns the staged lemma changes.
    pub fn lemmas(&self) -> &TermUpdate {
        &self.lemmas
    }

    /// Returns true when the update stages no changes.
    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty() && self.statements.is_empty()
    }
}

/// Staged accumulator for a [`LexemeUpdate`].
#[derive(Debug, Clone)]
pub struct LexemeUpdateBuilder {
    base_id: EntityId,
    base_revision: Option<u64>,
    lemmas: TermUpdateBuilder,
    statements: StatementUpdateBuilder,
}

impl LexemeUpdateBuilder {
    /// Starts an update of an existing lexeme at a base revision.
    pub fn for_entity(base_id: EntityId, base_revision: u64) -> ModelResult<Self> {
        check_kind(&base_id, EntityType::Lexeme)?;
        Ok(Self {
            base_id,
            base_revision: Some(base_revision),
            lemmas: TermUpdateBuilder::new(),
            statements: StatementUpdateBuilder::new(),
        })
    }

    /// Stages a lemma upsert.
    pub fn set_lemma(&mut self, term: Term) -> &mut Self {
        self.lemmas.put(term);
        self
    }

    /// Stages a lemma removal.
    pub fn remove_lemma(&mut self, language: impl Into<String>) -> &mut Self {
        self.lemmas.remove(language);
        self
    }

    statement_builder_methods!();

    /// Returns the normalized update.
    pub fn build(&self) -> LexemeUpdate {
        LexemeUpdate {
            base_id: self.base_id.clone(),
            base_revision: self.base_revision,
            lemmas: self.lemmas.build(),
            statements: self.statements.build(),
        }
    }
}

/// Changes to a form's representations and statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormUpdate {
    base_id: EntityId,
    base_revision: Option<u64>,
    representations: TermUpdate,
    statements: StatementUpdate,
}

impl FormUpdate {
    base_accessors!();

    /// Returns the staged representation changes.
    pub fn representations(&self) -> &TermUpdate {
        &self.representations
    }

    /// Returns true when the update stages no changes.
    pub fn is_empty(&self) -> bool {
        self.representations.is_empty() && self.statements.is_empty()
    }
}

/// Staged accumulator for a [`FormUpdate`].
#[derive(Debug, Clone)]
pub struct FormUpdateBuilder {
    base_id: EntityId,
    base_revision: Option<u64>,
    representations: TermUpdateBuilder,
    statements: StatementUpdateBuilder,
}

impl FormUpdateBuilder {
    /// Starts an update of an existing form at a base revision.
    ///
    /// The base revision is the revision of the enclosing lexeme.
    pub fn for_entity(base_id: EntityId, base_revision: u64) -> ModelResult<Self> {
        check_kind(&base_id, EntityType::Form)?;
        Ok(Self {
            base_id,
            base_revision: Some(base_revision),
            representations: TermUpdateBuilder::new(),
            statements: StatementUpdateBuilder::new(),
        })
    }

    /// Stages a representation upsert.
    pub fn set_representation(&mut self, term: Term) -> &mut Self {
        self.representations.put(term);
        self
    }

    /// Stages a representation removal.
    pub fn remove_representation(&mut self, language: impl Into<String>) -> &mut Self {
        self.representations.remove(language);
        self
    }

    statement_builder_methods!();

    /// Returns the normalized update.
    pub fn build(&self) -> FormUpdate {
        FormUpdate {
            base_id: self.base_id.clone(),
            base_revision: self.base_revision,
            representations: self.representations.build(),
            statements: self.statements.build(),
        }
    }
}

/// Changes to a sense's glosses and statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenseUpdate {
    base_id: EntityId,
    base_revision: Option<u64>,
    glosses: TermUpdate,
    statements: StatementUpdate,
}

impl SenseUpdate {
    base_accessors!();

    /// Returns the staged gloss changes.
    pub fn glosses(&self) -> &TermUpdate {
        &self.glosses
    }

    /// Returns true when the update stages no changes.
    pub fn is_empty(&self) -> bool {
        self.glosses.is_empty() && self.statements.is_empty()
    }
}

/// Staged accumulator for a [`SenseUpdate`].
#[derive(Debug, Clone)]
pub struct SenseUpdateBuilder {
    base_id: EntityId,
    base_revision: Option<u64>,
    glosses: TermUpdateBuilder,
    statements: StatementUpdateBuilder,
}

impl SenseUpdateBuilder {
    /// Starts an update of an existing sense at a base revision.
    ///
    /// The base revision is the revision of the enclosing lexeme.
    pub fn for_entity(base_id: EntityId, base_revision: u64) -> ModelResult<Self> {
        check_kind(&base_id, EntityType::Sense)?;
        Ok(Self {
            base_id,
            base_revision: Some(base_revision),
            glosses: TermUpdateBuilder::new(),
            statements: StatementUpdateBuilder::new(),
        })
    }

    /// Stages a gloss upsert.
    pub fn set_gloss(&mut self, term: Term) -> &mut Self {
        self.glosses.put(term);
        self
    }

    /// Stages a gloss removal.
    pub fn remove_gloss(&mut self, language: impl Into<String>) -> &mut Self {
        self.glosses.remove(language);
        self
    }

    statement_builder_methods!();

    /// Returns the normalized update.
    pub fn build(&self) -> SenseUpdate {
        SenseUpdate {
            base_id: self.base_id.clone(),
            base_revision: self.base_revision,
            glosses: self.glosses.build(),
            statements: self.statements.build(),
        }
    }
}

/// Changes to a media info entity's labels and statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaInfoUpdate {
    base_id: EntityId,
    base_revision: Option<u64>,
    labels: TermUpdate,
    statements: StatementUpdate,
}

impl MediaInfoUpdate {
    base_accessors!();

    /// Returns the staged label changes.
    pub fn labels(&self) -> &TermUpdate {
        &self.labels
    }

    /// Returns true when the update stages no changes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.statements.is_empty()
    }
}

/// Staged accumulator for a [`MediaInfoUpdate`].
#[derive(Debug, Clone)]
pub struct MediaInfoUpdateBuilder {
    base_id: EntityId,
    base_revision: Option<u64>,
    labels: TermUpdateBuilder,
    statements: StatementUpdateBuilder,
}

impl MediaInfoUpdateBuilder {
    /// Starts an update of an existing media info entity.
    pub fn for_entity(base_id: EntityId, base_revision: u64) -> ModelResult<Self> {
        check_kind(&base_id, EntityType::MediaInfo)?;
        Ok(Self {
            base_id,
            base_revision: Some(base_revision),
            labels: TermUpdateBuilder::new(),
            statements: StatementUpdateBuilder::new(),
        })
    }

    /// Stages a label upsert.
    pub fn set_label(&mut self, term: Term) -> &mut Self {
        self.labels.put(term);
        self
    }

    /// Stages a label removal.
    pub fn remove_label(&mut self, language: impl Into<String>) -> &mut Self {
        self.labels.remove(language);
        self
    }

    statement_builder_methods!();

    /// Returns the normalized update.
    pub fn build(&self) -> MediaInfoUpdate {
        MediaInfoUpdate {
            base_id: self.base_id.clone(),
            base_revision: self.base_revision,
            labels: self.labels.build(),
            statements: self.statements.build(),
        }
    }
}

/// Any entity update.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityUpdate {
    /// An item update.
    Item(ItemUpdate),
    /// A property update.
    Property(PropertyUpdate),
    /// A lexeme update.
    Lexeme(LexemeUpdate),
    /// A form update.
    Form(FormUpdate),
    /// A sense update.
    Sense(SenseUpdate),
    /// A media info update.
    MediaInfo(MediaInfoUpdate),
}

impl EntityUpdate {
    /// Returns the id of the entity being updated.
    pub fn base_id(&self) -> &EntityId {
        match self {
            Self::Item(update) => update.base_id(),
            Self::Property(update) => update.base_id(),
            Self::Lexeme(update) => update.base_id(),
            Self::Form(update) => update.base_id(),
            Self::Sense(update) => update.base_id(),
            Self::MediaInfo(update) => update.base_id(),
        }
    }

    /// Returns the revision the update is based on, if any.
    pub fn base_revision(&self) -> Option<u64> {
        match self {
            Self::Item(update) => update.base_revision(),
            Self::Property(update) => update.base_revision(),
            Self::Lexeme(update) => update.base_revision(),
            Self::Form(update) => update.base_revision(),
            Self::Sense(update) => update.base_revision(),
            Self::MediaInfo(update) => update.base_revision(),
        }
    }

    /// Returns the staged statement changes.
    pub fn statements(&self) -> &StatementUpdate {
        match self {
            Self::Item(update) => update.statements(),
            Self::Property(update) => update.statements(),
            Self::Lexeme(update) => update.statements(),
            Self::Form(update) => update.statements(),
            Self::Sense(update) => update.statements(),
            Self::MediaInfo(update) => update.statements(),
        }
    }

    /// Returns true when the update stages no changes.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Item(update) => update.is_empty(),
            Self::Property(update) => update.is_empty(),
            Self::Lexeme(update) => update.is_empty(),
            Self::Form(update) => update.is_empty(),
            Self::Sense(update) => update.is_empty(),
            Self::MediaInfo(update) => update.is_empty(),
        }
    }
}

impl From<ItemUpdate> for EntityUpdate {
    fn from(update: ItemUpdate) -> Self {
        Self::Item(update)
    }
}

impl From<PropertyUpdate> for EntityUpdate {
    fn from(update: PropertyUpdate) -> Self {
        Self::Property(update)
    }
}

impl From<LexemeUpdate> for EntityUpdate {
    fn from(update: LexemeUpdate) -> Self {
        Self::Lexeme(update)
    }
}

impl From<FormUpdate> for EntityUpdate {
    fn from(update: FormUpdate) -> Self {
        Self::Form(update)
    }
}

impl From<SenseUpdate> for EntityUpdate {
    fn from(update: SenseUpdate) -> Self {
        Self::Sense(update)
    }
}

impl From<MediaInfoUpdate> for EntityUpdate {
    fn from(update: MediaInfoUpdate) -> Self {
        Self::MediaInfo(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbkit_datamodel::Snak;

    const SITE: &str = "http://www.wikidata.org/entity/";

    fn q42() -> EntityId {
        EntityId::parse("Q42", SITE).unwrap()
    }

    #[test]
    fn builder_rejects_wrong_kind() {
        let p31 = EntityId::parse("P31", SITE).unwrap();
        assert!(ItemUpdateBuilder::for_entity(p31.clone(), 1).is_err());
        assert!(PropertyUpdateBuilder::for_entity(p31, 1).is_ok());
    }

    #[test]
    fn added_statement_subject_is_rewritten() {
        let other = EntityId::parse("Q1", SITE).unwrap();
        let p31 = EntityId::parse("P31", SITE).unwrap();
        let mut builder = ItemUpdateBuilder::for_entity(q42(), 7).unwrap();
        builder.add_statement(Statement::draft(other, Snak::some_value(p31)));
        let update = builder.build();
        assert_eq!(update.statements().added()[0].subject(), &q42());
    }

    #[test]
    fn create_new_item_has_no_base_revision() {
        let builder = ItemUpdateBuilder::for_new(SITE);
        let update = builder.build();
        assert!(update.base_id().is_placeholder());
        assert_eq!(update.base_revision(), None);
    }

    #[test]
    fn emptiness_tracks_all_sections() {
        let mut builder = ItemUpdateBuilder::for_entity(q42(), 7).unwrap();
        assert!(builder.build().is_empty());
        builder.add_alias("en", "DNA").remove_alias("en", "DNA");
        assert!(builder.build().is_empty());
        builder.set_label(Term::new("en", "Douglas Adams"));
        assert!(!builder.build().is_empty());
    }

    #[test]
    fn entity_update_dispatch() {
        let mut builder = LexemeUpdateBuilder::for_entity(
            EntityId::parse("L21", SITE).unwrap(),
            9,
        )
        .unwrap();
        builder.set_lemma(Term::new("en", "walk"));
        let update = EntityUpdate::from(builder.build());
        assert_eq!(update.base_revision(), Some(9));
        assert!(!update.is_empty());
        assert!(update.statements().is_empty());
    }
}
