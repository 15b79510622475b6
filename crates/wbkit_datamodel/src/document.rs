//! Entity documents: one immutable variant per entity kind.
//!
//! Documents are produced by decoding a fetch response or by builders,
//! and are never mutated. Every change is a `with_*` derivation that
//! returns a new document differing only in the requested respect.
//! Equality is fully structural and includes the revision id.

use crate::error::{ModelError, ModelResult};
use crate::id::{EntityId, EntityType};
use crate::statement::{
    add_to_groups, remove_ids_from_groups, rewrite_subject, Statement, StatementGroup,
};
use crate::term::{AliasMap, Term, TermMap};

fn check_kind(id: &EntityId, expected: EntityType) -> ModelResult<()> {
    if id.entity_type() != expected {
        return Err(ModelError::malformed_id(
            id.to_string(),
            format!("{expected} document requires a {expected} id"),
        ));
    }
    Ok(())
}

/// An item: labels, descriptions, aliases and statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemDocument {
    id: EntityId,
    labels: TermMap,
    descriptions: TermMap,
    aliases: AliasMap,
    statements: Vec<StatementGroup>,
    revision_id: u64,
}

impl ItemDocument {
    /// Creates an item document.
    ///
    /// Fails if the id is not an item id or if any statement carries a
    /// different subject.
    pub fn new(
        id: EntityId,
        labels: TermMap,
        descriptions: TermMap,
        aliases: AliasMap,
        statements: Vec<Statement>,
        revision_id: u64,
    ) -> ModelResult<Self> {
        check_kind(&id, EntityType::Item)?;
        let statements = StatementGroup::group(&id, statements)?;
        Ok(Self {
            id,
            labels,
            descriptions,
            aliases,
            statements,
            revision_id,
        })
    }

    /// Creates an empty item document with revision id zero.
    pub fn empty(id: EntityId) -> ModelResult<Self> {
        Self::new(
            id,
            TermMap::new(),
            TermMap::new(),
            AliasMap::new(),
            Vec::new(),
            0,
        )
    }

    /// Returns the entity id.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the labels.
    pub fn labels(&self) -> &TermMap {
        &self.labels
    }

    /// Returns the descriptions.
    pub fn descriptions(&self) -> &TermMap {
        &self.descriptions
    }

    /// Returns the aliases.
    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// Returns the statement groups in order.
    pub fn statement_groups(&self) -> &[StatementGroup] {
        &self.statements
    }

    /// Returns the revision id; zero means "not yet persisted".
    pub fn revision_id(&self) -> u64 {
        self.revision_id
    }

    /// Returns a copy with the given revision id.
    pub fn with_revision_id(mut self, revision_id: u64) -> Self {
        self.revision_id = revision_id;
        self
    }

    /// Returns a copy identified by a new entity id.
    ///
    /// The subject of every contained statement is rewritten to the
    /// new id.
    pub fn with_entity_id(mut self, id: EntityId) -> Self {
        rewrite_subject(&mut self.statements, &id);
        self.id = id;
        self
    }

    /// Returns a copy with a label upserted.
    pub fn with_label(mut self, label: Term) -> Self {
        self.labels.insert(label);
        self
    }

    /// Returns a copy with a description upserted.
    pub fn with_description(mut self, description: Term) -> Self {
        self.descriptions.insert(description);
        self
    }

    /// Returns a copy with the alias list for one language replaced.
    pub fn with_aliases(mut self, language: impl Into<String>, aliases: Vec<String>) -> Self {
        self.aliases.set(language, aliases);
        self
    }

    /// Returns a copy with a statement appended to its property group.
    ///
    /// The statement's subject is rewritten to this document's id.
    pub fn with_statement(mut self, statement: Statement) -> Self {
        add_to_groups(&mut self.statements, statement.with_subject(self.id.clone()));
        self
    }

    /// Returns a copy with all statements matching the ids removed.
    pub fn without_statement_ids(mut self, ids: &[String]) -> Self {
        remove_ids_from_groups(&mut self.statements, ids);
        self
    }
}

/// A property: like an item, plus the datatype of its values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyDocument {
    id: EntityId,
    labels: TermMap,
    descriptions: TermMap,
    aliases: AliasMap,
    datatype: String,
    statements: Vec<StatementGroup>,
    revision_id: u64,
}

impl PropertyDocument {
    /// Creates a property document.
    pub fn new(
        id: EntityId,
        labels: TermMap,
        descriptions: TermMap,
        aliases: AliasMap,
        datatype: impl Into<String>,
        statements: Vec<Statement>,
        revision_id: u64,
    ) -> ModelResult<Self> {
        check_kind(&id, EntityType::Property)?;
        let statements = StatementGroup::group(&id, statements)?;
        Ok(Self {
            id,
            labels,
            descriptions,
            aliases,
            datatype: datatype.into(),
            statements,
            revision_id,
        })
    }

    /// Returns the entity id.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the labels.
    pub fn labels(&self) -> &TermMap {
        &self.labels
    }

    /// Returns the descriptions.
    pub fn descriptions(&self) -> &TermMap {
        &self.descriptions
    }

    /// Returns the aliases.
    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// Returns the wire datatype name, e.g. `"string"` or
    /// `"wikibase-item"`.
    pub fn datatype(&self) -> &str {
        &self.datatype
    }

    /// Returns the statement groups in order.
    pub fn statement_groups(&self) -> &[StatementGroup] {
        &self.statements
    }

    /// Returns the revision id; zero means "not yet persisted".
    pub fn revision_id(&self) -> u64 {
        self.revision_id
    }

    /// Returns a copy with the given revision id.
    pub fn with_revision_id(mut self, revision_id: u64) -> Self {
        self.revision_id = revision_id;
        self
    }

    /// Returns a copy identified by a new entity id, rewriting every
    /// statement's subject.
    pub fn with_entity_id(mut self, id: EntityId) -> Self {
        rewrite_subject(&mut self.statements, &id);
        self.id = id;
        self
    }

    /// Returns a copy with a label upserted.
    pub fn with_label(mut self, label: Term) -> Self {
        self.labels.insert(label);
        self
    }

    /// Returns a copy with a description upserted.
    pub fn with_description(mut self, description: Term) -> Self {
        self.descriptions.insert(description);
        self
    }

    /// Returns a copy with a statement appended, subject rewritten.
    pub fn with_statement(mut self, statement: Statement) -> Self {
        add_to_groups(&mut self.statements, statement.with_subject(self.id.clone()));
        self
    }

    /// Returns a copy with all statements matching the ids removed.
    pub fn without_statement_ids(mut self, ids: &[String]) -> Self {
        remove_ids_from_groups(&mut self.statements, ids);
        self
    }
}

/// A form of a lexeme: representations and grammatical features.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormDocument {
    id: EntityId,
    representations: TermMap,
    grammatical_features: Vec<EntityId>,
    statements: Vec<StatementGroup>,
    revision_id: u64,
}

impl FormDocument {
    /// Creates a form document.
    pub fn new(
        id: EntityId,
        representations: TermMap,
        grammatical_features: Vec<EntityId>,
        statements: Vec<Statement>,
        revision_id: u64,
    ) -> ModelResult<Self> {
        check_kind(&id, EntityType::Form)?;
        let statements = StatementGroup::group(&id, statements)?;
        Ok(Self {
            id,
            representations,
            grammatical_features,
            statements,
            revision_id,
        })
    }

    /// Returns the entity id.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the representations.
    pub fn representations(&self) -> &TermMap {
        &self.representations
    }

    /// Returns the grammatical feature item ids.
    pub fn grammatical_features(&self) -> &[EntityId] {
        &self.grammatical_features
    }

    /// Returns the statement groups in order.
    pub fn statement_groups(&self) -> &[StatementGroup] {
        &self.statements
    }

    /// Returns the revision id; zero means "not yet persisted".
    pub fn revision_id(&self) -> u64 {
        self.revision_id
    }

    /// Returns a copy with the given revision id.
    pub fn with_revision_id(mut self, revision_id: u64) -> Self {
        self.revision_id = revision_id;
        self
    }

    /// Returns a copy identified by a new entity id, rewriting every
    /// statement's subject.
    pub fn with_entity_id(mut self, id: EntityId) -> Self {
        rewrite_subject(&mut self.statements, &id);
        self.id = id;
        self
    }

    /// Returns a copy with a representation upserted.
    pub fn with_representation(mut self, representation: Term) -> Self {
        self.representations.insert(representation);
        self
    }

    /// Returns a copy with a statement appended, subject rewritten.
    pub fn with_statement(mut self, statement: Statement) -> Self {
        add_to_groups(&mut self.statements, statement.with_subject(self.id.clone()));
        self
    }

    /// Returns a copy with all statements matching the ids removed.
    pub fn without_statement_ids(mut self, ids: &[String]) -> Self {
        remove_ids_from_groups(&mut self.statements, ids);
        self
    }
}

/// A sense of a lexeme: glosses and statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenseDocument {
    id: EntityId,
    glosses: TermMap,
    statements: Vec<StatementGroup>,
    revision_id: u64,
}

impl SenseDocument {
    /// Creates a sense document.
    pub fn new(
        id: EntityId,
        glosses: TermMap,
        statements: Vec<Statement>,
        revision_id: u64,
    ) -> ModelResult<Self> {
        check_kind(&id, EntityType::Sense)?;
        let statements = StatementGroup::group(&id, statements)?;
        Ok(Self {
            id,
            glosses,
            statements,
            revision_id,
        })
    }

    /// Returns the entity id.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the glosses.
    pub fn glosses(&self) -> &TermMap {
        &self.glosses
    }

    /// Returns the statement groups in order.
    pub fn statement_groups(&self) -> &[StatementGroup] {
        &self.statements
    }

    /// Returns the revision id; zero means "not yet persisted".
    pub fn revision_id(&self) -> u64 {
        self.revision_id
    }

    /// Returns a copy with the given revision id.
    pub fn with_revision_id(mut self, revision_id: u64) -> Self {
        self.revision_id = revision_id;
        self
    }

    /// Returns a copy identified by a new entity id, rewriting every
    /// statement's subject.
    pub fn with_entity_id(mut self, id: EntityId) -> Self {
        rewrite_subject(&mut self.statements, &id);
        self.id = id;
        self
    }

    /// Returns a copy with a gloss upserted.
    pub fn with_gloss(mut self, gloss: Term) -> Self {
        self.glosses.insert(gloss);
        self
    }

    /// Returns a copy with a statement appended, subject rewritten.
    pub fn with_statement(mut self, statement: Statement) -> Self {
        add_to_groups(&mut self.statements, statement.with_subject(self.id.clone()));
        self
    }

    /// Returns a copy with all statements matching the ids removed.
    pub fn without_statement_ids(mut self, ids: &[String]) -> Self {
        remove_ids_from_groups(&mut self.statements, ids);
        self
    }
}

/// A lexeme: lemmas, lexical category, language, forms and senses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LexemeDocument {
    id: EntityId,
    lemmas: TermMap,
    lexical_category: EntityId,
    language: EntityId,
    statements: Vec<StatementGroup>,
    forms: Vec<FormDocument>,
    senses: Vec<SenseDocument>,
    revision_id: u64,
}

impl LexemeDocument {
    /// Creates a lexeme document.
    ///
    /// The lexical category and language are item ids. Forms and
    /// senses carry their own ids and enforce their own subject
    /// invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EntityId,
        lemmas: TermMap,
        lexical_category: EntityId,
        language: EntityId,
        statements: Vec<Statement>,
        forms: Vec<FormDocument>,
        senses: Vec<SenseDocument>,
        revision_id: u64,
    ) -> ModelResult<Self> {
        check_kind(&id, EntityType::Lexeme)?;
        let statements = StatementGroup::group(&id, statements)?;
        Ok(Self {
            id,
            lemmas,
            lexical_category,
            language,
            statements,
            forms,
            senses,
            revision_id,
        })
    }

    /// Returns the entity id.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the lemmas.
    pub fn lemmas(&self) -> &TermMap {
        &self.lemmas
    }

    /// Returns the lexical category item id.
    pub fn lexical_category(&self) -> &EntityId {
        &self.lexical_category
    }

    /// Returns the language item id.
    pub fn language(&self) -> &EntityId {
        &self.language
    }

    /// Returns the statement groups in order.
    pub fn statement_groups(&self) -> &[StatementGroup] {
        &self.statements
    }

    /// Returns the forms in order.
    pub fn forms(&self) -> &[FormDocument] {
        &self.forms
    }

    /// Returns the senses in order.
    pub fn senses(&self) -> &[SenseDocument] {
        &self.senses
    }

    /// Returns the revision id; zero means "not yet persisted".
    pub fn revision_id(&self) -> u64 {
        self.revision_id
    }

    /// Returns a copy with the given revision id.
    pub fn with_revision_id(mut self, revision_id: u64) -> Self {
        self.revision_id = revision_id;
        self
    }

    /// Returns a copy identified by a new entity id.
    ///
    /// The lexeme's own statements are subject-rewritten; forms and
    /// senses keep their own ids and subjects.
    pub fn with_entity_id(mut self, id: EntityId) -> Self {
        rewrite_subject(&mut self.statements, &id);
        self.id = id;
        self
    }

    /// Returns a copy with a lemma upserted.
    pub fn with_lemma(mut self, lemma: Term) -> Self {
        self.lemmas.insert(lemma);
        self
    }

    /// Returns a copy with a statement appended, subject rewritten.
    pub fn with_statement(mut self, statement: Statement) -> Self {
        add_to_groups(&mut self.statements, statement.with_subject(self.id.clone()));
        self
    }

    /// Returns a copy with all statements matching the ids removed.
    pub fn without_statement_ids(mut self, ids: &[String]) -> Self {
        remove_ids_from_groups(&mut self.statements, ids);
        self
    }
}

/// A media info entity: captions (labels) and statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaInfoDocument {
    id: EntityId,
    labels: TermMap,
    statements: Vec<StatementGroup>,
    revision_id: u64,
}

impl MediaInfoDocument {
    /// Creates a media info document.
    pub fn new(
        id: EntityId,
        labels: TermMap,
        statements: Vec<Statement>,
        revision_id: u64,
    ) -> ModelResult<Self> {
        check_kind(&id, EntityType::MediaInfo)?;
        let statements = StatementGroup::group(&id, statements)?;
        Ok(Self {
            id,
            labels,
            statements,
            revision_id,
        })
    }

    /// Returns the entity id.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the labels.
    pub fn labels(&self) -> &TermMap {
        &self.labels
    }

    /// Returns the statement groups in order.
    pub fn statement_groups(&self) -> &[StatementGroup] {
        &self.statements
    }

    /// Returns the revision id; zero means "not yet persisted".
    pub fn revision_id(&self) -> u64 {
        self.revision_id
    }

    /// Returns a copy with the given revision id.
    pub fn with_revision_id(mut self, revision_id: u64) -> Self {
        self.revision_id = revision_id;
        self
    }

    /// Returns a copy identified by a new entity id, rewriting every
    /// statement's subject.
    pub fn with_entity_id(mut self, id: EntityId) -> Self {
        rewrite_subject(&mut self.statements, &id);
        self.id = id;
        self
    }

    /// Returns a copy with a label upserted.
    pub fn with_label(mut self, label: Term) -> Self {
        self.labels.insert(label);
        self
    }

    /// Returns a copy with a statement appended, subject rewritten.
    pub fn with_statement(mut self, statement: Statement) -> Self {
        add_to_groups(&mut self.statements, statement.with_subject(self.id.clone()));
        self
    }

    /// Returns a copy with all statements matching the ids removed.
    pub fn without_statement_ids(mut self, ids: &[String]) -> Self {
        remove_ids_from_groups(&mut self.statements, ids);
        self
    }
}

/// Any entity document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityDocument {
    /// An item document.
    Item(ItemDocument),
    /// A property document.
    Property(PropertyDocument),
    /// A lexeme document.
    Lexeme(LexemeDocument),
    /// A form document.
    Form(FormDocument),
    /// A sense document.
    Sense(SenseDocument),
    /// A media info document.
    MediaInfo(MediaInfoDocument),
}

impl EntityDocument {
    /// Returns the entity id.
    pub fn id(&self) -> &EntityId {
        match self {
            EntityDocument::Item(d) => d.id(),
            EntityDocument::Property(d) => d.id(),
            EntityDocument::Lexeme(d) => d.id(),
            EntityDocument::Form(d) => d.id(),
            EntityDocument::Sense(d) => d.id(),
            EntityDocument::MediaInfo(d) => d.id(),
        }
    }

    /// Returns the entity type.
    pub fn entity_type(&self) -> EntityType {
        self.id().entity_type()
    }

    /// Returns the revision id; zero means "not yet persisted".
    pub fn revision_id(&self) -> u64 {
        match self {
            EntityDocument::Item(d) => d.revision_id(),
            EntityDocument::Property(d) => d.revision_id(),
            EntityDocument::Lexeme(d) => d.revision_id(),
            EntityDocument::Form(d) => d.revision_id(),
            EntityDocument::Sense(d) => d.revision_id(),
            EntityDocument::MediaInfo(d) => d.revision_id(),
        }
    }

    /// Returns a copy with the given revision id.
    pub fn with_revision_id(self, revision_id: u64) -> Self {
        match self {
            EntityDocument::Item(d) => EntityDocument::Item(d.with_revision_id(revision_id)),
            EntityDocument::Property(d) => {
                EntityDocument::Property(d.with_revision_id(revision_id))
            }
            EntityDocument::Lexeme(d) => EntityDocument::Lexeme(d.with_revision_id(revision_id)),
            EntityDocument::Form(d) => EntityDocument::Form(d.with_revision_id(revision_id)),
            EntityDocument::Sense(d) => EntityDocument::Sense(d.with_revision_id(revision_id)),
            EntityDocument::MediaInfo(d) => {
                EntityDocument::MediaInfo(d.with_revision_id(revision_id))
            }
        }
    }

    /// Returns the statement groups in order.
    pub fn statement_groups(&self) -> &[StatementGroup] {
        match self {
            EntityDocument::Item(d) => d.statement_groups(),
            EntityDocument::Property(d) => d.statement_groups(),
            EntityDocument::Lexeme(d) => d.statement_groups(),
            EntityDocument::Form(d) => d.statement_groups(),
            EntityDocument::Sense(d) => d.statement_groups(),
            EntityDocument::MediaInfo(d) => d.statement_groups(),
        }
    }

    /// Returns a copy with a statement appended, subject rewritten.
    pub fn with_statement(self, statement: Statement) -> Self {
        match self {
            EntityDocument::Item(d) => EntityDocument::Item(d.with_statement(statement)),
            EntityDocument::Property(d) => EntityDocument::Property(d.with_statement(statement)),
            EntityDocument::Lexeme(d) => EntityDocument::Lexeme(d.with_statement(statement)),
            EntityDocument::Form(d) => EntityDocument::Form(d.with_statement(statement)),
            EntityDocument::Sense(d) => EntityDocument::Sense(d.with_statement(statement)),
            EntityDocument::MediaInfo(d) => EntityDocument::MediaInfo(d.with_statement(statement)),
        }
    }

    /// Returns a copy with all statements matching the ids removed.
    pub fn without_statement_ids(self, ids: &[String]) -> Self {
        match self {
            EntityDocument::Item(d) => EntityDocument::Item(d.without_statement_ids(ids)),
            EntityDocument::Property(d) => EntityDocument::Property(d.without_statement_ids(ids)),
            EntityDocument::Lexeme(d) => EntityDocument::Lexeme(d.without_statement_ids(ids)),
            EntityDocument::Form(d) => EntityDocument::Form(d.without_statement_ids(ids)),
            EntityDocument::Sense(d) => EntityDocument::Sense(d.without_statement_ids(ids)),
            EntityDocument::MediaInfo(d) => {
                EntityDocument::MediaInfo(d.without_statement_ids(ids))
            }
        }
    }
}

impl From<ItemDocument> for EntityDocument {
    fn from(doc: ItemDocument) -> Self {
        EntityDocument::Item(doc)
    }
}

impl From<PropertyDocument> for EntityDocument {
    fn from(doc: PropertyDocument) -> Self {
        EntityDocument::Property(doc)
    }
}

impl From<LexemeDocument> for EntityDocument {
    fn from(doc: LexemeDocument) -> Self {
        EntityDocument::Lexeme(doc)
    }
}

impl From<FormDocument> for EntityDocument {
    fn from(doc: FormDocument) -> Self {
        EntityDocument::Form(doc)
    }
}

impl From<SenseDocument> for EntityDocument {
    fn from(doc: SenseDocument) -> Self {
        EntityDocument::Sense(doc)
    }
}

impl From<MediaInfoDocument> for EntityDocument {
    fn from(doc: MediaInfoDocument) -> Self {
        EntityDocument::MediaInfo(doc)
    }
}
