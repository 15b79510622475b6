//! Statements, ranks, qualifiers and references.

use crate::error::{ModelError, ModelResult};
use crate::id::EntityId;
use crate::snak::Snak;

/// The rank of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rank {
    /// The preferred statement for its property.
    Preferred,
    /// A normal statement.
    #[default]
    Normal,
    /// A deprecated statement.
    Deprecated,
}

impl Rank {
    /// Returns the rank name used on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Rank::Preferred => "preferred",
            Rank::Normal => "normal",
            Rank::Deprecated => "deprecated",
        }
    }

    /// Looks up a rank from its wire name.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "preferred" => Some(Rank::Preferred),
            "normal" => Some(Rank::Normal),
            "deprecated" => Some(Rank::Deprecated),
            _ => None,
        }
    }
}

/// An ordered list of snaks sharing one property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnakGroup {
    property: EntityId,
    snaks: Vec<Snak>,
}

impl SnakGroup {
    /// Creates a snak group for a property.
    pub fn new(property: EntityId, snaks: Vec<Snak>) -> Self {
        Self { property, snaks }
    }

    /// Returns the shared property.
    pub fn property(&self) -> &EntityId {
        &self.property
    }

    /// Returns the snaks in order.
    pub fn snaks(&self) -> &[Snak] {
        &self.snaks
    }
}

/// A reference supporting a statement: ordered snak groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    snak_groups: Vec<SnakGroup>,
}

impl Reference {
    /// Creates a reference from its snak groups.
    pub fn new(snak_groups: Vec<SnakGroup>) -> Self {
        Self { snak_groups }
    }

    /// Returns the snak groups in order.
    pub fn snak_groups(&self) -> &[SnakGroup] {
        &self.snak_groups
    }
}

/// A statement: a main snak plus qualifiers, references and rank,
/// owned by a subject entity.
///
/// A statement without an id is a draft that has not been sent to the
/// remote store yet. Once assigned, ids have the form
/// `<subjectId>$<opaque-token>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    id: Option<String>,
    rank: Rank,
    mainsnak: Snak,
    qualifiers: Vec<SnakGroup>,
    references: Vec<Reference>,
    subject: EntityId,
}

impl Statement {
    /// Creates a draft statement with normal rank and no qualifiers
    /// or references.
    pub fn draft(subject: EntityId, mainsnak: Snak) -> Self {
        Self {
            id: None,
            rank: Rank::Normal,
            mainsnak,
            qualifiers: Vec::new(),
            references: Vec::new(),
            subject,
        }
    }

    /// Returns a copy with the given id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns a copy without an id (a draft).
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Returns a copy with the given rank.
    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self
    }

    /// Returns a copy with the given qualifier groups.
    pub fn with_qualifiers(mut self, qualifiers: Vec<SnakGroup>) -> Self {
        self.qualifiers = qualifiers;
        self
    }

    /// Returns a copy with the given references.
    pub fn with_references(mut self, references: Vec<Reference>) -> Self {
        self.references = references;
        self
    }

    /// Returns a copy owned by a different subject.
    pub fn with_subject(mut self, subject: EntityId) -> Self {
        self.subject = subject;
        self
    }

    /// Returns the statement id, or `None` for a draft.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns true if this statement has not been assigned an id.
    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    /// Returns the rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the main snak.
    pub fn mainsnak(&self) -> &Snak {
        &self.mainsnak
    }

    /// Returns the property of the main snak.
    pub fn property(&self) -> &EntityId {
        self.mainsnak.property()
    }

    /// Returns the qualifier groups in order.
    pub fn qualifiers(&self) -> &[SnakGroup] {
        &self.qualifiers
    }

    /// Returns the references in order.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Returns the owning subject.
    pub fn subject(&self) -> &EntityId {
        &self.subject
    }
}

/// A non-empty ordered run of statements sharing one main-snak
/// property.
///
/// Groups are derived from a flat statement list, never constructed
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementGroup {
    property: EntityId,
    statements: Vec<Statement>,
}

impl StatementGroup {
    /// Returns the shared main-snak property.
    pub fn property(&self) -> &EntityId {
        &self.property
    }

    /// Returns the statements in order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Groups statements by main-snak property, preserving first-seen
    /// property order and statement order within each group.
    ///
    /// Fails with [`ModelError::InvalidStatementGroup`] if any
    /// statement's subject differs from the given subject.
    pub fn group(
        subject: &EntityId,
        statements: impl IntoIterator<Item = Statement>,
    ) -> ModelResult<Vec<StatementGroup>> {
        let mut groups: Vec<StatementGroup> = Vec::new();
        for statement in statements {
            if statement.subject() != subject {
                return Err(ModelError::invalid_statement_group(
                    subject.to_string(),
                    statement.subject().to_string(),
                ));
            }
            let property = statement.property().clone();
            match groups.iter_mut().find(|g| g.property == property) {
                Some(group) => group.statements.push(statement),
                None => groups.push(StatementGroup {
                    property,
                    statements: vec![statement],
                }),
            }
        }
        Ok(groups)
    }
}

/// Appends a statement to its property group, creating the group if
/// needed. The statement's subject is not checked here.
pub(crate) fn add_to_groups(groups: &mut Vec<StatementGroup>, statement: Statement) {
    let property = statement.property().clone();
    match groups.iter_mut().find(|g| g.property == property) {
        Some(group) => group.statements.push(statement),
        None => groups.push(StatementGroup {
            property,
            statements: vec![statement],
        }),
    }
}

/// Removes all statements whose ids are in `ids`, dropping groups that
/// become empty.
pub(crate) fn remove_ids_from_groups(groups: &mut Vec<StatementGroup>, ids: &[String]) {
    for group in groups.iter_mut() {
        group
            .statements
            .retain(|s| s.id().is_none_or(|id| !ids.iter().any(|r| r == id)));
    }
    groups.retain(|g| !g.statements.is_empty());
}

/// Rewrites the subject of every statement in every group.
pub(crate) fn rewrite_subject(groups: &mut [StatementGroup], subject: &EntityId) {
    for group in groups.iter_mut() {
        for statement in group.statements.iter_mut() {
            statement.subject = subject.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DataValue;

    const SITE: &str = "http://www.wikidata.org/entity/";

    fn subject() -> EntityId {
        EntityId::parse("Q42", SITE).unwrap()
    }

    fn string_statement(property: &str, text: &str) -> Statement {
        let p = EntityId::parse(property, SITE).unwrap();
        Statement::draft(subject(), Snak::value(p, DataValue::Text(text.into())))
    }

    #[test]
    fn rank_wire_names() {
        assert_eq!(Rank::Preferred.wire_name(), "preferred");
        assert_eq!(Rank::from_wire_name("deprecated"), Some(Rank::Deprecated));
        assert_eq!(Rank::from_wire_name("unknown"), None);
        assert_eq!(Rank::default(), Rank::Normal);
    }

    #[test]
    fn draft_statement() {
        let statement = string_statement("P1", "x");
        assert!(statement.is_draft());
        assert_eq!(statement.rank(), Rank::Normal);
        assert_eq!(statement.property().id(), Some("P1"));

        let with_id = statement.clone().with_id("Q42$guid");
        assert!(!with_id.is_draft());
        assert_eq!(with_id.without_id(), statement);
    }

    #[test]
    fn grouping_preserves_order() {
        let statements = vec![
            string_statement("P1", "a"),
            string_statement("P2", "b"),
            string_statement("P1", "c"),
        ];
        let groups = StatementGroup::group(&subject(), statements).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].property().id(), Some("P1"));
        assert_eq!(groups[0].statements().len(), 2);
        assert_eq!(groups[1].property().id(), Some("P2"));
    }

    #[test]
    fn grouping_rejects_foreign_subject() {
        let other = EntityId::parse("Q1", SITE).unwrap();
        let p = EntityId::parse("P1", SITE).unwrap();
        let foreign = Statement::draft(other, Snak::value(p, DataValue::Text("x".into())));

        let result = StatementGroup::group(&subject(), vec![foreign]);
        assert!(matches!(
            result,
            Err(ModelError::InvalidStatementGroup { .. })
        ));
    }

    #[test]
    fn remove_ids_drops_empty_groups() {
        let mut groups = StatementGroup::group(
            &subject(),
            vec![string_statement("P1", "a").with_id("Q42$a")],
        )
        .unwrap();
        remove_ids_from_groups(&mut groups, &["Q42$a".to_string()]);
        assert!(groups.is_empty());
    }

    #[test]
    fn remove_ids_keeps_drafts() {
        let mut groups =
            StatementGroup::group(&subject(), vec![string_statement("P1", "a")]).unwrap();
        remove_ids_from_groups(&mut groups, &["Q42$a".to_string()]);
        assert_eq!(groups.len(), 1);
    }
}
