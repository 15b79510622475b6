//! Statement additions, replacements and removals.

use wbkit_datamodel::Statement;

/// Token identifying a draft staged in one builder session.
///
/// Handles are only meaningful against the builder that issued them;
/// cancelling a handle from another builder does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftHandle(u64);

/// A normalized set of statement changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StatementUpdate {
    added: Vec<Statement>,
    replaced: Vec<Statement>,
    removed: Vec<String>,
}

impl StatementUpdate {
    /// Returns an update with no changes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the draft statements to add, in staged order.
    pub fn added(&self) -> &[Statement] {
        &self.added
    }

    /// Returns the replacement statements, carrying persisted ids.
    pub fn replaced(&self) -> &[Statement] {
        &self.replaced
    }

    /// Returns the statement ids to remove, in staged order.
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    /// Returns true when no change is pending.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.replaced.is_empty() && self.removed.is_empty()
    }
}

/// Staged accumulator for a [`StatementUpdate`].
///
/// For a statement id targeted by both a replacement and a removal,
/// the operation staged last wins.
#[derive(Debug, Clone, Default)]
pub struct StatementUpdateBuilder {
    drafts: Vec<(DraftHandle, Statement)>,
    replaced: Vec<Statement>,
    removed: Vec<String>,
    next_handle: u64,
}

impl StatementUpdateBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a draft statement for addition.
    ///
    /// Any id already on the statement is discarded; the server (or
    /// the reduction step) assigns one. The returned handle cancels
    /// this draft via [`cancel`](Self::cancel).
    pub fn add(&mut self, statement: Statement) -> DraftHandle {
        let handle = DraftHandle(self.next_handle);
        self.next_handle += 1;
        self.drafts.push((handle, statement.without_id()));
        handle
    }

    /// Cancels a draft staged in this builder session.
    pub fn cancel(&mut self, handle: DraftHandle) -> &mut Self {
        self.drafts.retain(|(staged, _)| *staged != handle);
        self
    }

    /// Stages a replacement of the persisted statement carrying the
    /// same id. A statement without an id is staged as a draft
    /// addition instead, since there is nothing to replace.
    pub fn replace(&mut self, statement: Statement) -> &mut Self {
        let Some(id) = statement.id().map(str::to_owned) else {
            self.add(statement);
            return self;
        };
        self.removed.retain(|removed| *removed != id);
        self.replaced.retain(|replaced| replaced.id() != Some(id.as_str()));
        self.replaced.push(statement);
        self
    }

    /// Stages a removal of a persisted statement by id.
    pub fn remove(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        self.replaced.retain(|replaced| replaced.id() != Some(id.as_str()));
        if !self.removed.contains(&id) {
            self.removed.push(id);
        }
        self
    }

    /// Returns the normalized update.
    pub fn build(&self) -> StatementUpdate {
        StatementUpdate {
            added: self.drafts.iter().map(|(_, draft)| draft.clone()).collect(),
            replaced: self.replaced.clone(),
            removed: self.removed.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbkit_datamodel::{EntityId, Snak};

    const SITE: &str = "http://www.wikidata.org/entity/";

    fn draft() -> Statement {
        let q42 = EntityId::parse("Q42", SITE).unwrap();
        let p31 = EntityId::parse("P31", SITE).unwrap();
        Statement::draft(q42, Snak::some_value(p31))
    }

    #[test]
    fn cancelled_draft_is_dropped() {
        let mut builder = StatementUpdateBuilder::new();
        let first = builder.add(draft());
        let second = builder.add(draft().with_rank(wbkit_datamodel::Rank::Preferred));
        builder.cancel(first);
        let update = builder.build();
        assert_eq!(update.added().len(), 1);
        assert_eq!(
            update.added()[0].rank(),
            wbkit_datamodel::Rank::Preferred
        );
        let _ = second;
    }

    #[test]
    fn add_strips_statement_id() {
        let mut builder = StatementUpdateBuilder::new();
        builder.add(draft().with_id("Q42$X"));
        assert!(builder.build().added()[0].is_draft());
    }

    #[test]
    fn replace_after_remove_reinstates() {
        let mut builder = StatementUpdateBuilder::new();
        builder.remove("Q42$A").replace(draft().with_id("Q42$A"));
        let update = builder.build();
        assert!(update.removed().is_empty());
        assert_eq!(update.replaced()[0].id(), Some("Q42$A"));
    }

    #[test]
    fn remove_after_replace_discards_replacement() {
        let mut builder = StatementUpdateBuilder::new();
        builder.replace(draft().with_id("Q42$A")).remove("Q42$A");
        let update = builder.build();
        assert!(update.replaced().is_empty());
        assert_eq!(update.removed(), ["Q42$A"]);
    }

    #[test]
    fn removal_order_is_preserved() {
        let mut builder = StatementUpdateBuilder::new();
        builder.remove("Q42$B").remove("Q42$A").remove("Q42$B");
        assert_eq!(builder.build().removed(), ["Q42$B", "Q42$A"]);
    }

    #[test]
    fn replace_without_id_becomes_addition() {
        let mut builder = StatementUpdateBuilder::new();
        builder.replace(draft());
        let update = builder.build();
        assert_eq!(update.added().len(), 1);
        assert!(update.replaced().is_empty());
    }
}
