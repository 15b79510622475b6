//! Term upserts and removals keyed by language.

use wbkit_datamodel::Term;

/// One pending change to a term in a specific language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermOp {
    /// Sets (or overwrites) the term for its language.
    Put(Term),
    /// Removes the term for a language.
    Remove(String),
}

impl TermOp {
    /// Returns the language this operation targets.
    pub fn language(&self) -> &str {
        match self {
            Self::Put(term) => term.language(),
            Self::Remove(language) => language,
        }
    }
}

/// A normalized set of term changes, at most one per language.
///
/// Operations are kept in the order their languages were last touched,
/// so a later operation on a language supersedes an earlier one and
/// moves to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TermUpdate {
    ops: Vec<TermOp>,
}

impl TermUpdate {
    /// Returns an update with no changes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the pending operations in order.
    pub fn ops(&self) -> &[TermOp] {
        &self.ops
    }

    /// Returns true when no change is pending.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the number of pending operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub(crate) fn push(&mut self, op: TermOp) {
        self.ops.retain(|pending| pending.language() != op.language());
        self.ops.push(op);
    }
}

/// Staged accumulator for a [`TermUpdate`].
#[derive(Debug, Clone, Default)]
pub struct TermUpdateBuilder {
    update: TermUpdate,
}

impl TermUpdateBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages an upsert; supersedes any pending change for the language.
    pub fn put(&mut self, term: Term) -> &mut Self {
        self.update.push(TermOp::Put(term));
        self
    }

    /// Stages a removal; supersedes any pending change for the language.
    pub fn remove(&mut self, language: impl Into<String>) -> &mut Self {
        self.update.push(TermOp::Remove(language.into()));
        self
    }

    /// Returns the normalized update.
    pub fn build(&self) -> TermUpdate {
        self.update.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_op_per_language_wins() {
        let mut builder = TermUpdateBuilder::new();
        builder
            .put(Term::new("en", "first"))
            .put(Term::new("de", "erste"))
            .put(Term::new("en", "second"));
        let update = builder.build();
        assert_eq!(
            update.ops(),
            [
                TermOp::Put(Term::new("de", "erste")),
                TermOp::Put(Term::new("en", "second")),
            ]
        );
    }

    #[test]
    fn removal_cancels_prior_upsert() {
        let mut builder = TermUpdateBuilder::new();
        builder.put(Term::new("en", "hello")).remove("en");
        assert_eq!(builder.build().ops(), [TermOp::Remove("en".into())]);
    }

    #[test]
    fn upsert_cancels_prior_removal() {
        let mut builder = TermUpdateBuilder::new();
        builder.remove("en").put(Term::new("en", "hello"));
        assert_eq!(
            builder.build().ops(),
            [TermOp::Put(Term::new("en", "hello"))]
        );
    }

    #[test]
    fn empty_update() {
        assert!(TermUpdateBuilder::new().build().is_empty());
        assert_eq!(TermUpdate::empty().len(), 0);
    }
}
