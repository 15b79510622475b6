//! Per-language alias add/remove lists.

/// Pending alias changes for one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasChange {
    language: String,
    added: Vec<String>,
    removed: Vec<String>,
}

impl AliasChange {
    fn new(language: String) -> Self {
        Self {
            language,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Returns the language this change targets.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the aliases to add, in first-staged order.
    pub fn added(&self) -> &[String] {
        &self.added
    }

    /// Returns the aliases to remove, in first-staged order.
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// A normalized set of alias changes across languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AliasesUpdate {
    changes: Vec<AliasChange>,
}

impl AliasesUpdate {
    /// Returns an update with no changes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the per-language changes, in the order the languages
    /// were first touched.
    pub fn changes(&self) -> &[AliasChange] {
        &self.changes
    }

    /// Returns true when no change is pending.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Staged accumulator for an [`AliasesUpdate`].
///
/// Duplicate stagings of an equal alias are dropped, keeping the first
/// occurrence. Staging a removal of an alias staged for addition
/// cancels both; staging an addition of an alias staged for removal
/// reinstates it as an addition.
#[derive(Debug, Clone, Default)]
pub struct AliasesUpdateBuilder {
    changes: Vec<AliasChange>,
}

impl AliasesUpdateBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, language: &str) -> &mut AliasChange {
        if let Some(index) = self
            .changes
            .iter()
            .position(|change| change.language == language)
        {
            return &mut self.changes[index];
        }
        self.changes.push(AliasChange::new(language.to_owned()));
        let last = self.changes.len() - 1;
        &mut self.changes[last]
    }

    /// Stages an alias addition.
    pub fn add(&mut self, language: &str, alias: impl Into<String>) -> &mut Self {
        let alias = alias.into();
        let entry = self.entry(language);
        entry.removed.retain(|removed| *removed != alias);
        if !entry.added.contains(&alias) {
            entry.added.push(alias);
        }
        self
    }

    /// Stages an alias removal.
    pub fn remove(&mut self, language: &str, alias: impl Into<String>) -> &mut Self {
        let alias = alias.into();
        let entry = self.entry(language);
        if entry.added.iter().any(|added| *added == alias) {
            entry.added.retain(|added| *added != alias);
            return self;
        }
        if !entry.removed.contains(&alias) {
            entry.removed.push(alias);
        }
        self
    }

    /// Returns the normalized update, dropping languages whose staged
    /// changes cancelled out.
    pub fn build(&self) -> AliasesUpdate {
        AliasesUpdate {
            changes: self
                .changes
                .iter()
                .filter(|change| !change.is_empty())
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_adds_collapse() {
        let mut builder = AliasesUpdateBuilder::new();
        builder.add("en", "DNA").add("en", "DNA");
        let update = builder.build();
        assert_eq!(update.changes().len(), 1);
        assert_eq!(update.changes()[0].added(), ["DNA"]);
    }

    #[test]
    fn add_then_remove_cancels() {
        let mut builder = AliasesUpdateBuilder::new();
        builder.add("en", "DNA").remove("en", "DNA");
        assert!(builder.build().is_empty());
    }

    #[test]
    fn remove_then_add_reinstates() {
        let mut builder = AliasesUpdateBuilder::new();
        builder.remove("en", "DNA").add("en", "DNA");
        let update = builder.build();
        assert_eq!(update.changes()[0].added(), ["DNA"]);
        assert!(update.changes()[0].removed().is_empty());
    }

    #[test]
    fn languages_stay_independent() {
        let mut builder = AliasesUpdateBuilder::new();
        builder.add("en", "DNA").remove("de", "DA");
        let update = builder.build();
        assert_eq!(update.changes().len(), 2);
        assert_eq!(update.changes()[0].language(), "en");
        assert_eq!(update.changes()[1].removed(), ["DA"]);
    }
}
