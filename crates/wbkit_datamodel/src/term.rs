//! Terms and language-keyed term collections.

use std::fmt;

/// A (language code, text) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    language: String,
    text: String,
}

impl Term {
    /// Creates a new term.
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }

    /// Returns the language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.text, self.language)
    }
}

/// A set of terms with unique language keys.
///
/// Lookup is by language code; iteration and serialization preserve
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TermMap {
    terms: Vec<Term>,
}

impl TermMap {
    /// Creates an empty term map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a term map from a sequence of terms.
    ///
    /// A later term for an already-present language replaces the
    /// earlier text but keeps the earlier position.
    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Self {
        let mut map = Self::new();
        for term in terms {
            map.insert(term);
        }
        map
    }

    /// Inserts a term, replacing any existing term for its language.
    ///
    /// Replacement keeps the original insertion position.
    pub fn insert(&mut self, term: Term) {
        match self.terms.iter_mut().find(|t| t.language == term.language) {
            Some(existing) => *existing = term,
            None => self.terms.push(term),
        }
    }

    /// Looks up the term for a language code.
    pub fn get(&self, language: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.language == language)
    }

    /// Removes the term for a language code, if present.
    pub fn remove(&mut self, language: &str) -> Option<Term> {
        let index = self.terms.iter().position(|t| t.language == language)?;
        Some(self.terms.remove(index))
    }

    /// Returns true if a term exists for the language code.
    pub fn contains(&self, language: &str) -> bool {
        self.get(language).is_some()
    }

    /// Returns the terms in insertion order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Iterates over the terms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the map holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<Term> for TermMap {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

/// Alias lists keyed by language code, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AliasMap {
    entries: Vec<(String, Vec<String>)>,
}

impl AliasMap {
    /// Creates an empty alias map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the alias list for a language.
    ///
    /// An empty list removes the language entry entirely.
    pub fn set(&mut self, language: impl Into<String>, aliases: Vec<String>) {
        let language = language.into();
        if aliases.is_empty() {
            self.entries.retain(|(lang, _)| *lang != language);
            return;
        }
        match self.entries.iter_mut().find(|(lang, _)| *lang == language) {
            Some((_, existing)) => *existing = aliases,
            None => self.entries.push((language, aliases)),
        }
    }

    /// Returns the alias list for a language.
    pub fn get(&self, language: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, aliases)| aliases.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates over (language, aliases) entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(lang, aliases)| (lang.as_str(), aliases.as_slice()))
    }

    /// Returns the languages that have aliases, in insertion order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(lang, _)| lang.as_str())
    }

    /// Returns true if no language has aliases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
