//! CSRF token supply.
//!
//! Token acquisition (login, cookie handling) stays outside this
//! crate; the editor only asks for the current token and reports when
//! the server rejected it.

use crate::error::{EditorError, EditorResult};
use parking_lot::Mutex;

/// Supplies the CSRF token sent with every write call.
pub trait TokenProvider: Send + Sync {
    /// Returns the current token.
    fn token(&self) -> EditorResult<String>;

    /// Marks the current token as rejected so the next [`token`]
    /// call returns a fresh one.
    ///
    /// [`token`]: Self::token
    fn invalidate(&self);
}

impl<'a, P: TokenProvider + ?Sized> TokenProvider for &'a P {
    fn token(&self) -> EditorResult<String> {
        (**self).token()
    }

    fn invalidate(&self) {
        (**self).invalidate();
    }
}

/// Serves tokens from a fixed sequence, advancing on invalidation.
#[derive(Debug)]
pub struct StaticTokenProvider {
    tokens: Mutex<Vec<String>>,
    invalidations: Mutex<u32>,
}

impl StaticTokenProvider {
    /// Creates a provider that always serves one token.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_sequence(vec![token.into()])
    }

    /// Creates a provider serving the given tokens in order; each
    /// invalidation discards the current front token.
    pub fn with_sequence(tokens: Vec<String>) -> Self {
        Self {
            tokens: Mutex::new(tokens),
            invalidations: Mutex::new(0),
        }
    }

    /// Returns how many times the token was invalidated.
    pub fn invalidations(&self) -> u32 {
        *self.invalidations.lock()
    }
}

impl TokenProvider for StaticTokenProvider {
    fn token(&self) -> EditorResult<String> {
        self.tokens
            .lock()
            .first()
            .cloned()
            .ok_or_else(|| EditorError::token("token sequence exhausted"))
    }

    fn invalidate(&self) {
        *self.invalidations.lock() += 1;
        let mut tokens = self.tokens.lock();
        if tokens.len() > 1 {
            tokens.remove(0);
        } else {
            tokens.clear();
        }
    }
}
