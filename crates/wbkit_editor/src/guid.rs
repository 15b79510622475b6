//! Statement GUID generation.

use uuid::Uuid;

/// Produces fresh statement ids of the form `<subjectId>$<token>`.
pub trait GuidGenerator: Send + Sync {
    /// Returns a fresh statement id for a subject.
    fn fresh_guid(&self, subject_id: &str) -> String;
}

impl<'a, G: GuidGenerator + ?Sized> GuidGenerator for &'a G {
    fn fresh_guid(&self, subject_id: &str) -> String {
        (**self).fresh_guid(subject_id)
    }
}

/// Generates ids from uppercase v4 UUIDs, matching the ids the remote
/// service itself assigns.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGuidGenerator;

impl GuidGenerator for RandomGuidGenerator {
    fn fresh_guid(&self, subject_id: &str) -> String {
        let token = Uuid::new_v4().to_string().to_uppercase();
        format!("{subject_id}${token}")
    }
}

/// Generates ids from one fixed token, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedGuidGenerator {
    token: String,
}

impl FixedGuidGenerator {
    /// Creates a generator that always uses the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl GuidGenerator for FixedGuidGenerator {
    fn fresh_guid(&self, subject_id: &str) -> String {
        format!("{subject_id}${}", self.token)
    }
}
