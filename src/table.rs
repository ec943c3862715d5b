use crate::types::{SatisfactionResponse, SessionRecord};

/// The session table and its derived survey responses.
///
/// Built once by a producer (CSV loader or generator) and then only read:
/// every analysis takes it by reference.
#[derive(Debug, Clone, Default)]
pub struct SessionTable {
    sessions: Vec<SessionRecord>,
    responses: Vec<SatisfactionResponse>,
}

impl SessionTable {
    pub fn new(sessions: Vec<SessionRecord>, responses: Vec<SatisfactionResponse>) -> Self {
        Self { sessions, responses }
    }

    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    pub fn responses(&self) -> &[SatisfactionResponse] {
        &self.responses
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
