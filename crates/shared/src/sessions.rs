//! In-memory conversation sessions keyed by user id.
//!
//! Each user owns a bounded, insertion-ordered history of turns. The outer map
//! is only locked long enough to find or create a user's slot; the slot itself
//! is guarded by an async mutex so a whole chat exchange (user turn, model
//! call, assistant turn) can run without interleaving with another request for
//! the same user. Sessions live for the lifetime of the store.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::models::ConversationTurn;

pub const DEFAULT_MAX_HISTORY_TURNS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("message text must not be empty")]
    EmptyMessage,
}

#[derive(Debug)]
pub struct Session {
    turns: VecDeque<ConversationTurn>,
    max_turns: usize,
}

impl Session {
    fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_turns + 1),
            max_turns,
        }
    }

    pub fn append_user_message(&mut self, text: &str) -> Result<(), SessionError> {
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        self.turns.push_back(ConversationTurn::user(text));
        self.trim();
        Ok(())
    }

    pub fn append_assistant_message(&mut self, text: &str) {
        self.turns.push_back(ConversationTurn::assistant(text));
        self.trim();
    }

    /// Drops the oldest turns until at most `max_turns` remain.
    pub fn trim(&mut self) {
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    pub fn history(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

pub type SessionGuard = OwnedMutexGuard<Session>;

type SessionSlot = Arc<AsyncMutex<Session>>;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionSlot>>>,
    max_turns: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_TURNS)
    }
}

impl SessionStore {
    /// `max_turns` below one is raised to one so a session can always hold
    /// the latest turn.
    pub fn new(max_turns: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_turns: max_turns.max(1),
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Waits for exclusive access to `user_id`'s session, creating it if this
    /// is the first time the id is seen.
    pub async fn lock(&self, user_id: &str) -> SessionGuard {
        self.slot_or_create(user_id).lock_owned().await
    }

    pub async fn append_user_message(&self, user_id: &str, text: &str) -> Result<(), SessionError> {
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        self.lock(user_id).await.append_user_message(text)
    }

    pub async fn append_assistant_message(&self, user_id: &str, text: &str) {
        self.lock(user_id).await.append_assistant_message(text);
    }

    /// Snapshot of the stored turns, oldest first. Unknown ids yield an empty
    /// history and are not registered.
    pub async fn get_history(&self, user_id: &str) -> Vec<ConversationTurn> {
        match self.slot(user_id) {
            Some(slot) => slot.lock().await.history(),
            None => Vec::new(),
        }
    }

    pub async fn trim(&self, user_id: &str) {
        if let Some(slot) = self.slot(user_id) {
            slot.lock().await.trim();
        }
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.slot(user_id).is_some()
    }

    /// Number of known sessions.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .expect("session map mutex should not be poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, user_id: &str) -> Option<SessionSlot> {
        self.sessions
            .lock()
            .expect("session map mutex should not be poisoned")
            .get(user_id)
            .cloned()
    }

    fn slot_or_create(&self, user_id: &str) -> SessionSlot {
        let mut sessions = self
            .sessions
            .lock()
            .expect("session map mutex should not be poisoned");
        let max_turns = self.max_turns;
        Arc::clone(
            sessions
                .entry(user_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(Session::new(max_turns)))),
        )
    }
}
