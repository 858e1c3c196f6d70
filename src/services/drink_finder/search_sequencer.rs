use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard,
    },
};

use tokio_util::sync::CancellationToken;
use tracing::debug;

struct Slot {
    seq: u64,
    cancel: CancellationToken,
}

/// Issued per search. Holds the sequence id and the token that fires when a
/// newer search for the same session starts. Dropping it releases the
/// session slot, also when the search future is dropped mid-flight.
pub struct SearchTicket<'a> {
    pub seq: u64,
    session: Option<String>,
    cancel: CancellationToken,
    sequencer: &'a SearchSequencer,
}

impl SearchTicket<'_> {
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }
}

impl Drop for SearchTicket<'_> {
    fn drop(&mut self) {
        self.sequencer.release(self);
    }
}

/// Hands out monotonically increasing search ids and keeps only the latest
/// one per session authoritative.
#[derive(Default)]
pub struct SearchSequencer {
    next_seq: AtomicU64,
    sessions: Mutex<HashMap<String, Slot>>,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Starts a search. Any outstanding search for the same session is
    /// cancelled. Searches without a session never supersede each other.
    pub fn begin(&self, session: Option<&str>) -> SearchTicket<'_> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let cancel = CancellationToken::new();

        if let Some(session) = session {
            let previous = self.sessions().insert(
                session.to_string(),
                Slot {
                    seq,
                    cancel: cancel.clone(),
                },
            );

            if let Some(previous) = previous {
                debug!(
                    "Search {} supersedes search {} for session {}",
                    seq, previous.seq, session
                );
                previous.cancel.cancel();
            }
        }

        SearchTicket {
            seq,
            session: session.map(str::to_string),
            cancel,
            sequencer: self,
        }
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        match ticket.session {
            Some(ref session) => self
                .sessions()
                .get(session)
                .is_some_and(|slot| slot.seq == ticket.seq),
            None => true,
        }
    }

    /// Drops the session slot if `ticket` still owns it.
    fn release(&self, ticket: &SearchTicket) {
        if let Some(ref session) = ticket.session {
            let mut sessions = self.sessions();
            if sessions.get(session).is_some_and(|s| s.seq == ticket.seq) {
                sessions.remove(session);
            }
        }
    }

    #[cfg(test)]
    pub fn active_sessions(&self) -> usize {
        self.sessions().len()
    }
}
