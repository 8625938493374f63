use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::session::{PollKey, PollSession};

/// Slot contents; `None` until the session is created or recovered.
type Slot = Arc<Mutex<Option<PollSession>>>;

struct Entry {
    slot: Slot,
    touched: Instant,
}

/// In-memory registry of poll sessions keyed by message.
///
/// The map lock is only held to look up or insert a slot. Reads and writes of a
/// session run under that session's own lock, so votes on different messages
/// never wait on each other.
pub struct PollStore {
    entries: Mutex<HashMap<PollKey, Entry>>,
    capacity: usize,
    idle_ttl: Duration,
}

impl PollStore {
    pub fn new(capacity: usize, idle_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            idle_ttl,
        }
    }

    pub fn get(&self, key: &PollKey) -> Option<PollSession> {
        let slot = self.entries.lock().get(key).map(|e| e.slot.clone())?;
        let session = slot.lock().clone();
        session
    }

    pub fn put(&self, key: PollKey, session: PollSession) {
        let slot = self.slot(key);
        *slot.lock() = Some(session);
    }

    /// Runs the get-or-recover, mutate, store-back sequence for one message as a
    /// single critical section.
    ///
    /// `recover` is only called when the store has no session for `key`.
    pub fn with_session<R>(
        &self,
        key: PollKey,
        recover: impl FnOnce() -> PollSession,
        f: impl FnOnce(&mut PollSession) -> R,
    ) -> R {
        let slot = self.slot(key);
        let mut guard = slot.lock();
        let session = guard.get_or_insert_with(recover);
        f(session)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops sessions nobody touched within the idle TTL. Returns how many went.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, e| now.saturating_duration_since(e.touched) < self.idle_ttl);
        before - entries.len()
    }

    fn slot(&self, key: PollKey) -> Slot {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get_mut(&key) {
            entry.touched = now;
            return entry.slot.clone();
        }

        if entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.touched)
                .map(|(k, _)| *k);
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                tracing::debug!("Poll store full, evicted least recently used poll {}", oldest);
            }
        }

        let slot: Slot = Arc::new(Mutex::new(None));
        entries.insert(
            key,
            Entry {
                slot: slot.clone(),
                touched: now,
            },
        );
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polls::session::Choice;
    use crate::polls::vote::{VoteOutcome, VoteProcessor};

    fn store() -> PollStore {
        PollStore::new(100, Duration::from_secs(3600))
    }

    #[test]
    fn test_get_missing_is_none() {
        assert!(store().get(&PollKey::new(1, 1)).is_none());
    }

    #[test]
    fn test_put_then_get() {
        let store = store();
        let key = PollKey::new(-42, 7);
        store.put(key, PollSession::new(vec!["Q".to_string()]));

        assert_eq!(store.get(&key), Some(PollSession::new(vec!["Q".to_string()])));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_same_message_id_in_two_chats_does_not_collide() {
        let store = store();
        store.put(PollKey::new(1, 10), PollSession::new(vec!["one".to_string()]));
        store.put(PollKey::new(2, 10), PollSession::new(vec!["two".to_string()]));

        assert_eq!(store.get(&PollKey::new(1, 10)).map(|s| s.body().to_vec()), Some(vec!["one".to_string()]));
        assert_eq!(store.get(&PollKey::new(2, 10)).map(|s| s.body().to_vec()), Some(vec!["two".to_string()]));
    }

    #[test]
    fn test_with_session_recovers_only_when_absent() {
        let store = store();
        let key = PollKey::new(1, 1);
        store.put(key, PollSession::new(vec!["stored".to_string()]));

        let body = store.with_session(
            key,
            || PollSession::new(vec!["recovered".to_string()]),
            |s| s.body().to_vec(),
        );
        assert_eq!(body, vec!["stored".to_string()]);

        let other = PollKey::new(1, 2);
        let outcome = store.with_session(
            other,
            || PollSession::new(vec!["recovered".to_string()]),
            |s| VoteProcessor::apply(s, "Alice", Choice::OptionA),
        );
        assert_eq!(outcome, VoteOutcome::Accepted);
        let recovered = store.get(&other).map(|s| (s.body().to_vec(), s.voters_a().to_vec()));
        assert_eq!(recovered, Some((vec!["recovered".to_string()], vec!["Alice".to_string()])));
    }

    #[test]
    fn test_capacity_evicts_least_recently_touched() {
        let store = PollStore::new(2, Duration::from_secs(3600));
        store.put(PollKey::new(1, 1), PollSession::default());
        std::thread::sleep(Duration::from_millis(2));
        store.put(PollKey::new(1, 2), PollSession::default());
        std::thread::sleep(Duration::from_millis(2));
        // Touch the first one so the second becomes the oldest.
        store.with_session(PollKey::new(1, 1), PollSession::default, |_| ());
        std::thread::sleep(Duration::from_millis(2));
        store.put(PollKey::new(1, 3), PollSession::default());

        assert_eq!(store.len(), 2);
        assert!(store.get(&PollKey::new(1, 1)).is_some());
        assert!(store.get(&PollKey::new(1, 2)).is_none());
        assert!(store.get(&PollKey::new(1, 3)).is_some());
    }

    #[test]
    fn test_evict_idle() {
        let store = PollStore::new(10, Duration::from_secs(60));
        store.put(PollKey::new(1, 1), PollSession::default());

        assert_eq!(store.evict_idle(Instant::now()), 0);
        assert_eq!(store.evict_idle(Instant::now() + Duration::from_secs(61)), 1);
        assert!(store.is_empty());
    }
}
