use std::sync::Arc;
use std::time::Instant;

use super::format::{Markup, PollFormat};
use super::recover::StateRecoverer;
use super::render::MessageRenderer;
use super::session::{Choice, PollKey, PollSession};
use super::store::PollStore;
use super::vote::{VoteOutcome, VoteProcessor};
use crate::utils::logging::{log_recovery, log_vote};

/// A vote as delivered by the messaging layer.
#[derive(Debug, Clone)]
pub struct VoteEvent {
    pub key: PollKey,
    pub voter_id: String,
    pub choice: Choice,
}

/// What the messaging layer should do after a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    pub outcome: VoteOutcome,
    /// New message text; `None` when nothing changed.
    pub text: Option<String>,
}

/// Entry point of the poll core: creates polls and applies votes.
#[derive(Clone)]
pub struct PollManager {
    store: Arc<PollStore>,
    renderer: MessageRenderer,
    recoverer: StateRecoverer,
}

impl PollManager {
    pub fn new(store: Arc<PollStore>, format: PollFormat, markup: Markup) -> Self {
        Self {
            store,
            renderer: MessageRenderer::new(format.clone(), markup),
            recoverer: StateRecoverer::new(format, markup),
        }
    }

    pub fn store(&self) -> &PollStore {
        &self.store
    }

    /// Builds a fresh session and its initial text. Register it with
    /// [`register`](Self::register) once the message id is known.
    pub fn prepare(&self, body: Vec<String>) -> (PollSession, String) {
        let session = PollSession::new(body);
        let text = self.renderer.render(&session);
        (session, text)
    }

    pub fn register(&self, key: PollKey, session: PollSession) {
        self.store.put(key, session);
        tracing::debug!("Registered poll {}", key);
    }

    /// Applies a vote. `current_text` is the message as the chat shows it now
    /// and is only parsed when the store has no record of the poll.
    ///
    /// Does no I/O; render the returned text to the chat afterwards.
    pub fn cast(&self, event: &VoteEvent, current_text: &str) -> Ballot {
        self.cast_inner(event, current_text, None)
    }

    /// Like [`cast`](Self::cast), with `formatted_text` holding the same
    /// message in the target markup so a recovered body keeps its formatting.
    pub fn cast_formatted(&self, event: &VoteEvent, plain_text: &str, formatted_text: &str) -> Ballot {
        self.cast_inner(event, plain_text, Some(formatted_text))
    }

    fn cast_inner(&self, event: &VoteEvent, plain_text: &str, formatted_text: Option<&str>) -> Ballot {
        let (outcome, text) = self.store.with_session(
            event.key,
            || {
                log_recovery(&event.key);
                match formatted_text {
                    Some(formatted) => self.recoverer.recover_formatted(plain_text, formatted),
                    None => self.recoverer.recover(plain_text),
                }
            },
            |session| {
                let outcome = VoteProcessor::apply(session, &event.voter_id, event.choice);
                let text = match outcome {
                    VoteOutcome::Accepted => Some(self.renderer.render(session)),
                    VoteOutcome::DuplicateVote => None,
                };
                (outcome, text)
            },
        );
        log_vote(&event.key, &event.voter_id, event.choice, outcome);
        Ballot { outcome, text }
    }

    pub fn sweep(&self) -> usize {
        self.store.evict_idle(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn manager() -> PollManager {
        PollManager::new(
            Arc::new(PollStore::new(100, Duration::from_secs(3600))),
            PollFormat::default(),
            Markup::Plain,
        )
    }

    fn vote(key: PollKey, voter: &str, choice: Choice) -> VoteEvent {
        VoteEvent {
            key,
            voter_id: voter.to_string(),
            choice,
        }
    }

    #[test]
    fn test_prepare_renders_body_only() {
        let manager = manager();
        let (session, text) = manager.prepare(vec!["Q".to_string(), "A or B".to_string()]);
        assert!(!session.has_votes());
        assert_eq!(text, "Q\nA or B");
    }

    #[test]
    fn test_cast_on_registered_poll() {
        let manager = manager();
        let key = PollKey::new(5, 9);
        let (session, text) = manager.prepare(vec!["Q".to_string()]);
        manager.register(key, session);

        let ballot = manager.cast(&vote(key, "Alice", Choice::OptionA), &text);
        assert_eq!(ballot.outcome, VoteOutcome::Accepted);
        assert_eq!(ballot.text.as_deref(), Some("Q\n\nChoices\n🔴 Alice"));

        let again = manager.cast(&vote(key, "Alice", Choice::OptionB), "ignored");
        assert_eq!(again, Ballot { outcome: VoteOutcome::DuplicateVote, text: None });
    }

    #[test]
    fn test_cast_recovers_unknown_poll() {
        let manager = manager();
        let key = PollKey::new(5, 10);
        let shown = "Q\n\nChoices\n🔴 Alice";

        let ballot = manager.cast(&vote(key, "Bob", Choice::OptionB), shown);
        assert_eq!(ballot.text.as_deref(), Some("Q\n\nChoices\n🔴 Alice\n🔵 Bob"));

        let duplicate = manager.cast(&vote(key, "Alice", Choice::OptionB), shown);
        assert_eq!(duplicate.outcome, VoteOutcome::DuplicateVote);
    }
}
