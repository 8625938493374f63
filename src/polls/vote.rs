use super::session::{Choice, PollSession};

/// Result of applying a vote to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Accepted,
    /// The voter already holds a stance. Not an error; the session is untouched.
    DuplicateVote,
}

/// Applies vote events to sessions.
pub struct VoteProcessor;

impl VoteProcessor {
    /// Records `voter_id` under `choice` unless they already voted either way.
    ///
    /// Not synchronized on its own; run it inside
    /// [`PollStore::with_session`](super::store::PollStore::with_session).
    pub fn apply(session: &mut PollSession, voter_id: &str, choice: Choice) -> VoteOutcome {
        if session.stance_of(voter_id).is_some() {
            return VoteOutcome::DuplicateVote;
        }
        session.push_voter(choice, voter_id.to_string());
        VoteOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_first_vote() {
        let mut session = PollSession::new(vec!["Q".to_string()]);
        assert_eq!(
            VoteProcessor::apply(&mut session, "Alice", Choice::OptionA),
            VoteOutcome::Accepted
        );
        assert_eq!(session.voters_a(), ["Alice"]);
        assert!(session.voters_b().is_empty());
    }

    #[test]
    fn test_duplicate_vote_leaves_session_unchanged() {
        let mut session = PollSession::new(vec!["Q".to_string()]);
        VoteProcessor::apply(&mut session, "Alice", Choice::OptionA);
        VoteProcessor::apply(&mut session, "Bob", Choice::OptionB);
        let before = session.clone();

        for choice in [Choice::OptionA, Choice::OptionB] {
            assert_eq!(
                VoteProcessor::apply(&mut session, "Alice", choice),
                VoteOutcome::DuplicateVote
            );
            assert_eq!(session, before);
        }
    }

    #[test]
    fn test_arrival_order_is_kept() {
        let mut session = PollSession::new(Vec::new());
        for name in ["Carol", "Alice", "Bob"] {
            VoteProcessor::apply(&mut session, name, Choice::OptionB);
        }
        VoteProcessor::apply(&mut session, "Alice", Choice::OptionA);
        VoteProcessor::apply(&mut session, "Dave", Choice::OptionB);

        assert_eq!(session.voters_b(), ["Carol", "Alice", "Bob", "Dave"]);
        assert!(session.voters_a().is_empty());
    }
}
