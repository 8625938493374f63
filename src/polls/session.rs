use std::fmt;

/// One of the two stances a voter can take on a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    OptionA,
    OptionB,
}

impl Choice {
    /// Maps inline keyboard callback data to a choice.
    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "red" => Some(Choice::OptionA),
            "blue" => Some(Choice::OptionB),
            _ => None,
        }
    }

    pub fn callback_data(self) -> &'static str {
        match self {
            Choice::OptionA => "red",
            Choice::OptionB => "blue",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::OptionA => write!(f, "A"),
            Choice::OptionB => write!(f, "B"),
        }
    }
}

/// Identifies a rendered poll message. Message ids are only unique within a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollKey {
    pub chat_id: i64,
    pub message_id: i32,
}

impl PollKey {
    pub fn new(chat_id: i64, message_id: i32) -> Self {
        Self { chat_id, message_id }
    }
}

impl fmt::Display for PollKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.chat_id, self.message_id)
    }
}

/// Tally state for one rendered poll message.
///
/// `body` is fixed at creation. Voter lists keep arrival order and a voter
/// appears in at most one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollSession {
    body: Vec<String>,
    voters_a: Vec<String>,
    voters_b: Vec<String>,
}

impl PollSession {
    pub fn new(body: Vec<String>) -> Self {
        Self {
            body,
            voters_a: Vec::new(),
            voters_b: Vec::new(),
        }
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn voters_a(&self) -> &[String] {
        &self.voters_a
    }

    pub fn voters_b(&self) -> &[String] {
        &self.voters_b
    }

    pub fn voters(&self, choice: Choice) -> &[String] {
        match choice {
            Choice::OptionA => &self.voters_a,
            Choice::OptionB => &self.voters_b,
        }
    }

    pub fn has_votes(&self) -> bool {
        !self.voters_a.is_empty() || !self.voters_b.is_empty()
    }

    /// The stance a voter already holds, if any.
    pub fn stance_of(&self, voter_id: &str) -> Option<Choice> {
        if self.voters_a.iter().any(|v| v == voter_id) {
            Some(Choice::OptionA)
        } else if self.voters_b.iter().any(|v| v == voter_id) {
            Some(Choice::OptionB)
        } else {
            None
        }
    }

    pub fn total_votes(&self) -> usize {
        self.voters_a.len() + self.voters_b.len()
    }

    // Callers must check `stance_of` first; see `VoteProcessor::apply`.
    pub(crate) fn push_voter(&mut self, choice: Choice, voter_id: String) {
        match choice {
            Choice::OptionA => self.voters_a.push(voter_id),
            Choice::OptionB => self.voters_b.push(voter_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_from_callback_data() {
        assert_eq!(Choice::from_callback_data("red"), Some(Choice::OptionA));
        assert_eq!(Choice::from_callback_data("blue"), Some(Choice::OptionB));
        assert_eq!(Choice::from_callback_data("green"), None);
        assert_eq!(Choice::from_callback_data(""), None);
    }

    #[test]
    fn test_choice_callback_data_matches_parser() {
        for choice in [Choice::OptionA, Choice::OptionB] {
            assert_eq!(Choice::from_callback_data(choice.callback_data()), Some(choice));
        }
    }

    #[test]
    fn test_stance_of() {
        let mut session = PollSession::new(vec!["Pizza or pasta?".to_string()]);
        session.push_voter(Choice::OptionA, "Alice".to_string());
        session.push_voter(Choice::OptionB, "Bob".to_string());

        assert_eq!(session.stance_of("Alice"), Some(Choice::OptionA));
        assert_eq!(session.stance_of("Bob"), Some(Choice::OptionB));
        assert_eq!(session.stance_of("Carol"), None);
        assert_eq!(session.total_votes(), 2);
        assert!(session.has_votes());
    }

    #[test]
    fn test_poll_key_display() {
        assert_eq!(PollKey::new(-100123, 42).to_string(), "-100123/42");
    }
}
