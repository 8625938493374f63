//! Shared text layout of a rendered poll.
//!
//! [`MessageRenderer`](super::render::MessageRenderer) writes this layout and
//! [`StateRecoverer`](super::recover::StateRecoverer) reads it back, so both are
//! built from the same [`PollFormat`].

use super::session::Choice;
use crate::utils::markdown::{bold, escape_markdown};

pub const DEFAULT_HEADER: &str = "Choices";
pub const DEFAULT_MARKER_A: &str = "🔴";
pub const DEFAULT_MARKER_B: &str = "🔵";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollFormat {
    header: String,
    marker_a: String,
    marker_b: String,
}

impl Default for PollFormat {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER, DEFAULT_MARKER_A, DEFAULT_MARKER_B)
    }
}

impl PollFormat {
    /// Markers must be non-empty, distinct and free of spaces, otherwise vote
    /// lines cannot be split back into marker and voter.
    pub fn new(header: &str, marker_a: &str, marker_b: &str) -> Self {
        Self {
            header: header.to_string(),
            marker_a: marker_a.to_string(),
            marker_b: marker_b.to_string(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn marker(&self, choice: Choice) -> &str {
        match choice {
            Choice::OptionA => &self.marker_a,
            Choice::OptionB => &self.marker_b,
        }
    }

    pub fn choice_for_marker(&self, token: &str) -> Option<Choice> {
        if token == self.marker_a {
            Some(Choice::OptionA)
        } else if token == self.marker_b {
            Some(Choice::OptionB)
        } else {
            None
        }
    }
}

/// Target markup of rendered text.
///
/// Telegram strips MarkdownV2 formatting from the text it hands back, so
/// recovery always parses plain text and re-escapes body lines on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    #[default]
    Plain,
    MarkdownV2,
}

impl Markup {
    pub fn escape(self, text: &str) -> String {
        match self {
            Markup::Plain => text.to_string(),
            Markup::MarkdownV2 => escape_markdown(text),
        }
    }

    pub fn header(self, header: &str) -> String {
        match self {
            Markup::Plain => header.to_string(),
            Markup::MarkdownV2 => bold(header),
        }
    }
}
