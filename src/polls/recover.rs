use super::format::{Markup, PollFormat};
use super::session::PollSession;
use crate::utils::logging::log_recovery_skip;

/// Rebuilds a [`PollSession`] from text previously produced by
/// [`MessageRenderer`](super::render::MessageRenderer).
///
/// Used only when the store has no record for a message, typically after a
/// restart. This is lossy: it trusts that voter names neither start with a
/// marker nor contain line breaks, and that no body line equals the header
/// while votes are shown. Formatting the chat client stripped from the body is
/// not restored.
#[derive(Debug, Clone, Default)]
pub struct StateRecoverer {
    format: PollFormat,
    markup: Markup,
}

impl StateRecoverer {
    pub fn new(format: PollFormat, markup: Markup) -> Self {
        Self { format, markup }
    }

    /// Never fails; vote lines it cannot classify are logged and dropped.
    pub fn recover(&self, rendered_text: &str) -> PollSession {
        self.recover_lines(rendered_text, None)
    }

    /// Like [`recover`](Self::recover), but body lines are taken verbatim from
    /// `formatted_text`, the same message re-rendered in the target markup.
    /// Header and vote lines are still read from `plain_text`. Falls back to
    /// escaping the plain body when the two texts disagree on line count.
    pub fn recover_formatted(&self, plain_text: &str, formatted_text: &str) -> PollSession {
        let formatted: Vec<&str> = formatted_text.lines().collect();
        if formatted.len() == plain_text.lines().count() {
            self.recover_lines(plain_text, Some(formatted.as_slice()))
        } else {
            tracing::warn!(
                "RECOVERY: formatted text has {} lines, plain text {}; body formatting dropped",
                formatted.len(),
                plain_text.lines().count()
            );
            self.recover_lines(plain_text, None)
        }
    }

    fn recover_lines(&self, rendered_text: &str, formatted: Option<&[&str]>) -> PollSession {
        let lines: Vec<&str> = rendered_text.lines().collect();
        let body_from = |end: usize| -> Vec<String> {
            match formatted {
                Some(formatted) => formatted[..end].iter().map(|l| l.to_string()).collect(),
                None => lines[..end].iter().map(|l| self.markup.escape(l)).collect(),
            }
        };

        // Vote lines always begin with a marker, so the last header match is
        // the real one even if the body happens to contain the header text.
        let Some(header_index) = lines.iter().rposition(|l| *l == self.format.header()) else {
            return PollSession::new(body_from(lines.len()));
        };

        let mut body_end = header_index;
        if body_end > 0 && lines[body_end - 1].trim().is_empty() {
            body_end -= 1;
        }

        let mut session = PollSession::new(body_from(body_end));
        for (offset, line) in lines[header_index + 1..].iter().enumerate() {
            let line_no = header_index + offset + 2;
            if line.trim().is_empty() {
                continue;
            }
            let Some((token, voter)) = line.split_once(' ') else {
                log_recovery_skip(line_no, line, "missing marker separator");
                continue;
            };
            let Some(choice) = self.format.choice_for_marker(token) else {
                log_recovery_skip(line_no, line, "unknown marker");
                continue;
            };
            if voter.is_empty() {
                log_recovery_skip(line_no, line, "empty voter");
                continue;
            }
            if session.stance_of(voter).is_some() {
                log_recovery_skip(line_no, line, "voter listed twice");
                continue;
            }
            session.push_voter(choice, voter.to_string());
        }
        session
    }
}
