use super::format::{Markup, PollFormat};
use super::session::{Choice, PollSession};

/// Serializes a [`PollSession`] into display text.
///
/// Layout: the body lines unchanged, then, once anyone has voted, a blank line,
/// the section header and one `<marker> <voter>` line per voter with all
/// option A voters ahead of option B voters.
#[derive(Debug, Clone, Default)]
pub struct MessageRenderer {
    format: PollFormat,
    markup: Markup,
}

impl MessageRenderer {
    pub fn new(format: PollFormat, markup: Markup) -> Self {
        Self { format, markup }
    }

    pub fn render(&self, session: &PollSession) -> String {
        self.render_lines(session).join("\n")
    }

    pub fn render_lines(&self, session: &PollSession) -> Vec<String> {
        let mut lines = session.body().to_vec();

        if !session.has_votes() {
            return lines;
        }

        lines.push(String::new());
        lines.push(self.markup.header(self.format.header()));
        for choice in [Choice::OptionA, Choice::OptionB] {
            let marker = self.format.marker(choice);
            for voter in session.voters(choice) {
                lines.push(format!("{} {}", marker, self.markup.escape(voter)));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polls::vote::VoteProcessor;

    fn sample_session() -> PollSession {
        PollSession::new(vec!["Title".to_string(), "Pizza or pasta?".to_string()])
    }

    #[test]
    fn test_render_without_votes_is_body_only() {
        let renderer = MessageRenderer::default();
        assert_eq!(renderer.render(&sample_session()), "Title\nPizza or pasta?");
    }

    #[test]
    fn test_render_lists_a_before_b() {
        let renderer = MessageRenderer::default();
        let mut session = sample_session();
        VoteProcessor::apply(&mut session, "Bob", Choice::OptionB);
        VoteProcessor::apply(&mut session, "Alice", Choice::OptionA);
        VoteProcessor::apply(&mut session, "Carol", Choice::OptionB);

        assert_eq!(
            renderer.render(&session),
            "Title\nPizza or pasta?\n\nChoices\n🔴 Alice\n🔵 Bob\n🔵 Carol"
        );
    }

    #[test]
    fn test_render_markdown_escapes_voters_only() {
        let renderer = MessageRenderer::new(PollFormat::default(), Markup::MarkdownV2);
        let mut session = PollSession::new(vec!["*Bold title*".to_string()]);
        VoteProcessor::apply(&mut session, "Mr. Smith", Choice::OptionA);

        assert_eq!(
            renderer.render(&session),
            "*Bold title*\n\n*Choices*\n🔴 Mr\\. Smith"
        );
    }
}
