//! Builds the MarkdownV2 text of each game prompt.
//!
//! Poll bodies are returned as lines without embedded line breaks so the poll
//! renderer can append the vote list below them.

use crate::services::questions::QuestionRecord;
use crate::utils::markdown::{bold, escape_markdown, italic};

pub fn truth_text(prompt: &str) -> String {
    format!("{} {}", bold("Truth:"), escape_markdown(prompt))
}

pub fn dare_text(prompt: &str) -> String {
    format!("{} {}", bold("Dare:"), escape_markdown(prompt))
}

pub fn never_text(prompt: &str) -> String {
    format!("{} {}", bold("Never have I ever"), escape_markdown(prompt))
}

/// `Title: this or that` puts the title in bold on its own line. Every ` or `
/// in the choice line is highlighted.
pub fn this_or_that_body(prompt: &str) -> Vec<String> {
    let mut body = Vec::new();
    let choices = match prompt.split_once(':') {
        Some((title, rest)) => {
            body.push(bold(&escape_markdown(title.trim())));
            rest.trim()
        }
        None => prompt.trim(),
    };
    let highlighted = escape_markdown(choices).replace(" or ", &format!(" {} ", bold("OR")));
    body.push(format!("🔴 {highlighted} 🔵"));
    body
}

pub fn would_you_rather_body(record: &QuestionRecord) -> Vec<String> {
    let mut body = vec![
        italic(&escape_markdown("Would you rather...")),
        String::new(),
        bold(&escape_markdown(&record.title)),
        escape_markdown(&format!(
            "({:.1}%) 🔴 {}",
            record.percent_a,
            capitalize(&record.option_a)
        )),
        escape_markdown(&format!(
            "({:.1}%) 🔵 {}",
            record.percent_b,
            capitalize(&record.option_b)
        )),
    ];

    if !record.extra_info.trim().is_empty() {
        body.push(String::new());
        body.push(bold("More info"));
        body.extend(escaped_lines(&record.extra_info));
    }
    body
}

pub fn press_button_body(record: &QuestionRecord) -> Vec<String> {
    let mut body = vec![
        italic(&escape_markdown("Will you press the button if...")),
        String::new(),
    ];
    body.extend(escaped_lines(&record.option_a));
    body.push(bold(&escape_markdown("but...")));
    body.extend(escaped_lines(&record.option_b));
    body.push(String::new());
    body.push(escape_markdown(&format!(
        "({:.1}%) 🔴 I will press the button.",
        record.percent_a
    )));
    body.push(escape_markdown(&format!(
        "({:.1}%) 🔵 I won't press the button.",
        record.percent_b
    )));
    body
}

fn escaped_lines(text: &str) -> Vec<String> {
    text.lines().map(escape_markdown).collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> QuestionRecord {
        QuestionRecord {
            title: "Snacks".to_string(),
            option_a: "eat pizza".to_string(),
            option_b: "eat pasta".to_string(),
            percent_a: 62.5,
            percent_b: 37.5,
            extra_info: String::new(),
        }
    }

    #[test]
    fn test_simple_prompts() {
        assert_eq!(truth_text("Who was your first crush?"), "*Truth:* Who was your first crush?");
        assert_eq!(dare_text("Sing (loudly)."), "*Dare:* Sing \\(loudly\\)\\.");
        assert_eq!(never_text("been to Paris"), "*Never have I ever* been to Paris");
    }

    #[test]
    fn test_this_or_that_with_title() {
        assert_eq!(
            this_or_that_body("Food: Pizza or pasta"),
            vec!["*Food*".to_string(), "🔴 Pizza *OR* pasta 🔵".to_string()]
        );
    }

    #[test]
    fn test_this_or_that_without_title() {
        assert_eq!(
            this_or_that_body("Cats or dogs"),
            vec!["🔴 Cats *OR* dogs 🔵".to_string()]
        );
    }

    #[test]
    fn test_would_you_rather_body() {
        let body = would_you_rather_body(&record());
        assert_eq!(
            body,
            vec![
                "_Would you rather\\.\\.\\._",
                "",
                "*Snacks*",
                "\\(62\\.5%\\) 🔴 Eat pizza",
                "\\(37\\.5%\\) 🔵 Eat pasta",
            ]
        );
    }

    #[test]
    fn test_would_you_rather_more_info() {
        let mut record = record();
        record.extra_info = "Line one\nLine two!".to_string();
        let body = would_you_rather_body(&record);

        assert_eq!(body[5..], ["", "*More info*", "Line one", "Line two\\!"]);
        assert!(body.iter().all(|l| !l.contains('\n')));
    }

    #[test]
    fn test_press_button_body() {
        let body = press_button_body(&record());
        assert_eq!(body[0], "_Will you press the button if\\.\\.\\._");
        assert_eq!(body[2], "eat pizza");
        assert_eq!(body[3], "*but\\.\\.\\.*");
        assert_eq!(body[4], "eat pasta");
        assert_eq!(body[6], "\\(62\\.5%\\) 🔴 I will press the button\\.");
        assert_eq!(body[7], "\\(37\\.5%\\) 🔵 I won't press the button\\.");
    }
}
