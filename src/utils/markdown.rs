//! Helpers for Telegram MarkdownV2 text.

use teloxide::types::{MessageEntity, MessageEntityKind};

/// Characters that carry meaning in MarkdownV2 and must be backslash-escaped.
const SPECIAL_CHARS: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes markdown special characters for MarkdownV2 parsing mode
///
/// # Example
/// ```
/// use conversational_games_bot::utils::markdown::escape_markdown;
///
/// let text = "Hello *world* (test)";
/// let escaped = escape_markdown(text);
/// assert_eq!(escaped, "Hello \\*world\\* \\(test\\)");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Wraps already-escaped text in bold markers.
pub fn bold(escaped: &str) -> String {
    format!("*{escaped}*")
}

/// Wraps already-escaped text in italic markers.
pub fn italic(escaped: &str) -> String {
    format!("_{escaped}_")
}

/// Rebuilds MarkdownV2 source from a message's plain text and its entities.
///
/// Entity offsets and lengths count UTF-16 code units. Only styling entities
/// produce markup; mentions, URLs and the like come back as escaped text.
/// Markers never introduce line breaks, so output lines match input lines.
pub fn markdown_from_entities(text: &str, entities: &[MessageEntity]) -> String {
    let mut sorted: Vec<&MessageEntity> = entities
        .iter()
        .filter(|e| e.length > 0 && markers(&e.kind).is_some())
        .collect();
    sorted.sort_by(|a, b| a.offset.cmp(&b.offset).then(b.length.cmp(&a.length)));

    let mut out = String::with_capacity(text.len() + entities.len() * 4);
    let mut open: Vec<&MessageEntity> = Vec::new();
    let mut next = 0;
    let mut pos = 0;

    for c in text.chars() {
        close_entities(&mut out, &mut open, pos);
        while next < sorted.len() && sorted[next].offset <= pos {
            let entity = sorted[next];
            if entity.offset + entity.length > pos {
                if let Some((opening, _)) = markers(&entity.kind) {
                    out.push_str(&opening);
                }
                open.push(entity);
            }
            next += 1;
        }

        let in_code = open
            .iter()
            .any(|e| matches!(e.kind, MessageEntityKind::Code));
        if in_code {
            if c == '`' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            out.push_str(&escape_markdown(c.encode_utf8(&mut buf)));
        }
        pos += c.len_utf16();
    }
    close_entities(&mut out, &mut open, usize::MAX);
    out
}

fn close_entities(out: &mut String, open: &mut Vec<&MessageEntity>, pos: usize) {
    while let Some(entity) = open.last() {
        if entity.offset + entity.length > pos {
            break;
        }
        if let Some((_, closing)) = markers(&entity.kind) {
            out.push_str(&closing);
        }
        open.pop();
    }
}

fn markers(kind: &MessageEntityKind) -> Option<(String, String)> {
    let pair = |m: &str| Some((m.to_string(), m.to_string()));
    match kind {
        MessageEntityKind::Bold => pair("*"),
        MessageEntityKind::Italic => pair("_"),
        MessageEntityKind::Underline => pair("__"),
        MessageEntityKind::Strikethrough => pair("~"),
        MessageEntityKind::Spoiler => pair("||"),
        MessageEntityKind::Code => pair("`"),
        MessageEntityKind::TextLink { url } => {
            let url = url.as_str().replace('\\', "\\\\").replace(')', "\\)");
            Some(("[".to_string(), format!("]({url})")))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_basic_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("_italic_"), "\\_italic\\_");
        assert_eq!(escape_markdown("`code`"), "\\`code\\`");
    }

    #[test]
    fn test_escape_backslash() {
        assert_eq!(escape_markdown("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_escape_empty_and_plain_text() {
        assert_eq!(escape_markdown(""), "");
        assert_eq!(escape_markdown("plain text"), "plain text");
        assert_eq!(escape_markdown("Zoë 🔴"), "Zoë 🔴");
    }

    #[test]
    fn test_escape_prompt_text() {
        let input = "Would you rather (a) fly or (b) swim?";
        let expected = "Would you rather \\(a\\) fly or \\(b\\) swim?";
        assert_eq!(escape_markdown(input), expected);
    }

    fn entity(kind: MessageEntityKind, offset: usize, length: usize) -> MessageEntity {
        MessageEntity { kind, offset, length }
    }

    #[test]
    fn test_markdown_from_entities_restores_styles() {
        // "🔴" is two UTF-16 units, so "OR" starts at 5 + 2 + 7.
        let text = "Food\n🔴 Pizza OR pasta 🔵\n\nChoices\n🔴 J. Doe";
        let entities = [
            entity(MessageEntityKind::Bold, 0, 4),
            entity(MessageEntityKind::Bold, 14, 2),
            entity(MessageEntityKind::Bold, 27, 7),
        ];

        assert_eq!(
            markdown_from_entities(text, &entities),
            "*Food*\n🔴 Pizza *OR* pasta 🔵\n\n*Choices*\n🔴 J\\. Doe"
        );
    }

    #[test]
    fn test_markdown_from_entities_nested_and_trailing() {
        let text = "Would you rather...";
        let entities = [
            entity(MessageEntityKind::Italic, 0, 19),
            entity(MessageEntityKind::Bold, 6, 3),
        ];
        assert_eq!(
            markdown_from_entities(text, &entities),
            "_Would *you* rather\\.\\.\\._"
        );
    }

    #[test]
    fn test_markdown_from_entities_without_entities_escapes() {
        assert_eq!(markdown_from_entities("a.b", &[]), "a\\.b");
        let mention = [entity(MessageEntityKind::Mention, 0, 4)];
        assert_eq!(markdown_from_entities("@bob", &mention), "@bob");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(bold("Truth:"), "*Truth:*");
        assert_eq!(italic(&escape_markdown("Would you rather...")), "_Would you rather\\.\\.\\._");
    }
}
