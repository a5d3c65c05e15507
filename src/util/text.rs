// src/util/text.rs
use regex::Regex;
use std::sync::OnceLock;

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Collapse card text into one line of at most `max_chars` characters.
///
/// Runs of whitespace (including newlines) become a single space and an
/// ellipsis marks truncation.
///
/// # Examples
///
/// ```
/// use memocards::util::text::one_line;
///
/// assert_eq!(one_line("What is\n  a Tree?", 40), "What is a Tree?");
/// assert_eq!(one_line("abcdefgh", 5), "abcd…");
/// ```
pub fn one_line(text: &str, max_chars: usize) -> String {
    let collapsed = whitespace().replace_all(text.trim(), " ");

    if collapsed.chars().count() <= max_chars {
        return collapsed.into_owned();
    }
    let mut shortened: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_multiline_text_when_collapsing_then_single_spaces() {
        assert_eq!(one_line("  Trees\n\nand\tGraphs ", 80), "Trees and Graphs");
    }

    #[test]
    fn given_long_text_when_collapsing_then_truncates_with_ellipsis() {
        let result = one_line("What is the capital of Australia?", 10);

        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with('…'));
    }

    #[test]
    fn given_multibyte_text_when_truncating_then_respects_char_boundaries() {
        assert_eq!(one_line("éééééé", 3), "éé…");
    }

    #[test]
    fn given_empty_text_when_collapsing_then_empty() {
        assert_eq!(one_line("", 10), "");
    }
}
