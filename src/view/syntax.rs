//! NASTRAN syntax colouring of occurrence lines
//!
//! ```text
//! line      11: GRID, 1, , 0.5 'label' $ SIDE PANEL
//! ^^^^label^^^^ card  num   num quoted  ^^comment^^
//! ```

use colored::{ColoredString, Colorize};
use regex::RegexBuilder;
use std::ops::Range;

/// Syntactic class of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Label,
    Comment,
    Card,
    Number,
    Quoted,
    Symbol,
    Separator,
}

/// A classified byte range of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub token: Token,
    pub range: Range<usize>,
}

fn is_separator(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '=' || ch == ','
}

/// Split an occurrence line into classified spans covering the whole text
pub fn tokenize(text: &str, label_len: usize) -> Vec<Span> {
    let label_len = label_len.min(text.len());
    let mut spans = Vec::new();
    if label_len > 0 {
        spans.push(Span {
            token: Token::Label,
            range: 0..label_len,
        });
    }

    let mut chars = text[label_len..]
        .char_indices()
        .map(|(i, ch)| (i + label_len, ch))
        .peekable();

    while let Some((start, ch)) = chars.next() {
        let mut end = start + ch.len_utf8();
        let token = if ch == '$' {
            end = text.len();
            while chars.next().is_some() {}
            Token::Comment
        } else if is_separator(ch) {
            Token::Separator
        } else if ch == '\'' || ch == '"' {
            // Quoted text runs to the matching quote, or to the end of the line
            for (i, c) in chars.by_ref() {
                end = i + c.len_utf8();
                if c == ch {
                    break;
                }
            }
            Token::Quoted
        } else if ch.is_alphabetic() || ch.is_ascii_digit() {
            while let Some(&(i, c)) = chars.peek() {
                if is_separator(c) || c == '$' {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            if ch.is_alphabetic() {
                Token::Card
            } else {
                Token::Number
            }
        } else {
            Token::Symbol
        };

        spans.push(Span {
            token,
            range: start..end,
        });
    }

    spans
}

/// Byte ranges of case-insensitive occurrences of `search` after the label
pub fn match_ranges(text: &str, label_len: usize, search: &str) -> Vec<Range<usize>> {
    if search.is_empty() || label_len > text.len() {
        return Vec::new();
    }

    let Ok(re) = RegexBuilder::new(&regex::escape(search))
        .case_insensitive(true)
        .build()
    else {
        return Vec::new();
    };

    re.find_iter(&text[label_len..])
        .map(|m| (m.start() + label_len)..(m.end() + label_len))
        .collect()
}

fn paint(token: Token, s: &str, highlighted: bool) -> ColoredString {
    let colored = match token {
        Token::Label => s.blue(),
        Token::Comment => s.green(),
        Token::Card => s.cyan(),
        Token::Number => s.magenta(),
        Token::Quoted => s.yellow(),
        Token::Symbol => s.red(),
        Token::Separator => s.normal(),
    };
    if highlighted {
        colored.bold().underline()
    } else {
        colored
    }
}

/// Colour an occurrence line and highlight the search term in it.
///
/// Returns the text unchanged when `color` is off.
pub fn colorize_line(text: &str, label_len: usize, search: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }

    let matches = match_ranges(text, label_len, search);
    let mut output = String::with_capacity(text.len() * 2);

    for span in tokenize(text, label_len) {
        let mut cursor = span.range.start;
        for m in &matches {
            if m.end <= cursor || m.start >= span.range.end {
                continue;
            }
            if m.start > cursor {
                output.push_str(&paint(span.token, &text[cursor..m.start], false).to_string());
                cursor = m.start;
            }
            let end = m.end.min(span.range.end);
            output.push_str(&paint(span.token, &text[cursor..end], true).to_string());
            cursor = end;
        }
        if cursor < span.range.end {
            output.push_str(&paint(span.token, &text[cursor..span.range.end], false).to_string());
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(text: &str, label_len: usize) -> Vec<(Token, &str)> {
        tokenize(text, label_len)
            .into_iter()
            .map(|span| (span.token, &text[span.range]))
            .collect()
    }

    #[test]
    fn test_tokenize_card_line() {
        let text = "line       1: GRID, 1,-0.5";
        assert_eq!(
            classes(text, 14),
            vec![
                (Token::Label, "line       1: "),
                (Token::Card, "GRID"),
                (Token::Separator, ","),
                (Token::Separator, " "),
                (Token::Number, "1"),
                (Token::Separator, ","),
                (Token::Symbol, "-"),
                (Token::Number, "0.5"),
            ]
        );
    }

    #[test]
    fn test_tokenize_comment_runs_to_end() {
        let text = "CQUAD4 $ side 'panel', 12";
        assert_eq!(
            classes(text, 0),
            vec![
                (Token::Card, "CQUAD4"),
                (Token::Separator, " "),
                (Token::Comment, "$ side 'panel', 12"),
            ]
        );
    }

    #[test]
    fn test_tokenize_quoted_keeps_spaces() {
        let text = "INCLUDE 'a b.dat' $x";
        assert_eq!(
            classes(text, 0),
            vec![
                (Token::Card, "INCLUDE"),
                (Token::Separator, " "),
                (Token::Quoted, "'a b.dat'"),
                (Token::Separator, " "),
                (Token::Comment, "$x"),
            ]
        );
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        let text = "X \"open";
        assert_eq!(
            classes(text, 0),
            vec![
                (Token::Card, "X"),
                (Token::Separator, " "),
                (Token::Quoted, "\"open"),
            ]
        );
    }

    #[test]
    fn test_spans_cover_text() {
        let text = "line       3: PSHELL\t10=2.0,+,'é' $ fin";
        let spans = tokenize(text, 14);
        let mut cursor = 0;
        for span in &spans {
            assert_eq!(span.range.start, cursor);
            cursor = span.range.end;
        }
        assert_eq!(cursor, text.len());
    }

    #[test]
    fn test_match_ranges_skip_label() {
        let text = "line       1: LINE line";
        let ranges = match_ranges(text, 14, "line");
        assert_eq!(ranges, vec![14..18, 19..23]);
    }

    #[test]
    fn test_match_ranges_escape_metacharacters() {
        let text = "x: a.b axb";
        assert_eq!(match_ranges(text, 3, "a.b"), vec![3..6]);
        assert!(match_ranges(text, 3, "").is_empty());
    }

    #[test]
    fn test_colorize_without_color_is_identity() {
        let text = "line       1: GRID 1";
        assert_eq!(colorize_line(text, 14, "grid", false), text);
    }

    #[test]
    fn test_colorize_with_color_emits_escapes() {
        colored::control::set_override(true);
        let text = "line       1: GRID 1 $ grid";
        let output = colorize_line(text, 14, "grid", true);
        assert!(output.contains("\x1b["));
        assert!(output.contains("GRID"));
        assert!(output.contains("$ "));
    }
}
