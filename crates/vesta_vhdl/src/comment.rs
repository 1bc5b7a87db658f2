//! Line comments kept as nodes.

use crate::limits::{self, STATEMENT_MAX_LEN};
use crate::scan::{self, Lexeme};
use crate::VhdlNode;

/// A `--` line comment.
///
/// Holds the text after the marker with trailing whitespace removed, so
/// `-- note` stores `" note"` and serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Comment {
    /// Text following `--`.
    pub text: String,
}

impl Comment {
    /// Creates a comment, rejecting text that spans more than one line.
    pub fn new(text: &str) -> Option<Self> {
        if text.contains(['\n', '\r']) {
            return None;
        }
        Some(Self {
            text: text.trim_end().to_string(),
        })
    }
}

impl VhdlNode for Comment {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.starts_with("--") || !limits::within(text, STATEMENT_MAX_LEN) {
            return None;
        }
        match scan::lexeme_at(text.as_bytes(), 0) {
            Lexeme::Comment(len) if len == text.len() => Comment::new(&text[2..]),
            _ => None,
        }
    }

    fn serialize(&self) -> String {
        format!("--{}", self.text)
    }
}

crate::display_via_serialize!(Comment);

/// Separates a declaration from the comment trailing its last line.
///
/// Comments on earlier lines are dropped.
pub(crate) fn split_trailer(text: &str) -> (String, Option<Comment>) {
    let text = text.trim();
    let (head, last) = match text.rfind('\n') {
        Some(at) => (&text[..at], &text[at + 1..]),
        None => ("", text),
    };
    let (code, trailer) = scan::split_trailing_comment(last);
    let head = scan::strip_comments(head);
    let code = if head.is_empty() {
        code.trim().to_string()
    } else {
        format!("{head}\n{}", code.trim())
    };
    (code, trailer.and_then(Comment::new))
}

/// Appends ` --text` when a comment is present.
pub(crate) fn with_trailer(code: String, comment: Option<&Comment>) -> String {
    match comment {
        Some(comment) => format!("{code} {}", comment.serialize()),
        None => code,
    }
}
