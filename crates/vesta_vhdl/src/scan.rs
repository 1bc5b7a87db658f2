//! Scanning primitives over raw VHDL text.
//!
//! There is no tokenizer pass. Every function here takes a borrowed slice and
//! answers one question about it in byte offsets, so callers can slice the
//! original text directly. Structural searches ([`find_top_level`],
//! [`split_top_level`], [`construct_end`], ...) skip string literals, character
//! literals and `--` comments; the plain word searches ([`find_word`],
//! [`find_sentence`]) do not. Nothing in this module panics on arbitrary input.

use std::borrow::Cow;
use std::ops::Range;

/// One level of indentation in serialized output.
pub const INDENT: &str = "    ";

/// Returns `true` for bytes that may appear inside an identifier.
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Returns `true` for characters that end a word in [`first_word`] and
/// [`last_word`].
pub fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '(' | ')' | ';' | ',' | '+' | '-' | '*' | '/' | '&' | '<' | '>' | '=' | ':'
        )
}

pub(crate) enum Lexeme {
    Code(u8),
    Literal(usize),
    Comment(usize),
}

pub(crate) fn lexeme_at(bytes: &[u8], i: usize) -> Lexeme {
    let b = bytes[i];
    match b {
        b'-' if bytes.get(i + 1) == Some(&b'-') => {
            let len = bytes[i..]
                .iter()
                .position(|&c| c == b'\n')
                .unwrap_or(bytes.len() - i);
            Lexeme::Comment(len)
        }
        b'"' => {
            let mut j = i + 1;
            while j < bytes.len() {
                match bytes[j] {
                    b'"' if bytes.get(j + 1) == Some(&b'"') => j += 2,
                    b'"' => return Lexeme::Literal(j + 1 - i),
                    b'\n' => break,
                    _ => j += 1,
                }
            }
            Lexeme::Literal(j - i)
        }
        // A tick after a name or `)` is an attribute or qualifier, not a literal.
        b'\'' if bytes.get(i + 2) == Some(&b'\'')
            && bytes.get(i + 1).is_some_and(|c| c.is_ascii() && *c != b'\n')
            && !(i > 0 && (is_ident_byte(bytes[i - 1]) || bytes[i - 1] == b')')) =>
        {
            Lexeme::Literal(3)
        }
        _ => Lexeme::Code(b),
    }
}

/// Iterator over the structural bytes of a text.
///
/// Yields `(offset, byte, depth)` where `depth` is the parenthesis depth the
/// byte sits at; an opening and its matching closing parenthesis report the
/// same depth. Comments are skipped entirely. Literals are reported by their
/// first byte only.
struct CodeBytes<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> CodeBytes<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }
}

impl Iterator for CodeBytes<'_> {
    type Item = (usize, u8, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let i = self.pos;
            if i >= self.bytes.len() {
                return None;
            }
            match lexeme_at(self.bytes, i) {
                Lexeme::Comment(len) => self.pos += len,
                Lexeme::Literal(len) => {
                    self.pos += len;
                    return Some((i, self.bytes[i], self.depth));
                }
                Lexeme::Code(b) => {
                    self.pos += 1;
                    let depth = self.depth;
                    match b {
                        b'(' => self.depth += 1,
                        b')' => {
                            self.depth = self.depth.saturating_sub(1);
                            return Some((i, b, self.depth));
                        }
                        _ => {}
                    }
                    return Some((i, b, depth));
                }
            }
        }
    }
}

fn word_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| !is_ident_byte(b))
        .map_or(bytes.len(), |n| start + n)
}

fn starts_word_at(bytes: &[u8], i: usize) -> bool {
    bytes.get(i).is_some_and(|&b| is_ident_byte(b)) && (i == 0 || !is_ident_byte(bytes[i - 1]))
}

/// Returns the span from the first `open` through its matching `close`.
///
/// When `open` never occurs the whole text is returned. When the delimiters
/// never balance the result is `None`. Delimiters inside literals and comments
/// are ignored; both delimiters must be ASCII.
pub fn balanced_span(text: &str, open: char, close: char) -> Option<Range<usize>> {
    if !open.is_ascii() || !close.is_ascii() {
        return None;
    }
    let (open, close) = (open as u8, close as u8);
    let mut start = None;
    let mut count = 0usize;
    for (i, b, _) in CodeBytes::new(text) {
        if b == open {
            start.get_or_insert(i);
            count += 1;
        } else if b == close && start.is_some() {
            count -= 1;
            if count == 0 {
                return start.map(|s| s..i + 1);
            }
        }
    }
    match start {
        None => Some(0..text.len()),
        Some(_) => None,
    }
}

/// Finds `word` as a whole token, returning its byte offset.
pub fn find_word(text: &str, word: &str, case_sensitive: bool) -> Option<usize> {
    find_word_from(text, word, 0, case_sensitive)
}

/// Like [`find_word`], starting the search at byte offset `from`.
pub fn find_word_from(text: &str, word: &str, from: usize, case_sensitive: bool) -> Option<usize> {
    if word.is_empty() {
        return None;
    }
    let (hay, needle): (Cow<str>, Cow<str>) = if case_sensitive {
        (Cow::Borrowed(text), Cow::Borrowed(word))
    } else {
        (
            Cow::Owned(text.to_ascii_lowercase()),
            Cow::Owned(word.to_ascii_lowercase()),
        )
    };
    let bytes = text.as_bytes();
    let mut at = from;
    while let Some(found) = hay.get(at..).and_then(|rest| rest.find(needle.as_ref())) {
        let start = at + found;
        let end = start + needle.len();
        let clean_start = start == 0 || !is_ident_byte(bytes[start - 1]);
        let clean_end = end >= bytes.len() || !is_ident_byte(bytes[end]);
        if clean_start && clean_end {
            return Some(start);
        }
        at = start + needle.chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Finds every disjoint occurrence of a phrase whose words are separated by
/// runs of whitespace.
pub fn find_sentence(text: &str, words: &[&str], case_sensitive: bool) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let Some((first, rest)) = words.split_first() else {
        return found;
    };
    let mut from = 0;
    while let Some(start) = find_word_from(text, first, from, case_sensitive) {
        let mut end = start + first.len();
        let matched = rest.iter().all(|word| {
            let gap = text[end..].len() - text[end..].trim_start().len();
            if gap == 0 {
                return false;
            }
            match find_word_from(text, word, end + gap, case_sensitive) {
                Some(at) if at == end + gap => {
                    end = at + word.len();
                    true
                }
                _ => false,
            }
        });
        if matched {
            found.push(start..end);
            from = end;
        } else {
            from = start + first.len();
        }
    }
    found
}

/// Offset of the first `--` comment marker outside literals.
pub fn comment_start(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match lexeme_at(bytes, i) {
            Lexeme::Comment(_) => return Some(i),
            Lexeme::Literal(len) => i += len,
            Lexeme::Code(_) => i += 1,
        }
    }
    None
}

/// Removes `--` comments, trailing whitespace and blank lines.
///
/// Idempotent: stripping an already stripped text returns it unchanged.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let code = match comment_start(line) {
            Some(at) => &line[..at],
            None => line,
        }
        .trim_end();
        if code.trim_start().is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(code);
    }
    out
}

/// Returns `text` without comments, borrowing when it has none.
pub fn without_comments(text: &str) -> Cow<'_, str> {
    match comment_start(text) {
        Some(_) => Cow::Owned(strip_comments(text)),
        None => Cow::Borrowed(text),
    }
}

/// Replaces every comment with spaces, keeping all byte offsets unchanged.
pub fn mask_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match lexeme_at(bytes, i) {
            Lexeme::Comment(len) => {
                out.push_str(&text[copied..i]);
                out.extend(std::iter::repeat(' ').take(len));
                i += len;
                copied = i;
            }
            Lexeme::Literal(len) => i += len,
            Lexeme::Code(_) => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Splits a single line into its code and the text after a trailing `--`.
pub fn split_trailing_comment(line: &str) -> (&str, Option<&str>) {
    match comment_start(line) {
        Some(at) => (line[..at].trim_end(), Some(line[at + 2..].trim_end())),
        None => (line.trim_end(), None),
    }
}

/// The first maximal run of non-separator characters.
pub fn first_word(text: &str) -> Option<&str> {
    let start = text.find(|c: char| !is_separator(c))?;
    let rest = &text[start..];
    let end = rest.find(is_separator).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// The last maximal run of non-separator characters.
pub fn last_word(text: &str) -> Option<&str> {
    let trimmed = text.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return None;
    }
    let start = trimmed.rfind(is_separator).map_or(0, |i| {
        i + trimmed[i..].chars().next().map_or(1, char::len_utf8)
    });
    Some(&trimmed[start..])
}

/// Splits at every `separator` byte outside parentheses, literals and comments.
///
/// Always returns at least one piece. Pieces are not trimmed.
pub fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, b, depth) in CodeBytes::new(text) {
        if depth == 0 && b == separator {
            pieces.push(&text[start..i]);
            start = i + 1;
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Every offset where `pattern` occurs outside parentheses, literals and
/// comments.
///
/// A pattern starting with a letter is matched as a whole word ignoring ASCII
/// case; any other pattern is matched byte for byte.
pub fn top_level_matches(text: &str, pattern: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let pat = pattern.as_bytes();
    let Some(&first) = pat.first() else {
        return Vec::new();
    };
    let word = first.is_ascii_alphabetic();
    CodeBytes::new(text)
        .filter(|&(i, _, depth)| {
            if depth != 0 {
                return false;
            }
            let Some(candidate) = bytes.get(i..i + pat.len()) else {
                return false;
            };
            if word {
                starts_word_at(bytes, i)
                    && candidate.eq_ignore_ascii_case(pat)
                    && !bytes.get(i + pat.len()).is_some_and(|&b| is_ident_byte(b))
            } else {
                candidate == pat
            }
        })
        .map(|(i, _, _)| i)
        .collect()
}

/// First offset of `pattern` outside parentheses, literals and comments.
///
/// See [`top_level_matches`] for how words and symbols are matched.
pub fn find_top_level(text: &str, pattern: &str) -> Option<usize> {
    top_level_matches(text, pattern).into_iter().next()
}

/// Returns `true` if `text` (ignoring leading whitespace) begins with the
/// whole word `word`, ignoring ASCII case.
pub fn starts_with_word(text: &str, word: &str) -> bool {
    strip_word_prefix(text, word).is_some()
}

/// Removes a leading whole word, returning the trimmed remainder.
pub fn strip_word_prefix<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let text = text.trim_start();
    let head = text.get(..word.len())?;
    if word.is_empty() || !head.eq_ignore_ascii_case(word) {
        return None;
    }
    if text.as_bytes().get(word.len()).is_some_and(|&b| is_ident_byte(b)) {
        return None;
    }
    Some(text[word.len()..].trim_start())
}

/// Removes a trailing whole word, returning the trimmed remainder.
pub fn strip_word_suffix<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let text = text.trim_end();
    let start = text.len().checked_sub(word.len())?;
    let tail = text.get(start..)?;
    if word.is_empty() || !tail.eq_ignore_ascii_case(word) {
        return None;
    }
    if start > 0 && is_ident_byte(text.as_bytes()[start - 1]) {
        return None;
    }
    Some(text[..start].trim_end())
}

/// Removes a leading sequence of whole words.
pub fn strip_sentence_prefix<'a>(text: &'a str, words: &[&str]) -> Option<&'a str> {
    words
        .iter()
        .try_fold(text, |rest, word| strip_word_prefix(rest, word))
}

/// Removes a closing clause `end [keywords] [name];` and returns what precedes
/// `end`.
///
/// `keywords` must all be present when `required` is set; otherwise they are
/// either all present or all absent. `name`, when given, may be omitted.
pub fn strip_end_clause<'a>(
    text: &'a str,
    keywords: &[&str],
    required: bool,
    name: Option<&str>,
) -> Option<&'a str> {
    let mut rest = text.trim_end().strip_suffix(';')?.trim_end();
    if let Some(name) = name {
        rest = strip_word_suffix(rest, name).unwrap_or(rest);
    }
    let stripped = keywords
        .iter()
        .rev()
        .try_fold(rest, |acc, word| strip_word_suffix(acc, word));
    rest = match stripped {
        Some(r) => r,
        None if required => return None,
        None => rest,
    };
    strip_word_suffix(rest, "end")
}

/// Indents every non-empty line by `levels` steps of [`INDENT`].
pub fn indent(text: &str, levels: usize) -> String {
    let pad = INDENT.repeat(levels);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Skips whitespace and comments starting at `from`.
pub fn skip_trivia(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
        } else if let Lexeme::Comment(len) = lexeme_at(bytes, i) {
            i += len;
        } else {
            break;
        }
    }
    i
}

/// The next word, literal or punctuation character after `from`, skipping
/// whitespace and comments. Returns the token and the offset just past it.
pub(crate) fn next_token(text: &str, from: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let start = skip_trivia(text, from);
    if start >= bytes.len() {
        return None;
    }
    let end = match lexeme_at(bytes, start) {
        Lexeme::Literal(len) => start + len,
        Lexeme::Code(b) if is_ident_byte(b) => word_end(bytes, start),
        _ => start + text[start..].chars().next().map_or(1, char::len_utf8),
    };
    Some((text.get(start..end)?, end))
}

fn token_is(token: Option<(&str, usize)>, word: &str) -> bool {
    token.is_some_and(|(t, _)| t.eq_ignore_ascii_case(word))
}

/// `is` appears at paren depth zero before the next `;`.
fn is_before_semicolon(text: &str, from: usize) -> bool {
    let bytes = text.as_bytes();
    let Some(rest) = text.get(from..) else {
        return false;
    };
    for (i, b, depth) in CodeBytes::new(rest) {
        if depth != 0 {
            continue;
        }
        if b == b';' {
            return false;
        }
        let at = from + i;
        if starts_word_at(bytes, at) && word_end(bytes, at) == at + 2 && rest[i..i + 2].eq_ignore_ascii_case("is") {
            return true;
        }
    }
    false
}

/// Decides whether a word opens a construct that is closed by `end`.
fn opens_construct(text: &str, word: &str, after: usize) -> bool {
    match word.to_ascii_lowercase().as_str() {
        "if" | "case" | "loop" | "process" | "generate" | "record" | "architecture"
        | "block" | "protected" | "units" => true,
        "component" => {
            let Some((_, p)) = next_token(text, after) else {
                return false;
            };
            let mut next = next_token(text, p);
            if token_is(next, "is") {
                next = next.and_then(|(_, p)| next_token(text, p));
            }
            match next {
                Some((t, p)) if t.eq_ignore_ascii_case("port") || t.eq_ignore_ascii_case("generic") => {
                    !token_is(next_token(text, p), "map")
                }
                Some((t, _)) => t.eq_ignore_ascii_case("end"),
                None => false,
            }
        }
        "function" | "procedure" => is_before_semicolon(text, after),
        "entity" => {
            let name = next_token(text, after);
            token_is(name.and_then(|(_, p)| next_token(text, p)), "is")
        }
        "package" => {
            let first = next_token(text, after);
            let second = first.and_then(|(_, p)| next_token(text, p));
            if token_is(first, "body") {
                token_is(second.and_then(|(_, p)| next_token(text, p)), "is")
            } else {
                token_is(second, "is")
            }
        }
        _ => false,
    }
}

/// Length of the next statement or compound construct in `text`, including
/// its terminating `;`.
///
/// Constructs closed by `end` (`if`, `case`, loops, processes, generates,
/// records, entities, architectures, packages, component declarations and
/// subprogram bodies) are tracked by nesting, so the result covers the whole
/// construct. Returns `None` if the text ends first or parentheses do not
/// balance.
pub fn construct_end(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut parens = 0usize;
    let mut nesting = 0usize;
    let mut after_end = false;
    // Set between `if`/`elsif`/`else`/`case` and the keyword that starts their
    // body, so an `if ... generate` counts once.
    let mut header_open = false;
    while i < bytes.len() {
        match lexeme_at(bytes, i) {
            Lexeme::Comment(len) | Lexeme::Literal(len) => {
                i += len;
                continue;
            }
            Lexeme::Code(_) if starts_word_at(bytes, i) => {
                let end = word_end(bytes, i);
                if parens == 0 {
                    let word = &text[i..end];
                    if after_end {
                        after_end = false;
                    } else if word.eq_ignore_ascii_case("end") {
                        nesting = nesting.checked_sub(1)?;
                        after_end = true;
                    } else if word.eq_ignore_ascii_case("then") || word.eq_ignore_ascii_case("is") {
                        header_open = false;
                    } else if word.eq_ignore_ascii_case("elsif") || word.eq_ignore_ascii_case("else") {
                        header_open = true;
                    } else if word.eq_ignore_ascii_case("generate") && header_open {
                        header_open = false;
                    } else if opens_construct(text, word, end) {
                        header_open = word.eq_ignore_ascii_case("if") || word.eq_ignore_ascii_case("case");
                        nesting += 1;
                    }
                }
                i = end;
                continue;
            }
            Lexeme::Code(b'(') => parens += 1,
            Lexeme::Code(b')') => parens = parens.checked_sub(1)?,
            Lexeme::Code(b';') if parens == 0 => {
                after_end = false;
                header_open = false;
                if nesting == 0 {
                    return Some(i + 1);
                }
            }
            Lexeme::Code(_) => {}
        }
        i += 1;
    }
    None
}

/// Offset of the first statement in `text` that begins with one of `words`,
/// together with the index of the word that matched.
///
/// Statements and constructs before it are stepped over with
/// [`construct_end`], so a keyword nested inside an inner construct is never
/// reported.
pub fn find_clause(text: &str, words: &[&str]) -> Option<(usize, usize)> {
    let mut pos = 0;
    loop {
        pos = skip_trivia(text, pos);
        let rest = text.get(pos..)?;
        if rest.is_empty() {
            return None;
        }
        if let Some(k) = words.iter().position(|w| starts_with_word(rest, w)) {
            return Some((pos, k));
        }
        pos += construct_end(rest)?;
    }
}

/// One element of a statement region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    /// A statement or construct, including its `;`, with the comment that
    /// follows it on the same line.
    Code {
        /// Raw text of the statement; inner comments are kept.
        text: &'a str,
        /// Text after `--` on the line where the statement ends.
        trailer: Option<&'a str>,
    },
    /// A comment line standing on its own; the text after `--`.
    Comment(&'a str),
}

/// Splits a statement region into statements, constructs and comment lines.
///
/// Returns `None` if trailing text is not terminated by `;`.
pub fn split_pieces(text: &str) -> Option<Vec<Piece<'_>>> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut pos = 0;
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            return Some(pieces);
        }
        if let Lexeme::Comment(len) = lexeme_at(bytes, pos) {
            pieces.push(Piece::Comment(text[pos + 2..pos + len].trim_end()));
            pos += len;
            continue;
        }
        let start = pos;
        let end = start + construct_end(&text[start..])?;
        let line_end = text[end..].find('\n').map_or(text.len(), |n| end + n);
        let tail = text[end..line_end].trim_start();
        let trailer = match tail.strip_prefix("--") {
            Some(comment) => {
                pos = line_end;
                Some(comment.trim_end())
            }
            None => {
                pos = end;
                None
            }
        };
        pieces.push(Piece::Code {
            text: &text[start..end],
            trailer,
        });
    }
}
