//! Declarative regions and design units.
//!
//! Every region is parsed the same way: the keyword skeleton around it is
//! checked first, the interior is cut out with [`scan::balanced_span`] or by
//! removing the `end` clause, and the interior is split into declarations
//! that must all parse. One failing declaration fails the whole region.
//!
//! Names declared in one region must be unique, compared ignoring case. The
//! constructors enforce this and return `None` on a clash.

mod architecture;
mod entity;
mod function;
mod include;
mod package;
mod port;
mod typedef;

pub use architecture::{Architecture, ArchitectureHead, HeadStatement};
pub use entity::{ComponentDefinition, Entity};
pub use function::{FunctionDefinition, FunctionImplementation, Parameter};
pub use include::Include;
pub use package::{PackageBody, PackageBodyBlock, VhdlPackage};
pub use port::{GenericBlock, GenericTypeDeclaration, PortBlock, PortSignal};
pub use typedef::{RecordField, TypeDefinition};

use crate::comment::Comment;
use crate::scan;
use std::collections::HashSet;
use vesta_common::Ident;

/// One `;`-separated entry of a parenthesized list, with the comment that
/// ends its line.
#[derive(Debug)]
pub(crate) struct ListItem {
    pub(crate) code: String,
    pub(crate) comment: Option<Comment>,
}

/// Splits the interior of `port (...)` and similar lists.
///
/// Comment lines standing on their own inside the list are dropped. Empty
/// entries, including one left by a trailing `;`, fail the split.
pub(crate) fn split_items(inner: &str) -> Option<Vec<ListItem>> {
    let masked = scan::mask_comments(inner);
    let pieces = scan::split_top_level(&masked, b';');
    let count = pieces.len();
    let mut items = Vec::with_capacity(count);
    let mut start = 0;
    for (k, piece) in pieces.into_iter().enumerate() {
        let end = start + piece.len();
        let code = piece.trim();
        if code.is_empty() {
            return None;
        }
        let comment_from = if k + 1 < count {
            end + 1
        } else {
            start + piece.trim_end().len()
        };
        let line_end = inner[comment_from..]
            .find('\n')
            .map_or(inner.len(), |n| comment_from + n);
        let comment = inner[comment_from..line_end]
            .trim()
            .strip_prefix("--")
            .and_then(Comment::new);
        items.push(ListItem {
            code: code.to_string(),
            comment,
        });
        start = end + 1;
    }
    Some(items)
}

/// Returns `true` if no two names are equal ignoring case.
pub(crate) fn all_unique<'a>(names: impl IntoIterator<Item = &'a Ident>) -> bool {
    let mut seen = HashSet::new();
    names.into_iter().all(|name| seen.insert(name))
}

/// Strips `keyword (...)` followed by `;` and returns the interior of the
/// parentheses.
pub(crate) fn list_interior<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = scan::strip_word_prefix(text, keyword)?;
    if !rest.starts_with('(') {
        return None;
    }
    let span = scan::balanced_span(rest, '(', ')')?;
    if rest[span.end..].trim() != ";" {
        return None;
    }
    Some(&rest[1..span.end - 1])
}

/// Renders list entries one per line, separated by `;`, each followed by its
/// comment.
pub(crate) fn format_list<'a>(
    keyword: &str,
    entries: impl ExactSizeIterator<Item = (String, Option<&'a Comment>)>,
) -> String {
    let last = entries.len().saturating_sub(1);
    let lines: Vec<String> = entries
        .enumerate()
        .map(|(k, (code, comment))| {
            let separator = if k == last { "" } else { ";" };
            crate::comment::with_trailer(format!("{code}{separator}"), comment)
        })
        .collect();
    format!("{keyword} (\n{}\n);", scan::indent(&lines.join("\n"), 1))
}
