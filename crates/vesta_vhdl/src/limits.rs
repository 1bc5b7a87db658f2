//! Input ceilings and the nesting guard shared by every recursive parser.
//!
//! Length ceilings reject oversized slices before any scanning happens. They do
//! not bound nesting on their own, so each recursive entry point also takes a
//! [`NestingGuard`] from [`enter`]; the guard is released when it drops.

use std::cell::Cell;

/// Longest literal accepted by the literal parsers, in bytes.
pub const LITERAL_MAX_LEN: usize = 4096;

/// Longest expression accepted by [`Expression`](crate::Expression), in bytes.
pub const EXPRESSION_MAX_LEN: usize = 4096;

/// Longest single statement accepted by [`Statement`](crate::Statement), in bytes.
pub const STATEMENT_MAX_LEN: usize = 4096;

/// Longest block, region or design unit accepted, in bytes.
pub const BLOCK_MAX_LEN: usize = 1 << 20;

/// Deepest nesting of expressions and blocks a single parse may reach.
pub const MAX_NESTING_DEPTH: usize = 128;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Proof that the current thread entered one more nesting level.
#[derive(Debug)]
pub struct NestingGuard {
    _private: (),
}

impl Drop for NestingGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Enters one nesting level, or returns `None` at [`MAX_NESTING_DEPTH`].
pub fn enter() -> Option<NestingGuard> {
    DEPTH.with(|depth| {
        let current = depth.get();
        if current >= MAX_NESTING_DEPTH {
            None
        } else {
            depth.set(current + 1);
            Some(NestingGuard { _private: () })
        }
    })
}

/// Current nesting level on this thread.
pub fn depth() -> usize {
    DEPTH.with(Cell::get)
}

/// Returns `true` if `text` fits within `limit` bytes.
pub(crate) fn within(text: &str, limit: usize) -> bool {
    text.len() <= limit
}
