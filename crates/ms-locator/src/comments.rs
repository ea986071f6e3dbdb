//! Leading comment capture.
//!
//! A route's documentation usually sits directly above its registration call.
//! [`annotate`] walks upward from the call's line and keeps the contiguous
//! block of comment and blank lines, so generated files carry it along.

/// Returns `code` prefixed with its leading comment block and indentation.
///
/// At most `lookback` lines above the call are examined. The walk stops at
/// the first line that is neither blank nor a comment (`//`, `/*`, `*`).
/// Blank lines are kept wherever they appear in the block, and the block is
/// copied with its original line terminators. When the call does not start
/// its own line (`const r = app.get(...)`), `code` is returned unchanged.
pub(crate) fn annotate(source: &str, start: usize, code: &str, lookback: usize) -> String {
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let indent = &source[line_start..start];
    if !indent.chars().all(char::is_whitespace) {
        return code.to_owned();
    }

    let block = leading_block(&source[..line_start], lookback);
    format!("{block}{indent}{code}")
}

/// Returns the comment block at the end of `before`, terminators included.
///
/// `before` is either empty or ends with a line terminator.
fn leading_block(before: &str, lookback: usize) -> &str {
    let mut block_start = before.len();

    for _ in 0..lookback {
        let Some(line_end) = block_start.checked_sub(1) else {
            break;
        };
        let line_begin = before[..line_end].rfind('\n').map_or(0, |i| i + 1);
        if !is_comment_or_blank(&before[line_begin..line_end]) {
            break;
        }
        block_start = line_begin;
    }

    &before[block_start..]
}

fn is_comment_or_blank(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
}
