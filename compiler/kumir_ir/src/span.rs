//! Source spans and their resolution into line/column positions.
//!
//! The front end attaches a byte-offset [`Span`] to every node. Diagnostics
//! need the human view of that offset (line, column, the line itself), which
//! [`LineIndex`] computes on demand from the original source text.

use std::fmt;

/// Byte range in the program source.
///
/// Layout: 8 bytes (`start` inclusive, `end` exclusive).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span for nodes synthesized without source (tests, generated code).
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Span covering `len` bytes starting at `start`, saturating at `u32::MAX`.
    pub fn at(start: usize, len: usize) -> Self {
        let start = u32::try_from(start).unwrap_or(u32::MAX);
        let len = u32::try_from(len).unwrap_or(u32::MAX);
        Span {
            start,
            end: start.saturating_add(len),
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// Merge two spans into one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Resolved position of a span: zero-based line and column plus the line text.
///
/// Columns count characters, not bytes, so Cyrillic identifiers line up with
/// what the student sees in the editor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub line_text: String,
}

impl fmt::Display for SourceLocation {
    /// Renders one-based numbers, the way students count lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "строка {}, столбец {}: '{}'",
            self.line + 1,
            self.column + 1,
            self.line_text
        )
    }
}

/// Line-start table over a source text.
pub struct LineIndex {
    source: String,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex {
            source,
            line_starts,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: u32) -> usize {
        let offset = (offset as usize).min(self.source.len());
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }

    /// Text of a zero-based line without its terminator.
    pub fn line_text(&self, line: usize) -> &str {
        let Some(&start) = self.line_starts.get(line) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.source.len(), |&next| next - 1);
        self.source
            .get(start..end)
            .unwrap_or("")
            .trim_end_matches('\r')
    }

    /// Resolve the start of `span`.
    pub fn locate(&self, span: Span) -> SourceLocation {
        let offset = (span.start as usize).min(self.source.len());
        let line = self.line_of(span.start);
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = self.source[line_start..]
            .char_indices()
            .take_while(|&(i, _)| line_start + i < offset)
            .count();
        SourceLocation {
            line: u32::try_from(line).unwrap_or(u32::MAX),
            column: u32::try_from(column).unwrap_or(u32::MAX),
            line_text: self.line_text(line).to_owned(),
        }
    }
}

#[cfg(test)]
mod tests;
