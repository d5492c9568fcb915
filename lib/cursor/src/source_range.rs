use crate::{Col, Cursor, Line};

/// The span of source text between two cursors, i.e. a lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRange<'a> {
    start: Cursor<'a>,
    end: Cursor<'a>,
}

impl<'a> From<(Cursor<'a>, Cursor<'a>)> for SourceRange<'a> {
    fn from((start, end): (Cursor<'a>, Cursor<'a>)) -> Self {
        Self::new(start, end)
    }
}

impl<'a> SourceRange<'a> {
    pub fn new(start: Cursor<'a>, end: Cursor<'a>) -> Self {
        assert!(start.source == end.source);
        assert!(start.offset() <= end.offset());
        Self { start, end }
    }

    pub fn lexeme(&self) -> &'a str {
        self.start.slice_until(&self.end)
    }

    pub fn line(&self) -> Line {
        self.start.line()
    }

    /// Line the range ends on. Only differs from [`Self::line`] for lexemes
    /// spanning newlines, like multi-line strings.
    pub fn end_line(&self) -> Line {
        self.end.line()
    }

    pub fn col(&self) -> Col {
        self.start.col()
    }
}
