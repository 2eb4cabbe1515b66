//! Quote- and parenthesis-aware scanner for DDL text.

/// Structural role of a character sequence found by the [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// An opening parenthesis.
    Open,
    /// A closing parenthesis.
    Close,
    /// A comma separator.
    Comma,
    /// A `--` line comment, running up to (not including) the newline.
    Comment,
}

/// A structural mark emitted by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    /// What was found.
    pub kind: MarkKind,
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Parenthesis depth after this mark was consumed.
    pub depth: usize,
}

/// Walks DDL text and reports parentheses, commas and line comments that
/// appear outside string literals.
///
/// A quote character toggles its own literal state only while the other
/// quote type is closed, so `"it's"` and `'say "hi"'` are both single
/// literals. Doubled quotes (`'it''s'`) are not treated as escapes: they
/// close and immediately reopen the literal, which leaves the state correct
/// for everything outside it.
///
/// Depth never goes below zero; a stray `)` at depth zero is reported with
/// `depth == 0`.
pub struct Scanner<'a> {
    /// The input text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// Current parenthesis depth.
    depth: usize,
    in_single: bool,
    in_double: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            in_single: false,
            in_double: false,
        }
    }

    /// Returns the current parenthesis depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true while the scanner is inside a quoted literal.
    #[must_use]
    pub const fn in_quotes(&self) -> bool {
        self.in_single || self.in_double
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    const fn mark(&self, kind: MarkKind, start: usize) -> Mark {
        Mark {
            kind,
            start,
            end: self.pos,
            depth: self.depth,
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Mark;

    fn next(&mut self) -> Option<Mark> {
        loop {
            let start = self.pos;
            let c = self.advance()?;

            match c {
                '\'' if !self.in_double => self.in_single = !self.in_single,
                '"' if !self.in_single => self.in_double = !self.in_double,
                _ if self.in_quotes() => {}
                '-' if self.peek() == Some('-') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                    return Some(self.mark(MarkKind::Comment, start));
                }
                '(' => {
                    self.depth += 1;
                    return Some(self.mark(MarkKind::Open, start));
                }
                ')' => {
                    self.depth = self.depth.saturating_sub(1);
                    return Some(self.mark(MarkKind::Close, start));
                }
                ',' => return Some(self.mark(MarkKind::Comma, start)),
                _ => {}
            }
        }
    }
}

/// Splits `text` on commas that sit at depth zero and outside literals and
/// comments. Pieces are returned verbatim (untrimmed); the trailing piece is
/// included even when empty.
#[must_use]
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut piece_start = 0;

    for mark in Scanner::new(text) {
        if mark.kind == MarkKind::Comma && mark.depth == 0 {
            pieces.push(&text[piece_start..mark.start]);
            piece_start = mark.end;
        }
    }
    pieces.push(&text[piece_start..]);
    pieces
}

/// Given the byte offset of an opening parenthesis in `text`, returns the
/// offset of the parenthesis that balances it.
///
/// Returns `None` when `open` does not point at `(` or the input ends first.
#[must_use]
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let tail = text.get(open..)?;
    if !tail.starts_with('(') {
        return None;
    }

    Scanner::new(tail)
        .find(|mark| mark.kind == MarkKind::Close && mark.depth == 0)
        .map(|mark| open + mark.start)
}

/// Removes every `--` comment found outside literals.
///
/// Returns the remaining code and the body of the first comment (without
/// the leading dashes, trimmed). Newlines that ended a comment are kept, so
/// code on following lines stays separated.
#[must_use]
pub fn strip_comments(text: &str) -> (String, Option<&str>) {
    let mut code = String::with_capacity(text.len());
    let mut first = None;
    let mut last = 0;

    for mark in Scanner::new(text).filter(|m| m.kind == MarkKind::Comment) {
        code.push_str(&text[last..mark.start]);
        first.get_or_insert_with(|| text[mark.start + 2..mark.end].trim());
        last = mark.end;
    }
    code.push_str(&text[last..]);
    (code, first)
}

/// Removes whole `--` comment lines from the start of `text`.
#[must_use]
pub fn strip_leading_comments(text: &str) -> &str {
    let mut rest = text.trim_start();
    while rest.starts_with("--") {
        rest = rest.find('\n').map_or("", |nl| rest[nl + 1..].trim_start());
    }
    rest
}
