//! DDL segment scanner.
//!
//! A single hand-written scanner tracks parenthesis depth, quote state and
//! line comments. Statement discovery, item splitting, type extraction and
//! CHECK extraction are all built on top of it.

mod scanner;

pub use scanner::{
    matching_paren, split_top_level, strip_comments, strip_leading_comments, Mark, MarkKind,
    Scanner,
};
