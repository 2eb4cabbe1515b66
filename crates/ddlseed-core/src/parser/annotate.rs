//! Best-effort foreign keys inferred from inline comments.
//!
//! A column written as `dept_id INT -- FK to Departments table` carries no
//! REFERENCES clause, but its comment names the target. The guess of the
//! referenced column (`<first segment of the column name>_id`) may well be
//! wrong, so this pass can be disabled through
//! [`ParseOptions`](super::ParseOptions).

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::ForeignKey;

static TARGET_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bto\s+([A-Za-z0-9_]+)\s+table").expect("valid comment target regex")
});

/// Infers a foreign key for `column` from the text of its trailing comment.
///
/// The comment must mention "foreign key" or "references" and contain a
/// `to <name> table` phrase.
#[must_use]
pub fn infer_comment_foreign_key(column: &str, comment: &str) -> Option<ForeignKey> {
    let lower = comment.to_lowercase();
    if !lower.contains("foreign key") && !lower.contains("references") {
        return None;
    }

    let ref_table = TARGET_TABLE_RE.captures(comment)?.get(1)?.as_str();
    let prefix = column.split('_').next().unwrap_or(column);

    Some(
        ForeignKey::new(
            vec![column.to_string()],
            ref_table,
            vec![format!("{prefix}_id")],
        )
        .raw(format!("comment:{comment}")),
    )
}
