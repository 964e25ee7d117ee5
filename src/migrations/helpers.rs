/// Drops full-line `--` comments and surrounding whitespace from a fragment.
pub fn strip_comment_lines(fragment: &str) -> String {
    fragment
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<&str>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Splits a schema file into executable statements.
///
/// Blank and comment-only fragments are discarded.
pub fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(strip_comment_lines)
        .filter(|statement| !statement.is_empty())
        .collect()
}
