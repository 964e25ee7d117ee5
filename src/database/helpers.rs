use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Statements are quoted in errors and logs only up to this many characters.
pub const STATEMENT_PREFIX_LENGTH: usize = 80;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"'(?:[^']|'')*'|"(?:[^"]|"")*"|\$(\d+)"#).expect("valid placeholder regex")
});
static RETURNING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bRETURNING\b").expect("valid returning regex"));
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("valid identifier regex"));

/// Highest `$N` placeholder number in `statement`, 0 when there is none.
/// Quoted literals and identifiers are skipped.
pub fn highest_placeholder(statement: &str) -> usize {
    PLACEHOLDER
        .captures_iter(statement)
        .filter_map(|captures| captures.get(1).and_then(|number| number.as_str().parse::<usize>().ok()))
        .max()
        .unwrap_or(0)
}

/// Rewrites `$N` placeholders to SQLite's numbered `?N` form in one pass.
///
/// Each match consumes the whole digit run, so `$1` is never matched inside
/// `$10`. Text inside quoted literals and identifiers is left untouched.
pub fn rewrite_placeholders(statement: &str) -> String {
    PLACEHOLDER
        .replace_all(statement, |captures: &Captures| match captures.get(1) {
            Some(number) => format!("?{}", number.as_str()),
            None => captures[0].to_string(),
        })
        .into_owned()
}

/// First keyword of the statement, upper-cased.
pub fn leading_keyword(statement: &str) -> String {
    statement
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '(' || c == ';')
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}

pub fn is_select(statement: &str) -> bool {
    leading_keyword(statement) == "SELECT"
}

pub fn is_insert(statement: &str) -> bool {
    matches!(leading_keyword(statement).as_str(), "INSERT" | "REPLACE")
}

/// Whether PostgreSQL will send a row set back for this statement.
pub fn returns_rows(statement: &str) -> bool {
    match leading_keyword(statement).as_str() {
        "SELECT" | "WITH" | "SHOW" | "VALUES" | "TABLE" | "EXPLAIN" => true,
        _ => RETURNING.is_match(statement),
    }
}

/// Whitespace-collapsed, truncated statement text for errors and logs.
pub fn statement_prefix(statement: &str) -> String {
    let collapsed = statement.split_whitespace().collect::<Vec<&str>>().join(" ");
    if collapsed.chars().count() <= STATEMENT_PREFIX_LENGTH {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(STATEMENT_PREFIX_LENGTH).collect();
    format!("{}...", truncated)
}

pub fn is_valid_identifier(identifier: &str) -> bool {
    IDENTIFIER.is_match(identifier)
}
