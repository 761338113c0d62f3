//! DDL parsing for seeding.
//!
//! Parses a single CREATE TABLE statement into a [`TableSchema`]:
//! - Column definitions with type, size and nullability
//! - Inline and table-level primary keys (composite keys included)
//! - Foreign key membership from FOREIGN KEY ... REFERENCES and inline REFERENCES
//! - Auto-increment markers (AUTO_INCREMENT, AUTOINCREMENT, SERIAL, IDENTITY)

use super::{Column, ColumnType, TableSchema};
use crate::error::{Result, SeedError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex to extract table name from CREATE TABLE
/// Supports: `table` (MySQL), "table" (PostgreSQL), [table] (MSSQL), table (unquoted), schema.table
/// `ident` is the name as written, `name` the bare table name
static CREATE_TABLE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)CREATE\s+(?:TEMP(?:ORARY)?\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?P<ident>(?:[\[`"]?\w+[\]`"]?\s*\.\s*)*[\[`"]?(?P<name>[^\[\]`"\s(]+)[\]`"]?)"#)
        .unwrap()
});

/// `NOT EXISTS` right after a bare `IF`, i.e. the name itself is missing
static NOT_EXISTS_TAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s+NOT\s+EXISTS\b").unwrap());

/// Regex for column definition: name as written, bare name, type keyword, optional type arguments
static COLUMN_DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?P<ident>[\[`"]?(?P<name>[^\[\]`"\s,()]+)[\]`"]?)\s+(?P<type>\w+)(?:\s*\((?P<args>[^)]*)\))?"#)
        .unwrap()
});

/// Start of a table-level PRIMARY KEY column list, up to its opening parenthesis
static PRIMARY_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)PRIMARY\s+KEY\s*(?:CLUSTERED\s*|NONCLUSTERED\s*)?\(").unwrap()
});

/// Regex for inline PRIMARY KEY on column
static INLINE_PRIMARY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bPRIMARY\s+KEY\b").unwrap());

/// Regex for FOREIGN KEY constraint; the referenced column list is optional
static FOREIGN_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)FOREIGN\s+KEY\s*\(([^)]+)\)\s*REFERENCES\s+(?:[\[\]`"\w]+\s*\.\s*)*[\[`"]?([^\[\]`"\s(]+)[\]`"]?"#,
    )
    .unwrap()
});

/// Regex for any REFERENCES target, inline or table-level
static REFERENCES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bREFERENCES\s+(?:[\[\]`"\w]+\s*\.\s*)*[\[`"]?([^\[\]`"\s(,;]+)[\]`"]?"#)
        .unwrap()
});

/// Regex to detect NOT NULL constraint
static NOT_NULL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bNOT\s+NULL\b").unwrap());

/// Regex to detect AUTO_INCREMENT (MySQL), AUTOINCREMENT (SQLite) and IDENTITY columns
static AUTO_INCREMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bAUTO_?INCREMENT\b|\bGENERATED\s+(?:ALWAYS|BY\s+DEFAULT)\s+AS\s+IDENTITY\b|\bIDENTITY\s*(?:\(|$|\s)")
        .unwrap()
});

/// Keywords that start a table-level constraint rather than a column definition
const TABLE_CONSTRAINT_KEYWORDS: &[&str] = &[
    "PRIMARY",
    "CONSTRAINT",
    "UNIQUE",
    "CHECK",
    "KEY",
    "FOREIGN",
    "INDEX",
    "FULLTEXT",
    "SPATIAL",
];

/// Parse one CREATE TABLE statement into its column model.
///
/// Fails with [`SeedError::MalformedDdl`] when the table name or the
/// parenthesized column block cannot be located, or when a clause is
/// neither a table constraint nor a column definition.
pub fn parse_create_table(stmt: &str) -> Result<TableSchema> {
    let (ident, table_name) = table_name_parts(stmt)
        .ok_or_else(|| SeedError::malformed(None, "no table name after CREATE TABLE"))?;

    let body = extract_table_body(stmt).ok_or_else(|| {
        SeedError::malformed(Some(&table_name), "no parenthesized column block")
    })?;

    let clauses = split_table_body(body);

    // First pass: every column named by a FOREIGN KEY clause
    let fk_columns: Vec<String> = clauses
        .iter()
        .flat_map(|clause| parse_foreign_key_columns(clause))
        .collect();

    // Second pass: column definitions, table constraints applied afterwards
    let mut table = TableSchema::new(table_name).with_ident(ident);
    let mut pk_constraints = Vec::new();

    for clause in &clauses {
        if clause.is_empty() {
            continue;
        }

        if is_table_constraint(clause) {
            if let Some(cols) = parse_primary_key_constraint(clause) {
                pk_constraints.extend(cols);
            }
            continue;
        }

        let mut col = parse_column_def(clause).ok_or_else(|| {
            SeedError::malformed(
                Some(&table.name),
                format!("unrecognized column definition `{}`", preview(clause)),
            )
        })?;
        col.is_foreign_key = fk_columns
            .iter()
            .any(|fk| fk.eq_ignore_ascii_case(&col.name))
            || REFERENCES_RE.is_match(clause);
        table.columns.push(col);
    }

    for name in &pk_constraints {
        match table.get_column_mut(name) {
            Some(col) => col.is_primary_key = true,
            None => tracing::debug!(
                table = %table.name,
                column = %name,
                "primary key names an undeclared column"
            ),
        }
    }

    if table.columns.is_empty() {
        return Err(SeedError::malformed(
            Some(&table.name),
            "column block declares no columns",
        ));
    }

    Ok(table)
}

/// Extract table name from CREATE TABLE statement
pub fn extract_create_table_name(stmt: &str) -> Option<String> {
    table_name_parts(stmt).map(|(_, name)| name)
}

/// Table identifier as written and bare table name
fn table_name_parts(stmt: &str) -> Option<(String, String)> {
    let caps = CREATE_TABLE_NAME_RE.captures(stmt)?;
    let ident = caps.name("ident")?;
    let name = caps.name("name")?.as_str();

    // `CREATE TABLE IF NOT EXISTS (` has no name; the regex falls back to `IF`
    if name.eq_ignore_ascii_case("if")
        && ident.as_str() == name
        && NOT_EXISTS_TAIL_RE.is_match(&stmt[ident.end()..])
    {
        return None;
    }

    Some((ident.as_str().to_string(), name.to_string()))
}

/// Whether a statement is a CREATE TABLE statement
pub fn is_create_table(stmt: &str) -> bool {
    CREATE_TABLE_NAME_RE.is_match(stmt)
}

/// Names of every table referenced through `REFERENCES <table>`, deduplicated, in order
pub fn extract_referenced_tables(stmt: &str) -> Vec<String> {
    let mut tables: Vec<String> = Vec::new();
    for caps in REFERENCES_RE.captures_iter(stmt) {
        if let Some(m) = caps.get(1) {
            let name = m.as_str();
            if !tables.iter().any(|t| t.eq_ignore_ascii_case(name)) {
                tables.push(name.to_string());
            }
        }
    }
    tables
}

/// Extract the body of a CREATE TABLE statement (between first ( and matching ))
fn extract_table_body(stmt: &str) -> Option<&str> {
    let bytes = stmt.as_bytes();
    let mut depth = 0;
    let mut start = None;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &b) in bytes.iter().enumerate() {
        if escape_next {
            escape_next = false;
            continue;
        }

        if b == b'\\' && in_string {
            escape_next = true;
            continue;
        }

        if b == b'\'' {
            in_string = !in_string;
            continue;
        }

        if in_string {
            continue;
        }

        if b == b'(' {
            if depth == 0 {
                start = Some(i + 1);
            }
            depth += 1;
        } else if b == b')' && depth > 0 {
            depth -= 1;
            if depth == 0 {
                if let Some(s) = start {
                    return Some(&stmt[s..i]);
                }
            }
        }
    }

    None
}

/// Split table body by commas, respecting nested parentheses and quoted strings
pub fn split_table_body(body: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for ch in body.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }

        if ch == '\\' && in_string {
            current.push(ch);
            escape_next = true;
            continue;
        }

        if ch == '\'' {
            in_string = !in_string;
            current.push(ch);
            continue;
        }

        if in_string {
            current.push(ch);
            continue;
        }

        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current = String::new();
            }
            _ => {
                current.push(ch);
            }
        }
    }

    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    parts
}

/// Split a script into statements on `;`, ignoring semicolons inside
/// quotes, parentheses and comments. Comments are dropped.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut chars = script.chars().peekable();

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            current.push(ch);
            if ch == '\\' && q == '\'' {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        match ch {
            '\'' | '"' | '`' => {
                quote = Some(ch);
                current.push(ch);
            }
            '-' if chars.peek() == Some(&'-') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        current.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                current.push(' ');
            }
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                current.push(ch);
            }
            ';' if depth <= 0 => {
                let stmt = current.trim();
                if !stmt.is_empty() {
                    statements.push(stmt.to_string());
                }
                current.clear();
                depth = 0;
            }
            _ => current.push(ch),
        }
    }

    let stmt = current.trim();
    if !stmt.is_empty() {
        statements.push(stmt.to_string());
    }

    statements
}

fn is_table_constraint(clause: &str) -> bool {
    let first = clause
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("");
    TABLE_CONSTRAINT_KEYWORDS
        .iter()
        .any(|kw| first.eq_ignore_ascii_case(kw))
}

/// Parse a column definition
fn parse_column_def(def: &str) -> Option<Column> {
    let caps = COLUMN_DEF_RE.captures(def)?;
    let ident = caps.name("ident")?.as_str().to_string();
    let name = caps.name("name")?.as_str().to_string();
    let type_str = caps.name("type")?.as_str();
    let size = caps.name("args").and_then(|m| parse_size(m.as_str()));
    let rest = &def[caps.get(0)?.end()..];

    let auto_increment =
        ColumnType::is_serial_keyword(type_str) || AUTO_INCREMENT_RE.is_match(rest);

    Some(Column {
        name,
        ident,
        sql_type: type_str.to_uppercase(),
        size,
        not_null: NOT_NULL_RE.is_match(rest),
        auto_increment,
        is_primary_key: INLINE_PRIMARY_KEY_RE.is_match(rest),
        is_foreign_key: false,
    })
}

/// First integer argument of a type, e.g. 10 for DECIMAL(10,2)
fn parse_size(args: &str) -> Option<u32> {
    args.split(',')
        .next()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
}

/// Parse PRIMARY KEY constraint, returns column names
fn parse_primary_key_constraint(constraint: &str) -> Option<Vec<String>> {
    let start = PRIMARY_KEY_RE.find(constraint)?.end();
    let list = closing_group(&constraint[start..])?;
    Some(
        split_table_body(list)
            .iter()
            .filter_map(|part| key_part_column(part))
            .collect(),
    )
}

/// Text before the `)` that closes an already opened parenthesis
fn closing_group(s: &str) -> Option<&str> {
    let mut depth = 1;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Column of one key part, without prefix length or sort order: `name(10) DESC` is `name`
fn key_part_column(part: &str) -> Option<String> {
    let part = part.trim();
    let end = part
        .find(|c: char| c == '(' || c.is_whitespace())
        .unwrap_or(part.len());
    parse_column_list(&part[..end]).into_iter().next()
}

/// Local column names of every FOREIGN KEY clause in a constraint
fn parse_foreign_key_columns(constraint: &str) -> Vec<String> {
    FOREIGN_KEY_RE
        .captures_iter(constraint)
        .filter_map(|caps| caps.get(1))
        .flat_map(|m| parse_column_list(m.as_str()))
        .collect()
}

/// Parse a comma-separated column list, stripping quotes (backticks, double quotes, brackets)
pub fn parse_column_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|c| {
            c.trim()
                .trim_matches('`')
                .trim_matches('"')
                .trim_matches('[')
                .trim_matches(']')
                .to_string()
        })
        .filter(|c| !c.is_empty())
        .collect()
}

fn preview(s: &str) -> String {
    const MAX: usize = 60;
    if s.chars().count() <= MAX {
        s.to_string()
    } else {
        let cut: String = s.chars().take(MAX).collect();
        format!("{cut}...")
    }
}
