use tablesmith_core::{Column, Table, snake_to_upper_camel, target_type, to_lower_camel};

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv",
    "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const RESERVED_PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Names the data-access module declares itself.
const GENERATED_LOCALS: &[&str] = &["row", "rows", "pool"];

/// Postgres keywords that are reserved as column or table names.
const SQL_RESERVED: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
    "authorization", "binary", "both", "case", "cast", "check", "collate", "collation", "column",
    "concurrently", "constraint", "create", "cross", "current_catalog", "current_date",
    "current_role", "current_schema", "current_time", "current_timestamp", "current_user",
    "default", "deferrable", "desc", "distinct", "do", "else", "end", "except", "false", "fetch",
    "for", "foreign", "freeze", "from", "full", "grant", "group", "having", "ilike", "in",
    "initially", "inner", "intersect", "into", "is", "isnull", "join", "lateral", "leading",
    "left", "like", "limit", "localtime", "localtimestamp", "natural", "not", "notnull", "null",
    "offset", "on", "only", "or", "order", "outer", "overlaps", "placing", "primary",
    "references", "returning", "right", "select", "session_user", "similar", "some", "symmetric",
    "system_user", "table", "tablesample", "then", "to", "trailing", "true", "union", "unique",
    "user", "using", "variadic", "verbose", "when", "where", "window", "with",
];

/// Names derived from one column, shared by all artifacts.
pub(crate) struct ColumnNames {
    /// Struct field, e.g. `CreatedAt`.
    pub field: String,
    /// Parameter or local binding, e.g. `createdAt`.
    pub binding: String,
    pub rust_type: String,
}

impl ColumnNames {
    pub fn of(column: &Column) -> Self {
        Self {
            field: snake_to_upper_camel(&identifier_source(&column.name)),
            binding: escape_keyword(to_lower_camel(&identifier_source(&column.name))),
            rust_type: target_type(&column.data_type),
        }
    }
}

pub(crate) fn entity_name(table: &Table) -> String {
    snake_to_upper_camel(&identifier_source(&table.name))
}

/// Catalog name with every character a Rust identifier cannot hold turned
/// into a word separator, e.g. `user-data` to `user_data`.
fn identifier_source(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Identifier as written in generated SQL, quoted when Postgres would
/// otherwise fold its case or read it as a keyword.
pub(crate) fn quote_ident(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$')
        && !SQL_RESERVED.contains(&name);
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Suffix of generated function names, e.g. `load_<suffix>_by_id`.
pub(crate) fn function_suffix(table: &Table) -> String {
    table
        .name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

pub(crate) fn header(table: &Table) -> String {
    format!(
        "// Code generated by tablesmith from table {}. DO NOT EDIT.\n#![allow(non_snake_case)]\n",
        table.name
    )
}

/// Width of the widest `Field:` label, so that types line up.
pub(crate) fn label_width(table: &Table) -> usize {
    table
        .columns
        .iter()
        .map(|column| ColumnNames::of(column).field.chars().count() + 1)
        .max()
        .unwrap_or(0)
}

/// `Field:` padded to `width` characters.
pub(crate) fn label(field: &str, width: usize) -> String {
    format!("{:<width$}", format!("{field}:"))
}

fn escape_keyword(ident: String) -> String {
    let name = ident.as_str();
    if RESERVED_PATH_KEYWORDS.contains(&name) || GENERATED_LOCALS.contains(&name) {
        format!("{ident}_")
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{ident}")
    } else {
        ident
    }
}
