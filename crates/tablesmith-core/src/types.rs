//! Mapping from Postgres catalog types to generated Rust types.
//!
//! Unmapped types are never dropped: they come back as a tagged string that
//! embeds the catalog type, so the generated file fails to compile at exactly
//! the spot that needs a manual decision.

/// Prefix of every value returned for an unmapped catalog type.
pub const UNKNOWN_TYPE_TAG: &str = "UNKNOWN : ";

/// Rust type used for a column of the given catalog type.
pub fn target_type(sql_type: &str) -> String {
    match sql_type {
        "text" => "String".to_string(),
        "integer" => "i32".to_string(),
        "bigint" => "i64".to_string(),
        "double precision" => "f64".to_string(),
        other => unknown(other),
    }
}

/// `format!` placeholder used to display a column of the given catalog type.
pub fn display_format(sql_type: &str) -> String {
    match sql_type {
        "text" | "integer" | "bigint" => "{}".to_string(),
        "double precision" => "{:.6}".to_string(),
        other => unknown(other),
    }
}

fn unknown(sql_type: &str) -> String {
    format!("{UNKNOWN_TYPE_TAG}{sql_type}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_types() {
        assert_eq!(target_type("text"), "String");
        assert_eq!(target_type("integer"), "i32");
        assert_eq!(target_type("bigint"), "i64");
        assert_eq!(target_type("double precision"), "f64");
    }

    #[test]
    fn maps_known_display_formats() {
        assert_eq!(display_format("text"), "{}");
        assert_eq!(display_format("integer"), "{}");
        assert_eq!(display_format("bigint"), "{}");
        assert_eq!(display_format("double precision"), "{:.6}");
    }

    #[test]
    fn unknown_types_embed_the_catalog_name() {
        let mapped = target_type("character varying(255)");
        assert_eq!(mapped, "UNKNOWN : character varying(255)");

        let format = display_format("timestamp with time zone");
        assert_eq!(format, "UNKNOWN : timestamp with time zone");
    }

    #[test]
    fn matching_is_exact() {
        assert_eq!(target_type("TEXT"), "UNKNOWN : TEXT");
        assert_eq!(target_type("integer[]"), "UNKNOWN : integer[]");
        assert_eq!(display_format(""), "UNKNOWN : ");
    }
}
