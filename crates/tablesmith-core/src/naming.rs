/// Convert a snake_case catalog identifier to PascalCase.
///
/// Each underscore-separated segment gets its first character upper-cased and
/// keeps the rest untouched, so `HTTP_code` becomes `HTTPCode`. Empty segments
/// (leading, trailing or doubled underscores) contribute nothing.
pub fn snake_to_upper_camel(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    for segment in identifier.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert a snake_case catalog identifier to camelCase.
pub fn to_lower_camel(identifier: &str) -> String {
    let upper = snake_to_upper_camel(identifier);
    let mut chars = upper.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
