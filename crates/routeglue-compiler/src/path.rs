/// Rewrite an OpenAPI path template into the router's pattern syntax.
///
/// Each `{name}` becomes `:name`; literal text and segment order are kept.
/// Variable names are not validated, and an unclosed brace is copied through
/// verbatim: malformed templates stay malformed.
pub fn to_route_pattern(template: &str) -> String {
    let mut result = String::with_capacity(template.len());
    let mut current_param = String::new();
    let mut in_param = false;

    for ch in template.chars() {
        match ch {
            '{' => {
                if in_param {
                    result.push('{');
                    result.push_str(&current_param);
                    current_param.clear();
                }
                in_param = true;
            }
            '}' if in_param => {
                result.push(':');
                result.push_str(&current_param);
                current_param.clear();
                in_param = false;
            }
            _ if in_param => current_param.push(ch),
            _ => result.push(ch),
        }
    }

    if in_param {
        result.push('{');
        result.push_str(&current_param);
    }

    result
}

/// Join an optional prefix and a routing pattern.
///
/// The prefix is anchored at `/` and loses any trailing `/`.
pub fn with_prefix(prefix: Option<&str>, pattern: &str) -> String {
    match prefix.map(|p| p.trim_matches('/')) {
        Some(p) if !p.is_empty() => format!("/{}{}", p, pattern),
        _ => pattern.to_string(),
    }
}
