use std::collections::HashMap;

/// Splits a raw `Set-Cookie` value into `name -> value`.
///
/// Attributes such as `Path` or `HttpOnly` end up in the map too; callers
/// look up the name they need. A segment without `=` maps to an empty value.
pub fn parse_cookies(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for segment in raw.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
        cookies.insert(name.trim().to_string(), value.to_string());
    }
    cookies
}

/// First cookie whose name starts with `prefix`, in header order.
pub fn find_cookie_with_prefix(raw: &str, prefix: &str) -> Option<(String, String)> {
    raw.split(';')
        .map(str::trim)
        .filter_map(|segment| segment.split_once('='))
        .find(|(name, _)| name.trim().starts_with(prefix))
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
}
