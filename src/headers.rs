use crate::session::SessionContext;

/// Name of the cookie the portal sets after a successful login.
pub const AUTH_COOKIE_NAME: &str = "ForDecanat";

pub type HeaderList = Vec<(&'static str, String)>;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Headers for the next request. The portal refuses requests that don't look
/// like they come from a browser, hence the static set.
pub fn build_headers(session: &SessionContext, referer: &str) -> HeaderList {
    let mut headers: HeaderList = vec![
        (
            "accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8"
                .to_string(),
        ),
        ("accept-language", "en-US,en;q=0.9".to_string()),
        ("cache-control", "no-cache".to_string()),
        ("pragma", "no-cache".to_string()),
        ("sec-gpc", "1".to_string()),
        ("upgrade-insecure-requests", "1".to_string()),
        ("referer", referer.to_string()),
        ("referrer-policy", "strict-origin-when-cross-origin".to_string()),
        ("user-agent", USER_AGENT.to_string()),
    ];

    if let Some(cookie) = cookie_header(session) {
        headers.push(("cookie", cookie));
    }
    headers
}

// Never emit an empty cookie header.
fn cookie_header(session: &SessionContext) -> Option<String> {
    let mut pairs = vec![];
    if let Some(token) = session.session_token() {
        pairs.push(format!("{AUTH_COOKIE_NAME}={token}"));
    }
    if let Some(antiforgery) = session.antiforgery_token() {
        pairs.push(format!("{}={}", antiforgery.name, antiforgery.value));
    }
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
