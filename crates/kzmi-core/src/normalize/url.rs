//! Workshop URL correction.

const INSECURE_SCHEME: &str = "http://";
const SECURE_SCHEME: &str = "https://";
const MALFORMED_QUERY: &str = "/?";
const QUERY: &str = "?";

/// Upgrades a leading `http://` to `https://` and collapses the first `/?`
/// into `?`. Each rewrite touches at most one occurrence.
pub fn fix_url(url: &str) -> String {
    let url = match url.strip_prefix(INSECURE_SCHEME) {
        Some(rest) => format!("{SECURE_SCHEME}{rest}"),
        None => url.to_string(),
    };
    url.replacen(MALFORMED_QUERY, QUERY, 1)
}
