/// Hostname extraction for attributing time to sites
use url::Url;

/// Extract the host component of a URL
///
/// Mirrors what the browser reports as `URL.hostname`:
/// - https://www.google.com/search?q=rust → www.google.com
/// - http://localhost:3000 → localhost
/// - http://[::1]:8080 → [::1]
///
/// Returns `None` when the URL does not parse or has no host
/// (e.g. `about:blank`, `data:` URLs). Those tabs are never attributed.
pub fn hostname_of(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    Url::parse(url)
        .ok()?
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}
