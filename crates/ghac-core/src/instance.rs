//! GitHub instance handling for different deployment types.
//!
//! Supports github.com, GitHub Enterprise Server, and GHE.com tenants.

/// Known GitHub cloud hostname.
pub const GITHUB_COM: &str = "github.com";

/// GitHub localhost for development.
const LOCALHOST: &str = "github.localhost";

/// GHE.com tenant suffix.
const GHE_COM_SUFFIX: &str = ".ghe.com";

/// Normalize a GitHub hostname by removing protocol and trailing slashes.
pub fn normalize_hostname(host: &str) -> String {
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);

    host.trim_end_matches('/').to_lowercase()
}

/// Check if a hostname is a GitHub.com cloud instance.
pub fn is_github_com(host: &str) -> bool {
    let normalized = normalize_hostname(host);
    normalized == GITHUB_COM || normalized == LOCALHOST
}

/// Check if a hostname is a GHE.com tenant.
pub fn is_ghe_com(host: &str) -> bool {
    normalize_hostname(host).ends_with(GHE_COM_SUFFIX)
}

/// Check if a hostname is an enterprise server (not cloud, not GHE.com).
pub fn is_enterprise(host: &str) -> bool {
    !is_github_com(host) && !is_ghe_com(host)
}

/// Host used for `OWNER/REPO` references without an explicit host.
///
/// Honors `GH_HOST`, falling back to github.com.
pub fn default_host() -> String {
    match std::env::var("GH_HOST") {
        Ok(host) if !host.trim().is_empty() => normalize_hostname(&host),
        _ => GITHUB_COM.to_string(),
    }
}

/// Get the REST API base URL for a given hostname.
pub fn rest_url(host: &str) -> String {
    let normalized = normalize_hostname(host);
    if is_github_com(&normalized) {
        "https://api.github.com/".to_string()
    } else if is_ghe_com(&normalized) {
        format!("https://api.{normalized}/")
    } else {
        format!("https://{normalized}/api/v3/")
    }
}
