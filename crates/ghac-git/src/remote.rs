//! Git remote parsing and base repository selection.

use url::Url;

use ghac_core::Repo;

/// Value of `remote.<name>.gh-resolved` that marks the base repository.
pub const RESOLVED_BASE: &str = "base";

/// A git remote with the repository its fetch URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    /// Remote name (e.g., "origin", "upstream").
    pub name: String,
    /// Fetch URL.
    pub fetch_url: String,
    /// Repository parsed from the fetch URL.
    pub repo: Option<Repo>,
    /// The `gh-resolved` config value, empty when unset.
    pub resolved: String,
}

impl Remote {
    /// Parse `git remote -v` output, ordered `upstream`, `github`, `origin`,
    /// then everything else in listing order.
    pub fn parse_remotes(output: &str) -> Vec<Self> {
        let mut remotes: Vec<Self> = Vec::new();

        for line in output.lines() {
            let mut fields = line.split_whitespace();
            let (Some(name), Some(url)) = (fields.next(), fields.next()) else {
                continue;
            };
            if remotes.iter().any(|r| r.name == name) {
                continue;
            }
            remotes.push(Self {
                name: name.to_string(),
                fetch_url: url.to_string(),
                repo: parse_remote_url(url),
                resolved: String::new(),
            });
        }

        remotes.sort_by_key(|r| name_priority(&r.name));
        remotes
    }

    /// Apply `git config --get-regexp '^remote\..*\.gh-resolved$'` output.
    pub fn apply_resolved(remotes: &mut [Self], config_output: &str) {
        for line in config_output.lines() {
            let Some((key, value)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            let Some(name) = key
                .strip_prefix("remote.")
                .and_then(|rest| rest.strip_suffix(".gh-resolved"))
            else {
                continue;
            };
            if let Some(remote) = remotes.iter_mut().find(|r| r.name == name) {
                remote.resolved = value.trim().to_string();
            }
        }
    }
}

fn name_priority(name: &str) -> u8 {
    match name {
        "upstream" => 0,
        "github" => 1,
        "origin" => 2,
        _ => 3,
    }
}

/// Pick the base repository: a remote marked `gh-resolved = base` wins,
/// otherwise the first remote (in priority order) with a parsable URL.
pub fn resolve_base_repo(remotes: &[Remote]) -> Option<&Repo> {
    remotes
        .iter()
        .filter(|r| r.resolved == RESOLVED_BASE)
        .find_map(|r| r.repo.as_ref())
        .or_else(|| remotes.iter().find_map(|r| r.repo.as_ref()))
}

/// Parse a remote URL (`https://`, `ssh://`, `git://` or scp-like
/// `git@host:owner/repo.git`) into the repository it points at.
pub fn parse_remote_url(raw: &str) -> Option<Repo> {
    let url = Url::parse(&normalize_scp_syntax(raw)).ok()?;
    let host = url.host_str()?;
    let host = if host.eq_ignore_ascii_case("ssh.github.com") {
        "github.com"
    } else {
        host
    };

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let name = segments.next()?.trim_end_matches(".git");
    if name.is_empty() || segments.next().is_some() {
        return None;
    }
    Some(Repo::with_host(owner, name, host))
}

fn normalize_scp_syntax(raw: &str) -> String {
    let raw = raw
        .strip_prefix("git+")
        .filter(|rest| rest.starts_with("ssh:") || rest.starts_with("https:"))
        .unwrap_or(raw);
    if raw.contains("://") {
        return raw.to_string();
    }
    match raw.split_once(':') {
        Some((user_host, path)) if !user_host.contains('/') => {
            format!("ssh://{user_host}/{}", path.trim_start_matches('/'))
        }
        _ => raw.to_string(),
    }
}
