//! Pull request creation through the GitHub REST API.
//!
//! Provides a trait-based abstraction so the publish workflow can be tested
//! without network access. The real client, [`GitHubClient`], issues a single
//! `POST /repos/{owner}/{repo}/pulls` request with a bearer token; any
//! non-success status is a hard failure and nothing is retried.

use std::sync::OnceLock;

use log::info;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Request body for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    /// Branch containing the changes.
    pub head: String,
    /// Branch to merge into.
    pub base: String,
}

/// The parts of the API response the publish workflow reports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
}

/// Trait for opening pull requests - allows mocking in tests
pub trait PullRequestApi {
    /// Open a pull request on `repo`, given as `owner/name`.
    fn create_pull_request(&self, repo: &str, request: &NewPullRequest) -> Result<PullRequest>;
}

/// HTTP client for the GitHub REST API using `ureq`.
pub struct GitHubClient {
    api_base: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for the API rooted at `api_base`.
    ///
    /// Fails if `api_base` is not an absolute URL.
    pub fn new(api_base: &str, token: impl Into<String>) -> Result<Self> {
        Url::parse(api_base)?;
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Endpoint that creates pull requests on `repo`.
    pub fn pulls_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/pulls", self.api_base, repo)
    }
}

impl PullRequestApi for GitHubClient {
    fn create_pull_request(&self, repo: &str, request: &NewPullRequest) -> Result<PullRequest> {
        let url = self.pulls_url(repo);
        let payload = serde_json::to_string(request).map_err(|err| Error::Serialization {
            message: format!("Failed to serialize pull request: {}", err),
        })?;

        let response = http_agent()
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("Content-Type", "application/json")
            .header("User-Agent", concat!("docpub/", env!("CARGO_PKG_VERSION")))
            .send(payload.as_str())
            .map_err(|err| network_error(&url, &err))?;

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|err| network_error(&url, &err))?;
        let pull_request: PullRequest =
            serde_json::from_str(&body).map_err(|err| Error::Network {
                url: url.clone(),
                message: format!("unexpected response body: {}", err),
            })?;

        info!("Opened pull request #{} on {}", pull_request.number, repo);
        Ok(pull_request)
    }
}

/// Shared `ureq` agent.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(ureq::Agent::new_with_defaults)
}

fn network_error(url: &str, err: &ureq::Error) -> Error {
    let message = match err {
        ureq::Error::StatusCode(status) => format!("http status: {}", status),
        other => other.to_string(),
    };
    Error::Network {
        url: url.to_string(),
        message,
    }
}

/// Derive `owner/name` from a repository clone URL.
///
/// Understands `https://host/owner/name(.git)` and scp-style
/// `git@host:owner/name(.git)`. Returns `None` for anything else.
///
/// # Example
///
/// ```
/// use docpub::github::repo_slug_from_url;
///
/// assert_eq!(
///     repo_slug_from_url("https://github.com/libhal/api.git").as_deref(),
///     Some("libhal/api")
/// );
/// assert_eq!(
///     repo_slug_from_url("git@github.com:libhal/api.git").as_deref(),
///     Some("libhal/api")
/// );
/// ```
pub fn repo_slug_from_url(clone_url: &str) -> Option<String> {
    let path = match Url::parse(clone_url) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => {
            let (user_host, path) = clone_url.split_once(':')?;
            if user_host.contains('/') {
                return None;
            }
            path.to_string()
        }
    };

    let mut segments = path.trim_matches('/').split('/');
    let owner = segments.next().filter(|s| !s.is_empty())?;
    let name = segments.next()?.trim_end_matches(".git");
    if name.is_empty() || segments.next().is_some() {
        return None;
    }
    Some(format!("{}/{}", owner, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve exactly one HTTP request with a canned response and hand back
    /// the raw request (headers and body).
    fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
                request.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut body_bytes = vec![0u8; content_length];
            reader.read_exact(&mut body_bytes).unwrap();
            request.push_str(&String::from_utf8(body_bytes).unwrap());

            let mut stream = stream;
            write!(
                stream,
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
            request
        });

        (base, handle)
    }

    fn sample_request() -> NewPullRequest {
        NewPullRequest {
            title: "Add libhal 1.0.0 API documentation".to_string(),
            body: "Adds API documentation for libhal version 1.0.0".to_string(),
            head: "libhal-1.0.0".to_string(),
            base: "main".to_string(),
        }
    }

    #[test]
    fn test_pulls_url() {
        let client = GitHubClient::new("https://api.github.com/", "token").unwrap();
        assert_eq!(
            client.pulls_url("libhal/api"),
            "https://api.github.com/repos/libhal/api/pulls"
        );
    }

    #[test]
    fn test_new_rejects_relative_api_base() {
        let err = GitHubClient::new("api.github.com", "token").err().unwrap();
        assert!(matches!(err, Error::UrlParse(url::ParseError::RelativeUrlWithoutBase)));
        assert!(err.to_string().starts_with("URL parsing error"));
    }

    #[test]
    fn test_request_body_shape() {
        let json: serde_json::Value = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(json["title"], "Add libhal 1.0.0 API documentation");
        assert_eq!(json["head"], "libhal-1.0.0");
        assert_eq!(json["base"], "main");
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_create_pull_request_success() {
        let (base, server) = serve_once(
            "HTTP/1.1 201 Created",
            r#"{"number": 42, "html_url": "https://github.com/libhal/api/pull/42", "state": "open"}"#,
        );
        let client = GitHubClient::new(&base, "secret-token").unwrap();

        let pull_request = client
            .create_pull_request("libhal/api", &sample_request())
            .unwrap();

        assert_eq!(pull_request.number, 42);
        assert_eq!(pull_request.html_url, "https://github.com/libhal/api/pull/42");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /repos/libhal/api/pulls "));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: bearer secret-token"));
        assert!(request.contains(r#""head":"libhal-1.0.0""#));
    }

    #[test]
    fn test_create_pull_request_error_status() {
        let (base, server) = serve_once(
            "HTTP/1.1 422 Unprocessable Entity",
            r#"{"message": "Validation Failed"}"#,
        );
        let client = GitHubClient::new(&base, "secret-token").unwrap();

        let err = client
            .create_pull_request("libhal/api", &sample_request())
            .unwrap_err();

        match err {
            Error::Network { url, message } => {
                assert!(url.ends_with("/repos/libhal/api/pulls"));
                assert!(message.contains("422"));
            }
            other => panic!("expected Network, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_repo_slug_from_https_url() {
        assert_eq!(
            repo_slug_from_url("https://github.com/libhal/api.git").as_deref(),
            Some("libhal/api")
        );
        assert_eq!(
            repo_slug_from_url("https://github.com/libhal/api").as_deref(),
            Some("libhal/api")
        );
        assert_eq!(
            repo_slug_from_url("https://github.com/libhal/api/").as_deref(),
            Some("libhal/api")
        );
    }

    #[test]
    fn test_repo_slug_from_ssh_url() {
        assert_eq!(
            repo_slug_from_url("git@github.com:my-org/docs.git").as_deref(),
            Some("my-org/docs")
        );
        assert_eq!(
            repo_slug_from_url("ssh://git@github.com/my-org/docs.git").as_deref(),
            Some("my-org/docs")
        );
    }

    #[test]
    fn test_repo_slug_rejects_other_shapes() {
        assert_eq!(repo_slug_from_url("/srv/git/api.git"), None);
        assert_eq!(repo_slug_from_url("https://github.com/libhal"), None);
        assert_eq!(repo_slug_from_url("https://example.com/a/b/c.git"), None);
        assert_eq!(repo_slug_from_url("file:///srv/git/api.git"), None);
    }
}
