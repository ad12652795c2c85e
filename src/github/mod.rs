//! A client of GitHub REST API scoped to one repository.
//!
//! [`GitHub`] implements every collaborator the notifier needs:
//! [`PullRequestService`](pulls::PullRequestService),
//! [`CommentService`](comments::CommentService) and
//! [`ArtifactService`](crate::workflow::artifact::ArtifactService).

pub mod comments;
pub mod paginate;
pub mod pulls;

use std::fmt::Debug;

use anyhow::{Context as _, bail};
use reqwest::{Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{context::Repository, env::GITHUB_API_URL, github::paginate::PER_PAGE};

/// A client of GitHub REST API, scoped to one repository.
///
/// Cloning is cheap, the underlying connection pool is shared.
#[derive(Clone)]
pub struct GitHub {
    client: reqwest::Client,
    api_url: String,
    token: String,
    repository: Repository,
}

impl Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

impl GitHub {
    /// Creates a client against the API at [`GITHUB_API_URL`].
    pub fn new(token: String, repository: Repository) -> Self {
        Self::with_api_url(GITHUB_API_URL.clone(), token, repository)
    }

    /// Creates a client against the API at `api_url`, e.g. a GitHub Enterprise Server.
    pub fn with_api_url(api_url: String, token: String, repository: Repository) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_owned(),
            token,
            repository,
        }
    }

    /// The URL of a path below the repository, e.g. `pulls`.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.api_url, self.repository.owner, self.repository.name
        )
    }

    /// Builds a request for GitHub REST API.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .bearer_auth(&self.token)
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header(
                header::USER_AGENT,
                concat!("artifact-notifier/", env!("CARGO_PKG_VERSION")),
            )
    }

    /// Fetches one page of a listing below the repository.
    pub(crate) async fn get_page<T>(
        &self,
        path: &str,
        page: u32,
        query: &[(&str, &str)],
    ) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("fetching page {page} of {url}…");
        let request = self
            .request(Method::GET, &url)
            .query(&[("per_page", PER_PAGE.to_string()), ("page", page.to_string())])
            .query(query);
        self.send(request, &url).await
    }

    /// Sends a JSON body to a path below the repository.
    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("sending {method} to {url}…");
        self.send(self.request(method, &url).json(body), &url).await
    }

    async fn send<T>(&self, request: RequestBuilder, url: &str) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .with_context(|| format!("failed to request {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("failed to request {url}: {status} {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to parse data from {url}"))
    }
}
