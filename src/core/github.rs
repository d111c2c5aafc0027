use crate::core::http;
use crate::error::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Release {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: Option<u64>,
}

pub struct GitHubClient {
    client: Client,
    api_base_url: String,
    github_token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_base_url: &str, github_token: Option<String>) -> Result<Self> {
        Ok(Self {
            client: http::build_client()?,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            github_token,
        })
    }

    pub fn get_latest_release(&self, repo_owner: &str, repo_name: &str) -> Result<Release> {
        let url = format!(
            "{}/repos/{repo_owner}/{repo_name}/releases/latest",
            self.api_base_url
        );
        log::debug!("GET {url}");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.github_token {
            request = request.bearer_auth(token);
        }

        let response = http::ensure_success(request.send()?, &url)?;
        let release: Release = response.json()?;
        Ok(release)
    }
}
