use crate::core::config::Config;
use crate::core::github::{Asset, GitHubClient, Release};
use crate::core::platform::Platform;
use crate::error::{NetplayError, Result};

/// Picks the first asset whose name ends with the platform's suffix.
pub fn find_platform_asset<'a>(release: &'a Release, platform: &Platform) -> Result<&'a Asset> {
    release
        .assets
        .iter()
        .find(|asset| platform.matches_asset(&asset.name))
        .ok_or_else(|| NetplayError::AssetNotFound {
            platform: platform.to_string(),
        })
}

/// Looks up the latest published netplay build for one platform.
pub struct ReleaseResolver {
    github: GitHubClient,
    repo_owner: String,
    repo_name: String,
}

impl ReleaseResolver {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            github: GitHubClient::new(&config.api_base_url, config.github_token())?,
            repo_owner: config.repo_owner.clone(),
            repo_name: config.repo_name.clone(),
        })
    }

    pub fn resolve(&self, platform: &Platform) -> Result<Asset> {
        // No build is published for this platform, so there is nothing to ask the API for.
        if platform.asset_suffix().is_none() {
            return Err(NetplayError::AssetNotFound {
                platform: platform.to_string(),
            });
        }

        log::info!(
            "Checking {}/{} for the latest {platform} build",
            self.repo_owner,
            self.repo_name
        );
        let release = self
            .github
            .get_latest_release(&self.repo_owner, &self.repo_name)?;
        let asset = find_platform_asset(&release, platform)?;

        log::info!("Latest release {} provides {}", release.tag_name, asset.name);
        Ok(asset.clone())
    }
}
