use crate::core::config::Config;
use crate::core::download::{self, DownloadProgress, Downloader};
use crate::core::github::Asset;
use crate::error::{NetplayError, Result};
use crate::utils::fs;
use std::path::{Path, PathBuf};

/// How a downloaded asset turns into an installation directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Zip containing the top-level install directory.
    Zip,
    /// Self-contained executable placed inside the install directory as is.
    AppImage,
}

impl AssetKind {
    pub fn from_name(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".appimage") {
            AssetKind::AppImage
        } else {
            AssetKind::Zip
        }
    }
}

/// Downloads release assets and swaps them in as the current installation.
pub struct ArchiveFetcher {
    config: Config,
    downloader: Downloader,
}

impl ArchiveFetcher {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            config,
            downloader: Downloader::new()?,
        })
    }

    /// Returns the download location, fetching the asset only if nothing is there yet.
    pub fn fetch<F>(&self, asset: &Asset, on_progress: F) -> Result<PathBuf>
    where
        F: FnMut(DownloadProgress),
    {
        let download_path = self.config.get_download_path(&asset.name);

        if download_path.exists() {
            log::info!(
                "{} already exists. Skipping download.",
                download_path.display()
            );
            return Ok(download_path);
        }

        self.downloader
            .download_file(&asset.browser_download_url, &download_path, on_progress)?;
        Ok(download_path)
    }

    /// Fetches `asset` and installs it, returning the extracted entry names.
    pub fn fetch_and_install<F>(&self, asset: &Asset, on_progress: F) -> Result<Vec<String>>
    where
        F: FnMut(DownloadProgress),
    {
        let download_path = self.fetch(asset, on_progress)?;
        self.install(&download_path, AssetKind::from_name(&asset.name))
    }

    pub fn install(&self, download_path: &Path, kind: AssetKind) -> Result<Vec<String>> {
        fs::ensure_dir_exists(&self.config.app_data_dir)?;

        let staging = self.config.get_staging_dir();
        fs::remove_dir_recursive(&staging)?;
        fs::ensure_dir_exists(&staging)?;

        let result = self.stage_and_swap(download_path, kind, &staging);
        if let Err(e) = fs::remove_dir_recursive(&staging) {
            log::warn!("Could not remove staging directory {}: {e}", staging.display());
        }
        result
    }

    fn stage_and_swap(
        &self,
        download_path: &Path,
        kind: AssetKind,
        staging: &Path,
    ) -> Result<Vec<String>> {
        let extracted = staging.join(&self.config.archive_root);

        let entries = match kind {
            AssetKind::Zip => download::extract_zip(download_path, staging)?,
            AssetKind::AppImage => stage_executable(download_path, &extracted)?,
        };

        if !extracted.is_dir() {
            return Err(NetplayError::install_error(format!(
                "archive {} has no top-level '{}' directory",
                download_path.display(),
                self.config.archive_root
            )));
        }

        let install_dir = self.config.get_install_dir();
        if install_dir.exists() {
            log::warn!("{} already exists. Replacing it.", install_dir.display());
        }
        fs::replace_dir(&extracted, &install_dir, &self.config.get_previous_dir())?;

        log::info!("Installed netplay build to {}", install_dir.display());
        Ok(entries)
    }
}

fn stage_executable(download_path: &Path, target_dir: &Path) -> Result<Vec<String>> {
    let file_name = download_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| NetplayError::extraction_error(download_path, "invalid file name"))?;

    fs::ensure_dir_exists(target_dir)?;
    let target = target_dir.join(file_name);
    std::fs::copy(download_path, &target)?;
    fs::make_executable(&target)?;

    Ok(vec![file_name.to_string()])
}
