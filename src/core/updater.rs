use crate::core::config::Config;
use crate::core::credential::{CredentialService, CredentialWriter};
use crate::core::download::{self, DownloadProgress};
use crate::core::install::ArchiveFetcher;
use crate::core::platform::Platform;
use crate::core::resolver::ReleaseResolver;
use crate::error::Result;

/// Runs resolve, fetch/install and play key write in order; the first failure aborts.
pub struct NetplayUpdater {
    platform: Platform,
    resolver: ReleaseResolver,
    fetcher: ArchiveFetcher,
    credentials: CredentialWriter,
}

impl NetplayUpdater {
    pub fn new(config: Config) -> Result<Self> {
        Self::for_platform(config, Platform::current())
    }

    pub fn for_platform(config: Config, platform: Platform) -> Result<Self> {
        Ok(Self {
            resolver: ReleaseResolver::new(&config)?,
            credentials: CredentialWriter::new(platform.clone(), config.get_install_dir()),
            fetcher: ArchiveFetcher::new(config)?,
            platform,
        })
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn check_for_updates(&self, service: &dyn CredentialService) -> Result<Vec<String>> {
        self.check_for_updates_with_progress(service, download::log_progress)
    }

    pub fn check_for_updates_with_progress<F>(
        &self,
        service: &dyn CredentialService,
        on_progress: F,
    ) -> Result<Vec<String>>
    where
        F: FnMut(DownloadProgress),
    {
        log::info!("Checking for netplay update");
        let asset = self.resolver.resolve(&self.platform)?;
        let entries = self.fetcher.fetch_and_install(&asset, on_progress)?;
        self.credentials.fetch_and_write(service)?;
        Ok(entries)
    }
}
