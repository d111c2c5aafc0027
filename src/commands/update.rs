use crate::core::config::Config;
use crate::core::credential::{CredentialService, FileCredentials, HttpCredentials};
use crate::core::download::DownloadProgress;
use crate::core::updater::NetplayUpdater;
use crate::error::{NetplayError, Result};
use std::io::Write;
use std::path::PathBuf;

/// Where `update` gets the play key from, in priority order: file, URL flag, configured URL.
#[derive(Debug, Default, Clone)]
pub struct CredentialSource {
    pub file: Option<PathBuf>,
    pub url: Option<String>,
    pub token: Option<String>,
}

pub fn credential_service(
    config: &Config,
    source: &CredentialSource,
) -> Result<Box<dyn CredentialService>> {
    if let Some(file) = &source.file {
        return Ok(Box::new(FileCredentials::new(file)));
    }

    let url = source
        .url
        .clone()
        .or_else(|| config.credential_url.clone())
        .ok_or_else(|| {
            NetplayError::config_error(
                "no play key source: pass --credential-file or --credential-url, or set credential_url in the config",
            )
        })?;
    let token = source
        .token
        .clone()
        .or_else(|| std::env::var("NETPLAY_AUTH_TOKEN").ok());

    Ok(Box::new(HttpCredentials::new(&url, token)?))
}

pub fn run_update(config: &Config, source: &CredentialSource) -> Result<()> {
    println!("🔄 Checking for netplay updates...");

    let service = credential_service(config, source)?;
    let updater = NetplayUpdater::new(config.clone())?;
    println!("🖥️  Platform: {}", updater.platform());

    let mut last_percent = None;
    let entries = updater.check_for_updates_with_progress(service.as_ref(), |progress| {
        print_progress(progress, &mut last_percent)
    })?;
    if last_percent.is_some() {
        println!();
    }

    println!("📦 Extracted {} entries", entries.len());
    println!(
        "✅ Netplay installed at {}",
        config.get_install_dir().display()
    );
    Ok(())
}

fn print_progress(progress: DownloadProgress, last_percent: &mut Option<u8>) {
    let Some(percent) = progress.percent() else {
        return;
    };
    if *last_percent == Some(percent) {
        return;
    }
    *last_percent = Some(percent);
    print!("\r⬇️  Downloading... {percent:>3}%");
    let _ = std::io::stdout().flush();
}
