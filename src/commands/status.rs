use crate::core::config::Config;
use crate::core::credential;
use crate::core::platform::Platform;
use crate::error::Result;
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub struct InstallStatus {
    pub install_dir: PathBuf,
    pub installed: bool,
    /// `None` when the platform has no play key location.
    pub credential_path: Option<PathBuf>,
    pub credential_present: bool,
    pub cached_downloads: Vec<PathBuf>,
    /// Staging or backup directories left behind by an interrupted install.
    pub leftovers: Vec<PathBuf>,
}

pub fn collect_status(config: &Config, platform: &Platform) -> Result<InstallStatus> {
    let install_dir = config.get_install_dir();
    let installed = install_dir.is_dir();

    let credential_path = credential::credential_path(platform, &install_dir).ok();
    let credential_present = credential_path
        .as_ref()
        .map(|path| path.is_file())
        .unwrap_or(false);

    let mut cached_downloads = Vec::new();
    if config.temp_dir.is_dir() {
        for entry in std::fs::read_dir(&config.temp_dir)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| platform.matches_asset(name))
                .unwrap_or(false);
            if matches && path.is_file() {
                cached_downloads.push(path);
            }
        }
        cached_downloads.sort();
    }

    let leftovers = [config.get_staging_dir(), config.get_previous_dir()]
        .into_iter()
        .filter(|path| path.exists())
        .collect();

    Ok(InstallStatus {
        install_dir,
        installed,
        credential_path,
        credential_present,
        cached_downloads,
        leftovers,
    })
}

pub fn show_status(config: &Config) -> Result<()> {
    let platform = Platform::current();
    let status = collect_status(config, &platform)?;

    println!("🔍 Netplay installation status ({platform})");
    println!();

    println!("📁 Installation: {}", status.install_dir.display());
    if status.installed {
        println!("    ✅ installed");
    } else {
        println!("    ❌ missing (run `netplay-updater update`)");
    }

    match &status.credential_path {
        Some(path) => {
            println!("🔑 Play key: {}", path.display());
            if status.credential_present {
                println!("    ✅ present");
            } else {
                println!("    ❌ missing");
            }
        }
        None => println!("🔑 Play key: not supported on {platform}"),
    }

    if status.cached_downloads.is_empty() {
        println!("⬇️  No cached downloads in {}", config.temp_dir.display());
    } else {
        println!("⬇️  Cached downloads (reused by the next update):");
        for path in &status.cached_downloads {
            println!("    {}", path.display());
        }
    }

    for path in &status.leftovers {
        println!("⚠️  Leftover from an interrupted install: {}", path.display());
    }

    Ok(())
}
