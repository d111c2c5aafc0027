use crate::core::config::Config;
use crate::core::platform::Platform;
use crate::core::resolver::ReleaseResolver;
use crate::error::Result;

pub fn show_latest(config: &Config) -> Result<()> {
    let platform = Platform::current();
    println!(
        "🔍 Looking up the latest {}/{} release for {platform}...",
        config.repo_owner, config.repo_name
    );

    let asset = ReleaseResolver::new(config)?.resolve(&platform)?;

    println!("📦 {}", asset.name);
    println!("   {}", asset.browser_download_url);
    if let Some(size) = asset.size {
        println!("   {size} bytes");
    }

    let download_path = config.get_download_path(&asset.name);
    if download_path.exists() {
        println!("   Already downloaded to {}", download_path.display());
    }
    Ok(())
}
