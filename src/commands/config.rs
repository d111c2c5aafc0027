use crate::core::config::Config;
use crate::error::Result;

pub fn show_config(config: &Config) -> Result<()> {
    let mut shown = config.clone();
    if shown.github_api_token.is_some() {
        shown.github_api_token = Some("********".to_string());
    }
    if shown.env_github_token.is_some() {
        println!("GITHUB_TOKEN is set and overrides github_api_token");
    }
    println!("{}", serde_json::to_string_pretty(&shown)?);
    Ok(())
}
