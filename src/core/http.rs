use crate::error::{NetplayError, Result};
use reqwest::blocking::{Client, Response};

pub const USER_AGENT: &str = concat!("netplay-updater/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> Result<Client> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(client)
}

/// Turns a non-success response into `HttpStatus` so the URL ends up in the message.
pub fn ensure_success(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(NetplayError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}
