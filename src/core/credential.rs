use crate::core::http;
use crate::core::platform::Platform;
use crate::error::{NetplayError, Result};
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};

/// Play key object handed to the netplay build. Its shape belongs to the
/// credential service, so it is kept as raw JSON.
pub type Credential = serde_json::Value;

/// Source of the current user's play key.
pub trait CredentialService {
    fn fetch_credential(&self) -> Result<Credential>;
}

pub struct StaticCredentials {
    credential: Credential,
}

impl StaticCredentials {
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

impl CredentialService for StaticCredentials {
    fn fetch_credential(&self) -> Result<Credential> {
        Ok(self.credential.clone())
    }
}

/// Reads the play key from a JSON file on disk.
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialService for FileCredentials {
    fn fetch_credential(&self) -> Result<Credential> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            NetplayError::credential_error(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let credential = serde_json::from_str(&content)?;
        Ok(credential)
    }
}

/// Asks an HTTP endpoint for the play key, authenticating with a bearer token.
pub struct HttpCredentials {
    client: Client,
    url: String,
    auth_token: Option<String>,
}

impl HttpCredentials {
    pub fn new(url: &str, auth_token: Option<String>) -> Result<Self> {
        Ok(Self {
            client: http::build_client()?,
            url: url.to_string(),
            auth_token,
        })
    }
}

impl CredentialService for HttpCredentials {
    fn fetch_credential(&self) -> Result<Credential> {
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = http::ensure_success(request.send()?, &self.url)?;
        let credential: Credential = response.json()?;
        Ok(credential)
    }
}

/// Resolves the play key location inside `install_dir` for `platform`.
pub fn credential_path(platform: &Platform, install_dir: &Path) -> Result<PathBuf> {
    platform
        .credential_file()
        .map(|file| install_dir.join(file))
        .ok_or_else(|| NetplayError::UnsupportedPlatform {
            platform: platform.to_string(),
        })
}

pub struct CredentialWriter {
    platform: Platform,
    install_dir: PathBuf,
}

impl CredentialWriter {
    pub fn new(platform: Platform, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            install_dir: install_dir.into(),
        }
    }

    pub fn path(&self) -> Result<PathBuf> {
        credential_path(&self.platform, &self.install_dir)
    }

    /// Writes `credential` as pretty-printed JSON, replacing any previous file.
    pub fn write(&self, credential: &Credential) -> Result<PathBuf> {
        let path = self.path()?;
        let contents = serde_json::to_string_pretty(credential)?;
        std::fs::write(&path, &contents)?;
        log::info!("Wrote play key to {}", path.display());
        Ok(path)
    }

    pub fn fetch_and_write(&self, service: &dyn CredentialService) -> Result<PathBuf> {
        // Resolve first so unsupported platforms never reach the service.
        self.path()?;
        log::info!("Downloading user play key");
        let credential = service.fetch_credential()?;
        self.write(&credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::Server;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct CountingCredentials {
        calls: Cell<u32>,
    }

    impl CredentialService for CountingCredentials {
        fn fetch_credential(&self) -> Result<Credential> {
            self.calls.set(self.calls.get() + 1);
            Ok(json!({}))
        }
    }

    #[test]
    fn test_credential_path_per_platform() {
        let install = Path::new("/data/netplay");
        assert_eq!(
            credential_path(&Platform::Windows, install).unwrap(),
            PathBuf::from("/data/netplay/user.json")
        );

        for os in ["darwin", "linux", "freebsd"] {
            let err = credential_path(&Platform::from_os(os), install).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedPlatform, "platform {os}");
        }
    }

    #[test]
    fn test_write_roundtrips_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let writer = CredentialWriter::new(Platform::Windows, dir.path());
        std::fs::write(dir.path().join("user.json"), "{\"stale\": true}").unwrap();

        let credential = json!({
            "uid": "abc123",
            "playKey": "deadbeef",
            "connectCode": "TEST#001",
            "latestVersion": "2.2.1"
        });
        let path = writer.write(&credential).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, serde_json::to_string_pretty(&credential).unwrap());
        let parsed: Credential = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, credential);
    }

    #[test]
    fn test_write_pretty_prints() {
        let dir = TempDir::new().unwrap();
        let writer = CredentialWriter::new(Platform::Windows, dir.path());

        let path = writer.write(&json!({ "token": "abc" })).unwrap();

        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "{\n  \"token\": \"abc\"\n}"
        );
    }

    #[test]
    fn test_unsupported_platform_skips_service() {
        let dir = TempDir::new().unwrap();
        let writer = CredentialWriter::new(Platform::MacOs, dir.path());
        let service = CountingCredentials {
            calls: Cell::new(0),
        };

        let err = writer.fetch_and_write(&service).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnsupportedPlatform);
        assert_eq!(service.calls.get(), 0);
        assert!(!dir.path().join("user.json").exists());
    }

    #[test]
    fn test_file_credentials() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("playkey.json");
        std::fs::write(&path, r#"{ "token": "abc" }"#).unwrap();

        let credential = FileCredentials::new(&path).fetch_credential().unwrap();
        assert_eq!(credential, json!({ "token": "abc" }));

        let missing = FileCredentials::new(dir.path().join("missing.json"));
        assert!(matches!(
            missing.fetch_credential().unwrap_err(),
            NetplayError::CredentialError { .. }
        ));
    }

    #[test]
    fn test_http_credentials() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/user/playkey")
            .match_header("authorization", "Bearer id-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "token": "abc", "connectCode": "TEST#001" }"#)
            .create();

        let service = HttpCredentials::new(
            &format!("{}/user/playkey", server.url()),
            Some("id-token".to_string()),
        )
        .unwrap();
        let credential = service.fetch_credential().unwrap();

        mock.assert();
        assert_eq!(
            credential,
            json!({ "token": "abc", "connectCode": "TEST#001" })
        );
    }

    #[test]
    fn test_http_credentials_rejected() {
        let mut server = Server::new();
        let _mock = server.mock("GET", "/user/playkey").with_status(401).create();

        let service = HttpCredentials::new(&format!("{}/user/playkey", server.url()), None).unwrap();
        let err = service.fetch_credential().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
