use std::fmt;

/// Operating systems the netplay build is published for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Unsupported(String),
}

/// Release asset name suffix per platform. Platforms without an entry have no build.
const ASSET_SUFFIXES: &[(Platform, &str)] = &[
    (Platform::Windows, "Win.zip"),
    (Platform::MacOs, "Mac.zip"),
    (Platform::Linux, ".AppImage"),
];

/// Play key file location relative to the installation directory.
const CREDENTIAL_FILES: &[(Platform, &str)] = &[(Platform::Windows, "user.json")];

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Accepts both Rust (`windows`, `macos`) and Node style (`win32`, `darwin`) identifiers.
    pub fn from_os(os: &str) -> Self {
        match os {
            "win32" | "windows" => Platform::Windows,
            "darwin" | "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            other => Platform::Unsupported(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Platform::Windows => "win32",
            Platform::MacOs => "darwin",
            Platform::Linux => "linux",
            Platform::Unsupported(os) => os,
        }
    }

    pub fn asset_suffix(&self) -> Option<&'static str> {
        lookup(ASSET_SUFFIXES, self)
    }

    pub fn credential_file(&self) -> Option<&'static str> {
        lookup(CREDENTIAL_FILES, self)
    }

    pub fn matches_asset(&self, asset_name: &str) -> bool {
        self.asset_suffix()
            .map(|suffix| asset_name.ends_with(suffix))
            .unwrap_or(false)
    }
}

fn lookup(table: &[(Platform, &'static str)], platform: &Platform) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| candidate == platform)
        .map(|(_, value)| *value)
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
