//! Netplay updater library
//!
//! Resolves the latest netplay build on the release host, installs it into the
//! application data directory and writes the user's play key next to it.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::config::Config;
pub use crate::core::credential::{Credential, CredentialService};
pub use crate::core::platform::Platform;
pub use crate::core::updater::NetplayUpdater;
pub use crate::error::{ErrorKind, NetplayError, Result};
