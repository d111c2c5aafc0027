pub mod config;
pub mod credential;
pub mod download;
pub mod github;
pub mod http;
pub mod install;
pub mod platform;
pub mod resolver;
pub mod updater;
