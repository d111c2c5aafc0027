pub mod config;
pub mod latest;
pub mod status;
pub mod update;
