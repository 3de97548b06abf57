pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod readme;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::GitHubClient, storage::LocalStorage};
pub use config::toml_config::TomlConfig;
pub use core::{engine::CardEngine, pipeline::GitHubPipeline};
pub use utils::error::{ProfileError, Result};
