#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{GenerateArgs, PruneArgs, ServeArgs};
pub use toml_config::JumbleConfig;
