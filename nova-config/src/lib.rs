//! Configuration library for the NOVA backend.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables (a `.env` file is honoured when present). The server
//! applies CLI overrides on top of the loaded [`Config`].

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use models::{
    AnimeUpstreamConfig, AuthConfig, Config, ConfigMetadata, CorsConfig,
    MetadataUpstreamConfig, SeedUserConfig, ServerConfig, SportsUpstreamConfig,
    TokenMode,
};
pub use models::sources::{EnvConfig, FileConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
