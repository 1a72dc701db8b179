//! Configuration for Vitrine.
//!
//! Settings are layered from built-in defaults, an optional `vitrine.toml`,
//! a `.env` file and the process environment, in increasing precedence.
//! [`ConfigLoader`] resolves them into a validated [`Config`] plus any soft
//! [`ConfigWarnings`] worth showing the operator.
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    ApiConfig, CacheConfig, Config, ConfigMetadata,
    sources::{EnvConfig, FileConfig},
};
pub use validation::{ConfigWarning, ConfigWarnings};
