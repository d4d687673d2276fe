//! Client configuration for the ragflow CLI.
//!
//! Kubeconfig-style YAML with:
//! - Named connection contexts (server + API key source)
//! - `current-context` for default selection
//! - Defaults applied when a context leaves a setting out
//!
//! The file lives at `client.yaml` inside [`xdg_config_dir`].

pub mod client;
pub mod discovery;
pub mod error;

pub use client::{
    AuthConfig, ClientConfig, ClientDefaults, Context, ResolvedContext, client_config_path,
    load_client_config, load_client_config_from, save_client_config, save_client_config_to,
};
pub use discovery::{log_dir, xdg_config_dir};
pub use error::{ConfigError, Result};
