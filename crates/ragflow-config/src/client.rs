//! Client configuration for connecting to RAGFlow servers.
//!
//! Implements a kubeconfig-style configuration with named contexts:
//!
//! ```yaml
//! api-version: v1
//! kind: ClientConfig
//!
//! current-context: local
//!
//! contexts:
//!   - name: local
//!     server: http://localhost:9380
//!     auth:
//!       type: api-key
//!       key-env: RAGFLOW_API_KEY
//!   - name: prod
//!     server: https://ragflow.example.com
//!     auth:
//!       type: api-key
//!       key-file: ~/.config/ragflow/keys/prod.key
//!     timeout: 120
//!
//! defaults:
//!   timeout: 30
//!   page-size: 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Client Config
// ─────────────────────────────────────────────────────────────────────────────

/// API version for the client config file format.
pub const API_VERSION: &str = "v1";

/// Kind identifier for client config files.
pub const KIND: &str = "ClientConfig";

/// Default config filename.
const CLIENT_CONFIG_FILE: &str = "client.yaml";

/// Root client configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientConfig {
    /// API version (always "v1" currently).
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Config kind (always "ClientConfig").
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Name of the current/default context.
    #[serde(default)]
    pub current_context: Option<String>,

    /// Named connection contexts.
    #[serde(default)]
    pub contexts: Vec<Context>,

    /// Default settings applied to all contexts.
    #[serde(default)]
    pub defaults: ClientDefaults,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

impl ClientConfig {
    /// Create an empty client config.
    pub fn new() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            ..Default::default()
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        serde_yaml::from_str(yaml_str).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Get the current context, if set and valid.
    pub fn current(&self) -> Option<&Context> {
        self.current_context
            .as_ref()
            .and_then(|name| self.get_context(name))
    }

    /// Get a context by name.
    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Get a mutable context by name.
    pub fn get_context_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or update a context.
    pub fn set_context(&mut self, context: Context) {
        if let Some(existing) = self.get_context_mut(&context.name) {
            *existing = context;
        } else {
            self.contexts.push(context);
        }
    }

    /// Remove a context by name.
    pub fn remove_context(&mut self, name: &str) -> Option<Context> {
        let pos = self.contexts.iter().position(|c| c.name == name)?;
        // Removing the current context clears the selection
        if self.current_context.as_deref() == Some(name) {
            self.current_context = None;
        }
        Some(self.contexts.remove(pos))
    }

    /// Set the current context by name.
    ///
    /// Returns an error if the context doesn't exist.
    pub fn use_context(&mut self, name: &str) -> Result<()> {
        if self.get_context(name).is_some() {
            self.current_context = Some(name.to_string());
            Ok(())
        } else {
            Err(ConfigError::ContextNotFound(name.to_string()))
        }
    }

    /// List all context names.
    pub fn context_names(&self) -> Vec<&str> {
        self.contexts.iter().map(|c| c.name.as_str()).collect()
    }

    /// Resolve a named context into connection settings.
    pub fn resolve(&self, name: &str) -> Result<ResolvedContext> {
        let context = self
            .get_context(name)
            .ok_or_else(|| ConfigError::ContextNotFound(name.to_string()))?;
        self.resolve_context(context)
    }

    /// Resolve the current context, if one is selected.
    ///
    /// A `current-context` naming a context that no longer exists is an error.
    pub fn resolve_current(&self) -> Result<Option<ResolvedContext>> {
        match &self.current_context {
            Some(name) => self.resolve(name).map(Some),
            None => Ok(None),
        }
    }

    fn resolve_context(&self, context: &Context) -> Result<ResolvedContext> {
        let api_key = match &context.auth {
            Some(auth) => auth.resolve()?,
            None => None,
        };
        Ok(ResolvedContext {
            name: context.name.clone(),
            server: context.server.clone(),
            api_key,
            timeout: Duration::from_secs(context.timeout.unwrap_or(self.defaults.timeout)),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// A named connection context (server + auth bundle).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Context {
    /// Unique name for this context.
    pub name: String,

    /// Server URL (e.g., "http://localhost:9380").
    pub server: String,

    /// Where to find the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// Request timeout override (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Context {
    /// Create a new context with just a name and server URL.
    pub fn new(name: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
            auth: None,
            timeout: None,
        }
    }

    /// Set the auth configuration.
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Connection settings produced by resolving a [`Context`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    pub name: String,
    pub server: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

// ─────────────────────────────────────────────────────────────────────────────
// Authentication
// ─────────────────────────────────────────────────────────────────────────────

/// Authentication configuration for a context.
///
/// The key itself is never stored in `client.yaml`; only where to read it from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AuthConfig {
    /// No authentication.
    None,

    /// API key authentication.
    #[serde(rename_all = "kebab-case")]
    ApiKey {
        /// Path to file containing the API key.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_file: Option<PathBuf>,
        /// Environment variable containing the API key.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_env: Option<String>,
    },
}

impl AuthConfig {
    /// Create API key auth referencing a file.
    pub fn api_key_file(path: impl Into<PathBuf>) -> Self {
        Self::ApiKey {
            key_file: Some(path.into()),
            key_env: None,
        }
    }

    /// Create API key auth referencing an environment variable.
    pub fn api_key_env(var: impl Into<String>) -> Self {
        Self::ApiKey {
            key_file: None,
            key_env: Some(var.into()),
        }
    }

    /// Resolve the actual credential value.
    ///
    /// Tries the key file first, then the environment variable.
    pub fn resolve(&self) -> Result<Option<String>> {
        match self {
            AuthConfig::None => Ok(None),

            AuthConfig::ApiKey { key_file, key_env } => {
                if let Some(path) = key_file {
                    let expanded = expand_path(path);
                    if expanded.exists() {
                        let key = std::fs::read_to_string(&expanded)
                            .map_err(|e| ConfigError::ReadFile {
                                path: expanded.display().to_string(),
                                source: e,
                            })?
                            .trim()
                            .to_string();
                        return Ok(Some(key));
                    }
                }
                if let Some(var) = key_env
                    && let Ok(key) = std::env::var(var)
                    && !key.is_empty()
                {
                    return Ok(Some(key));
                }
                Ok(None)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default settings applied to all contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientDefaults {
    /// Default request timeout in seconds.
    pub timeout: u64,

    /// Page size used by list commands when none is given.
    pub page_size: u32,
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            timeout: 30,
            page_size: 30,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading / Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Get the path to the client config file.
pub fn client_config_path() -> Option<PathBuf> {
    crate::xdg_config_dir().map(|d| d.join(CLIENT_CONFIG_FILE))
}

/// Load the client configuration.
///
/// Returns a default config if the file doesn't exist.
pub fn load_client_config() -> Result<ClientConfig> {
    load_client_config_from(client_config_path().as_deref())
}

/// Load client config from a specific path.
pub fn load_client_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let Some(path) = path else {
        return Ok(ClientConfig::new());
    };

    if !path.exists() {
        return Ok(ClientConfig::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;

    ClientConfig::from_yaml(&contents)
}

/// Save the client configuration.
pub fn save_client_config(config: &ClientConfig) -> Result<()> {
    let path = client_config_path()
        .ok_or_else(|| ConfigError::Other("Could not determine config directory".to_string()))?;
    save_client_config_to(config, &path)
}

/// Save client config to a specific path.
pub fn save_client_config_to(config: &ClientConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = config.to_yaml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Expand ~ to home directory in paths.
fn expand_path(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/"))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
