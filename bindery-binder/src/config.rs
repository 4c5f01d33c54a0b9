//! File-backed binder configuration.

use std::path::{Path, PathBuf};

use bindery_registry::ComponentRegistry;
use bindery_types::{BindError, FieldSpec, HubCredentials};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bind::Binder;
use crate::builtin::{RequestLogger, TextTruncator};
use crate::descriptor::ServiceDescriptor;
use crate::middleware::Pipeline;

/// Errors loading or applying a [`BinderConfig`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// The file that was parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A configured component default is invalid.
    #[error("invalid component default: {0}")]
    Bind(#[from] BindError),
}

/// Where hub credentials come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Environment variable holding the access token.
    pub token_env: String,
    /// Hub base URL.
    pub endpoint: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            token_env: "HF_TOKEN".to_string(),
            endpoint: "https://huggingface.co".to_string(),
        }
    }
}

/// Binder configuration.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Replacement component defaults, one per kind. Later entries for the
    /// same kind win.
    pub component_defaults: Vec<FieldSpec>,
    /// Hub credential source.
    pub hub: HubConfig,
    /// Cap on text output length applied by [`pipeline`](Self::pipeline).
    pub max_output_chars: Option<usize>,
    /// Whether [`pipeline`](Self::pipeline) logs each request.
    pub log_requests: bool,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            component_defaults: Vec::new(),
            hub: HubConfig::default(),
            max_output_chars: None,
            log_requests: true,
        }
    }
}

impl BinderConfig {
    /// Load a config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded binder config");
        Ok(config)
    }

    /// A registry with the configured component defaults applied.
    pub fn registry(&self) -> Result<ComponentRegistry, ConfigError> {
        let mut registry = ComponentRegistry::new();
        for spec in &self.component_defaults {
            registry.set_default(spec.clone())?;
        }
        Ok(registry)
    }

    /// A binder over [`registry`](Self::registry).
    pub fn binder(&self) -> Result<Binder, ConfigError> {
        Ok(Binder::with_registry(self.registry()?))
    }

    /// Hub credentials from the configured environment variable, if set.
    pub fn credentials(&self) -> Option<HubCredentials> {
        let credentials = HubCredentials::from_env(&self.hub.token_env, &self.hub.endpoint);
        if credentials.is_none() {
            tracing::debug!(var = %self.hub.token_env, "no hub token in environment");
        }
        credentials
    }

    /// Wrap a descriptor in the configured middleware.
    ///
    /// Request logging runs outermost so it sees truncated outputs.
    pub fn pipeline(&self, descriptor: ServiceDescriptor) -> Pipeline {
        let mut pipeline = Pipeline::new(descriptor);
        if self.log_requests {
            pipeline.add_middleware(RequestLogger::new());
        }
        if let Some(max_chars) = self.max_output_chars {
            pipeline.add_middleware(TextTruncator::new(max_chars));
        }
        pipeline
    }
}
