//! Configuration loading.
//!
//! A `stubforge.toml` carries what the engine cannot learn from a dump:
//! the sidecar output directory, the per-type event-channel allow-lists
//! (declared signatures are not recoverable from runtime channel
//! objects), and per-type extra class-level lines spliced into emitted
//! stubs verbatim. Lookup order: explicit path, then the working
//! directory, then the user configuration directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;

use crate::error::{Error, Result};

/// The configuration file name, both in the working directory and under
/// the user configuration directory.
pub const CONFIG_FILE_NAME: &str = "stubforge.toml";

/// Generation configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Directory sidecar stubs are written to. Falls back to each dump
    /// file's own directory when unset.
    pub out_dir: Option<PathBuf>,
    /// Per-type event-channel allow-lists. Entries are full declared
    /// signatures, e.g. `"colourChanged(int, Colour)"`.
    pub channels: HashMap<String, Vec<String>>,
    /// Per-type extra class-level declaration lines, emitted verbatim.
    pub extra: HashMap<String, Vec<String>>,
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse; the fallback locations are
    /// optional and an absent file simply yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path).map_err(|err| {
                Error::Config(format!("cannot read {}: {}", path.display(), err))
            })?;
            return Self::from_toml(&content);
        }

        let local = Path::new(CONFIG_FILE_NAME);
        if local.exists() {
            return Self::from_toml(&fs::read_to_string(local)?);
        }

        if let Ok(strategy) = choose_base_strategy() {
            let user_path = strategy
                .config_dir()
                .join("stubforge")
                .join(CONFIG_FILE_NAME);
            if user_path.exists() {
                return Self::from_toml(&fs::read_to_string(&user_path)?);
            }
        }

        Ok(Self::default())
    }

    /// The event-channel allow-list for a type, if one is configured.
    pub fn channels_for(&self, type_name: &str) -> Option<&[String]> {
        self.channels.get(type_name).map(Vec::as_slice)
    }

    /// The extra class-level lines for a type (empty when none are
    /// configured).
    pub fn extra_for(&self, type_name: &str) -> &[String] {
        self.extra
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
