use std::path::Path;

use weld_core::MergeError;

use crate::config::WeldConfig;
use crate::error::{CliError, ConfigError, Result};

impl WeldConfig {
    /// Validate configuration before any module is read.
    pub fn validate(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(ConfigError::MissingField {
                field: "entry".to_string(),
                hint: "Pass ENTRY arguments or list modules under \"entry\" in weld.config.json"
                    .to_string(),
            }
            .into());
        }

        if let Some(entry) = self.entry.iter().find(|entry| entry.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "entry".to_string(),
                value: format!("{entry:?}"),
                hint: "Entries are module paths such as \"map\" or \"reduce\"".to_string(),
            }
            .into());
        }

        self.to_merge_options(Path::new("."))
            .validate()
            .map_err(|err| -> CliError {
                match err {
                    MergeError::InvalidOption { field, value, hint } => {
                        ConfigError::InvalidValue { field, value, hint }.into()
                    }
                    other => other.into(),
                }
            })
    }
}
