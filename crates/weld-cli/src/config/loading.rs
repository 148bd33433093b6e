use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;

use crate::cli::{GraphArgs, MergeArgs};
use crate::config::{QuoteStyleConfig, WeldConfig};
use crate::error::{ConfigError, Result};

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "weld.config.json";

/// Prefix of environment overrides (`WELD_EXPORTS_VAR`, `WELD_BANNER`, ...).
pub const ENV_PREFIX: &str = "WELD_";

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports_var: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_style: Option<QuoteStyleConfig>,
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

impl From<&MergeArgs> for ConfigOverrides {
    fn from(args: &MergeArgs) -> Self {
        Self {
            entry: non_empty(&args.entry),
            base_dir: args.base_dir.clone(),
            out: args.out.clone(),
            export_target: args.export_target.clone(),
            exports_var: args.exports_var.clone(),
            banner: args.no_banner.then_some(false),
            parallel: args.parallel.then_some(true),
            extensions: non_empty(&args.extensions),
            quote_style: args.quote.map(Into::into),
        }
    }
}

impl From<&GraphArgs> for ConfigOverrides {
    fn from(args: &GraphArgs) -> Self {
        Self {
            entry: non_empty(&args.entry),
            base_dir: args.base_dir.clone(),
            extensions: non_empty(&args.extensions),
            ..Self::default()
        }
    }
}

/// `EXPORTS_VAR` -> `exportsVar`.
pub(crate) fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    for (i, part) in key.split('_').filter(|p| !p.is_empty()).enumerate() {
        let lower = part.to_ascii_lowercase();
        if i == 0 {
            field.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                field.push(first.to_ascii_uppercase());
                field.push_str(chars.as_str());
            }
        }
    }
    field
}

impl WeldConfig {
    /// Load configuration from every source.
    ///
    /// Priority: CLI flags > `WELD_*` environment > config file > defaults.
    /// `config_path` must exist when given; otherwise `weld.config.json` in
    /// `cwd` is used if present.
    pub fn load(overrides: &ConfigOverrides, config_path: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    cwd.join(path)
                };
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => {
                let default_path = cwd.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| env_key_to_field(key.as_str()).into())
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(overrides));

        figment
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()).into())
    }
}
