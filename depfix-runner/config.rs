use crate::Error;

pub const CONFIG_FILENAME: &str = "depfix.toml";

/// Contents of a `depfix.toml` configuration file.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Absolute directory below which prerequisite paths are rewritten to
    /// relative form. Rewriting is skipped when unset.
    pub base_dir: Option<String>,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        toml_edit::de::from_str(source).map_err(Into::into)
    }
}

/// Resolved settings for rewrite passes, after merging the config file and
/// command-line overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    /// See [`Config::base_dir`].
    pub base_dir: Option<String>,
    /// Working directory that rewritten paths are expressed relative to.
    pub cwd: String,
}
