//! `dsdoc.toml` configuration

use std::path::{Path, PathBuf};

use dsdoc_core::doc::Format;
use dsdoc_core::extract::DEFAULT_PREFIX;
use serde::Deserialize;
use thiserror::Error;

/// File name looked up in the scanned directory when no `--config` is given
pub const CONFIG_FILE: &str = "dsdoc.toml";

/// Errors that can occur when loading the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("comment prefix must not be empty")]
    EmptyPrefix,

    #[error("at least one source extension is required")]
    NoExtensions,
}

/// Generator settings; every key is optional
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Comment prefix that marks documentation lines
    pub prefix: String,
    /// Extensions of the files to scan, without the dot
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub exclude: Vec<String>,
    pub format: Format,
    /// Output file, `-` for stdout
    pub output: PathBuf,
    /// Abort on the first rejected batch
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            extensions: ["dart", "java", "go", "c", "cpp", "cc", "js", "ts", "es"]
                .map(String::from)
                .to_vec(),
            exclude: vec!["target".to_string(), "node_modules".to_string()],
            format: Format::default(),
            output: PathBuf::from("api.md"),
            strict: false,
        }
    }
}

impl Config {
    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else `dsdoc.toml` under `root` if it exists,
    /// else the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be loaded.
    pub fn discover(explicit: Option<&Path>, root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let candidate = if root.is_dir() {
            root.join(CONFIG_FILE)
        } else {
            root.parent().unwrap_or(Path::new(".")).join(CONFIG_FILE)
        };
        if candidate.is_file() {
            Self::from_path(candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.trim().is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        Ok(())
    }

    /// Returns true if `path` has one of the configured extensions
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Returns true if a directory with this name is skipped
    pub fn excludes(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.prefix, "//*");
        assert_eq!(config.format, Format::Markdown);
        assert_eq!(config.output, PathBuf::from("api.md"));
    }

    #[test]
    fn parse_full_config() {
        let toml = r##"
prefix = "#*"
extensions = ["py"]
exclude = ["build"]
format = "json"
output = "-"
strict = true
"##;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.prefix, "#*");
        assert_eq!(config.extensions, ["py"]);
        assert!(config.excludes("build"));
        assert!(!config.excludes("target"));
        assert_eq!(config.format, Format::Json);
        assert_eq!(config.output, PathBuf::from("-"));
        assert!(config.strict);
    }

    #[test]
    fn markdown_alias() {
        let config = Config::parse("format = \"markdown\"").unwrap();
        assert_eq!(config.format, Format::Markdown);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::parse("prefx = \"//*\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::parse("format = \"html\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(Config::parse("prefix = \"  \""), Err(ConfigError::EmptyPrefix)));
        assert!(matches!(Config::parse("extensions = []"), Err(ConfigError::NoExtensions)));
    }

    #[test]
    fn accepts_configured_extensions() {
        let config = Config::default();
        assert!(config.accepts(Path::new("lib/device.dart")));
        assert!(config.accepts(Path::new("main.go")));
        assert!(!config.accepts(Path::new("README.md")));
        assert!(!config.accepts(Path::new("Makefile")));
    }

    #[test]
    fn discover_prefers_explicit_then_directory_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(CONFIG_FILE), "strict = true\n").unwrap();
        assert!(Config::discover(None, dir.path()).unwrap().strict);

        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "output = \"docs.md\"\n").unwrap();
        let config = Config::discover(Some(&explicit), dir.path()).unwrap();
        assert!(!config.strict);
        assert_eq!(config.output, PathBuf::from("docs.md"));
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::discover(Some(&missing), dir.path()),
            Err(ConfigError::Io(_))
        ));
    }
}
