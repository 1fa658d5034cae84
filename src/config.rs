//! Run configuration for the edge reversal transform.
//!
//! Source and destination directories are explicit configuration values
//! rather than ambient constants, so the transform can be pointed at
//! temporary directories in tests. Configuration is loaded from TOML:
//!
//! ```toml
//! source_dir = "edges"
//! dest_dir = "edges_reversed"
//! sorted = true
//! report = false
//!
//! [select]
//! include_hidden = true
//!
//! [select.exclude]
//! names = [".DS_Store"]
//! globs = ["*.bak"]
//! regex = []
//!
//! [select.include]
//! globs = []
//! ```
//!
//! The defaults select every file in the source directory, so a run with no
//! configuration file behaves exactly like the plain transform.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading or compiling configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern in a selection rule.
    InvalidGlobPattern(String),
    /// Invalid regex pattern in a selection rule, with the compile error.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for a reversal run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseConfig {
    /// Directory containing tab-delimited edge files.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory to write reversed edge files into (created if absent).
    #[serde(default = "default_dest_dir")]
    pub dest_dir: PathBuf,

    /// Process files in filename order instead of filesystem order.
    #[serde(default = "default_sorted")]
    pub sorted: bool,

    /// Write a JSON run report into the destination directory after a run.
    #[serde(default)]
    pub report: bool,

    /// Rules deciding which source files are processed.
    #[serde(default)]
    pub select: SelectRules,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("edges")
}

fn default_dest_dir() -> PathBuf {
    PathBuf::from("edges_reversed")
}

fn default_sorted() -> bool {
    true
}

impl Default for ReverseConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            dest_dir: default_dest_dir(),
            sorted: true,
            report: false,
            select: SelectRules::default(),
        }
    }
}

impl ReverseConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.edgefliprc.toml` in the current directory
    /// 3. Look for `~/.config/edgeflip/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".edgefliprc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("edgeflip")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist,
    /// `ConfigError::IoError` if it cannot be read, and
    /// `ConfigError::ConfigInvalid` if TOML parsing fails.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}

/// Rules deciding which files in the source directory are processed.
///
/// The defaults select everything: hidden files included, no exclusions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectRules {
    /// Whether files starting with "." are processed. Defaults to true.
    #[serde(default = "default_include_hidden")]
    pub include_hidden: bool,

    /// Rules for excluding files.
    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Whitelist rules that override exclusions.
    #[serde(default)]
    pub include: IncludeRules,
}

fn default_include_hidden() -> bool {
    true
}

impl Default for SelectRules {
    fn default() -> Self {
        Self {
            include_hidden: true,
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }
    }
}

/// Rules for excluding files from processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to skip.
    #[serde(default)]
    pub names: Vec<String>,

    /// Glob patterns to skip (matched against the filename).
    #[serde(default)]
    pub globs: Vec<String>,

    /// Regex patterns to skip (matched against the filename).
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Whitelist rules that override exclusions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    /// Glob patterns that force a file to be processed.
    #[serde(default)]
    pub globs: Vec<String>,
}

impl SelectRules {
    /// Compile the rules into matchers, validating every pattern up front.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex pattern is invalid.
    pub fn compile(self) -> Result<CompiledSelect, ConfigError> {
        let exclude_globs = compile_globs(&self.exclude.globs)?;
        let include_globs = compile_globs(&self.include.globs)?;

        let exclude_regex = self
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledSelect {
            include_hidden: self.include_hidden,
            exclude_names: self.exclude.names.into_iter().collect(),
            exclude_globs,
            exclude_regex,
            include_globs,
        })
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
        })
        .collect()
}

/// Pre-compiled selection rules for matching source files.
pub struct CompiledSelect {
    include_hidden: bool,
    exclude_names: HashSet<String>,
    exclude_globs: Vec<Pattern>,
    exclude_regex: Vec<Regex>,
    include_globs: Vec<Pattern>,
}

impl CompiledSelect {
    /// Decide whether a source file should be processed.
    ///
    /// Include globs win over every exclusion; otherwise the hidden-file
    /// switch, exact names, exclude globs and exclude regexes are checked in
    /// turn, and a file matching none of them is processed.
    pub fn is_selected(&self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self
            .include_globs
            .iter()
            .any(|pattern| pattern.matches(&file_name))
        {
            return true;
        }

        if !self.include_hidden && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_names.contains(file_name.as_ref()) {
            return false;
        }

        if self
            .exclude_globs
            .iter()
            .any(|pattern| pattern.matches(&file_name))
        {
            return false;
        }

        if self.exclude_regex.iter().any(|re| re.is_match(&file_name)) {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ReverseConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("edges"));
        assert_eq!(config.dest_dir, PathBuf::from("edges_reversed"));
        assert!(config.sorted);
        assert!(!config.report);
    }

    #[test]
    fn test_default_rules_select_everything() {
        let select = SelectRules::default().compile().unwrap();
        assert!(select.is_selected(Path::new("a.tsv")));
        assert!(select.is_selected(Path::new(".hidden")));
        assert!(select.is_selected(Path::new("no_extension")));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            source_dir = "in"
            dest_dir = "out"
            sorted = false
            report = true

            [select]
            include_hidden = false

            [select.exclude]
            names = ["README.md"]
            globs = ["*.bak"]

            [select.include]
            globs = ["*.keep"]
        "#;
        let config: ReverseConfig = toml::from_str(toml).expect("config parses");
        assert_eq!(config.source_dir, PathBuf::from("in"));
        assert_eq!(config.dest_dir, PathBuf::from("out"));
        assert!(!config.sorted);
        assert!(config.report);
        assert!(!config.select.include_hidden);
        assert_eq!(config.select.exclude.names, vec!["README.md"]);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: ReverseConfig = toml::from_str("").expect("empty config parses");
        assert_eq!(config.source_dir, PathBuf::from("edges"));
        assert!(config.select.include_hidden);
    }

    #[test]
    fn test_exclude_exact_name() {
        let rules = SelectRules {
            exclude: ExcludeRules {
                names: vec!["skip_me.tsv".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let select = rules.compile().unwrap();
        assert!(!select.is_selected(Path::new("skip_me.tsv")));
        assert!(select.is_selected(Path::new("keep_me.tsv")));
    }

    #[test]
    fn test_exclude_glob() {
        let rules = SelectRules {
            exclude: ExcludeRules {
                globs: vec!["*.bak".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let select = rules.compile().unwrap();
        assert!(!select.is_selected(Path::new("edges.bak")));
        assert!(select.is_selected(Path::new("edges.tsv")));
    }

    #[test]
    fn test_exclude_regex() {
        let rules = SelectRules {
            exclude: ExcludeRules {
                regex: vec![r"^part-\d+$".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let select = rules.compile().unwrap();
        assert!(!select.is_selected(Path::new("part-0001")));
        assert!(select.is_selected(Path::new("part-final")));
    }

    #[test]
    fn test_hidden_files_excluded_when_disabled() {
        let rules = SelectRules {
            include_hidden: false,
            ..Default::default()
        };
        let select = rules.compile().unwrap();
        assert!(!select.is_selected(Path::new(".gitignore")));
        assert!(select.is_selected(Path::new("a.tsv")));
    }

    #[test]
    fn test_include_glob_overrides_exclusions() {
        let rules = SelectRules {
            include_hidden: false,
            exclude: ExcludeRules {
                globs: vec!["*.tsv".to_string()],
                ..Default::default()
            },
            include: IncludeRules {
                globs: vec!["keep*".to_string()],
            },
        };
        let select = rules.compile().unwrap();
        assert!(select.is_selected(Path::new("keep.tsv")));
        assert!(!select.is_selected(Path::new("drop.tsv")));
    }

    #[test]
    fn test_invalid_glob_returns_error() {
        let rules = SelectRules {
            exclude: ExcludeRules {
                globs: vec!["[unclosed".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(rules.compile().is_err());
    }

    #[test]
    fn test_invalid_regex_returns_error() {
        let rules = SelectRules {
            exclude: ExcludeRules {
                regex: vec!["[invalid(".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(rules.compile().is_err());
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let result = ReverseConfig::load(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }
}
