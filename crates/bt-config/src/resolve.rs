//! Rules directory resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG paths →
//! system config → built-in tables only.

use std::path::{Path, PathBuf};

/// The rules directory in effect.
#[derive(Debug, Clone, Default)]
pub struct RulesDir {
    /// Directory of rule-table files (or None to use built-in tables only).
    pub path: Option<PathBuf>,

    /// Where the directory came from (for diagnostics).
    pub source: ConfigSource,
}

/// Where a configuration directory was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/billtags/.
    SystemConfig,

    /// Using built-in tables only.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_RULES_DIR: &str = "BILLTAGS_RULES_DIR";
pub const ENV_CONFIG_DIR: &str = "BILLTAGS_CONFIG_DIR";

/// Subdirectory holding rule-table files inside a config directory.
const RULES_SUBDIR: &str = "rules";

/// Application name for XDG directories.
const APP_NAME: &str = "billtags";

/// Resolve the rules directory using the standard resolution order.
///
/// 1. Explicit CLI path (if provided)
/// 2. BILLTAGS_RULES_DIR environment variable
/// 3. BILLTAGS_CONFIG_DIR environment variable + `rules`
/// 4. XDG config directory (~/.config/billtags/rules)
/// 5. System config (/etc/billtags/rules)
/// 6. Built-in tables only (None)
///
/// Candidates that are not existing directories are skipped.
pub fn resolve_rules_dir(cli_dir: Option<&Path>) -> RulesDir {
    // 1. CLI argument
    if let Some(path) = cli_dir {
        if path.is_dir() {
            return found(path.to_path_buf(), ConfigSource::CliArgument);
        }
        tracing::warn!(
            path = %path.display(),
            "rules directory from command line does not exist; ignoring"
        );
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_RULES_DIR) {
        let path = PathBuf::from(env_path);
        if path.is_dir() {
            return found(path, ConfigSource::Environment);
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(RULES_SUBDIR);
        if path.is_dir() {
            return found(path, ConfigSource::Environment);
        }
    }

    // 4. XDG config directory
    if let Some(path) = xdg_rules_dir() {
        if path.is_dir() {
            return found(path, ConfigSource::XdgConfig);
        }
    }

    // 5. System config
    let system_path = system_rules_dir();
    if system_path.is_dir() {
        return found(system_path, ConfigSource::SystemConfig);
    }

    // 6. Built-in tables only
    RulesDir::default()
}

fn found(path: PathBuf, source: ConfigSource) -> RulesDir {
    tracing::debug!(path = %path.display(), %source, "resolved rules directory");
    RulesDir {
        path: Some(path),
        source,
    }
}

/// Get the XDG rules directory for billtags.
pub fn xdg_rules_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join(RULES_SUBDIR))
}

/// Get the system rules directory.
pub fn system_rules_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME).join(RULES_SUBDIR)
}

/// List all JSON files in a directory, sorted by path.
pub fn list_config_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext == "json" {
                        files.push(path);
                    }
                }
            }
        }
    }

    files.sort();
    files
}
