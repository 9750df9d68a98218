//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/avltree/avl.toml`
//! 3. Local config: `<dir>/.avl.toml` (`-C` directory or cwd)
//! 4. Environment variables: `AVL_*` prefix, `__` between nested keys

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::services::DEMO_VALUES;
use crate::application::ApplicationError;

/// Settings for the `demo` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// Values inserted, in order
    pub values: Vec<i64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            values: DEMO_VALUES.to_vec(),
        }
    }
}

/// Raw demo config for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDemoConfig {
    pub values: Option<Vec<i64>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub separator: Option<String>,
    pub show_tree: Option<bool>,
    pub check_invariants: Option<bool>,
    #[serde(default)]
    pub demo: RawDemoConfig,
}

/// Unified configuration for avl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Joins in-order values on output (default: single space)
    pub separator: String,
    /// Print the tree drawing after `run` (default: false)
    pub show_tree: bool,
    /// Validate all invariants after every operation (default: false)
    pub check_invariants: bool,
    /// Demo run settings
    pub demo: DemoConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            separator: " ".into(),
            show_tree: false,
            check_invariants: false,
            demo: DemoConfig::default(),
        }
    }
}

/// Get the XDG config directory for avl.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "avltree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("avl.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".avl.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay config onto self: every specified field wins.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            show_tree: overlay.show_tree.unwrap_or(self.show_tree),
            check_invariants: overlay.check_invariants.unwrap_or(self.check_invariants),
            demo: DemoConfig {
                values: overlay
                    .demo
                    .values
                    .clone()
                    .unwrap_or_else(|| self.demo.values.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.avl.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/avltree/avl.toml`
    /// 3. Local config: `<local_dir>/.avl.toml`
    /// 4. Environment variables: `AVL_*`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply AVL_* environment variables as explicit overrides.
    ///
    /// `AVL_SEPARATOR`, `AVL_SHOW_TREE`, `AVL_CHECK_INVARIANTS`,
    /// `AVL_DEMO__VALUES` (comma separated).
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("AVL")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("demo.values")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("separator") {
            settings.separator = val;
        }
        if let Ok(val) = config.get_bool("show_tree") {
            settings.show_tree = val;
        }
        if let Ok(val) = config.get_bool("check_invariants") {
            settings.check_invariants = val;
        }
        if let Ok(val) = config.get::<Vec<i64>>("demo.values") {
            settings.demo.values = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# avl configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/avltree/avl.toml
#   Local:  <dir>/.avl.toml            (dir = -C argument or cwd)
#   Env:    AVL_* environment variables, e.g. AVL_DEMO__VALUES=3,1,2

# Joins in-order values on output
# separator = " "

# Print the tree drawing after `avl run`
# show_tree = false

# Validate ordering, balance and cached heights after every operation
# check_invariants = false

[demo]
# Values inserted by `avl demo`, in order
# values = [10, 20, 30, 40, 50, 25]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::ConfigEnv;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_defaults_when_created_then_match_demo_run() {
        let settings = Settings::default();
        assert_eq!(settings.separator, " ");
        assert!(!settings.show_tree);
        assert!(!settings.check_invariants);
        assert_eq!(settings.demo.values, vec![10, 20, 30, 40, 50, 25]);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            separator: Some(",".to_string()),
            show_tree: None,
            check_invariants: Some(true),
            demo: RawDemoConfig { values: None },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.separator, ",");
        assert!(!result.show_tree);
        assert!(result.check_invariants);
        assert_eq!(result.demo.values, base.demo.values);
    }

    #[test]
    fn given_demo_values_in_overlay_when_merging_then_replaced_not_unioned() {
        let base = Settings::default();
        let overlay = RawSettings {
            demo: RawDemoConfig {
                values: Some(vec![3, 1, 2]),
            },
            ..RawSettings::default()
        };

        assert_eq!(base.merge_with(&overlay).demo.values, vec![3, 1, 2]);
    }

    #[test]
    #[serial]
    fn given_local_file_when_loading_then_overrides_defaults() {
        let home = TempDir::new().unwrap();
        let _env = ConfigEnv::isolate(home.path());
        let temp = TempDir::new().unwrap();
        fs::write(
            local_config_path(temp.path()),
            "show_tree = true\n[demo]\nvalues = [1, 2, 3]\n",
        )
        .unwrap();

        let settings = Settings::load(Some(temp.path())).unwrap();

        assert!(settings.show_tree);
        assert_eq!(settings.separator, " ");
        assert_eq!(settings.demo.values, vec![1, 2, 3]);
    }

    #[test]
    #[serial]
    fn given_global_and_local_files_when_loading_then_local_wins_per_field() {
        let home = TempDir::new().unwrap();
        let _env = ConfigEnv::isolate(home.path());
        let global = home.path().join("avltree");
        fs::create_dir_all(&global).unwrap();
        fs::write(global.join("avl.toml"), "separator = \",\"\ncheck_invariants = true\n").unwrap();
        let local = TempDir::new().unwrap();
        fs::write(local_config_path(local.path()), "separator = \"|\"\n").unwrap();

        let settings = Settings::load(Some(local.path())).unwrap();

        assert_eq!(settings.separator, "|");
        assert!(settings.check_invariants);
    }

    #[test]
    #[serial]
    fn given_avl_env_vars_when_loading_then_override_file_layers() {
        let home = TempDir::new().unwrap();
        let mut env = ConfigEnv::isolate(home.path());
        let local = TempDir::new().unwrap();
        fs::write(
            local_config_path(local.path()),
            "separator = \"|\"\nshow_tree = false\n[demo]\nvalues = [9]\n",
        )
        .unwrap();
        env.set("AVL_DEMO__VALUES", "3,1,2");
        env.set("AVL_SHOW_TREE", "true");
        env.set("AVL_SEPARATOR", ",");

        let settings = Settings::load(Some(local.path())).unwrap();

        assert_eq!(settings.demo.values, vec![3, 1, 2]);
        assert!(settings.show_tree);
        assert_eq!(settings.separator, ",");
        assert!(!settings.check_invariants);
    }

    #[test]
    #[serial]
    fn given_single_env_value_when_loading_then_parsed_as_one_element_list() {
        let home = TempDir::new().unwrap();
        let mut env = ConfigEnv::isolate(home.path());
        env.set("AVL_DEMO__VALUES", "42");

        let settings = Settings::load(None).unwrap();

        assert_eq!(settings.demo.values, vec![42]);
    }

    #[test]
    #[serial]
    fn given_malformed_file_when_loading_then_config_error() {
        let home = TempDir::new().unwrap();
        let _env = ConfigEnv::isolate(home.path());
        let temp = TempDir::new().unwrap();
        fs::write(local_config_path(temp.path()), "show_tree = \"maybe\"\n").unwrap();

        let err = Settings::load(Some(temp.path())).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
        assert!(err.to_string().contains(".avl.toml"));
    }

    #[test]
    fn given_missing_file_when_reading_raw_then_config_error() {
        let temp = TempDir::new().unwrap();
        let err = load_raw_settings(&temp.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().starts_with("config error: read"));
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&text).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
