//! Integration tests for Settings config loading.
//!
//! Each test points `XDG_CONFIG_HOME` at a temp dir and clears `AVL_*`, so
//! the developer's own config and environment never leak in.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use avltree::config::{local_config_path, Settings};
use avltree::util::testing::ConfigEnv;

#[test]
#[serial]
fn given_local_config_when_loading_then_overrides_scalars_and_demo_values() {
    let home = TempDir::new().unwrap();
    let _env = ConfigEnv::isolate(home.path());
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".avl.toml"),
        r#"
separator = ", "
show_tree = true
check_invariants = true

[demo]
values = [7, 3, 9]
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.separator, ", ");
    assert!(settings.show_tree);
    assert!(settings.check_invariants);
    assert_eq!(settings.demo.values, vec![7, 3, 9]);
}

#[test]
#[serial]
fn given_broken_local_config_when_loading_then_error_names_file() {
    let home = TempDir::new().unwrap();
    let _env = ConfigEnv::isolate(home.path());
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[demo\nvalues = 1").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().contains(".avl.toml"), "got: {err}");
}

#[test]
#[serial]
fn given_local_config_when_showing_then_toml_contains_effective_values() {
    let home = TempDir::new().unwrap();
    let _env = ConfigEnv::isolate(home.path());
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "separator = \"|\"\n").unwrap();

    let settings = Settings::load(Some(dir.path())).unwrap();
    let text = settings.to_toml().unwrap();

    assert!(text.contains("separator = \"|\""));
    assert!(text.contains("[demo]"));
}

#[test]
#[serial]
fn given_exported_avl_var_when_isolated_then_local_file_decides() {
    std::env::set_var("AVL_SEPARATOR", ";");
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "show_tree = true\n").unwrap();

    {
        let _env = ConfigEnv::isolate(home.path());
        let settings = Settings::load(Some(dir.path())).unwrap();
        assert_eq!(settings.separator, " ");
        assert!(settings.show_tree);
    }

    assert_eq!(std::env::var("AVL_SEPARATOR").as_deref(), Ok(";"));
    std::env::remove_var("AVL_SEPARATOR");
}
