//! Shared test setup: one global tracing subscriber, isolated config environment.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Installs the test subscriber once per process. `RUST_LOG` selects the
/// level, `debug` when unset.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = env::var("RUST_LOG")
        .ok()
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Environment variables read by `Settings::load`, restored on drop.
///
/// Points `XDG_CONFIG_HOME` at `config_home` and unsets every `AVL_*`
/// variable, so only the layers a test writes are visible. Tests holding a
/// guard mutate process state and must not run concurrently (`#[serial]`).
pub struct ConfigEnv {
    saved: Vec<(OsString, Option<OsString>)>,
}

impl ConfigEnv {
    pub fn isolate(config_home: &Path) -> Self {
        let mut guard = Self { saved: Vec::new() };
        let avl_vars: Vec<OsString> = env::vars_os()
            .map(|(key, _)| key)
            .filter(|key| key.to_string_lossy().starts_with("AVL_"))
            .collect();
        for key in avl_vars {
            guard.save(&key);
            env::remove_var(&key);
        }
        guard.set("XDG_CONFIG_HOME", config_home.as_os_str());
        guard
    }

    /// Sets `key` for the lifetime of the guard.
    pub fn set(&mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) {
        self.save(key.as_ref());
        env::set_var(key, value);
    }

    fn save(&mut self, key: &OsStr) {
        if !self.saved.iter().any(|(saved, _)| saved == key) {
            self.saved.push((key.to_os_string(), env::var_os(key)));
        }
    }
}

impl Drop for ConfigEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}
