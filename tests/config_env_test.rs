//! Environment overrides live in their own test binary: they mutate the
//! process environment, which other tests read concurrently.

use std::sync::Mutex;

use famtree::application::ApplicationError;
use famtree::config::Settings;

/// Tests in this binary take turns on the environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn given_famtree_env_vars_when_loading_then_they_override_files() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::TempDir::new().unwrap();
    let explicit = dir.path().join("famtree.toml");
    std::fs::write(&explicit, "[layout]\nnode_width = 90.0\n").unwrap();

    std::env::set_var("FAMTREE_LAYOUT__NODE_WIDTH", "150");
    std::env::set_var("FAMTREE_DISPLAY__MAX_DEPTH", "2");
    let loaded = Settings::load_from(None, Some(&explicit));
    std::env::remove_var("FAMTREE_LAYOUT__NODE_WIDTH");
    std::env::remove_var("FAMTREE_DISPLAY__MAX_DEPTH");

    let settings = loaded.expect("load settings");
    assert_eq!(settings.layout.node_width, 150.0);
    assert_eq!(settings.max_depth().unwrap(), Some(2));
}

#[test]
fn given_unparsable_env_value_when_loading_then_fails_with_config_error() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var("FAMTREE_LAYOUT__LEVEL_HEIGHT", "tall");
    let loaded = Settings::load_from(None, None);
    std::env::remove_var("FAMTREE_LAYOUT__LEVEL_HEIGHT");

    match loaded {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains("level_height"), "{message}")
        }
        other => panic!("expected config error, got {other:?}"),
    }
}
