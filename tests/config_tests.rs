use rtimeclock::config::{
    Config, ENV_CONNECT_MAX_ATTEMPTS, ENV_DB, ENV_LOG_FORMAT, ENV_QUERY_BACKOFF_MS, LogFormat,
};
use rtimeclock::core::RetryPolicy;
use rtimeclock::db::DbPool;
use rtimeclock::errors::AppError;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;

mod common;
use common::temp_db;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults_keep_two_independent_retry_policies() {
    let cfg = Config::default();

    assert_eq!(cfg.query_retry, RetryPolicy::new(3, 3));
    assert_eq!(cfg.connect_retry, RetryPolicy::new(5, 5_000));
    assert_eq!(cfg.log_format, LogFormat::Text);
    assert!(cfg.database.ends_with("rtimeclock.sqlite"));
}

#[test]
fn test_missing_file_loads_defaults() {
    let (dir, _) = temp_db("missing_cfg");
    let cfg = Config::load_from(&dir.path().join("nope.conf")).expect("defaults");
    assert_eq!(cfg, Config::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let (dir, _) = temp_db("partial_cfg");
    let path = dir.path().join("rtimeclock.conf");
    fs::write(
        &path,
        "database: /tmp/custom.sqlite\nquery_retry:\n  max_attempts: 7\n  backoff_ms: 10\n",
    )
    .expect("write config");

    let cfg = Config::load_from(&path).expect("load");

    assert_eq!(cfg.database, "/tmp/custom.sqlite");
    assert_eq!(cfg.query_retry, RetryPolicy::new(7, 10));
    assert_eq!(cfg.connect_retry, RetryPolicy::connect_default());
    assert_eq!(cfg.busy_timeout(), Duration::from_secs(5));
}

#[test]
fn test_invalid_file_is_a_config_error() {
    let (dir, _) = temp_db("invalid_cfg");
    let path = dir.path().join("rtimeclock.conf");
    fs::write(&path, "query_retry: [not, a, map]\n").expect("write config");

    assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
}

#[test]
fn test_env_overrides_each_policy_separately() {
    let mut cfg = Config::default();
    cfg.apply_overrides(lookup(&[
        (ENV_DB, "/data/clock.sqlite"),
        (ENV_QUERY_BACKOFF_MS, "12"),
        (ENV_CONNECT_MAX_ATTEMPTS, "2"),
        (ENV_LOG_FORMAT, "JSON"),
    ]))
    .expect("overrides");

    assert_eq!(cfg.database, "/data/clock.sqlite");
    assert_eq!(cfg.query_retry, RetryPolicy::new(3, 12));
    assert_eq!(cfg.connect_retry, RetryPolicy::new(2, 5_000));
    assert_eq!(cfg.log_format, LogFormat::Json);
}

#[test]
fn test_unparseable_env_override_is_rejected() {
    let mut cfg = Config::default();
    let err = cfg
        .apply_overrides(lookup(&[(ENV_QUERY_BACKOFF_MS, "soon")]))
        .expect_err("not a number");

    assert!(matches!(err, AppError::Config(msg) if msg.contains(ENV_QUERY_BACKOFF_MS)));
}

#[test]
fn test_config_round_trips_through_yaml() {
    let mut cfg = Config::default();
    cfg.connect_retry = RetryPolicy::new(9, 250);

    let yaml = cfg.to_yaml().expect("yaml");
    let back: Config = serde_yaml::from_str(&yaml).expect("parse back");

    assert_eq!(back, cfg);
}

#[test]
fn test_connect_gives_up_after_connect_budget() {
    let (dir, _) = temp_db("connect_fail");
    let unreachable = dir.path().join("missing").join("dir").join("db.sqlite");
    let policy = RetryPolicy::new(5, 1);

    let err = DbPool::connect_with_retry(
        &unreachable.to_string_lossy(),
        Duration::from_millis(10),
        &policy,
    )
    .err()
    .expect("directory does not exist");

    assert!(matches!(err, AppError::ConnectFailed { attempts: 5, .. }));
    assert!(err.to_string().contains("after 5 attempts"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_connect_succeeds_on_reachable_path() {
    let (_dir, path) = temp_db("connect_ok");
    let pool = DbPool::connect_with_retry(
        &path.to_string_lossy(),
        Duration::from_millis(10),
        &RetryPolicy::new(5, 1),
    )
    .expect("connect");

    assert_eq!(pool.path(), path.to_string_lossy());
    pool.close().expect("close");
}
