//! Integration tests for the Configuration container.
//!
//! Covers key resolution, mutation semantics and observer notification.

use gestalt::config::{Configuration, Items, Value, into_items};
use gestalt::{ConfigError, ErrorCode, Observer};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Observer that counts notifications.
#[derive(Default)]
struct CountingObserver {
    updates: AtomicUsize,
}

impl CountingObserver {
    fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

impl Observer<Configuration> for CountingObserver {
    fn update(&self, _subject: &Configuration) -> anyhow::Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Observer that appends its name to a shared log.
struct NamedObserver {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl Observer<Configuration> for NamedObserver {
    fn update(&self, _subject: &Configuration) -> anyhow::Result<()> {
        self.log.lock().unwrap().push(self.name);
        Ok(())
    }
}

fn items(value: Value) -> Items {
    into_items(value)
}

/// Configuration items shared by several tests.
fn sample() -> Value {
    json!({
        "app": {
            "version": "1.0",
            "debug": true,
            "locale": "en"
        },
        "database": {
            "default": "mysql",
            "drivers": {
                "mysql": {
                    "database": "gestalt",
                    "username": "sam",
                    "password": "angostura"
                },
                "sqlite": {"database": "gestalt"}
            }
        }
    })
}

fn with_counter(value: Value) -> (Configuration, Arc<CountingObserver>) {
    let mut config = Configuration::from(value);
    let observer = Arc::new(CountingObserver::default());
    config.attach(observer.clone());
    (config, observer)
}

#[test]
fn get_returns_top_level_items() {
    let config = Configuration::from(json!({"debug": true, "foo": "bar"}));

    assert_eq!(config.get("debug"), Some(&json!(true)));
    assert_eq!(config.get("foo"), Some(&json!("bar")));
}

#[test]
fn get_walks_dotted_keys() {
    let config = Configuration::from(sample());

    assert_eq!(config.get("app.debug"), Some(&json!(true)));
    assert_eq!(
        config.get("database.drivers.mysql.username"),
        Some(&json!("sam"))
    );
    assert_eq!(
        config.get("database.drivers.sqlite"),
        Some(&json!({"database": "gestalt"}))
    );
}

#[test]
fn get_misses_return_default() {
    let config = Configuration::from(sample());
    let default = json!(42);

    assert_eq!(config.get("missing.path"), None);
    assert_eq!(config.get_or("missing.path", &default), &json!(42));
    assert_eq!(config.get_or("app.locale", &default), &json!("en"));
    assert_eq!(config.get("app.debug.deeper"), None);
}

#[test]
fn literal_keys_win_over_traversal() {
    let config = Configuration::from(json!({
        "app.debug": "literal",
        "app": {"debug": "nested"}
    }));

    assert_eq!(config.get("app.debug"), Some(&json!("literal")));
}

#[test]
fn exists_checks_literal_keys_only() {
    let config = Configuration::from(json!({"app": {"debug": true}, "a.b": 1}));

    assert!(config.exists("app"));
    assert!(config.exists("a.b"));
    assert!(!config.exists("app.debug"));
    assert!(!config.exists("missing"));
}

#[test]
fn all_returns_every_item() {
    let original = items(json!({"app": {"foo": "bar"}}));
    let config = Configuration::new(original.clone());

    assert_eq!(config.all(), &original);

    let mut copy = config.all().clone();
    copy.insert("extra".to_string(), json!(1));
    assert!(!config.exists("extra"));
}

#[test]
fn constructs_from_different_sources() {
    let source = items(json!({"foo": "bar"}));

    let a = Configuration::new(source.clone());
    let b = Configuration::from(&Configuration::new(source.clone()));
    let c: Configuration = vec![("foo", "bar")].into_iter().collect();
    let d = Configuration::from(Value::Object(source.clone()));
    let e = Configuration::from(json!("not a mapping"));

    for config in [&a, &b, &c, &d] {
        assert_eq!(config.get("foo"), Some(&json!("bar")));
    }
    assert!(e.is_empty());
}

#[test]
fn copy_construction_does_not_alias() {
    let mut first = Configuration::from(json!({"foo": "bar"}));
    let second = Configuration::from(&first);

    first.set("foo", "changed").unwrap();
    assert_eq!(second.get("foo"), Some(&json!("bar")));
}

#[test]
fn load_accepts_closures() {
    let config = Configuration::load(&|| -> anyhow::Result<Items> {
        Ok(items(json!({"foo": "bar"})))
    })
    .expect("closure loader should succeed");

    assert_eq!(config.get("foo"), Some(&json!("bar")));
}

#[test]
fn load_surfaces_loader_errors() {
    let err = Configuration::from_loader(&|| -> anyhow::Result<Items> {
        anyhow::bail!("malformed file")
    })
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::LoadFailed);
    assert!(err.to_string().contains("malformed file"));
}

#[test]
fn add_keeps_existing_values() {
    let mut config = Configuration::from(json!({"foo": "bar"}));

    config.add("foo", "bin").unwrap();
    assert_eq!(config.get("foo"), Some(&json!("bar")));

    config.add("foo.bin", 1).unwrap();
    assert_eq!(config.get("foo.bin"), None);
    assert_eq!(config.get("foo"), Some(&json!("bar")));
}

#[test]
fn add_creates_missing_levels() {
    let mut config = Configuration::from(json!({"foo": "bar"}));

    config.add("baz", "bin").unwrap();
    config.add("mail.smtp.host", "localhost").unwrap();

    assert_eq!(config.get("baz"), Some(&json!("bin")));
    assert_eq!(
        config.get("mail"),
        Some(&json!({"smtp": {"host": "localhost"}}))
    );
}

#[test]
fn set_overwrites_and_keeps_siblings() {
    let mut config = Configuration::from(sample());

    config.set("app.debug", false).unwrap();
    config.set("baz", "bin").unwrap();

    assert_eq!(config.get("app.debug"), Some(&json!(false)));
    assert_eq!(config.get("app.locale"), Some(&json!("en")));
    assert_eq!(config.get("app.version"), Some(&json!("1.0")));
    assert_eq!(config.get("baz"), Some(&json!("bin")));
}

#[test]
fn set_replaces_scalar_intermediates() {
    let mut config = Configuration::from(json!({"foo": 123}));

    config.set("foo.bar.baz", "deep").unwrap();

    assert_eq!(config.get("foo"), Some(&json!({"bar": {"baz": "deep"}})));
}

#[test]
fn remove_leaves_empty_parent() {
    let mut config = Configuration::from(json!({"baz": {"bin": 123}}));

    config.remove("baz.bin").unwrap();

    assert_eq!(config.get("baz"), Some(&json!({})));
    assert_eq!(config.get("baz.bin"), None);
}

#[test]
fn remove_top_level_item() {
    let mut config = Configuration::from(json!({"foo": "bar"}));

    config.remove("foo").unwrap();

    assert!(config.all().is_empty());
}

#[test]
fn reset_restores_construction_state_without_notifying() {
    let original = sample();
    let (mut config, observer) = with_counter(original.clone());

    config.set("app.debug", false).unwrap();
    config.add("cache.driver", "redis").unwrap();
    config.remove("database.drivers.sqlite").unwrap();
    let before_reset = observer.updates();
    assert_eq!(before_reset, 3);

    config.reset();

    assert_eq!(Value::Object(config.all().clone()), original);
    assert_eq!(observer.updates(), before_reset);
}

#[test]
fn reset_chains() {
    let mut config = Configuration::from(json!({"foo": "bar"}));
    config.set("foo", 123).unwrap();

    assert_eq!(config.reset().get("foo"), Some(&json!("bar")));
}

#[test]
fn merge_requires_mapping_target() {
    let (mut config, observer) = with_counter(json!({"foo": "bar"}));

    let err = config
        .merge("foo", items(json!({"x": 1})))
        .expect_err("merging into a string must fail");

    assert!(matches!(err, ConfigError::InvalidOperation { .. }));
    assert_eq!(err.key(), Some("foo"));
    assert_eq!(Value::Object(config.all().clone()), json!({"foo": "bar"}));
    assert_eq!(observer.updates(), 0);
}

#[test]
fn merge_is_shallow_and_notifies_once() {
    let (mut config, observer) = with_counter(json!({
        "mail": {"from": "sam@example.com", "smtp": {"host": "localhost", "port": 25}}
    }));

    config
        .merge(
            "mail",
            items(json!({"reply-to": "dev@null.com", "smtp": {"port": 587}})),
        )
        .unwrap();

    assert_eq!(
        config.get("mail"),
        Some(&json!({
            "from": "sam@example.com",
            "smtp": {"port": 587},
            "reply-to": "dev@null.com"
        }))
    );
    assert_eq!(observer.updates(), 1);
}

#[test]
fn prefix_writes_back_with_one_notification() {
    let (mut config, observer) = with_counter(json!({"db": {"user": "a", "host": "h"}}));

    config
        .prefix("db", |db| {
            db.set("user", "b")?;
            db.add("port", 5432)?;
            db.remove("host")?;
            Ok(())
        })
        .unwrap();

    assert_eq!(config.get("db.user"), Some(&json!("b")));
    assert_eq!(config.get("db.port"), Some(&json!(5432)));
    assert_eq!(config.get("db.host"), None);
    assert_eq!(observer.updates(), 1);
}

#[test]
fn prefix_on_missing_path_creates_it() {
    let mut config = Configuration::default();

    config
        .prefix("cache.redis", |redis| redis.set("host", "localhost"))
        .unwrap();

    assert_eq!(
        config.get("cache"),
        Some(&json!({"redis": {"host": "localhost"}}))
    );
}

#[test]
fn flatten_produces_dotted_leaves_without_notifying() {
    let (mut config, observer) = with_counter(json!({"a": {"b": {"c": 1}}, "d": 2}));

    config.flatten();

    assert_eq!(Value::Object(config.all().clone()), json!({"a.b.c": 1, "d": 2}));
    assert_eq!(config.get("a.b.c"), Some(&json!(1)));
    assert_eq!(observer.updates(), 0);
}

#[test]
fn flatten_then_reset_restores_tree() {
    let mut config = Configuration::from(json!({"a": {"b": 1}}));
    config.flatten();
    config.reset();
    assert_eq!(config.get("a"), Some(&json!({"b": 1})));
}

#[test]
fn observers_notified_in_attachment_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut config = Configuration::default();

    config.attach(Arc::new(NamedObserver {
        name: "a",
        log: Arc::clone(&log),
    }));
    config.attach(Arc::new(NamedObserver {
        name: "b",
        log: Arc::clone(&log),
    }));

    config.set("foo", "bar").unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
}

#[test]
fn add_and_set_notify_every_observer() {
    let mut config = Configuration::from(json!({"foo": 123, "bar": 456}));
    let first = Arc::new(CountingObserver::default());
    let second = Arc::new(CountingObserver::default());
    config.attach(first.clone());
    config.attach(second.clone());

    config.add("baz", 789).unwrap();
    config.set("baz", 790).unwrap();

    assert_eq!(first.updates(), 2);
    assert_eq!(second.updates(), 2);
}

#[test]
fn detached_observer_is_not_notified() {
    let mut config = Configuration::default();
    let observer = Arc::new(CountingObserver::default());
    let handle: Arc<dyn Observer<Configuration>> = observer.clone();

    config.attach(handle.clone());
    config.set("foo", 1).unwrap();
    assert!(config.detach(&handle));
    config.set("foo", 2).unwrap();

    assert_eq!(observer.updates(), 1);
    assert_eq!(config.observer_count(), 0);
}

#[test]
fn failing_observer_stops_later_observers() {
    let mut config = Configuration::default();
    let later = Arc::new(CountingObserver::default());

    config.attach(Arc::new(|_: &Configuration| -> anyhow::Result<()> {
        anyhow::bail!("validation failed")
    }));
    config.attach(later.clone());

    let err = config.set("foo", 1).unwrap_err();

    assert_eq!(err.code(), ErrorCode::ObserverFailed);
    assert!(err.to_string().contains("validation failed"));
    assert_eq!(later.updates(), 0);
}

#[test]
fn observer_can_read_subject() {
    let mut config = Configuration::from(json!({"app": {"debug": true}}));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    config.attach(Arc::new(move |c: &Configuration| -> anyhow::Result<()> {
        sink.lock().unwrap().push(c.get("app.debug").cloned());
        Ok(())
    }));

    config.set("app.debug", false).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![Some(json!(false))]);
}
