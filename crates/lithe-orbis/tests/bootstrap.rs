use lithe_config::{parse_config, ConfigFormat};
use lithe_events::{DispatchError, Event, FailurePolicy, Listener};
use lithe_orbis::{bootstrap, events};

// Runs as its own test binary: bootstrap must happen before anything touches the shared dispatcher.
#[test]
fn test_bootstrap_configures_shared_dispatcher() {
    let config = parse_config(
        r#"
events:
  failure_policy: isolate
telemetry:
  level: debug
"#,
        ConfigFormat::Yaml,
    )
    .unwrap();

    let installed = bootstrap(&config).unwrap();
    assert_eq!(installed.policy(), FailurePolicy::Isolate);
    assert_eq!(events::dispatcher().policy(), FailurePolicy::Isolate);

    events::on(
        "bootstrap.failing",
        Listener::new(|_| anyhow::bail!("first")),
    )
    .unwrap();
    events::on(
        "bootstrap.failing",
        Listener::new(|_| anyhow::bail!("second")),
    )
    .unwrap();

    let err = events::emit(&Event::new("bootstrap.failing")).unwrap_err();
    assert!(matches!(err, DispatchError::ListenersFailed { .. }));
    assert_eq!(err.failure_count(), 2);

    assert!(bootstrap(&config).is_err());
}
