//! Configuration change and save path tests.

use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use autolink_config::autolink::Autolink;
use autolink_config::config::ConfigStore;
use autolink_config::plugin::PluginError;
use autolink_config::{AutolinkPlugin, Configuration};

mod common;
use common::MockHost;

fn setup(stored: Configuration, users: &[&str]) -> (Arc<MockHost>, AutolinkPlugin) {
    let host = Arc::new(MockHost::new(stored, users));
    let plugin = AutolinkPlugin::new(host.clone(), Arc::new(ConfigStore::default()));
    (host, plugin)
}

fn ids(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_change_publishes_links_and_admins() {
    let stored = Configuration {
        plugin_admins: "u1, u2 ,u3".to_string(),
        links: vec![
            Autolink::new("a", "aaa", "x"),
            Autolink::new("b", "bbb", "y"),
        ],
        ..Default::default()
    };
    let (host, plugin) = setup(stored, &["u1", "u3"]);

    let change = plugin.on_configuration_change().await.unwrap();
    change.registration.await.unwrap();

    let config = plugin.get_config();
    assert_eq!(config.links.len(), 2);
    assert!(config.links.iter().all(|l| l.is_compiled()));
    assert_eq!(config.admin_user_ids, ids(&["u1", "u3"]));
    assert!(plugin.is_plugin_admin("u1"));
    assert!(!plugin.is_plugin_admin("u2"));
    assert_eq!(host.lookups(), 3);

    assert_eq!(change.report.admin_failures.len(), 1);
    assert_eq!(change.report.admin_failures[0].user_id, "u2");
    assert!(change.report.rule_failures.is_empty());
}

#[tokio::test]
async fn test_empty_admin_list_does_no_lookups() {
    let (host, plugin) = setup(Configuration::default(), &["u1"]);

    plugin.on_configuration_change().await.unwrap();

    assert!(plugin.get_config().admin_user_ids.is_empty());
    assert_eq!(host.lookups(), 0);
}

#[tokio::test]
async fn test_admin_set_is_rebuilt_on_every_change() {
    let (host, plugin) = setup(
        Configuration {
            plugin_admins: "u1".to_string(),
            ..Default::default()
        },
        &["u1", "u2"],
    );
    plugin.on_configuration_change().await.unwrap();
    assert_eq!(plugin.get_config().admin_user_ids, ids(&["u1"]));

    host.set_stored(Configuration {
        plugin_admins: "u2".to_string(),
        ..Default::default()
    });
    plugin.on_configuration_change().await.unwrap();
    assert_eq!(plugin.get_config().admin_user_ids, ids(&["u2"]));
}

#[tokio::test]
async fn test_invalid_link_does_not_block_others() {
    let stored = Configuration {
        links: vec![
            Autolink::new("good", "abc", "x"),
            Autolink::new("bad", "([", "x"),
            Autolink::new("also-good", "def", "y"),
        ],
        ..Default::default()
    };
    let (_host, plugin) = setup(stored, &[]);

    let change = plugin.on_configuration_change().await.unwrap();

    let links = &change.snapshot.links;
    assert_eq!(links.len(), 3);
    assert!(links[0].is_compiled());
    assert!(!links[1].is_compiled());
    assert!(links[2].is_compiled());

    assert_eq!(change.report.rule_failures.len(), 1);
    assert_eq!(change.report.rule_failures[0].name, "bad");
    assert!(Arc::ptr_eq(&change.snapshot, &plugin.get_config()));
}

#[tokio::test]
async fn test_load_failure_keeps_previous_configuration() {
    let (host, plugin) = setup(
        Configuration {
            links: vec![Autolink::new("a", "aaa", "x")],
            ..Default::default()
        },
        &[],
    );
    plugin.on_configuration_change().await.unwrap();
    let before = plugin.get_config();

    host.fail_load.store(true, Ordering::SeqCst);
    let err = plugin.on_configuration_change().await.unwrap_err();

    assert!(matches!(err, PluginError::LoadConfiguration(_)));
    assert!(Arc::ptr_eq(&before, &plugin.get_config()));
}

#[tokio::test]
async fn test_admin_command_toggle() {
    let (host, plugin) = setup(
        Configuration {
            enable_admin_command: true,
            ..Default::default()
        },
        &[],
    );

    let change = plugin.on_configuration_change().await.unwrap();
    change.registration.await.unwrap();
    assert_eq!(host.registers(), 1);
    assert_eq!(host.unregisters(), 0);
    let command = host.last_command.lock().unwrap().clone().unwrap();
    assert_eq!(command.trigger, "autolink");

    host.set_stored(Configuration::default());
    let change = plugin.on_configuration_change().await.unwrap();
    change.registration.await.unwrap();
    assert_eq!(host.registers(), 1);
    assert_eq!(host.unregisters(), 1);

    host.set_stored(Configuration {
        enable_admin_command: true,
        ..Default::default()
    });
    let change = plugin.on_configuration_change().await.unwrap();
    change.registration.await.unwrap();
    assert_eq!(host.registers(), 2);
    assert_eq!(host.unregisters(), 1);
}

#[tokio::test]
async fn test_registration_failure_does_not_roll_back() {
    let (host, plugin) = setup(
        Configuration {
            enable_admin_command: true,
            links: vec![Autolink::new("a", "aaa", "x")],
            ..Default::default()
        },
        &[],
    );
    host.fail_register.store(true, Ordering::SeqCst);

    let change = plugin.on_configuration_change().await.unwrap();
    change.registration.await.unwrap();

    assert_eq!(host.registers(), 1);
    assert!(plugin.get_config().enable_admin_command);
    assert_eq!(plugin.get_links().len(), 1);
}

#[tokio::test]
async fn test_save_links_preserves_order_and_is_visible() {
    let (host, plugin) = setup(
        Configuration {
            enable_on_update: true,
            plugin_admins: "u1".to_string(),
            ..Default::default()
        },
        &["u1"],
    );
    plugin.on_configuration_change().await.unwrap();

    let links = vec![
        Autolink::new("zeta", "z", "1"),
        Autolink::new("alpha", "a", "2"),
        Autolink::new("mid", "m", "3"),
    ];
    plugin.save_links(links.clone()).await.unwrap();

    assert_eq!(plugin.get_links(), links);
    // Fields other than links survive the mutation.
    let config = plugin.get_config();
    assert!(config.enable_on_update);
    assert_eq!(config.admin_user_ids, ids(&["u1"]));

    let saved = host.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    let names: Vec<_> = saved[0]["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["Name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    assert_eq!(saved[0]["pluginadmins"], "u1");
    assert!(saved[0].keys().all(|k| !k.to_lowercase().contains("userid")));
    assert_eq!(saved[0].len(), 4);
}

#[tokio::test]
async fn test_save_links_failure_is_reported() {
    let (host, plugin) = setup(Configuration::default(), &[]);
    host.fail_save.store(true, Ordering::SeqCst);

    let links = vec![Autolink::new("a", "aaa", "x")];
    let err = plugin.save_links(links.clone()).await.unwrap_err();

    assert!(matches!(err, PluginError::SaveLinks(_)));
    assert!(err.to_string().starts_with("unable to save links"));
    // The in-memory update is not rolled back.
    assert_eq!(plugin.get_links(), links);
}

#[tokio::test]
async fn test_saved_map_reloads_to_same_configuration() {
    let (host, plugin) = setup(Configuration::default(), &[]);
    let links = vec![Autolink::new("a", "aaa", "x")];
    plugin.save_links(links.clone()).await.unwrap();

    let map = host.saved.lock().unwrap()[0].clone();
    let reloaded: Configuration = serde_json::from_value(serde_json::Value::Object(map)).unwrap();
    host.set_stored(reloaded);

    plugin.on_configuration_change().await.unwrap();
    assert_eq!(plugin.get_links(), links);
    assert!(plugin.get_links()[0].is_compiled());
}
