use tracewalk_domain::config::{CliOverrides, Config};
use tracewalk_domain::config::resolver::ResolverConfig;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.web_port, 8000);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.server.cors_origin, "http://localhost:5173");
    assert_eq!(config.resolver.root_servers.len(), 13);
    assert_eq!(config.resolver.query_timeout_ms, 2000);
    assert_eq!(config.resolver.max_hops, 20);
    assert_eq!(config.resolver.side_resolution_depth, 2);
    assert!(!config.resolver.cache_negative);
    assert_eq!(config.resolver.negative_ttl, 300);
    assert!(config.cache.enabled);
    assert_eq!(config.cache.max_entries, 1000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_partial_toml_fills_defaults() {
    let toml_str = r#"
        [server]
        web_port = 9000

        [resolver]
        max_hops = 10
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.web_port, 9000);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.resolver.max_hops, 10);
    assert_eq!(config.resolver.query_timeout_ms, 2000);
}

#[test]
fn test_root_servers_parse_as_ips() {
    let toml_str = r#"
        [resolver]
        root_servers = ["192.0.2.1", "2001:db8::53"]
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.resolver.root_servers.len(), 2);
    assert!(config.resolver.root_servers[1].is_ipv6());
}

#[test]
fn test_validation_rejects_empty_root_set() {
    let mut config = Config::default();
    config.resolver.root_servers.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_zero_hop_budget() {
    let mut config = Config::default();
    config.resolver.max_hops = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_cli_overrides_apply() {
    let overrides = CliOverrides {
        web_port: Some(8081),
        bind_address: Some("127.0.0.1".to_string()),
        log_level: Some("debug".to_string()),
        query_timeout_ms: Some(5000),
    };

    let config = Config::load(None, overrides).unwrap();
    assert_eq!(config.server.web_port, 8081);
    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.resolver.query_timeout_ms, 5000);
}

#[test]
fn test_default_roots_constant_matches_config() {
    let config = ResolverConfig::default();
    assert_eq!(config.root_servers[0].to_string(), "198.41.0.4");
    assert_eq!(config.root_servers[12].to_string(), "202.12.27.33");
}
