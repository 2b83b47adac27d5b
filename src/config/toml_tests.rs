//! Tests for TOML configuration parsing.

use std::path::Path;

use super::ConfigError;
use super::toml::TomlConfig;

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.monitor.socket.is_none());
        assert!(config.monitor.timeout.is_none());
        assert!(config.neighbor.table.is_none());
        assert!(config.neighbor.device.is_none());
    }

    #[test]
    fn parse_full_config() {
        let config = TomlConfig::parse(
            r#"
            [monitor]
            socket = "~/vms/guest/qmp.sock"
            timeout = 10

            [neighbor]
            table = "/proc/net/arp"
            device = "virbr0"
        "#,
        )
        .unwrap();

        assert_eq!(
            config.monitor.socket.as_deref(),
            Some(Path::new("~/vms/guest/qmp.sock"))
        );
        assert_eq!(config.monitor.timeout, Some(10));
        assert_eq!(
            config.neighbor.table.as_deref(),
            Some(Path::new("/proc/net/arp"))
        );
        assert_eq!(config.neighbor.device.as_deref(), Some("virbr0"));
    }

    #[test]
    fn sections_are_independent() {
        let config = TomlConfig::parse("[neighbor]\ndevice = \"br0\"\n").unwrap();

        assert!(config.monitor.socket.is_none());
        assert_eq!(config.neighbor.device.as_deref(), Some("br0"));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[logging]\nlevel = \"debug\"\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = TomlConfig::parse("[monitor]\nretries = 3\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[monitor]\ntimeout = \"two\"\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = TomlConfig::load(&path);

        match result {
            Err(ConfigError::FileRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected FileRead, got {other:?}"),
        }
    }
}
