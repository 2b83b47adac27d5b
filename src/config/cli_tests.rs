//! Tests for CLI argument parsing.

use std::path::Path;

use clap::{CommandFactory, Parser};

use super::cli::{Cli, USAGE};

mod parsing {
    use super::*;

    #[test]
    fn parse_socket_only() {
        let cli = Cli::parse_from_iter(["qmp-netaddrs", "/run/vm/qmp.sock"]);

        assert_eq!(cli.socket.as_deref(), Some(Path::new("/run/vm/qmp.sock")));
        assert!(cli.neighbor_table.is_none());
        assert!(cli.device.is_none());
        assert!(cli.timeout.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn socket_is_kept_verbatim() {
        let cli = Cli::parse_from_iter(["qmp-netaddrs", "~/vm/qmp.sock"]);

        assert_eq!(cli.socket.as_deref(), Some(Path::new("~/vm/qmp.sock")));
    }

    #[test]
    fn parse_all_options() {
        let cli = Cli::parse_from_iter([
            "qmp-netaddrs",
            "--neighbor-table",
            "/tmp/arp",
            "--device",
            "virbr0",
            "--timeout",
            "5",
            "--config",
            "qmp.toml",
            "--verbose",
            "qmp.sock",
        ]);

        assert_eq!(cli.socket.as_deref(), Some(Path::new("qmp.sock")));
        assert_eq!(cli.neighbor_table.as_deref(), Some(Path::new("/tmp/arp")));
        assert_eq!(cli.device.as_deref(), Some("virbr0"));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.config.as_deref(), Some(Path::new("qmp.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::parse_from_iter(["qmp-netaddrs", "-v", "-c", "qmp.toml"]);

        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(Path::new("qmp.toml")));
        assert!(cli.socket.is_none());
    }
}

mod errors {
    use super::*;

    #[test]
    fn rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["qmp-netaddrs", "--frobnicate", "qmp.sock"]).is_err());
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["qmp-netaddrs", "--timeout", "soon", "qmp.sock"]).is_err());
    }

    #[test]
    fn rejects_second_positional() {
        assert!(Cli::try_parse_from(["qmp-netaddrs", "a.sock", "b.sock"]).is_err());
    }
}

mod usage {
    use super::*;

    #[test]
    fn socket_is_shown_as_required() {
        let usage = Cli::command().render_usage().to_string();

        assert!(usage.contains("<QMP-SOCKET-ADDRESS>"));
        assert!(!usage.contains("[QMP-SOCKET-ADDRESS]"));
        assert!(usage.contains(USAGE));
    }
}
