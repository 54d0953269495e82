use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use pageshot_engine::{CaptureSettings, EngineConfig};

/// pageshot - capture web pages as images or PDFs over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = "pageshot")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Port to listen on
    #[arg(long, env = "PAGESHOT_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "PAGESHOT_BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Directory holding captured artifacts (default: <tmp>/__pageshot)
    #[arg(long, env = "PAGESHOT_IMAGES_DIR")]
    pub images_dir: Option<PathBuf>,

    /// Capture tool executable
    #[arg(long, env = "PAGESHOT_CAPTURE_BIN", default_value = "electroshot")]
    pub capture_bin: PathBuf,

    /// Kill a capture after this many seconds (0 disables the limit)
    #[arg(long, env = "PAGESHOT_CAPTURE_TIMEOUT_SECS", default_value_t = 120)]
    pub capture_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, env = "PAGESHOT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Also write logs to this file
    #[arg(long, env = "PAGESHOT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Disable the per-request audit log
    #[arg(long)]
    pub no_audit: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub engine: EngineConfig,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub audit: bool,
}

impl Args {
    pub fn into_config(self) -> ServerConfig {
        let images_dir = self
            .images_dir
            .unwrap_or_else(|| std::env::temp_dir().join("__pageshot"));
        let timeout = match self.capture_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        ServerConfig {
            addr: SocketAddr::new(self.bind, self.port),
            engine: EngineConfig {
                images_dir,
                capture: CaptureSettings {
                    executable: self.capture_bin,
                    timeout,
                },
            },
            log_level: pageshot_logging::parse_level(&self.log_level),
            log_file: self.log_file,
            audit: !self.no_audit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Args::parse_from(["pageshot"]).into_config();
        assert_eq!(config.addr.port(), 8000);
        assert!(config.addr.ip().is_unspecified());
        assert!(config.engine.images_dir.ends_with("__pageshot"));
        assert_eq!(config.engine.capture.executable, PathBuf::from("electroshot"));
        assert_eq!(config.engine.capture.timeout, Some(Duration::from_secs(120)));
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(config.audit);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Args::parse_from([
            "pageshot",
            "--port",
            "9001",
            "--bind",
            "127.0.0.1",
            "--images-dir",
            "/srv/shots",
            "--capture-bin",
            "/opt/capture",
            "--capture-timeout-secs",
            "0",
            "--log-level",
            "debug",
            "--no-audit",
        ])
        .into_config();

        assert_eq!(config.addr, "127.0.0.1:9001".parse().unwrap());
        assert_eq!(config.engine.images_dir, PathBuf::from("/srv/shots"));
        assert_eq!(config.engine.capture.executable, PathBuf::from("/opt/capture"));
        assert_eq!(config.engine.capture.timeout, None);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert!(!config.audit);
    }
}
