use anyhow::bail;
use clap::{Parser, ValueEnum};
use core::time::Duration;
use todo_tonic_core::types::DEFAULT_SERVER_ADDR;

/// Runtime configuration for the `todo-tonic-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a `.env`
/// file is loaded first), with defaults that match a local development setup.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "todo-tonic-server",
    version,
    about = "A gRPC service for an in-memory todo list"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "0.0.0.0:3000" or "/tmp/todo.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from(DEFAULT_SERVER_ADDR))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Capacity of the buffer between the task feeding a `readTodosStream`
    /// call and the gRPC response stream.
    ///
    /// Environment variable: `STREAM_BUFFER_SIZE`
    #[arg(long, env = "STREAM_BUFFER_SIZE", default_value_t = 16)]
    pub stream_buffer_size: usize,

    /// Seconds to wait for in-flight streams to finish during shutdown before
    /// cancelling them.
    ///
    /// Environment variable: `SHUTDOWN_TIMEOUT`
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 3)]
    pub shutdown_timeout: u64,

    /// Log output format.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Formatting used by the console log layer.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human-readable output.
    Pretty,
    /// One JSON object per event.
    Json,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub stream_buffer_size: usize,
    pub shutdown_timeout: Duration,
    pub log_format: LogFormat,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.stream_buffer_size == 0 {
            bail!("STREAM_BUFFER_SIZE must be greater than 0");
        }

        if args.server_addr.trim().is_empty() {
            bail!("SERVER_ADDR must not be empty");
        }

        Ok(Self {
            server_addr: args.server_addr,
            uds: args.uds,
            stream_buffer_size: args.stream_buffer_size,
            shutdown_timeout: Duration::from_secs(args.shutdown_timeout),
            log_format: args.log_format,
        })
    }
}

#[cfg(test)]
impl ServerConfig {
    /// Loopback config with a small stream buffer and a short drain window.
    pub(crate) fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            uds: false,
            stream_buffer_size: 4,
            shutdown_timeout: Duration::from_millis(200),
            log_format: LogFormat::Pretty,
        }
    }
}
