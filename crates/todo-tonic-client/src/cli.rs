use clap::{Parser, Subcommand, ValueEnum};
use core::fmt;
use todo_tonic_core::types::DEFAULT_ENDPOINT;
use tonic::codec::CompressionEncoding;

/// Calls the todo gRPC service and prints the results.
///
/// Without a subcommand, creates a todo from `TEXT` (when given), lists every
/// todo and then streams every todo.
///
/// A bare `create`, `list` or `stream` is read as a subcommand. To store a
/// todo with one of those words as its text, use `create <TEXT>`.
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-tonic-client", version)]
pub struct CliArgs {
    /// Server endpoint.
    ///
    /// Environment variable: `TODO_SERVER_ADDR`
    #[arg(long, env = "TODO_SERVER_ADDR", default_value_t = String::from(DEFAULT_ENDPOINT))]
    pub server_addr: String,

    /// Compression used for requests and accepted for responses.
    ///
    /// Environment variable: `TODO_COMPRESSION`
    #[arg(long, env = "TODO_COMPRESSION", value_enum, default_value_t = Compression::None)]
    pub compression: Compression,

    /// Print one JSON object per line instead of plain text.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Text of the todo to create before listing and streaming.
    ///
    /// Subcommand names are not accepted here; use `create <TEXT>` for them.
    pub text: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a single todo.
    Create {
        /// Text of the todo.
        text: String,
    },
    /// Fetch every todo in one response.
    List,
    /// Stream every todo one message at a time.
    Stream,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Deflate,
    Gzip,
    Zstd,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Deflate => write!(f, "deflate"),
            Compression::Gzip => write!(f, "gzip"),
            Compression::Zstd => write!(f, "zstd"),
        }
    }
}

impl From<Compression> for Option<CompressionEncoding> {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => None,
            Compression::Deflate => Some(CompressionEncoding::Deflate),
            Compression::Gzip => Some(CompressionEncoding::Gzip),
            Compression::Zstd => Some(CompressionEncoding::Zstd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("todo-tonic-client").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn bare_text_runs_the_demo() {
        let args = parse(&["buy milk"]);
        assert_eq!(args.text.as_deref(), Some("buy milk"));
        assert_eq!(args.command, None);
    }

    #[test]
    fn no_arguments_is_a_demo_without_create() {
        let args = parse(&[]);
        assert_eq!(args.text, None);
        assert_eq!(args.command, None);
    }

    #[test]
    fn subcommands_parse() {
        assert_eq!(
            parse(&["create", "walk dog"]).command,
            Some(Command::Create {
                text: "walk dog".to_string()
            })
        );
        assert_eq!(parse(&["list"]).command, Some(Command::List));
        assert_eq!(parse(&["stream"]).command, Some(Command::Stream));
    }

    #[test]
    fn options_parse_with_subcommands() {
        let args = parse(&[
            "--server-addr",
            "http://10.0.0.1:3000",
            "--compression",
            "zstd",
            "list",
            "--json",
        ]);
        assert_eq!(args.server_addr, "http://10.0.0.1:3000");
        assert_eq!(args.compression, Compression::Zstd);
        assert!(args.json);
    }

    #[test]
    fn subcommand_names_as_text_go_through_create() {
        let bare = parse(&["list"]);
        assert_eq!(bare.text, None);
        assert_eq!(bare.command, Some(Command::List));

        for word in ["create", "list", "stream"] {
            assert_eq!(
                parse(&["create", word]).command,
                Some(Command::Create {
                    text: word.to_string()
                })
            );
        }
    }

    #[test]
    fn create_requires_text() {
        let argv = ["todo-tonic-client", "create"];
        assert!(CliArgs::try_parse_from(argv).is_err());
    }

    #[test]
    fn compression_maps_to_encodings() {
        assert_eq!(Option::<CompressionEncoding>::from(Compression::None), None);
        assert_eq!(
            Option::<CompressionEncoding>::from(Compression::Gzip),
            Some(CompressionEncoding::Gzip)
        );
        assert_eq!(Compression::Deflate.to_string(), "deflate");
    }
}
