#![doc = include_str!("../README.md")]

mod cli;
mod commands;
mod output;

use anyhow::Context;
use clap::Parser;
use cli::{CliArgs, Command};
use output::Output;
use todo_tonic_core::{client::connect, proto::todo_client::TodoClient};
use tonic::{codec::CompressionEncoding, transport::Channel};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Level of the notice printed when the default mode skips the create.
const SKIP_CREATE_LEVEL: Level = Level::WARN;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with_writer(std::io::stderr)
        .init();

    let client = connect(&args.server_addr)
        .await
        .with_context(|| format!("connecting to {}", args.server_addr))?;
    let mut client = match Option::<CompressionEncoding>::from(args.compression) {
        Some(encoding) => client.send_compressed(encoding).accept_compressed(encoding),
        None => client,
    };
    let out = Output::new(args.json);

    match args.command {
        Some(Command::Create { text }) => run_create(&mut client, out, text).await,
        Some(Command::List) => run_list(&mut client, out).await,
        Some(Command::Stream) => run_stream(&mut client, out).await,
        None => {
            match args.text {
                Some(text) => run_create(&mut client, out, text).await?,
                None => tracing::event!(SKIP_CREATE_LEVEL, "No TEXT given, skipping create"),
            }
            run_list(&mut client, out).await?;
            run_stream(&mut client, out).await
        }
    }
}

async fn run_create(client: &mut TodoClient<Channel>, out: Output, text: String) -> anyhow::Result<()> {
    let item = commands::create(client, text).await.context("createTodo failed")?;
    println!("{}", out.created(&item)?);
    Ok(())
}

async fn run_list(client: &mut TodoClient<Channel>, out: Output) -> anyhow::Result<()> {
    let items = commands::list(client).await.context("readTodos failed")?;
    for item in &items {
        println!("{}", out.item(item)?);
    }
    Ok(())
}

async fn run_stream(client: &mut TodoClient<Channel>, out: Output) -> anyhow::Result<()> {
    commands::stream(client, |item| {
        println!("{}", out.item(&item)?);
        Ok(())
    })
    .await
    .context("readTodosStream failed")?;
    println!("{}", out.stream_done());
    Ok(())
}
