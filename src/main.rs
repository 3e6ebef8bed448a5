use anyhow::Context;
use clap::Parser;
use mudmap::config::Config;
use mudmap::import::load_atlas;
use mudmap::input::parser::{HELP, ParseError, Request, parse_request};
use mudmap::{NavigationSession, start_nav_worker};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "mudmap", version, about = "Track your room on a MUD map and walk routes")]
struct Args {
    /// Zone file or directory of zone files (defaults to $MUDMAP_MAP)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Zone to start in, by id or name (defaults to $MUDMAP_ZONE)
    #[arg(long)]
    zone: Option<String>,

    /// TOML config file; values from the environment and flags override it
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let file_cfg = match args.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let cfg = file_cfg.merge(Config::from_env()).merge(Config {
        map: args.map,
        zone: args.zone,
        ..Config::default()
    });

    init_tracing(&cfg.log_filter);

    let map_path = cfg.map_path()?;
    let atlas = load_atlas(map_path).with_context(|| format!("loading map from {}", map_path.display()))?;

    let mut session = NavigationSession::new(|commands: &str| println!(">> {commands}"));
    session.load_atlas(atlas, cfg.zone.as_deref());
    let nav = start_nav_worker(session);

    tracing::info!(map = %map_path.display(), "mudmap ready, type 'help'");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let req = match parse_request(&line) {
            Ok(req) => req,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match req {
            Request::Signal { name, value } => {
                if let Some(status) = nav.signal(name, value).await? {
                    println!("{status}");
                }
            }
            Request::Goto(target) => println!("{}", nav.goto(target).await?),
            Request::FindMe => println!("{}", nav.find_me().await?),
            Request::Where => println!("{}", nav.where_am_i().await?),
            Request::Dump => {
                let snap = nav.snapshot().await?;
                println!("{}", serde_json::to_string_pretty(&snap)?);
            }
            Request::Help => println!("{HELP}"),
            Request::Quit => break,
        }
    }

    Ok(())
}

fn init_tracing(filter: &str) {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(mudmap::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
