use clap::{Args, Parser, Subcommand};

use crate::bookmarks::BookmarkProxy;
use crate::config::{BookmarkConfig, SiteConfig, SocialLinks};
use crate::content::SiteContent;
use crate::error::{Result, SiteError};
use crate::logging::{self, LogFormat};
use crate::server::{Server, ServerConfig, SiteState};

#[derive(Debug, Parser)]
#[command(
    name = "folio-site",
    about = "Portfolio site backend: bookmark proxy, contact relay, content feeds",
    version
)]
pub struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server.
    Serve(ServeArgs),

    /// Print the static content feeds as JSON.
    Content,

    /// Fetch the bookmark feed once and print the proxied body.
    Thoughts,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Address to listen on; overrides FOLIO_BIND_ADDR.
    #[arg(long)]
    pub bind: Option<String>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    });
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    run_with_lookup(cli, |key| std::env::var(key).ok())
}

/// Run `cli` resolving configuration through `lookup`.
pub fn run_with_lookup<F>(cli: Cli, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    match cli.command {
        Commands::Serve(args) => serve(args, &lookup),
        Commands::Content => {
            let content = SiteContent::new(&SocialLinks::from_lookup(&lookup));
            println!("{}", serde_json::to_string_pretty(&content)?);
            Ok(())
        }
        Commands::Thoughts => {
            let proxy = BookmarkProxy::new(BookmarkConfig::from_lookup(&lookup)?)?;
            let response = proxy.fetch();
            println!("{}", response.body);
            if response.is_success() {
                Ok(())
            } else {
                Err(SiteError::exit(1, "failed to load thoughts"))
            }
        }
    }
}

fn serve<F>(args: ServeArgs, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = SiteConfig::from_lookup(lookup)?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    let state = SiteState::from_config(&config)?;
    let server = Server::bind(
        ServerConfig {
            bind_addr: config.bind_addr.clone(),
            ..ServerConfig::default()
        },
        state,
    )?;
    server.run()
}
