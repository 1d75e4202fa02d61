use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use arena::cli::Args;
use arena::config::Config;
use arena::github::GithubClient;
use arena::resolver::{DependencyResolver, FsProbe, Offline, PathProbe, ReleaseLookup};
use arena::{Dependency, TableRenderer};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&args).await
}

async fn run(args: &Args) -> Result<()> {
    if args.dependencies.is_empty() {
        anyhow::bail!("provide at least one dependency");
    }

    let config = Config::load(args.config.as_deref())?;

    let dependencies = if args.offline {
        let resolver = DependencyResolver::new(FsProbe, Offline, &config.shorthand_host);
        resolve_all(&resolver, &args.dependencies).await?
    } else {
        let client = GithubClient::new(&config.api_base_url, config.lookup_timeout());
        let resolver = DependencyResolver::new(FsProbe, client, &config.shorthand_host);
        resolve_all(&resolver, &args.dependencies).await?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dependencies)?);
    } else {
        let renderer = TableRenderer::new(std::io::stdout().is_terminal());
        renderer.render(&dependencies);
    }

    Ok(())
}

async fn resolve_all<P: PathProbe, L: ReleaseLookup>(
    resolver: &DependencyResolver<P, L>,
    arguments: &[String],
) -> Result<Vec<Dependency>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut resolved = Vec::with_capacity(arguments.len());
    let mut failure = None;
    for argument in arguments {
        spinner.set_message(format!("Resolving {argument}"));
        match resolver.resolve(argument).await {
            Ok(dep) => resolved.push(dep),
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }
    spinner.finish_and_clear();

    match failure {
        Some(e) => Err(e).context("Failed to resolve dependencies"),
        None => Ok(resolved),
    }
}
