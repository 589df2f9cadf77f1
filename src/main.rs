use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use spanav::config::Config;
use spanav::logging::init_tracing;
use spanav::routes::DEFAULT_ROUTE;
use spanav::{serve, Session, Step};

#[derive(Parser)]
#[command(name = "spanav", version, about = "Headless SPA navigation runner")]
struct Cli {
    /// Config file (default: ~/.config/spanav/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Boot a headless session and replay steps against it.
    Visit {
        /// Site base URL, overriding the config.
        #[arg(long)]
        base_url: Option<String>,
        /// Location the session starts at.
        #[arg(long, default_value = DEFAULT_ROUTE)]
        start: String,
        /// Disable animated transitions.
        #[arg(long)]
        immediate: bool,
        /// Steps: click:<path>, hover:<path>, back, forward, wait:<ms>.
        steps: Vec<Step>,
    },
    /// Serve page content from a directory.
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Print the route table.
    Routes,
}

/// Applies `visit` flags on top of the loaded config and re-validates it.
fn apply_visit_overrides(
    config: &mut Config,
    base_url: Option<String>,
    immediate: bool,
) -> anyhow::Result<()> {
    if let Some(base_url) = base_url {
        config.site.base_url = base_url;
    }
    if immediate {
        config.transitions.animated = false;
    }
    config.validate().context("validating --base-url override")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    match cli.command {
        Command::Visit {
            base_url,
            start,
            immediate,
            steps,
        } => {
            apply_visit_overrides(&mut config, base_url, immediate)?;

            let session = Session::from_config(&config, &start)?;
            session.boot().await.context("initial page load")?;

            let mut failure = None;
            for step in &steps {
                if let Err(err) = session.run(step).await {
                    failure = Some(anyhow::Error::new(err).context(format!("step {:?}", step)));
                    break;
                }
            }

            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            if let Some(err) = failure {
                return Err(err);
            }
        }
        Command::Serve { bind, root } => {
            let bind = bind.unwrap_or(config.serve.bind_addr);
            let root = root.unwrap_or(config.serve.root);
            serve::run(&bind, root, async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("shutting down");
            })
            .await?;
        }
        Command::Routes => {
            let table = config.route_table()?;
            for route in table.routes() {
                println!("{}\t{}\t{}", route.key, route.content_location, route.theme);
            }
        }
    }

    Ok(())
}
