//! Terminal front end for the todo widget.
//!
//! Every stdin line is one interaction; the widget is re-rendered to stdout
//! after each line that changed the store. Logs go to stderr.

use anyhow::Context;
use todo_widget::config::WidgetConfig;
use todo_widget::{new_store, terminal};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WidgetConfig::from_env().context("loading widget configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(commit_key = %config.commit_key, "Starting todo widget");

    let store = new_store(&config);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    terminal::run(&store, config.commit_key, stdin, &mut stdout)
        .await
        .context("running terminal session")?;

    store.shutdown();
    tracing::info!("Todo widget closed");
    Ok(())
}
