//! Terminal session loop.
//!
//! Reads one interaction per line and writes a fresh screen after every
//! line that dispatched actions, before the next line is read. The last
//! screen written therefore always matches the store.

use crate::input::{Command, USAGE};
use crate::types::Key;
use crate::view::TodoView;
use crate::TodoStore;
use thiserror::Error;
use todo_widget_runtime::StoreError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Errors that end a terminal session
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Reading input or writing a screen failed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store refused an action
    #[error("Store rejected an action: {0}")]
    Store(#[from] StoreError),
}

/// Drive `store` from `input` until end of input or `:quit`
///
/// Screens and usage hints go to `output`.
///
/// # Errors
///
/// Returns [`TerminalError`] if I/O fails or the store rejects an action.
pub async fn run<R, W>(
    store: &TodoStore,
    commit_key: Key,
    input: R,
    output: &mut W,
) -> Result<(), TerminalError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    render(store, output).await?;
    let mut rendered = store.revision();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = Command::parse(&line, commit_key);
        tracing::debug!(?command, "Parsed input");

        match command {
            Command::Quit => break,
            Command::Unknown(_) => {
                output.write_all(format!("{USAGE}\n").as_bytes()).await?;
            },
            command => {
                let actions = store.state(|state| command.into_actions(state)).await;
                for action in actions {
                    store.send(action).await?;
                }
            },
        }

        let revision = store.revision();
        if revision != rendered {
            render(store, output).await?;
            rendered = revision;
        }
    }

    output.flush().await?;
    Ok(())
}

async fn render<W>(store: &TodoStore, output: &mut W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let view = store.state(TodoView::render).await;
    output.write_all(format!("{view}\n").as_bytes()).await?;
    output.flush().await
}
