//! Command-line front end for the todo service.
//!
//! Stateless adapter over `service::TodoStore`: each subcommand maps to one
//! store operation, prints a one-line confirmation (or a table for `list`)
//! and exits non-zero on any error.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use service::{ServiceError, TodoStore};

pub mod render;

#[derive(Parser, Debug)]
#[command(name = "todo", about = "A simple CLI todo application", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new todo item
    Add {
        /// Title of the todo item
        #[arg(long)]
        title: String,
        /// Description of the todo item
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List all todo items
    List,
    /// Update an existing todo item
    Update {
        /// ID of the todo item to update
        #[arg(long)]
        id: u64,
        /// New title for the todo item
        #[arg(long)]
        title: Option<String>,
        /// New description for the todo item
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a todo item
    Delete {
        /// ID of the todo item to delete
        #[arg(long)]
        id: u64,
    },
    /// Mark a todo item as complete
    Complete {
        /// ID of the todo item to mark complete
        #[arg(long)]
        id: u64,
    },
    /// Mark a todo item as incomplete
    Incomplete {
        /// ID of the todo item to mark incomplete
        #[arg(long)]
        id: u64,
    },
}

/// Execute one command against the store and return the text to print.
pub async fn run_command(
    store: &Arc<TodoStore>,
    command: Commands,
) -> Result<String, ServiceError> {
    match command {
        Commands::Add { title, description } => {
            let item = store.add(&title, &description).await?;
            Ok(format!("Added todo item with ID {}", item.id))
        }
        Commands::List => Ok(render::render_list(&store.list().await)),
        Commands::Update { id, title, description } => {
            let patch = models::TodoPatch { title, description };
            let item = store.update(id, patch).await?;
            Ok(format!("Updated todo item with ID {}", item.id))
        }
        Commands::Delete { id } => {
            store.delete(id).await?;
            Ok(format!("Deleted todo item with ID {}", id))
        }
        Commands::Complete { id } => {
            let item = store.mark_complete(id).await?;
            Ok(format!("Marked todo item with ID {} as complete", item.id))
        }
        Commands::Incomplete { id } => {
            let item = store.mark_incomplete(id).await?;
            Ok(format!("Marked todo item with ID {} as incomplete", item.id))
        }
    }
}

/// Snapshot path from configs with the env fallback, mirroring the server.
fn load_snapshot_path() -> String {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.storage.normalize_from_env();
            cfg.storage.snapshot_path
        }
        Err(_) => std::env::var("TODO_SNAPSHOT_PATH")
            .unwrap_or_else(|_| "data/todos.json".to_string()),
    }
}

/// Open the shared snapshot store and run the parsed command. Errors print
/// `Error: ...` on stderr and yield a failing exit code.
pub async fn run(cli: Cli) -> ExitCode {
    let store = match TodoStore::open(load_snapshot_path()).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_command(&store, cli.command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_prints_confirmation_with_id() {
        let store = TodoStore::in_memory();
        let out = run_command(
            &store,
            Commands::Add { title: "Buy milk".into(), description: "".into() },
        )
        .await
        .unwrap();
        assert_eq!(out, "Added todo item with ID 1");
    }

    #[tokio::test]
    async fn full_command_cycle() {
        let store = TodoStore::in_memory();
        run_command(&store, Commands::Add { title: "task".into(), description: "d".into() })
            .await
            .unwrap();

        let out = run_command(
            &store,
            Commands::Update { id: 1, title: Some("renamed".into()), description: None },
        )
        .await
        .unwrap();
        assert_eq!(out, "Updated todo item with ID 1");

        let out = run_command(&store, Commands::Complete { id: 1 }).await.unwrap();
        assert_eq!(out, "Marked todo item with ID 1 as complete");

        let out = run_command(&store, Commands::Incomplete { id: 1 }).await.unwrap();
        assert_eq!(out, "Marked todo item with ID 1 as incomplete");

        let out = run_command(&store, Commands::Delete { id: 1 }).await.unwrap();
        assert_eq!(out, "Deleted todo item with ID 1");
    }

    #[tokio::test]
    async fn missing_id_surfaces_not_found() {
        let store = TodoStore::in_memory();
        let err = run_command(&store, Commands::Delete { id: 9 }).await.unwrap_err();
        // exact text the binary prints after the "Error: " prefix
        assert_eq!(err.to_string(), "todo item with ID 9 not found");
    }

    #[tokio::test]
    async fn list_on_empty_store() {
        let store = TodoStore::in_memory();
        let out = run_command(&store, Commands::List).await.unwrap();
        assert_eq!(out, "No todo items found.");
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["todo", "add", "--title", "t", "--description", "d"])
            .expect("parse add");
        assert!(matches!(cli.command, Commands::Add { .. }));

        let cli = Cli::try_parse_from(["todo", "update", "--id", "3", "--title", "x"])
            .expect("parse update");
        match cli.command {
            Commands::Update { id, title, description } => {
                assert_eq!(id, 3);
                assert_eq!(title.as_deref(), Some("x"));
                assert!(description.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }

        // --title is required for add
        assert!(Cli::try_parse_from(["todo", "add"]).is_err());
    }
}
