use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::todos::Todos;
use crate::tui::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON config file with the seed items
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Start with an empty list instead of the seed items
    #[arg(long, global = true)]
    pub empty: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Launch the interactive TUI (default)
    Tui,

    /// Print the starting todo list and exit
    List,
}

pub async fn load_config(path: Option<&Path>, empty: bool) -> Result<Config> {
    let mut config = Config::load(path).await?;
    if empty {
        config.seed_items.clear();
    }
    Ok(config)
}

pub fn format_list(todos: &Todos) -> String {
    if todos.is_empty() {
        return "No todos".to_string();
    }

    todos
        .todos()
        .iter()
        .enumerate()
        .map(|(index, todo)| {
            let mark = if todo.is_completed { "x" } else { " " };
            format!("{index:>3}. [{mark}] {}", todo.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle_list(config: Config) -> Result<()> {
    let todos = Todos::new(config.seed_items);
    println!("{}", format_list(&todos));
    Ok(())
}

pub async fn handle_tui(config: Config) -> Result<()> {
    crate::tui::run_tui(AppState::new(&config)).map_err(|e| anyhow::anyhow!("TUI error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todos::TodoItem;
    use tempfile::TempDir;

    #[test]
    fn test_parse_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["todolist"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.empty);
    }

    #[test]
    fn test_parse_list_with_flags() {
        let cli =
            Cli::try_parse_from(["todolist", "list", "--empty", "--config", "todos.json"]).unwrap();
        assert_eq!(cli.command, Some(Commands::List));
        assert!(cli.empty);
        assert_eq!(cli.config, Some(PathBuf::from("todos.json")));
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["todolist", "sync"]).is_err());
    }

    #[test]
    fn test_format_list() {
        let mut todos = Todos::default();
        todos.complete_todo(1).unwrap();

        assert_eq!(
            format_list(&todos),
            "  0. [ ] Todo 1\n  1. [x] Todo 2\n  2. [ ] Todo 3"
        );
        assert_eq!(format_list(&Todos::empty()), "No todos");
    }

    #[tokio::test]
    async fn test_load_config_empty_flag() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"seedItems": [{"text": "seeded"}]}"#).unwrap();

        let config = load_config(Some(&path), false).await.unwrap();
        assert_eq!(config.seed_items, vec![TodoItem::new("seeded")]);

        let config = load_config(Some(&path), true).await.unwrap();
        assert!(config.seed_items.is_empty());
    }
}
