pub mod cli;
pub mod config;
pub mod todos;
pub mod tui;

pub use config::Config;
pub use todos::{TodoError, TodoItem, Todos};
