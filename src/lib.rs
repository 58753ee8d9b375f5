pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod mcp;
pub mod menu;
pub mod resolver;
pub mod ui;

pub use catalog::Catalog;
pub use error::{McpMenuError, Result};
pub use menu::{MenuAction, MenuLoop, MenuState};
