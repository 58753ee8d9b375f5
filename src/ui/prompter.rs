use async_trait::async_trait;
use colored::Colorize;
use crossterm::{cursor, execute};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::error::{McpMenuError, Result};

/// One entry of a selection list. `value` is what the caller gets back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Interactive input source for the menu.
#[async_trait]
pub trait Prompter: Send {
    /// Ask the user to pick one of `choices`; returns the chosen `value`.
    async fn select(&mut self, message: &str, choices: &[Choice]) -> Result<String>;

    /// Ask for one line of free text.
    async fn input(&mut self, message: &str) -> Result<String>;
}

/// Terminal prompts rendered with dialoguer on a blocking thread.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn render_choice(choice: &Choice) -> String {
    match choice.description.as_deref() {
        Some(description) if !description.is_empty() => {
            format!("{}  {}", choice.label, description.dimmed())
        }
        _ => choice.label.clone(),
    }
}

/// Map a dialoguer failure onto the crate error; Ctrl-C becomes `Interrupted`.
pub fn prompt_error(err: dialoguer::Error) -> McpMenuError {
    match err {
        dialoguer::Error::IO(e) => McpMenuError::from(e),
    }
}

// dialoguer hides the cursor while a prompt is open and skips showing it again
// when the read is interrupted.
fn finish<T>(outcome: dialoguer::Result<T>) -> Result<T> {
    outcome.map_err(|e| {
        let err = prompt_error(e);
        if matches!(err, McpMenuError::Interrupted) {
            execute!(std::io::stderr(), cursor::Show).ok();
        }
        err
    })
}

#[async_trait]
impl Prompter for DialoguerPrompter {
    async fn select(&mut self, message: &str, choices: &[Choice]) -> Result<String> {
        if choices.is_empty() {
            return Err(McpMenuError::Prompt(format!(
                "no choices available for '{}'",
                message
            )));
        }

        let message = message.to_string();
        let items: Vec<String> = choices.iter().map(render_choice).collect();

        let index = tokio::task::spawn_blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .items(&items)
                .default(0)
                .interact()
        })
        .await
        .map_err(|e| McpMenuError::Prompt(e.to_string()))
        .and_then(finish)?;

        choices
            .get(index)
            .map(|choice| choice.value.clone())
            .ok_or_else(|| McpMenuError::Prompt(format!("selection {} out of range", index)))
    }

    async fn input(&mut self, message: &str) -> Result<String> {
        let message = message.to_string();

        tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .allow_empty(true)
                .interact_text()
        })
        .await
        .map_err(|e| McpMenuError::Prompt(e.to_string()))
        .and_then(finish)
    }
}
