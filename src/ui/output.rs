use colored::*;
use std::io::{self, Write};

use crate::mcp::types::McpPrompt;

type Sink = Box<dyn Write + Send>;

/// Where the menu writes results (`out`) and complaints (`err`).
pub struct Console {
    out: Sink,
    err: Sink,
}

impl Console {
    pub fn new(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
        }
    }

    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    pub fn connected(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "You are connected".green())?;
        self.out.flush()
    }

    /// Recoverable problem: one line on stderr, then back to the menu.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "{}", message.red())?;
        self.err.flush()
    }

    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message.dimmed())?;
        self.out.flush()
    }

    /// Tool output is printed verbatim; only error results get colored.
    pub fn tool_text(&mut self, text: &str, is_error: bool) -> io::Result<()> {
        if is_error {
            writeln!(self.out, "{}", text.red())?;
        } else {
            writeln!(self.out, "{}", text)?;
        }
        self.out.flush()
    }

    pub fn json(&mut self, pretty: &str) -> io::Result<()> {
        writeln!(self.out, "{}", pretty)?;
        self.out.flush()
    }

    pub fn prompts(&mut self, prompts: &[McpPrompt]) -> io::Result<()> {
        if prompts.is_empty() {
            return self.notice("No prompts available.");
        }

        for prompt in prompts {
            match prompt.description.as_deref() {
                Some(description) => {
                    writeln!(self.out, "{}  {}", prompt.name.cyan(), description.dimmed())?
                }
                None => writeln!(self.out, "{}", prompt.name.cyan())?,
            }
            for argument in &prompt.arguments {
                let marker = if argument.required { "*" } else { "" };
                writeln!(
                    self.out,
                    "    {}{}{}",
                    argument.name,
                    marker,
                    argument
                        .description
                        .as_deref()
                        .map(|d| format!(" - {}", d))
                        .unwrap_or_default()
                        .dimmed()
                )?;
            }
        }
        self.out.flush()
    }
}
