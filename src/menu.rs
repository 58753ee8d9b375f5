use std::future::Future;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::{McpMenuError, Result};
use crate::forms::{invoke_tool, render_tool_result};
use crate::mcp::Peer;
use crate::resolver::read_resource;
use crate::ui::{Choice, Console, Prompter};

/// Top-level actions, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Query,
    Tools,
    Resources,
    Prompts,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::Query,
        MenuAction::Tools,
        MenuAction::Resources,
        MenuAction::Prompts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Query => "Query",
            MenuAction::Tools => "Tools",
            MenuAction::Resources => "Resources",
            MenuAction::Prompts => "Prompts",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.label() == label)
    }
}

/// The loop has a single state; every completed action returns to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    AwaitingChoice,
}

pub struct MenuLoop<'a, P: Peer + ?Sized, U: Prompter> {
    peer: &'a P,
    prompter: U,
    catalog: Catalog,
    console: Console,
    coerce_arguments: bool,
    state: MenuState,
}

impl<'a, P: Peer + ?Sized, U: Prompter> MenuLoop<'a, P, U> {
    pub fn new(peer: &'a P, prompter: U, catalog: Catalog, console: Console) -> Self {
        Self {
            peer,
            prompter,
            catalog,
            console,
            coerce_arguments: false,
            state: MenuState::AwaitingChoice,
        }
    }

    pub fn with_coerce_arguments(mut self, coerce: bool) -> Self {
        self.coerce_arguments = coerce;
        self
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Loop until Ctrl-C or until the user interrupts a prompt.
    pub async fn run(&mut self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Loop until `cancel` resolves. An action in flight is abandoned.
    pub async fn run_until<F>(&mut self, cancel: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(cancel);
        loop {
            tokio::select! {
                _ = &mut cancel => {
                    debug!("menu cancelled");
                    return Ok(());
                }
                step = self.step() => match step {
                    Ok(MenuState::AwaitingChoice) => continue,
                    Err(McpMenuError::Interrupted) => return Ok(()),
                    Err(e) => return Err(e),
                },
            }
        }
    }

    /// Offer the top-level choice once and carry out the picked action.
    pub async fn step(&mut self) -> Result<MenuState> {
        let choices: Vec<Choice> = MenuAction::ALL
            .iter()
            .map(|action| Choice::new(action.label(), action.label()))
            .collect();

        let picked = self
            .prompter
            .select("What would you like to do?", &choices)
            .await?;
        debug!(action = %picked, "menu choice");

        match MenuAction::from_label(&picked) {
            // Query has no behavior yet
            Some(MenuAction::Query) | None => {}
            Some(MenuAction::Tools) => self.tools().await?,
            Some(MenuAction::Resources) => self.resources().await?,
            Some(MenuAction::Prompts) => self.console.prompts(&self.catalog.prompts)?,
        }

        Ok(self.state)
    }

    async fn tools(&mut self) -> Result<()> {
        if self.catalog.tools.is_empty() {
            self.console.notice("No tools available.")?;
            return Ok(());
        }

        let choices: Vec<Choice> = self
            .catalog
            .tools
            .iter()
            .map(|tool| {
                Choice::new(tool.display_name(), &tool.name)
                    .with_description(tool.description.clone())
            })
            .collect();

        let tool_name = self.prompter.select("Select a tool", &choices).await?;

        let Some(tool) = self.catalog.find_tool(&tool_name) else {
            self.console.error("Tool not found.")?;
            return Ok(());
        };

        match invoke_tool(self.peer, &mut self.prompter, tool, self.coerce_arguments).await {
            Ok(result) => {
                let text = render_tool_result(&result)?;
                self.console.tool_text(&text, result.is_error.unwrap_or(false))?;
            }
            Err(e) if e.is_recoverable() => self.console.error(&e.to_string())?,
            Err(e) => return Err(e),
        }

        Ok(())
    }

    async fn resources(&mut self) -> Result<()> {
        let resources = self.catalog.resources.iter().map(|resource| {
            Choice::new(&resource.name, &resource.uri)
                .with_description(resource.description.clone())
        });
        let templates = self.catalog.resource_templates.iter().map(|template| {
            Choice::new(&template.name, &template.uri_template)
                .with_description(template.description.clone())
        });
        let choices: Vec<Choice> = resources.chain(templates).collect();

        if choices.is_empty() {
            self.console.notice("No resources available.")?;
            return Ok(());
        }

        let resource_uri = self.prompter.select("Select a resource", &choices).await?;

        let Some(uri) = self
            .catalog
            .find_resource_uri(&resource_uri)
            .map(str::to_string)
        else {
            self.console.error("Resource not found.")?;
            return Ok(());
        };

        let pretty = read_resource(self.peer, &mut self.prompter, &uri).await?;
        self.console.json(&pretty)?;
        Ok(())
    }
}
