use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mcpmenu", version)]
#[command(
    about = "Interactive menu for the tools and resources of an MCP server",
    long_about = None
)]
pub struct Args {
    #[arg(
        long = "command",
        value_name = "CMD",
        help = "Command that starts the MCP server (default: node)"
    )]
    pub command: Option<String>,

    #[arg(
        long = "arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        help = "Argument passed to the server command (repeatable, default: build/server.js)"
    )]
    pub args: Vec<String>,

    #[arg(short = 'v', long = "verbose", help = "Log protocol traffic to stderr")]
    pub verbose: bool,

    #[arg(
        long = "coerce-arguments",
        help = "Convert tool arguments to their declared types and validate them before calling"
    )]
    pub coerce_arguments: bool,

    #[arg(
        long = "config-init",
        help = "Write an example .mcpmenu.yaml to the current directory and exit"
    )]
    pub config_init: bool,
}
