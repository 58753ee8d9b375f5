mod defaults;
mod server;
mod validation;

use crate::cli::Args;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use server::{ServerConfig, ServerSection};
pub use validation::{expand_env_var_in_string, expand_env_vars, parse_flag};

use defaults::{
    default_coerce_arguments, default_inherit_stderr, default_server_args,
    default_server_command, default_verbose,
};

pub const ENV_SERVER_COMMAND: &str = "MCPMENU_SERVER_COMMAND";
pub const ENV_SERVER_ARGS: &str = "MCPMENU_SERVER_ARGS";
pub const ENV_VERBOSE: &str = "MCPMENU_VERBOSE";
pub const ENV_COERCE_ARGUMENTS: &str = "MCPMENU_COERCE_ARGUMENTS";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArgumentsConfig {
    /// Coerce typed tool arguments and validate them against the input schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coerce: Option<bool>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub verbose: bool,
    pub coerce_arguments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            verbose: default_verbose(),
            coerce_arguments: default_coerce_arguments(),
        }
    }
}

/// On-disk configuration file (YAML or JSON).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub arguments: ArgumentsConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Self {
        let json_config = match JsonConfig::load() {
            Ok(config) => config,
            Err(e) => {
                use colored::Colorize;
                eprintln!("{} {:#}", "Warning: ignoring config file:".yellow(), e);
                JsonConfig::default()
            }
        };

        Self::resolve(args, &json_config, |key| env::var(key).ok())
    }

    /// Merge the layers: CLI args > environment > config file > defaults.
    pub fn resolve<F>(args: &Args, json_config: &JsonConfig, env_var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_server = &json_config.server;

        // Arguments belong to whichever layer chose the command
        let (command, layer_args) = if let Some(command) = args.command.clone() {
            (command, Vec::new())
        } else if let Some(command) = env_var(ENV_SERVER_COMMAND) {
            (command, Vec::new())
        } else if let Some(command) = file_server.command.clone() {
            (command, file_server.args.clone().unwrap_or_default())
        } else {
            (
                default_server_command(),
                file_server.args.clone().unwrap_or_else(default_server_args),
            )
        };

        let server_args = if !args.args.is_empty() {
            args.args.clone()
        } else if let Some(raw) = env_var(ENV_SERVER_ARGS) {
            raw.split_whitespace().map(str::to_string).collect()
        } else {
            layer_args
        };

        let verbose = args.verbose
            || env_var(ENV_VERBOSE)
                .and_then(|v| parse_flag(&v))
                .or(json_config.session.verbose)
                .unwrap_or_else(default_verbose);

        let coerce_arguments = args.coerce_arguments
            || env_var(ENV_COERCE_ARGUMENTS)
                .and_then(|v| parse_flag(&v))
                .or(json_config.arguments.coerce)
                .unwrap_or_else(default_coerce_arguments);

        Config {
            server: ServerConfig {
                command,
                args: server_args,
                env: file_server.env.clone(),
                inherit_stderr: file_server.inherit_stderr.unwrap_or_else(default_inherit_stderr),
            },
            verbose,
            coerce_arguments,
        }
    }
}

impl JsonConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        // No config file found, return default
        Ok(JsonConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        if matches!(extension, Some("yaml") | Some("yml")) {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))
        }
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // 1. Current directory (local override)
            PathBuf::from(".mcpmenu.yaml"),
            PathBuf::from(".mcpmenu.yml"),
            PathBuf::from(".mcpmenu.json"),
        ];

        // 2. User's config directory
        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("mcpmenu");
            paths.push(config_dir.join("mcpmenu.yaml"));
            paths.push(config_dir.join("mcpmenu.yml"));
            paths.push(config_dir.join("mcpmenu.json"));
        }

        paths
    }

    pub fn example() -> Self {
        let mut env = HashMap::new();
        env.insert("API_TOKEN".to_string(), "${API_TOKEN}".to_string());

        JsonConfig {
            server: ServerSection {
                command: Some(default_server_command()),
                args: Some(default_server_args()),
                env,
                inherit_stderr: Some(default_inherit_stderr()),
            },
            session: SessionConfig {
                verbose: Some(default_verbose()),
            },
            arguments: ArgumentsConfig {
                coerce: Some(default_coerce_arguments()),
            },
        }
    }

    /// Write the example config to `path`, refusing to overwrite.
    pub fn write_example(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        let yaml = serde_yaml::to_string(&Self::example())?;
        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
