use mcpmenu::cli::Args;
use mcpmenu::config::{
    expand_env_var_in_string, parse_flag, Config, JsonConfig, ServerConfig, ENV_COERCE_ARGUMENTS,
    ENV_SERVER_ARGS, ENV_SERVER_COMMAND, ENV_VERBOSE,
};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults_launch_node_server() {
    let config = Config::resolve(&Args::default(), &JsonConfig::default(), env_from(&[]));

    assert_eq!(config, Config::default());
    assert_eq!(config.server.command, "node");
    assert_eq!(config.server.args, vec!["build/server.js"]);
    assert!(!config.server.inherit_stderr);
    assert!(!config.verbose);
    assert!(!config.coerce_arguments);
}

#[test]
fn test_file_config_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mcpmenu.yaml");
    fs::write(
        &path,
        "server:\n  command: python3\n  args: [server.py, --stdio]\n  inherit_stderr: true\nsession:\n  verbose: true\narguments:\n  coerce: true\n",
    )
    .unwrap();

    let json_config = JsonConfig::load_from(&path).unwrap();
    let config = Config::resolve(&Args::default(), &json_config, env_from(&[]));

    assert_eq!(config.server.command, "python3");
    assert_eq!(config.server.args, vec!["server.py", "--stdio"]);
    assert!(config.server.inherit_stderr);
    assert!(config.verbose);
    assert!(config.coerce_arguments);
}

#[test]
fn test_json_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mcpmenu.json");
    fs::write(&path, r#"{"server": {"args": ["dist/index.js"]}}"#).unwrap();

    let json_config = JsonConfig::load_from(&path).unwrap();
    let config = Config::resolve(&Args::default(), &json_config, env_from(&[]));

    // Default command with file-provided args
    assert_eq!(config.server.command, "node");
    assert_eq!(config.server.args, vec!["dist/index.js"]);
}

#[test]
fn test_broken_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mcpmenu.json");
    fs::write(&path, "{ not json").unwrap();

    let err = JsonConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse JSON config file"));
}

#[test]
fn test_env_overrides_file() {
    let json_config: JsonConfig = serde_yaml::from_str(
        "server:\n  command: python3\n  args: [server.py]\nsession:\n  verbose: false\n",
    )
    .unwrap();
    let env = env_from(&[
        (ENV_SERVER_COMMAND, "deno"),
        (ENV_VERBOSE, "yes"),
        (ENV_COERCE_ARGUMENTS, "1"),
    ]);

    let config = Config::resolve(&Args::default(), &json_config, env);

    // File args belong to the file's command, so they are dropped
    assert_eq!(config.server.command, "deno");
    assert!(config.server.args.is_empty());
    assert!(config.verbose);
    assert!(config.coerce_arguments);
}

#[test]
fn test_env_server_args_split_on_whitespace() {
    let env = env_from(&[
        (ENV_SERVER_COMMAND, "deno"),
        (ENV_SERVER_ARGS, "run  --allow-read main.ts"),
    ]);

    let config = Config::resolve(&Args::default(), &JsonConfig::default(), env);

    assert_eq!(config.server.args, vec!["run", "--allow-read", "main.ts"]);
}

#[test]
fn test_cli_overrides_env() {
    let args = Args {
        command: Some("uvx".to_string()),
        args: vec!["weather-server".to_string()],
        verbose: true,
        ..Default::default()
    };
    let env = env_from(&[
        (ENV_SERVER_COMMAND, "deno"),
        (ENV_SERVER_ARGS, "main.ts"),
        (ENV_VERBOSE, "false"),
    ]);

    let config = Config::resolve(&args, &JsonConfig::default(), env);

    assert_eq!(
        config.server,
        ServerConfig {
            command: "uvx".to_string(),
            args: vec!["weather-server".to_string()],
            env: HashMap::new(),
            inherit_stderr: false,
        }
    );
    assert!(config.verbose);
}

#[test]
fn test_parse_flag() {
    assert_eq!(parse_flag("TRUE"), Some(true));
    assert_eq!(parse_flag(" on "), Some(true));
    assert_eq!(parse_flag("0"), Some(false));
    assert_eq!(parse_flag("perhaps"), None);
}

#[test]
fn test_expand_env_var_leaves_unknown_untouched() {
    assert_eq!(
        expand_env_var_in_string("${MCPMENU_TEST_SURELY_UNSET_VAR}"),
        "${MCPMENU_TEST_SURELY_UNSET_VAR}"
    );
}

#[test]
fn test_write_example_refuses_to_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".mcpmenu.yaml");

    JsonConfig::write_example(&path).unwrap();
    let written = JsonConfig::load_from(&path).unwrap();
    assert_eq!(written.server.command.as_deref(), Some("node"));
    assert_eq!(
        written.server.env.get("API_TOKEN").map(String::as_str),
        Some("${API_TOKEN}")
    );

    assert!(JsonConfig::write_example(&path).is_err());
}
