pub fn default_server_command() -> String {
    "node".to_string()
}

pub fn default_server_args() -> Vec<String> {
    vec!["build/server.js".to_string()]
}

pub fn default_inherit_stderr() -> bool {
    false // The server's stderr would interleave with the menu
}

pub fn default_verbose() -> bool {
    false
}

pub fn default_coerce_arguments() -> bool {
    false // Values go to the server as typed unless coercion is asked for
}
