pub mod output;
pub mod prompter;

pub use output::Console;
pub use prompter::{prompt_error, Choice, DialoguerPrompter, Prompter};
