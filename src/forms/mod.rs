pub mod coerce;
pub mod tool;

pub use coerce::{coerce_arguments, coerce_value, validate_arguments};
pub use tool::{collect_arguments, invoke_tool, render_tool_result};
