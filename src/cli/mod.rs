pub mod args;
pub mod handlers;

pub use args::{CliArgs, usage_text, version_text};
pub use handlers::{EXIT_FAILURE, EXIT_SUCCESS, run_cli};
