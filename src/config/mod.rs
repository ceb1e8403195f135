pub mod load;
pub mod types;

pub use load::SETTINGS_ENV_VAR;
pub use types::{Settings, UriRuntimeLibraries};
