//! Command implementations.

pub mod analyze;
pub mod config;
pub mod prompt;
pub mod summarize;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::prompt::execute_prompt;
pub use self::summarize::execute_summarize;
