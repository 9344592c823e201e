pub mod args;
pub mod commands;
pub mod interactive;

pub use args::{Cli, Commands, OutputFormat};
pub use commands::run;
pub use interactive::InteractiveSession;
