pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod models;
pub mod processors;
pub mod readers;
pub mod session;
pub mod utils;
pub mod writers;

pub use error::{LocatorError, Result};
pub use locator::{Locator, Render};
pub use readers::{load_combined_data, Dataset};
