pub mod config;

pub use config::{MvqConfig, OutputMode, CONFIG_ENV};
