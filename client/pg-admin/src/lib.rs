//! pg-admin library
//!
//! Screens, navigation and command execution for the `pg-admin` binary.
//! Screens render to any [`std::io::Write`] so they can be exercised in tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod navigator;
pub mod runner;
pub mod screens;

pub use cli::Cli;
pub use commands::Commands;
pub use error::{AppError, Result as AppResult};
pub use navigator::Screen;
pub use screens::ScreenOutcome;

#[cfg(test)]
mod tests;
