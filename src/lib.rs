//! # webbot
//!
//! Scripted WebDriver automation. Define browser actions in YAML, replay
//! them against a live session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use webbot::Script;
//!
//! # #[tokio::main]
//! # async fn main() -> webbot::Result<()> {
//! let script = Script::load("automation.yaml")?;
//! let report = webbot::run(&script).await?;
//! println!("Executed: {}", report.actions_executed);
//! # Ok(())
//! # }
//! ```

mod config;
mod runner;

pub use config::{Action, BrowserConfig, ParamDef, Params, Script, TargetUrl, WindowSize};
pub use runner::{run, Bot, DriverService, RunReport};

/// Result type for webbot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during script loading or execution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("driver service error: {0}")]
    Driver(String),
}
