pub mod actions;
pub mod params;

pub use actions::Action;
pub use params::{ParamDef, Params};

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Top-level script structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Name of this script.
    pub name: String,

    /// Parameter definitions (optional).
    #[serde(default)]
    pub params: HashMap<String, ParamDef>,

    /// Browser and driver configuration.
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Destination URL, navigated to before the first action.
    pub target: TargetUrl,

    /// Ordered list of actions to replay.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Script {
    /// Load a script from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse_with_params(&content, &Params::new())
    }

    /// Load a script from a YAML file with parameters.
    pub fn load_with_params<P: AsRef<Path>>(path: P, params: &Params) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse_with_params(&content, params)
    }

    /// Parse a script from a YAML string (no params).
    pub fn parse(yaml: &str) -> Result<Self> {
        Self::parse_with_params(yaml, &Params::new())
    }

    /// Parse a script from a YAML string with parameter substitution.
    pub fn parse_with_params(yaml: &str, params: &Params) -> Result<Self> {
        // First pass: parse as Value to extract param definitions
        let mut value: serde_yaml::Value = serde_yaml::from_str(yaml)?;

        let defs: HashMap<String, ParamDef> = value
            .get("params")
            .and_then(|v| serde_yaml::from_value(v.clone()).ok())
            .unwrap_or_default();

        // Substitute variables in the entire document
        params::substitute_value(&mut value, params, &defs)?;

        let script: Script = serde_yaml::from_value(value)?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Config("name is required".into()));
        }
        if self.target.url.is_empty() {
            return Err(Error::Config("target.url is required".into()));
        }
        if self.browser.port == 0 {
            return Err(Error::Config("browser.port must be nonzero".into()));
        }
        if self.browser.window.width == 0 || self.browser.window.height == 0 {
            return Err(Error::Config(
                "browser.window dimensions must be nonzero".into(),
            ));
        }
        Ok(())
    }
}

fn default_driver() -> String {
    "/usr/local/bin/chromedriver".into()
}

fn default_port() -> u16 {
    9515
}

fn default_action_interval_ms() -> u64 {
    1000
}

/// Browser and driver-service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Path to the chromedriver binary.
    pub driver: String,

    /// Port the driver service listens on.
    pub port: u16,

    /// Run the browser in headless mode.
    pub headless: bool,

    /// Pass driver diagnostics through to stderr.
    pub debug: bool,

    /// Window size applied after the session opens.
    pub window: WindowSize,

    /// Pause between actions, in milliseconds.
    pub action_interval_ms: u64,
}

impl BrowserConfig {
    /// The pause inserted after navigation and each executed action.
    pub fn action_interval(&self) -> Duration {
        Duration::from_millis(self.action_interval_ms)
    }

    /// Address of the driver service.
    pub fn server_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            port: default_port(),
            headless: false,
            debug: false,
            window: WindowSize::default(),
            action_interval_ms: default_action_interval_ms(),
        }
    }
}

/// Browser window dimensions.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 2700,
        }
    }
}

/// Destination URL configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetUrl {
    /// URL to navigate to.
    pub url: String,
}
