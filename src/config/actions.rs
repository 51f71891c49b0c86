use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One step of a script.
///
/// Element-targeted actions carry an XPath locator and act on the first
/// visible match; session-level actions talk to the browser window itself.
#[derive(Debug, Clone)]
pub enum Action {
    // Element-targeted
    Click(ClickAction),
    SendKeys(SendKeysAction),
    Submit(SubmitAction),
    Clear(ClearAction),
    Execute(ExecuteAction),
    ElementScreenshot(ElementScreenshotAction),

    // Session-level
    Go(GoAction),
    Back,
    Forward,
    Refresh,
    InjectJquery,
    LogUrl(LogUrlAction),
    Screenshot(ScreenshotAction),
}

impl Action {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click(_) => "click",
            Self::SendKeys(_) => "send_keys",
            Self::Submit(_) => "submit",
            Self::Clear(_) => "clear",
            Self::Execute(_) => "execute",
            Self::ElementScreenshot(_) => "element_screenshot",
            Self::Go(_) => "go",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Refresh => "refresh",
            Self::InjectJquery => "inject_jquery",
            Self::LogUrl(_) => "log_url",
            Self::Screenshot(_) => "screenshot",
        }
    }

    /// XPath locator for element-targeted actions, `None` for session-level ones.
    pub fn xpath(&self) -> Option<&str> {
        match self {
            Self::Click(a) => Some(&a.xpath),
            Self::SendKeys(a) => Some(&a.xpath),
            Self::Submit(a) => Some(&a.xpath),
            Self::Clear(a) => Some(&a.xpath),
            Self::Execute(a) => Some(&a.xpath),
            Self::ElementScreenshot(a) => Some(&a.xpath),
            _ => None,
        }
    }
}

const ACTION_NAMES: &[&str] = &[
    "click",
    "send_keys",
    "submit",
    "clear",
    "execute",
    "element_screenshot",
    "go",
    "back",
    "forward",
    "refresh",
    "inject_jquery",
    "log_url",
    "screenshot",
];

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ActionVisitor)
    }
}

struct ActionVisitor;

impl<'de> Visitor<'de> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an action (string for unit variants, or map with single key)")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match value {
            "back" => Ok(Action::Back),
            "forward" => Ok(Action::Forward),
            "refresh" => Ok(Action::Refresh),
            "inject_jquery" => Ok(Action::InjectJquery),
            "log_url" => Ok(Action::LogUrl(LogUrlAction::default())),
            other => Err(de::Error::unknown_variant(
                other,
                &["back", "forward", "refresh", "inject_jquery", "log_url"],
            )),
        }
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let key: String = map
            .next_key()?
            .ok_or_else(|| de::Error::custom("expected action type key"))?;

        let action = match key.as_str() {
            "click" => Action::Click(map.next_value()?),
            "send_keys" => Action::SendKeys(map.next_value()?),
            "submit" => Action::Submit(map.next_value()?),
            "clear" => Action::Clear(map.next_value()?),
            "execute" => Action::Execute(map.next_value()?),
            "element_screenshot" => Action::ElementScreenshot(map.next_value()?),
            "go" => Action::Go(map.next_value()?),
            "back" => {
                let _: serde_yaml::Value = map.next_value()?;
                Action::Back
            }
            "forward" => {
                let _: serde_yaml::Value = map.next_value()?;
                Action::Forward
            }
            "refresh" => {
                let _: serde_yaml::Value = map.next_value()?;
                Action::Refresh
            }
            "inject_jquery" => {
                let _: serde_yaml::Value = map.next_value()?;
                Action::InjectJquery
            }
            "log_url" => Action::LogUrl(map.next_value()?),
            "screenshot" => Action::Screenshot(map.next_value()?),
            other => return Err(de::Error::unknown_variant(other, ACTION_NAMES)),
        };

        Ok(action)
    }
}

// --- Action payloads ---

#[derive(Debug, Clone, Deserialize)]
pub struct ClickAction {
    pub xpath: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendKeysAction {
    pub xpath: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAction {
    pub xpath: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClearAction {
    pub xpath: String,
}

/// Run a script snippet with the resolved element bound to `arguments[0]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteAction {
    pub xpath: String,
    pub js: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementScreenshotAction {
    pub xpath: String,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoAction {
    pub url: String,
}

fn default_log_url_message() -> String {
    "current url: {url}".into()
}

/// Log the current URL. The message may reference it as `{url}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogUrlAction {
    #[serde(default = "default_log_url_message")]
    pub message: String,
}

impl Default for LogUrlAction {
    fn default() -> Self {
        Self {
            message: default_log_url_message(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenshotAction {
    pub path: String,
}
