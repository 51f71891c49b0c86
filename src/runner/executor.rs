use crate::config::actions::Action;
use crate::Result;
use thirtyfour::{By, WebDriver, WebElement};
use tracing::{debug, info};

/// Adds jQuery to the page when it is not already present.
const INJECT_JQUERY_JS: &str = r#"if (!window.jQuery) document.body.innerHTML += '<script src="https://code.jquery.com/jquery-1.12.4.min.js" integrity="sha256-ZosEbRLbNQzLpnKIkEdrPv7lOy9C27hHQ+Xp8a4MxAQ=" crossorigin="anonymous"></script>';"#;

/// Submits the form enclosing the element. The W3C protocol has no submit
/// endpoint, so this goes through script execution.
const SUBMIT_FORM_JS: &str = "arguments[0].closest('form').submit();";

/// Execute a single action against the session.
///
/// Returns `true` when the action ran, `false` when an element-targeted
/// action was skipped because its locator matched no visible element.
/// Any remote-call failure aborts with an error.
pub async fn execute(driver: &WebDriver, action: &Action) -> Result<bool> {
    match action {
        // Session-level actions always run.
        Action::Go(a) => {
            info!("go: {}", a.url);
            driver.goto(&a.url).await?;
        }
        Action::Back => {
            debug!("back");
            driver.back().await?;
        }
        Action::Forward => {
            debug!("forward");
            driver.forward().await?;
        }
        Action::Refresh => {
            debug!("refresh");
            driver.refresh().await?;
        }
        Action::InjectJquery => {
            debug!("inject_jquery");
            driver.execute(INJECT_JQUERY_JS, vec![]).await?;
        }
        Action::LogUrl(a) => {
            let url = driver.current_url().await?;
            info!("{}", a.message.replace("{url}", url.as_str()));
        }
        Action::Screenshot(a) => {
            info!("screenshot: {}", a.path);
            let png = driver.screenshot_as_png().await?;
            std::fs::write(&a.path, png)?;
        }

        // Element-targeted actions act on the first visible match or skip.
        Action::Click(a) => {
            let Some(element) = find_visible(driver, &a.xpath).await? else {
                return skipped(action);
            };
            info!("click: {}", a.xpath);
            element.click().await?;
        }
        Action::SendKeys(a) => {
            let Some(element) = find_visible(driver, &a.xpath).await? else {
                return skipped(action);
            };
            info!("send_keys: {} = '{}'", a.xpath, a.text);
            element.send_keys(&a.text).await?;
        }
        Action::Submit(a) => {
            let Some(element) = find_visible(driver, &a.xpath).await? else {
                return skipped(action);
            };
            info!("submit: {}", a.xpath);
            let args: Vec<serde_json::Value> = vec![element.to_json()?];
            driver.execute(SUBMIT_FORM_JS, args).await?;
        }
        Action::Clear(a) => {
            let Some(element) = find_visible(driver, &a.xpath).await? else {
                return skipped(action);
            };
            debug!("clear: {}", a.xpath);
            element.clear().await?;
        }
        Action::Execute(a) => {
            let Some(element) = find_visible(driver, &a.xpath).await? else {
                return skipped(action);
            };
            debug!("execute: {}...", a.js.chars().take(50).collect::<String>());
            let args: Vec<serde_json::Value> = vec![element.to_json()?];
            driver.execute(&a.js, args).await?;
        }
        Action::ElementScreenshot(a) => {
            let Some(element) = find_visible(driver, &a.xpath).await? else {
                return skipped(action);
            };
            info!("element_screenshot: {} -> {}", a.xpath, a.path);
            let png = element.screenshot_as_png().await?;
            std::fs::write(&a.path, png)?;
        }
    }
    Ok(true)
}

fn skipped(action: &Action) -> Result<bool> {
    debug!(
        "{}: no visible element for '{}', skipping",
        action.name(),
        action.xpath().unwrap_or_default()
    );
    Ok(false)
}

/// First visible match for an XPath locator.
///
/// Elements whose display check itself fails (stale, detached mid-check)
/// count as not visible.
pub async fn find_visible(driver: &WebDriver, xpath: &str) -> Result<Option<WebElement>> {
    let elements = driver.find_all(By::XPath(xpath)).await?;
    for element in elements {
        if element.is_displayed().await.unwrap_or(false) {
            return Ok(Some(element));
        }
    }
    Ok(None)
}
