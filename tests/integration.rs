//! Integration tests for webbot
//!
//! These tests require chromedriver (and Chrome) to be installed.
//! Run with: cargo test --test integration -- --ignored

use webbot::{Bot, BrowserConfig, Script, WindowSize};

/// Locate a chromedriver binary, or None if unavailable.
fn find_chromedriver() -> Option<String> {
    let output = std::process::Command::new("which")
        .arg("chromedriver")
        .output()
        .ok()?;
    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Some(path);
        }
    }
    let default = "/usr/local/bin/chromedriver";
    std::path::Path::new(default)
        .exists()
        .then(|| default.to_string())
}

fn test_browser(driver: String, port: u16) -> BrowserConfig {
    BrowserConfig {
        driver,
        port,
        headless: true,
        debug: false,
        window: WindowSize {
            width: 1280,
            height: 800,
        },
        action_interval_ms: 50,
    }
}

/// Write a fixture page and return its file:// URL plus the tempdir keeping
/// it alive.
fn fixture_page(html: &str) -> (String, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("page.html");
    std::fs::write(&path, html).expect("Failed to write fixture page");
    (format!("file://{}", path.display()), dir)
}

#[tokio::test]
#[ignore = "requires chromedriver"]
async fn test_click_and_screenshot() {
    let Some(driver) = find_chromedriver() else {
        eprintln!("chromedriver not found, skipping test");
        return;
    };

    let (url, dir) = fixture_page(
        r#"<html><body>
        <button id="btn" onclick="document.title = 'clicked'">Click Me</button>
        </body></html>"#,
    );
    let shot = dir.path().join("shot.png");

    let yaml = format!(
        r#"
name: "Click"
target:
  url: "{url}"
actions:
  - click:
      xpath: "//button[@id='btn']"
  - screenshot:
      path: "{}"
"#,
        shot.display()
    );
    let script = Script::parse(&yaml).expect("Failed to parse script");

    let bot = Bot::launch(&test_browser(driver, 9521))
        .await
        .expect("Failed to launch bot");
    let report = bot
        .run(&script.target.url, &script.actions)
        .await
        .expect("Run failed");

    assert_eq!(report.actions_executed, 2);
    assert_eq!(report.actions_skipped, 0);
    assert!(shot.exists(), "screenshot not written");

    let title = bot.driver().title().await.expect("Failed to read title");
    assert_eq!(title, "clicked");

    bot.close().await.expect("Failed to close bot");
}

#[tokio::test]
#[ignore = "requires chromedriver"]
async fn test_send_keys_and_clear() {
    let Some(driver) = find_chromedriver() else {
        eprintln!("chromedriver not found, skipping test");
        return;
    };

    let (url, _dir) = fixture_page(
        r#"<html><body>
        <input id="q" type="text">
        </body></html>"#,
    );

    let yaml = format!(
        r#"
name: "Input"
target:
  url: "{url}"
actions:
  - send_keys:
      xpath: "//input[@id='q']"
      text: "hello"
  - execute:
      xpath: "//input[@id='q']"
      js: "document.title = arguments[0].value"
  - clear:
      xpath: "//input[@id='q']"
"#
    );
    let script = Script::parse(&yaml).expect("Failed to parse script");

    let bot = Bot::launch(&test_browser(driver, 9522))
        .await
        .expect("Failed to launch bot");
    let report = bot
        .run(&script.target.url, &script.actions)
        .await
        .expect("Run failed");

    assert_eq!(report.actions_executed, 3);

    // The execute step copied the typed value into the title before clear.
    let title = bot.driver().title().await.expect("Failed to read title");
    assert_eq!(title, "hello");

    bot.close().await.expect("Failed to close bot");
}

#[tokio::test]
#[ignore = "requires chromedriver"]
async fn test_skips_invisible_and_missing_elements() {
    let Some(driver) = find_chromedriver() else {
        eprintln!("chromedriver not found, skipping test");
        return;
    };

    let (url, _dir) = fixture_page(
        r#"<html><body>
        <button id="hidden" style="display: none"
                onclick="document.title = 'oops'">Hidden</button>
        </body></html>"#,
    );

    let yaml = format!(
        r#"
name: "Skip"
target:
  url: "{url}"
actions:
  - click:
      xpath: "//button[@id='hidden']"
  - click:
      xpath: "//button[@id='nonexistent']"
  - log_url
"#
    );
    let script = Script::parse(&yaml).expect("Failed to parse script");

    let bot = Bot::launch(&test_browser(driver, 9523))
        .await
        .expect("Failed to launch bot");
    let report = bot
        .run(&script.target.url, &script.actions)
        .await
        .expect("Run failed");

    // Both clicks skip (one invisible, one absent); only log_url runs.
    assert_eq!(report.actions_executed, 1);
    assert_eq!(report.actions_skipped, 2);

    let title = bot.driver().title().await.expect("Failed to read title");
    assert_ne!(title, "oops");

    bot.close().await.expect("Failed to close bot");
}

#[tokio::test]
#[ignore = "requires chromedriver"]
async fn test_history_navigation() {
    let Some(driver) = find_chromedriver() else {
        eprintln!("chromedriver not found, skipping test");
        return;
    };

    let (first, _dir1) = fixture_page("<html><title>first</title><body>one</body></html>");
    let (second, _dir2) = fixture_page("<html><title>second</title><body>two</body></html>");

    let yaml = format!(
        r#"
name: "History"
target:
  url: "{first}"
actions:
  - go:
      url: "{second}"
  - back
  - forward
"#
    );
    let script = Script::parse(&yaml).expect("Failed to parse script");

    let bot = Bot::launch(&test_browser(driver, 9524))
        .await
        .expect("Failed to launch bot");
    let report = bot
        .run(&script.target.url, &script.actions)
        .await
        .expect("Run failed");

    assert_eq!(report.actions_executed, 3);

    let title = bot.driver().title().await.expect("Failed to read title");
    assert_eq!(title, "second");

    bot.close().await.expect("Failed to close bot");
}
