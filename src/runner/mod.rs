mod executor;
mod service;

pub use service::DriverService;

use crate::config::{Action, BrowserConfig, Script};
use crate::Result;
use std::time::{Duration, Instant};
use thirtyfour::{ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tracing::{debug, info};

/// What happened during a run.
#[derive(Debug)]
pub struct RunReport {
    /// Number of actions that ran.
    pub actions_executed: usize,
    /// Number of element-targeted actions skipped for lack of a visible match.
    pub actions_skipped: usize,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

/// A live automation session: a driver service plus the WebDriver session
/// opened against it.
pub struct Bot {
    driver: WebDriver,
    service: DriverService,
    interval: Duration,
}

impl Bot {
    /// Start the driver service and open a session against it.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let service = DriverService::start(config).await?;

        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()?;
        }

        debug!("connecting to driver at {}", service.url());
        let driver = match WebDriver::new(&service.url(), caps).await {
            Ok(driver) => driver,
            Err(e) => {
                let _ = service.stop().await;
                return Err(e.into());
            }
        };

        let window = config.window;
        if let Err(e) = driver
            .set_window_rect(0, 0, window.width, window.height)
            .await
        {
            let _ = driver.quit().await;
            let _ = service.stop().await;
            return Err(e.into());
        }

        Ok(Self {
            driver,
            service,
            interval: config.action_interval(),
        })
    }

    /// The underlying session, for callers that need direct access.
    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Navigate to `url`, then replay `actions` in order.
    ///
    /// The first failing remote call aborts the rest of the script. After
    /// each action that ran, any open alert is accepted and one action
    /// interval elapses before the next step; skipped steps move straight on.
    pub async fn run(&self, url: &str, actions: &[Action]) -> Result<RunReport> {
        let start = Instant::now();

        info!("navigating to: {}", url);
        self.driver.goto(url).await?;
        tokio::time::sleep(self.interval).await;

        let mut actions_executed = 0;
        let mut actions_skipped = 0;
        for (i, action) in actions.iter().enumerate() {
            debug!("action {}: {}", i + 1, action.name());
            if executor::execute(&self.driver, action).await? {
                actions_executed += 1;
                // Dialogs opened by the action must not block the next step;
                // absence of one is not an error.
                let _ = self.driver.accept_alert().await;
                tokio::time::sleep(self.interval).await;
            } else {
                actions_skipped += 1;
            }
        }

        Ok(RunReport {
            actions_executed,
            actions_skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Quit the session and stop the driver service.
    pub async fn close(self) -> Result<()> {
        self.driver.quit().await?;
        self.service.stop().await?;
        Ok(())
    }
}

/// Launch, replay the whole script, and tear the session down.
pub async fn run(script: &Script) -> Result<RunReport> {
    let bot = Bot::launch(&script.browser).await?;
    match bot.run(&script.target.url, &script.actions).await {
        Ok(report) => {
            bot.close().await?;
            Ok(report)
        }
        Err(e) => {
            // Teardown is best-effort once the script has already failed.
            let _ = bot.close().await;
            Err(e)
        }
    }
}
