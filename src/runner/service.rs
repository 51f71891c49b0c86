use crate::config::BrowserConfig;
use crate::{Error, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// How long to wait for the driver to start accepting connections.
const READY_TIMEOUT: Duration = Duration::from_secs(10);
const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A chromedriver process owned by this run.
///
/// The child is kill-on-drop, so an aborted run does not leak the process;
/// [`DriverService::stop`] is the orderly path that also reaps it.
pub struct DriverService {
    child: Child,
    port: u16,
}

impl DriverService {
    /// Spawn chromedriver and wait until it accepts connections.
    pub async fn start(config: &BrowserConfig) -> Result<Self> {
        let mut cmd = Command::new(&config.driver);
        cmd.arg(format!("--port={}", config.port));
        if config.debug {
            cmd.arg("--verbose");
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        cmd.kill_on_drop(true);

        debug!("starting driver: {} --port={}", config.driver, config.port);
        let mut child = cmd.spawn().map_err(|e| {
            Error::Driver(format!("failed to spawn '{}': {}", config.driver, e))
        })?;

        match wait_ready(&mut child, config.port).await {
            Ok(()) => Ok(Self {
                child,
                port: config.port,
            }),
            Err(e) => {
                let _ = child.start_kill();
                let _ = child.wait().await;
                Err(e)
            }
        }
    }

    /// Address the service listens on.
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    /// Kill the driver process and reap it.
    pub async fn stop(mut self) -> Result<()> {
        debug!("stopping driver on port {}", self.port);
        if let Err(e) = self.child.start_kill() {
            // Already exited on its own.
            debug!("driver kill: {}", e);
        }
        self.child.wait().await?;
        Ok(())
    }
}

async fn wait_ready(child: &mut Child, port: u16) -> Result<()> {
    let deadline = tokio::time::Instant::now() + READY_TIMEOUT;

    loop {
        if let Some(status) = child.try_wait()? {
            return Err(Error::Driver(format!(
                "driver exited during startup: {}",
                status
            )));
        }
        match TcpStream::connect(("127.0.0.1", port)).await {
            Ok(_) => {
                debug!("driver ready on port {}", port);
                return Ok(());
            }
            Err(e) => {
                if tokio::time::Instant::now() >= deadline {
                    warn!("driver not ready after {:?}", READY_TIMEOUT);
                    return Err(Error::Driver(format!(
                        "driver did not accept connections on port {} within {:?}: {}",
                        port, READY_TIMEOUT, e
                    )));
                }
                tokio::time::sleep(READY_POLL_INTERVAL).await;
            }
        }
    }
}
