//! Per-case device session lifecycle.
//!
//! Every scenario case gets a fresh app session and hands it back when it
//! finishes, pass or fail. The fresh session is what keeps cases recoverable
//! from each other: nothing a failed case left on screen survives into the
//! next one.

use std::path::{Path, PathBuf};

use meridian_common::SuiteConfig;
use tracing::{info, warn};

use crate::driver::{AutomationClient, DriverSession};
use crate::error::E2eResult;

pub struct DeviceSession {
    driver: DriverSession,
    artifacts_dir: PathBuf,
}

impl DeviceSession {
    /// Reach the automation server and open a fresh app session.
    pub async fn start(config: &SuiteConfig) -> E2eResult<Self> {
        let client = AutomationClient::new(&config.automation)?;
        let driver = client.create_session().await?;
        Ok(Self {
            driver,
            artifacts_dir: config.artifacts_dir.clone(),
        })
    }

    pub fn driver(&self) -> &DriverSession {
        &self.driver
    }

    /// Capture the current screen into the artifacts directory. Called on
    /// case failure before the session is torn down.
    pub async fn capture_failure_screenshot(&self, label: &str) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.artifacts_dir)?;
        let path = screenshot_path(&self.artifacts_dir, label);
        let png = self.driver.screenshot_png().await?;
        std::fs::write(&path, png)?;
        info!("failure screenshot written to {}", path.display());
        Ok(path)
    }

    /// End the session. Best-effort: a teardown failure is logged, not
    /// propagated, so it never masks the case's own result.
    pub async fn close(self) {
        if let Err(e) = self.driver.quit().await {
            warn!(session_id = %self.driver.session_id(), "session teardown failed: {}", e);
        }
    }
}

/// Case labels like `sign_in[invalid]` become file-system friendly names.
fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

/// Artifact path a failure screenshot for `label` would land at.
pub fn screenshot_path(artifacts_dir: &Path, label: &str) -> PathBuf {
    artifacts_dir.join(format!("{}.png", sanitize_label(label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_sanitize_to_file_names() {
        assert_eq!(sanitize_label("sign_in[invalid]"), "sign_in-invalid");
        assert_eq!(sanitize_label("recover_access"), "recover_access");
        assert_eq!(
            sanitize_label("send_transaction[one_to_one_chat]"),
            "send_transaction-one_to_one_chat"
        );
    }

    #[test]
    fn screenshot_paths_land_in_artifacts_dir() {
        let path = screenshot_path(Path::new("test-results"), "password[short]");
        assert_eq!(path, PathBuf::from("test-results/password-short.png"));
    }
}
