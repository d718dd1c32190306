//! Suite runner: sequences scenario cases over fresh device sessions and
//! reports results.
//!
//! Cases run strictly one after another — the suite owns a single device —
//! and a failed case never stops the rest of the selection: each case gets
//! its own session, result entry and, on failure, a screenshot.

use std::path::PathBuf;
use std::time::Instant;

use meridian_common::{Fixtures, SuiteConfig};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::chain::ChainClient;
use crate::error::{E2eError, E2eResult};
use crate::scenario::{self, ScenarioInfo, Tag};
use crate::scenarios;
use crate::session::DeviceSession;

/// Result of one scenario case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub scenario: String,
    pub case: Option<String>,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl CaseResult {
    /// `scenario[case]`, or just the scenario name for single-shot runs.
    pub fn label(&self) -> String {
        match &self.case {
            Some(case) => format!("{}[{}]", self.scenario, case),
            None => self.scenario.clone(),
        }
    }
}

/// Result of a whole selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub finished_at: String,
    pub results: Vec<CaseResult>,
}

pub struct SuiteRunner {
    config: SuiteConfig,
    fixtures: Fixtures,
    chain: ChainClient,
}

impl SuiteRunner {
    pub fn new(config: SuiteConfig, fixtures: Fixtures) -> E2eResult<Self> {
        std::fs::create_dir_all(&config.artifacts_dir)?;
        let chain = ChainClient::new(&config.chain)?;
        Ok(Self {
            config,
            fixtures,
            chain,
        })
    }

    /// Run every scenario.
    pub async fn run_all(&self) -> SuiteResult {
        self.run_scenarios(scenario::SCENARIOS.iter().collect(), None).await
    }

    /// Run the scenarios carrying `tag`.
    pub async fn run_tagged(&self, tag: Tag) -> SuiteResult {
        self.run_scenarios(scenario::tagged(tag), None).await
    }

    /// Run one scenario, optionally narrowed to a single case.
    pub async fn run_scenario(&self, name: &str, case: Option<&str>) -> E2eResult<SuiteResult> {
        let info =
            scenario::find(name).ok_or_else(|| E2eError::UnknownScenario(name.to_string()))?;
        if let Some(case) = case {
            if !info.cases.contains(&case) {
                return Err(E2eError::UnknownCase {
                    scenario: name.to_string(),
                    case: case.to_string(),
                });
            }
        }
        Ok(self.run_scenarios(vec![info], case).await)
    }

    async fn run_scenarios(
        &self,
        infos: Vec<&'static ScenarioInfo>,
        only_case: Option<&str>,
    ) -> SuiteResult {
        let start = Instant::now();
        let mut results = Vec::new();

        info!("Running {} scenario(s)...", infos.len());

        for info in infos {
            let cases: Vec<Option<&str>> = if info.cases.is_empty() {
                vec![None]
            } else {
                info.cases
                    .iter()
                    .copied()
                    .filter(|c| only_case.map_or(true, |only| only == *c))
                    .map(Some)
                    .collect()
            };

            for case in cases {
                let result = self.execute_case(info, case).await;
                if result.success {
                    info!("✓ {} ({} ms)", result.label(), result.duration_ms);
                } else {
                    error!(
                        "✗ {} - {}",
                        result.label(),
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                }
                results.push(result);
            }
        }

        let passed = results.iter().filter(|r| r.success).count();
        let failed = results.len() - passed;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!("Results: {} passed, {} failed ({} ms)", passed, failed, duration_ms);

        SuiteResult {
            total: results.len(),
            passed,
            failed,
            duration_ms,
            finished_at: chrono::Utc::now().to_rfc3339(),
            results,
        }
    }

    async fn execute_case(&self, info: &ScenarioInfo, case: Option<&str>) -> CaseResult {
        let start = Instant::now();
        let label = match case {
            Some(c) => format!("{}[{}]", info.name, c),
            None => info.name.to_string(),
        };
        info!("Running {}", label);

        let error = match self.drive_case(info.name, case, &label).await {
            Ok(()) => None,
            Err(e) => Some(e.to_string()),
        };

        CaseResult {
            scenario: info.name.to_string(),
            case: case.map(str::to_string),
            success: error.is_none(),
            duration_ms: start.elapsed().as_millis() as u64,
            error,
        }
    }

    /// One fresh session per case; the session always comes down again,
    /// with a screenshot taken first if the case failed.
    async fn drive_case(&self, name: &str, case: Option<&str>, label: &str) -> E2eResult<()> {
        let session = DeviceSession::start(&self.config).await?;
        let outcome = self.dispatch(name, case, &session).await;
        if outcome.is_err() {
            if let Err(e) = session.capture_failure_screenshot(label).await {
                warn!("could not capture failure screenshot: {}", e);
            }
        }
        session.close().await;
        outcome
    }

    async fn dispatch(
        &self,
        name: &str,
        case: Option<&str>,
        session: &DeviceSession,
    ) -> E2eResult<()> {
        let driver = session.driver();
        let missing_case = || E2eError::UnknownCase {
            scenario: name.to_string(),
            case: case.unwrap_or("<none>").to_string(),
        };

        match name {
            "recover_access" => scenarios::recover_access(driver, &self.fixtures).await,
            "sign_in" => {
                let case = case.and_then(scenario::sign_in_case).ok_or_else(missing_case)?;
                scenarios::sign_in(driver, case).await
            }
            "password" => {
                let case = case.and_then(scenario::password_case).ok_or_else(missing_case)?;
                scenarios::password(driver, case).await
            }
            "send_transaction" => {
                let case = case.and_then(scenario::transfer_case).ok_or_else(missing_case)?;
                scenarios::send_transaction(driver, &self.fixtures, &self.chain, case).await
            }
            "send_transaction_from_dapp" => {
                scenarios::send_transaction_from_dapp(driver, &self.fixtures, &self.chain).await
            }
            other => Err(E2eError::UnknownScenario(other.to_string())),
        }
    }

    /// Serialize the results report into the artifacts directory.
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.artifacts_dir)?;
        let path = self.config.artifacts_dir.join("results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;
        info!("Results written to {}", path.display());
        Ok(path)
    }
}
