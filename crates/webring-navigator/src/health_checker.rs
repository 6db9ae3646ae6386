//! Startup liveness probe.
//!
//! The probe is a diagnostic for the operator only. It never blocks serving
//! and never removes a member from the ring; unhealthy members are logged.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{error, info, warn};
use webring_common::error::{Result, WebringError};
use webring_common::{Member, Registry};

/// Health check configuration.
#[derive(Debug, Clone)]
pub struct HealthCheckConfig {
    /// Timeout for each member request.
    pub timeout: Duration,
    /// When false, [`HealthChecker::start`] and [`HealthChecker::spawn`] do nothing.
    pub enabled: bool,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthCheckStatus {
    Healthy,
    Unhealthy(String),
}

impl HealthCheckStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthCheckStatus::Healthy)
    }
}

/// Probe outcome for a single member.
#[derive(Debug, Clone)]
pub struct MemberHealth {
    pub member: Member,
    pub status: HealthCheckStatus,
}

/// Probe outcome for the whole ring, in ring order.
#[derive(Debug, Clone, Default)]
pub struct HealthReport {
    pub statuses: Vec<MemberHealth>,
}

impl HealthReport {
    pub fn unhealthy_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|health| !health.status.is_healthy())
            .count()
    }

    pub fn all_unhealthy(&self) -> bool {
        !self.statuses.is_empty() && self.unhealthy_count() == self.statuses.len()
    }

    pub fn unhealthy(&self) -> impl Iterator<Item = &MemberHealth> {
        self.statuses
            .iter()
            .filter(|health| !health.status.is_healthy())
    }
}

/// Checks that every member answers `200 OK` to a plain GET.
pub struct HealthChecker {
    registry: Arc<Registry>,
    client: Client,
    config: HealthCheckConfig,
}

impl HealthChecker {
    /// Creates a new health checker.
    ///
    /// # Arguments
    /// * `registry` - The ring whose members are probed
    /// * `config` - Health check configuration
    pub fn new(registry: Arc<Registry>, config: HealthCheckConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WebringError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            registry,
            client,
            config,
        })
    }

    /// Builds a checker and runs it in a background task.
    ///
    /// When health checking is disabled nothing is built, not even the
    /// HTTP client, and `Ok(None)` is returned.
    pub fn start(
        registry: Arc<Registry>,
        config: HealthCheckConfig,
    ) -> Result<Option<tokio::task::JoinHandle<HealthReport>>> {
        if !config.enabled {
            info!("Member health check disabled");
            return Ok(None);
        }
        Ok(Self::new(registry, config)?.spawn())
    }

    /// Runs the probe in a background task.
    ///
    /// Returns `None` when health checking is disabled.
    pub fn spawn(self) -> Option<tokio::task::JoinHandle<HealthReport>> {
        if !self.config.enabled {
            info!("Member health check disabled");
            return None;
        }

        Some(tokio::spawn(async move { self.check_all().await }))
    }

    /// Probes all members concurrently and logs the outcome.
    pub async fn check_all(&self) -> HealthReport {
        info!("Checking {} members for problems...", self.registry.len());

        let checks: Vec<_> = self
            .registry
            .iter()
            .map(|member| {
                let client = &self.client;
                async move {
                    let status = match Self::check_member(client, &member.url).await {
                        Ok(()) => HealthCheckStatus::Healthy,
                        Err(e) => HealthCheckStatus::Unhealthy(e.to_string()),
                    };
                    MemberHealth {
                        member: member.clone(),
                        status,
                    }
                }
            })
            .collect();

        let report = HealthReport {
            statuses: futures::future::join_all(checks).await,
        };

        self.log_report(&report);
        report
    }

    /// Check a single member's health
    async fn check_member(client: &Client, url: &str) -> Result<()> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| WebringError::MemberUnavailable(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(WebringError::MemberUnavailable(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn log_report(&self, report: &HealthReport) {
        for health in report.unhealthy() {
            if let HealthCheckStatus::Unhealthy(reason) = &health.status {
                warn!(
                    "There is a possible problem with {} ({}): {}",
                    health.member.name, health.member.url, reason
                );
            }
        }

        let unhealthy = report.unhealthy_count();
        if unhealthy == 0 {
            info!("Member health check finished, all members healthy");
            return;
        }

        warn!(
            "Member health check finished, possible problem with {} of {} members",
            unhealthy,
            report.statuses.len()
        );
        if report.all_unhealthy() {
            error!("Insufficient number of healthy members in the webring; serving anyway");
        }
    }
}
