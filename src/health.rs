//! Liveness pings
//!
//! The `health` process posts one ping per watcher name on a fixed interval so
//! the backend can tell the watchers are still deployed.

use crate::config::WatchConfig;
use crate::handler::WatcherKind;
use crate::types::WatcherError;
use crate::upload::ApiClient;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

pub struct HealthPinger {
    client: ApiClient,
    interval: Duration,
}

impl HealthPinger {
    pub fn new(client: ApiClient, interval: Duration) -> Self {
        Self { client, interval }
    }

    /// Build a pinger from config; `health_endpoint` is required here
    pub fn from_config(config: &WatchConfig) -> Result<Self, WatcherError> {
        let endpoint = config
            .health_endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .ok_or_else(|| WatcherError::config("health_endpoint is required for health pings"))?;

        let client = ApiClient::new(endpoint, &config.api_token, config.request_timeout())?;
        Ok(Self::new(client, config.health_interval()))
    }

    pub async fn ping(&self, system_name: &str) -> Result<(), WatcherError> {
        self.client.ping(system_name).await
    }

    /// Ping every watcher name once; returns how many pings failed
    pub async fn ping_all(&self) -> usize {
        let mut failures = 0;
        for kind in WatcherKind::all() {
            let name = kind.system_name();
            match self.ping(name).await {
                Ok(()) => info!("Health ping sent for {}", name),
                Err(e) => {
                    error!("Health ping for {} failed: {}", name, e);
                    failures += 1;
                }
            }
        }
        failures
    }

    /// Ping until Ctrl-C
    pub async fn run(&self) {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
        })
        .await
    }

    /// Ping on every tick until `shutdown` completes; the first tick is immediate
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            "Sending health pings to {} every {:?}",
            self.client.endpoint(),
            self.interval
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping health pings");
                    break;
                }
                _ = ticker.tick() => {
                    self.ping_all().await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(health_endpoint: Option<&str>) -> WatchConfig {
        let mut yaml = String::from("watch_directory: /w\napi_endpoint: http://x\napi_token: t\n");
        if let Some(endpoint) = health_endpoint {
            yaml.push_str(&format!("health_endpoint: \"{}\"\n", endpoint));
        }
        WatchConfig::from_yaml(&yaml).unwrap()
    }

    #[test]
    fn test_missing_health_endpoint_is_config_error() {
        let result = HealthPinger::from_config(&config(None));
        assert!(matches!(result, Err(WatcherError::Config { .. })));
    }

    #[test]
    fn test_blank_health_endpoint_is_config_error() {
        let result = HealthPinger::from_config(&config(Some("  ")));
        assert!(matches!(result, Err(WatcherError::Config { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_counts_failures() {
        let pinger = HealthPinger::from_config(&config(Some("http://127.0.0.1:9/ping"))).unwrap();
        assert_eq!(pinger.ping_all().await, 2);
    }

    #[tokio::test]
    async fn test_run_until_stops_on_shutdown() {
        let pinger = HealthPinger::from_config(&config(Some("http://127.0.0.1:9/ping"))).unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        tx.send(()).unwrap();

        pinger
            .run_until(async {
                let _ = rx.await;
            })
            .await;
    }
}
