//! `chatload run`: build the client and plan from config, drive the users,
//! write the summary.

use std::sync::Arc;
use std::time::Duration;

use chatload_config::ChatloadConfig;
use chatload_core::{
    write_summary, ChatTransport, ClientConfig, HttpChatClient, QueryPool, RunPlan, RunSummary,
    UserStates,
};
use tokio::sync::watch;
use tracing::{info, warn};

pub fn plan_from_config(config: &ChatloadConfig) -> RunPlan {
    let load = &config.load;
    RunPlan::new(config.target.app_id.clone(), load.users as usize)
        .with_duration(load.duration())
        .with_iterations(load.iterations())
        .with_ramp_up(load.ramp_up())
        .with_pause(
            Duration::from_secs_f64(load.pause_min_secs),
            Duration::from_secs_f64(load.pause_max_secs),
        )
}

pub fn client_config(config: &ChatloadConfig) -> ClientConfig {
    ClientConfig::new(config.target.chat_url(), config.target.api_token.clone())
        .with_timeout(config.load.request_timeout())
        .with_connect_timeout(config.load.connect_timeout())
}

/// Execute a run. `config` must already be finalized.
pub async fn execute(config: ChatloadConfig) -> chatload_common::Result<RunSummary> {
    let pool = Arc::new(QueryPool::new(config.queries.pool.clone())?);
    let client: Arc<dyn ChatTransport> = Arc::new(HttpChatClient::new(client_config(&config))?);
    let plan = plan_from_config(&config);

    info!(
        target_url = %config.target.chat_url(),
        app_id = %config.target.app_id,
        users = config.load.users,
        queries = pool.len(),
        "load test configured"
    );

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after in-flight requests");
            let _ = stop_tx.send(true);
        }
    });

    let mut states = UserStates::new();
    let report = chatload_core::run(client, pool, plan, &mut states, stop_rx).await;

    let summary = RunSummary::from_report(&report, &config.target.app_id, config.target.chat_url());
    write_summary(&config.output.summary_path, &summary)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ChatloadConfig {
        let mut config = ChatloadConfig::default();
        config.target.base_url = "https://api.example.com/v1/".into();
        config.target.app_id = "app-1".into();
        config.target.api_token = "tok".into();
        config.load.users = 4;
        config.load.duration_secs = 0;
        config.load.iterations = 3;
        config.load.ramp_up_secs = 2;
        config.load.pause_min_secs = 0.5;
        config.load.pause_max_secs = 1.5;
        config.load.request_timeout_secs = 20;
        config.load.connect_timeout_secs = 3;
        config
    }

    #[test]
    fn plan_mirrors_load_section() {
        let plan = plan_from_config(&config());
        assert_eq!(plan.users, 4);
        assert_eq!(plan.duration, None);
        assert_eq!(plan.iterations, Some(3));
        assert_eq!(plan.ramp_up, Duration::from_secs(2));
        assert_eq!(plan.pause_min, Duration::from_millis(500));
        assert_eq!(plan.pause_max, Duration::from_millis(1500));
        assert!(plan.user_id(1).starts_with("loadtest-app-1-"));
    }

    #[test]
    fn client_config_uses_chat_url_and_timeout() {
        let client = client_config(&config());
        assert_eq!(client.chat_url, "https://api.example.com/v1/chat-messages");
        assert_eq!(client.api_token, "tok");
        assert_eq!(client.timeout, Duration::from_secs(20));
        assert_eq!(client.connect_timeout, Duration::from_secs(3));
    }
}
