//! Log polling
//!
//! `deployment log --watch` runs a background task that polls the log
//! query and forwards lines it has not sent before over a channel.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::error::Result;
use crate::zeabur::helpers::is_terminal_status;
use crate::zeabur::ZeaburClient;

use super::models::LogEntry;

const CHANNEL_CAPACITY: usize = 256;

/// Which log stream to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    /// Runtime logs of one deployment
    RuntimeDeployment { deployment_id: String },
    /// Runtime logs of whatever runs in the service right now
    RuntimeService {
        service_id: String,
        environment_id: String,
    },
    /// Build logs of one deployment
    Build { deployment_id: String },
}

/// Fetch the current contents of a log stream
pub async fn fetch_logs(client: &ZeaburClient, source: &LogSource) -> Result<Vec<LogEntry>> {
    match source {
        LogSource::RuntimeDeployment { deployment_id } => {
            client.runtime_logs_by_deployment(deployment_id).await
        }
        LogSource::RuntimeService {
            service_id,
            environment_id,
        } => client.runtime_logs_by_service(service_id, environment_id).await,
        LogSource::Build { deployment_id } => client.build_logs(deployment_id).await,
    }
}

/// Keep only entries not seen before, remembering them
pub fn fresh_entries(
    seen: &mut HashSet<(DateTime<Utc>, String)>,
    entries: Vec<LogEntry>,
) -> Vec<LogEntry> {
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.key()))
        .collect()
}

/// Spawn the polling task.
///
/// The task ends when the receiver is dropped, when a request fails (the
/// error is sent first) or, for build logs, once the deployment reached a
/// terminal status and its final lines were sent.
pub fn spawn_log_watch(
    client: ZeaburClient,
    source: LogSource,
    interval: Duration,
) -> (mpsc::Receiver<Result<LogEntry>>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    let handle = tokio::spawn(async move {
        let mut seen = HashSet::new();

        loop {
            let finished = match &source {
                LogSource::Build { deployment_id } => {
                    match client.get_deployment(deployment_id).await {
                        Ok(d) => is_terminal_status(&d.status),
                        Err(e) => {
                            let _ = tx.send(Err(e)).await;
                            return;
                        }
                    }
                }
                _ => false,
            };

            match fetch_logs(&client, &source).await {
                Ok(entries) => {
                    for entry in fresh_entries(&mut seen, entries) {
                        if tx.send(Ok(entry)).await.is_err() {
                            debug!("Log receiver dropped, stopping watch");
                            return;
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e)).await;
                    return;
                }
            }

            if finished {
                debug!("Deployment reached a terminal status, stopping watch");
                return;
            }
            if tx.is_closed() {
                return;
            }
            sleep(interval).await;
        }
    });

    (rx, handle)
}
