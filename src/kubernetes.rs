use crate::framing::LineFramer;
use crate::types::LogLine;
use anyhow::Context;
use futures::io::AsyncReadExt;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{ListParams, LogParams};
use kube::{Api, Client, ResourceExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Label the job controller stamps on every pod it creates.
const CONTROLLER_UID_LABEL: &str = "batch.kubernetes.io/controller-uid";

const READ_BUF_SIZE: usize = 8192;

pub async fn get_cronjob(client: &Client, namespace: &str, name: &str) -> anyhow::Result<CronJob> {
    let api: Api<CronJob> = Api::namespaced(client.clone(), namespace);
    api.get(name)
        .await
        .with_context(|| format!("failed to get cronjob {}/{}", namespace, name))
}

pub async fn list_jobs(client: &Client, namespace: &str) -> anyhow::Result<Vec<Job>> {
    let api: Api<Job> = Api::namespaced(client.clone(), namespace);
    let jobs = api
        .list(&ListParams::default())
        .await
        .with_context(|| format!("failed to list jobs in namespace {}", namespace))?;
    Ok(jobs.items)
}

/// Check whether a job is controlled by the given cronjob.
///
/// True iff some owner reference carries the cronjob's UID and has its
/// controller flag explicitly set. An unset flag counts as not owned.
pub fn is_owned_by(job: &Job, cronjob: &CronJob) -> bool {
    let Some(uid) = cronjob.metadata.uid.as_deref() else {
        return false;
    };
    job.metadata
        .owner_references
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|owner| owner.uid == uid && owner.controller == Some(true))
}

/// List the pods a job created, via its controller-uid label.
pub async fn list_job_pods(client: &Client, namespace: &str, job: &Job) -> anyhow::Result<Vec<Pod>> {
    let job_uid = job
        .metadata
        .uid
        .as_deref()
        .with_context(|| format!("job {} has no UID", job.name_any()))?;
    let api: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let selector = format!("{}={}", CONTROLLER_UID_LABEL, job_uid);
    let pods = api
        .list(&ListParams::default().labels(&selector))
        .await
        .with_context(|| format!("failed to list pods for job {}", job.name_any()))?;
    Ok(pods.items)
}

/// Stream one pod's logs, sending every complete line to the output sink.
///
/// The stream handle is dropped on every exit path: open failure, read
/// error, end of stream, cancellation, or a closed sink.
pub async fn stream_pod_logs(
    api: Api<Pod>,
    pod_name: String,
    container: Option<String>,
    follow: bool,
    timestamps: bool,
    tx: mpsc::Sender<LogLine>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let params = LogParams {
        container,
        follow,
        timestamps,
        ..Default::default()
    };
    let mut reader = api
        .log_stream(&pod_name, &params)
        .await
        .with_context(|| format!("failed to open log stream for pod {}", pod_name))?;

    let mut framer = LineFramer::new();
    let mut buf = [0u8; READ_BUF_SIZE];
    loop {
        let bytes_read = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Log stream for pod {} cancelled", pod_name);
                return Ok(());
            }
            read = reader.read(&mut buf) => {
                read.with_context(|| format!("error reading logs from pod {}", pod_name))?
            }
        };
        if bytes_read == 0 {
            break;
        }
        for line in framer.push(&buf[..bytes_read]) {
            let msg = LogLine {
                pod_name: pod_name.clone(),
                line,
            };
            if tx.send(msg).await.is_err() {
                return Ok(());
            }
        }
    }

    // End of stream; a trailing line without a newline still counts.
    if let Some(line) = framer.finish() {
        let msg = LogLine {
            pod_name: pod_name.clone(),
            line,
        };
        let _ = tx.send(msg).await;
    }
    debug!("Log stream for pod {} ended", pod_name);
    Ok(())
}
