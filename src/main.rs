mod cli;
mod framing;
mod kubernetes;
#[cfg(test)]
mod tests;
mod types;
mod utils;

use anyhow::Context;
use clap::Parser;
use crossterm::style::Stylize;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use kube::{Api, Client, Config, ResourceExt};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use cli::Cli;
use types::LogLine;
use utils::color_for;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::infer()
        .await
        .context("failed to load cluster configuration")?;
    let namespace = cli
        .namespace
        .clone()
        .unwrap_or_else(|| config.default_namespace.clone());
    let client = Client::try_from(config).context("failed to build cluster client")?;

    run(client, cli, namespace).await
}

/// Resolve the cronjob, fan out one pod-listing task per owned job and one
/// streamer task per pod, and wait for everything to drain.
async fn run(client: Client, cli: Cli, namespace: String) -> anyhow::Result<()> {
    let cronjob = kubernetes::get_cronjob(&client, &namespace, &cli.name).await?;
    let jobs = kubernetes::list_jobs(&client, &namespace).await?;
    let owned: Vec<Job> = jobs
        .into_iter()
        .filter(|job| kubernetes::is_owned_by(job, &cronjob))
        .collect();
    info!(
        "Found {} job(s) owned by cronjob {}/{}",
        owned.len(),
        namespace,
        cli.name
    );
    if owned.is_empty() {
        return Ok(());
    }

    // Single-writer sink: streamers send whole lines here so output from
    // different pods never interleaves mid-line.
    let (tx, mut rx) = mpsc::channel::<LogLine>(1024);
    let printer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let color = color_for(&msg.pod_name);
            println!("{} {}", msg.pod_name.with(color).bold(), msg.line);
        }
    });

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, shutting down log streams");
                cancel.cancel();
            }
        });
    }

    let mut job_tasks = JoinSet::new();
    for job in owned {
        let client = client.clone();
        let namespace = namespace.clone();
        job_tasks.spawn(async move {
            let pods = kubernetes::list_job_pods(&client, &namespace, &job).await;
            (job.name_any(), pods)
        });
    }

    let pods_api: Api<Pod> = Api::namespaced(client.clone(), &namespace);
    let gate = cli.max_streams.map(|n| Arc::new(Semaphore::new(n)));
    let mut stream_tasks = JoinSet::new();
    let mut failures = 0usize;

    // Pod streams start as soon as their job's listing comes back, while
    // sibling listings are still in flight.
    while let Some(joined) = job_tasks.join_next().await {
        let (job_name, listed) = joined.context("pod listing task panicked")?;
        match listed {
            Ok(pods) => {
                debug!("Job {} has {} pod(s)", job_name, pods.len());
                for pod in pods {
                    let pod_name = pod.name_any();
                    let api = pods_api.clone();
                    let tx = tx.clone();
                    let cancel = cancel.clone();
                    let gate = gate.clone();
                    let container = cli.container.clone();
                    let follow = cli.follow;
                    let timestamps = cli.timestamps;
                    stream_tasks.spawn(async move {
                        let _permit = match gate {
                            Some(sem) => tokio::select! {
                                _ = cancel.cancelled() => return Ok(()),
                                permit = sem.acquire_owned() => {
                                    Some(permit.context("stream gate closed")?)
                                }
                            },
                            None => None,
                        };
                        kubernetes::stream_pod_logs(
                            api, pod_name, container, follow, timestamps, tx, cancel,
                        )
                        .await
                    });
                }
            }
            Err(err) => {
                // One job's listing failure does not abort its siblings.
                error!("Skipping job {}: {:#}", job_name, err);
                failures += 1;
            }
        }
    }
    drop(tx);

    while let Some(joined) = stream_tasks.join_next().await {
        if let Err(err) = joined.context("log stream task panicked")? {
            error!("{:#}", err);
            failures += 1;
        }
    }

    printer.await.context("printer task panicked")?;
    if failures > 0 {
        anyhow::bail!("{} job listing(s) or log stream(s) failed", failures);
    }
    Ok(())
}
