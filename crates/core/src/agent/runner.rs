//! Automation agent implementation.
//!
//! Drives candidates through prompt → log → render → publish → log, one
//! candidate at a time, and turns every candidate into exactly one
//! [`OutcomeRecord`].

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::audit::{AuditLog, LogEntry, LogStatus};
use crate::discovery::{Candidate, Discovery};
use crate::metrics;
use crate::prompt::{PromptArtifact, PromptGenerator, PromptRequest};
use crate::publish::{PublishRequest, Publisher};
use crate::render::{RenderRequest, Renderer};

use super::config::{AgentConfig, LogFailurePolicy};
use super::guard::RunGuard;
use super::types::{
    AgentError, AgentStatus, Outcome, OutcomeRecord, RunSummary, Stage, StageError,
    CANCELLED_MESSAGE, INCOMPLETE_RENDER_MESSAGE,
};

/// Fields filled in while a candidate moves through the chain.
#[derive(Default)]
struct CandidateProgress {
    prompt: Option<PromptArtifact>,
    media_url: Option<String>,
    warnings: Vec<String>,
}

impl CandidateProgress {
    fn into_failed(self, error: &StageError) -> Outcome {
        Outcome::Failed {
            prompt: self.prompt,
            media_url: self.media_url,
            failed_stage: error.stage(),
            error: error.to_string(),
            warnings: self.warnings,
        }
    }
}

type CancelSlot = Mutex<Option<watch::Sender<bool>>>;

fn lock_slot(slot: &CancelSlot) -> MutexGuard<'_, Option<watch::Sender<bool>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Exclusive hold on the agent for one run, plus that run's cancel signal.
///
/// Dropping it retires the signal before the running flag is released, so a
/// `cancel()` that returns `true` always reaches a live run.
struct ActiveRun<'a> {
    _guard: RunGuard<'a>,
    slot: &'a CancelSlot,
    cancel_rx: watch::Receiver<bool>,
}

impl ActiveRun<'_> {
    fn was_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        lock_slot(self.slot).take();
    }
}

/// Resolves once the cancel flag is set. Never resolves if the sender is gone.
async fn cancelled(cancel_rx: &mut watch::Receiver<bool>) {
    if cancel_rx.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// The automation agent - owns the collaborators and the run state.
pub struct AutomationAgent {
    config: AgentConfig,
    discovery: Arc<dyn Discovery>,
    prompts: Arc<dyn PromptGenerator>,
    renderer: Arc<dyn Renderer>,
    publisher: Arc<dyn Publisher>,
    audit: Arc<dyn AuditLog>,

    // Runtime state
    running: AtomicBool,
    /// Cancel signal of the in-flight run, `None` when idle.
    cancel_slot: CancelSlot,
}

impl AutomationAgent {
    /// Create a new agent.
    pub fn new(
        config: AgentConfig,
        discovery: Arc<dyn Discovery>,
        prompts: Arc<dyn PromptGenerator>,
        renderer: Arc<dyn Renderer>,
        publisher: Arc<dyn Publisher>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            config,
            discovery,
            prompts,
            renderer,
            publisher,
            audit,
            running: AtomicBool::new(false),
            cancel_slot: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Current run state.
    pub fn status(&self) -> AgentStatus {
        AgentStatus {
            running: self.is_running(),
        }
    }

    /// Ask the in-flight run to stop. Returns `false` if nothing is running.
    ///
    /// The pending stage is aborted and every remaining candidate is recorded
    /// as failed, so the run still returns one record per candidate.
    pub fn cancel(&self) -> bool {
        match lock_slot(&self.cancel_slot).as_ref() {
            Some(cancel_tx) => {
                cancel_tx.send_replace(true);
                info!("Cancellation requested for the current run");
                true
            }
            None => false,
        }
    }

    /// Fetch candidates and process the first `limit` of them.
    pub async fn run_full_pipeline(&self, limit: usize) -> Result<Vec<OutcomeRecord>, AgentError> {
        if limit == 0 {
            return Err(AgentError::InvalidLimit(limit));
        }

        let mut run = self.acquire()?;
        let run_id = Uuid::new_v4().to_string();
        info!("Starting run {} (limit {})", run_id, limit);

        let candidates = self.discover(&run_id).await?;
        let selected: Vec<Candidate> = candidates.into_iter().take(limit).collect();
        info!(
            "Run {}: processing {} candidate(s) via {}",
            run_id,
            selected.len(),
            self.discovery.name()
        );

        let records = self
            .process_candidates(&run_id, selected, &mut run.cancel_rx)
            .await;
        self.finish_run(&run_id, &run, &records);
        Ok(records)
    }

    /// Process only the candidate at `index` of the discovery list.
    pub async fn process_single(&self, index: usize) -> Result<OutcomeRecord, AgentError> {
        let mut run = self.acquire()?;
        let run_id = Uuid::new_v4().to_string();

        let mut candidates = self.discover(&run_id).await?;
        let available = candidates.len();
        if index >= available {
            metrics::RUNS_TOTAL.with_label_values(&["rejected"]).inc();
            return Err(AgentError::CandidateNotFound { index, available });
        }
        let candidate = candidates.swap_remove(index);
        info!(
            "Run {}: processing single candidate {} ('{}')",
            run_id, index, candidate.title
        );

        let mut records = self
            .process_candidates(&run_id, vec![candidate], &mut run.cancel_rx)
            .await;
        self.finish_run(&run_id, &run, &records);
        records
            .pop()
            .ok_or(AgentError::CandidateNotFound { index, available })
    }

    /// Take the running flag and install a fresh cancel signal for this run.
    fn acquire(&self) -> Result<ActiveRun<'_>, AgentError> {
        let guard = RunGuard::acquire(&self.running).ok_or_else(|| {
            warn!("Run rejected: agent is already running");
            metrics::RUNS_TOTAL.with_label_values(&["rejected"]).inc();
            AgentError::AlreadyRunning
        })?;
        let (cancel_tx, cancel_rx) = watch::channel(false);
        *lock_slot(&self.cancel_slot) = Some(cancel_tx);
        Ok(ActiveRun {
            _guard: guard,
            slot: &self.cancel_slot,
            cancel_rx,
        })
    }

    async fn discover(&self, run_id: &str) -> Result<Vec<Candidate>, AgentError> {
        self.discovery.fetch_candidates().await.map_err(|e| {
            error!("Run {}: discovery failed: {}", run_id, e);
            metrics::RUNS_TOTAL
                .with_label_values(&["discovery_failed"])
                .inc();
            AgentError::Discovery(e)
        })
    }

    fn finish_run(&self, run_id: &str, run: &ActiveRun<'_>, records: &[OutcomeRecord]) {
        let summary = RunSummary::from_records(records);
        let was_cancelled = run.was_cancelled();
        let result = if was_cancelled { "cancelled" } else { "completed" };
        metrics::RUNS_TOTAL.with_label_values(&[result]).inc();
        info!(
            "Run {} {}: {} success, {} partial, {} failed",
            run_id, result, summary.success, summary.partial, summary.failed
        );
    }

    async fn process_candidates(
        &self,
        run_id: &str,
        candidates: Vec<Candidate>,
        cancel_rx: &mut watch::Receiver<bool>,
    ) -> Vec<OutcomeRecord> {
        let mut records = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let skip = *cancel_rx.borrow();
            let record = if skip {
                Self::skipped(candidate)
            } else {
                self.process_candidate(run_id, candidate, cancel_rx).await
            };

            metrics::CANDIDATE_OUTCOMES
                .with_label_values(&[record.status().as_str()])
                .inc();
            records.push(record);
        }

        records
    }

    /// Record for a candidate that never started because the run was cancelled.
    fn skipped(candidate: Candidate) -> OutcomeRecord {
        let now = Utc::now();
        OutcomeRecord {
            candidate,
            outcome: Outcome::Failed {
                prompt: None,
                media_url: None,
                failed_stage: Stage::Prompt,
                error: CANCELLED_MESSAGE.to_string(),
                warnings: Vec::new(),
            },
            started_at: now,
            finished_at: now,
        }
    }

    async fn process_candidate(
        &self,
        run_id: &str,
        candidate: Candidate,
        cancel_rx: &mut watch::Receiver<bool>,
    ) -> OutcomeRecord {
        let started_at = Utc::now();
        let mut progress = CandidateProgress::default();

        let outcome = match self
            .run_chain(run_id, &candidate, &mut progress, cancel_rx)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    "Candidate '{}' failed at {} stage: {}",
                    candidate.title,
                    e.stage(),
                    e
                );
                progress.into_failed(&e)
            }
        };

        debug!("Candidate '{}' finished as {}", candidate.title, outcome.status().as_str());

        OutcomeRecord {
            candidate,
            outcome,
            started_at,
            finished_at: Utc::now(),
        }
    }

    async fn run_chain(
        &self,
        run_id: &str,
        candidate: &Candidate,
        progress: &mut CandidateProgress,
        cancel_rx: &mut watch::Receiver<bool>,
    ) -> Result<Outcome, StageError> {
        // Prompt
        let request = PromptRequest::new(
            candidate.title.clone(),
            candidate.category.clone(),
            candidate.description.clone(),
        );
        let prompt = self
            .run_stage(Stage::Prompt, cancel_rx, || self.prompts.generate(&request))
            .await?;
        progress.prompt = Some(prompt.clone());

        // First log entry
        let entry = LogEntry {
            run_id: run_id.to_string(),
            title: candidate.title.clone(),
            category: candidate.category.clone(),
            views: candidate.views.clone(),
            prompt: prompt.video_prompt.clone(),
            status: LogStatus::PromptGenerated,
            published_url: None,
        };
        match self
            .run_stage(Stage::Log, cancel_rx, || self.audit.append(entry.clone()))
            .await
        {
            Ok(_) => {}
            Err(e @ StageError::Cancelled { .. }) => return Err(e),
            Err(e) => match self.config.log_failure_policy {
                LogFailurePolicy::Fail => return Err(e),
                LogFailurePolicy::Warn => {
                    warn!("Continuing '{}' without log entry: {}", candidate.title, e);
                    progress.warnings.push(format!("log stage failed: {}", e));
                }
            },
        }

        // Render
        let render_request = RenderRequest::new(
            prompt.video_prompt.clone(),
            self.config.render_duration_secs,
            self.config.aspect_ratio.clone(),
        );
        let artifact = self
            .run_stage(Stage::Render, cancel_rx, || {
                self.renderer.render(render_request.clone())
            })
            .await?;

        let Some(media_url) = artifact.completed_media_url().map(str::to_string) else {
            warn!(
                "Render {} for '{}' ended as {} without media",
                artifact.job_id, candidate.title, artifact.state
            );
            return Ok(Outcome::Partial {
                prompt,
                render_job_id: artifact.job_id,
                render_state: artifact.state,
                error: INCOMPLETE_RENDER_MESSAGE.to_string(),
                warnings: std::mem::take(&mut progress.warnings),
            });
        };
        progress.media_url = Some(media_url.clone());

        // Publish
        let publish_request = PublishRequest {
            media_url: media_url.clone(),
            title: prompt.title.clone(),
            description: prompt.description.clone(),
            tags: prompt.tags.clone(),
            category_id: None,
            visibility: self.config.visibility,
        };
        let published = self
            .run_stage(Stage::Publish, cancel_rx, || {
                self.publisher.publish(publish_request.clone())
            })
            .await?;
        info!("Published '{}' at {}", candidate.title, published.url);

        // Second log entry. Publishing already happened, so a failure here
        // only produces a warning.
        let entry = LogEntry {
            status: LogStatus::Uploaded,
            published_url: Some(published.url.clone()),
            ..entry
        };
        if let Err(e) = self
            .run_stage(Stage::Log, cancel_rx, || self.audit.append(entry.clone()))
            .await
        {
            warn!("Failed to log upload of '{}': {}", candidate.title, e);
            progress.warnings.push(format!("log stage failed: {}", e));
        }

        Ok(Outcome::Success {
            prompt,
            media_url,
            published_url: published.url,
            warnings: std::mem::take(&mut progress.warnings),
        })
    }

    /// Run one stage with timeout, cancellation and retry.
    ///
    /// The log stage is never retried.
    async fn run_stage<T, E, F, Fut>(
        &self,
        stage: Stage,
        cancel_rx: &mut watch::Receiver<bool>,
        mut call: F,
    ) -> Result<T, StageError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<StageError>,
    {
        let started = Instant::now();
        let retry = &self.config.retry;
        let max_attempts = match stage {
            Stage::Log => 1,
            Stage::Prompt | Stage::Render | Stage::Publish => retry.max_attempts.max(1),
        };

        let mut attempt = 1;
        let result = loop {
            match self.attempt(stage, cancel_rx, call()).await {
                Err(e) if attempt < max_attempts && e.is_retryable() => {
                    let delay = retry.delay_for(attempt);
                    warn!(
                        "{} stage attempt {}/{} failed: {}; retrying in {:?}",
                        stage, attempt, max_attempts, e, delay
                    );
                    metrics::RETRY_ATTEMPTS
                        .with_label_values(&[stage.as_str()])
                        .inc();

                    tokio::select! {
                        biased;
                        _ = cancelled(cancel_rx) => break Err(StageError::Cancelled { stage }),
                        _ = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
                other => break other,
            }
        };

        metrics::STAGE_DURATION
            .with_label_values(&[stage.as_str()])
            .observe(started.elapsed().as_secs_f64());
        if let Err(e) = &result {
            metrics::STAGE_FAILURES
                .with_label_values(&[stage.as_str(), e.kind()])
                .inc();
        }

        result
    }

    async fn attempt<T, E>(
        &self,
        stage: Stage,
        cancel_rx: &mut watch::Receiver<bool>,
        call: impl Future<Output = Result<T, E>>,
    ) -> Result<T, StageError>
    where
        E: Into<StageError>,
    {
        let timed = async {
            match self.config.stage_timeout() {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(result) => result.map_err(Into::into),
                    Err(_) => Err(StageError::Timeout {
                        stage,
                        timeout_secs: limit.as_secs(),
                    }),
                },
                None => call.await.map_err(Into::into),
            }
        };

        tokio::select! {
            biased;
            _ = cancelled(cancel_rx) => Err(StageError::Cancelled { stage }),
            result = timed => result,
        }
    }
}
