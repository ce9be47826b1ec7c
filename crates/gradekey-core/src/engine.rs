//! Concurrent grading orchestrator.
//!
//! Grades a batch of answer sheets against one answer key on the blocking
//! thread pool, with bounded parallelism.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::grading::grade_submission;
use crate::model::{AnswerKey, AnswerSheet, Submission};
use crate::report::{AnswerKeySummary, GradingReport};
use crate::statistics::compute_answer_key_stats;

/// Configuration for the grading engine.
#[derive(Debug, Clone)]
pub struct GradingEngineConfig {
    /// Maximum sheets graded at once.
    pub parallelism: usize,
}

impl Default for GradingEngineConfig {
    fn default() -> Self {
        Self { parallelism: 4 }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_sheet_complete(&self, submission: &Submission);
    fn on_sheet_error(&self, student_name: &str, error: &str);
    fn on_run_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_sheet_complete(&self, _: &Submission) {}
    fn on_sheet_error(&self, _: &str, _: &str) {}
    fn on_run_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// The grading engine.
pub struct GradingEngine {
    config: GradingEngineConfig,
}

impl GradingEngine {
    pub fn new(config: GradingEngineConfig) -> Self {
        Self { config }
    }

    /// Grade every sheet against `key` and assemble a report.
    ///
    /// Submissions in the report keep the order of `sheets`; sheets whose
    /// grading task failed are left out.
    pub async fn grade_all(
        &self,
        key: &AnswerKey,
        sheets: Vec<AnswerSheet>,
        progress: &dyn ProgressReporter,
    ) -> Result<GradingReport> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));
        let shared_key = Arc::new(key.clone());

        let mut futures = FuturesUnordered::new();

        for (index, sheet) in sheets.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let key = Arc::clone(&shared_key);

            futures.push(async move {
                let student_name = sheet.student_name.clone();
                let inner = async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| anyhow::anyhow!("semaphore closed"))?;

                    let submission =
                        tokio::task::spawn_blocking(move || grade_submission(&key, &sheet))
                            .await
                            .map_err(|e| anyhow::anyhow!("grading task failed: {e}"))?;
                    Ok::<_, anyhow::Error>(submission)
                };
                (index, student_name, inner.await)
            });
        }

        let mut graded = Vec::new();
        let mut completed = 0usize;
        let mut failed = 0usize;
        let total = futures.len();

        while let Some((index, student_name, result)) = futures.next().await {
            match result {
                Ok(submission) => {
                    progress.on_sheet_complete(&submission);
                    graded.push((index, submission));
                    completed += 1;
                }
                Err(e) => {
                    tracing::error!("grading failed for {student_name}: {e:#}");
                    progress.on_sheet_error(&student_name, &e.to_string());
                    failed += 1;
                }
            }
        }

        let elapsed = start.elapsed();
        progress.on_run_complete(total, completed, failed, elapsed);

        graded.sort_by_key(|(index, _)| *index);
        let submissions: Vec<Submission> = graded.into_iter().map(|(_, s)| s).collect();
        let stats = compute_answer_key_stats(key, &submissions);

        tracing::info!(
            answer_key = %key.id,
            graded = completed,
            failed,
            "grading run finished"
        );

        Ok(GradingReport {
            id: run_id,
            created_at: chrono::Utc::now(),
            answer_key: AnswerKeySummary::from(key),
            submissions,
            stats,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
