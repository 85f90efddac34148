//! Runs a planned task list: dry-run, skip policy, fetch, optional rescale.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::fetch::{FetchResult, RetryPolicy, fetch_to_file};
use crate::openai::{ImageClient, ImagesGenerateRequest};
use crate::planner::Task;
use crate::postprocess::{RescaleOutcome, rescale_image};
use crate::report::Reporter;

/// Per-run settings, built once from the command line.
#[derive(Clone, Debug)]
pub struct BatchOptions {
    /// Root that task paths are relative to
    pub out_root: PathBuf,
    /// Image model identifier
    pub model: String,
    /// Requested image size
    pub size: String,
    /// Optional `response_format` for the request body
    pub response_format: Option<String>,
    /// Print the plan only
    pub dry_run: bool,
    /// Leave existing targets alone
    pub skip_existing: bool,
    /// Regenerate even if the target exists
    pub overwrite: bool,
    /// Shrink images larger than this after the batch
    pub rescale: Option<u32>,
    /// Retry behaviour per task
    pub retry: RetryPolicy,
}

impl BatchOptions {
    /// True when `path` exists and policy says to keep it.
    pub fn should_skip(&self, path: &Path) -> bool {
        self.skip_existing && !self.overwrite && path.exists()
    }
}

/// Counters for a finished batch.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatchSummary {
    /// Tasks in the plan
    pub planned: usize,
    /// Images written this run
    pub written: usize,
    /// Tasks skipped because the target existed
    pub skipped: usize,
    /// Tasks that ran out of attempts
    pub failed: usize,
    /// Images shrunk by the post-pass
    pub rescaled: usize,
}

/// Processes `tasks` one at a time, in order.
///
/// A failed task is counted and the batch moves on; nothing here aborts
/// the run. Dry runs touch neither the filesystem nor `client`.
pub async fn run_batch<C, W>(
    tasks: &[Task],
    options: &BatchOptions,
    client: &C,
    reporter: &mut Reporter<W>,
) -> BatchSummary
where
    C: ImageClient,
    W: std::io::Write,
{
    let total = tasks.len();
    let mut summary = BatchSummary {
        planned: total,
        ..BatchSummary::default()
    };
    reporter.planned(total);

    let mut present = Vec::new();
    for (idx, task) in tasks.iter().enumerate() {
        let idx = idx + 1;
        let full = options.out_root.join(&task.rel_path);

        if options.dry_run {
            reporter.dry_run(idx, total, &full, &task.prompt);
            continue;
        }
        if options.should_skip(&full) {
            reporter.skipped(idx, total, &full);
            summary.skipped += 1;
            present.push(full);
            continue;
        }

        reporter.generating(idx, total, &full);
        let request = ImagesGenerateRequest {
            model: &options.model,
            prompt: &task.prompt,
            n: 1,
            size: &options.size,
            response_format: options.response_format.as_deref(),
        };
        match fetch_to_file(client, &request, &full, &options.retry, reporter).await {
            FetchResult::Written {
                path,
                bytes,
                attempts,
            } => {
                debug!("{} bytes to {} after {attempts} attempt(s)", bytes, path.display());
                summary.written += 1;
                present.push(path);
            }
            FetchResult::Failed { .. } => summary.failed += 1,
        }
    }

    if let Some(max_px) = options.rescale.filter(|max_px| *max_px > 0)
        && !options.dry_run
    {
        for path in &present {
            match rescale_image(path, max_px) {
                Ok(RescaleOutcome::Resized { width, height }) => {
                    reporter.rescaled(path, width, height);
                    summary.rescaled += 1;
                }
                Ok(RescaleOutcome::Unchanged) => {}
                Err(err) => reporter.rescale_failed(path, &err),
            }
        }
    }

    info!(
        "Batch done: {} planned, {} written, {} skipped, {} failed",
        summary.planned, summary.written, summary.skipped, summary.failed
    );
    summary
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::error::AssetError;

    struct CountingClient {
        calls: AtomicUsize,
    }

    impl ImageClient for CountingClient {
        async fn generate(
            &self,
            _request: &ImagesGenerateRequest<'_>,
        ) -> Result<Vec<u8>, AssetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(b"img".to_vec())
        }
    }

    fn options(root: &Path) -> BatchOptions {
        BatchOptions {
            out_root: root.to_path_buf(),
            model: "gpt-image-1".to_string(),
            size: "1024x1024".to_string(),
            response_format: None,
            dry_run: false,
            skip_existing: true,
            overwrite: false,
            rescale: None,
            retry: RetryPolicy {
                retries: 0,
                initial_delay: Duration::ZERO,
                backoff_unit: Duration::ZERO,
            },
        }
    }

    #[test]
    fn skip_policy() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("x.png");
        std::fs::write(&path, b"old").expect("write");

        let mut opts = options(dir.path());
        assert!(opts.should_skip(&path));
        assert!(!opts.should_skip(&dir.path().join("missing.png")));
        opts.overwrite = true;
        assert!(!opts.should_skip(&path));
        opts.overwrite = false;
        opts.skip_existing = false;
        assert!(!opts.should_skip(&path));
    }

    #[tokio::test]
    async fn writes_each_task() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tasks = vec![
            Task {
                rel_path: PathBuf::from("tiles/a_0.png"),
                prompt: "a".to_string(),
            },
            Task {
                rel_path: PathBuf::from("tiles/a_1.png"),
                prompt: "a".to_string(),
            },
        ];
        let client = CountingClient {
            calls: AtomicUsize::new(0),
        };
        let mut reporter = Reporter::new(Vec::new());
        let summary = run_batch(&tasks, &options(dir.path()), &client, &mut reporter).await;

        assert_eq!(summary.written, 2);
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            std::fs::read(dir.path().join("tiles/a_1.png")).expect("read"),
            b"img"
        );
    }
}
