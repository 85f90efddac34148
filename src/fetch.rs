//! Single-task fetch with retry and exponential backoff.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::RngExt;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::constants::BACKOFF_UNIT;
use crate::error::AssetError;
use crate::openai::{ImageClient, ImagesGenerateRequest};
use crate::report::Reporter;

/// How hard to try before giving up on a task.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub retries: u32,
    /// Pause before the first attempt, a crude client-side rate limit
    pub initial_delay: Duration,
    /// Backoff unit; retry `k` waits `unit * 2^(k-1) + unit * jitter`
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            initial_delay: Duration::from_millis(250),
            backoff_unit: BACKOFF_UNIT,
        }
    }
}

impl RetryPolicy {
    /// Total attempts including the first.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Backoff before retry number `retry` (1-based), `jitter` in `[0, 1)`.
    pub fn backoff(&self, retry: u32, jitter: f64) -> Duration {
        let exp = 2u32.saturating_pow(retry.saturating_sub(1));
        self.backoff_unit.saturating_mul(exp) + self.backoff_unit.mul_f64(jitter.clamp(0.0, 1.0))
    }
}

/// Outcome of one task.
#[derive(Debug)]
pub enum FetchResult {
    /// Image written to `path`
    Written {
        /// Where the bytes went
        path: PathBuf,
        /// Byte count
        bytes: usize,
        /// Attempts used
        attempts: u32,
    },
    /// Every attempt failed
    Failed {
        /// Target that was not produced
        path: PathBuf,
        /// Last error seen
        error: String,
        /// Attempts made
        attempts: u32,
    },
}

impl FetchResult {
    /// True for [`FetchResult::Written`].
    pub fn is_written(&self) -> bool {
        matches!(self, FetchResult::Written { .. })
    }

    /// Attempts made either way.
    pub fn attempts(&self) -> u32 {
        match self {
            FetchResult::Written { attempts, .. } | FetchResult::Failed { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Writes `bytes` to `path`, creating parent directories.
///
/// The bytes go to a sibling temp file that is renamed over `path`, so a
/// failed write leaves any prior file untouched.
pub fn write_image(path: &Path, bytes: &[u8]) -> Result<(), AssetError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(bytes)?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Generates one image and writes it to `dest`, retrying per `policy`.
///
/// Never returns an error: exhaustion is reported as [`FetchResult::Failed`]
/// so the caller can move on to the next task.
pub async fn fetch_to_file<C, W>(
    client: &C,
    request: &ImagesGenerateRequest<'_>,
    dest: &Path,
    policy: &RetryPolicy,
    reporter: &mut Reporter<W>,
) -> FetchResult
where
    C: ImageClient,
    W: std::io::Write,
{
    let max_attempts = policy.max_attempts();
    let mut last_err = String::new();

    for attempt in 1..=max_attempts {
        let delay = if attempt == 1 {
            policy.initial_delay
        } else {
            let jitter: f64 = rand::rng().random();
            policy.backoff(attempt - 1, jitter)
        };
        if !delay.is_zero() {
            debug!("Sleeping {:?} before attempt {attempt}", delay);
            tokio::time::sleep(delay).await;
        }

        let result = match client.generate(request).await {
            Ok(bytes) => write_image(dest, &bytes).map(|()| bytes.len()),
            Err(err) => Err(err),
        };

        match result {
            Ok(bytes) => {
                reporter.ok(dest);
                return FetchResult::Written {
                    path: dest.to_path_buf(),
                    bytes,
                    attempts: attempt,
                };
            }
            Err(err) => {
                warn!("Attempt {attempt}/{max_attempts} for {} failed: {err}", dest.display());
                reporter.attempt_failed(attempt, max_attempts, dest, &err);
                last_err = err.to_string();
            }
        }
    }

    reporter.failed(dest, &last_err);
    FetchResult::Failed {
        path: dest.to_path_buf(),
        error: last_err,
        attempts: max_attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_with_bounded_jitter() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1, 0.0), Duration::from_secs(1));
        assert_eq!(policy.backoff(2, 0.0), Duration::from_secs(2));
        assert_eq!(policy.backoff(3, 0.0), Duration::from_secs(4));
        assert_eq!(policy.backoff(3, 0.5), Duration::from_millis(4500));
        assert!(policy.backoff(1, 0.999) < Duration::from_secs(2));
    }

    #[test]
    fn zero_unit_means_no_wait() {
        let policy = RetryPolicy {
            backoff_unit: Duration::ZERO,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(4, 0.9), Duration::ZERO);
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn write_image_creates_parents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a").join("b").join("c.png");
        write_image(&path, b"png").expect("write");
        assert_eq!(fs::read(&path).expect("read"), b"png");
    }

    #[test]
    fn write_image_replaces_without_leftovers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tile.png");
        write_image(&path, b"old").expect("write");
        write_image(&path, b"new").expect("overwrite");
        assert_eq!(fs::read(&path).expect("read"), b"new");
        assert_eq!(fs::read_dir(dir.path()).expect("ls").count(), 1);
    }

    #[test]
    fn failed_write_leaves_target_alone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocked = dir.path().join("blocked.png");
        fs::create_dir(&blocked).expect("mkdir");
        fs::write(blocked.join("keep"), b"prior").expect("write");

        assert!(write_image(&blocked, b"png").is_err());
        assert_eq!(fs::read(blocked.join("keep")).expect("read"), b"prior");
        assert_eq!(fs::read_dir(dir.path()).expect("ls").count(), 1);
    }
}
