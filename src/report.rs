//! Progress lines printed while a batch runs.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

/// Writes one status line per event. Output failures are logged and ignored.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    /// Reporter on standard output.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Reporter<W> {
    /// Reporter on an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Gives back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = self
            .out
            .write_fmt(args)
            .and_then(|()| self.out.write_all(b"\n"))
        {
            debug!("Failed to write report line: {}", err);
        }
    }

    /// `Planned N assets.`
    pub fn planned(&mut self, total: usize) {
        self.line(format_args!("Planned {total} assets."));
    }

    /// Dry-run entry.
    pub fn dry_run(&mut self, idx: usize, total: usize, path: &Path, prompt: &str) {
        self.line(format_args!(
            "[{idx}/{total}] DRY: {} <- {prompt}",
            path.display()
        ));
    }

    /// Target already present.
    pub fn skipped(&mut self, idx: usize, total: usize, path: &Path) {
        self.line(format_args!(
            "[{idx}/{total}] SKIP existing {}",
            path.display()
        ));
    }

    /// About to fetch.
    pub fn generating(&mut self, idx: usize, total: usize, path: &Path) {
        self.line(format_args!("[{idx}/{total}] gen -> {}", path.display()));
    }

    /// Fetch succeeded.
    pub fn ok(&mut self, path: &Path) {
        self.line(format_args!("OK  -> {}", path.display()));
    }

    /// One attempt failed.
    pub fn attempt_failed(
        &mut self,
        attempt: u32,
        max_attempts: u32,
        path: &Path,
        err: &dyn fmt::Display,
    ) {
        self.line(format_args!(
            "ERR ({attempt}/{max_attempts}) {}: {err}",
            path.display()
        ));
    }

    /// Every attempt failed.
    pub fn failed(&mut self, path: &Path, err: &str) {
        self.line(format_args!("FAIL -> {}: {err}", path.display()));
    }

    /// Rescaled in place.
    pub fn rescaled(&mut self, path: &Path, width: u32, height: u32) {
        self.line(format_args!(
            "rescaled {} -> {width}x{height}",
            path.display()
        ));
    }

    /// Rescale failed.
    pub fn rescale_failed(&mut self, path: &Path, err: &dyn fmt::Display) {
        self.line(format_args!("rescale failed for {}: {err}", path.display()));
    }

    /// Converted one file; `rel` is relative to the scanned root.
    pub fn converted(&mut self, rel: &Path) {
        self.line(format_args!("WEBP {}", rel.display()));
    }

    /// Conversion target already present.
    pub fn convert_skipped(&mut self, rel: &Path) {
        self.line(format_args!("SKIP existing {}", rel.display()));
    }

    /// Conversion of one file failed.
    pub fn convert_failed(&mut self, path: &Path, err: &dyn fmt::Display) {
        self.line(format_args!("FAIL {}: {err}", path.display()));
    }

    /// Free-form message.
    pub fn note(&mut self, message: &str) {
        self.line(format_args!("{message}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_match_expected_format() {
        let mut reporter = Reporter::new(Vec::new());
        let path = Path::new("assets/tiles/grass_0.png");
        reporter.planned(3);
        reporter.dry_run(1, 3, path, "grass");
        reporter.skipped(2, 3, path);
        reporter.generating(3, 3, path);
        reporter.attempt_failed(1, 4, path, &"boom");
        reporter.ok(path);
        reporter.failed(path, "boom");
        reporter.rescaled(path, 512, 256);

        let text = String::from_utf8(reporter.into_inner()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Planned 3 assets.",
                "[1/3] DRY: assets/tiles/grass_0.png <- grass",
                "[2/3] SKIP existing assets/tiles/grass_0.png",
                "[3/3] gen -> assets/tiles/grass_0.png",
                "ERR (1/4) assets/tiles/grass_0.png: boom",
                "OK  -> assets/tiles/grass_0.png",
                "FAIL -> assets/tiles/grass_0.png: boom",
                "rescaled assets/tiles/grass_0.png -> 512x256",
            ]
        );
    }
}
