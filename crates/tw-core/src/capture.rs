//! Screenshot artifact capture.
//!
//! On trip the capturer asks the host to write a full-screen image to a
//! deterministic, timestamped path under the configured output
//! directory. Fire-and-forget: no retry, no completion check. Two
//! captures within the same wall-clock second collide on filename;
//! accepted limitation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tw_common::Result;

use crate::hosts::CaptureHost;

/// Artifact filename for a capture at `at`, local time, second
/// resolution, zero-padded.
pub fn artifact_filename(at: DateTime<Local>) -> String {
    format!("Screenshot_{}.png", at.format("%Y-%m-%d-%H-%M-%S"))
}

/// Requests screenshot writes from the host.
#[derive(Debug)]
pub struct ArtifactCapturer<C: CaptureHost> {
    host: C,
    output_dir: PathBuf,
}

impl<C: CaptureHost> ArtifactCapturer<C> {
    pub fn new(host: C, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            host,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Access the underlying capture host.
    pub fn host(&self) -> &C {
        &self.host
    }

    /// Request a capture to `output_dir/Screenshot_<now>.png`.
    ///
    /// The filename is computed at call time. Returns the requested
    /// path; the core does not verify the file was written.
    pub fn capture(&mut self) -> Result<PathBuf> {
        let path = self.output_dir.join(artifact_filename(Local::now()));
        self.host.capture_screen_to_file(&path)?;
        Ok(path)
    }
}
