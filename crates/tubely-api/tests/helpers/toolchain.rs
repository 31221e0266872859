//! Scripted stand-in for ffprobe/ffmpeg.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tubely_processing::{faststart_output_path, MediaToolchain, ProbeError, RemuxError};

/// Reports a fixed ratio and "remuxes" by copying the input to the fast-start path.
pub struct FakeToolchain {
    ratio: Option<String>,
    fail_remux: bool,
    panic_remux: bool,
    probe_calls: AtomicUsize,
    remux_calls: AtomicUsize,
    probed_sizes: Mutex<Vec<u64>>,
}

impl FakeToolchain {
    pub fn with_ratio(ratio: &str) -> Self {
        Self {
            ratio: Some(ratio.to_string()),
            fail_remux: false,
            panic_remux: false,
            probe_calls: AtomicUsize::new(0),
            remux_calls: AtomicUsize::new(0),
            probed_sizes: Mutex::new(Vec::new()),
        }
    }

    pub fn landscape() -> Self {
        Self::with_ratio("16:9")
    }

    /// Probe fails as if no stream had usable dimensions.
    pub fn failing_probe() -> Self {
        Self {
            ratio: None,
            ..Self::landscape()
        }
    }

    /// Remux leaves a partial output file behind and then fails.
    pub fn failing_remux() -> Self {
        Self {
            fail_remux: true,
            ..Self::landscape()
        }
    }

    /// Remux leaves a partial output file behind and then panics.
    pub fn panicking_remux() -> Self {
        Self {
            panic_remux: true,
            ..Self::landscape()
        }
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn remux_calls(&self) -> usize {
        self.remux_calls.load(Ordering::SeqCst)
    }

    /// Size of the input file at each probe.
    pub fn probed_sizes(&self) -> Vec<u64> {
        self.probed_sizes.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaToolchain for FakeToolchain {
    async fn probe(&self, path: &Path) -> Result<String, ProbeError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        let size = tokio::fs::metadata(path)
            .await
            .map_err(ProbeError::Spawn)?
            .len();
        self.probed_sizes.lock().unwrap().push(size);

        self.ratio.clone().ok_or(ProbeError::NoVideoStream)
    }

    async fn remux(&self, path: &Path) -> Result<PathBuf, RemuxError> {
        self.remux_calls.fetch_add(1, Ordering::SeqCst);
        let output = faststart_output_path(path);

        if self.panic_remux {
            std::fs::write(&output, b"partial").map_err(RemuxError::Spawn)?;
            panic!("muxer crashed");
        }

        if self.fail_remux {
            tokio::fs::write(&output, b"partial")
                .await
                .map_err(RemuxError::Spawn)?;
            return Err(RemuxError::Spawn(io::Error::other("muxer crashed")));
        }

        tokio::fs::copy(path, &output)
            .await
            .map_err(RemuxError::Spawn)?;
        Ok(output)
    }
}
