// SPDX-License-Identifier: AGPL-3.0-or-later
//! File sink and terminal notifications

use std::path::{Path, PathBuf};

use xreadme_core::{Artifact, ArtifactSink, Notification, NotificationChannel, SinkError};

/// Writes artifacts into a directory under their suggested filename
pub struct FileSink {
    dir: PathBuf,
    written: Option<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: None,
        }
    }

    /// Path of the last artifact written
    pub fn written(&self) -> Option<&Path> {
        self.written.as_deref()
    }
}

impl ArtifactSink for FileSink {
    fn offer(&mut self, artifact: &Artifact) -> Result<(), SinkError> {
        let name = Path::new(&artifact.filename);
        if name.components().count() != 1 {
            return Err(SinkError::Rejected(format!(
                "filename must not contain a path: {}",
                artifact.filename
            )));
        }

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, &artifact.content)?;
        tracing::info!("Wrote {}", path.display());
        self.written = Some(path);
        Ok(())
    }
}

/// Prints notifications the way a toast would show them
#[derive(Default)]
pub struct TerminalChannel {
    pub quiet: bool,
}

impl NotificationChannel for TerminalChannel {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::ValidationError(message) => eprintln!("error: {message}"),
            Notification::GenerationSuccess { filename } => {
                if !self.quiet {
                    println!("{filename} generated successfully!");
                }
            }
        }
    }
}
