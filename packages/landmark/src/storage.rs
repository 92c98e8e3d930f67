//! On-disk storage for generated images.

use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{LandmarkError, Result};
use crate::traits::image_generator::ImageStream;

/// Writes image streams to uniquely named files in one directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    output_dir: PathBuf,
    extension: String,
}

impl ImageStore {
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// A fresh path: 128 random bits, hex encoded.
    pub fn next_path(&self) -> PathBuf {
        let name = format!("{}.{}", Uuid::new_v4().simple(), self.extension);
        self.output_dir.join(name)
    }

    /// Drain `stream` into a new file and return its path.
    ///
    /// A stream error or an empty stream fails the save as `Generation`;
    /// any failure after the file is created removes the partial file.
    pub async fn save(&self, stream: ImageStream) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).await?;

        let path = self.next_path();
        let file = fs::File::create(&path).await?;

        match write_stream(file, stream).await {
            Ok(written) => {
                debug!(path = %path.display(), bytes = written, "Image saved");
                Ok(path)
            }
            Err(e) => {
                discard(&path).await;
                Err(e)
            }
        }
    }
}

async fn write_stream(mut file: fs::File, mut stream: ImageStream) -> Result<usize> {
    let mut written = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(LandmarkError::Generation)?;
        file.write_all(&chunk).await?;
        written += chunk.len();
    }

    if written == 0 {
        return Err(LandmarkError::Generation("image stream was empty".into()));
    }

    file.flush().await?;
    Ok(written)
}

async fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "Failed to remove partial image");
    }
}
