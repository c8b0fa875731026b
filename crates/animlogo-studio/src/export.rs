//! Writing generated media to disk.

use std::path::{Path, PathBuf};

use tracing::info;

use animlogo_models::{GeneratedImage, GeneratedVideo};

use crate::error::StudioResult;

/// File name used for the logo image.
pub fn image_file_name(image: &GeneratedImage) -> String {
    format!("logo.{}", image.file_extension())
}

/// Write the logo into `dir`, creating it if needed.
pub async fn write_image(image: &GeneratedImage, dir: &Path) -> StudioResult<PathBuf> {
    write(dir, &image_file_name(image), image.data()).await
}

/// Write the animation into `dir`, creating it if needed.
pub async fn write_video(video: &GeneratedVideo, dir: &Path) -> StudioResult<PathBuf> {
    write(dir, video.file_name(), video.data()).await
}

async fn write(dir: &Path, file_name: &str, data: &[u8]) -> StudioResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, data).await?;
    info!(path = %path.display(), bytes = data.len(), "Wrote media file");
    Ok(path)
}
