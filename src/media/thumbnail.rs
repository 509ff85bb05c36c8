use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Size of generated thumbnails (square bound)
const THUMBNAIL_SIZE: u32 = 256;

/// Cache file for a catalog entry, named after its row id
pub fn thumbnail_path(cache_dir: &Path, image_id: i64) -> PathBuf {
    cache_dir.join(format!("{}.jpg", image_id))
}

/// Generate a gallery thumbnail for a photo.
/// Returns the path to the saved JPEG inside `cache_dir`.
pub fn generate_thumbnail(source: &Path, cache_dir: &Path, image_id: i64) -> Result<PathBuf> {
    fs::create_dir_all(cache_dir)?;

    let img = image::open(source)?;

    // Resize to thumbnail size, keeping aspect ratio
    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);

    let path = thumbnail_path(cache_dir, image_id);

    // JPEG has no alpha channel
    thumbnail.to_rgb8().save(&path)?;

    tracing::debug!("📸 Generated thumbnail: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generates_bounded_thumbnail() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("fern.png");
        image::RgbaImage::from_pixel(1024, 512, image::Rgba([20, 160, 60, 255]))
            .save(&source)
            .unwrap();

        let cache = dir.path().join("thumbs");
        let thumb = generate_thumbnail(&source, &cache, 7).unwrap();
        assert_eq!(thumb, cache.join("7.jpg"));

        let decoded = image::open(&thumb).unwrap();
        assert_eq!(decoded.width(), 256);
        assert_eq!(decoded.height(), 128);
    }

    #[test]
    fn test_unreadable_source_is_an_error() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("broken.jpg");
        std::fs::write(&source, b"not an image").unwrap();

        assert!(generate_thumbnail(&source, dir.path(), 1).is_err());
    }

    #[test]
    fn test_file_name_is_the_row_id() {
        let cache = Path::new("/cache/thumbnails");
        assert_eq!(thumbnail_path(cache, 42), PathBuf::from("/cache/thumbnails/42.jpg"));
    }
}
