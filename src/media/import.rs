use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::thumbnail;
use crate::error::Result;
use crate::state::data::{PlantImage, PlantMetadata};
use crate::state::library::Library;

/// Species shown until the photo has been identified
pub const UNKNOWN_SPECIES: &str = "Unknown species";

/// Photo extensions we decode
const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff"];

/// Result of a folder import operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub imported_count: usize,
    pub skipped_count: usize,
}

fn is_photo(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Build the catalog entry for one photo, reading `<stem>.json` if present
fn plant_for(path: &Path) -> PlantImage {
    let name = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let mut plant = PlantImage::new(path.to_string_lossy(), name, UNKNOWN_SPECIES);

    let sidecar = path.with_extension("json");
    if sidecar.is_file() {
        match std::fs::read_to_string(&sidecar)
            .map_err(crate::error::GardenError::from)
            .and_then(|json| Ok(PlantMetadata::from_json(&json)?))
        {
            Ok(meta) => plant.apply_metadata(meta),
            Err(e) => tracing::warn!("⚠️  Ignoring sidecar {}: {}", sidecar.display(), e),
        }
    }

    plant
}

/// Import every photo under `folder` into the catalog at `db_path`
pub fn import_folder(folder: &Path, db_path: &Path, thumbnail_dir: &Path) -> Result<ImportResult> {
    // Open a new database connection for this background thread
    let library = Library::open(db_path)?;
    let mut result = ImportResult::default();

    tracing::info!("🔍 Scanning folder: {}", folder.display());

    // Walk the directory tree recursively
    for entry in WalkDir::new(folder)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_photo(path) {
            continue;
        }

        let plant = plant_for(path);
        if library.get_image(&plant.uri)?.is_some() {
            result.skipped_count += 1;
            continue;
        }

        let Some(image_id) = library.save_image(&plant)? else {
            result.skipped_count += 1;
            continue;
        };

        match thumbnail::generate_thumbnail(path, thumbnail_dir, image_id) {
            Ok(thumb) => library.set_thumbnail(image_id, &thumb.to_string_lossy())?,
            Err(e) => tracing::warn!("⚠️  No thumbnail for {}: {}", path.display(), e),
        }

        result.imported_count += 1;
        if result.imported_count % 100 == 0 {
            tracing::info!("⏳ Imported {} photos...", result.imported_count);
        }
    }

    tracing::info!(
        "✅ Import complete: {} new, {} skipped",
        result.imported_count,
        result.skipped_count
    );

    Ok(result)
}

/// Run `import_folder` on a blocking thread
pub async fn import_folder_async(
    folder: PathBuf,
    db_path: PathBuf,
    thumbnail_dir: PathBuf,
) -> Result<ImportResult> {
    tokio::task::spawn_blocking(move || import_folder(&folder, &db_path, &thumbnail_dir)).await?
}
