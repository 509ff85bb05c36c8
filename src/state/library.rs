use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::PathBuf;

use super::data::PlantImage;
use crate::error::{GardenError, Result};

/// The Library manages the SQLite plant catalog.
/// It stores one row per saved photo with its identification results.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

const SELECT_COLUMNS: &str = "SELECT uri, name, species, description, watering, watering_value, \
     watering_unit, poisonous_to_humans, poisonous_to_pets, scientific_name, family, sunlight, \
     thumbnail_path FROM plants";

impl Library {
    /// Open the catalog at its default location.
    ///
    /// The database file is created in the user's data directory:
    /// - Linux: ~/.local/share/my-garden/garden.db
    /// - macOS: ~/Library/Application Support/my-garden/garden.db
    /// - Windows: %APPDATA%\my-garden\garden.db
    pub fn new() -> Result<Self> {
        Self::open(Self::default_db_path()?)
    }

    /// Open (or create) the catalog at an explicit path
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        tracing::debug!("📁 Catalog opened at: {}", db_path.display());

        let library = Library { conn, db_path };
        library.init_schema()?;

        Ok(library)
    }

    /// Get the path where the catalog is stored by default
    pub fn default_db_path() -> Result<PathBuf> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(GardenError::NoDirectory("data"))?;

        path.push("my-garden");
        path.push("garden.db");
        Ok(path)
    }

    /// Create tables and indexes if they don't exist yet
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS plants (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                uri                 TEXT NOT NULL UNIQUE,
                name                TEXT NOT NULL,
                species             TEXT NOT NULL,
                description         TEXT,
                watering            TEXT,
                watering_value      TEXT,
                watering_unit       TEXT,
                poisonous_to_humans INTEGER,
                poisonous_to_pets   INTEGER,
                scientific_name     TEXT,
                family              TEXT,
                sunlight            TEXT,
                thumbnail_path      TEXT,
                saved_at            INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_plants_saved_at
             ON plants(saved_at DESC)",
            [],
        )?;

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    pub fn image_count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM plants", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Save a photo into the catalog and return its row id.
    /// Returns None if an entry with the same uri already exists.
    pub fn save_image(&self, image: &PlantImage) -> Result<Option<i64>> {
        let result = self.conn.execute(
            "INSERT INTO plants (uri, name, species, description, watering, watering_value,
                watering_unit, poisonous_to_humans, poisonous_to_pets, scientific_name, family,
                sunlight, thumbnail_path, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                image.uri,
                image.name,
                image.species,
                image.description,
                image.watering,
                image.watering_value,
                image.watering_unit,
                image.poisonous_to_humans,
                image.poisonous_to_pets,
                image.scientific_name,
                image.family,
                image.sunlight,
                image.thumbnail_path,
                chrono::Utc::now().timestamp_micros(),
            ],
        );

        match result {
            Ok(_) => Ok(Some(self.conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Record the cached thumbnail for a saved photo
    pub fn set_thumbnail(&self, image_id: i64, thumbnail_path: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE plants SET thumbnail_path = ?1 WHERE id = ?2",
            params![thumbnail_path, image_id],
        )?;
        Ok(())
    }

    /// Get every saved photo, newest first
    pub fn get_images(&self) -> Result<Vec<PlantImage>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY saved_at DESC, id DESC"))?;

        let images = stmt
            .query_map([], plant_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(images)
    }

    pub fn get_image(&self, uri: &str) -> Result<Option<PlantImage>> {
        let image = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE uri = ?1"),
                [uri],
                plant_from_row,
            )
            .optional()?;
        Ok(image)
    }

    /// Delete a photo from the catalog by uri.
    ///
    /// The cached thumbnail goes with it; the photo file itself is left
    /// alone. Returns whether a row existed.
    pub fn delete_image(&self, uri: &str) -> Result<bool> {
        let thumbnail: Option<String> = self
            .conn
            .query_row(
                "SELECT thumbnail_path FROM plants WHERE uri = ?1",
                [uri],
                |row| row.get(0),
            )
            .optional()?
            .flatten();

        let deleted = self.conn.execute("DELETE FROM plants WHERE uri = ?1", [uri])?;

        if let Some(path) = thumbnail {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("⚠️  Could not remove thumbnail {}: {}", path, e);
            }
        }

        Ok(deleted > 0)
    }
}

fn plant_from_row(row: &Row<'_>) -> rusqlite::Result<PlantImage> {
    Ok(PlantImage {
        uri: row.get(0)?,
        name: row.get(1)?,
        species: row.get(2)?,
        description: row.get(3)?,
        watering: row.get(4)?,
        watering_value: row.get(5)?,
        watering_unit: row.get(6)?,
        poisonous_to_humans: row.get(7)?,
        poisonous_to_pets: row.get(8)?,
        scientific_name: row.get(9)?,
        family: row.get(10)?,
        sunlight: row.get(11)?,
        thumbnail_path: row.get(12)?,
    })
}

/// Load every photo on a blocking thread.
/// rusqlite::Connection is not Send, so each task opens its own connection.
pub async fn load_images(db_path: PathBuf) -> Result<Vec<PlantImage>> {
    tokio::task::spawn_blocking(move || Library::open(&db_path)?.get_images()).await?
}

/// Delete one photo on a blocking thread
pub async fn remove_image(db_path: PathBuf, uri: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || Library::open(&db_path)?.delete_image(&uri)).await?
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}
