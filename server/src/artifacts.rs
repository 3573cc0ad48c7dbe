//! Disk-backed store for generated image batches.
//!
//! Each batch gets its own directory named by a fresh UUID; files inside use
//! the sanitized subject plus a style suffix. Reads go through a strict name
//! check so the store only ever serves files it could have written.

use souschef_core::image::ImageStyle;
use std::fs;
use std::io;
use std::path::PathBuf;
use uuid::Uuid;

/// On-disk image batch store.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Build the store from environment variables.
    ///
    /// Optional:
    /// - `SOUSCHEF_IMAGE_DIR`: batch root (default: "~/.souschef/images")
    pub fn from_env() -> Self {
        let root = std::env::var("SOUSCHEF_IMAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_root());
        Self::new(root)
    }

    fn default_root() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".souschef").join("images"))
            .unwrap_or_else(|| PathBuf::from("generated_images"))
    }

    /// Write one artifact into its batch directory.
    pub fn save(&self, batch_id: Uuid, file_name: &str, data: &[u8]) -> io::Result<()> {
        let dir = self.root.join(batch_id.to_string());
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(file_name), data)
    }

    /// Read one artifact back as bytes plus content type.
    ///
    /// Returns None for unknown batches, missing files, and any name the
    /// store would never have written.
    pub fn open(&self, batch_id: Uuid, file_name: &str) -> Option<(Vec<u8>, &'static str)> {
        if !is_safe_artifact_name(file_name) {
            return None;
        }
        let content_type = content_type_for(file_name)?;
        let path = self.root.join(batch_id.to_string()).join(file_name);
        let data = fs::read(path).ok()?;
        Some((data, content_type))
    }
}

/// Build the artifact file name for one rendered subject.
///
/// Whitespace becomes `_` and anything outside `[A-Za-z0-9_-]` is dropped;
/// the style suffix keeps ingredient and dish files distinct even for the
/// same subject.
pub fn artifact_file_name(subject: &str, style: ImageStyle, extension: &str) -> String {
    let stem: String = subject
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    let stem = if stem.is_empty() {
        "item".to_string()
    } else {
        stem
    };
    format!("{}_{}.{}", stem, style.artifact_suffix(), extension)
}

fn is_safe_artifact_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

fn content_type_for(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext {
        "png" => Some("image/png"),
        "jpg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_open_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());
        let batch = Uuid::new_v4();

        store.save(batch, "basil_image.png", b"bytes").unwrap();
        let (data, content_type) = store.open(batch, "basil_image.png").unwrap();
        assert_eq!(data, b"bytes");
        assert_eq!(content_type, "image/png");
    }

    #[test]
    fn test_open_unknown_batch_is_none() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());
        assert!(store.open(Uuid::new_v4(), "basil_image.png").is_none());
    }

    #[test]
    fn test_open_rejects_unsafe_names() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());
        let batch = Uuid::new_v4();

        assert!(store.open(batch, "../secret.png").is_none());
        assert!(store.open(batch, "a/../b.png").is_none());
        assert!(store.open(batch, ".hidden.png").is_none());
        assert!(store.open(batch, "").is_none());
        assert!(store.open(batch, "notes.txt").is_none());
    }

    #[test]
    fn test_artifact_file_names() {
        assert_eq!(
            artifact_file_name("Red Pepper", ImageStyle::IngredientPhoto, "png"),
            "Red_Pepper_image.png"
        );
        assert_eq!(
            artifact_file_name("Pesto Pasta", ImageStyle::DishPhoto, "jpg"),
            "Pesto_Pasta_final.jpg"
        );
        // Non-ASCII characters are dropped rather than escaped.
        assert_eq!(
            artifact_file_name("crème fraîche", ImageStyle::IngredientPhoto, "png"),
            "crme_frache_image.png"
        );
        assert_eq!(
            artifact_file_name("???", ImageStyle::DishPhoto, "png"),
            "item_final.png"
        );
    }

    #[test]
    fn test_generated_names_pass_the_read_check() {
        assert!(is_safe_artifact_name(&artifact_file_name(
            "Red Pepper",
            ImageStyle::IngredientPhoto,
            "png"
        )));
        assert!(is_safe_artifact_name(&artifact_file_name(
            "???",
            ImageStyle::DishPhoto,
            "webp"
        )));
    }
}
