//! Photo upload acceptance and storage.
//!
//! # Responsibility
//! - Decide whether an uploaded file is an acceptable photo.
//! - Sanitize client-supplied file names before they touch the disk.
//! - Write accepted photos into the upload directory.
//!
//! # Invariants
//! - Sanitized names never contain path separators or leading dots.
//! - Rejected uploads are skipped silently and write nothing.
//! - Same-named uploads overwrite each other; there is no collision handling.

use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Extensions accepted for student photos, compared case-insensitively.
pub const ALLOWED_PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

static UNSAFE_FILENAME_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("valid filename regex"));

/// Failure writing an accepted photo to disk.
#[derive(Debug)]
pub enum PhotoError {
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for PhotoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create upload directory `{}`: {source}",
                path.display()
            ),
            Self::Write { path, source } => {
                write!(f, "failed to write photo `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for PhotoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

/// Raw photo part taken from a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// File name as reported by the client; may be empty or hostile.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Upload directory together with the photo acceptance rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the upload directory if it is missing.
    pub fn ensure_dir(&self) -> Result<(), PhotoError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| PhotoError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Returns the path an upload would be written to, or `None` when the
    /// upload is not an acceptable photo.
    pub fn target_path(&self, file_name: &str) -> Option<PathBuf> {
        if !is_allowed_photo(file_name) {
            return None;
        }
        let safe_name = secure_filename(file_name);
        if safe_name.is_empty() {
            return None;
        }
        Some(self.dir.join(safe_name))
    }

    /// Writes an acceptable photo and returns its stored path.
    ///
    /// Returns `Ok(None)` without touching the disk for rejected uploads.
    pub fn save(&self, upload: &PhotoUpload) -> Result<Option<String>, PhotoError> {
        let Some(path) = self.target_path(&upload.file_name) else {
            debug!("event=photo_save module=upload status=skipped reason=not_allowed");
            return Ok(None);
        };

        if let Err(source) = std::fs::write(&path, &upload.bytes) {
            error!(
                "event=photo_save module=upload status=error error_code=photo_write_failed error={}",
                source
            );
            return Err(PhotoError::Write { path, source });
        }

        debug!(
            "event=photo_save module=upload status=ok bytes={}",
            upload.bytes.len()
        );
        Ok(Some(path.to_string_lossy().into_owned()))
    }
}

/// Returns whether `file_name` carries an allowed photo extension.
pub fn is_allowed_photo(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, extension)) => {
            let extension = extension.to_ascii_lowercase();
            ALLOWED_PHOTO_EXTENSIONS.contains(&extension.as_str())
        }
        None => false,
    }
}

/// Reduces a client file name to a safe single path component.
///
/// Path separators and whitespace collapse to `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped, and leading/trailing `.`/`_` are stripped.
/// The result may be empty.
pub fn secure_filename(file_name: &str) -> String {
    let spaced = file_name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_FILENAME_CHARS_RE.replace_all(&joined, "");
    cleaned.trim_matches(|c: char| c == '.' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::{is_allowed_photo, secure_filename, PhotoStore, PhotoUpload};

    #[test]
    fn allowed_extensions_are_case_insensitive() {
        assert!(is_allowed_photo("me.PNG"));
        assert!(is_allowed_photo("archive.tar.jpeg"));
        assert!(!is_allowed_photo("me.bmp"));
        assert!(!is_allowed_photo("png"));
        assert!(!is_allowed_photo(""));
    }

    #[test]
    fn secure_filename_strips_traversal_and_odd_characters() {
        assert_eq!(secure_filename("../../etc/passwd.png"), "etc_passwd.png");
        assert_eq!(secure_filename("my photo (1).jpg"), "my_photo_1.jpg");
        assert_eq!(secure_filename("C:\\Users\\kid\\pic.gif"), "C_Users_kid_pic.gif");
        assert_eq!(secure_filename("..."), "");
    }

    #[test]
    fn save_writes_allowed_photo_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path().join("uploads"));
        store.ensure_dir().unwrap();

        let stored = store
            .save(&PhotoUpload {
                file_name: "../face.jpg".to_string(),
                bytes: b"jpeg-bytes".to_vec(),
            })
            .unwrap()
            .unwrap();

        let expected = dir.path().join("uploads").join("face.jpg");
        assert_eq!(stored, expected.to_string_lossy());
        assert_eq!(std::fs::read(expected).unwrap(), b"jpeg-bytes");
    }

    #[test]
    fn save_skips_disallowed_extension_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path());

        let stored = store
            .save(&PhotoUpload {
                file_name: "script.exe".to_string(),
                bytes: vec![1, 2, 3],
            })
            .unwrap();

        assert!(stored.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path().join("a").join("b"));
        store.ensure_dir().unwrap();
        store.ensure_dir().unwrap();
        assert!(store.dir().is_dir());
    }
}
