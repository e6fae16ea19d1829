use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["txt", "pdf", "doc", "docx"];
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A course outline file received with a create-course request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl OutlineUpload {
    /// Appends a chunk, enforcing the upload size cap.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> AppResult<()> {
        if self.bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "Outline file exceeds {} MB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }
}

pub fn is_allowed(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Reduces a client-supplied name to a safe single path component.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    // Browsers on Windows may send the full client path.
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Stores outline files on disk and reads back their text.
#[derive(Debug, Clone)]
pub struct OutlineStore {
    upload_dir: PathBuf,
}

impl OutlineStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Writes the upload as `{course_id}_{filename}`. Disallowed or unnamed
    /// files are ignored and yield `None`.
    pub async fn save(&self, course_id: &str, upload: &OutlineUpload) -> AppResult<Option<String>> {
        let Some(filename) = sanitize_filename(&upload.filename).filter(|f| is_allowed(f)) else {
            log::info!("Ignoring outline upload {:?}", upload.filename);
            return Ok(None);
        };

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        let path = self.upload_dir.join(format!("{}_{}", course_id, filename));
        tokio::fs::write(&path, &upload.bytes).await?;
        log::info!("Saved outline for course {} to {}", course_id, path.display());

        Ok(Some(path.to_string_lossy().into_owned()))
    }

    /// Text of a stored outline. Only UTF-8 `.txt` files are readable.
    pub async fn read_text(&self, path: &str) -> Option<String> {
        let is_text = Path::new(path)
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        if !is_text {
            return None;
        }

        match tokio::fs::read_to_string(path).await {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Could not read outline {}: {}", path, e);
                None
            }
        }
    }
}
