use std::fs;
use std::path::{Path, PathBuf};

pub const PDF_MIME: &str = "application/pdf";

/// Leading bytes of every PDF file.
const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// A local PDF picked for upload, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Not a PDF file: {file} ({mime})")]
    NotPdf { file: String, mime: String },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Path has no file name: {0}")]
    NoFileName(PathBuf),
}

impl PdfUpload {
    /// Load a file chosen by the user, refusing anything that is not a PDF.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| UploadError::NoFileName(path.to_path_buf()))?
            .to_string();

        let mime = guess_mime(&file_name);
        if mime != PDF_MIME {
            return Err(UploadError::NotPdf {
                file: file_name,
                mime,
            });
        }

        let bytes = fs::read(path).map_err(|source| UploadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(file_name, bytes)
    }

    /// Accept in-memory content only if it carries the PDF signature.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        if !bytes.starts_with(PDF_SIGNATURE) {
            return Err(UploadError::NotPdf {
                mime: guess_mime(&file_name),
                file: file_name,
            });
        }
        Ok(Self { file_name, bytes })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

fn guess_mime(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Turn a path dropped onto the terminal into a filesystem path.
///
/// Terminals paste dropped files either quoted (`'/tmp/my file.pdf'`) or
/// with escaped spaces (`/tmp/my\ file.pdf`).
pub fn dropped_path(raw: &str) -> PathBuf {
    let raw = raw.trim();
    let unquoted = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')));

    match unquoted {
        Some(inner) => PathBuf::from(inner),
        None => PathBuf::from(raw.replace("\\ ", " ")),
    }
}
