//! Error types for the mammography report MCP server

use thiserror::Error;

/// Result type alias for the report server
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the report server
#[derive(Error, Debug)]
pub enum Error {
    /// Document file not found
    #[error("Document not found: {path}")]
    DocumentNotFound { path: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// PDF is password protected and no password was provided
    #[error("PDF is password protected")]
    PasswordRequired,

    /// Page out of bounds
    #[error("Page {page} out of bounds (total: {total})")]
    PageOutOfBounds { page: u32, total: u32 },

    /// Source resolution error
    #[error("Failed to resolve source: {reason}")]
    SourceResolution { reason: String },

    /// Base64 decode error
    #[error("Invalid base64 data: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// No bitmap could be produced for a page
    #[error("Failed to render page {page}: {reason}")]
    RenderSurface { page: u32, reason: String },

    /// OCR worker could not be created
    #[error("OCR engine initialization failed: {reason}")]
    OcrInit { reason: String },

    /// OCR worker failed on a page
    #[error("OCR failed on page {page}: {reason}")]
    OcrRecognition { page: u32, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Path access denied (outside allowed resource directories)
    #[error("Path access denied: {path}")]
    PathAccessDenied { path: String },

    /// Document larger than the configured limit
    #[error("Document too large: {size} bytes (max: {max_size} bytes)")]
    DocumentTooLarge { size: u64, max_size: u64 },

    /// Merge called without any extraction
    #[error("At least one extraction is required to merge")]
    EmptyMerge,

    /// Structured extraction violates the schema
    #[error("Invalid extraction at index {index}: {reason}")]
    InvalidExtraction { index: usize, reason: String },

    /// Single structured extraction violates the schema
    #[error("Invalid extraction: {reason}")]
    ExtractionSchema { reason: String },

    /// Blocking page task panicked or was cancelled
    #[error("Blocking task failed: {reason}")]
    BlockingTask { reason: String },

    /// Extraction pipeline received an input its current state does not accept
    #[error("Invalid pipeline transition from {state} on {input}")]
    InvalidTransition { state: String, input: String },
}

impl Error {
    /// Return a sanitized error message safe to send to clients.
    /// Internal details (paths, library errors, file sizes) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::DocumentNotFound { .. } => "Document not found".to_string(),
            Error::InvalidPdf { .. } => "Invalid PDF file".to_string(),
            Error::PasswordRequired => "PDF is password protected".to_string(),
            Error::PageOutOfBounds { page, total } => {
                format!("Page {} out of bounds (total: {})", page, total)
            }
            Error::SourceResolution { .. } => "Failed to resolve document source".to_string(),
            Error::Base64Decode(_) => "Invalid base64 data".to_string(),
            Error::Io(_) => "I/O error".to_string(),
            Error::Pdfium { .. } => "PDF processing error".to_string(),
            Error::RenderSurface { page, .. } => format!("Failed to render page {}", page),
            Error::OcrInit { .. } => "OCR engine unavailable".to_string(),
            Error::OcrRecognition { page, .. } => format!("OCR failed on page {}", page),
            Error::Serialization(_) => "Serialization error".to_string(),
            Error::PathAccessDenied { .. } => "Access denied".to_string(),
            Error::DocumentTooLarge { max_size, .. } => {
                format!("Document exceeds maximum size of {} bytes", max_size)
            }
            Error::EmptyMerge => "At least one extraction is required".to_string(),
            Error::InvalidExtraction { index, reason } => {
                format!("Invalid extraction at index {}: {}", index, reason)
            }
            Error::ExtractionSchema { reason } => format!("Invalid extraction: {}", reason),
            Error::BlockingTask { .. } => "Internal processing error".to_string(),
            Error::InvalidTransition { .. } => "Internal extraction error".to_string(),
        }
    }
}
