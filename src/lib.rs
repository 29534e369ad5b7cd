//! Mammography Report MCP Server Library
//!
//! This crate provides MCP tools for mammography report processing:
//! - `extract_text`: Extract report text from PDFs, with OCR for scanned pages
//! - `get_extraction_schema`: JSON schema for structured report extraction
//! - `merge_extractions`: Merge per-document extractions into one report
//! - `list_pdfs`: List PDF files in a directory

pub mod error;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod report;
pub mod server;
pub mod source;

pub use error::{Error, Result};
pub use pipeline::{Document, ExtractedDocument, ExtractionPipeline, ExtractionProgress};
pub use report::{merge, MergedReport, StructuredExtraction};
pub use server::{
    run_server, run_server_with_config, DocumentSource, ExtractTextParams, ExtractTextResult,
    ListPdfsParams, ListPdfsResult, PdfFileInfo, ReportServer, ServerConfig,
};
