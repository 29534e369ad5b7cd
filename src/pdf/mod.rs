//! PDF processing layer
//!
//! Page text and page rasterization through PDFium.

mod reader;

pub use reader::{
    join_text_items, validate_pdf_header, DocumentLoader, PageBitmap, PageSource, PdfReader,
    PdfiumLoader, RENDER_SCALE,
};
