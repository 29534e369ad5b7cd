//! PDF page access backed by PDFium: text layer reads and page rasterization

use crate::error::{Error, Result};
use pdfium_render::prelude::*;
use std::sync::Arc;

/// Fixed rasterization scale for OCR input (2x the page's point size)
pub const RENDER_SCALE: f32 = 2.0;

/// A rendered page, PNG encoded, ready for OCR
#[derive(Debug, Clone)]
pub struct PageBitmap {
    /// Page number (1-indexed)
    pub page: u32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// PNG encoded image data
    pub png: Vec<u8>,
}

/// Page-level access to a loaded document.
///
/// Methods are blocking; the extraction pipeline calls them from the
/// blocking thread pool.
pub trait PageSource: Send + Sync {
    /// Total number of pages
    fn page_count(&self) -> u32;

    /// Embedded text of a page (1-indexed). Empty when the page has no text layer.
    fn page_text(&self, page: u32) -> Result<String>;

    /// Rasterize a page (1-indexed) at [`RENDER_SCALE`]
    fn render_page(&self, page: u32) -> Result<PageBitmap>;
}

/// Turns raw document bytes into a [`PageSource`]
pub trait DocumentLoader: Send + Sync {
    fn load(&self, data: Arc<[u8]>, password: Option<&str>) -> Result<Arc<dyn PageSource>>;
}

/// Loader producing [`PdfReader`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumLoader;

impl DocumentLoader for PdfiumLoader {
    fn load(&self, data: Arc<[u8]>, password: Option<&str>) -> Result<Arc<dyn PageSource>> {
        Ok(Arc::new(PdfReader::open_bytes(data, password)?))
    }
}

/// Bind to PDFium (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        tracing::debug!(path = %path, "Loading PDFium from PDFIUM_DYNAMIC_LIB_PATH");
        let bindings = Pdfium::bind_to_library(&path).map_err(|e| Error::Pdfium {
            reason: format!("Failed to load PDFium from {}: {}", path, e),
        })?;
        return Ok(Pdfium::new(bindings));
    }

    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Reject data that does not carry a PDF header
pub fn validate_pdf_header(data: &[u8]) -> Result<()> {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: "Not a valid PDF file".to_string(),
        });
    }
    Ok(())
}

/// Space-join the text items of a page, dropping empty ones
pub fn join_text_items<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .filter(|item| !item.as_ref().is_empty())
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn check_page(page: u32, total: u32) -> Result<()> {
    if page < 1 || page > total {
        return Err(Error::PageOutOfBounds { page, total });
    }
    Ok(())
}

/// PDF reader using PDFium.
///
/// Holds the document bytes and reopens the document per operation, since the
/// PDFium handle cannot cross threads.
pub struct PdfReader {
    data: Arc<[u8]>,
    password: Option<String>,
    page_count: u32,
}

impl PdfReader {
    /// Open a PDF from bytes, reading only the page count up front
    pub fn open_bytes(data: Arc<[u8]>, password: Option<&str>) -> Result<Self> {
        validate_pdf_header(&data)?;

        let pdfium = create_pdfium()?;
        let page_count = {
            let document = pdfium
                .load_pdf_from_byte_slice(&data, password)
                .map_err(Self::map_pdfium_error)?;
            document.pages().len() as u32
        };

        Ok(Self {
            data,
            password: password.map(str::to_string),
            page_count,
        })
    }

    /// Run `f` against one page of a freshly loaded document
    fn with_page<T>(&self, page_num: u32, f: impl FnOnce(&PdfPage<'_>) -> Result<T>) -> Result<T> {
        check_page(page_num, self.page_count)?;

        let pdfium = create_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(&self.data, self.password.as_deref())
            .map_err(Self::map_pdfium_error)?;
        let page = document
            .pages()
            .get((page_num - 1) as PdfPageIndex)
            .map_err(|e| Error::Pdfium {
                reason: format!("Failed to get page {}: {}", page_num, e),
            })?;

        f(&page)
    }

    /// Map PDFium errors to our error type
    fn map_pdfium_error(err: PdfiumError) -> Error {
        match err {
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
                Error::PasswordRequired
            }
            _ => Error::Pdfium {
                reason: format!("{}", err),
            },
        }
    }
}

impl PageSource for PdfReader {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_text(&self, page_num: u32) -> Result<String> {
        self.with_page(page_num, |page| {
            let items = page
                .objects()
                .iter()
                .filter_map(|object| object.as_text_object().map(|text| text.text()));
            Ok(join_text_items(items))
        })
    }

    fn render_page(&self, page_num: u32) -> Result<PageBitmap> {
        self.with_page(page_num, |page| {
            let config = PdfRenderConfig::new()
                .scale_page_by_factor(RENDER_SCALE)
                .render_form_data(true)
                .render_annotations(true);

            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| Error::RenderSurface {
                    page: page_num,
                    reason: e.to_string(),
                })?;

            let image = bitmap.as_image();
            let mut png = Vec::new();
            image
                .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
                .map_err(|e| Error::RenderSurface {
                    page: page_num,
                    reason: format!("PNG encoding failed: {}", e),
                })?;

            Ok(PageBitmap {
                page: page_num,
                width: image.width(),
                height: image.height(),
                png,
            })
        })
    }
}
