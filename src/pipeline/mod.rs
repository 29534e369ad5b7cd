//! Document extraction pipeline
//!
//! Per page: read the text layer; if it is empty, render the page and run OCR.
//! Progress is reported through a caller-supplied observer.

mod extract;
pub mod progress;

pub use extract::{
    join_page_texts, Document, ExtractedDocument, ExtractionPipeline, ProgressObserver,
    PAGE_SEPARATOR,
};
pub use progress::{transition, ExtractionProgress, ExtractionState, Input, Machine, Stage};
