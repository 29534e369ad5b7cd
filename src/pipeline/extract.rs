//! Document text acquisition: text layer first, OCR for pages without one

use super::progress::{transition, ExtractionProgress, Input, Machine};
use crate::error::{Error, Result};
use crate::ocr::OcrEngine;
use crate::pdf::{DocumentLoader, PageSource};
use serde::Serialize;
use std::sync::Arc;

/// Separator placed between the texts of consecutive pages
pub const PAGE_SEPARATOR: &str = "\n\n";

/// One input file
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub data: Arc<[u8]>,
}

impl Document {
    pub fn new(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Byte size of the raw document
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Pipeline output for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub name: String,
    /// Joined page texts, trimmed. Empty when nothing was readable.
    pub text: String,
    pub page_count: u32,
    /// Pages that went through OCR
    pub ocr_pages: Vec<u32>,
    /// Pages that contributed no text, even after OCR
    pub empty_pages: Vec<u32>,
}

impl ExtractedDocument {
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Receives progress snapshots. Called synchronously; must not block.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: &ExtractionProgress);
}

impl<F> ProgressObserver for F
where
    F: Fn(&ExtractionProgress) + Send + Sync,
{
    fn on_progress(&self, progress: &ExtractionProgress) {
        self(progress)
    }
}

/// Join per-page texts with a blank line and trim the result
pub fn join_page_texts<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
        .trim()
        .to_string()
}

fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Drives documents through text-layer extraction with OCR fallback.
///
/// Pages are handled strictly in order, one at a time; the OCR engine is a
/// single shared worker.
#[derive(Clone)]
pub struct ExtractionPipeline {
    loader: Arc<dyn DocumentLoader>,
    ocr: Arc<OcrEngine>,
}

/// Machine plus the observer its snapshots go to
struct Run<'a> {
    machine: Machine,
    observer: Option<&'a dyn ProgressObserver>,
}

impl Run<'_> {
    fn apply(&mut self, input: Input) -> Result<()> {
        let (machine, events) = transition(&self.machine, input)?;
        self.machine = machine;
        if let Some(observer) = self.observer {
            for event in &events {
                observer.on_progress(event);
            }
        }
        Ok(())
    }

    /// Record a fatal error in the machine and hand it back
    fn fail(&mut self, err: Error) -> Error {
        if let Err(e) = self.apply(Input::Fail {
            reason: err.to_string(),
        }) {
            tracing::debug!(error = %e, "Failure recorded on terminal state");
        }
        err
    }
}

impl ExtractionPipeline {
    pub fn new(loader: Arc<dyn DocumentLoader>, ocr: Arc<OcrEngine>) -> Self {
        Self { loader, ocr }
    }

    pub fn ocr(&self) -> &Arc<OcrEngine> {
        &self.ocr
    }

    /// Extract the text of one document
    pub async fn extract(
        &self,
        document: &Document,
        password: Option<&str>,
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<ExtractedDocument> {
        let mut run = Run {
            machine: Machine::new(),
            observer,
        };
        run.apply(Input::Read)?;

        let loader = self.loader.clone();
        let data = document.data.clone();
        let password = password.map(str::to_string);
        let loaded = tokio::task::spawn_blocking(move || loader.load(data, password.as_deref()))
            .await
            .map_err(join_error)
            .and_then(|result| result);
        let source = match loaded {
            Ok(source) => source,
            Err(e) => return Err(run.fail(e)),
        };

        match self.extract_pages(&document.name, source, &mut run).await {
            Ok(extracted) => Ok(extracted),
            Err(e) => Err(run.fail(e)),
        }
    }

    /// Extract the text of an already loaded document
    pub async fn extract_source(
        &self,
        name: &str,
        source: Arc<dyn PageSource>,
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<ExtractedDocument> {
        let mut run = Run {
            machine: Machine::new(),
            observer,
        };
        run.apply(Input::Read)?;
        match self.extract_pages(name, source, &mut run).await {
            Ok(extracted) => Ok(extracted),
            Err(e) => Err(run.fail(e)),
        }
    }

    async fn extract_pages(
        &self,
        name: &str,
        source: Arc<dyn PageSource>,
        run: &mut Run<'_>,
    ) -> Result<ExtractedDocument> {
        let page_count = source.page_count();
        run.apply(Input::Loaded {
            total_pages: page_count,
        })?;
        tracing::debug!(document = %name, page_count, "Document loaded");

        let mut texts: Vec<String> = Vec::with_capacity(page_count as usize);
        let mut ocr_pages = Vec::new();
        let mut empty_pages = Vec::new();

        for page in 1..=page_count {
            run.apply(Input::BeginPage)?;

            let text = blocking(&source, move |source| source.page_text(page)).await?;
            if has_content(&text) {
                run.apply(Input::TextRead { has_text: true })?;
                texts.push(text);
                continue;
            }
            run.apply(Input::TextRead { has_text: false })?;

            tracing::debug!(document = %name, page, "No text layer, falling back to OCR");
            let bitmap = blocking(&source, move |source| source.render_page(page)).await?;
            let recognized = self.ocr.recognize(&bitmap).await?;
            run.apply(Input::OcrRead)?;
            ocr_pages.push(page);

            if has_content(&recognized) {
                texts.push(recognized);
            } else {
                tracing::debug!(document = %name, page, "OCR found no text");
                empty_pages.push(page);
            }
        }

        run.apply(Input::Join)?;
        let text = join_page_texts(&texts);
        run.apply(Input::Finish)?;

        tracing::info!(
            document = %name,
            page_count,
            ocr_pages = ocr_pages.len(),
            chars = text.len(),
            "Extraction complete"
        );

        Ok(ExtractedDocument {
            name: name.to_string(),
            text,
            page_count,
            ocr_pages,
            empty_pages,
        })
    }

    /// Extract documents one after another. A failure only affects its own entry.
    pub async fn extract_batch(
        &self,
        documents: &[Document],
        observer: Option<&dyn ProgressObserver>,
    ) -> Vec<Result<ExtractedDocument>> {
        let mut results = Vec::with_capacity(documents.len());
        for document in documents {
            let result = self.extract(document, None, observer).await;
            if let Err(e) = &result {
                tracing::warn!(document = %document.name, error = %e, "Extraction failed");
            }
            results.push(result);
        }
        results
    }
}

/// Run blocking page work on the blocking thread pool
async fn blocking<T, F>(source: &Arc<dyn PageSource>, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn PageSource) -> Result<T> + Send + 'static,
{
    let source = source.clone();
    tokio::task::spawn_blocking(move || f(source.as_ref()))
        .await
        .map_err(join_error)?
}

fn join_error(e: tokio::task::JoinError) -> Error {
    Error::BlockingTask {
        reason: e.to_string(),
    }
}
