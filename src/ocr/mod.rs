//! OCR engine adapter
//!
//! Owns at most one OCR worker for its lifetime. The worker is created on
//! first use; concurrent first callers all await the same creation.

mod tesseract;

pub use tesseract::{OcrConfig, TesseractFactory, TesseractWorker};

use crate::error::Result;
use crate::pdf::PageBitmap;
use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};

/// A live OCR worker. Serves one recognition at a time.
#[async_trait]
pub trait OcrWorker: Send {
    /// Recognize the text in a page bitmap
    async fn recognize(&mut self, bitmap: &PageBitmap) -> Result<String>;

    /// Release the worker's resources
    async fn terminate(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Creates the OCR worker on first use
#[async_trait]
pub trait WorkerFactory: Send + Sync {
    async fn create(&self) -> Result<Box<dyn OcrWorker>>;
}

/// Lazily initialized, process-scoped OCR engine
pub struct OcrEngine {
    factory: Box<dyn WorkerFactory>,
    worker: OnceCell<Mutex<Box<dyn OcrWorker>>>,
}

impl OcrEngine {
    pub fn new(factory: impl WorkerFactory + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            worker: OnceCell::new(),
        }
    }

    /// Engine backed by the Tesseract CLI
    pub fn tesseract(config: OcrConfig) -> Self {
        Self::new(TesseractFactory::new(config))
    }

    /// Whether the worker has been created
    pub fn is_initialized(&self) -> bool {
        self.worker.initialized()
    }

    /// Recognize a bitmap, creating the worker if this is the first call.
    ///
    /// A failed creation is returned to every caller awaiting it; the next
    /// call attempts creation again.
    pub async fn recognize(&self, bitmap: &PageBitmap) -> Result<String> {
        let worker = self
            .worker
            .get_or_try_init(|| async {
                tracing::info!("Creating OCR worker");
                let worker = self.factory.create().await?;
                Ok::<_, crate::error::Error>(Mutex::new(worker))
            })
            .await?;

        let mut worker = worker.lock().await;
        worker.recognize(bitmap).await
    }

    /// Terminate the worker if one was created
    pub async fn shutdown(self) -> Result<()> {
        if let Some(worker) = self.worker.into_inner() {
            tracing::info!("Terminating OCR worker");
            worker.into_inner().terminate().await?;
        }
        Ok(())
    }
}
