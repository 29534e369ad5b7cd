//! Tesseract OCR worker driven through the `tesseract` command line engine

use super::{OcrWorker, WorkerFactory};
use crate::error::{Error, Result};
use crate::pdf::PageBitmap;
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use tokio::process::Command;

/// OCR engine configuration
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Path to the `tesseract` executable
    pub binary: PathBuf,
    /// Directory holding `<lang>.traineddata` files (TESSDATA_PREFIX)
    pub tessdata_dir: Option<PathBuf>,
    /// Language code(s), e.g. "eng" or "eng+fra"
    pub language: String,
    /// Page segmentation mode
    pub page_segmentation_mode: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            tessdata_dir: None,
            language: "eng".to_string(),
            page_segmentation_mode: 3,
        }
    }
}

impl OcrConfig {
    /// Language data files this configuration needs, one per `+`-joined code
    fn missing_language_data(&self) -> Vec<String> {
        let Some(dir) = &self.tessdata_dir else {
            return Vec::new();
        };
        self.language
            .split('+')
            .filter(|lang| !lang.is_empty())
            .filter(|lang| !dir.join(format!("{}.traineddata", lang)).exists())
            .map(str::to_string)
            .collect()
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary);
        if let Some(dir) = &self.tessdata_dir {
            command.env("TESSDATA_PREFIX", dir);
        }
        command
    }
}

/// Creates a [`TesseractWorker`] after checking the engine and language data are present
pub struct TesseractFactory {
    config: OcrConfig,
}

impl TesseractFactory {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl WorkerFactory for TesseractFactory {
    async fn create(&self) -> Result<Box<dyn OcrWorker>> {
        let missing = self.config.missing_language_data();
        if !missing.is_empty() {
            return Err(Error::OcrInit {
                reason: format!("Language data not found for: {}", missing.join(", ")),
            });
        }

        let output = self
            .config
            .command()
            .arg("--version")
            .output()
            .await
            .map_err(|e| Error::OcrInit {
                reason: format!(
                    "Failed to run {}: {}",
                    self.config.binary.display(),
                    e
                ),
            })?;

        if !output.status.success() {
            return Err(Error::OcrInit {
                reason: format!("tesseract --version exited with {}", output.status),
            });
        }

        let version = String::from_utf8_lossy(&output.stdout);
        tracing::info!(
            version = %version.lines().next().unwrap_or_default(),
            language = %self.config.language,
            "Tesseract OCR worker ready"
        );

        Ok(Box::new(TesseractWorker {
            config: self.config.clone(),
        }))
    }
}

/// OCR worker that feeds page bitmaps to the Tesseract engine
pub struct TesseractWorker {
    config: OcrConfig,
}

impl TesseractWorker {
    fn recognition_args(&self, input: &std::path::Path) -> Vec<std::ffi::OsString> {
        vec![
            input.as_os_str().to_os_string(),
            "stdout".into(),
            "-l".into(),
            self.config.language.clone().into(),
            "--psm".into(),
            self.config.page_segmentation_mode.to_string().into(),
        ]
    }
}

#[async_trait]
impl OcrWorker for TesseractWorker {
    async fn recognize(&mut self, bitmap: &PageBitmap) -> Result<String> {
        let page = bitmap.page;
        let ocr_error = |reason: String| Error::OcrRecognition { page, reason };

        let mut input = tempfile::Builder::new()
            .prefix("mammo-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| ocr_error(format!("Failed to create temp file: {}", e)))?;
        input
            .write_all(&bitmap.png)
            .and_then(|_| input.flush())
            .map_err(|e| ocr_error(format!("Failed to write temp file: {}", e)))?;

        let output = self
            .config
            .command()
            .args(self.recognition_args(input.path()))
            .output()
            .await
            .map_err(|e| ocr_error(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            return Err(ocr_error(format!(
                "Tesseract failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!(page, chars = text.len(), "OCR recognized page");
        Ok(text)
    }
}
