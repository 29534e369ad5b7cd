//! MCP Server implementation using rmcp

use crate::error::Error;
use crate::ocr::{OcrConfig, OcrEngine};
use crate::pdf::PdfiumLoader;
use crate::pipeline::{
    Document, ExtractedDocument, ExtractionPipeline, ExtractionProgress, ProgressObserver, Stage,
};
use crate::report::{merge, MergedReport, StructuredExtraction};
use crate::source::{resolve_base64, resolve_path, validate_path_access, BASE64_DEFAULT_NAME};
use anyhow::Result;
use rmcp::{
    handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars::JsonSchema, service::RequestContext, tool, tool_handler, tool_router, Peer,
    RoleServer, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Warning attached to results whose text came out empty
pub const NO_TEXT_WARNING: &str = "No readable text found";

/// Default document size limit (100 MiB)
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 100 * 1024 * 1024;

/// Document source specification
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum DocumentSource {
    /// File path (absolute or relative)
    Path {
        /// Path to the PDF file
        path: String,
    },
    /// Base64 encoded PDF data
    Base64 {
        /// Base64 encoded PDF content (standard alphabet)
        base64: String,
        /// Display name for the document, e.g. the original file name
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl<'de> serde::Deserialize<'de> for DocumentSource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        let Some(obj) = value.as_object() else {
            return Err(serde::de::Error::custom(format!(
                "Invalid source: expected an object with \"path\" or \"base64\", but got {}",
                match &value {
                    serde_json::Value::Array(_) => "an array",
                    serde_json::Value::String(_) => "a string",
                    serde_json::Value::Number(_) => "a number",
                    serde_json::Value::Bool(_) => "a boolean",
                    serde_json::Value::Null => "null",
                    _ => "unknown type",
                }
            )));
        };

        if let Some(v) = obj.get("path") {
            return match v.as_str() {
                Some(s) => Ok(DocumentSource::Path {
                    path: s.to_string(),
                }),
                None => Err(serde::de::Error::custom("\"path\" must be a string")),
            };
        }

        if let Some(v) = obj.get("base64") {
            let base64 = v
                .as_str()
                .ok_or_else(|| serde::de::Error::custom("\"base64\" must be a string"))?;
            let name = match obj.get("name") {
                None | Some(serde_json::Value::Null) => None,
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(_) => return Err(serde::de::Error::custom("\"name\" must be a string")),
            };
            return Ok(DocumentSource::Base64 {
                base64: base64.to_string(),
                name,
            });
        }

        let keys: Vec<&String> = obj.keys().collect();
        Err(serde::de::Error::custom(format!(
            "Invalid source: expected an object with \"path\" or \"base64\", but got keys: {:?}",
            keys
        )))
    }
}

/// Resource and engine configuration for the report server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directories to expose as PDF resources. When non-empty, path sources
    /// and `list_pdfs` are restricted to them.
    pub resource_dirs: Vec<PathBuf>,
    /// Maximum accepted document size in bytes (default: 100MB)
    pub max_document_bytes: u64,
    /// OCR engine settings
    pub ocr: OcrConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            resource_dirs: Vec::new(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            ocr: OcrConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build the configuration from environment variables
    ///
    /// - `MAMMO_RESOURCE_DIRS`: resource directories, platform path-list separator
    /// - `MAMMO_MAX_DOCUMENT_BYTES`: document size limit
    /// - `TESSERACT_PATH`, `TESSDATA_PREFIX`, `OCR_LANGUAGE`: OCR engine
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.to_string_lossy().trim().is_empty());
        let defaults = Self::default();

        let resource_dirs = var("MAMMO_RESOURCE_DIRS")
            .map(|dirs| {
                std::env::split_paths(&dirs)
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let max_document_bytes = match var("MAMMO_MAX_DOCUMENT_BYTES") {
            Some(raw) => match raw.to_string_lossy().trim().parse::<u64>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => {
                    tracing::warn!(value = ?raw, "Ignoring invalid MAMMO_MAX_DOCUMENT_BYTES");
                    defaults.max_document_bytes
                }
            },
            None => defaults.max_document_bytes,
        };

        let mut ocr = defaults.ocr;
        if let Some(binary) = var("TESSERACT_PATH") {
            ocr.binary = PathBuf::from(binary);
        }
        ocr.tessdata_dir = var("TESSDATA_PREFIX").map(PathBuf::from);
        if let Some(language) = var("OCR_LANGUAGE") {
            ocr.language = language.to_string_lossy().trim().to_string();
        }

        Self {
            resource_dirs,
            max_document_bytes,
            ocr,
        }
    }
}

/// Mammography report MCP Server
#[derive(Clone)]
pub struct ReportServer {
    pipeline: ExtractionPipeline,
    tool_router: ToolRouter<Self>,
    /// Server configuration
    config: Arc<ServerConfig>,
}

// ============================================================================
// Request/Response types for extract_text
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExtractTextParams {
    /// Documents to process, in order
    pub sources: Vec<DocumentSource>,
    /// Password for encrypted PDFs, tried on every source
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTextResult {
    pub source: String,
    /// Document name (file name, or the name given with a base64 source)
    pub name: String,
    /// Document size in bytes
    pub size: u64,
    pub page_count: u32,
    /// Joined page text, trimmed
    pub text: String,
    /// Pages whose text came from OCR
    pub ocr_pages: Vec<u32>,
    /// Pages that contributed no text
    pub empty_pages: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractTextResult {
    fn from_extracted(source: String, size: u64, extracted: ExtractedDocument) -> Self {
        let warning = (!extracted.has_text()).then(|| NO_TEXT_WARNING.to_string());
        Self {
            source,
            name: extracted.name,
            size,
            page_count: extracted.page_count,
            text: extracted.text,
            ocr_pages: extracted.ocr_pages,
            empty_pages: extracted.empty_pages,
            warning,
            error: None,
        }
    }

    fn failed(source: String, name: String, error: String) -> Self {
        Self {
            source,
            name,
            size: 0,
            page_count: 0,
            text: String::new(),
            ocr_pages: vec![],
            empty_pages: vec![],
            warning: None,
            error: Some(error),
        }
    }
}

// ============================================================================
// Request types for merge_extractions
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MergeExtractionsParams {
    /// Structured extractions, one per document, each matching the schema
    /// returned by `get_extraction_schema`
    pub extractions: Vec<serde_json::Value>,
}

// ============================================================================
// Request/Response types for list_pdfs
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListPdfsParams {
    /// Directory to search for PDF files
    pub directory: String,
    /// Search subdirectories recursively (default: false)
    #[serde(default)]
    pub recursive: bool,
    /// Filename pattern to filter (e.g., "mammo*.pdf"). Supports glob patterns.
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PdfFileInfo {
    /// Full path to the PDF file
    pub path: String,
    /// Filename only
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Last modified time (ISO 8601 format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ListPdfsResult {
    /// Directory that was searched
    pub directory: String,
    /// List of PDF files found
    pub files: Vec<PdfFileInfo>,
    /// Total number of files found
    pub total_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Progress forwarding
// ============================================================================

struct RelayEvent {
    source: usize,
    name: String,
    progress: ExtractionProgress,
}

/// Converts per-document snapshots into one non-decreasing progress value
/// across all sources of a call
#[derive(Debug, Default)]
struct ProgressTally {
    source: Option<usize>,
    offset: u32,
    last_steps: u32,
}

impl ProgressTally {
    fn notification(&mut self, token: ProgressToken, event: &RelayEvent) -> ProgressNotificationParam {
        if self.source != Some(event.source) {
            self.offset += self.last_steps;
            self.last_steps = 0;
            self.source = Some(event.source);
        }

        let progress = &event.progress;
        let steps = progress.text_processed + progress.ocr_processed;
        self.last_steps = steps;

        ProgressNotificationParam {
            progress_token: token,
            progress: f64::from(self.offset + steps),
            total: Some(f64::from(
                self.offset + progress.total_pages + progress.ocr_total,
            )),
            message: Some(progress_message(&event.name, progress)),
        }
    }
}

fn progress_message(name: &str, progress: &ExtractionProgress) -> String {
    let stage = match progress.stage {
        Stage::Text => "reading text layer",
        Stage::Ocr => "running OCR",
    };
    format!(
        "{}: page {}/{}, {}",
        name, progress.current_page, progress.total_pages, stage
    )
}

/// Forwards pipeline progress to the client as `notifications/progress`
struct ProgressRelay {
    sender: mpsc::UnboundedSender<RelayEvent>,
    task: tokio::task::JoinHandle<()>,
}

impl ProgressRelay {
    fn start(peer: Peer<RoleServer>, token: ProgressToken) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<RelayEvent>();
        let task = tokio::spawn(async move {
            let mut tally = ProgressTally::default();
            while let Some(event) = receiver.recv().await {
                let param = tally.notification(token.clone(), &event);
                if let Err(e) = peer.notify_progress(param).await {
                    tracing::debug!(error = %e, "Failed to send progress notification");
                }
            }
        });
        Self { sender, task }
    }

    fn observer(&self, source: usize, name: String) -> RelayObserver {
        RelayObserver {
            sender: self.sender.clone(),
            source,
            name,
        }
    }

    /// Wait until every queued notification has been sent
    async fn finish(self) {
        drop(self.sender);
        if let Err(e) = self.task.await {
            tracing::debug!(error = %e, "Progress relay stopped unexpectedly");
        }
    }
}

struct RelayObserver {
    sender: mpsc::UnboundedSender<RelayEvent>,
    source: usize,
    name: String,
}

impl ProgressObserver for RelayObserver {
    fn on_progress(&self, progress: &ExtractionProgress) {
        // A closed channel only means the client stopped listening
        let _ = self.sender.send(RelayEvent {
            source: self.source,
            name: self.name.clone(),
            progress: *progress,
        });
    }
}

// ============================================================================
// Tool implementations
// ============================================================================

#[tool_router]
impl ReportServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a server backed by PDFium and the Tesseract OCR engine
    pub fn with_config(config: ServerConfig) -> Self {
        let ocr = Arc::new(OcrEngine::tesseract(config.ocr.clone()));
        let pipeline = ExtractionPipeline::new(Arc::new(PdfiumLoader), ocr);
        Self::with_pipeline(config, pipeline)
    }

    /// Create a server around an existing pipeline
    pub fn with_pipeline(config: ServerConfig, pipeline: ExtractionPipeline) -> Self {
        Self {
            pipeline,
            tool_router: Self::tool_router(),
            config: Arc::new(config),
        }
    }

    /// Extract report text from PDF files
    #[tool(
        description = "Extract the text of mammography report PDFs. Each page's embedded text layer is used when present; pages without one (scans) are rendered and read with OCR. Documents are processed in order and a failing document does not stop the batch.

Returns per document: name, size, pageCount, text, ocrPages (pages read through OCR), emptyPages (pages with no readable text), and a warning when no text was found.

Source format: each element must be one of {\"path\": \"/absolute/path.pdf\"} or {\"base64\": \"...\", \"name\": \"optional-file-name.pdf\"}"
    )]
    async fn extract_text(
        &self,
        Parameters(params): Parameters<ExtractTextParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        let relay = context
            .meta
            .get_progress_token()
            .map(|token| ProgressRelay::start(context.peer.clone(), token));

        let mut results = Vec::with_capacity(params.sources.len());

        for (index, source) in params.sources.iter().enumerate() {
            let observer = relay
                .as_ref()
                .map(|relay| relay.observer(index, Self::source_name(source)));
            let result = self
                .process_extract_text(
                    source,
                    params.password.as_deref(),
                    observer.as_ref().map(|o| o as &dyn ProgressObserver),
                )
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "extract_text failed");
                    ExtractTextResult::failed(
                        Self::source_label(source),
                        Self::source_name(source),
                        e.client_message(),
                    )
                });
            results.push(result);
        }

        if let Some(relay) = relay {
            relay.finish().await;
        }

        let response = serde_json::json!({ "results": results });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }

    /// Merge per-document structured extractions into one report
    #[tool(
        description = "Merge structured extractions of several mammography reports (one per document, each matching the get_extraction_schema schema) into a single report.

Merge rules: highest BI-RADS value and confidence, densest breast density category, first exam type, bilateral laterality when both sides appear, most recent prior exam date, and de-duplicated findings, recommendations, red flags and evidence.

Returns the merged extraction with documentCount and priorExamDateBasis, or {\"error\": ...} naming the first invalid extraction."
    )]
    async fn merge_extractions(
        &self,
        Parameters(params): Parameters<MergeExtractionsParams>,
    ) -> String {
        match Self::process_merge(params.extractions) {
            Ok(report) => serde_json::to_string_pretty(&report).unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "merge_extractions failed");
                let response = serde_json::json!({ "error": e.client_message() });
                serde_json::to_string_pretty(&response).unwrap_or_default()
            }
        }
    }

    /// JSON schema for structured report extraction
    #[tool(
        description = "Return the JSON schema of a structured mammography report extraction (summary, BI-RADS, breast density, exam, comparison, findings, recommendations, red flags). Use it to constrain a language model's structured output before calling merge_extractions."
    )]
    async fn get_extraction_schema(&self) -> String {
        let schema = schemars::schema_for!(StructuredExtraction);
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }

    /// List PDF files in a directory
    #[tool(
        description = "List PDF files in a directory. Useful for discovering reports before extracting them.

Returns for each file:
- Full path (can be used directly as a path source)
- Filename
- File size in bytes
- Last modified time

Supports recursive search and glob pattern filtering."
    )]
    async fn list_pdfs(&self, Parameters(params): Parameters<ListPdfsParams>) -> String {
        let result = self.process_list_pdfs(&params).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "list_pdfs failed");
            ListPdfsResult {
                directory: params.directory.clone(),
                files: vec![],
                total_count: 0,
                error: Some(e.client_message()),
            }
        });

        serde_json::to_string_pretty(&result).unwrap_or_default()
    }
}

impl ReportServer {
    /// Label used for a source in results and logs
    fn source_label(source: &DocumentSource) -> String {
        match source {
            DocumentSource::Path { path } => path.clone(),
            DocumentSource::Base64 { .. } => BASE64_DEFAULT_NAME.to_string(),
        }
    }

    /// Best-known document name before the source is resolved
    fn source_name(source: &DocumentSource) -> String {
        match source {
            DocumentSource::Path { path } => Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.clone()),
            DocumentSource::Base64 { name, .. } => name
                .clone()
                .unwrap_or_else(|| BASE64_DEFAULT_NAME.to_string()),
        }
    }

    fn resolve_source(&self, source: &DocumentSource) -> crate::error::Result<Document> {
        match source {
            DocumentSource::Path { path } => {
                let path = validate_path_access(path, &self.config.resource_dirs)?;
                resolve_path(path, self.config.max_document_bytes)
            }
            DocumentSource::Base64 { base64, name } => {
                resolve_base64(base64, name.as_deref(), self.config.max_document_bytes)
            }
        }
    }

    async fn process_extract_text(
        &self,
        source: &DocumentSource,
        password: Option<&str>,
        observer: Option<&dyn ProgressObserver>,
    ) -> crate::error::Result<ExtractTextResult> {
        let document = self.resolve_source(source)?;
        let extracted = self.pipeline.extract(&document, password, observer).await?;
        Ok(ExtractTextResult::from_extracted(
            Self::source_label(source),
            document.size(),
            extracted,
        ))
    }

    fn process_merge(values: Vec<serde_json::Value>) -> crate::error::Result<MergedReport> {
        let extractions = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value::<StructuredExtraction>(value).map_err(|e| {
                    Error::InvalidExtraction {
                        index,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<crate::error::Result<Vec<_>>>()?;

        merge(&extractions)
    }

    fn process_list_pdfs(&self, params: &ListPdfsParams) -> crate::error::Result<ListPdfsResult> {
        let dir_path = validate_path_access(&params.directory, &self.config.resource_dirs)?;

        if !dir_path.exists() {
            return Err(Error::DocumentNotFound {
                path: params.directory.clone(),
            });
        }

        if !dir_path.is_dir() {
            return Err(Error::SourceResolution {
                reason: format!("{} is not a directory", params.directory),
            });
        }

        let pattern = params
            .pattern
            .as_ref()
            .and_then(|p| glob::Pattern::new(p).ok());

        let mut files = Vec::new();
        Self::collect_pdfs(&dir_path, params.recursive, &pattern, &mut files)?;

        // Sort by path for consistent ordering
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let total_count = files.len() as u32;

        Ok(ListPdfsResult {
            directory: params.directory.clone(),
            files,
            total_count,
            error: None,
        })
    }

    fn collect_pdfs(
        dir: &Path,
        recursive: bool,
        pattern: &Option<glob::Pattern>,
        files: &mut Vec<PdfFileInfo>,
    ) -> crate::error::Result<()> {
        for entry in std::fs::read_dir(dir)?.flatten() {
            let path = entry.path();

            if path.is_dir() {
                if recursive {
                    if let Err(e) = Self::collect_pdfs(&path, recursive, pattern, files) {
                        tracing::debug!(dir = %path.display(), error = %e, "Skipping directory");
                    }
                }
                continue;
            }

            let is_pdf = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if !path.is_file() || !is_pdf {
                continue;
            }

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            if let Some(pat) = pattern {
                if !pat.matches(&name) {
                    continue;
                }
            }

            let metadata = std::fs::metadata(&path).ok();
            let size = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
            let modified = metadata
                .as_ref()
                .and_then(|m| m.modified().ok())
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .and_then(|d| chrono::DateTime::from_timestamp(d.as_secs() as i64, 0))
                .map(|dt| dt.to_rfc3339());

            files.push(PdfFileInfo {
                path: path.to_string_lossy().to_string(),
                name,
                size,
                modified,
            });
        }

        Ok(())
    }
}

impl Default for ReportServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for ReportServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Mammography report server. Use extract_text to get report text (with OCR for \
                 scanned pages), have the language model fill the get_extraction_schema schema \
                 for each document, then combine the documents with merge_extractions. \
                 PDF files in configured directories are also exposed as resources."
                    .into(),
            ),
        }
    }

    /// List available PDF resources from configured directories
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let mut resources = Vec::new();

        for dir in self.config.resource_dirs.iter() {
            let params = ListPdfsParams {
                directory: dir.to_string_lossy().to_string(),
                recursive: true,
                pattern: None,
            };

            let list_result = match self.process_list_pdfs(&params) {
                Ok(list_result) => list_result,
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "Skipping resource directory");
                    continue;
                }
            };

            for file in list_result.files {
                let uri = format!("file://{}", file.path);
                let mut resource = RawResource::new(uri, file.name.clone());
                resource.mime_type = Some("application/pdf".to_string());
                resource.description = Some(format!(
                    "PDF report ({} bytes){}",
                    file.size,
                    file.modified
                        .as_ref()
                        .map(|m| format!(", modified: {}", m))
                        .unwrap_or_default()
                ));
                resource.size = u32::try_from(file.size).ok();

                resources.push(Annotated {
                    raw: resource,
                    annotations: None,
                });
            }
        }

        Ok(ListResourcesResult::with_all_items(resources))
    }

    /// Read a PDF resource and return its extracted text
    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let uri = &request.uri;

        let Some(path) = uri.strip_prefix("file://") else {
            return Err(ErrorData::invalid_params(
                "Only file:// URIs are supported",
                None,
            ));
        };

        let path = validate_path_access(path, &self.config.resource_dirs).map_err(|e| {
            tracing::warn!(error = %e, "read_resource denied");
            ErrorData::invalid_params("Resource not found in configured directories", None)
        })?;

        let extracted = match resolve_path(&path, self.config.max_document_bytes) {
            Ok(document) => self.pipeline.extract(&document, None, None).await,
            Err(e) => Err(e),
        };

        match extracted {
            Ok(extracted) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::TextResourceContents {
                    uri: uri.clone(),
                    mime_type: Some("text/plain".to_string()),
                    text: extracted.text,
                    meta: None,
                }],
            }),
            Err(e) => {
                tracing::warn!(error = %e, "read_resource failed");
                Err(ErrorData::internal_error(e.client_message(), None))
            }
        }
    }
}

/// Run the MCP server with default configuration
pub async fn run_server() -> Result<()> {
    run_server_with_config(ServerConfig::default()).await
}

/// Run the MCP server with full configuration
pub async fn run_server_with_config(config: ServerConfig) -> Result<()> {
    tracing::info!(
        resource_dirs = config.resource_dirs.len(),
        max_document_bytes = config.max_document_bytes,
        ocr_language = %config.ocr.language,
        "Mammography report MCP Server ready, waiting for connections..."
    );

    let server = ReportServer::with_config(config);
    let ocr = server.pipeline.ocr().clone();

    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    if let Ok(ocr) = Arc::try_unwrap(ocr) {
        ocr.shutdown().await?;
    }

    Ok(())
}
