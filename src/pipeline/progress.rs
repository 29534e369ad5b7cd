//! Extraction state machine and progress snapshots
//!
//! [`transition`] is pure: it takes the current [`Machine`] and one
//! [`Input`] and returns the next machine plus the progress snapshots to
//! emit. The async driver in `extract` only feeds it inputs.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Which extraction path the current page is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Text,
    Ocr,
}

/// Snapshot of pipeline progress for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionProgress {
    pub total_pages: u32,
    /// Pages whose text layer has been read
    pub text_processed: u32,
    /// Pages recognized through OCR
    pub ocr_processed: u32,
    /// Pages found to need OCR so far
    pub ocr_total: u32,
    pub current_page: u32,
    pub stage: Stage,
}

/// Pipeline state for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionState {
    Pending,
    Reading,
    Loaded,
    TextStage { page: u32 },
    OcrStage { page: u32 },
    PageDone { page: u32 },
    Joined,
    Done,
    Failed { reason: String },
}

impl fmt::Display for ExtractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionState::Pending => write!(f, "pending"),
            ExtractionState::Reading => write!(f, "reading"),
            ExtractionState::Loaded => write!(f, "loaded"),
            ExtractionState::TextStage { page } => write!(f, "text-stage({})", page),
            ExtractionState::OcrStage { page } => write!(f, "ocr-stage({})", page),
            ExtractionState::PageDone { page } => write!(f, "page-done({})", page),
            ExtractionState::Joined => write!(f, "joined"),
            ExtractionState::Done => write!(f, "done"),
            ExtractionState::Failed { .. } => write!(f, "failed"),
        }
    }
}

/// Events the driver feeds into the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Document bytes are being handed to the PDF parser
    Read,
    /// The PDF parser opened the document
    Loaded { total_pages: u32 },
    /// Start the next page
    BeginPage,
    /// The text layer of the current page was read
    TextRead { has_text: bool },
    /// OCR for the current page finished
    OcrRead,
    /// Per-page texts were joined
    Join,
    Finish,
    Fail { reason: String },
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Read => write!(f, "read"),
            Input::Loaded { total_pages } => write!(f, "loaded({})", total_pages),
            Input::BeginPage => write!(f, "begin-page"),
            Input::TextRead { has_text } => write!(f, "text-read(has_text={})", has_text),
            Input::OcrRead => write!(f, "ocr-read"),
            Input::Join => write!(f, "join"),
            Input::Finish => write!(f, "finish"),
            Input::Fail { .. } => write!(f, "fail"),
        }
    }
}

/// State plus the progress counters that travel with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub state: ExtractionState,
    pub progress: ExtractionProgress,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self {
            state: ExtractionState::Pending,
            progress: ExtractionProgress::default(),
        }
    }

    /// Whether every page has been handled
    fn all_pages_done(&self) -> bool {
        match self.state {
            ExtractionState::Loaded => self.progress.total_pages == 0,
            ExtractionState::PageDone { page } => page == self.progress.total_pages,
            _ => false,
        }
    }
}

/// Compute the next machine and the snapshots to emit for `input`
pub fn transition(machine: &Machine, input: Input) -> Result<(Machine, Vec<ExtractionProgress>)> {
    let mut progress = machine.progress;

    let (state, events) = match (&machine.state, input) {
        (ExtractionState::Done | ExtractionState::Failed { .. }, input) => {
            return Err(invalid(machine, &input));
        }
        (_, Input::Fail { reason }) => (ExtractionState::Failed { reason }, Vec::new()),

        (ExtractionState::Pending, Input::Read) => (ExtractionState::Reading, Vec::new()),

        (ExtractionState::Reading, Input::Loaded { total_pages }) => {
            progress.total_pages = total_pages;
            (ExtractionState::Loaded, Vec::new())
        }

        (ExtractionState::Loaded | ExtractionState::PageDone { .. }, Input::BeginPage)
            if !machine.all_pages_done() =>
        {
            let page = progress.current_page + 1;
            progress.current_page = page;
            progress.stage = Stage::Text;
            (ExtractionState::TextStage { page }, vec![progress])
        }

        (ExtractionState::TextStage { page }, Input::TextRead { has_text }) => {
            let page = *page;
            progress.text_processed += 1;
            let mut events = vec![progress];
            if has_text {
                (ExtractionState::PageDone { page }, events)
            } else {
                progress.ocr_total += 1;
                progress.stage = Stage::Ocr;
                events.push(progress);
                (ExtractionState::OcrStage { page }, events)
            }
        }

        (ExtractionState::OcrStage { page }, Input::OcrRead) => {
            let page = *page;
            progress.ocr_processed += 1;
            (ExtractionState::PageDone { page }, vec![progress])
        }

        (ExtractionState::Loaded | ExtractionState::PageDone { .. }, Input::Join)
            if machine.all_pages_done() =>
        {
            (ExtractionState::Joined, Vec::new())
        }

        (ExtractionState::Joined, Input::Finish) => (ExtractionState::Done, Vec::new()),

        (_, input) => return Err(invalid(machine, &input)),
    };

    Ok((Machine { state, progress }, events))
}

fn invalid(machine: &Machine, input: &Input) -> Error {
    Error::InvalidTransition {
        state: machine.state.to_string(),
        input: input.to_string(),
    }
}
