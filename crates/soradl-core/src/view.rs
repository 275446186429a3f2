//! Download button / status view state.
//!
//! The surface (terminal, popup, injected button) owns one [`ViewState`],
//! feeds it the outcome as a plain bool and renders whatever it returns.

use std::fmt;

const LABEL_IDLE: &str = "DOWNLOAD CLEAN";
const LABEL_RETRY: &str = "TRY AGAIN";
const LABEL_PROCESSING: &str = "PROCESSING...";
const LABEL_STARTED: &str = "STARTED!";
const LABEL_FAILED: &str = "FAILED";

/// Visual tone of the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Busy,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle { after_failure: bool },
    Processing,
    Started,
    Failed,
}

/// What the download control currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    phase: Phase,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle {
                after_failure: false,
            },
        }
    }

    /// User asked for a download. Returns false (and changes nothing) while
    /// a request is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.phase = Phase::Processing;
        true
    }

    /// Outcome of the in-flight request. Ignored when nothing is in flight.
    pub fn finish(&mut self, success: bool) {
        if self.phase == Phase::Processing {
            self.phase = if success { Phase::Started } else { Phase::Failed };
        }
    }

    /// Returns to idle after the outcome has been shown for a while.
    pub fn settle(&mut self) {
        match self.phase {
            Phase::Started => {
                self.phase = Phase::Idle {
                    after_failure: false,
                }
            }
            Phase::Failed => {
                self.phase = Phase::Idle {
                    after_failure: true,
                }
            }
            Phase::Idle { .. } | Phase::Processing => {}
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Processing
    }

    pub fn label(&self) -> &'static str {
        match self.phase {
            Phase::Idle {
                after_failure: false,
            } => LABEL_IDLE,
            Phase::Idle {
                after_failure: true,
            } => LABEL_RETRY,
            Phase::Processing => LABEL_PROCESSING,
            Phase::Started => LABEL_STARTED,
            Phase::Failed => LABEL_FAILED,
        }
    }

    pub fn tone(&self) -> Tone {
        match self.phase {
            Phase::Idle { .. } => Tone::Normal,
            Phase::Processing => Tone::Busy,
            Phase::Started => Tone::Success,
            Phase::Failed => Tone::Error,
        }
    }

    /// One status line, e.g. `[STARTED!] Hello_clean.mp4`.
    pub fn render(&self, detail: Option<&str>) -> String {
        match detail {
            Some(d) if !d.is_empty() => format!("[{}] {}", self.label(), d),
            _ => format!("[{}]", self.label()),
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
