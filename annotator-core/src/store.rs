//! Annotation store
//!
//! Sole writer of the [`AnnotationSet`]. Appends are validated and
//! coerced; finalizing hands a pretty JSON snapshot to a [`DownloadSink`]
//! and then resets the set.

use chrono::{DateTime, Utc};

use crate::capture::CandidateSelection;
use crate::error::{AnnotatorError, Result};
use crate::model::{Annotation, AnnotationSet, TextRange};

/// Filename offered for the exported document
pub const EXPORT_FILENAME: &str = "annotations.json";

/// Whether the selected text is stored as a fourth field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextCapture {
    #[default]
    Include,
    Omit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub text_capture: TextCapture,
}

/// Click count of the control that fired an operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trigger(Option<u32>);

impl Trigger {
    pub fn clicks(count: u32) -> Self {
        Self(Some(count))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn fired(&self) -> bool {
        matches!(self.0, Some(n) if n > 0)
    }
}

impl From<u32> for Trigger {
    fn from(count: u32) -> Self {
        Self::clicks(count)
    }
}

/// Destination for exported documents (a file, a browser download, ...)
pub trait DownloadSink {
    fn send(&mut self, content: &str, filename: &str) -> anyhow::Result<()>;
}

/// Result of a finalize: what was handed to the sink
#[derive(Debug, Clone)]
pub struct Export {
    pub filename: String,
    pub content: String,
    pub count: usize,
    pub exported_at: DateTime<Utc>,
}

/// Render an optional state; a missing state renders as `{}`
pub fn render_state(state: Option<&AnnotationSet>) -> String {
    match state {
        Some(set) => set.to_pretty_json().unwrap_or_else(|e| {
            log::warn!("render failed: {}", e);
            "{}".to_string()
        }),
        None => "{}".to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    set: AnnotationSet,
    config: StoreConfig,
}

impl AnnotationStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            set: AnnotationSet::new(),
            config,
        }
    }

    /// Resume from a previously rendered document
    pub fn from_json(json: &str, config: StoreConfig) -> Result<Self> {
        Ok(Self {
            set: AnnotationSet::from_json(json)?,
            config,
        })
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Append a candidate under `label`, returning the new rendering.
    ///
    /// Returns `None` without touching state when there is no candidate,
    /// its text is blank after trimming, or its span is empty.
    pub fn append(
        &mut self,
        candidate: Option<CandidateSelection>,
        label: Option<&str>,
    ) -> Option<String> {
        let candidate = match candidate {
            Some(c) => c,
            None => {
                log::debug!("append skipped: no candidate");
                return None;
            }
        };

        let text = candidate.text.trim();
        if text.is_empty() {
            log::debug!("append skipped: blank selection text");
            return None;
        }

        let range = TextRange::new(candidate.start, candidate.end);
        if range.is_empty() {
            log::debug!("append skipped: empty span at {}", range.start_offset);
            return None;
        }

        let text = match self.config.text_capture {
            TextCapture::Include => Some(text.to_string()),
            TextCapture::Omit => None,
        };
        let label = label.unwrap_or_default().to_string();

        log::debug!(
            "append [{}, {}] label={:?}",
            range.start_offset,
            range.end_offset,
            label
        );
        self.set.push(Annotation::new(range, label, text));

        Some(self.render())
    }

    /// Export the current set through `sink`, then reset it.
    ///
    /// An unfired trigger is a no-op. If the sink fails, the set is kept
    /// and the error is returned.
    pub fn finalize_and_export<S: DownloadSink + ?Sized>(
        &mut self,
        trigger: Trigger,
        sink: &mut S,
    ) -> Result<Option<Export>> {
        if !trigger.fired() {
            log::debug!("finalize skipped: trigger not fired");
            return Ok(None);
        }

        let content = self.set.to_pretty_json()?;
        if let Err(e) = sink.send(&content, EXPORT_FILENAME) {
            log::warn!("export to {} failed: {:#}", EXPORT_FILENAME, e);
            return Err(AnnotatorError::Sink {
                filename: EXPORT_FILENAME.to_string(),
                message: format!("{:#}", e),
            });
        }

        let exported = self.set.take();
        log::info!(
            "exported {} annotation(s) to {}; store reset",
            exported.len(),
            EXPORT_FILENAME
        );

        Ok(Some(Export {
            filename: EXPORT_FILENAME.to_string(),
            content,
            count: exported.len(),
            exported_at: Utc::now(),
        }))
    }

    /// Pretty JSON of the current set; no effect on state
    pub fn render(&self) -> String {
        render_state(Some(&self.set))
    }
}
