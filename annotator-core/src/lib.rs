//! Annotator Core - Platform-agnostic span annotation library
//!
//! This crate provides the data model, selection capture and annotation
//! store for the annotator. Front ends (terminal and WASM) only wire key
//! events to the handlers on [`Session`]; all state transitions live here.

pub mod capture;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod surface;

pub use capture::{
    capture, utf16_to_char_offset, CandidateSelection, NodePoint, NodeRange, OffsetMode,
    SelectionSource, StaticText,
};
pub use error::{AnnotatorError, Result};
pub use model::{Annotation, AnnotationSet, TextRange};
pub use session::{Mode, Session, SAMPLE_TEXT};
pub use store::{
    render_state, AnnotationStore, DownloadSink, Export, StoreConfig, TextCapture, Trigger,
    EXPORT_FILENAME,
};
pub use surface::TextSurface;
