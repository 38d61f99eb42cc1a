use crate::capture::{capture, CandidateSelection};
use crate::store::{AnnotationStore, DownloadSink, StoreConfig, Trigger};
use crate::surface::TextSurface;

/// Text loaded when no file is given
pub const SAMPLE_TEXT: &str = "Lemon Herb Roasted Chicken

Start by marinating the chicken thighs in a mixture of lemon juice,
minced garlic, fresh rosemary, thyme, and olive oil.
After an hour, place the chicken on a baking tray with sliced onions
and baby potatoes, then roast until the skin becomes crisp and golden.
";

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Visual,
    Insert,
    Label,
    Help,
}

/// Platform-agnostic session state.
///
/// Front ends map input events onto these handlers; every transition of
/// the annotation list goes through [`AnnotationStore`].
pub struct Session {
    pub surface: TextSurface,
    pub store: AnnotationStore,
    pub mode: Mode,
    pub running: bool,

    /// Label applied to the next saved selection; kept across saves
    pub label: String,
    pub label_buffer: String,

    pub title: String,
    pub status_message: Option<String>,

    save_clicks: u32,
    finalize_clicks: u32,
}

impl Session {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            surface: TextSurface::new(SAMPLE_TEXT),
            store: AnnotationStore::new(config),
            mode: Mode::Normal,
            running: true,

            label: String::new(),
            label_buffer: String::new(),

            title: "Sample".to_string(),
            status_message: None,

            save_clicks: 0,
            finalize_clicks: 0,
        }
    }

    /// Replace the text under annotation; saved annotations are kept
    pub fn load_text(&mut self, title: &str, content: &str) {
        self.surface.set_content(content);
        self.title = title.to_string();
        self.mode = Mode::Normal;
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    /// Enter visual/selection mode
    pub fn enter_visual_mode(&mut self) {
        self.mode = Mode::Visual;
        self.surface.begin_selection();
    }

    pub fn cancel_selection(&mut self) {
        self.surface.clear_selection();
        self.mode = Mode::Normal;
    }

    /// Capture the surface selection and append it under the current label
    pub fn save_selection(&mut self) -> bool {
        let candidate = capture(Some(&self.surface));
        self.surface.clear_selection();
        if self.mode == Mode::Visual {
            self.mode = Mode::Normal;
        }
        self.save_candidate(candidate)
    }

    /// Append a candidate captured elsewhere (e.g. a browser range)
    pub fn save_candidate(&mut self, candidate: Option<CandidateSelection>) -> bool {
        self.save_clicks += 1;
        let span = candidate.as_ref().map(|c| (c.start.min(c.end), c.start.max(c.end)));

        match self.store.append(candidate, Some(self.label.as_str())) {
            Some(_) => {
                if let Some((start, end)) = span {
                    let label = if self.label.is_empty() {
                        "(no label)"
                    } else {
                        self.label.as_str()
                    };
                    let msg = format!("Saved [{}, {}] {}", start, end, label);
                    self.set_status(&msg);
                }
                true
            }
            None => {
                self.set_status("Nothing selected");
                false
            }
        }
    }

    /// Export all annotations through `sink` and reset the list
    pub fn finalize<S: DownloadSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        self.finalize_clicks += 1;
        match self
            .store
            .finalize_and_export(Trigger::clicks(self.finalize_clicks), sink)
        {
            Ok(Some(export)) => {
                self.set_status(&format!(
                    "Exported {} annotation(s) to {} at {}",
                    export.count,
                    export.filename,
                    export.exported_at.format("%H:%M:%S")
                ));
                true
            }
            Ok(None) => false,
            Err(e) => {
                self.set_status(&format!("Export failed: {}", e));
                false
            }
        }
    }

    pub fn save_clicks(&self) -> u32 {
        self.save_clicks
    }

    pub fn finalize_clicks(&self) -> u32 {
        self.finalize_clicks
    }

    /// Current annotations as pretty JSON, for the log pane
    pub fn render(&self) -> String {
        self.store.render()
    }

    // Label editing

    pub fn begin_label_edit(&mut self) {
        self.label_buffer = self.label.clone();
        self.mode = Mode::Label;
    }

    pub fn commit_label(&mut self) {
        self.label = self.label_buffer.clone();
        self.label_buffer.clear();
        self.mode = Mode::Normal;
        if self.label.is_empty() {
            self.set_status("Label cleared");
        } else {
            let msg = format!("Label set to {}", self.label);
            self.set_status(&msg);
        }
    }

    pub fn cancel_label_edit(&mut self) {
        self.label_buffer.clear();
        self.mode = Mode::Normal;
    }

    // Text editing

    pub fn enter_insert_mode(&mut self) {
        self.surface.clear_selection();
        self.mode = Mode::Insert;
    }

    pub fn exit_to_normal(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Selected range for highlighting, if any
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        if self.mode != Mode::Visual {
            return None;
        }
        self.surface
            .selection_range()
            .map(|r| (r.start_offset, r.end_offset))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nowhere;

    impl DownloadSink for Nowhere {
        fn send(&mut self, _content: &str, _filename: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_visual_selection_saves_with_label() {
        let mut session = Session::default();
        session.set_label("DISH");
        session.enter_visual_mode();
        for _ in 0..5 {
            session.surface.move_right();
        }
        assert_eq!(session.selection_range(), Some((0, 5)));

        assert!(session.save_selection());
        assert_eq!(session.mode, Mode::Normal);
        assert_eq!(session.store.len(), 1);
        assert_eq!(session.status_message.as_deref(), Some("Saved [0, 5] DISH"));
        // label survives the save
        assert_eq!(session.label, "DISH");
    }

    #[test]
    fn test_save_without_selection_is_noop() {
        let mut session = Session::default();
        assert!(!session.save_selection());
        assert!(session.store.is_empty());
        assert_eq!(session.save_clicks(), 1);
    }

    #[test]
    fn test_label_edit_round_trip() {
        let mut session = Session::default();
        session.begin_label_edit();
        session.label_buffer.push_str("HERB");
        session.commit_label();
        assert_eq!(session.label, "HERB");

        session.begin_label_edit();
        assert_eq!(session.label_buffer, "HERB");
        session.label_buffer.clear();
        session.cancel_label_edit();
        assert_eq!(session.label, "HERB");
    }

    #[test]
    fn test_label_is_exported_verbatim() {
        let mut session = Session::default();
        session.begin_label_edit();
        session.label_buffer.push_str(" PERSON ");
        session.commit_label();
        assert_eq!(session.label, " PERSON ");

        session.surface.select(0, 5);
        assert!(session.save_selection());
        let saved = session.store.annotations().iter().next().unwrap();
        assert_eq!(saved.label, " PERSON ");
        assert!(session.render().contains(r#"" PERSON ""#));
    }

    #[test]
    fn test_finalize_counts_clicks_and_resets() {
        let mut session = Session::default();
        session.surface.select(0, 5);
        session.save_selection();

        assert!(session.finalize(&mut Nowhere));
        assert_eq!(session.finalize_clicks(), 1);
        assert!(session.store.is_empty());
    }

    #[test]
    fn test_load_text_keeps_annotations() {
        let mut session = Session::default();
        session.surface.select(0, 5);
        session.save_selection();
        session.load_text("notes", "something else");
        assert_eq!(session.store.len(), 1);
        assert_eq!(session.surface.content(), "something else");
    }
}
