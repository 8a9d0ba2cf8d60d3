//! Applies AI generation sessions to a document.
//!
//! Each request gets a session id from [`Generation::begin`]. Once the
//! backend accepts it the document is cleared, then every fragment is pushed
//! through a [`StreamReconciler`] and completed blocks are appended. Calls
//! carrying the id of a superseded session leave the document alone.

use super::Document;
use super::stream::StreamReconciler;

#[derive(Debug)]
struct ActiveSession {
    id: u64,
    reconciler: StreamReconciler,
}

#[derive(Debug, Default)]
pub struct Generation {
    active: Option<ActiveSession>,
    last_id: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session and returns its id. A session still in flight is
    /// abandoned along with anything it had buffered.
    pub fn begin(&mut self) -> u64 {
        self.last_id += 1;
        self.active = Some(ActiveSession {
            id: self.last_id,
            reconciler: StreamReconciler::new(),
        });
        self.last_id
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_current(&self, session: u64) -> bool {
        self.active.as_ref().is_some_and(|active| active.id == session)
    }

    /// The backend accepted `session`: clears `document` in full. Returns
    /// whether the document changed.
    pub fn accept(&mut self, session: u64, document: &mut Document) -> bool {
        if !self.is_current(session) {
            return false;
        }
        document.clear();
        true
    }

    /// Feeds one fragment of `session` and appends the blocks it completed.
    /// Returns whether the document changed.
    pub fn fragment(&mut self, session: u64, fragment: &str, document: &mut Document) -> bool {
        let Some(active) = self.active.as_mut().filter(|active| active.id == session) else {
            return false;
        };
        let blocks = active.reconciler.push(fragment);
        if blocks.is_empty() {
            return false;
        }
        document.append(blocks);
        true
    }

    /// Ends `session`, successful or not, appending whatever was still
    /// buffered. Returns false when `session` is not the current one.
    pub fn finish(&mut self, session: u64, document: &mut Document) -> bool {
        if !self.is_current(session) {
            return false;
        }
        if let Some(mut active) = self.active.take() {
            document.append(active.reconciler.finish());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_session_replaces_the_document_paragraph_by_paragraph() {
        let mut document = Document::from_html("<p>old draft</p>");
        let mut generation = Generation::new();
        let session = generation.begin();
        assert!(generation.is_running());

        assert!(generation.accept(session, &mut document));
        assert!(document.blocks().is_empty());

        assert!(!generation.fragment(session, "<p>Dear ", &mut document));
        assert!(generation.fragment(session, "Ann,</p><p>Thanks", &mut document));
        assert_eq!(document.to_html(), "<p>Dear Ann,</p>");

        assert!(generation.finish(session, &mut document));
        assert_eq!(document.to_html(), "<p>Dear Ann,</p><p>Thanks</p>");
        assert!(!generation.is_running());
    }

    #[test]
    fn superseded_session_is_ignored() {
        let mut document = Document::new();
        let mut generation = Generation::new();
        let first = generation.begin();
        let second = generation.begin();
        generation.accept(second, &mut document);

        assert!(!generation.accept(first, &mut document));
        assert!(!generation.fragment(first, "<p>stale</p>", &mut document));
        assert!(generation.fragment(second, "<p>fresh</p>", &mut document));
        assert!(!generation.finish(first, &mut document));
        assert!(generation.is_running());
        assert_eq!(document.to_html(), "<p>fresh</p>");
    }

    #[test]
    fn failed_stream_still_flushes_its_buffered_tail() {
        let mut document = Document::new();
        let mut generation = Generation::new();
        let session = generation.begin();
        generation.accept(session, &mut document);
        generation.fragment(session, "<p>Half a sent", &mut document);
        assert!(document.blocks().is_empty());

        // The stream broke here; completion runs the same way.
        assert!(generation.finish(session, &mut document));
        assert_eq!(document.to_html(), "<p>Half a sent</p>");
        assert!(!generation.fragment(session, "ence</p>", &mut document));
    }

    #[test]
    fn fragments_after_finish_are_dropped() {
        let mut document = Document::new();
        let mut generation = Generation::new();
        let session = generation.begin();
        generation.finish(session, &mut document);
        assert!(!generation.accept(session, &mut document));
        assert!(!generation.fragment(session, "<p>late</p>", &mut document));
        assert!(document.blocks().is_empty());
    }
}
