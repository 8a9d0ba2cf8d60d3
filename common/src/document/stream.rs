//! Turns a stream of generated HTML fragments into document blocks.
//!
//! Fragments arrive in arbitrary pieces, so nothing is converted until the
//! accumulated text holds a complete top-level paragraph. At that point the
//! prefix up to the last closed top-level `</p>` is parsed and handed back as
//! blocks, and whatever follows it stays buffered for the next fragment.

use super::html::{Token, TreeBuilder, tokenize};
use super::{Block, blocks_from_html};

/// Closing tag that marks a flushable boundary.
const BOUNDARY_TAG: &str = "p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    /// Waiting for a boundary; the buffer holds no complete paragraph.
    Accumulating,
    /// A boundary was found; `boundary` is the byte offset just past it.
    Flushing { boundary: usize },
}

#[derive(Debug)]
pub struct StreamReconciler {
    state: ReconcilerState,
    buffer: String,
}

impl Default for StreamReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamReconciler {
    pub fn new() -> Self {
        Self {
            state: ReconcilerState::Accumulating,
            buffer: String::new(),
        }
    }

    pub fn state(&self) -> ReconcilerState {
        self.state
    }

    /// Text received but not converted yet.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Appends a fragment and returns the blocks it completed, possibly none.
    pub fn push(&mut self, fragment: &str) -> Vec<Block> {
        self.buffer.push_str(fragment);
        if let Some(boundary) = last_boundary(&self.buffer) {
            self.state = ReconcilerState::Flushing { boundary };
        }
        self.flush()
    }

    /// Converts everything still buffered. Called once the stream has ended.
    pub fn finish(&mut self) -> Vec<Block> {
        self.state = ReconcilerState::Flushing {
            boundary: self.buffer.len(),
        };
        self.flush()
    }

    fn flush(&mut self) -> Vec<Block> {
        match self.state {
            ReconcilerState::Accumulating => Vec::new(),
            ReconcilerState::Flushing { boundary } => {
                let ready: String = self.buffer.drain(..boundary).collect();
                self.state = ReconcilerState::Accumulating;
                blocks_from_html(&ready)
            }
        }
    }
}

/// Byte offset just past the last `</p>` that leaves no element open.
fn last_boundary(html: &str) -> Option<usize> {
    let mut builder = TreeBuilder::new();
    let mut boundary = None;
    for spanned in tokenize(html) {
        let closes_boundary = matches!(&spanned.token, Token::End { name } if name == BOUNDARY_TAG);
        builder.feed(spanned.token);
        if closes_boundary && builder.depth() == 0 {
            boundary = Some(spanned.end);
        }
    }
    boundary
}
