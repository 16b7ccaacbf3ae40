//! services/client/src/session/deck.rs
//!
//! Navigation state for the flashcard viewer: a circular cursor over the
//! deck plus a reveal toggle that resets whenever the card changes.

/// Position within a flashcard deck. The deck itself lives in the artifact
/// cache; the cursor only tracks where the viewer is looking.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckCursor {
    index: usize,
    revealed: bool,
}

impl DeckCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// True when the answer side is showing.
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn flip(&mut self) {
        self.revealed = !self.revealed;
    }

    /// Advances to the next card, wrapping past the end.
    pub fn next(&mut self, deck_len: usize) {
        if deck_len == 0 {
            return;
        }
        self.index = (self.index + 1) % deck_len;
        self.revealed = false;
    }

    /// Steps back to the previous card, wrapping past the start.
    pub fn previous(&mut self, deck_len: usize) {
        if deck_len == 0 {
            return;
        }
        self.index = (self.index + deck_len - 1) % deck_len;
        self.revealed = false;
    }

    /// Called when the deck itself was replaced.
    pub fn reset(&mut self) {
        self.index = 0;
        self.revealed = false;
    }
}
