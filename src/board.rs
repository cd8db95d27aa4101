//! Board model and the per-clue reveal state machine.
//!
//! A board is an ordered list of categories, each an ordered list of clues.
//! `(category_index, clue_index)` is the addressing scheme for reveal
//! triggers and stays stable for the lifetime of one game. The board is
//! replaced wholesale on every (re)start; the only in-place mutation is a
//! clue's `showing` field advancing through the reveal states.

use crate::error::{GameError, Result};

/// What a clue cell currently displays. Transitions only move forward:
/// Unset -> Question -> Answer, and Answer is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Showing {
    #[default]
    Unset,
    Question,
    Answer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clue {
    pub question: String,
    pub answer: String,
    pub showing: Showing,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            showing: Showing::Unset,
        }
    }

    /// Advance the reveal state machine one step and return the text the
    /// cell should now display. A clue already showing its answer ignores
    /// further triggers and returns `None`.
    pub fn reveal(&mut self) -> Option<&str> {
        match self.showing {
            Showing::Unset => {
                self.showing = Showing::Question;
                Some(&self.question)
            }
            Showing::Question => {
                self.showing = Showing::Answer;
                Some(&self.answer)
            }
            Showing::Answer => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub title: String,
    pub clues: Vec<Clue>,
}

/// The current game's categories. Empty until the first load completes.
#[derive(Clone, Debug, Default)]
pub struct Board {
    categories: Vec<Category>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly fetched set of categories, discarding the old
    /// game entirely. Callers must only pass complete boards; a failed
    /// load cycle never reaches this point.
    pub fn replace(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loaded(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn clue(&self, category: usize, clue: usize) -> Result<&Clue> {
        self.categories
            .get(category)
            .and_then(|cat| cat.clues.get(clue))
            .ok_or(GameError::IndexOutOfRange { category, clue })
    }

    pub fn clue_mut(&mut self, category: usize, clue: usize) -> Result<&mut Clue> {
        self.categories
            .get_mut(category)
            .and_then(|cat| cat.clues.get_mut(clue))
            .ok_or(GameError::IndexOutOfRange { category, clue })
    }

    /// Reveal trigger dispatched at `(category_index, clue_index)`.
    pub fn reveal(&mut self, category: usize, clue: usize) -> Result<Option<&str>> {
        Ok(self.clue_mut(category, clue)?.reveal())
    }
}
