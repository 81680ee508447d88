// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::stroke::Stroke;

/// Linear undo/redo history of strokes.
///
/// A stroke lives in exactly one of two stacks: `strokes` (visible, in paint
/// order) or `undone` (the redo buffer, most recently undone last). Pushing a
/// new stroke drops the redo buffer; branching history is not kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    strokes: Vec<Stroke>,
    undone: Vec<Stroke>,
}

impl History {
    /// Builds a history from its two stacks.
    #[must_use]
    pub fn from_parts(strokes: Vec<Stroke>, undone: Vec<Stroke>) -> Self {
        Self { strokes, undone }
    }

    /// Splits the history into its two stacks.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Stroke>, Vec<Stroke>) {
        (self.strokes, self.undone)
    }

    /// Visible strokes, oldest first.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Redo buffer, most recently undone last.
    #[must_use]
    pub fn undone(&self) -> &[Stroke] {
        &self.undone
    }

    /// Appends a stroke and clears the redo buffer.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.undone.clear();
    }

    /// Moves the newest visible stroke to the redo buffer.
    pub fn undo(&mut self) -> bool {
        let Some(stroke) = self.strokes.pop() else {
            return false;
        };
        self.undone.push(stroke);
        true
    }

    /// Moves the most recently undone stroke back on top.
    pub fn redo(&mut self) -> bool {
        let Some(stroke) = self.undone.pop() else {
            return false;
        };
        self.strokes.push(stroke);
        true
    }

    /// Empties both stacks.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.undone.clear();
    }

    /// `true` if there is a stroke to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }

    /// `true` if there is a stroke to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// `true` if both stacks are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.undone.is_empty()
    }
}
