//! Two-stack undo/redo history.
//!
//! `execute` runs a command and pushes it on the undo stack, clearing the
//! redo stack (a fresh edit forks history; the abandoned redo branch is
//! dropped). `undo` and `redo` shuttle commands between the stacks, calling
//! the command's own inverse operations. Commands are stored by value and
//! carry all the state they need, so the history owns no drawing data.

use tracing::debug;

use crate::clipboard::Clipboard;
use crate::commands::EditorCommand;
use crate::drawing::Drawing;
use crate::error::Result;

/// Default cap on remembered undo steps.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Executes commands and tracks them for undo/redo.
#[derive(Debug)]
pub struct CommandManager {
    undo_stack: Vec<EditorCommand>,
    redo_stack: Vec<EditorCommand>,
    /// Maximum undo depth; 0 means unlimited.
    depth_limit: usize,
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandManager {
    pub fn new() -> Self {
        Self::with_depth_limit(DEFAULT_HISTORY_DEPTH)
    }

    /// A manager remembering at most `depth_limit` undo steps (0 = unlimited).
    pub fn with_depth_limit(depth_limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            depth_limit,
        }
    }

    /// Runs a command and records it for undo.
    ///
    /// A failed command is not recorded and the redo stack is left intact.
    /// On success the redo stack is cleared. When the depth limit is reached
    /// the oldest remembered command is forgotten (it can no longer be
    /// undone, but the drawing keeps its effect).
    pub fn execute(
        &mut self,
        mut command: EditorCommand,
        drawing: &mut Drawing,
        clipboard: &mut Clipboard,
    ) -> Result<()> {
        command.apply(drawing, clipboard)?;
        debug!(command = command.name(), "executed");
        self.undo_stack.push(command);
        if self.depth_limit > 0 && self.undo_stack.len() > self.depth_limit {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        Ok(())
    }

    /// Reverts the most recent command. Returns `Ok(false)` when there is
    /// nothing to undo.
    ///
    /// If the command's undo fails, the command is pushed back so the stacks
    /// are unchanged and the failure can be retried or inspected.
    pub fn undo(&mut self, drawing: &mut Drawing, clipboard: &mut Clipboard) -> Result<bool> {
        let Some(mut command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.undo(drawing, clipboard) {
            self.undo_stack.push(command);
            return Err(e);
        }
        debug!(command = command.name(), "undone");
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Re-applies the most recently undone command. Returns `Ok(false)` when
    /// there is nothing to redo.
    pub fn redo(&mut self, drawing: &mut Drawing, clipboard: &mut Clipboard) -> Result<bool> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.apply(drawing, clipboard) {
            self.redo_stack.push(command);
            return Err(e);
        }
        debug!(command = command.name(), "redone");
        self.undo_stack.push(command);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Name of the command `undo` would revert, for menu labels.
    pub fn undo_name(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|c| c.name())
    }

    /// Name of the command `redo` would re-apply.
    pub fn redo_name(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|c| c.name())
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Forgets all recorded history, e.g. after loading a new drawing.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
