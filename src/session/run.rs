use uuid::Uuid;

use crate::engine::{History, Snapshot};

/// Outcome of one advance request
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The snapshot the cursor sat on before advancing
    Snapshot(Snapshot),
    /// The cursor already sits on the final snapshot ("already converged");
    /// a normal terminal signal, not an error
    AtEnd,
}

/// One computed run: the full snapshot history plus a cursor over it.
///
/// The history is computed eagerly before this object exists, so serving
/// steps is pure cursor movement.
#[derive(Debug, Clone)]
pub struct RunSession {
    id: Uuid,
    history: History,
    cursor: usize,
}

impl RunSession {
    pub fn new(history: History) -> Self {
        Self {
            id: Uuid::new_v4(),
            history,
            cursor: 0,
        }
    }

    /// Identity label for boundary layers; no effect on clustering
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of advance operations available from the start
    pub fn total_steps(&self) -> usize {
        self.history.len() - 1
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The snapshot a renderer should draw for the current cursor
    pub fn current(&self) -> &Snapshot {
        let index = self.cursor.min(self.history.len() - 1);
        &self.history.snapshots[index]
    }

    /// Return the snapshot at the cursor and move the cursor forward.
    /// At the final snapshot this is a no-op signalled as [`StepOutcome::AtEnd`].
    pub fn advance(&mut self) -> StepOutcome {
        if self.cursor >= self.history.len() - 1 {
            return StepOutcome::AtEnd;
        }
        let snapshot = self.history.snapshots[self.cursor].clone();
        self.cursor += 1;
        StepOutcome::Snapshot(snapshot)
    }

    /// Jump the cursor straight to the final snapshot
    pub fn jump_to_end(&mut self) -> &Snapshot {
        self.cursor = self.history.len() - 1;
        &self.history.snapshots[self.cursor]
    }

    /// A run is converged once the cursor sits on the last snapshot of a
    /// fixed-point history. Cap-terminated histories never report converged.
    pub fn is_converged(&self) -> bool {
        self.history.converged && self.cursor >= self.history.len() - 1
    }
}
