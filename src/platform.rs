//! Input handoff between the presentation thread and the simulation
//!
//! The engine may run on a dedicated thread while the windowing layer
//! owns the pointer. The handoff is a single shared cell: the
//! presentation side writes the latest pointer position, the engine
//! only ever reads it. No queueing; stale positions are simply
//! overwritten.

use std::sync::{Arc, Mutex};

use glam::Vec2;

use crate::board_center;
use crate::sim::InputSource;

/// Latest-known pointer position, shared across threads
#[derive(Debug, Clone)]
pub struct SharedPointer {
    cell: Arc<Mutex<Vec2>>,
}

impl SharedPointer {
    /// Starts at the board center so the balloon has a sane target
    /// before the first real input arrives
    pub fn new() -> Self {
        Self {
            cell: Arc::new(Mutex::new(board_center())),
        }
    }

    /// Called by the presentation side on pointer movement
    pub fn set(&self, pos: Vec2) {
        if let Ok(mut cell) = self.cell.lock() {
            *cell = pos;
        }
    }
}

impl Default for SharedPointer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for SharedPointer {
    fn pointer(&self) -> Vec2 {
        // A poisoned lock means the writer thread panicked; keep the
        // last good value's default rather than taking the engine down
        self.cell
            .lock()
            .map(|cell| *cell)
            .unwrap_or_else(|_| board_center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_sees_latest_write() {
        let shared = SharedPointer::new();
        assert_eq!(shared.pointer(), board_center());

        shared.set(Vec2::new(0.1, 0.9));
        assert_eq!(shared.pointer(), Vec2::new(0.1, 0.9));
    }

    #[test]
    fn test_clones_share_the_same_cell() {
        let writer = SharedPointer::new();
        let reader = writer.clone();
        writer.set(Vec2::new(0.25, 0.75));
        assert_eq!(reader.pointer(), Vec2::new(0.25, 0.75));
    }

    #[test]
    fn test_cross_thread_handoff() {
        let shared = SharedPointer::new();
        let writer = shared.clone();
        let handle = std::thread::spawn(move || {
            writer.set(Vec2::new(0.6, 0.4));
        });
        handle.join().unwrap();
        assert_eq!(shared.pointer(), Vec2::new(0.6, 0.4));
    }
}
