use std::collections::HashSet;

use crate::game::{CellId, GameListener};

/// Latest snapshot pushed by the engine, read by the renderer each frame
#[derive(Debug, Default, Clone)]
pub struct BoardView {
    /// Snake cells, head first
    pub snake: Vec<CellId>,
    pub apples: HashSet<CellId>,
    pub score: u32,
    bell_pending: bool,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Option<&CellId> {
        self.snake.first()
    }

    /// Whether an apple was eaten since the last call
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }
}

impl GameListener for BoardView {
    fn on_render(&mut self, snake: &[CellId], apples: &[CellId]) {
        self.snake = snake.to_vec();
        self.apples = apples.iter().cloned().collect();
    }

    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn on_apple_eaten(&mut self) {
        self.bell_pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coordinate, coord_to_id};

    fn id(row: i32, column: i32) -> CellId {
        coord_to_id(Coordinate::new(row, column))
    }

    #[test]
    fn test_snapshot_tracks_notifications() {
        let mut view = BoardView::new();
        view.on_render(&[id(1, 1), id(2, 1)], &[id(5, 5)]);
        view.on_score_changed(4);

        assert_eq!(view.head(), Some(&id(1, 1)));
        assert!(view.apples.contains(&id(5, 5)));
        assert_eq!(view.score, 4);
    }

    #[test]
    fn test_bell_fires_once() {
        let mut view = BoardView::new();
        assert!(!view.take_bell());

        view.on_apple_eaten();
        assert!(view.take_bell());
        assert!(!view.take_bell());
    }
}
