use super::cell_id::CellId;

/// Receiver of the engine's outbound notifications.
///
/// Every method defaults to doing nothing, so a front end implements only
/// what it shows.
pub trait GameListener {
    /// Snake (head first) and apple cells after a state change
    fn on_render(&mut self, _snake: &[CellId], _apples: &[CellId]) {}

    fn on_score_changed(&mut self, _score: u32) {}

    /// Fired once when the snake runs into itself
    fn on_game_ended(&mut self) {}

    /// Fired on every apple eaten, for sound or other feedback
    fn on_apple_eaten(&mut self) {}
}

/// Listener that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl GameListener for NoopListener {}

/// One outbound notification, as captured by [`RecordingListener`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Render {
        snake: Vec<CellId>,
        apples: Vec<CellId>,
    },
    ScoreChanged(u32),
    GameEnded,
    AppleEaten,
}

/// Listener that keeps every notification it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    pub events: Vec<GameEvent>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded events
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameListener for RecordingListener {
    fn on_render(&mut self, snake: &[CellId], apples: &[CellId]) {
        self.events.push(GameEvent::Render {
            snake: snake.to_vec(),
            apples: apples.to_vec(),
        });
    }

    fn on_score_changed(&mut self, score: u32) {
        self.events.push(GameEvent::ScoreChanged(score));
    }

    fn on_game_ended(&mut self) {
        self.events.push(GameEvent::GameEnded);
    }

    fn on_apple_eaten(&mut self) {
        self.events.push(GameEvent::AppleEaten);
    }
}
