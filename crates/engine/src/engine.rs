//! Session state machine: `Idle -> Playing <-> Paused -> GameOver`.
//!
//! Gameplay rejections (blocked move, blocked rotation, command in the wrong state)
//! are silent no-ops. Command methods return whether anything was applied.

use tracing::{debug, info, trace};

use crate::core::{
    ActiveSnapshot, Board, GameSnapshot, KindSource, Matrix, Player, SimpleRng,
};
use crate::events::{ListenerId, Listeners};
use crate::types::{Command, EngineEvent, SessionState};

#[derive(Debug)]
pub struct GameEngine<S = SimpleRng> {
    board: Board,
    player: Player,
    source: S,
    state: SessionState,
    /// Milliseconds accumulated toward the next gravity step
    drop_counter_ms: u64,
    /// Timestamp of the previous `update`; `None` until the first one after
    /// start or pause.
    last_update_ms: Option<u64>,
    /// Rotation target, reused so rotating does not allocate
    scratch: Matrix,
    listeners: Listeners,
}

impl GameEngine<SimpleRng> {
    /// Standard 12x24 engine with a seeded piece RNG
    pub fn new(seed: u32) -> Self {
        Self::with_source(Board::default(), SimpleRng::new(seed))
    }
}

impl Default for GameEngine<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: KindSource> GameEngine<S> {
    /// Engine over `board` drawing kinds from `source`. The board is cleared on `start()`.
    pub fn with_source(board: Board, source: S) -> Self {
        Self {
            board,
            player: Player::new(),
            source,
            state: SessionState::Idle,
            drop_counter_ms: 0,
            last_update_ms: None,
            scratch: Matrix::default(),
            listeners: Listeners::default(),
        }
    }

    /// Register a listener; it sees every later event, in order.
    pub fn subscribe(&mut self, listener: impl FnMut(EngineEvent) + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn emit(&mut self, event: EngineEvent) {
        self.listeners.emit(event);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Playing or paused: a session is in progress
    pub fn is_playing(&self) -> bool {
        matches!(self.state, SessionState::Playing | SessionState::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.player.score()
    }

    pub fn level(&self) -> u32 {
        self.player.level()
    }

    pub fn lines(&self) -> u32 {
        self.player.lines()
    }

    /// Gravity period at the current level
    pub fn drop_interval_ms(&self) -> u32 {
        self.player.drop_interval_ms()
    }

    /// Milliseconds banked toward the next gravity step
    pub fn drop_counter_ms(&self) -> u64 {
        self.drop_counter_ms
    }

    /// Reset the board and player and begin a new session from any state.
    pub fn start(&mut self) {
        self.board.clear();
        self.player.reset();
        self.player.ensure_next(&mut self.source);
        self.player.spawn_piece(&self.board, &mut self.source);
        self.state = SessionState::Playing;
        self.reset_gravity();

        info!(
            width = self.board.width(),
            height = self.board.height(),
            "session started"
        );
        self.emit(EngineEvent::ScoreChanged);
        self.emit(EngineEvent::StateChanged);
    }

    /// Clock tick with a monotonic timestamp in milliseconds.
    ///
    /// The first tick after start or unpause only sets the baseline.
    pub fn update(&mut self, now_ms: u64) {
        if self.state != SessionState::Playing {
            return;
        }

        let last = *self.last_update_ms.get_or_insert(now_ms);
        self.last_update_ms = Some(now_ms);
        self.drop_counter_ms += now_ms.saturating_sub(last);

        if self.drop_counter_ms >= self.player.drop_interval_ms() as u64 {
            self.step_down();
            self.drop_counter_ms = 0;
        }

        self.emit(EngineEvent::StateChanged);
    }

    /// Apply an input command. Returns whether it changed anything.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.drop_piece(),
            Command::HardDrop => self.hard_drop(),
            Command::Rotate => self.rotate(),
            Command::TogglePause => self.toggle_pause(),
            Command::Start => {
                self.start();
                true
            }
        }
    }

    /// Playing (not paused, not over) with a falling piece
    fn can_move(&self) -> bool {
        self.state == SessionState::Playing && self.player.current().is_some()
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i16) -> bool {
        if !self.can_move() {
            return false;
        }
        let Some(piece) = self.player.current() else {
            return false;
        };
        let (x, y) = self.player.position();
        if self.board.collides(piece.matrix(), x + dx, y) {
            trace!(dx, x, y, "move blocked");
            return false;
        }

        self.player.set_position(x + dx, y);
        self.emit(EngineEvent::StateChanged);
        true
    }

    /// Soft drop: one row down, or lock in place if the row below is blocked.
    pub fn drop_piece(&mut self) -> bool {
        if !self.can_move() {
            return false;
        }
        if self.step_down() {
            self.emit(EngineEvent::StateChanged);
        }
        true
    }

    /// One row down. Locks the piece at its current position when blocked.
    ///
    /// Returns true if the piece moved.
    fn step_down(&mut self) -> bool {
        let Some(piece) = self.player.current() else {
            return false;
        };
        let (x, y) = self.player.position();
        if self.board.collides(piece.matrix(), x, y + 1) {
            self.lock_piece();
            return false;
        }
        self.player.set_position(x, y + 1);
        true
    }

    /// Drop straight to the resting row and lock there.
    pub fn hard_drop(&mut self) -> bool {
        if !self.can_move() {
            return false;
        }
        let Some(landing) = self.ghost_y() else {
            return false;
        };
        let (x, _) = self.player.position();
        self.player.set_position(x, landing);
        self.lock_piece();
        true
    }

    /// Rotate clockwise, nudging sideways if the rotated shape does not fit.
    ///
    /// Offsets tried in order: 0, +1, -1, +2, -2, ... up to the rotated width. If
    /// none fits, nothing changes.
    pub fn rotate(&mut self) -> bool {
        if !self.can_move() {
            return false;
        }
        let Some(piece) = self.player.current() else {
            return false;
        };
        piece.matrix().rotate_cw_into(&mut self.scratch);

        let (x, y) = self.player.position();
        let Some(dx) = kick_offsets(self.scratch.cols())
            .find(|dx| !self.board.collides(&self.scratch, x + dx, y))
        else {
            trace!(x, y, "rotation blocked");
            return false;
        };

        if dx != 0 {
            trace!(dx, x, y, "rotation kicked");
        }
        if let Some(piece) = self.player.current_mut() {
            piece.swap_matrix(&mut self.scratch);
        }
        self.player.set_position(x + dx, y);
        self.emit(EngineEvent::StateChanged);
        true
    }

    /// Pause or resume. Time spent paused never counts toward gravity.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::Idle | SessionState::GameOver => return false,
        };
        self.reset_gravity();
        debug!(state = self.state.as_str(), "pause toggled");
        self.emit(EngineEvent::StateChanged);
        true
    }

    fn reset_gravity(&mut self) {
        self.drop_counter_ms = 0;
        self.last_update_ms = None;
    }

    /// Merge the falling piece, clear lines, score, and spawn the next piece.
    fn lock_piece(&mut self) {
        let Some(piece) = self.player.current() else {
            return;
        };
        let kind = piece.kind();
        let (x, y) = self.player.position();
        self.board.merge_piece(piece.matrix(), x, y);

        let lines = self.board.clear_full_lines() as u32;
        debug!(kind = kind.as_str(), x, y, lines, "piece locked");

        if lines > 0 {
            let level_before = self.player.level();
            self.player.add_lines_cleared(lines);
            self.emit(EngineEvent::LinesCleared(lines));
            self.emit(EngineEvent::ScoreChanged);

            if self.player.level() > level_before {
                info!(level = self.player.level(), "level up");
                self.emit(EngineEvent::LevelUp);
            }
        }

        self.player.spawn_piece(&self.board, &mut self.source);
        if self.spawn_blocked() {
            self.state = SessionState::GameOver;
            info!(
                score = self.player.score(),
                level = self.player.level(),
                lines = self.player.lines(),
                "game over"
            );
            self.emit(EngineEvent::GameOver);
        }

        self.emit(EngineEvent::StateChanged);
    }

    fn spawn_blocked(&self) -> bool {
        let (x, y) = self.player.position();
        self.player
            .current()
            .is_some_and(|piece| self.board.collides(piece.matrix(), x, y))
    }

    /// Row the falling piece would come to rest on
    pub fn ghost_y(&self) -> Option<i16> {
        let piece = self.player.current()?;
        let (x, mut y) = self.player.position();
        while !self.board.collides(piece.matrix(), x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Refresh `out`, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.grid);
        out.active = self
            .player
            .current()
            .map(|piece| ActiveSnapshot::new(piece, self.player.position()));
        out.ghost_y = self.ghost_y();
        out.next = self.player.next().map(|piece| piece.kind());
        out.score = self.player.score();
        out.level = self.player.level();
        out.lines = self.player.lines();
        out.state = self.state;
    }
}

/// 0, then +1, -1, +2, -2, ... +width, -width
fn kick_offsets(width: i16) -> impl Iterator<Item = i16> {
    std::iter::once(0).chain((1..=width).flat_map(|k| [k, -k]))
}
