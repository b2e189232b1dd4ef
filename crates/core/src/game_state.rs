//! Game state module - manages the complete session
//!
//! This module ties together the board, piece queue, line clear sequencer,
//! scoring and the boss. Time only advances through [`GameState::tick`];
//! commands are applied between ticks.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, RowList};
use crate::boss::BossState;
use crate::config::GameConfig;
use crate::events::{ClearedRow, GameEvent};
use crate::line_clear::LineClearSequencer;
use crate::pieces::ActivePiece;
use crate::rng::PieceQueue;
use crate::scoring::{
    boss_damage, effective_fall_interval_ms, fall_base_interval_ms, hard_drop_score,
    level_for_lines, line_clear_score,
};
use crate::snapshot::{ActiveSnapshot, BossSnapshot, GameSnapshot};
use crate::types::{
    AttackKind, GameAction, PieceKind, Tint, BOARD_WIDTH, CORRUPTION_CHANCE,
    GARBAGE_FILL_PROBABILITY, GARBAGE_ROWS_MAX, GARBAGE_ROWS_MIN, SOFT_DROP_POINTS_PER_ROW,
    SPEED_BOOST_MS, STUN_MS, TIME_PRESSURE_MS,
};

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver,
}

/// Complete game state
///
/// The RNG is injected so tests and replays can control every random draw.
#[derive(Debug, Clone)]
pub struct GameState<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
    queue: PieceQueue,
    board: Board,
    active: ActivePiece,
    next: ActivePiece,
    score: u32,
    level: u32,
    lines: u32,
    fall_ms: u32,
    fall_base_ms: u32,
    speed_boost_ms: u32,
    time_pressure_ms: u32,
    corruption_active: bool,
    boss: Option<BossState>,
    line_clear: LineClearSequencer,
    won: bool,
    game_over: bool,
    animation_ms: u32,
    events: Vec<GameEvent>,
}

impl GameState<StdRng> {
    /// New session seeded from `config.seed`
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> GameState<R> {
    /// New session drawing from the given RNG
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let placeholder = ActivePiece::spawn(PieceKind::I);
        let mut state = Self {
            config,
            rng,
            queue: PieceQueue::new(config.randomizer),
            board: Board::new(),
            active: placeholder,
            next: placeholder,
            score: 0,
            level: 1,
            lines: 0,
            fall_ms: 0,
            fall_base_ms: fall_base_interval_ms(1),
            speed_boost_ms: 0,
            time_pressure_ms: 0,
            corruption_active: false,
            boss: None,
            line_clear: LineClearSequencer::new(),
            won: false,
            game_over: false,
            animation_ms: 0,
            events: Vec::new(),
        };
        state.reset();
        state
    }

    /// Discard the session and start over with the same config.
    ///
    /// The RNG stream continues, so a replayed restart stays deterministic.
    pub fn restart(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.queue = PieceQueue::new(self.config.randomizer);
        self.board.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.fall_ms = 0;
        self.fall_base_ms = fall_base_interval_ms(1);
        self.speed_boost_ms = 0;
        self.time_pressure_ms = 0;
        self.corruption_active = false;
        self.boss = self.config.boss_mode.then(BossState::new);
        self.line_clear.reset();
        self.won = false;
        self.game_over = false;
        self.animation_ms = 0;
        self.events.clear();
        self.active = self.draw_piece();
        self.next = self.draw_piece();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    pub fn next(&self) -> ActivePiece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn boss(&self) -> Option<&BossState> {
        self.boss.as_ref()
    }

    pub fn speed_boost_ms(&self) -> u32 {
        self.speed_boost_ms
    }

    pub fn time_pressure_ms(&self) -> u32 {
        self.time_pressure_ms
    }

    pub fn corruption_active(&self) -> bool {
        self.corruption_active
    }

    pub fn pending_rows(&self) -> &[usize] {
        self.line_clear.pending_rows()
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Won or lost; commands and ticks no longer change the session.
    pub fn is_terminal(&self) -> bool {
        self.won || self.game_over
    }

    pub fn animation_ms(&self) -> u32 {
        self.animation_ms
    }

    pub fn fall_base_interval_ms(&self) -> u32 {
        self.fall_base_ms
    }

    /// Gravity interval with the active boss effects applied.
    pub fn effective_fall_interval_ms(&self) -> u32 {
        effective_fall_interval_ms(
            self.fall_base_ms,
            self.speed_boost_ms > 0,
            self.time_pressure_ms > 0,
        )
    }

    /// Row the active piece's origin would reach with a hard drop.
    pub fn ghost_y(&self) -> i8 {
        let mut dy = 0i8;
        while self.board.is_valid_placement(&self.active, 0, dy + 1, None) {
            dy += 1;
        }
        self.active.y + dy
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Mutable board access for scenario setup.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece (scenario setup).
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = piece;
    }

    /// Replace the queued next piece (scenario setup).
    pub fn set_next(&mut self, piece: ActivePiece) {
        self.next = piece;
    }

    /// Mutable boss access for scenario setup.
    pub fn boss_mut(&mut self) -> Option<&mut BossState> {
        self.boss.as_mut()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        self.board.write_corruption_grid(&mut out.corrupted);
        out.active = ActiveSnapshot::from(self.active);
        out.ghost_y = self.ghost_y();
        out.next = ActiveSnapshot::from(self.next);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.pending_rows.clear();
        out.pending_rows.extend_from_slice(self.line_clear.pending_rows());
        out.fall_interval_ms = self.effective_fall_interval_ms();
        out.speed_boost_ms = self.speed_boost_ms;
        out.time_pressure_ms = self.time_pressure_ms;
        out.corruption_active = self.corruption_active;
        out.boss = self.boss.as_ref().map(BossSnapshot::from);
        out.won = self.won;
        out.game_over = self.game_over;
        out.seed = self.config.seed;
        out.randomizer = self.config.randomizer;
        out.animation_ms = self.animation_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Draw a fresh piece at the spawn origin, rolling for corruption while
    /// corruption mode is on.
    fn draw_piece(&mut self) -> ActivePiece {
        let kind = self.queue.draw(&mut self.rng);
        let mut piece = ActivePiece::spawn(kind);
        if self.config.boss_mode && self.corruption_active {
            piece.corrupted = self.rng.gen_bool(CORRUPTION_CHANCE);
        }
        piece
    }

    /// Try to shift the active piece
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if self.is_terminal() {
            return false;
        }
        if !self.board.is_valid_placement(&self.active, dx, dy, None) {
            return false;
        }
        self.active.x += dx;
        self.active.y += dy;
        true
    }

    /// Advance to the next rotation state in place (no wall kicks)
    pub fn rotate_piece(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        let rotation = self.active.next_rotation();
        if !self
            .board
            .is_valid_placement(&self.active, 0, 0, Some(rotation))
        {
            return false;
        }
        self.active.rotation = rotation;
        true
    }

    /// Move down one row, awarding a point on success.
    pub fn soft_drop(&mut self) -> bool {
        if !self.move_piece(0, 1) {
            return false;
        }
        self.score = self.score.saturating_add(SOFT_DROP_POINTS_PER_ROW);
        true
    }

    /// Drop the active piece as far as it goes and settle it.
    ///
    /// Returns the rows descended. A piece that cannot descend is left in place
    /// and keeps falling under gravity.
    pub fn hard_drop(&mut self) -> u32 {
        if self.is_terminal() {
            return 0;
        }
        let mut rows = 0u32;
        while self.move_piece(0, 1) {
            rows += 1;
        }
        if rows == 0 {
            return 0;
        }
        self.score = self.score.saturating_add(hard_drop_score(rows));
        self.settle_active(rows);
        self.fall_ms = 0;
        rows
    }

    /// Apply a driver action. Restart only takes effect once the session is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1, 0),
            GameAction::MoveRight => self.move_piece(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop() > 0,
            GameAction::Rotate => self.rotate_piece(),
            GameAction::Restart => {
                if !self.is_terminal() {
                    return false;
                }
                self.restart();
                true
            }
        }
    }

    /// Advance the session by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: u32) -> TickOutcome {
        if self.game_over {
            return TickOutcome::GameOver;
        }
        if self.won {
            return TickOutcome::Continue;
        }

        self.advance_timers(dt_ms);

        let attack = match self.boss.as_mut() {
            Some(boss) if boss.should_attack() => Some(boss.select_attack(&mut self.rng)),
            _ => None,
        };
        if let Some(attack) = attack {
            self.apply_attack(attack);
        }

        if let Some(rows) = self.line_clear.advance(dt_ms) {
            self.commit_rows(&rows);
            if self.won {
                return TickOutcome::Continue;
            }
        }

        self.fall_ms = self.fall_ms.saturating_add(dt_ms);
        if self.fall_ms >= self.effective_fall_interval_ms() {
            if !self.move_piece(0, 1) {
                self.settle_active(0);
            }
            self.fall_ms = 0;
        }

        if self.game_over {
            TickOutcome::GameOver
        } else {
            TickOutcome::Continue
        }
    }

    fn advance_timers(&mut self, dt_ms: u32) {
        self.animation_ms = self.animation_ms.wrapping_add(dt_ms);

        if let Some(boss) = self.boss.as_mut() {
            boss.tick(dt_ms);
        }

        if self.speed_boost_ms > 0 {
            self.speed_boost_ms = self.speed_boost_ms.saturating_sub(dt_ms);
            if self.speed_boost_ms == 0 {
                self.events.push(GameEvent::EffectExpired {
                    effect: AttackKind::SpeedBoost,
                });
            }
        }

        if self.time_pressure_ms > 0 {
            self.time_pressure_ms = self.time_pressure_ms.saturating_sub(dt_ms);
            if self.time_pressure_ms == 0 {
                self.corruption_active = false;
                self.events.push(GameEvent::EffectExpired {
                    effect: AttackKind::TimePressure,
                });
            }
        }
    }

    fn apply_attack(&mut self, attack: AttackKind) {
        self.events.push(GameEvent::AttackFired { attack });
        match attack {
            AttackKind::GarbageLines => {
                let count = self.rng.gen_range(GARBAGE_ROWS_MIN..=GARBAGE_ROWS_MAX);
                let mut gaps = ArrayVec::new();
                for _ in 0..count {
                    let gap = self
                        .board
                        .inject_garbage_row(&mut self.rng, GARBAGE_FILL_PROBABILITY);
                    gaps.push(gap);
                }
                // Pending full rows moved up with the rest of the stack
                self.line_clear.shift_up(usize::from(count));
                self.events.push(GameEvent::GarbageInjected { gaps });
            }
            AttackKind::SpeedBoost => {
                self.speed_boost_ms = SPEED_BOOST_MS;
            }
            AttackKind::GridShake => {
                if let Some(boss) = self.boss.as_mut() {
                    boss.start_shake();
                }
            }
            AttackKind::PieceTheft => {
                self.next = self.draw_piece();
            }
            AttackKind::TimePressure => {
                self.time_pressure_ms = TIME_PRESSURE_MS;
                self.corruption_active = true;
            }
        }
    }

    /// Settle the active piece, promote the next one and check the spawn.
    fn settle_active(&mut self, hard_drop_rows: u32) {
        let piece = self.active;
        let full = self.board.settle(&piece);
        self.events.push(GameEvent::PieceSettled {
            cells: piece.cells().into_iter().filter(|&(_, y)| y >= 0).collect(),
            tint: piece.tint(),
            hard_drop_rows,
        });

        if self.line_clear.begin(&full) {
            self.events.push(GameEvent::LinesPending { rows: full });
        }

        self.active = self.next;
        self.next = self.draw_piece();

        if !self.board.is_valid_placement(&self.active, 0, 0, None) {
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
        }
    }

    /// Remove committed rows and apply score, level and boss damage.
    fn commit_rows(&mut self, rows: &RowList) {
        let cleared: Vec<ClearedRow> = rows
            .iter()
            .filter(|&&y| y < self.board.height() as usize)
            .map(|&y| {
                let mut cells = [None; BOARD_WIDTH as usize];
                cells.copy_from_slice(self.board.row(y));
                ClearedRow { row: y, cells }
            })
            .collect();

        let n = self.board.remove_rows(rows);
        let points = line_clear_score(n, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(n as u32);

        let previous_level = self.level;
        self.level = level_for_lines(self.lines);
        self.fall_base_ms = fall_base_interval_ms(self.level);

        self.events.push(GameEvent::RowsCleared {
            rows: cleared,
            points,
        });
        if self.level > previous_level {
            self.events.push(GameEvent::LevelUp { level: self.level });
        }

        if n == 0 {
            return;
        }
        let Some(boss) = self.boss.as_mut() else {
            return;
        };

        let report = boss.take_damage(boss_damage(n));
        let health = boss.health();
        let defeated = boss.is_defeated();
        if report.applied > 0 {
            self.events.push(GameEvent::BossDamaged {
                amount: report.applied,
                health,
            });
        }
        if let Some(phase) = report.phase_changed {
            self.events.push(GameEvent::BossPhaseChanged { phase });
        }
        if report.stunned {
            self.events.push(GameEvent::BossStunned {
                duration_ms: STUN_MS,
            });
        }
        if defeated {
            self.won = true;
            if report.defeated {
                self.events.push(GameEvent::BossDefeated);
            }
        }
    }

    /// Tint of the cell at (x, y) if settled
    pub fn cell_tint(&self, x: i8, y: i8) -> Option<Tint> {
        self.board.get(x, y).flatten()
    }
}
