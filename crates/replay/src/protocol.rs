//! JSON output of a replay run.
//!
//! Board rows are strings, one char per cell: `.` empty, a piece letter
//! (`I O T S Z J L`) for settled piece cells, `#` for corrupted cells.

use serde::Serialize;

use crate::core::{ActiveSnapshot, BossSnapshot, ClearedRow, GameEvent, GameSnapshot};
use crate::types::{PieceKind, Tint};

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub seed: u64,
    pub boss_mode: bool,
    pub randomizer: &'static str,
    pub steps_run: usize,
    pub elapsed_ms: u64,
    pub outcome: Outcome,
    #[serde(rename = "final")]
    pub final_state: SnapshotOut,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Running,
    Won,
    GameOver,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieceOut {
    pub kind: &'static str,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub corrupted: bool,
}

impl From<ActiveSnapshot> for PieceOut {
    fn from(p: ActiveSnapshot) -> Self {
        Self {
            kind: p.kind.as_str(),
            rotation: p.rotation,
            x: p.x,
            y: p.y,
            corrupted: p.corrupted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BossOut {
    pub health: u32,
    pub max_health: u32,
    pub phase: u8,
    pub stunned: bool,
    pub stun_remaining_ms: u32,
    pub attack_timer_ms: u32,
    pub attack_cooldown_ms: u32,
    pub last_attack: Option<&'static str>,
}

impl From<&BossSnapshot> for BossOut {
    fn from(b: &BossSnapshot) -> Self {
        Self {
            health: b.health,
            max_health: b.max_health,
            phase: b.phase,
            stunned: b.stunned,
            stun_remaining_ms: b.stun_remaining_ms,
            attack_timer_ms: b.attack_timer_ms,
            attack_cooldown_ms: b.attack_cooldown_ms,
            last_attack: b.last_attack.map(|a| a.as_str()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotOut {
    pub board: Vec<String>,
    pub active: PieceOut,
    pub next: PieceOut,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pending_rows: Vec<usize>,
    pub fall_interval_ms: u32,
    pub speed_boost_ms: u32,
    pub time_pressure_ms: u32,
    pub corruption_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boss: Option<BossOut>,
    pub won: bool,
    pub game_over: bool,
}

impl From<&GameSnapshot> for SnapshotOut {
    fn from(s: &GameSnapshot) -> Self {
        let board = s
            .board
            .iter()
            .zip(s.corrupted.iter())
            .map(|(codes, flags)| {
                codes
                    .iter()
                    .zip(flags.iter())
                    .map(|(&code, &flag)| cell_char(Tint::from_code(code), flag != 0))
                    .collect()
            })
            .collect();
        Self {
            board,
            active: s.active.into(),
            next: s.next.into(),
            score: s.score,
            level: s.level,
            lines: s.lines,
            pending_rows: s.pending_rows.clone(),
            fall_interval_ms: s.fall_interval_ms,
            speed_boost_ms: s.speed_boost_ms,
            time_pressure_ms: s.time_pressure_ms,
            corruption_active: s.corruption_active,
            boss: s.boss.as_ref().map(BossOut::from),
            won: s.won,
            game_over: s.game_over,
        }
    }
}

/// Board character for a cell.
pub fn cell_char(cell: Option<Tint>, corrupted: bool) -> char {
    match cell {
        None => '.',
        Some(_) if corrupted => '#',
        Some(Tint::Corruption) => '#',
        Some(Tint::Piece(kind)) => piece_char(kind),
    }
}

fn piece_char(kind: PieceKind) -> char {
    match kind {
        PieceKind::I => 'I',
        PieceKind::O => 'O',
        PieceKind::T => 'T',
        PieceKind::S => 'S',
        PieceKind::Z => 'Z',
        PieceKind::J => 'J',
        PieceKind::L => 'L',
    }
}

/// One engine event, tagged with when it happened.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub step: usize,
    pub time_ms: u64,
    #[serde(flatten)]
    pub event: EventOut,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventOut {
    PieceSettled {
        cells: Vec<(i8, i8)>,
        piece: char,
        hard_drop_rows: u32,
    },
    LinesPending {
        rows: Vec<usize>,
    },
    RowsCleared {
        rows: Vec<usize>,
        cells: Vec<String>,
        points: u32,
    },
    LevelUp {
        level: u32,
    },
    AttackFired {
        attack: &'static str,
    },
    GarbageInjected {
        gaps: Vec<u8>,
    },
    EffectExpired {
        effect: &'static str,
    },
    BossDamaged {
        amount: u32,
        health: u32,
    },
    BossPhaseChanged {
        phase: u8,
    },
    BossStunned {
        duration_ms: u32,
    },
    BossDefeated,
    GameOver,
}

fn row_string(row: &ClearedRow) -> String {
    row.cells.iter().map(|&c| cell_char(c, false)).collect()
}

impl From<&GameEvent> for EventOut {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::PieceSettled {
                cells,
                tint,
                hard_drop_rows,
            } => EventOut::PieceSettled {
                cells: cells.to_vec(),
                piece: cell_char(Some(*tint), false),
                hard_drop_rows: *hard_drop_rows,
            },
            GameEvent::LinesPending { rows } => EventOut::LinesPending {
                rows: rows.to_vec(),
            },
            GameEvent::RowsCleared { rows, points } => EventOut::RowsCleared {
                rows: rows.iter().map(|r| r.row).collect(),
                cells: rows.iter().map(row_string).collect(),
                points: *points,
            },
            GameEvent::LevelUp { level } => EventOut::LevelUp { level: *level },
            GameEvent::AttackFired { attack } => EventOut::AttackFired {
                attack: attack.as_str(),
            },
            GameEvent::GarbageInjected { gaps } => EventOut::GarbageInjected {
                gaps: gaps.to_vec(),
            },
            GameEvent::EffectExpired { effect } => EventOut::EffectExpired {
                effect: effect.as_str(),
            },
            GameEvent::BossDamaged { amount, health } => EventOut::BossDamaged {
                amount: *amount,
                health: *health,
            },
            GameEvent::BossPhaseChanged { phase } => EventOut::BossPhaseChanged { phase: *phase },
            GameEvent::BossStunned { duration_ms } => EventOut::BossStunned {
                duration_ms: *duration_ms,
            },
            GameEvent::BossDefeated => EventOut::BossDefeated,
            GameEvent::GameOver => EventOut::GameOver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameState};

    #[test]
    fn board_rows_use_piece_letters_and_hash_for_corruption() {
        let mut state = GameState::new(GameConfig::classic(1));
        state.board_mut().set(0, 19, Some(Tint::Piece(PieceKind::T)));
        state.board_mut().set_corrupted(1, 19, Tint::Corruption);
        let out = SnapshotOut::from(&state.snapshot());
        assert_eq!(out.board.len(), 20);
        assert_eq!(out.board[19], "T#........");
        assert!(out.boss.is_none());
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let record = EventRecord {
            step: 2,
            time_ms: 48,
            event: EventOut::from(&GameEvent::LevelUp { level: 3 }),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "levelUp");
        assert_eq!(json["level"], 3);
        assert_eq!(json["step"], 2);
    }
}
