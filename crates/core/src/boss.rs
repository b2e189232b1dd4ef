//! Boss module - health, phases, stun and the attack scheduler
//!
//! The boss starts in phase 1 with 100 health. Phases only move forward:
//!
//! | Phase | Health | Cooldown | Attacks |
//! |-------|--------|----------|---------|
//! | 1 | > 66 | 5000ms | garbage, speed boost |
//! | 2 | ≤ 66 | 2500ms | + grid shake |
//! | 3 | ≤ 33 | 2000ms | + piece theft, time pressure |
//!
//! A single hit of 20 or more stuns the boss for 1500ms. While stunned it takes
//! no damage and its attack timer is frozen.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::types::{
    AttackKind, ATTACK_COOLDOWN_MS, ATTACK_WARNING_DENOMINATOR, ATTACK_WARNING_NUMERATOR,
    BOSS_MAX_HEALTH, GRID_SHAKE_DECAY_PER_MS, GRID_SHAKE_INTENSITY, GRID_SHAKE_MS,
    PHASE_THREE_HEALTH, PHASE_TWO_HEALTH, STUN_DAMAGE, STUN_MS,
};

/// Attack candidates for one selection.
pub type AttackList = ArrayVec<AttackKind, 5>;

/// What a call to [`BossState::take_damage`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageReport {
    /// Health actually removed (0 while stunned).
    pub applied: u32,
    /// New phase, if the hit moved the boss into a later phase.
    pub phase_changed: Option<u8>,
    /// The hit started a stun.
    pub stunned: bool,
    /// Health reached 0 with this hit.
    pub defeated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossState {
    health: u32,
    phase: u8,
    stunned: bool,
    stun_remaining_ms: u32,
    attack_timer_ms: u32,
    attack_cooldown_ms: u32,
    last_attack: Option<AttackKind>,
    animation_ms: u32,
    shake_intensity: f32,
    shake_remaining_ms: u32,
}

impl BossState {
    pub fn new() -> Self {
        Self {
            health: BOSS_MAX_HEALTH,
            phase: 1,
            stunned: false,
            stun_remaining_ms: 0,
            attack_timer_ms: 0,
            attack_cooldown_ms: ATTACK_COOLDOWN_MS[0],
            last_attack: None,
            animation_ms: 0,
            shake_intensity: 0.0,
            shake_remaining_ms: 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        BOSS_MAX_HEALTH
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn stunned(&self) -> bool {
        self.stunned
    }

    pub fn stun_remaining_ms(&self) -> u32 {
        self.stun_remaining_ms
    }

    pub fn attack_timer_ms(&self) -> u32 {
        self.attack_timer_ms
    }

    pub fn attack_cooldown_ms(&self) -> u32 {
        self.attack_cooldown_ms
    }

    pub fn last_attack(&self) -> Option<AttackKind> {
        self.last_attack
    }

    pub fn animation_ms(&self) -> u32 {
        self.animation_ms
    }

    pub fn shake_intensity(&self) -> f32 {
        self.shake_intensity
    }

    pub fn shake_remaining_ms(&self) -> u32 {
        self.shake_remaining_ms
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Apply a hit. Ignored entirely while stunned.
    pub fn take_damage(&mut self, amount: u32) -> DamageReport {
        if self.stunned {
            return DamageReport::default();
        }

        let before = self.health;
        self.health = self.health.saturating_sub(amount);

        let target = phase_for_health(self.health);
        let phase_changed = if target > self.phase {
            self.phase = target;
            self.attack_cooldown_ms = self
                .attack_cooldown_ms
                .min(ATTACK_COOLDOWN_MS[(target - 1) as usize]);
            Some(target)
        } else {
            None
        };

        let stunned = amount >= STUN_DAMAGE;
        if stunned {
            self.stunned = true;
            self.stun_remaining_ms = STUN_MS;
        }

        DamageReport {
            applied: before - self.health,
            phase_changed,
            stunned,
            defeated: before > 0 && self.health == 0,
        }
    }

    /// Advance animation, shake decay, stun countdown and the attack timer.
    pub fn tick(&mut self, dt_ms: u32) {
        self.animation_ms = self.animation_ms.wrapping_add(dt_ms);

        if self.shake_remaining_ms > 0 {
            self.shake_remaining_ms = self.shake_remaining_ms.saturating_sub(dt_ms);
            self.shake_intensity =
                (self.shake_intensity - dt_ms as f32 * GRID_SHAKE_DECAY_PER_MS).max(0.0);
        }

        if self.stunned {
            self.stun_remaining_ms = self.stun_remaining_ms.saturating_sub(dt_ms);
            if self.stun_remaining_ms == 0 {
                self.stunned = false;
            }
        }

        // Stun state after the countdown decides whether the timer runs
        if !self.stunned {
            self.attack_timer_ms = self.attack_timer_ms.saturating_add(dt_ms);
        }
    }

    pub fn should_attack(&self) -> bool {
        !self.stunned && self.attack_timer_ms >= self.attack_cooldown_ms
    }

    /// Attack timer is in the last fifth of the cooldown.
    pub fn attack_imminent(&self) -> bool {
        !self.stunned
            && u64::from(self.attack_timer_ms) * u64::from(ATTACK_WARNING_DENOMINATOR)
                > u64::from(self.attack_cooldown_ms) * u64::from(ATTACK_WARNING_NUMERATOR)
    }

    /// Attacks available this phase, minus the previous attack when there is a choice.
    pub fn candidate_attacks(&self) -> AttackList {
        let all = attacks_for_phase(self.phase);
        if all.len() > 1 {
            if let Some(last) = self.last_attack {
                return all.iter().copied().filter(|&a| a != last).collect();
            }
        }
        all.iter().copied().collect()
    }

    /// Pick the next attack uniformly, reset the timer and remember the choice.
    pub fn select_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> AttackKind {
        let candidates = self.candidate_attacks();
        let attack = if candidates.is_empty() {
            AttackKind::GarbageLines
        } else {
            candidates[rng.gen_range(0..candidates.len())]
        };
        self.last_attack = Some(attack);
        self.attack_timer_ms = 0;
        attack
    }

    /// Start the grid shake visual.
    pub fn start_shake(&mut self) {
        self.shake_intensity = GRID_SHAKE_INTENSITY;
        self.shake_remaining_ms = GRID_SHAKE_MS;
    }

    pub fn shaking(&self) -> bool {
        self.shake_remaining_ms > 0
    }
}

impl Default for BossState {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_for_health(health: u32) -> u8 {
    if health <= PHASE_THREE_HEALTH {
        3
    } else if health <= PHASE_TWO_HEALTH {
        2
    } else {
        1
    }
}

/// Attack pool for a phase (phases past 3 use the phase 3 pool).
pub fn attacks_for_phase(phase: u8) -> &'static [AttackKind] {
    const PHASE_ONE: [AttackKind; 2] = [AttackKind::GarbageLines, AttackKind::SpeedBoost];
    const PHASE_TWO: [AttackKind; 3] = [
        AttackKind::GarbageLines,
        AttackKind::SpeedBoost,
        AttackKind::GridShake,
    ];
    const PHASE_THREE: [AttackKind; 5] = [
        AttackKind::GarbageLines,
        AttackKind::SpeedBoost,
        AttackKind::GridShake,
        AttackKind::PieceTheft,
        AttackKind::TimePressure,
    ];
    match phase {
        0 | 1 => &PHASE_ONE,
        2 => &PHASE_TWO,
        _ => &PHASE_THREE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fresh_boss() {
        let boss = BossState::new();
        assert_eq!(boss.health(), 100);
        assert_eq!(boss.phase(), 1);
        assert_eq!(boss.attack_cooldown_ms(), 5000);
        assert!(!boss.stunned());
        assert!(!boss.should_attack());
    }

    #[test]
    fn small_hits_do_not_stun() {
        let mut boss = BossState::new();
        let report = boss.take_damage(15);
        assert_eq!(report.applied, 15);
        assert!(!report.stunned);
        assert!(!boss.stunned());
        assert_eq!(boss.health(), 85);
    }

    #[test]
    fn phase_can_skip_to_three() {
        let mut boss = BossState::new();
        boss.take_damage(15);
        boss.take_damage(15);
        boss.take_damage(15);
        boss.take_damage(15);
        assert_eq!(boss.health(), 40);
        assert_eq!(boss.phase(), 2);

        let report = boss.take_damage(10);
        assert_eq!(report.phase_changed, Some(3));
        assert_eq!(boss.attack_cooldown_ms(), 2000);

        let mut big = BossState::new();
        let report = big.take_damage(70);
        assert_eq!(report.phase_changed, Some(3));
        assert_eq!(big.phase(), 3);
    }

    #[test]
    fn stun_blocks_damage_and_attack_timer() {
        let mut boss = BossState::new();
        let report = boss.take_damage(25);
        assert!(report.stunned);
        assert_eq!(boss.stun_remaining_ms(), 1500);

        assert_eq!(boss.take_damage(10), DamageReport::default());
        assert_eq!(boss.health(), 75);

        boss.tick(1499);
        assert!(boss.stunned());
        assert_eq!(boss.attack_timer_ms(), 0);
        boss.tick(1);
        assert!(!boss.stunned());
        assert_eq!(boss.attack_timer_ms(), 1);
    }

    #[test]
    fn killing_blow_still_stuns() {
        let mut boss = BossState::new();
        boss.take_damage(15);
        boss.take_damage(15);
        boss.take_damage(15);
        boss.take_damage(15);
        boss.take_damage(15);
        assert_eq!(boss.health(), 25);
        assert_eq!(boss.phase(), 3);

        let report = boss.take_damage(30);
        assert!(report.defeated);
        assert!(report.stunned);
        assert_eq!(report.applied, 25);
        assert_eq!(report.phase_changed, None);
        assert_eq!(boss.health(), 0);
        assert!(boss.is_defeated());
    }

    #[test]
    fn attack_schedule_and_warning() {
        let mut boss = BossState::new();
        boss.tick(4000);
        assert!(!boss.attack_imminent());
        boss.tick(1);
        assert!(boss.attack_imminent());
        boss.tick(999);
        assert!(boss.should_attack());

        let mut rng = StdRng::seed_from_u64(1);
        let attack = boss.select_attack(&mut rng);
        assert!(attacks_for_phase(1).contains(&attack));
        assert_eq!(boss.attack_timer_ms(), 0);
        assert_eq!(boss.last_attack(), Some(attack));
    }

    #[test]
    fn phase_one_never_repeats() {
        let mut boss = BossState::new();
        let mut rng = StdRng::seed_from_u64(99);
        let mut prev = boss.select_attack(&mut rng);
        for _ in 0..100 {
            let next = boss.select_attack(&mut rng);
            assert_ne!(next, prev);
            prev = next;
        }
    }

    #[test]
    fn candidates_exclude_previous_attack() {
        let mut boss = BossState::new();
        boss.take_damage(15);
        boss.take_damage(15);
        boss.take_damage(15);
        boss.take_damage(15);
        boss.take_damage(15);
        boss.last_attack = Some(AttackKind::GridShake);
        let candidates = boss.candidate_attacks();
        assert_eq!(candidates.len(), 4);
        assert!(!candidates.contains(&AttackKind::GridShake));
    }

    #[test]
    fn shake_decays_while_active() {
        let mut boss = BossState::new();
        boss.start_shake();
        assert_eq!(boss.shake_intensity(), 3.0);
        boss.tick(100);
        assert!((boss.shake_intensity() - 2.0).abs() < 1e-4);
        boss.tick(1900);
        assert!(!boss.shaking());
        assert_eq!(boss.shake_intensity(), 0.0);
    }
}
