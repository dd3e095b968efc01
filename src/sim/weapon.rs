//! Weapon state machine
//!
//! Every weapon is the same state machine parameterized by a `WeaponConfig`.
//! Timers are recorded timestamps compared against the frame clock; nothing
//! is scheduled.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::elapsed_ms;
use crate::{angle_of, direction_from_angle, normalize_or};

/// Direction used when the aim vector has zero length
pub const FALLBACK_AIM: Vec2 = Vec2::X;

/// How a single trigger pull turns into projectile directions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShotPattern {
    /// One projectile along the aim direction
    Single,
    /// `pellets` projectiles evenly fanned across `spread_deg`, centered on the aim
    Spread { pellets: u32, spread_deg: f32 },
}

impl ShotPattern {
    /// Number of projectiles emitted per shot
    pub fn pellet_count(&self) -> u32 {
        match *self {
            ShotPattern::Single => 1,
            ShotPattern::Spread { pellets, .. } => pellets.max(1),
        }
    }

    /// Unit directions for one shot aimed along `aim`
    pub fn directions(&self, aim: Vec2) -> Vec<Vec2> {
        let aim = normalize_or(aim, FALLBACK_AIM);
        match *self {
            ShotPattern::Single => vec![aim],
            ShotPattern::Spread { pellets, spread_deg } => {
                if pellets <= 1 {
                    return vec![aim];
                }
                let base = angle_of(aim);
                let spread = spread_deg.to_radians();
                let step = spread / (pellets - 1) as f32;
                (0..pellets)
                    .map(|i| direction_from_angle(base - spread / 2.0 + i as f32 * step))
                    .collect()
            }
        }
    }
}

/// Ammo consumed by one successful shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmmoCost {
    /// One round regardless of pellet count
    #[default]
    PerShot,
    /// One round per emitted projectile
    PerPellet,
}

/// Static weapon parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub name: String,
    pub clip_size: u32,
    pub reload_ms: u64,
    pub cooldown_ms: u64,
    pub pattern: ShotPattern,
    #[serde(default)]
    pub ammo_cost: AmmoCost,
}

impl WeaponConfig {
    pub fn handgun() -> Self {
        Self {
            name: "Handgun".into(),
            clip_size: 12,
            reload_ms: 1500,
            cooldown_ms: 400,
            pattern: ShotPattern::Single,
            ammo_cost: AmmoCost::PerShot,
        }
    }

    pub fn shotgun() -> Self {
        Self {
            name: "Shotgun".into(),
            clip_size: 8,
            reload_ms: 2000,
            cooldown_ms: 800,
            pattern: ShotPattern::Spread {
                pellets: 7,
                spread_deg: 45.0,
            },
            ammo_cost: AmmoCost::PerShot,
        }
    }

    pub fn assault_rifle() -> Self {
        Self {
            name: "Assault Rifle".into(),
            clip_size: 24,
            reload_ms: 2500,
            cooldown_ms: 100,
            pattern: ShotPattern::Single,
            ammo_cost: AmmoCost::PerShot,
        }
    }

    /// Weapon bound to a number key (1..=3)
    pub fn for_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Self::handgun()),
            2 => Some(Self::shotgun()),
            3 => Some(Self::assault_rifle()),
            _ => None,
        }
    }

    /// Ammo one shot costs
    pub fn shot_cost(&self) -> u32 {
        match self.ammo_cost {
            AmmoCost::PerShot => 1,
            AmmoCost::PerPellet => self.pattern.pellet_count(),
        }
    }
}

/// Observable weapon state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponState {
    Ready,
    Cooldown,
    Reloading,
    /// Not reloading and too few rounds left for one shot
    Empty,
}

/// A weapon instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub config: WeaponConfig,
    pub ammo: u32,
    /// Time of the last successful shot (None until the first shot)
    pub last_shot_ms: Option<u64>,
    pub reloading: bool,
    pub reload_start_ms: u64,
}

impl Weapon {
    /// Fresh instance with a full clip
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            ammo: config.clip_size,
            config,
            last_shot_ms: None,
            reloading: false,
            reload_start_ms: 0,
        }
    }

    pub fn state(&self, now_ms: u64) -> WeaponState {
        if self.reloading {
            WeaponState::Reloading
        } else if self.ammo < self.config.shot_cost() {
            WeaponState::Empty
        } else if self.cooling_down(now_ms) {
            WeaponState::Cooldown
        } else {
            WeaponState::Ready
        }
    }

    fn cooling_down(&self, now_ms: u64) -> bool {
        self.last_shot_ms
            .is_some_and(|last| elapsed_ms(now_ms, last) < self.config.cooldown_ms)
    }

    /// Whether `shoot` would fire at `now_ms`
    pub fn can_shoot(&self, now_ms: u64) -> bool {
        !self.reloading
            && self.ammo > 0
            && self.ammo >= self.config.shot_cost()
            && !self.cooling_down(now_ms)
    }

    /// Fire toward `aim`. Returns the projectile directions, or `None` when
    /// reloading, empty or still cooling down.
    pub fn shoot(&mut self, aim: Vec2, now_ms: u64) -> Option<Vec<Vec2>> {
        if !self.can_shoot(now_ms) {
            return None;
        }
        self.last_shot_ms = Some(now_ms);
        self.ammo -= self.config.shot_cost();
        Some(self.config.pattern.directions(aim))
    }

    /// Start reloading unless already full or reloading
    pub fn reload(&mut self, now_ms: u64) -> bool {
        if self.reloading || self.ammo >= self.config.clip_size {
            return false;
        }
        self.reloading = true;
        self.reload_start_ms = now_ms;
        log::debug!("{} reloading", self.config.name);
        true
    }

    /// Finish a reload once its duration has elapsed
    pub fn update(&mut self, now_ms: u64) {
        if self.reloading && elapsed_ms(now_ms, self.reload_start_ms) >= self.config.reload_ms {
            self.ammo = self.config.clip_size;
            self.reloading = false;
            log::debug!("{} reloaded", self.config.name);
        }
    }
}
