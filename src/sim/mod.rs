//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Time comes in through `FrameTime`, never from a global clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod agent;
pub mod camera;
pub mod clock;
pub mod collision;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wave;
pub mod weapon;

pub use agent::{Enemy, EnemyAi, EnemyKind, MoveIntent, Player, clamp_to_world};
pub use camera::Camera;
pub use clock::{FrameClock, FrameTime};
pub use collision::{Aabb, HitReport, resolve_contact_damage, resolve_projectile_hits};
pub use projectile::{Projectile, update_projectiles};
pub use state::{GamePhase, GameState};
pub use tick::{FrameInput, FrameReport, SessionSignal, tick};
pub use wave::{WaveEvent, WavePhase, WaveState, next_wave_count};
pub use weapon::{AmmoCost, ShotPattern, Weapon, WeaponConfig, WeaponState};
