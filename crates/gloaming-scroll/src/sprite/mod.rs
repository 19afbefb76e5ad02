//! Transient fairies and wraiths.
//!
//! Each kind has one [`Spawner`], a small state machine that keeps at most
//! one sprite in flight while the scroll fraction sits inside its zone.

mod instance;
mod spawner;

pub use instance::{Direction, Fade, SpriteId, SpriteInstance, SpriteKind, SpritePose, SPRITE_LINGER};
pub use spawner::{SpawnCtx, SpawnTask, Spawner, SpawnerEvent, SpawnerPhase, SpawnerSpec};
