//! Scroll-position animation engine for the **Gloaming** narrative.
//!
//! Maps a scroll fraction in `[0, 1]` to a sky color, a parallax transform
//! for every foliage item, section flags and page chrome, and drives the
//! timed fairy and wraith spawners from zone membership changes.
//!
//! Nothing here touches a window or a GPU. Hosts report scroll extents and
//! elapsed time; the engine hands back plain values to draw.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`color`] | `Rgb`, `ColorStop`, `interpolate`, the sky ramp |
//! | [`zone`] | `Zone`, `DarkZone`, `section_flags` |
//! | [`config`] | `NarrativeConfig`, `DeviceProfile`, profile tables |
//! | [`foliage`] | layer specs and the one-shot layout generator |
//! | [`parallax`] | per-item `ItemTransform` |
//! | [`timer`] | `Scheduler`, `TimerQueue` |
//! | [`sprite`] | `SpriteInstance`, `Spawner` state machine |
//! | [`scroll`] | `ScrollMetrics`, `ScrollDocument`, nav targets |
//! | [`chrome`] | `ChromeState` |
//! | [`driver`] | `FrameDriver`, `FrameOutput` |
//! | [`excerpt`] | `ExcerptSource`, `ExcerptModal` |
//!
//! # Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use gloaming_scroll::{FrameDriver, NarrativeConfig, ScrollDocument};
//!
//! let mut doc = ScrollDocument::new(6000.0, 900.0);
//! let mut driver = FrameDriver::new(NarrativeConfig::default(), 1440.0, Some(7));
//!
//! doc.set_offset(2550.0);
//! driver.notify_scroll();
//! let frame = driver.run_frame(doc.metrics(), Duration::from_millis(16)).unwrap();
//! assert_eq!(frame.fraction, 0.5);
//! assert_eq!(frame.transforms.len(), driver.items().len());
//! ```

pub mod chrome;
pub mod color;
pub mod config;
pub mod driver;
pub mod excerpt;
pub mod foliage;
pub mod parallax;
pub mod scroll;
pub mod sprite;
pub mod timer;
pub mod zone;

pub use chrome::ChromeState;
pub use color::{interpolate, ColorStop, Rgb, SKY_STOPS};
pub use config::{DeviceProfile, NarrativeConfig, ProfileParams};
pub use driver::{Edge, FrameDriver, FrameOutput};
pub use excerpt::{DirExcerptSource, ExcerptModal, ExcerptSource};
pub use scroll::{ScrollDelta, ScrollDocument, ScrollMetrics};
pub use sprite::{SpriteInstance, SpriteKind, SpritePose};
pub use zone::{DarkZone, Zone};
