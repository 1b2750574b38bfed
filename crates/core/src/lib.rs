//! Core engine for a centered, infinitely looping, auto-scrolling carousel.
//!
//! The strip renders `clones + items + clones`; the engine measures it
//! through a [`GeometryProvider`], keeps the scroll offset within one span of
//! the real items with invisible jumps, tracks which card sits under the
//! viewport center, and advances on a fixed cadence from frame callbacks.
//! Everything runs on the host's single frame timeline with an injected
//! clock, so behaviour is deterministic under test.

pub mod active;
pub mod autoplay;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod item;
pub mod metrics;
pub mod normalize;
pub mod sequence;
pub mod sim;
pub mod timeline;
pub mod view;

pub use active::{nearest_display_index, ActiveIndexTracker};
pub use autoplay::{AutoplayGate, AutoplayScheduler, SkipReason, Tick};
pub use config::{AutoplayConfig, CarouselConfig, EmphasisConfig, LayoutConfig};
pub use engine::{Carousel, CarouselRuntimeState, SelectCallback};
pub use error::{CarouselError, Result};
pub use geometry::{GeometryProvider, ItemRect, ScrollBehavior, ScrollSurface, StripSurface};
pub use input::{InputController, NavKey, PointerEvent};
pub use item::{load_items, CarouselItem};
pub use metrics::{measure, Metrics};
pub use normalize::{normalize_offset, Normalization};
pub use sequence::{clone_count, extend_items, ExtendedItem, ExtendedSequence};
pub use sim::{SimEvent, Simulation};
pub use timeline::{Clock, FrameClock, FrameLoop, FrameRequest};
pub use view::{SlideAria, SlideView, CAROUSEL_ROLE};
