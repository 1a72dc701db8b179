//! # Vitrine Core
//!
//! Engine for a three-frame immersive photo gallery: the carousel state
//! machine and its slide timing, the flipping information board, the
//! background audio toggle, the per-frame presenter and the data provider
//! that pages records from the content API into a short-lived cache.
//!
//! Nothing here renders. A host owns the render loop, calls
//! [`Gallery::tick`] once per displayed frame with the measured interval and
//! draws whatever [`Gallery::placements`] describes.
//!
//! ```
//! use std::time::Duration;
//!
//! use vitrine_core::carousel::{CarouselEngine, CarouselTiming, Direction};
//! use vitrine_model::{Item, ItemId, ItemList};
//!
//! let items: ItemList = (0..7)
//!     .map(|i| Item::new(ItemId::new(format!("p{i}")).unwrap(), "photo"))
//!     .collect();
//! let mut engine = CarouselEngine::new(items, CarouselTiming::default());
//!
//! assert!(engine.request_navigate(Direction::Next));
//! engine.advance(Duration::from_millis(1200));
//! assert_eq!(engine.current_window().indices(), Some([3, 4, 5]));
//! ```
#![allow(missing_docs)]

pub mod animation;
pub mod audio;
pub mod board;
pub mod carousel;
pub mod error;
pub mod gallery;
pub mod presenter;
pub mod provider;

pub use audio::{AudioSink, BackgroundAudio};
pub use error::{GalleryError, Result};
pub use gallery::{Gallery, UserInput};
pub use presenter::{FrameLayout, FramePlacement};
pub use provider::{DataProvider, FetchOutcome, FetchStatus, ProviderSnapshot};
