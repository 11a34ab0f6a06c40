//! Writepad is a handwriting capture pad.
//!
//! Pointer input drawn over a grid of letter cells is turned into timestamped strokes, grouped
//! into rounds, and checked before export:
//!
//! - Lay out a [`GridConfig`] and hit-test it through [`GeometryProvider`]
//! - Feed [`PointerEvent`]s to a [`Pad`] (or drive [`DrawingManager`] and [`StrokeRecorder`]
//!   directly)
//! - Validate the stored [`RoundsMap`] with [`validate_session`]
//! - Precache the app shell for offline use with [`OfflineCache`]
//!
//! See [`guide`] for a walkthrough.
#![forbid(unsafe_code)]

mod app;
mod cache;
mod drawing;
mod foundation;
mod geometry;
mod input;
mod record;
mod session;

/// End-to-end walkthrough of the capture pipeline.
pub mod guide;

pub use crate::foundation::clock::{Clock, ManualClock, SystemClock};
pub use crate::foundation::core::{Canvas, Cell, Line, Point, Rect, Vec2};
pub use crate::foundation::error::{WritepadError, WritepadResult};

pub use crate::geometry::grid::GridConfig;
pub use crate::geometry::provider::GeometryProvider;
pub use crate::input::pointer::{DEFAULT_PRESSURE, PointerAdapter, PointerEvent, TouchPoint};

pub use crate::record::recorder::StrokeRecorder;
pub use crate::record::stroke::{
    PointKind, RecordingSnapshot, Stroke, StrokeData, StrokeMetadata, StrokePoint,
};

pub use crate::session::flags::SessionFlags;
pub use crate::session::rounds::{DrawingData, DrawingMetadata, RoundData, RoundsMap};
pub use crate::session::validate::{
    ValidationResult, ValidationStats, ValidationStatus, validate_session,
};

pub use crate::drawing::ink::{InkStyle, InkSurface, SegmentLog};
pub use crate::drawing::manager::{DrawContext, DrawingManager};

pub use crate::cache::fetch::{Fetcher, FsFetcher, normalize_url_path};
pub use crate::cache::manifest::{DEFAULT_CACHE_NAME, PrecacheManifest};
pub use crate::cache::offline::{
    DEFAULT_CHUNK_SIZE, InstallReport, OFFLINE_FALLBACK_BODY, OfflineCache, ResponseSource, Served,
};
pub use crate::cache::storage::{CacheStorage, CachedResponse, FsCacheStorage, MemoryCacheStorage};

pub use crate::app::config::{CacheConfig, PadConfig};
pub use crate::app::pad::Pad;
