//! # Writepad guide
//!
//! A walkthrough of how a pointer gesture becomes exported stroke data, and what gets checked
//! before a session is exported.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`GridConfig`](crate::GridConfig): `ROW_COUNT x GROUP_COUNT` letter cells, 1-based
//!   [`Cell`](crate::Cell) addresses, pixel geometry
//! - [`PointerEvent`](crate::PointerEvent): a mouse or touch sample in canvas coordinates
//! - [`StrokeRecorder`](crate::StrokeRecorder): the gesture state machine
//! - [`DrawingManager`](crate::DrawingManager): pen-down tracking, live ink, recorder forwarding
//! - [`RoundsMap`](crate::RoundsMap): captured rounds keyed by timestamp, in capture order
//! - [`validate_session`](crate::validate_session): pre-export verdict over all rounds
//!
//! [`Pad`](crate::Pad) ties these together for one session.
//!
//! ---
//!
//! ## Recording
//!
//! The recorder has two flags: *recording* and *gesture in progress*.
//!
//! 1. [`start_recording`](crate::StrokeRecorder::start_recording) clears previous strokes and
//!    stamps `start_time`.
//! 2. [`start_stroke`](crate::StrokeRecorder::start_stroke) opens a gesture with a `start` point.
//!    If the pen went down inside a cell, the gesture is bound to that cell and every point is
//!    stored relative to the cell's top-left corner.
//! 3. [`add_point`](crate::StrokeRecorder::add_point) appends `move` points.
//! 4. [`end_stroke`](crate::StrokeRecorder::end_stroke) appends the `end` point and commits one
//!    [`Stroke`](crate::Stroke).
//!
//! Out-of-order calls are silently ignored. The cell origin is looked up on every point, so a
//! resize in the middle of a gesture (see [`Pad::resize`](crate::Pad::resize)) keeps points
//! relative to where the cell is *now*.
//!
//! ```
//! use writepad::{GridConfig, ManualClock, Point, PointerEvent, StrokeRecorder};
//!
//! let grid = GridConfig::default();
//! let clock = ManualClock::new(0);
//! let mut rec = StrokeRecorder::new(clock.clone());
//! rec.start_recording();
//!
//! let down = PointerEvent::mouse(Point::new(10.0, 10.0));
//! rec.start_stroke(&down, None, None);
//! clock.advance(8);
//! let up = PointerEvent::mouse(Point::new(20.0, 10.0));
//! rec.end_stroke(&grid, &up, up.position());
//!
//! let data = rec.get_stroke_data();
//! assert_eq!(data.metadata.total_strokes, 1);
//! assert_eq!(data.metadata.total_points, 2);
//! ```
//!
//! ---
//!
//! ## Validation
//!
//! [`validate_session`](crate::validate_session) never fails. It walks every round and collects
//! issues; the status only ever rises (`valid` < `warning` < `error`):
//!
//! - a round without images, or an image without `row`/`col`, is a warning
//! - more images than grid cells is a warning; more *distinct* cells than the grid has is an
//!   error
//! - images missing `cellWidth`/`cellHeight` are a warning
//! - rounds that exist but hold no images at all add a session-level warning
//!
//! Only an `error` verdict blocks export ([`ValidationResult::is_exportable`](crate::ValidationResult::is_exportable)).
//!
//! ---
//!
//! ## Offline cache
//!
//! [`OfflineCache`](crate::OfflineCache) mirrors the app's service worker:
//!
//! - `install` fetches the [`PrecacheManifest`](crate::PrecacheManifest) in chunks
//! - `respond` is cache-first, then the [`Fetcher`](crate::Fetcher), then a plain-text fallback
//! - `activate` deletes caches left over from older versions
//!
//! Storage is pluggable through [`CacheStorage`](crate::CacheStorage); the CLI uses
//! [`FsCacheStorage`](crate::FsCacheStorage).
//!
//! ---
//!
//! ## Logging
//!
//! The library emits [`tracing`] events under the `writepad::record`, `writepad::validate` and
//! `writepad::cache` targets and never installs a subscriber. The `writepad` binary installs a
//! stderr fmt subscriber (`--verbose` for debug level).
