use crate::foundation::core::{Cell, Point};

/// Position of a point within its gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Start,
    Move,
    End,
}

/// One sampled point of a stroke.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokePoint {
    /// Cell-relative when the owning stroke has a cell, canvas pixels otherwise.
    pub x: f64,
    pub y: f64,
    /// Milliseconds since the recording started.
    pub timestamp: u64,
    /// In `[0, 1]`.
    pub pressure: f64,
    #[serde(rename = "type")]
    pub kind: PointKind,
}

impl StrokePoint {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One completed gesture. `points` is never empty and runs `start, move*, end`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub cell: Option<Cell>,
    pub points: Vec<StrokePoint>,
}

impl Stroke {
    /// Recording-relative time from first to last point.
    pub fn duration_ms(&self) -> u64 {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => b.timestamp.saturating_sub(a.timestamp),
            _ => 0,
        }
    }
}

/// Value returned by [`crate::StrokeRecorder::stop_recording`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSnapshot {
    /// Epoch milliseconds of `start_recording`, `None` if recording never started.
    pub start_time: Option<u64>,
    pub end_time: u64,
    pub strokes: Vec<Stroke>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeMetadata {
    pub total_strokes: usize,
    pub total_points: usize,
    pub strokes_in_cells: usize,
}

impl StrokeMetadata {
    pub fn summarize(strokes: &[Stroke]) -> Self {
        Self {
            total_strokes: strokes.len(),
            total_points: strokes.iter().map(|s| s.points.len()).sum(),
            strokes_in_cells: strokes.iter().filter(|s| s.cell.is_some()).count(),
        }
    }
}

/// Export document for a round's strokes, as stored under `strokeData` in a round.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeData {
    pub start_time: Option<u64>,
    pub end_time: u64,
    pub strokes: Vec<Stroke>,
    pub metadata: StrokeMetadata,
}

impl From<RecordingSnapshot> for StrokeData {
    fn from(snapshot: RecordingSnapshot) -> Self {
        Self {
            metadata: StrokeMetadata::summarize(&snapshot.strokes),
            start_time: snapshot.start_time,
            end_time: snapshot.end_time,
            strokes: snapshot.strokes,
        }
    }
}

impl StrokeData {
    /// `true` when `metadata` agrees with `strokes`. Documents loaded from disk may not.
    pub fn metadata_consistent(&self) -> bool {
        StrokeMetadata::summarize(&self.strokes) == self.metadata
    }
}
