use crate::foundation::core::Line;

/// How live ink is painted. Recorded stroke data does not depend on it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InkStyle {
    /// CSS color string.
    pub color: String,
    pub line_width: f64,
    pub round_cap: bool,
}

impl Default for InkStyle {
    fn default() -> Self {
        Self {
            color: "#000".to_string(),
            line_width: 2.0,
            round_cap: true,
        }
    }
}

/// Destination for live ink.
pub trait InkSurface {
    fn draw_segment(&mut self, segment: Line, style: &InkStyle);

    fn clear(&mut self);
}

/// [`InkSurface`] that just remembers the segments it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct SegmentLog {
    segments: Vec<Line>,
}

impl SegmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Line] {
        &self.segments
    }

    /// Sum of segment lengths in pixels.
    pub fn ink_length(&self) -> f64 {
        self.segments.iter().map(|l| (l.p1 - l.p0).hypot()).sum()
    }
}

impl InkSurface for SegmentLog {
    fn draw_segment(&mut self, segment: Line, _style: &InkStyle) {
        self.segments.push(segment);
    }

    fn clear(&mut self) {
        self.segments.clear();
    }
}
