use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::foundation::core::Cell;

/// Metadata attached to one exported cell image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingMetadata {
    /// 1-based row of the cell the image was cut from. Anything but a non-negative integer
    /// reads as absent.
    #[serde(
        default,
        deserialize_with = "lenient_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub row: Option<u32>,
    /// 1-based column of the cell the image was cut from.
    #[serde(
        default,
        deserialize_with = "lenient_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub col: Option<u32>,
    /// Cell width in pixels at the time of drawing. Non-numbers read as absent.
    #[serde(
        default,
        deserialize_with = "lenient_length",
        skip_serializing_if = "Option::is_none"
    )]
    pub cell_width: Option<f64>,
    /// Cell height in pixels at the time of drawing.
    #[serde(
        default,
        deserialize_with = "lenient_length",
        skip_serializing_if = "Option::is_none"
    )]
    pub cell_height: Option<f64>,
    /// Any other exporter-specific keys, kept verbatim and in input order.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DrawingMetadata {
    pub fn for_cell(cell: Cell, cell_width: f64, cell_height: f64) -> Self {
        Self {
            row: Some(cell.row),
            col: Some(cell.col),
            cell_width: Some(cell_width),
            cell_height: Some(cell_height),
            extra: serde_json::Map::new(),
        }
    }

    /// `Some` only when both `row` and `col` are present.
    pub fn cell(&self) -> Option<Cell> {
        Some(Cell::new(self.row?, self.col?))
    }

    pub fn has_cell_dimensions(&self) -> bool {
        self.cell_width.is_some() && self.cell_height.is_some()
    }
}

/// One exported cell image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingData {
    /// Encoded image, typically a `data:image/png;base64,...` URL.
    #[serde(default)]
    pub image_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DrawingMetadata>,
}

/// Everything captured during one round.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundData {
    #[serde(default)]
    pub timestamp: String,
    /// Missing or `null` in input is read as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<DrawingData>,
    /// Usually a serialized [`crate::StrokeData`]; kept untyped so foreign exports still load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_data: Option<serde_json::Value>,
}

// Exported metadata is loosely typed; a malformed field must surface as a validation issue for
// that image instead of failing the whole document.
fn lenient_index<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(v.as_ref()
        .and_then(serde_json::Value::as_u64)
        .and_then(|n| u32::try_from(n).ok()))
}

fn lenient_length<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(serde_json::Value::as_f64))
}

fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

/// Rounds keyed by their timestamp, in insertion (chronological) order.
///
/// Serializes as a JSON object; key order survives a read/write cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoundsMap {
    entries: Vec<(String, RoundData)>,
}

impl RoundsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace. A replaced round keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, round: RoundData) -> Option<RoundData> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, round)),
            None => {
                self.entries.push((key, round));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&RoundData> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, round)| round)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &RoundData)> {
        self.entries.iter().map(|(k, round)| (k.as_str(), round))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, RoundData)> for RoundsMap {
    fn from_iter<I: IntoIterator<Item = (String, RoundData)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, round) in iter {
            map.insert(k, round);
        }
        map
    }
}

impl Serialize for RoundsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, round) in &self.entries {
            map.serialize_entry(k, round)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RoundsMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RoundsVisitor;

        impl<'de> Visitor<'de> for RoundsVisitor {
            type Value = RoundsMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of round timestamp to round data")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RoundsMap, A::Error> {
                let mut out = RoundsMap {
                    entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((k, round)) = access.next_entry::<String, RoundData>()? {
                    out.insert(k, round);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(RoundsVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/rounds.rs"]
mod tests;
