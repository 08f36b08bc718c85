//! Persistence format for a board.
//!
//! A saved board is the JSON array `[committed, deleted]`. Each vector is
//! stored as `{"class": <kind>, "data": {...}}` with its color, thickness,
//! points as `[x, y]` pairs and the finish timestamp. Text adds `text` and
//! `fontSize`.

use crate::vectors::{
    Circle, Line, Pencil, Rectangle, SerializableColor, Text, Vector, VectorId, VectorKind,
    VectorStyle,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while converting between vectors and their stored form.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{class} expects {expected} point(s), found {found}")]
    InvalidPoints {
        class: &'static str,
        expected: &'static str,
        found: usize,
    },
    #[error("Vector {0} was never finalized")]
    Unfinalized(VectorId),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Stored fields shared by every vector kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeData {
    pub color: SerializableColor,
    pub thickness: u32,
    pub points: Vec<[f64; 2]>,
    pub timestamp: f64,
}

/// Stored fields of a text vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextData {
    pub color: SerializableColor,
    pub thickness: u32,
    pub points: Vec<[f64; 2]>,
    pub timestamp: f64,
    pub text: String,
    pub font_size: f64,
}

/// One stored vector, tagged by its class name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", content = "data")]
pub enum VectorRecord {
    #[serde(rename = "PencilVec")]
    Pencil(StrokeData),
    #[serde(rename = "LineVec")]
    Line(StrokeData),
    #[serde(rename = "CircleVec")]
    Circle(StrokeData),
    #[serde(rename = "RectangleVec")]
    Rectangle(StrokeData),
    #[serde(rename = "TextVec")]
    Text(TextData),
}

/// A whole board: committed vectors, then the deleted stack (bottom first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document(pub Vec<VectorRecord>, pub Vec<VectorRecord>);

impl Document {
    pub fn committed(&self) -> &[VectorRecord] {
        &self.0
    }

    pub fn deleted(&self) -> &[VectorRecord] {
        &self.1
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild every stored vector, failing on the first bad record.
    pub fn to_vectors(&self) -> DocumentResult<(Vec<Vector>, Vec<Vector>)> {
        let committed = self.0.iter().map(Vector::from_record).collect::<Result<_, _>>()?;
        let deleted = self.1.iter().map(Vector::from_record).collect::<Result<_, _>>()?;
        Ok((committed, deleted))
    }
}

impl Vector {
    /// Stored form of a finalized vector.
    pub fn to_record(&self) -> DocumentResult<VectorRecord> {
        let timestamp = self
            .finalized_at()
            .ok_or_else(|| DocumentError::Unfinalized(self.id()))?;
        let style = *self.style();
        let points: Vec<[f64; 2]> = self.points().iter().map(|p| [p.x, p.y]).collect();
        let stroke = StrokeData {
            color: style.color,
            thickness: style.thickness,
            points,
            timestamp,
        };

        Ok(match self {
            Vector::Pencil(_) => VectorRecord::Pencil(stroke),
            Vector::Line(_) => VectorRecord::Line(stroke),
            Vector::Circle(_) => VectorRecord::Circle(stroke),
            Vector::Rectangle(_) => VectorRecord::Rectangle(stroke),
            Vector::Text(text) => VectorRecord::Text(TextData {
                color: stroke.color,
                thickness: stroke.thickness,
                points: stroke.points,
                timestamp,
                text: text.text.clone(),
                font_size: text.font_size,
            }),
        })
    }

    /// Rebuild a finalized vector from its stored form.
    ///
    /// The vector gets a fresh id; the stored timestamp is kept.
    pub fn from_record(record: &VectorRecord) -> DocumentResult<Self> {
        let (mut vector, timestamp) = match record {
            VectorRecord::Pencil(data) => {
                let points = checked_points(VectorKind::Pencil, &data.points)?;
                (
                    Vector::Pencil(Pencil::from_points(points, style_of(data))),
                    data.timestamp,
                )
            }
            VectorRecord::Line(data) => {
                let [a, b] = endpoints(VectorKind::Line, &data.points)?;
                (
                    Vector::Line(Line::from_endpoints(a, b, style_of(data))),
                    data.timestamp,
                )
            }
            VectorRecord::Circle(data) => {
                let [a, b] = endpoints(VectorKind::Circle, &data.points)?;
                (
                    Vector::Circle(Circle::from_points(a, b, style_of(data))),
                    data.timestamp,
                )
            }
            VectorRecord::Rectangle(data) => {
                let [a, b] = endpoints(VectorKind::Rectangle, &data.points)?;
                (
                    Vector::Rectangle(Rectangle::from_corners(a, b, style_of(data))),
                    data.timestamp,
                )
            }
            VectorRecord::Text(data) => {
                let anchor = match data.points.as_slice() {
                    [[x, y]] => Point::new(*x, *y),
                    other => {
                        return Err(DocumentError::InvalidPoints {
                            class: VectorKind::Text.class_name(),
                            expected: "exactly 1",
                            found: other.len(),
                        });
                    }
                };
                let style = VectorStyle::new(data.color, data.thickness);
                (
                    Vector::Text(Text::new(anchor, data.text.clone(), data.font_size, style)),
                    data.timestamp,
                )
            }
        };

        vector.finalize();
        vector.lifecycle_mut().finalized_at = Some(timestamp);
        Ok(vector)
    }
}

fn style_of(data: &StrokeData) -> VectorStyle {
    VectorStyle::new(data.color, data.thickness)
}

fn checked_points(kind: VectorKind, raw: &[[f64; 2]]) -> DocumentResult<Vec<Point>> {
    if raw.is_empty() {
        return Err(DocumentError::InvalidPoints {
            class: kind.class_name(),
            expected: "at least 1",
            found: 0,
        });
    }
    Ok(raw.iter().map(|[x, y]| Point::new(*x, *y)).collect())
}

fn endpoints(kind: VectorKind, raw: &[[f64; 2]]) -> DocumentResult<[Point; 2]> {
    match raw {
        [[x0, y0], [x1, y1]] => Ok([Point::new(*x0, *y0), Point::new(*x1, *y1)]),
        other => Err(DocumentError::InvalidPoints {
            class: kind.class_name(),
            expected: "exactly 2",
            found: other.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finalized(kind: VectorKind, points: &[Point]) -> Vector {
        let style = VectorStyle::new(SerializableColor::rgb(255, 165, 0), 5);
        let mut vector = Vector::start(kind, points[0], style, 18.0);
        for p in &points[1..] {
            vector.add_point(*p);
        }
        if let Some(text) = vector.as_text_mut() {
            text.text = "hello".to_string();
        }
        vector.finalize();
        vector
    }

    #[test]
    fn test_record_round_trip_every_kind() {
        let points = [Point::new(0.5, -1.25), Point::new(3.0, 4.0), Point::new(7.125, 2.0)];
        for kind in [
            VectorKind::Pencil,
            VectorKind::Line,
            VectorKind::Circle,
            VectorKind::Rectangle,
            VectorKind::Text,
        ] {
            let original = finalized(kind, &points);
            let json = serde_json::to_string(&original.to_record().unwrap()).unwrap();
            let record: VectorRecord = serde_json::from_str(&json).unwrap();
            let restored = Vector::from_record(&record).unwrap();
            assert_eq!(restored, original, "{kind:?}");
            let (a, b) = (restored.finalized_at().unwrap(), original.finalized_at().unwrap());
            assert!((a - b).abs() < 1e-6, "{kind:?}: {a} != {b}");
        }
    }

    #[test]
    fn test_wire_shape() {
        let vector = finalized(VectorKind::Text, &[Point::new(1.0, 2.0)]);
        let value = serde_json::to_value(vector.to_record().unwrap()).unwrap();
        assert_eq!(value["class"], "TextVec");
        assert_eq!(value["data"]["points"], serde_json::json!([[1.0, 2.0]]));
        assert_eq!(value["data"]["fontSize"], 18.0);
        assert_eq!(value["data"]["text"], "hello");
        assert_eq!(value["data"]["thickness"], 5);
    }

    #[test]
    fn test_document_is_two_element_array() {
        let doc = Document(
            vec![finalized(VectorKind::Line, &[Point::ZERO, Point::new(1.0, 1.0)])
                .to_record()
                .unwrap()],
            Vec::new(),
        );
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0][0]["class"], "LineVec");
        assert!(array[1].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_unfinalized_vector_is_rejected() {
        let vector = Vector::start(VectorKind::Pencil, Point::ZERO, VectorStyle::default(), 12.0);
        assert!(matches!(vector.to_record(), Err(DocumentError::Unfinalized(id)) if id == vector.id()));
    }

    #[test]
    fn test_unknown_class_is_a_parse_error() {
        let json = r#"[[{"class": "BlobVec", "data": {}}], []]"#;
        assert!(matches!(Document::from_json(json), Err(DocumentError::Parse(_))));
    }

    #[test]
    fn test_wrong_point_count_is_rejected() {
        let json = r#"[[{"class": "LineVec", "data": {
            "color": {"r": 0, "g": 0, "b": 0, "a": 255},
            "thickness": 1,
            "points": [[0, 0], [1, 1], [2, 2]],
            "timestamp": 1.0}}], []]"#;
        let doc = Document::from_json(json).unwrap();
        match doc.to_vectors() {
            Err(DocumentError::InvalidPoints { class, found, .. }) => {
                assert_eq!(class, "LineVec");
                assert_eq!(found, 3);
            }
            other => panic!("expected InvalidPoints, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_points_are_a_parse_error() {
        let json = r#"[[{"class": "PencilVec", "data": {
            "color": {"r": 0, "g": 0, "b": 0, "a": 255},
            "thickness": 1,
            "points": [[0, "a"]],
            "timestamp": 1.0}}], []]"#;
        assert!(matches!(Document::from_json(json), Err(DocumentError::Parse(_))));
    }
}
