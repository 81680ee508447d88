// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Deserializer, Serialize};

use crate::history::History;
use crate::stroke::Stroke;

/// Errors produced while reading a history document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The text is not JSON, or an entry lacks `points`, `color` or `width`.
    #[error("malformed history document: {0}")]
    Json(#[from] serde_json::Error),
    /// A stroke has a width that cannot be drawn.
    #[error("stroke {index} in `{list}` has invalid width {width}")]
    InvalidWidth {
        /// Which list the stroke came from, `strokes` or `undone`.
        list: &'static str,
        /// Position of the stroke in its list.
        index: usize,
        /// The offending width.
        width: f32,
    },
}

/// Serialized form of a drawing's undo/redo history.
///
/// ```json
/// { "strokes": [ { "points": [x0, y0, ..], "color": -38037, "width": 8.0 } ],
///   "undone":  [] }
/// ```
///
/// Both lists keep their order. A missing or `null` list reads as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryDocument {
    /// Visible strokes in paint order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub strokes: Vec<Stroke>,
    /// Redo buffer, most recently undone last.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub undone: Vec<Stroke>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Stroke>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Stroke>>::deserialize(deserializer)?.unwrap_or_default())
}

impl HistoryDocument {
    /// Parses and validates a document.
    ///
    /// The top level must be a JSON object.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let doc = Self::deserialize(serde_json::Value::Object(fields))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Encodes the document as compact JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks that every stroke can be drawn.
    pub fn validate(&self) -> Result<(), DocumentError> {
        for (list, strokes) in [("strokes", &self.strokes), ("undone", &self.undone)] {
            for (index, stroke) in strokes.iter().enumerate() {
                let width = stroke.width();
                if !(width.is_finite() && width > 0.0) {
                    return Err(DocumentError::InvalidWidth { list, index, width });
                }
            }
        }
        Ok(())
    }

    /// Total number of strokes in both lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len() + self.undone.len()
    }

    /// Returns `true` if both lists are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.undone.is_empty()
    }
}

impl From<&History> for HistoryDocument {
    fn from(history: &History) -> Self {
        Self {
            strokes: history.strokes().to_vec(),
            undone: history.undone().to_vec(),
        }
    }
}

impl From<HistoryDocument> for History {
    fn from(doc: HistoryDocument) -> Self {
        Self::from_parts(doc.strokes, doc.undone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Argb;

    #[test]
    fn empty_object_is_empty_history() {
        let doc = HistoryDocument::from_json("{}").unwrap();
        assert!(doc.is_empty());
        let doc = HistoryDocument::from_json(r#"{"strokes": null}"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn reads_persisted_layout() {
        let doc = HistoryDocument::from_json(
            r#"{"strokes":[{"points":[1.5,2.0,3.0,4.0],"color":-38037,"width":8.0}],
                "undone":[{"points":[],"color":-16777216,"width":3.0}]}"#,
        )
        .unwrap();
        assert_eq!(doc.strokes.len(), 1);
        assert_eq!(doc.strokes[0].points(), &[1.5, 2.0, 3.0, 4.0]);
        assert_eq!(doc.strokes[0].color(), Argb(0xFFFF_6B6B));
        assert_eq!(doc.undone[0].color(), Argb::BLACK);
    }

    #[test]
    fn top_level_must_be_an_object() {
        for text in ["[[],[]]", "[]", "null", "3"] {
            let err = HistoryDocument::from_json(text);
            assert!(
                matches!(err, Err(DocumentError::Json(_))),
                "{text} was accepted"
            );
        }
    }

    #[test]
    fn missing_field_is_an_error() {
        let err = HistoryDocument::from_json(r#"{"strokes":[{"points":[0,0],"width":2}]}"#);
        assert!(matches!(err, Err(DocumentError::Json(_))));
    }

    #[test]
    fn non_positive_width_is_rejected() {
        let err = HistoryDocument::from_json(
            r#"{"undone":[{"points":[0,0],"color":0,"width":0}]}"#,
        );
        assert!(matches!(
            err,
            Err(DocumentError::InvalidWidth { list: "undone", index: 0, .. })
        ));
    }

    #[test]
    fn json_round_trip_is_exact() {
        let doc = HistoryDocument {
            strokes: vec![Stroke::new(
                vec![0.1, 0.2, 1.0 / 3.0, 7.25],
                Argb(0x8012_3456),
                2.5,
            )],
            undone: vec![Stroke::new(vec![9.9, -4.0], Argb::WHITE, 25.0)],
        };
        let text = doc.to_json().unwrap();
        assert_eq!(HistoryDocument::from_json(&text).unwrap(), doc);
    }
}
