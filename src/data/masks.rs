//! Mask Documents
//!
//! Polygon masks arrive as a JSON document of the form
//! `{"type": "object-masks", "objects": [{"name", "vertices"}, ...]}`.
//! Masks are loaded once per session and are read-only to every
//! analyzer afterwards.

use crate::{Error, Result};
use serde::Deserialize;
use tracing::debug;

/// A named, closed, simple polygon in image pixel space.
#[derive(Debug, Clone)]
pub struct PolygonMask {
    pub name: String,
    pub vertices: Vec<(f64, f64)>,
}

#[derive(Deserialize)]
struct RawMask {
    name: String,
    vertices: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct MaskDocument {
    #[serde(rename = "type")]
    kind: String,
    objects: Vec<RawMask>,
}

const MASK_DOCUMENT_TYPE: &str = "object-masks";

/// Parse a mask JSON document.
///
/// The document type must be `object-masks` and every polygon needs at
/// least three vertices.
pub fn parse_mask_document(text: &str) -> Result<Vec<PolygonMask>> {
    let doc: MaskDocument = serde_json::from_str(text)?;
    if doc.kind != MASK_DOCUMENT_TYPE {
        return Err(Error::Input(format!(
            "unexpected mask document type '{}', expected '{MASK_DOCUMENT_TYPE}'",
            doc.kind
        )));
    }

    let mut masks = Vec::with_capacity(doc.objects.len());
    for raw in doc.objects {
        if raw.vertices.len() < 3 {
            return Err(Error::Input(format!(
                "mask '{}' has {} vertices, need at least 3",
                raw.name,
                raw.vertices.len()
            )));
        }
        masks.push(PolygonMask {
            name: raw.name,
            vertices: raw.vertices.iter().map(|v| (v[0], v[1])).collect(),
        });
    }

    debug!("Parsed {} masks", masks.len());
    Ok(masks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_document() {
        let text = r#"{
            "type": "object-masks",
            "objects": [
                {"name": "screen", "vertices": [[0, 0], [100, 0], [100, 80], [0, 80]]},
                {"name": "keypad", "vertices": [[10, 10], [30, 10], [20, 30]]}
            ]
        }"#;
        let masks = parse_mask_document(text).unwrap();
        assert_eq!(masks.len(), 2);
        assert_eq!(masks[0].name, "screen");
        assert_eq!(masks[0].vertices.len(), 4);
        assert_eq!(masks[1].vertices[2], (20.0, 30.0));
    }

    #[test]
    fn test_wrong_type_is_input_error() {
        let text = r#"{"type": "annotations", "objects": []}"#;
        assert!(matches!(
            parse_mask_document(text),
            Err(Error::Input(_))
        ));
    }

    #[test]
    fn test_too_few_vertices_is_input_error() {
        let text = r#"{
            "type": "object-masks",
            "objects": [{"name": "line", "vertices": [[0, 0], [10, 10]]}]
        }"#;
        assert!(matches!(
            parse_mask_document(text),
            Err(Error::Input(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            parse_mask_document("{not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_empty_object_list_is_valid() {
        let text = r#"{"type": "object-masks", "objects": []}"#;
        assert!(parse_mask_document(text).unwrap().is_empty());
    }
}
