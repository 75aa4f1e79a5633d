//! Strict parsing of the JSON payloads the inspection and program tools
//! accept. Only the documented shapes are understood; anything else is an
//! [`Error::InvalidInput`].
use crate::error::{Error, Result};
use crate::matcher::ToolCoordinate;
use serde::Serialize;
use serde_json::Value;

impl ToolCoordinate {
    /// Parse `{"x": <number>, "y": <number>}`. Unknown fields, missing fields,
    /// strings and non-finite numbers are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let tool: ToolCoordinate = serde_json::from_str(text.trim())
            .map_err(|e| Error::InvalidInput(format!("tool coordinates: {e}")))?;
        if !tool.x.is_finite() || !tool.y.is_finite() {
            return Err(Error::InvalidInput(format!(
                "tool coordinates must be finite, got ({}, {})",
                tool.x, tool.y
            )));
        }
        Ok(tool)
    }
}

/// Parse an optional expected angle; empty or blank text means "none".
pub fn parse_expected_angle(text: &str) -> Result<Option<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(Error::InvalidInput(format!("expected angle is not a number: {text:?}"))),
    }
}

/// One requested bend angle. Entries that do not read as a finite number are
/// kept (as their JSON text) so they can be reported back individually.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AngleEntry {
    Target(f64),
    Invalid(String),
}

impl AngleEntry {
    fn from_json(value: &Value) -> Self {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => AngleEntry::Target(v),
            _ => AngleEntry::Invalid(match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        }
    }
}

/// Ordered target angles of a program request: `{"angles": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TargetAngles {
    pub entries: Vec<AngleEntry>,
}

impl TargetAngles {
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let angles = value
            .get("angles")
            .ok_or_else(|| Error::InvalidInput("missing angles in request".into()))?;
        let list = angles
            .as_array()
            .ok_or_else(|| Error::InvalidInput("angles must be a list".into()))?;
        Ok(Self::from_list(list))
    }

    pub fn from_list(list: &[Value]) -> Self {
        Self {
            entries: list.iter().map(AngleEntry::from_json).collect(),
        }
    }

    pub fn from_angles(angles: &[f64]) -> Self {
        Self {
            entries: angles.iter().map(|&a| AngleEntry::Target(a)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_parse_strictly() {
        assert_eq!(
            ToolCoordinate::parse(r#"{"x": 12.5, "y": 40}"#).unwrap(),
            ToolCoordinate::new(12.5, 40.0)
        );
        assert!(ToolCoordinate::parse(r#"{"x": 1, "y": 2, "z": 3}"#).is_err());
        assert!(ToolCoordinate::parse(r#"{"x": "1", "y": 2}"#).is_err());
        assert!(ToolCoordinate::parse(r#"{"x": 1}"#).is_err());
        assert!(ToolCoordinate::parse("__import__('os')").is_err());
    }

    #[test]
    fn expected_angle_may_be_absent() {
        assert_eq!(parse_expected_angle("").unwrap(), None);
        assert_eq!(parse_expected_angle("  ").unwrap(), None);
        assert_eq!(parse_expected_angle("45.5").unwrap(), Some(45.5));
        assert!(matches!(parse_expected_angle("abc"), Err(Error::InvalidInput(_))));
        assert!(parse_expected_angle("inf").is_err());
    }

    #[test]
    fn angles_keep_order_and_bad_entries() {
        let t = TargetAngles::parse(r#"{"angles": [30, "45.5", "steep", null]}"#).unwrap();
        assert_eq!(
            t.entries,
            vec![
                AngleEntry::Target(30.0),
                AngleEntry::Target(45.5),
                AngleEntry::Invalid("steep".into()),
                AngleEntry::Invalid("null".into()),
            ]
        );
    }

    #[test]
    fn angles_payload_shape_is_checked() {
        assert!(matches!(
            TargetAngles::parse(r#"{"targets": [1]}"#),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            TargetAngles::parse(r#"{"angles": 30}"#),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(TargetAngles::parse("{"), Err(Error::Json(_))));
    }
}
