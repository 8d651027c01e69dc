//! readers for the whitespace-delimited point set format: a count N
//! followed by N `x y` pairs.

use crate::model::geometry::Point;
use std::io::Read;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum PointsError {
    #[error("points input ended while reading {0}")]
    UnexpectedEof(String),
    #[error("failed to parse {field} from '{value}'")]
    ParseField { field: String, value: String },
    #[error("error reading points input: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub fn points_from_str(input: &str) -> Result<Vec<Point>, PointsError> {
    let mut tokens = input.split_whitespace();
    let mut parse = |field: String| -> Result<f64, PointsError> {
        let token = tokens
            .next()
            .ok_or_else(|| PointsError::UnexpectedEof(field.clone()))?;
        token.parse().map_err(|_| PointsError::ParseField {
            field,
            value: token.to_string(),
        })
    };
    let count = parse("point count".to_string())? as usize;
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let x = parse(format!("point {} x", i))?;
        let y = parse(format!("point {} y", i))?;
        out.push(Point::new(x, y));
    }
    Ok(out)
}

pub fn points_from_reader(mut reader: impl Read) -> Result<Vec<Point>, PointsError> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    points_from_str(&buf)
}

pub fn points_from_file(path: &Path) -> Result<Vec<Point>, PointsError> {
    let file = std::fs::File::open(path)?;
    points_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_roundtrip() {
        let pts = points_from_str("3\n0.1 0.2\n1 2\n-3.5 4\n").unwrap();
        assert_eq!(pts.len(), 3);
        assert!(pts[2].approx_eq(&Point::new(-3.5, 4.0)));
    }

    #[test]
    fn test_points_reports_field() {
        match points_from_str("2\n0 0\n1 oops") {
            Err(PointsError::ParseField { field, value }) => {
                assert_eq!(field, "point 1 y");
                assert_eq!(value, "oops");
            }
            other => panic!("expected ParseField, got {:?}", other.err()),
        }
    }
}
