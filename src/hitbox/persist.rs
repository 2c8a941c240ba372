use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Rect;
use crate::error::{ParseError, Result};

/// One entry of a rectangle file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectRecord {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<&Rect> for RectRecord {
    fn from(r: &Rect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.w,
            height: r.h,
        }
    }
}

impl From<RectRecord> for Rect {
    fn from(r: RectRecord) -> Self {
        Rect::new(r.x, r.y, r.width, r.height)
    }
}

/// Result of parsing a rectangle file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadedRects {
    pub rects: Vec<Rect>,
    /// Elements dropped for a missing or non-integer key.
    pub skipped: usize,
}

/// Parses a rectangle file.
///
/// The top level must be an array. Elements lacking one of the four keys (or
/// holding a non-integer there) are skipped. Values are not bounds-checked.
pub fn parse_rects(text: &str) -> Result<LoadedRects, ParseError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(items) = value else {
        return Err(ParseError::NotAnArray);
    };

    let mut loaded = LoadedRects {
        rects: Vec::with_capacity(items.len()),
        skipped: 0,
    };
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<RectRecord>(item) {
            Ok(record) => loaded.rects.push(record.into()),
            Err(e) => {
                log::debug!("skipping rectangle #{index}: {e}");
                loaded.skipped += 1;
            }
        }
    }
    Ok(loaded)
}

pub fn read_rects(path: &Path) -> Result<LoadedRects> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_rects(&text)?)
}

pub fn rects_to_json<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> String {
    let records: Vec<RectRecord> = rects.into_iter().map(RectRecord::from).collect();
    // a Vec of plain integer structs always serializes
    serde_json::to_string_pretty(&records).unwrap_or_else(|_| String::from("[]"))
}

pub fn write_rects<'a>(path: &Path, rects: impl IntoIterator<Item = &'a Rect>) -> Result<()> {
    std::fs::write(path, rects_to_json(rects))?;
    Ok(())
}
