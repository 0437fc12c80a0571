//! CSV Ingestion
//!
//! Gaze recordings arrive as plain comma-separated tables with named
//! columns. Column names are configuration, not hard-coded; the
//! defaults match the Pupil Labs export convention. Malformed numeric
//! cells parse to `NaN` (or 0 for the timestamp) instead of failing the
//! whole file; missing x/y columns are an input error.

use crate::data::{GazeSample, GazeSeries};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_x_column() -> String {
    "gaze x [px]".to_string()
}

fn default_y_column() -> String {
    "gaze y [px]".to_string()
}

fn default_timestamp_column() -> String {
    "timestamp [ns]".to_string()
}

fn default_fixation_column() -> String {
    "fixation id".to_string()
}

/// Which CSV columns hold each sample field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "default_x_column")]
    pub x: String,
    #[serde(default = "default_y_column")]
    pub y: String,
    #[serde(default = "default_timestamp_column")]
    pub timestamp: String,
    #[serde(default = "default_fixation_column")]
    pub fixation: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            x: default_x_column(),
            y: default_y_column(),
            timestamp: default_timestamp_column(),
            fixation: default_fixation_column(),
        }
    }
}

/// Guess the newline sequence used in a file.
pub fn detect_newline(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else if text.contains('\r') {
        "\r"
    } else {
        "\n"
    }
}

/// Parse a gaze CSV into a series.
///
/// The header row is matched against `columns`; x and y are required,
/// timestamp and fixation are optional. Cell values that fail to parse
/// become `NaN` (timestamp: 0), keeping row count aligned with the
/// recording.
pub fn parse_gaze_csv(text: &str, source: &str, columns: &ColumnMap) -> Result<GazeSeries> {
    let newline = detect_newline(text);
    let mut rows = text.split(newline);

    let header = rows
        .next()
        .ok_or_else(|| Error::Input(format!("{source}: empty file")))?;
    let headers: Vec<&str> = header.split(',').map(str::trim).collect();

    let find = |name: &str| headers.iter().position(|h| *h == name);
    let x_col = find(&columns.x)
        .ok_or_else(|| Error::Input(format!("{source}: missing column '{}'", columns.x)))?;
    let y_col = find(&columns.y)
        .ok_or_else(|| Error::Input(format!("{source}: missing column '{}'", columns.y)))?;
    let t_col = find(&columns.timestamp);
    let f_col = find(&columns.fixation);

    let mut series = GazeSeries::new(source.to_string());
    for row in rows {
        if row.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = row.split(',').collect();
        let float_at = |col: usize| -> f64 {
            cells
                .get(col)
                .and_then(|c| c.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN)
        };
        let x = float_at(x_col);
        let y = float_at(y_col);
        let t_ns = t_col
            .and_then(|col| cells.get(col))
            .and_then(|c| c.trim().parse::<i64>().ok())
            .unwrap_or(0);
        let fixation = f_col.map(float_at).unwrap_or(f64::NAN);
        series.push(GazeSample::new(x, y, t_ns, fixation));
    }

    debug!("Parsed {} samples from {source}", series.len());
    Ok(series)
}
