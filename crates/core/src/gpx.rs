//! Minimal GPX track inspection.
//!
//! The publication gate only needs to know whether an attached track
//! parses into a non-empty, sane point set, so this extracts the
//! `lat`/`lon` attributes of `trkpt`/`rtept`/`wpt` elements rather than
//! pulling in a full XML stack. Failures here are reported as
//! validation entries by the caller, never as request faults.

use std::sync::LazyLock;

use regex::Regex;

/// Matches any point element and captures its attribute blob.
static POINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:trkpt|rtept|wpt)\b([^>]*)>").expect("point pattern is valid")
});

static LAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"lat\s*=\s*"([^"]*)""#).expect("lat pattern is valid"));

static LON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"lon\s*=\s*"([^"]*)""#).expect("lon pattern is valid"));

/// A single geographic point extracted from a GPX document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GpxError {
    #[error("document has no <gpx> root element")]
    MissingRoot,

    #[error("point {index} is missing a lat or lon attribute")]
    MissingCoordinate { index: usize },

    #[error("point {index} has unparseable coordinate '{value}'")]
    UnparseableCoordinate { index: usize, value: String },

    #[error("point {index} is out of range (lat {lat}, lon {lon})")]
    CoordinateOutOfRange { index: usize, lat: f64, lon: f64 },
}

/// Extract every track/route/way point from a GPX document.
///
/// Returns an empty vec for a well-formed document with no points;
/// the caller decides whether an empty track is acceptable.
pub fn parse_track_points(gpx: &str) -> Result<Vec<TrackPoint>, GpxError> {
    if !gpx.contains("<gpx") {
        return Err(GpxError::MissingRoot);
    }

    let mut points = Vec::new();
    for (index, caps) in POINT_RE.captures_iter(gpx).enumerate() {
        let attrs = &caps[1];

        let lat_raw = LAT_RE
            .captures(attrs)
            .map(|c| c[1].to_string())
            .ok_or(GpxError::MissingCoordinate { index })?;
        let lon_raw = LON_RE
            .captures(attrs)
            .map(|c| c[1].to_string())
            .ok_or(GpxError::MissingCoordinate { index })?;

        let lat: f64 = lat_raw
            .trim()
            .parse()
            .map_err(|_| GpxError::UnparseableCoordinate {
                index,
                value: lat_raw.clone(),
            })?;
        let lon: f64 = lon_raw
            .trim()
            .parse()
            .map_err(|_| GpxError::UnparseableCoordinate {
                index,
                value: lon_raw.clone(),
            })?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(GpxError::CoordinateOutOfRange { index, lat, lon });
        }

        points.push(TrackPoint { lat, lon });
    }

    Ok(points)
}
