//! Encoded polyline decoding (precision 1e5).
//!
//! The routing service returns geometry as an encoded polyline whose points
//! are `(lat, lng)` pairs.  The decoder emits `[lng, lat]` so the result can
//! be used directly as route coordinates.

use fleet_core::LngLat;

use crate::{RouteError, RouteResult};

const PRECISION: f64 = 1e5;

/// Decode an encoded polyline into `[lng, lat]` points.
pub fn decode_polyline(encoded: &str) -> RouteResult<Vec<LngLat>> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += next_delta(bytes, &mut index)?;
        lng += next_delta(bytes, &mut index)?;
        points.push([lng as f64 / PRECISION, lat as f64 / PRECISION]);
    }
    Ok(points)
}

/// Read one zig-zag varint starting at `*index`.
fn next_delta(bytes: &[u8], index: &mut usize) -> RouteResult<i64> {
    let mut result: i64 = 0;
    let mut shift = 0u32;
    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(RouteError::Polyline(format!("truncated at byte {index}")));
        };
        *index += 1;
        if !(63..=126).contains(&byte) {
            return Err(RouteError::Polyline(format!("invalid byte 0x{byte:02x} at {}", *index - 1)));
        }
        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
        if shift > 60 {
            return Err(RouteError::Polyline("varint overflow".into()));
        }
    }
    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}
