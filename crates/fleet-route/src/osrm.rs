//! OSRM HTTP route provider (feature `osrm`).
//!
//! Requests `{base}/route/v1/driving/{lng,lat;…}?overview=full&steps=true`
//! and converts the first returned route.  Geometry resolution falls back in
//! order: encoded polyline → OSRM snapped waypoints → request waypoints.
//! Missing distance/duration fall back to the straight-line estimates.

use std::time::Duration;

use async_trait::async_trait;
use fleet_core::{LngLat, Location};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::route::check_waypoints;
use crate::{Route, RouteError, RouteProvider, RouteResult, decode_polyline};

/// Public demo server.  Rate limited; set `FLEET_OSRM_URL` for real use.
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
    #[serde(default)]
    pub waypoints: Vec<OsrmWaypoint>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRoute {
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmWaypoint {
    pub location: LngLat,
}

// ── Provider ──────────────────────────────────────────────────────────────────

/// Route provider backed by an OSRM server.
pub struct OsrmProvider {
    http: Client,
    base_url: String,
}

impl OsrmProvider {
    /// Create a provider for `base_url` with a 10 s request timeout.
    pub fn new(base_url: impl Into<String>) -> RouteResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn request_url(&self, waypoints: &[Location]) -> String {
        let coords = waypoints
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");
        format!("{}/route/v1/driving/{coords}?overview=full&steps=true", self.base_url)
    }
}

#[async_trait]
impl RouteProvider for OsrmProvider {
    async fn compute_route(&self, waypoints: &[Location]) -> RouteResult<Route> {
        check_waypoints(waypoints)?;
        let url = self.request_url(waypoints);
        debug!(%url, "requesting route");

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::Status(status.as_u16()));
        }

        let body: OsrmResponse = response.json().await?;
        route_from_response(body, waypoints)
    }
}

/// Convert a decoded OSRM response into a [`Route`].
pub(crate) fn route_from_response(body: OsrmResponse, waypoints: &[Location]) -> RouteResult<Route> {
    if body.code != "Ok" {
        return Err(RouteError::Service {
            code: body.code,
            message: body.message.unwrap_or_default(),
        });
    }

    let fallback = Route::straight_line(waypoints);
    let first = body.routes.first();

    let encoded = first
        .and_then(|r| r.geometry.as_ref())
        .and_then(|g| g.as_str());

    let decoded = match encoded.map(decode_polyline) {
        Some(Ok(points)) if !points.is_empty() => Some(points),
        Some(Err(e)) => {
            warn!(error = %e, "could not decode route geometry");
            None
        }
        _ => None,
    };

    let coordinates = decoded.unwrap_or_else(|| {
        if body.waypoints.is_empty() {
            fallback.coordinates.clone()
        } else {
            body.waypoints.iter().map(|w| w.location).collect()
        }
    });

    Ok(Route {
        coordinates,
        distance_m: first
            .and_then(|r| r.distance)
            .filter(|d| *d > 0.0)
            .unwrap_or(fallback.distance_m),
        duration_s: first
            .and_then(|r| r.duration)
            .filter(|d| *d > 0.0)
            .unwrap_or(fallback.duration_s),
    })
}
