//! Route provider trait and the deterministic straight-line fallback.
//!
//! # Pluggability
//!
//! Journey assembly calls routing through the [`RouteProvider`] trait, so the
//! simulator works the same against OSRM, a test double, or no routing
//! service at all.  [`FallbackProvider`] wraps any provider and substitutes
//! [`Route::straight_line`] on failure, which is how the fleet keeps
//! accepting deliveries while the routing service is down.

use std::sync::Arc;

use async_trait::async_trait;
use fleet_core::{LngLat, Location};
use tracing::warn;

use crate::{RouteError, RouteResult};

/// Seconds of estimated travel per metre for straight-line routes.
///
/// Deliberately pessimistic: the robot itself moves by distance and speed,
/// this only feeds the delivery ETA.
pub const FALLBACK_SECS_PER_METER: f64 = 60.0;

// ── Route ─────────────────────────────────────────────────────────────────────

/// Precomputed path geometry for one leg.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Ordered geometry points in `[lng, lat]` order.
    pub coordinates: Vec<LngLat>,
    /// Path length in metres.
    pub distance_m: f64,
    /// Estimated travel time in seconds.
    pub duration_s: f64,
}

impl Route {
    /// Two-or-more point route through `waypoints` with planar distances.
    pub fn straight_line(waypoints: &[Location]) -> Route {
        let distance_m: f64 = waypoints
            .windows(2)
            .map(|pair| pair[0].straight_line_m(&pair[1]))
            .sum();
        Route {
            coordinates: waypoints.iter().map(Location::lng_lat).collect(),
            distance_m,
            duration_s: distance_m * FALLBACK_SECS_PER_METER,
        }
    }

    /// `true` if the route has no usable length.
    pub fn is_trivial(&self) -> bool {
        self.coordinates.len() < 2 || self.distance_m <= 0.0
    }
}

// ── RouteProvider trait ───────────────────────────────────────────────────────

/// Pluggable route geometry source.
///
/// Implementations must be `Send + Sync` because delivery creation runs on
/// the async runtime alongside the tick scheduler.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Compute a route visiting `waypoints` in order.
    ///
    /// Fails with [`RouteError::TooFewWaypoints`] for fewer than two points.
    async fn compute_route(&self, waypoints: &[Location]) -> RouteResult<Route>;
}

#[async_trait]
impl<P: RouteProvider + ?Sized> RouteProvider for Arc<P> {
    async fn compute_route(&self, waypoints: &[Location]) -> RouteResult<Route> {
        (**self).compute_route(waypoints).await
    }
}

// ── StraightLineProvider ──────────────────────────────────────────────────────

/// Always answers with [`Route::straight_line`].  Never performs I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightLineProvider;

#[async_trait]
impl RouteProvider for StraightLineProvider {
    async fn compute_route(&self, waypoints: &[Location]) -> RouteResult<Route> {
        check_waypoints(waypoints)?;
        Ok(Route::straight_line(waypoints))
    }
}

// ── FallbackProvider ──────────────────────────────────────────────────────────

/// Wraps `P`, replacing any failure with the straight-line route.
pub struct FallbackProvider<P> {
    inner: P,
}

impl<P: RouteProvider> FallbackProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: RouteProvider> RouteProvider for FallbackProvider<P> {
    async fn compute_route(&self, waypoints: &[Location]) -> RouteResult<Route> {
        check_waypoints(waypoints)?;
        match self.inner.compute_route(waypoints).await {
            Ok(route) => Ok(route),
            Err(e) => {
                warn!(error = %e, waypoints = waypoints.len(), "route provider failed, using straight line");
                Ok(Route::straight_line(waypoints))
            }
        }
    }
}

pub(crate) fn check_waypoints(waypoints: &[Location]) -> RouteResult<()> {
    if waypoints.len() < 2 {
        return Err(RouteError::TooFewWaypoints(waypoints.len()));
    }
    Ok(())
}
