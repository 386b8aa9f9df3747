//! Journey assembly for routed delivery creation.

use fleet_core::Location;
use fleet_motion::{Journey, Segment, SegmentKind};
use fleet_route::{GeoCatalog, Route, RouteError, RouteProvider};
use tracing::{debug, warn};

use crate::{SimError, SimResult};

/// The legs of a delivery: `origin → stops… → station nearest the last stop`.
pub fn plan_legs(
    catalog: &GeoCatalog,
    origin:  &Location,
    stops:   &[Location],
) -> Vec<(Location, Location, SegmentKind)> {
    let mut legs = Vec::with_capacity(stops.len() + 1);
    let mut from = origin;
    for stop in stops {
        legs.push((from.clone(), stop.clone(), SegmentKind::Delivery));
        from = stop;
    }
    if let Some(station) = stops.last().and_then(|last| catalog.nearest_charging_station(last)) {
        legs.push((from.clone(), station.clone(), SegmentKind::Charging));
    }
    legs
}

/// Request a route for every leg and assemble the journey.
///
/// A leg whose route request fails gets a straight-line route instead.  If
/// every leg fails the provider is treated as unreachable and the last error
/// is returned, so the caller can fall back to a direct assignment.
pub async fn assemble_journey<P: RouteProvider + ?Sized>(
    provider: &P,
    catalog:  &GeoCatalog,
    origin:   &Location,
    stops:    &[Location],
) -> SimResult<Journey> {
    let legs = plan_legs(catalog, origin, stops);
    let mut segments = Vec::with_capacity(legs.len());
    let mut last_error: Option<RouteError> = None;
    let mut routed = 0;

    for (from, to, kind) in legs {
        let waypoints = [from, to];
        let route = match provider.compute_route(&waypoints).await {
            Ok(route) => {
                routed += 1;
                route
            }
            Err(e) => {
                warn!(error = %e, from = %waypoints[0].address, to = %waypoints[1].address, "leg routing failed, using straight line");
                last_error = Some(e);
                Route::straight_line(&waypoints)
            }
        };
        let [from, to] = waypoints;
        segments.push(Segment::new(from, to, route, kind));
    }

    if routed == 0 {
        if let Some(e) = last_error {
            return Err(SimError::Route(e));
        }
    }

    let journey = Journey::new(segments)?;
    journey.check_stops(stops.len())?;
    debug!(
        segments = journey.len(),
        distance_m = journey.total_distance_m(),
        "journey assembled"
    );
    Ok(journey)
}
