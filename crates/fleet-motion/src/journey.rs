//! Journeys: the ordered path segments a robot follows.
//!
//! A delivery journey covers origin → stop 1 → … → stop N → nearest charging
//! station.  A charging trip is a one-segment journey of kind
//! [`SegmentKind::Charging`].

use fleet_core::Location;
use fleet_route::Route;

use crate::{MotionError, MotionResult};

/// Purpose of a segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SegmentKind {
    /// Ends at a customer stop.
    Delivery,
    /// Ends at a charging station.
    Charging,
}

/// One leg of a journey with precomputed geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub from:  Location,
    pub to:    Location,
    pub route: Route,
    pub kind:  SegmentKind,
}

impl Segment {
    pub fn new(from: Location, to: Location, route: Route, kind: SegmentKind) -> Self {
        Self { from, to, route, kind }
    }

    /// A segment whose geometry is the straight line `from → to`.
    pub fn straight(from: Location, to: Location, kind: SegmentKind) -> Self {
        let route = Route::straight_line(&[from.clone(), to.clone()]);
        Self { from, to, route, kind }
    }
}

/// An ordered, non-empty list of segments.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Journey {
    segments: Vec<Segment>,
}

impl Journey {
    /// Wrap `segments`.  Fails if there are none.
    pub fn new(segments: Vec<Segment>) -> MotionResult<Self> {
        if segments.is_empty() {
            return Err(MotionError::EmptyJourney);
        }
        Ok(Self { segments })
    }

    /// Straight-line journey `origin → stops… → station`.
    ///
    /// The charging leg is omitted when `station` is `None`.  Fails only when
    /// both `stops` is empty and there is no station.
    pub fn straight_line(
        origin:  &Location,
        stops:   &[Location],
        station: Option<&Location>,
    ) -> MotionResult<Self> {
        let mut segments = Vec::with_capacity(stops.len() + 1);
        let mut from = origin.clone();
        for stop in stops {
            segments.push(Segment::straight(from, stop.clone(), SegmentKind::Delivery));
            from = stop.clone();
        }
        if let Some(station) = station {
            segments.push(Segment::straight(from, station.clone(), SegmentKind::Charging));
        }
        Self::new(segments)
    }

    /// A single straight charging leg to `station`.
    pub fn charging_trip(origin: &Location, station: &Location) -> Self {
        Self {
            segments: vec![Segment::straight(origin.clone(), station.clone(), SegmentKind::Charging)],
        }
    }

    /// Check that this journey can carry a delivery with `stop_count` stops:
    /// one delivery segment per stop.
    pub fn check_stops(&self, stop_count: usize) -> MotionResult<()> {
        let delivery_legs = self.delivery_leg_count();
        if delivery_legs != stop_count {
            return Err(MotionError::StopMismatch { stops: stop_count, segments: delivery_legs });
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn delivery_leg_count(&self) -> usize {
        self.segments.iter().filter(|s| s.kind == SegmentKind::Delivery).count()
    }

    pub fn total_distance_m(&self) -> f64 {
        self.segments.iter().map(|s| s.route.distance_m).sum()
    }

    pub fn total_duration_s(&self) -> f64 {
        self.segments.iter().map(|s| s.route.duration_s).sum()
    }

    /// Final destination of the journey.
    pub fn destination(&self) -> Option<&Location> {
        self.segments.last().map(|s| &s.to)
    }
}
