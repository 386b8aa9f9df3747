//! Per-tick path following.
//!
//! A [`PathCursor`] tracks where a robot is on its [`Journey`]: the segment
//! index, the number of movement ticks spent on that segment, and an optional
//! servicing pause.  Progress is derived from the integer tick count rather
//! than accumulated as a float, so a segment needing `T` ticks completes on
//! exactly tick `ceil(T)`.

use fleet_core::{LngLat, Location, SimConfig, SimRng};

use crate::{Journey, SegmentKind};

/// Number of ticks needed to cover `distance_m` at `speed_kmh`.
///
/// Returns `f64::INFINITY` for a non-positive speed.
#[inline]
pub fn ticks_to_traverse(distance_m: f64, speed_kmh: f64, ticks_per_second: f64) -> f64 {
    if speed_kmh <= 0.0 {
        return f64::INFINITY;
    }
    let speed_mps = speed_kmh / 3.6;
    distance_m.max(0.0) / speed_mps * ticks_per_second
}

/// Usable geometry points of `coords`.
///
/// Drops non-finite points and points within `epsilon` of `(0, 0)` on both
/// axes, which is what a zeroed or half-parsed coordinate looks like.
pub fn valid_points(coords: &[LngLat], epsilon: f64) -> Vec<LngLat> {
    coords
        .iter()
        .copied()
        .filter(|[lng, lat]| lng.is_finite() && lat.is_finite())
        .filter(|[lng, lat]| !(lng.abs() < epsilon && lat.abs() < epsilon))
        .collect()
}

/// Linear blend between the two points bracketing `progress`.
fn interpolate(points: &[LngLat], progress: f64) -> LngLat {
    let last = points.len() - 1;
    let exact = progress.clamp(0.0, 1.0) * last as f64;
    let lo = (exact.floor() as usize).min(last);
    let hi = (exact.ceil() as usize).min(last);
    let frac = exact - lo as f64;
    let [lng0, lat0] = points[lo];
    let [lng1, lat1] = points[hi];
    [lng0 + (lng1 - lng0) * frac, lat0 + (lat1 - lat0) * frac]
}

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// What one call to [`PathCursor::step`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// Paused at a stop; the pause continues next tick.
    Servicing,
    /// The pause ran out this tick.  The robot still did not move.
    PauseFinished,
    /// No movement: the segment geometry is unusable or the speed is zero.
    Skipped,
    /// Moved along the current segment to the given point.
    Moved(LngLat),
    /// Reached the end of segment `index`.
    SegmentCompleted {
        index: usize,
        kind: SegmentKind,
        arrived_at: Location,
        journey_finished: bool,
    },
}

// ── PathCursor ────────────────────────────────────────────────────────────────

/// Position of a robot along a journey.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCursor {
    /// Index of the segment being travelled.  Equals the journey length once
    /// the journey is finished.
    pub segment_index: usize,
    /// Movement ticks spent on the current segment.
    pub ticks_on_segment: u64,
    /// Fraction of the current segment covered, in `[0, 1)`.
    pub progress: f64,
    /// Remaining servicing pause in milliseconds, if paused at a stop.
    pub servicing_remaining_ms: Option<i64>,
}

impl PathCursor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_servicing(&self) -> bool {
        self.servicing_remaining_ms.is_some()
    }

    #[inline]
    pub fn is_finished(&self, journey: &Journey) -> bool {
        self.segment_index >= journey.len()
    }

    /// Advance one tick along `journey` at `speed_kmh`.
    ///
    /// Service pauses are drawn from `rng` when a segment other than the last
    /// completes.
    pub fn step(
        &mut self,
        journey:   &Journey,
        speed_kmh: f64,
        config:    &SimConfig,
        rng:       &mut SimRng,
    ) -> StepOutcome {
        if let Some(remaining) = self.servicing_remaining_ms.as_mut() {
            *remaining -= config.tick_interval_ms as i64;
            if *remaining <= 0 {
                self.servicing_remaining_ms = None;
                return StepOutcome::PauseFinished;
            }
            return StepOutcome::Servicing;
        }

        let Some(segment) = journey.get(self.segment_index) else {
            return StepOutcome::Skipped;
        };

        let points = valid_points(&segment.route.coordinates, config.corrupt_point_epsilon);
        if points.len() < 2 {
            return StepOutcome::Skipped;
        }

        let total = ticks_to_traverse(segment.route.distance_m, speed_kmh, config.ticks_per_second());
        if !total.is_finite() {
            return StepOutcome::Skipped;
        }

        self.ticks_on_segment += 1;
        if (self.ticks_on_segment as f64) < total {
            self.progress = self.ticks_on_segment as f64 / total;
            return StepOutcome::Moved(interpolate(&points, self.progress));
        }

        let index = self.segment_index;
        self.segment_index += 1;
        self.ticks_on_segment = 0;
        self.progress = 0.0;

        let journey_finished = self.is_finished(journey);
        if !journey_finished {
            let pause = rng.gen_range(config.service_pause_min_ms..=config.service_pause_max_ms);
            self.servicing_remaining_ms = Some(pause as i64);
        }

        StepOutcome::SegmentCompleted {
            index,
            kind: segment.kind,
            arrived_at: segment.to.clone(),
            journey_finished,
        }
    }
}
