//! Fixed geography: delivery sample locations and charging stations.

use fleet_core::{CoreError, CoreResult, Location, SimRng};

/// Central Austin delivery targets.
const AUSTIN_SAMPLES: &[(f64, f64, &str)] = &[
    (30.274665, -97.740350, "Texas Capitol"),
    (30.286106, -97.739387, "UT Tower"),
    (30.283307, -97.732549, "DKR Stadium"),
    (30.280302, -97.737112, "Blanton Museum"),
    (30.280410, -97.739300, "Bullock Museum"),
    (30.266940, -97.752529, "Central Library"),
    (30.265003, -97.747349, "City Hall"),
    (30.263436, -97.739321, "Convention Center"),
    (30.266590, -97.772540, "Zilker Park"),
    (30.263987, -97.771255, "Barton Springs"),
    (30.260641, -97.751428, "Long Center"),
    (30.262567, -97.744090, "Congress Ave Bridge"),
    (30.270714, -97.733223, "Moody Amphitheater"),
    (30.271740, -97.753414, "Whole Foods (Lamar)"),
    (30.270098, -97.731070, "Franklin BBQ"),
    (30.268451, -97.754940, "Seaholm Power Plant"),
    (30.265950, -97.747996, "ACL Live"),
    (30.267980, -97.746160, "Republic Square"),
    (30.261780, -97.720910, "Plaza Saltillo"),
    (30.276870, -97.731470, "Dell Seton Medical Center"),
];

/// Central Austin charging hubs.
const AUSTIN_STATIONS: &[(f64, f64, &str)] = &[
    (30.263900, -97.739900, "Convention Ctr Garage"),
    (30.265080, -97.747460, "City Hall Garage"),
    (30.266870, -97.752300, "Central Library Garage"),
    (30.274540, -97.739560, "Capitol Visitors Garage"),
    (30.280725, -97.739479, "Bullock Garage"),
    (30.287811, -97.734918, "UT San Jac Garage"),
    (30.281520, -97.737330, "UT Brazos Garage"),
    (30.267920, -97.754620, "Seaholm Garage"),
    (30.251870, -97.749790, "Music Lane Garage"),
    (30.261620, -97.722330, "Plaza Saltillo Garage"),
];

fn to_locations(rows: &[(f64, f64, &str)]) -> Vec<Location> {
    rows.iter()
        .map(|&(lat, lng, address)| Location::new(lat, lng, address))
        .collect()
}

/// The static location sets used for seeding and charging lookups.
#[derive(Debug, Clone)]
pub struct GeoCatalog {
    sample_locations: Vec<Location>,
    charging_stations: Vec<Location>,
}

impl Default for GeoCatalog {
    fn default() -> Self {
        Self::austin()
    }
}

impl GeoCatalog {
    pub fn new(sample_locations: Vec<Location>, charging_stations: Vec<Location>) -> Self {
        Self { sample_locations, charging_stations }
    }

    /// 20 delivery targets and 10 charging hubs in central Austin.
    pub fn austin() -> Self {
        Self::new(to_locations(AUSTIN_SAMPLES), to_locations(AUSTIN_STATIONS))
    }

    pub fn sample_locations(&self) -> &[Location] {
        &self.sample_locations
    }

    pub fn charging_stations(&self) -> &[Location] {
        &self.charging_stations
    }

    /// The station closest to `location` by Euclidean distance in degree
    /// space.  This is not route distance.  On exact ties the first station
    /// in catalog order wins.  `None` only if the catalog has no stations.
    pub fn nearest_charging_station(&self, location: &Location) -> Option<&Location> {
        let mut nearest: Option<(&Location, f64)> = None;
        for station in &self.charging_stations {
            let d = station.planar_distance(location);
            match nearest {
                Some((_, best)) if d >= best => {}
                _ => nearest = Some((station, d)),
            }
        }
        nearest.map(|(station, _)| station)
    }

    /// `count` distinct sample locations chosen without replacement.
    pub fn sample_distinct(&self, count: usize, rng: &mut SimRng) -> CoreResult<Vec<Location>> {
        let available = self.sample_locations.len();
        if count > available {
            return Err(CoreError::NotEnoughLocations { requested: count, available });
        }
        Ok(rng
            .sample_indices(available, count)
            .into_iter()
            .map(|i| self.sample_locations[i].clone())
            .collect())
    }
}
