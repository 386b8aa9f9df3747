//! Fluent builder for constructing a [`Fleet`].

use fleet_core::{SimConfig, SimRng, Tick};
use fleet_motion::BatteryModel;
use fleet_route::GeoCatalog;
use fleet_store::PersistenceWriter;

use crate::fleet::Roster;
use crate::{Fleet, SimError, SimResult};

/// Robots in a default fleet.
pub const DEFAULT_ROBOT_COUNT: usize = 8;

/// Marker colours assigned in fleet order, cycling if the fleet is larger.
pub const ROBOT_COLORS: [&str; 8] = [
    "#22c55e", "#f59e0b", "#8b5cf6", "#0891b2",
    "#f472b6", "#10b981", "#d946ef", "#0ea5e9",
];

/// Display name of the robot at zero-based fleet position `index`.
pub fn default_robot_name(index: usize) -> String {
    format!("BOT-{:03}", index + 1)
}

/// Fluent builder for [`Fleet`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                   |
/// |---------------------|-------------------------------------------|
/// | `.catalog(c)`       | `GeoCatalog::austin()`                    |
/// | `.robot_count(n)`   | 8                                         |
/// | `.names(v)`         | `BOT-001`, `BOT-002`, …                   |
/// | `.colors(v)`        | [`ROBOT_COLORS`], cycled                  |
/// | `.persistence(w)`   | none; lifecycle writes are skipped        |
///
/// # Example
///
/// ```rust,ignore
/// let mut fleet = FleetBuilder::new(SimConfig::default())
///     .robot_count(4)
///     .build()?;
/// fleet.run_ticks(10, &mut NoopObserver);
/// ```
pub struct FleetBuilder {
    config:      SimConfig,
    catalog:     Option<GeoCatalog>,
    robot_count: usize,
    names:       Option<Vec<String>>,
    colors:      Option<Vec<String>>,
    persistence: Option<PersistenceWriter>,
}

impl FleetBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            catalog:     None,
            robot_count: DEFAULT_ROBOT_COUNT,
            names:       None,
            colors:      None,
            persistence: None,
        }
    }

    pub fn catalog(mut self, catalog: GeoCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn robot_count(mut self, count: usize) -> Self {
        self.robot_count = count;
        self
    }

    /// Robot names (must be length `robot_count`).
    pub fn names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    /// Robot colours (must be length `robot_count`).
    pub fn colors(mut self, colors: Vec<String>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Queue lifecycle and snapshot writes on `writer`.
    pub fn persistence(mut self, writer: PersistenceWriter) -> Self {
        self.persistence = Some(writer);
        self
    }

    /// Validate inputs and seed the fleet.
    pub fn build(self) -> SimResult<Fleet> {
        self.config.validate()?;
        let count = self.robot_count;

        let names = match self.names {
            Some(n) if n.len() != count => {
                return Err(SimError::CountMismatch { expected: count, got: n.len(), what: "robot names" });
            }
            Some(n) => n,
            None => (0..count).map(default_robot_name).collect(),
        };
        let colors = match self.colors {
            Some(c) if c.len() != count => {
                return Err(SimError::CountMismatch { expected: count, got: c.len(), what: "robot colors" });
            }
            Some(c) => c,
            None => (0..count).map(|i| ROBOT_COLORS[i % ROBOT_COLORS.len()].to_string()).collect(),
        };

        let mut fleet = Fleet {
            battery:     BatteryModel::from_config(&self.config),
            rng:         SimRng::new(self.config.seed),
            catalog:     self.catalog.unwrap_or_else(GeoCatalog::austin),
            config:      self.config,
            robots:      Vec::new(),
            tick:        Tick::ZERO,
            roster:      Roster { names: Vec::new(), colors: Vec::new() },
            persistence: self.persistence,
        };
        fleet.initialize(names, colors)?;
        Ok(fleet)
    }
}
