//! # Measurement Tool
//!
//! Two-point distance ruler as an explicit state machine. Every user action
//! is a [`MeasureEvent`] and [`MeasureTool::apply`] is the only transition
//! function, so the tool runs without a map surface.
//!
//! ```text
//!   Idle ──toggle──► ArmedEmpty ──click──► ArmedOne ──click──► Done
//!    ▲                                                          │
//!    └──────────── click (clears pins) / escape / toggle ◄──────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{DomainError, LatLon};

/// Placed ruler endpoints; never more than two.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum MeasurePoints {
    #[default]
    Empty,
    One(LatLon),
    Two(LatLon, LatLon),
}

impl MeasurePoints {
    pub const fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn get(&self, index: usize) -> Option<LatLon> {
        match (self, index) {
            (Self::One(p) | Self::Two(p, _), 0) | (Self::Two(_, p), 1) => Some(*p),
            _ => None,
        }
    }

    pub fn to_vec(&self) -> Vec<LatLon> {
        match *self {
            Self::Empty => Vec::new(),
            Self::One(a) => vec![a],
            Self::Two(a, b) => vec![a, b],
        }
    }
}

/// User input reaching the ruler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MeasureEvent {
    /// Ruler button pressed
    Toggle,
    /// Click on the map surface
    MapClick(LatLon),
    /// Escape key
    Escape,
    /// A placed pin was dragged
    Drag { index: usize, to: LatLon },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurePhase {
    /// Not measuring (stale pins may still be shown)
    Idle,
    /// Measuring, waiting for the first point
    ArmedEmpty,
    /// Measuring, waiting for the second point
    ArmedOne,
    /// Disarmed with a completed measurement
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawMeasureTool")]
pub struct MeasureTool {
    points: MeasurePoints,
    measuring: bool,
    distance_m: Option<f64>,
}

impl MeasureTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn points(&self) -> MeasurePoints {
        self.points
    }

    /// True while the ruler is armed and other features must not be interactive.
    pub const fn is_measuring(&self) -> bool {
        self.measuring
    }

    pub const fn distance_m(&self) -> Option<f64> {
        self.distance_m
    }

    pub fn distance_label(&self) -> Option<String> {
        self.distance_m.map(format_distance)
    }

    pub const fn phase(&self) -> MeasurePhase {
        match (self.measuring, self.points) {
            (true, MeasurePoints::Empty) => MeasurePhase::ArmedEmpty,
            (true, _) => MeasurePhase::ArmedOne,
            (false, MeasurePoints::Two(..)) => MeasurePhase::Done,
            (false, _) => MeasurePhase::Idle,
        }
    }

    /// Transition function: `(state, event) -> state`.
    #[must_use]
    pub fn apply(self, event: MeasureEvent) -> Self {
        let next = match event {
            MeasureEvent::Toggle if self.measuring => Self {
                measuring: false,
                ..self
            },
            MeasureEvent::Toggle => Self {
                points: MeasurePoints::Empty,
                measuring: true,
                distance_m: None,
            },
            MeasureEvent::Escape => Self::default(),
            MeasureEvent::MapClick(at) if self.measuring => self.place(at),
            // A click with the ruler off clears whatever pins are left.
            MeasureEvent::MapClick(_) => Self {
                points: MeasurePoints::Empty,
                distance_m: None,
                ..self
            },
            MeasureEvent::Drag { index, to } => self.drag(index, to),
        };
        if next.phase() != self.phase() {
            log::debug!("Ruler {:?} -> {:?}", self.phase(), next.phase());
        }
        next
    }

    fn place(self, at: LatLon) -> Self {
        match self.points {
            MeasurePoints::One(first) => Self {
                points: MeasurePoints::Two(first, at),
                measuring: false,
                distance_m: Some(first.distance_to_m(&at)),
            },
            // Rolling restart: a new click never appends a third point.
            MeasurePoints::Empty | MeasurePoints::Two(..) => Self {
                points: MeasurePoints::One(at),
                distance_m: None,
                ..self
            },
        }
    }

    fn drag(self, index: usize, to: LatLon) -> Self {
        let points = match (self.points, index) {
            (MeasurePoints::One(_), 0) => MeasurePoints::One(to),
            (MeasurePoints::Two(_, b), 0) => MeasurePoints::Two(to, b),
            (MeasurePoints::Two(a, _), 1) => MeasurePoints::Two(a, to),
            _ => return self,
        };
        let distance_m = match points {
            MeasurePoints::Two(a, b) => Some(a.distance_to_m(&b)),
            _ => self.distance_m,
        };
        Self {
            points,
            distance_m,
            ..self
        }
    }
}

#[derive(Deserialize)]
struct RawMeasureTool {
    points: MeasurePoints,
    measuring: bool,
    distance_m: Option<f64>,
}

impl TryFrom<RawMeasureTool> for MeasureTool {
    type Error = DomainError;

    /// Accept only states `apply` can reach; the distance is recomputed from the points.
    fn try_from(raw: RawMeasureTool) -> Result<Self, Self::Error> {
        let distance_m = match raw.points {
            MeasurePoints::Two(..) if raw.measuring => {
                return Err(DomainError::InconsistentState(
                    "ruler armed with two points placed".into(),
                ));
            }
            MeasurePoints::Two(a, b) => Some(a.distance_to_m(&b)),
            MeasurePoints::Empty | MeasurePoints::One(_) => None,
        };
        if raw.distance_m.is_some() != distance_m.is_some() {
            return Err(DomainError::InconsistentState(
                "ruler distance does not match its points".into(),
            ));
        }
        Ok(Self {
            points: raw.points,
            measuring: raw.measuring,
            distance_m,
        })
    }
}

/// Kilometers with two decimals from 1000 m up, meters with two decimals below.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{meters:.2} m")
    }
}
