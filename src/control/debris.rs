use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::ORBIT_COUNT;

/// One of the fixed orbital slots debris can occupy, ordered by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Orbit {
    #[serde(rename = "orbit_1")]
    Orbit1,
    #[serde(rename = "orbit_2")]
    Orbit2,
    #[serde(rename = "orbit_3")]
    Orbit3,
    #[serde(rename = "orbit_4")]
    Orbit4,
    #[serde(rename = "orbit_5")]
    Orbit5,
}

impl Orbit {
    pub const ALL: [Orbit; ORBIT_COUNT] = [
        Orbit::Orbit1,
        Orbit::Orbit2,
        Orbit::Orbit3,
        Orbit::Orbit4,
        Orbit::Orbit5,
    ];

    pub fn index(self) -> usize {
        match self {
            Orbit::Orbit1 => 0,
            Orbit::Orbit2 => 1,
            Orbit::Orbit3 => 2,
            Orbit::Orbit4 => 3,
            Orbit::Orbit5 => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Orbit> {
        Orbit::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Orbit::Orbit1 => "orbit_1",
            Orbit::Orbit2 => "orbit_2",
            Orbit::Orbit3 => "orbit_3",
            Orbit::Orbit4 => "orbit_4",
            Orbit::Orbit5 => "orbit_5",
        }
    }
}

impl fmt::Display for Orbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the satellite currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Base,
    Orbit(Orbit),
}

impl Position {
    pub fn is_base(self) -> bool {
        matches!(self, Position::Base)
    }

    pub fn orbit(self) -> Option<Orbit> {
        match self {
            Position::Base => None,
            Position::Orbit(orbit) => Some(orbit),
        }
    }
}

impl From<Orbit> for Position {
    fn from(orbit: Orbit) -> Self {
        Position::Orbit(orbit)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Base => f.write_str("base"),
            Position::Orbit(orbit) => f.write_str(orbit.name()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebrisStatus {
    InOrbit,
    Collected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debris {
    id: String,
    orbit: Orbit,
    status: DebrisStatus,
}

impl Debris {
    pub fn new(id: impl Into<String>, orbit: Orbit) -> Self {
        Debris {
            id: id.into(),
            orbit,
            status: DebrisStatus::InOrbit,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn orbit(&self) -> Orbit {
        self.orbit
    }

    pub fn status(&self) -> DebrisStatus {
        self.status
    }

    pub fn is_in_orbit(&self) -> bool {
        self.status == DebrisStatus::InOrbit
    }

    /// Marks the debris collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.is_in_orbit() {
            self.status = DebrisStatus::Collected;
            true
        } else {
            false
        }
    }
}

/// Scatters `count` debris uniformly across the orbital slots, ids `D1..=Dcount`.
pub fn generate_debris<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<Debris> {
    (1..=count)
        .map(|i| {
            let orbit = Orbit::ALL[rng.gen_range(0..ORBIT_COUNT)];
            Debris::new(format!("D{}", i), orbit)
        })
        .collect()
}

pub fn remaining(debris: &[Debris]) -> usize {
    debris.iter().filter(|d| d.is_in_orbit()).count()
}

pub fn collected(debris: &[Debris]) -> usize {
    debris.len() - remaining(debris)
}
