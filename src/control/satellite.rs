use serde::{Deserialize, Serialize};

use crate::constants::{CRITICAL_FUEL_LEVEL, FUEL_PER_MOVE};
use crate::control::debris::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Satellite {
    pub position: Position,
    pub fuel: u32,
    pub storage: u32,
}

impl Satellite {
    // Parked at base with a full tank and an empty hold
    pub fn new(max_fuel: u32) -> Self {
        Satellite {
            position: Position::Base,
            fuel: max_fuel,
            storage: 0,
        }
    }

    pub fn is_at_base(&self) -> bool {
        self.position.is_base()
    }

    pub fn is_fuel_critical(&self) -> bool {
        self.fuel <= CRITICAL_FUEL_LEVEL
    }

    pub fn is_storage_full(&self, capacity: u32) -> bool {
        self.storage >= capacity
    }

    /// Burns one unit of fuel and relocates. Returns None instead of moving
    /// when the tank is empty.
    pub fn moved_to(&self, destination: Position) -> Option<Satellite> {
        let fuel = self.fuel.checked_sub(FUEL_PER_MOVE)?;
        Some(Satellite {
            position: destination,
            fuel,
            ..*self
        })
    }

    pub fn refueled(&self, max_fuel: u32) -> Satellite {
        Satellite {
            fuel: max_fuel,
            ..*self
        }
    }

    pub fn unloaded(&self) -> Satellite {
        Satellite {
            storage: 0,
            ..*self
        }
    }

    pub fn loaded(&self) -> Satellite {
        Satellite {
            storage: self.storage + 1,
            ..*self
        }
    }
}
