//! Greedy step engine for the debris collection mission.
//!
//! [`step`] is a pure transition: it looks at the satellite, the debris field
//! and the configuration, picks exactly one action, and describes the result.
//! [`MissionState`] owns the mutable side (debris statuses, move counter,
//! status, summary) and applies outcomes one tick at a time.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::config::MissionConfig;
use crate::control::debris::{self, Debris, Orbit, Position};
use crate::control::satellite::Satellite;
use crate::control::targeting::select_target;
use crate::errors::SimulationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Idle,
    Running,
    Complete,
    Failed,
}

impl MissionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MissionStatus::Complete | MissionStatus::Failed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub total_debris_collected: u32,
    pub total_moves: u32,
    pub fuel_left: u32,
}

/// Terminal failures. The `Display` text is the mission log entry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MissionFailure {
    #[error("❌ CRITICAL ERROR: Not enough fuel to leave base. Mission failed.")]
    StrandedAtBase,

    #[error("❌ STRANDED: Out of fuel in {orbit}. Mission failed.")]
    StrandedInOrbit { orbit: Orbit },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnReason {
    StorageFull,
    FuelCritical,
    AllCollected,
}

impl ReturnReason {
    pub fn tag(self) -> &'static str {
        match self {
            ReturnReason::StorageFull => "storage-full",
            ReturnReason::FuelCritical => "fuel-critical",
            ReturnReason::AllCollected => "all-collected",
        }
    }
}

/// Side annotations for presentation layers. Carries no mission state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionEvent {
    Collecting { debris_id: String, orbit: Orbit },
}

/// The single thing the satellite does during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Complete,
    Unload { amount: u32 },
    Refuel { fuel: u32 },
    Depart { target: Orbit },
    Collect { debris_id: String, orbit: Orbit },
    ReturnToBase { reason: ReturnReason },
    Reposition { from: Orbit, to: Orbit },
    FallbackToBase,
    Stranded(MissionFailure),
}

impl Action {
    pub fn is_move(&self) -> bool {
        matches!(
            self,
            Action::Depart { .. }
                | Action::ReturnToBase { .. }
                | Action::Reposition { .. }
                | Action::FallbackToBase
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Complete => write!(
                f,
                "✅ Mission Complete: All debris collected and satellite returned to base."
            ),
            Action::Unload { amount } => {
                write!(f, "📦 Emptying storage at base. Removed {} debris.", amount)
            }
            Action::Refuel { fuel } => write!(f, "⛽ Refueling at base. Fuel restored to {}.", fuel),
            Action::Depart { target } => {
                write!(f, "🪐 Moving from base to {} (most debris).", target)
            }
            Action::Collect { debris_id, orbit } => {
                write!(f, "♻️ Collecting debris {} in {}.", debris_id, orbit)
            }
            Action::ReturnToBase { reason } => match reason {
                ReturnReason::StorageFull => write!(f, "🪫 Storage full. Returning to base."),
                ReturnReason::FuelCritical => write!(f, "⛽ Fuel critical. Returning to base."),
                ReturnReason::AllCollected => {
                    write!(f, "🛰️ All known debris collected. Returning to base.")
                }
            },
            Action::Reposition { from, to } => write!(
                f,
                "🪐 Current orbit clear. Moving from {} to {}.",
                from, to
            ),
            Action::FallbackToBase => write!(
                f,
                "🤔 No other targets found. Returning to base as a precaution."
            ),
            Action::Stranded(failure) => write!(f, "{}", failure),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub satellite: Satellite,
    /// Index into the debris slice of the item collected this tick.
    pub collected: Option<usize>,
    pub action: Action,
    pub status: Option<MissionStatus>,
    pub event: Option<MissionEvent>,
}

impl StepOutcome {
    fn stay(satellite: Satellite, action: Action) -> Self {
        StepOutcome {
            satellite,
            collected: None,
            action,
            status: None,
            event: None,
        }
    }

    fn complete(satellite: Satellite) -> Self {
        StepOutcome {
            status: Some(MissionStatus::Complete),
            ..Self::stay(satellite, Action::Complete)
        }
    }

    fn stranded(satellite: Satellite, failure: MissionFailure) -> Self {
        StepOutcome {
            status: Some(MissionStatus::Failed),
            ..Self::stay(satellite, Action::Stranded(failure))
        }
    }

    fn travel(satellite: &Satellite, destination: Position, action: Action) -> Self {
        match satellite.moved_to(destination) {
            Some(moved) => Self::stay(moved, action),
            None => match satellite.position {
                Position::Base => Self::stranded(*satellite, MissionFailure::StrandedAtBase),
                Position::Orbit(orbit) => {
                    Self::stranded(*satellite, MissionFailure::StrandedInOrbit { orbit })
                }
            },
        }
    }

    pub fn log_message(&self) -> String {
        self.action.to_string()
    }
}

/// Decides the satellite's next action. Exactly one branch fires per call.
pub fn step(satellite: &Satellite, debris: &[Debris], config: &MissionConfig) -> StepOutcome {
    let remaining = debris::remaining(debris);

    let orbit = match satellite.position {
        Position::Base => return step_at_base(satellite, debris, remaining, config),
        Position::Orbit(orbit) => orbit,
    };

    if !satellite.is_storage_full(config.storage_capacity()) {
        let here = debris
            .iter()
            .position(|d| d.is_in_orbit() && d.orbit() == orbit);
        if let Some(index) = here {
            let debris_id = debris[index].id().to_string();
            return StepOutcome {
                satellite: satellite.loaded(),
                collected: Some(index),
                action: Action::Collect {
                    debris_id: debris_id.clone(),
                    orbit,
                },
                status: None,
                event: Some(MissionEvent::Collecting { debris_id, orbit }),
            };
        }
    }

    let reason = if satellite.is_storage_full(config.storage_capacity()) {
        Some(ReturnReason::StorageFull)
    } else if satellite.is_fuel_critical() {
        Some(ReturnReason::FuelCritical)
    } else if remaining == 0 {
        Some(ReturnReason::AllCollected)
    } else {
        None
    };

    if let Some(reason) = reason {
        return StepOutcome::travel(satellite, Position::Base, Action::ReturnToBase { reason });
    }

    match select_target(debris, Some(orbit)) {
        Some(next) => StepOutcome::travel(
            satellite,
            next.into(),
            Action::Reposition {
                from: orbit,
                to: next,
            },
        ),
        None => StepOutcome::travel(satellite, Position::Base, Action::FallbackToBase),
    }
}

fn step_at_base(
    satellite: &Satellite,
    debris: &[Debris],
    remaining: usize,
    config: &MissionConfig,
) -> StepOutcome {
    // The final haul is unloaded before the mission is declared complete.
    if remaining == 0 && satellite.storage == 0 {
        return StepOutcome::complete(*satellite);
    }

    if satellite.storage > 0 {
        return StepOutcome::stay(
            satellite.unloaded(),
            Action::Unload {
                amount: satellite.storage,
            },
        );
    }

    if satellite.fuel < config.max_fuel() {
        return StepOutcome::stay(
            satellite.refueled(config.max_fuel()),
            Action::Refuel {
                fuel: config.max_fuel(),
            },
        );
    }

    match select_target(debris, None) {
        Some(target) => {
            StepOutcome::travel(satellite, target.into(), Action::Depart { target })
        }
        None => StepOutcome::complete(*satellite),
    }
}

/// Everything the engine mutates over a run, minus timing and the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionState {
    config: MissionConfig,
    satellite: Satellite,
    debris: Vec<Debris>,
    moves: u32,
    status: MissionStatus,
    summary: Option<MissionSummary>,
}

impl MissionState {
    pub(crate) fn new(config: MissionConfig, debris: Vec<Debris>) -> Self {
        MissionState {
            config,
            satellite: Satellite::new(config.max_fuel()),
            debris,
            moves: 0,
            status: MissionStatus::Idle,
            summary: None,
        }
    }

    /// Builds a state from an arbitrary satellite, e.g. to resume mid-mission.
    pub fn with_satellite(
        config: MissionConfig,
        satellite: Satellite,
        debris: Vec<Debris>,
    ) -> Result<Self, SimulationError> {
        if satellite.fuel > config.max_fuel() {
            return Err(SimulationError::MissionError(format!(
                "satellite fuel {} exceeds max fuel {}",
                satellite.fuel,
                config.max_fuel()
            )));
        }
        if satellite.storage > config.storage_capacity() {
            return Err(SimulationError::MissionError(format!(
                "satellite storage {} exceeds capacity {}",
                satellite.storage,
                config.storage_capacity()
            )));
        }
        if debris.len() != config.debris_count() as usize {
            return Err(SimulationError::MissionError(format!(
                "expected {} debris, got {}",
                config.debris_count(),
                debris.len()
            )));
        }
        let mut seen = HashSet::new();
        for item in &debris {
            if !seen.insert(item.id()) {
                return Err(SimulationError::MissionError(format!(
                    "duplicate debris id {}",
                    item.id()
                )));
            }
        }

        Ok(MissionState {
            satellite,
            ..MissionState::new(config, debris)
        })
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn satellite(&self) -> &Satellite {
        &self.satellite
    }

    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn summary(&self) -> Option<&MissionSummary> {
        self.summary.as_ref()
    }

    pub fn collected_count(&self) -> usize {
        debris::collected(&self.debris)
    }

    pub fn remaining_count(&self) -> usize {
        debris::remaining(&self.debris)
    }

    pub fn begin(&mut self) {
        if self.status == MissionStatus::Idle {
            self.status = MissionStatus::Running;
        }
    }

    /// Runs one engine step and applies it. Returns None unless Running.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.status != MissionStatus::Running {
            return None;
        }

        let outcome = step(&self.satellite, &self.debris, &self.config);
        self.apply(&outcome);
        Some(outcome)
    }

    fn apply(&mut self, outcome: &StepOutcome) {
        self.satellite = outcome.satellite;

        if let Some(index) = outcome.collected {
            if let Some(item) = self.debris.get_mut(index) {
                item.collect();
            }
        }

        if outcome.action.is_move() {
            self.moves += 1;
        }

        match outcome.status {
            Some(MissionStatus::Complete) => {
                self.status = MissionStatus::Complete;
                self.summary = Some(MissionSummary {
                    total_debris_collected: self.debris.len() as u32,
                    total_moves: self.moves,
                    fuel_left: self.satellite.fuel,
                });
            }
            Some(status) => self.status = status,
            None => {}
        }
    }
}
