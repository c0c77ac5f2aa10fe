//! Tick cadence and lifecycle for a mission.
//!
//! The driver runs on a logical clock that callers pump with [`MissionDriver::advance`].
//! Every scheduled job is stamped with the mission generation that created it;
//! [`MissionDriver::reset`] bumps the generation, so a job left over from an
//! earlier mission is dropped when it comes due instead of touching new state.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::constants::{
    COLLECT_FLASH, INIT_LOG_MESSAGE, START_DELAY, START_LOG_MESSAGE, TICK_INTERVAL,
};
use crate::control::config::MissionConfig;
use crate::control::debris::{generate_debris, Debris};
use crate::control::mission::{MissionEvent, MissionState, MissionStatus, MissionSummary};
use crate::control::satellite::Satellite;
use crate::telemetry_system::telemetry::{MissionLog, Telemetry, TickSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Job {
    Begin,
    Tick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScheduledJob {
    due: Duration,
    seq: u64,
    generation: u64,
    job: Job,
}

impl Ord for ScheduledJob {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl PartialOrd for ScheduledJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Read-only view handed to presentation collaborators.
#[derive(Clone, Debug, Serialize)]
pub struct MissionSnapshot {
    pub config: MissionConfig,
    pub status: MissionStatus,
    pub satellite: Satellite,
    pub debris: Vec<Debris>,
    pub log: Vec<String>,
    pub summary: Option<MissionSummary>,
    pub collecting: bool,
    pub moves: u32,
    pub ticks: u64,
    pub generation: u64,
    pub telemetry: Vec<TickSample>,
}

pub struct MissionDriver {
    state: MissionState,
    log: MissionLog,
    telemetry: Telemetry,
    rng: ChaCha8Rng,
    generation: u64,
    clock: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<ScheduledJob>>,
    events: Vec<MissionEvent>,
    collecting_until: Option<Duration>,
    ticks: u64,
    discarded: u64,
}

impl MissionDriver {
    pub fn new(config: MissionConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    pub fn with_seed(config: MissionConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: MissionConfig, mut rng: ChaCha8Rng) -> Self {
        let debris = generate_debris(config.debris_count(), &mut rng);
        Self::assemble(MissionState::new(config, debris), rng)
    }

    /// Wraps an existing state, e.g. a hand-built scenario. Debris for later
    /// resets comes from `seed`.
    pub fn from_state(state: MissionState, seed: u64) -> Self {
        Self::assemble(state, ChaCha8Rng::seed_from_u64(seed))
    }

    fn assemble(state: MissionState, rng: ChaCha8Rng) -> Self {
        MissionDriver {
            state,
            log: MissionLog::starting_with(INIT_LOG_MESSAGE),
            telemetry: Telemetry::new(),
            rng,
            generation: 0,
            clock: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
            events: Vec::new(),
            collecting_until: None,
            ticks: 0,
            discarded: 0,
        }
    }

    pub fn config(&self) -> &MissionConfig {
        self.state.config()
    }

    pub fn state(&self) -> &MissionState {
        &self.state
    }

    pub fn status(&self) -> MissionStatus {
        self.state.status()
    }

    pub fn satellite(&self) -> &Satellite {
        self.state.satellite()
    }

    pub fn debris(&self) -> &[Debris] {
        self.state.debris()
    }

    pub fn log(&self) -> &MissionLog {
        &self.log
    }

    pub fn summary(&self) -> Option<&MissionSummary> {
        self.state.summary()
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Jobs dropped because they belonged to an earlier generation.
    pub fn discarded_jobs(&self) -> u64 {
        self.discarded
    }

    /// Jobs scheduled by the current generation. Stale jobs still sit in
    /// the queue until they come due but are not counted.
    pub fn pending_jobs(&self) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(job)| job.generation == self.generation)
            .count()
    }

    /// True for a short while after each collection.
    pub fn is_collecting(&self) -> bool {
        self.collecting_until
            .is_some_and(|until| self.clock < until)
    }

    pub fn drain_events(&mut self) -> Vec<MissionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot {
            config: *self.state.config(),
            status: self.state.status(),
            satellite: *self.state.satellite(),
            debris: self.state.debris().to_vec(),
            log: self.log.entries().to_vec(),
            summary: self.state.summary().copied(),
            collecting: self.is_collecting(),
            moves: self.state.moves(),
            ticks: self.ticks,
            generation: self.generation,
            telemetry: self.telemetry.samples().to_vec(),
        }
    }

    /// Replaces the configuration and starts over from Idle.
    pub fn set_config(&mut self, config: MissionConfig) {
        let debris = generate_debris(config.debris_count(), &mut self.rng);
        self.reinitialize(MissionState::new(config, debris));
    }

    /// Back to Idle with fresh debris. Anything already scheduled goes stale.
    pub fn reset(&mut self) {
        let config = *self.state.config();
        let debris = generate_debris(config.debris_count(), &mut self.rng);
        self.reinitialize(MissionState::new(config, debris));
    }

    fn reinitialize(&mut self, state: MissionState) {
        self.generation += 1;
        self.state = state;
        self.log = MissionLog::starting_with(INIT_LOG_MESSAGE);
        self.telemetry = Telemetry::new();
        self.events.clear();
        self.collecting_until = None;
        self.ticks = 0;
        log::info!(
            "mission reset: generation={} debris={} max_fuel={} capacity={}",
            self.generation,
            self.state.debris().len(),
            self.state.config().max_fuel(),
            self.state.config().storage_capacity()
        );
    }

    /// Resets and schedules the mission to begin. Ignored while Running.
    pub fn start(&mut self) -> bool {
        if self.state.status() == MissionStatus::Running {
            log::debug!("start ignored: mission already running");
            return false;
        }

        self.reset();
        self.schedule(START_DELAY, Job::Begin);
        true
    }

    /// Same as [`start`](Self::start) but keeps the current debris field.
    pub fn start_current(&mut self) -> bool {
        if self.state.status() != MissionStatus::Idle {
            return self.start();
        }

        self.generation += 1;
        self.schedule(START_DELAY, Job::Begin);
        true
    }

    fn schedule(&mut self, delay: Duration, job: Job) {
        let scheduled = ScheduledJob {
            due: self.clock + delay,
            seq: self.next_seq,
            generation: self.generation,
            job,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(scheduled));
    }

    /// Moves the clock forward by `elapsed`, running every job that comes due.
    /// Returns the number of engine ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let target = self.clock + elapsed;
        let mut applied = 0;

        while let Some(Reverse(next)) = self.queue.peek().copied() {
            if next.due > target {
                break;
            }
            self.queue.pop();
            self.clock = next.due;

            if next.generation != self.generation {
                self.discarded += 1;
                log::debug!(
                    "discarding stale {:?} from generation {} (current {})",
                    next.job,
                    next.generation,
                    self.generation
                );
                continue;
            }

            match next.job {
                Job::Begin => self.begin(),
                Job::Tick => {
                    if self.run_tick() {
                        applied += 1;
                    }
                }
            }
        }

        self.clock = target;
        applied
    }

    /// Jumps the clock from job to job until the mission is over, the queue is
    /// empty, or `max_ticks` engine ticks have run.
    pub fn run_to_end(&mut self, max_ticks: usize) -> MissionStatus {
        let mut applied = 0;
        while applied < max_ticks && !self.state.status().is_terminal() {
            let Some(Reverse(next)) = self.queue.peek().copied() else {
                break;
            };
            let wait = next.due.saturating_sub(self.clock);
            applied += self.advance(wait);
        }
        self.state.status()
    }

    fn begin(&mut self) {
        self.state.begin();
        self.log.push(START_LOG_MESSAGE);
        log::info!("mission started: generation={}", self.generation);
        self.schedule(TICK_INTERVAL, Job::Tick);
    }

    fn run_tick(&mut self) -> bool {
        let Some(outcome) = self.state.tick() else {
            return false;
        };
        self.ticks += 1;

        let message = outcome.log_message();
        log::debug!(
            "tick {}: {} (fuel={} storage={})",
            self.ticks,
            message,
            outcome.satellite.fuel,
            outcome.satellite.storage
        );
        self.log.push(message);
        self.telemetry.collect_data(&self.state);

        if let Some(event) = outcome.event {
            self.collecting_until = Some(self.clock + COLLECT_FLASH);
            self.events.push(event);
        }

        match self.state.status() {
            MissionStatus::Running => self.schedule(TICK_INTERVAL, Job::Tick),
            MissionStatus::Complete => {
                log::info!(
                    "mission complete after {} ticks: {:?}",
                    self.ticks,
                    self.state.summary()
                )
            }
            MissionStatus::Failed => log::warn!("mission failed: {}", outcome.action),
            MissionStatus::Idle => {}
        }
        true
    }
}
