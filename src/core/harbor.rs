use super::config::HarborConfig;
use super::docks::Docks;
use super::error::SimulationError;
use super::event::Event;
use super::event_queue::EventQueue;
use super::observer::{HarborObserver, Outcome, TransitionRecord};
use super::random::VariateGenerator;
use super::report::{RunReport, ShipTimings};
use super::tugboat::Tugboat;
use super::types::{ShipId, ShipSize, Transition, TugboatPosition};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::Rng;

/// Stamps of one ship; each is written once
#[derive(Debug, Clone, Default)]
struct ShipLog {
    size: Option<ShipSize>,
    arrival: Option<f64>,
    dock_arrival: Option<f64>,
    dock_departure: Option<f64>,
    departure: Option<f64>,
}

impl ShipLog {
    fn timings(&self) -> ShipTimings {
        ShipTimings {
            size: self.size,
            arrival_time: self.arrival.unwrap_or(0.0),
            dock_arrival_time: self.dock_arrival.unwrap_or(0.0),
            dock_departure_time: self.dock_departure.unwrap_or(0.0),
            departure_time: self.departure.unwrap_or(0.0),
        }
    }
}

fn stamp(slot: &mut Option<f64>, value: f64, what: &str, ship: ShipId) -> Result<(), SimulationError> {
    if slot.is_some() {
        return Err(SimulationError::InvariantViolation(format!(
            "{} of ship {} written twice",
            what, ship
        )));
    }
    *slot = Some(value);
    Ok(())
}

/// Discrete-event simulation of an overloaded harbor.
///
/// Ships arrive, wait for the tugboat and a free dock, load, and are towed
/// back out. The scheduler scans pending events in time order and runs the
/// first one whose transition can proceed; a transition blocked on the
/// tugboat or the docks stays queued with its original time, so a later
/// event may run before it.
pub struct HarborSimulation<R = StdRng> {
    config: HarborConfig,
    clock: f64,
    docks: Docks,
    tugboat: Tugboat,
    next_ship: usize,
    ships: Vec<ShipLog>,
    events: EventQueue,
    random: VariateGenerator<R>,
    observers: Vec<Box<dyn HarborObserver>>,
    relocation: Option<f64>,
    executed: usize,
    deferred: usize,
}

impl HarborSimulation<StdRng> {
    /// Create a simulation seeded from `config.seed`, or from entropy when unset
    pub fn new(config: HarborConfig) -> Result<Self, SimulationError> {
        let random = match config.seed {
            Some(seed) => VariateGenerator::seeded(seed),
            None => VariateGenerator::from_entropy(),
        };
        Self::with_generator(config, random)
    }
}

impl<R: Rng> HarborSimulation<R> {
    /// Create a simulation drawing from the given generator
    pub fn with_generator(
        config: HarborConfig,
        random: VariateGenerator<R>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let random = random.with_rejection_limit(config.normal_rejection_limit);

        Ok(Self {
            clock: 0.0,
            docks: Docks::new(config.docks),
            tugboat: Tugboat::new(TugboatPosition::AtDocks),
            next_ship: 0,
            ships: vec![ShipLog::default(); config.ships],
            events: EventQueue::new(),
            random,
            observers: Vec::new(),
            relocation: None,
            executed: 0,
            deferred: 0,
            config,
        })
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn HarborObserver>) {
        self.observers.push(observer);
    }

    /// Run until no event is pending
    pub fn run(&mut self) -> Result<RunReport, SimulationError> {
        self.generate_arrival()?;

        while !self.events.is_empty() {
            if !self.step()? {
                return Err(SimulationError::Deadlock {
                    clock: self.clock,
                    pending: self.events.len(),
                });
            }
        }

        if self.config.verbose {
            info!("FINISHED at {:.3}", self.clock);
        }
        for observer in &mut self.observers {
            observer.on_run_complete(self.clock, self.config.ships);
        }

        Ok(self.report())
    }

    /// One scan over the pending events, returns true if an event executed
    pub fn step(&mut self) -> Result<bool, SimulationError> {
        trace!("Scanning {} pending events at {:.3}", self.events.len(), self.clock);

        for index in 0..self.events.len() {
            let scheduled = match self.events.get(index) {
                Some(scheduled) => *scheduled,
                None => break,
            };

            if self.apply(scheduled.event)? {
                let position = self.events.position(scheduled.sequence_num).ok_or_else(|| {
                    SimulationError::InvariantViolation(format!(
                        "executed event {} vanished from the queue",
                        scheduled.sequence_num
                    ))
                })?;
                self.events.remove_at(position);
                return Ok(true);
            }
        }

        debug!(
            "No executable event among {} at {:.3}",
            self.events.len(),
            self.clock
        );
        Ok(false)
    }

    /// Per-ship timings gathered so far
    pub fn report(&self) -> RunReport {
        RunReport {
            ships: self.ships.iter().map(ShipLog::timings).collect(),
            final_clock: self.clock,
            transitions_executed: self.executed,
            transitions_deferred: self.deferred,
        }
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn free_docks(&self) -> usize {
        self.docks.free()
    }

    pub fn tugboat(&self) -> &Tugboat {
        &self.tugboat
    }

    pub fn pending_events(&self) -> &EventQueue {
        &self.events
    }

    pub fn config(&self) -> &HarborConfig {
        &self.config
    }

    fn apply(&mut self, event: Event) -> Result<bool, SimulationError> {
        let clock_before = self.clock;
        self.relocation = None;

        let executed = match event.transition {
            Transition::Enqueue => self.enqueue(event)?,
            Transition::Move => self.move_to_dock(event)?,
            Transition::Dock => self.dock(event)?,
            Transition::Ready => self.ready(event)?,
            Transition::Depart => self.depart(event)?,
            Transition::Done => self.done(event)?,
        };

        let outcome = if executed {
            self.executed += 1;
            Outcome::Executed
        } else {
            self.deferred += 1;
            Outcome::Deferred
        };

        if !self.observers.is_empty() {
            let record = TransitionRecord {
                ship: event.ship,
                transition: event.transition,
                event_time: event.time,
                clock_before,
                clock_after: self.clock,
                outcome,
                free_docks: self.docks.free(),
                tugboat_busy: self.tugboat.is_busy(),
                tugboat_position: self.tugboat.position(),
                relocation: self.relocation,
            };
            for observer in &mut self.observers {
                observer.on_transition(&record);
            }
        }

        Ok(executed)
    }

    fn schedule(&mut self, time: f64, ship: ShipId, transition: Transition) {
        trace!("Scheduling {} for ship {} at {:.3}", transition, ship, time);
        self.events.push(Event::new(time, ship, transition));
    }

    fn time_forward(&mut self, time: f64) {
        self.clock = self.clock.max(time);
    }

    fn scaled_exponential(&mut self, rate: f64) -> Result<f64, SimulationError> {
        Ok(self.random.exponential(rate)? * self.config.time_scale)
    }

    fn ship_mut(&mut self, ship: ShipId) -> Result<&mut ShipLog, SimulationError> {
        self.ships.get_mut(ship.index()).ok_or_else(|| {
            SimulationError::InvariantViolation(format!("unknown ship {}", ship))
        })
    }

    fn narrate(&self, message: std::fmt::Arguments<'_>) {
        if self.config.verbose {
            info!("{}", message);
        }
    }

    fn narrate_deferred(&self, message: std::fmt::Arguments<'_>) {
        if self.config.verbose {
            warn!("{}", message);
        }
    }

    /// Crosses the tugboat empty if needed, then starts a tow
    fn dispatch_tugboat(
        &mut self,
        pickup: TugboatPosition,
        dropoff: TugboatPosition,
    ) -> Result<(), SimulationError> {
        let rate = self.config.relocation_rate;
        let random = &mut self.random;
        let cost = self
            .tugboat
            .dispatch(pickup, dropoff, || random.exponential(rate))?;

        if let Some(cost) = cost {
            self.narrate(format_args!("Moving the tugboat to the {}", pickup));
            // Relocation is not multiplied by time_scale
            self.clock += cost;
            self.relocation = Some(cost);
        }
        Ok(())
    }

    /// Schedule the next ship's arrival while ships remain
    fn generate_arrival(&mut self) -> Result<bool, SimulationError> {
        if self.next_ship < self.config.ships {
            let ship = ShipId::new(self.next_ship);
            self.narrate(format_args!(
                "Generating the arrival time of ship number {}",
                ship
            ));
            let delay = self.scaled_exponential(self.config.arrival_rate)?;
            self.schedule(self.clock + delay, ship, Transition::Enqueue);
            self.next_ship += 1;
        }
        Ok(true)
    }

    fn enqueue(&mut self, event: Event) -> Result<bool, SimulationError> {
        let index = self.random.weighted_choice(&self.config.size_probabilities)?;
        let size = ShipSize::from_index(index).ok_or_else(|| {
            SimulationError::InvalidConfig(format!("no ship size for category {}", index))
        })?;

        let ship = self.ship_mut(event.ship)?;
        ship.size = Some(size);
        stamp(&mut ship.arrival, event.time, "arrival time", event.ship)?;
        self.time_forward(event.time);
        self.narrate(format_args!(
            "Ship number {} ({:?}) arrives at the port",
            event.ship, size
        ));

        self.schedule(self.clock, event.ship, Transition::Move);
        self.generate_arrival()
    }

    fn move_to_dock(&mut self, event: Event) -> Result<bool, SimulationError> {
        if !self.docks.has_free() || self.tugboat.is_busy() {
            self.narrate_deferred(format_args!(
                "Impossible to move ship number {} at this moment",
                event.ship
            ));
            return Ok(false);
        }

        self.dispatch_tugboat(TugboatPosition::AtPort, TugboatPosition::AtDocks)?;
        self.narrate(format_args!(
            "Ship number {} is being moved to a dock",
            event.ship
        ));
        let delay = self.scaled_exponential(self.config.tow_in_rate)?;
        self.schedule(self.clock + delay, event.ship, Transition::Dock);
        Ok(true)
    }

    fn dock(&mut self, event: Event) -> Result<bool, SimulationError> {
        self.time_forward(event.time);
        let clock = self.clock;

        let ship = self.ship_mut(event.ship)?;
        stamp(&mut ship.dock_arrival, clock, "dock arrival time", event.ship)?;
        let size = ship.size.ok_or_else(|| {
            SimulationError::InvariantViolation(format!("ship {} docked without a size", event.ship))
        })?;

        self.docks.occupy()?;
        self.tugboat.release();
        self.narrate(format_args!(
            "Ship number {} is loading its cargo",
            event.ship
        ));

        let (mean, variance) = self.config.cargo_time(size);
        let loading = self.random.approx_normal(mean, variance)? * self.config.time_scale;
        self.schedule(self.clock + loading, event.ship, Transition::Ready);
        Ok(true)
    }

    fn ready(&mut self, event: Event) -> Result<bool, SimulationError> {
        self.narrate(format_args!("Ship number {} is already loaded", event.ship));
        self.time_forward(event.time);
        self.schedule(self.clock, event.ship, Transition::Depart);
        Ok(true)
    }

    fn depart(&mut self, event: Event) -> Result<bool, SimulationError> {
        if self.tugboat.is_busy() {
            self.narrate_deferred(format_args!(
                "Tugboat is busy, ship number {} stays at its dock",
                event.ship
            ));
            return Ok(false);
        }

        self.dispatch_tugboat(TugboatPosition::AtDocks, TugboatPosition::AtPort)?;
        self.docks.release()?;
        self.narrate(format_args!(
            "Ship number {} is being moved back to the port",
            event.ship
        ));
        let delay = self.scaled_exponential(self.config.tow_out_rate)?;
        self.schedule(self.clock + delay, event.ship, Transition::Done);
        Ok(true)
    }

    fn done(&mut self, event: Event) -> Result<bool, SimulationError> {
        self.tugboat.release();
        self.time_forward(event.time);
        let clock = self.clock;

        let ship = self.ship_mut(event.ship)?;
        stamp(&mut ship.departure, clock, "departure time", event.ship)?;
        stamp(&mut ship.dock_departure, clock, "dock departure time", event.ship)?;
        self.narrate(format_args!(
            "Ship number {} is leaving the harbor",
            event.ship
        ));
        Ok(true)
    }
}
