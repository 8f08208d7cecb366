//! Point reactor simulation state
//!
//! This module contains the reactor state and the control surface driving
//! the physics solvers. The core is a lumped-parameter "point" model: one
//! neutron density, six delayed-neutron precursor groups, and a two-node
//! fuel/coolant thermal model, coupled through reactivity feedback.
//!
//! Because the neutron generation time is tiny the system is stiff; a full
//! 16 ms frame integrated in one explicit Euler step diverges. Every call to
//! [`ReactorCore::advance`] therefore slices the frame into
//! [`constants::SUB_STEPS`] equal sub-steps and runs the reactivity,
//! kinetics, and thermal solvers in lockstep for each.

use serde::{Deserialize, Serialize};

use crate::physics;
use crate::physics::constants;

/// Display deadband around exact criticality [pcm]
const CRITICAL_BAND_PCM: f64 = 50.0;

/// Instantaneous operating regime implied by the reactivity sign
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Criticality {
    Supercritical, // positive reactivity, growing power
    Critical,      // within the display deadband, steady power
    Subcritical,   // negative reactivity, decaying power
}

/// Per-frame state snapshot handed to the host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub time: f64,                // Simulation time [s]
    pub power: f64,               // Neutron density proxy for thermal power
    pub fuel_temperature: f64,    // [K]
    pub coolant_temperature: f64, // [K]
    pub reactivity: f64,          // [pcm]
    pub rod_position: f64,        // [%], 0 = withdrawn, 100 = inserted
    pub period: f64,              // Reactor period [s], infinite when power is flat
}

impl Snapshot {
    /// Operating regime for display, derived from the reactivity sign
    pub fn criticality(&self) -> Criticality {
        if self.reactivity > CRITICAL_BAND_PCM {
            Criticality::Supercritical
        } else if self.reactivity < -CRITICAL_BAND_PCM {
            Criticality::Subcritical
        } else {
            Criticality::Critical
        }
    }
}

/// Point reactor simulation engine
///
/// Exclusively owned by its caller; all mutation happens through `&mut self`
/// and only [`Snapshot`] values leave the core.
pub struct ReactorCore {
    time: f64,
    neutron_density: f64,
    precursors: [f64; 6],
    fuel_temperature: f64,
    coolant_temperature: f64,
    rod_position: f64,
}

impl Default for ReactorCore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactorCore {
    /// Create a core in the startup state: 100 units of neutron density,
    /// precursor groups at their equilibrium concentrations, rods withdrawn.
    pub fn new() -> Self {
        let neutron_density = constants::INITIAL_NEUTRON_DENSITY;
        Self {
            time: 0.0,
            neutron_density,
            precursors: physics::equilibrium_precursors(neutron_density),
            fuel_temperature: constants::REF_FUEL_TEMP,
            coolant_temperature: constants::REF_COOLANT_TEMP,
            rod_position: 0.0,
        }
    }

    /// Set the rod bank insertion, silently clamped to [0, 100]
    pub fn set_rod(&mut self, position: f64) {
        self.rod_position = position.clamp(0.0, 100.0);
    }

    /// Emergency shutdown: drive the rod bank to full insertion. Idempotent.
    pub fn scram(&mut self) {
        if self.rod_position < 100.0 {
            log::warn!("SCRAM initiated at t = {:.2} s", self.time);
        }
        self.rod_position = 100.0;
    }

    /// Current rod bank insertion [%]
    pub fn rod_position(&self) -> f64 {
        self.rod_position
    }

    /// Advance the simulation by `dt` seconds and return the new snapshot
    ///
    /// Runs exactly [`constants::SUB_STEPS`] sub-steps of `dt / SUB_STEPS`.
    /// `dt` must be non-negative and finite; the caller is expected to cap
    /// it (the demo driver uses 0.1 s) to bound the physical time covered by
    /// one burst of sub-steps.
    pub fn advance(&mut self, dt: f64) -> Snapshot {
        self.time += dt;

        let density_before = self.neutron_density;
        let sub_dt = dt / constants::SUB_STEPS as f64;
        for _ in 0..constants::SUB_STEPS {
            self.sub_step(sub_dt);
        }

        self.make_snapshot(physics::calc_period(density_before, self.neutron_density, dt))
    }

    /// One physics sub-step: reactivity, then kinetics, then thermal.
    /// The thermal solver sees the density the kinetics update just produced.
    fn sub_step(&mut self, dt: f64) {
        let rho =
            physics::calc_reactivity(self.rod_position, self.fuel_temperature, self.coolant_temperature);

        let (density, precursors) =
            physics::solve_kinetics(self.neutron_density, &self.precursors, rho, dt);
        self.neutron_density = density;
        self.precursors = precursors;

        let (fuel_temperature, coolant_temperature) =
            physics::solve_thermal(density, self.fuel_temperature, self.coolant_temperature, dt);
        self.fuel_temperature = fuel_temperature;
        self.coolant_temperature = coolant_temperature;
    }

    /// Snapshot the current state without advancing
    pub fn snapshot(&self) -> Snapshot {
        self.make_snapshot(f64::INFINITY)
    }

    /// Reset to the startup state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn make_snapshot(&self, period: f64) -> Snapshot {
        let rho =
            physics::calc_reactivity(self.rod_position, self.fuel_temperature, self.coolant_temperature);
        Snapshot {
            time: self.time,
            power: self.neutron_density,
            fuel_temperature: self.fuel_temperature,
            coolant_temperature: self.coolant_temperature,
            reactivity: rho * constants::PCM,
            rod_position: self.rod_position,
            period,
        }
    }
}
