//! Point kinetics and thermal-hydraulics solvers
//!
//! This module provides the pure physics functions for the reactor model.
//! Each function advances one piece of the coupled system by a single
//! explicit Euler sub-step; the simulator drives them in lockstep.

/// Physical constants for the point reactor model
pub mod constants {
    /// Delayed neutron fraction per precursor group
    pub const BETA: [f64; 6] = [0.000215, 0.001424, 0.001274, 0.002568, 0.000748, 0.000273];
    /// Precursor decay constant per group [1/s]
    pub const LAMBDA: [f64; 6] = [0.0124, 0.0305, 0.111, 0.301, 1.14, 3.01];
    pub const TOTAL_BETA: f64 = 0.0065;
    pub const GENERATION_TIME: f64 = 8.0e-5; // seconds

    // Reactivity tuning: clean core sits at +500 pcm, the rod bank is worth
    // -1500 pcm fully inserted, so full insertion always shuts the core down.
    pub const BASE_EXCESS_REACTIVITY: f64 = 0.005;
    pub const TOTAL_ROD_WORTH: f64 = 0.015;

    // Temperature feedback coefficients [dk/k per K], both negative
    pub const ALPHA_FUEL: f64 = -1.5e-5;
    pub const ALPHA_COOLANT: f64 = -5.0e-5;
    pub const REF_FUEL_TEMP: f64 = 600.0;
    pub const REF_COOLANT_TEMP: f64 = 550.0;

    // Two-node heat transfer
    pub const K_FUEL_CLAD: f64 = 800.0;
    pub const K_SINK: f64 = 500.0;
    pub const SINK_TEMP: f64 = 290.0;
    pub const MASS_FUEL: f64 = 1000.0;   // [kg]
    pub const CP_FUEL: f64 = 300.0;      // [J/(kg*K)]
    pub const MASS_COOLANT: f64 = 2000.0;
    pub const CP_COOLANT: f64 = 4000.0;
    /// Calibration factor from the power proxy to the heat-rate scale
    pub const POWER_SCALE: f64 = 1000.0;

    /// Sub-steps per frame advance; fixed, never adaptive
    pub const SUB_STEPS: usize = 100;
    /// Lower clamp on neutron density
    pub const MIN_NEUTRON_DENSITY: f64 = 1.0e-10;
    pub const INITIAL_NEUTRON_DENSITY: f64 = 100.0;
    /// pcm per unit of dimensionless reactivity
    pub const PCM: f64 = 1.0e5;
}

use constants::*;

/// Calculate net reactivity from rod insertion and temperature feedback
///
/// # Arguments
/// * `rod_position` - Rod bank insertion [%], 0 = withdrawn, 100 = inserted
/// * `fuel_temp` - Fuel temperature [K]
/// * `coolant_temp` - Coolant temperature [K]
///
/// # Returns
/// Total reactivity [dk/k]
pub fn calc_reactivity(rod_position: f64, fuel_temp: f64, coolant_temp: f64) -> f64 {
    let rod_fraction = rod_position / 100.0;
    let rod_worth = rod_fraction * TOTAL_ROD_WORTH;
    let feedback = ALPHA_FUEL * (fuel_temp - REF_FUEL_TEMP)
        + ALPHA_COOLANT * (coolant_temp - REF_COOLANT_TEMP);
    BASE_EXCESS_REACTIVITY - rod_worth + feedback
}

/// Advance the six-group point kinetics equations by one sub-step
///
/// Explicit forward Euler with a simultaneous update: the density and every
/// precursor derivative are evaluated from the state at the start of the
/// sub-step, then applied together. The density is clamped to
/// `MIN_NEUTRON_DENSITY` so the multiplicative term can never stall at zero.
///
/// # Arguments
/// * `density` - Neutron density at the start of the sub-step
/// * `precursors` - Precursor concentrations at the start of the sub-step
/// * `reactivity` - Current reactivity [dk/k]
/// * `dt` - Sub-step duration [s]
///
/// # Returns
/// Tuple of (new neutron density, new precursor concentrations)
pub fn solve_kinetics(
    density: f64,
    precursors: &[f64; 6],
    reactivity: f64,
    dt: f64,
) -> (f64, [f64; 6]) {
    let mut decay_source = 0.0;
    for i in 0..6 {
        decay_source += LAMBDA[i] * precursors[i];
    }
    let dn_dt = ((reactivity - TOTAL_BETA) / GENERATION_TIME) * density + decay_source;

    let mut precursors_new = *precursors;
    for i in 0..6 {
        let dc_dt = (BETA[i] / GENERATION_TIME) * density - LAMBDA[i] * precursors[i];
        precursors_new[i] += dc_dt * dt;
    }

    let mut density_new = density + dn_dt * dt;
    if density_new < MIN_NEUTRON_DENSITY {
        density_new = MIN_NEUTRON_DENSITY;
    }

    (density_new, precursors_new)
}

/// Advance the two-node lumped thermal model by one sub-step
///
/// Conduction moves heat from fuel to coolant, the sink removes heat from
/// the coolant. `power` is the density value just produced by the kinetics
/// update for the same sub-step.
///
/// # Returns
/// Tuple of (new fuel temperature, new coolant temperature) [K]
pub fn solve_thermal(power: f64, fuel_temp: f64, coolant_temp: f64, dt: f64) -> (f64, f64) {
    let q_fuel_to_coolant = K_FUEL_CLAD * (fuel_temp - coolant_temp);
    let q_to_sink = K_SINK * (coolant_temp - SINK_TEMP);

    let dtf_dt = (power * POWER_SCALE - q_fuel_to_coolant) / (MASS_FUEL * CP_FUEL);
    let dtc_dt = (q_fuel_to_coolant - q_to_sink) / (MASS_COOLANT * CP_COOLANT);

    (fuel_temp + dtf_dt * dt, coolant_temp + dtc_dt * dt)
}

/// Precursor concentrations in equilibrium with the given density
pub fn equilibrium_precursors(density: f64) -> [f64; 6] {
    let mut precursors = [0.0; 6];
    for i in 0..6 {
        precursors[i] = BETA[i] * density / (LAMBDA[i] * GENERATION_TIME);
    }
    precursors
}

/// Reactor period from the density change over an interval
///
/// Returns `f64::INFINITY` for a flat trend (stable period).
pub fn calc_period(density_old: f64, density_new: f64, dt: f64) -> f64 {
    if dt <= 0.0 || density_old <= 0.0 || density_new == density_old {
        return f64::INFINITY;
    }
    let dn_dt = (density_new - density_old) / dt;
    if dn_dt.abs() > 1e-10 {
        density_old / dn_dt
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reactivity_at_reference() {
        // Rod withdrawn, temperatures at their references: feedback is zero
        let rho = calc_reactivity(0.0, REF_FUEL_TEMP, REF_COOLANT_TEMP);
        assert_relative_eq!(rho, BASE_EXCESS_REACTIVITY);
    }

    #[test]
    fn test_reactivity_full_insertion() {
        let rho = calc_reactivity(100.0, REF_FUEL_TEMP, REF_COOLANT_TEMP);
        assert_relative_eq!(rho, BASE_EXCESS_REACTIVITY - TOTAL_ROD_WORTH);
        assert!(rho < 0.0);
    }

    #[test]
    fn test_rod_insertion_reduces_reactivity() {
        let shallow = calc_reactivity(10.0, REF_FUEL_TEMP, REF_COOLANT_TEMP);
        let deep = calc_reactivity(90.0, REF_FUEL_TEMP, REF_COOLANT_TEMP);
        assert!(deep < shallow);
    }

    #[test]
    fn test_temperature_feedback_is_negative() {
        let nominal = calc_reactivity(0.0, REF_FUEL_TEMP, REF_COOLANT_TEMP);
        let hot_fuel = calc_reactivity(0.0, REF_FUEL_TEMP + 100.0, REF_COOLANT_TEMP);
        let hot_coolant = calc_reactivity(0.0, REF_FUEL_TEMP, REF_COOLANT_TEMP + 100.0);
        assert!(hot_fuel < nominal);
        assert!(hot_coolant < nominal);
    }

    #[test]
    fn test_group_constants_consistent() {
        let sum: f64 = BETA.iter().sum();
        assert!((sum - TOTAL_BETA).abs() < 1e-5);
    }

    #[test]
    fn test_equilibrium_is_steady_at_zero_reactivity() {
        let density = INITIAL_NEUTRON_DENSITY;
        let precursors = equilibrium_precursors(density);
        let (density_new, _) = solve_kinetics(density, &precursors, 0.0, 1e-4);
        assert_relative_eq!(density_new, density, max_relative = 1e-5);
    }

    #[test]
    fn test_density_floor() {
        // Deeply subcritical, almost no precursor support: density collapses
        // onto the floor instead of going negative
        let (density_new, _) = solve_kinetics(1e-9, &[0.0; 6], -0.01, 1e-2);
        assert_eq!(density_new, MIN_NEUTRON_DENSITY);
    }

    #[test]
    fn test_kinetics_grows_when_supercritical() {
        let density = INITIAL_NEUTRON_DENSITY;
        let precursors = equilibrium_precursors(density);
        let (density_new, _) =
            solve_kinetics(density, &precursors, BASE_EXCESS_REACTIVITY, 1e-4);
        assert!(density_new > density);
    }

    #[test]
    fn test_thermal_derivative_signs_at_startup() {
        // At the initial operating point the fuel node heats up and the
        // coolant node sheds more to the sink than it receives
        let (fuel, coolant) =
            solve_thermal(INITIAL_NEUTRON_DENSITY, REF_FUEL_TEMP, REF_COOLANT_TEMP, 1e-3);
        assert!(fuel > REF_FUEL_TEMP);
        assert!(coolant < REF_COOLANT_TEMP);
    }

    #[test]
    fn test_period() {
        assert!(calc_period(100.0, 101.0, 0.1) > 0.0);
        assert!(calc_period(100.0, 99.0, 0.1) < 0.0);
        assert_eq!(calc_period(100.0, 100.0, 0.1), f64::INFINITY);
        assert_eq!(calc_period(100.0, 101.0, 0.0), f64::INFINITY);
    }
}
