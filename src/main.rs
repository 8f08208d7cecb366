//! Point Kinetics Reactor Simulator - Headless Demo Driver
//!
//! Steps one reactor core at a 60 FPS frame cadence through a scripted
//! operating scenario and writes one JSON snapshot line per simulated
//! second. The driver owns the frame cadence and the delta-time cap; the
//! core only integrates whatever `dt` it is handed.

use std::collections::VecDeque;

use nucleus_simulator_lib::{Criticality, ReactorCore, Snapshot};

/// Frame budget at 60 FPS [s]
const FRAME_DT: f64 = 0.016;
/// Cap on the delta-time forwarded to the core [s]
const MAX_FRAME_DT: f64 = 0.1;
/// Rolling snapshot window retained for charting
const HISTORY_LIMIT: usize = 200;
/// Scenario length [s]
const SCENARIO_END: f64 = 60.0;

/// Log operational warnings from a snapshot, mirroring a dashboard's
/// alert panel. Thresholds are in this model's display units.
fn check_alerts(snapshot: &Snapshot) {
    if snapshot.power > 110.0 {
        log::warn!("power exceeds 110% nominal: {:.1}", snapshot.power);
    }
    if snapshot.fuel_temperature > 1000.0 {
        log::warn!("fuel temperature exceeds limit: {:.0} K", snapshot.fuel_temperature);
    }
    if snapshot.period > 0.0 && snapshot.period < 20.0 {
        log::warn!("short reactor period: {:.1} s", snapshot.period);
    }
}

fn regime_label(snapshot: &Snapshot) -> &'static str {
    match snapshot.criticality() {
        Criticality::Supercritical => "SUPERCRITICAL",
        Criticality::Critical => "CRITICAL",
        Criticality::Subcritical => "SUBCRITICAL",
    }
}

fn main() {
    env_logger::init();

    let mut core = ReactorCore::new();
    let mut history: VecDeque<Snapshot> = VecDeque::with_capacity(HISTORY_LIMIT);

    log::info!("startup: rods withdrawn, free power rise");
    let mut rods_partially_inserted = false;
    let mut scrammed = false;
    let mut next_report = 1.0;

    loop {
        let elapsed = core.snapshot().time;

        // Scripted control inputs
        if elapsed >= 10.0 && !rods_partially_inserted {
            core.set_rod(40.0);
            rods_partially_inserted = true;
            log::info!("rod bank to 40% insertion");
        }
        if elapsed >= 30.0 && !scrammed {
            core.scram();
            scrammed = true;
        }

        let snapshot = core.advance(FRAME_DT.min(MAX_FRAME_DT));

        history.push_back(snapshot);
        if history.len() > HISTORY_LIMIT {
            history.pop_front();
        }

        if snapshot.time >= next_report {
            check_alerts(&snapshot);
            let line = serde_json::to_string(&snapshot).expect("snapshot serialization failed");
            println!("{}", line);
            log::debug!(
                "t = {:5.1} s  power = {:8.2}  rho = {:7.1} pcm  [{}]",
                snapshot.time,
                snapshot.power,
                snapshot.reactivity,
                regime_label(&snapshot)
            );
            next_report += 1.0;
        }

        if snapshot.time >= SCENARIO_END {
            log::info!(
                "scenario complete: t = {:.1} s, power = {:.3}, {} snapshots retained",
                snapshot.time,
                snapshot.power,
                history.len()
            );
            break;
        }
    }
}
