use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::Parser;
use log::{debug, error, info};
use nalgebra::Vector3;

use cubesat_sim::dynamics::{SimConfig, Snapshot, Stage};
use cubesat_sim::io::{csv, json, parse_target};
use cubesat_sim::sim::{AttitudeSimulator, Clock, ManualClock, Recorder, ReorientReport, Telemetry};
use cubesat_sim::vehicle::presets;

/// Reaction-wheel cube satellite: reorient onto target points and zoom.
#[derive(Parser, Debug)]
#[command(name = "cubesat-sim", version, about)]
struct Args {
    /// Console refresh rate, Hz
    #[arg(long, default_value_t = 60.0, value_parser = positive)]
    refresh_rate: f64,

    /// Optical zoom rate, distance units per second
    #[arg(long, default_value_t = 1.5, value_parser = positive)]
    zoom_rate: f64,

    /// Target point "x,y,z" (repeatable). Without any, targets are read from stdin.
    #[arg(long = "target", value_parser = target, allow_hyphen_values = true)]
    targets: Vec<Vector3<f64>>,

    /// Write every telemetry snapshot to this CSV file
    #[arg(long)]
    csv: Option<String>,

    /// Write a JSON summary of the most recent reorientation to this file
    #[arg(long)]
    summary: Option<String>,

    /// Run on simulated time instead of waiting in real time
    #[arg(long)]
    instant: bool,

    /// Debug-level logging (RUST_LOG still takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn positive(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if v > 0.0 && v.is_finite() {
        Ok(v)
    } else {
        Err(format!("{v} must be a positive, finite number"))
    }
}

fn target(s: &str) -> Result<Vector3<f64>, String> {
    parse_target(s).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Console output
// ---------------------------------------------------------------------------

/// Prints one status line per tick. Live mode rewrites the line in place;
/// otherwise only message changes are printed.
struct Console {
    live: bool,
    last_message: String,
}

impl Console {
    fn line(s: &Snapshot) -> String {
        let sph = s.current.spherical();
        let octant = s.octant.map_or_else(|| "N/A (on octant boundary)".to_string(), |o| o.to_string());
        format!(
            "[{:>7.2}s] {:<44} theta={:>7.2}deg phi={:>7.2}deg zoom={:>6.2} \
             omega(r/p/y)={:>+6.2}/{:>+6.2}/{:>+6.2}deg/s sat={:>+7.2}/{:>+7.2}/{:>+7.2}% focus={}",
            s.time,
            s.message,
            sph.theta.to_degrees(),
            sph.phi.to_degrees(),
            s.zoom,
            s.omega.roll.to_degrees(),
            s.omega.pitch.to_degrees(),
            s.omega.yaw.to_degrees(),
            s.saturation.roll,
            s.saturation.pitch,
            s.saturation.yaw,
            octant,
        )
    }
}

impl Telemetry for Console {
    fn emit(&mut self, snapshot: &Snapshot) {
        let changed = snapshot.message != self.last_message;
        let mut out = io::stdout().lock();
        let result = if self.live {
            let newline = changed && !self.last_message.is_empty();
            let prefix = if newline { "\n\r" } else { "\r" };
            write!(out, "{prefix}{}", Console::line(snapshot)).and_then(|_| out.flush())
        } else if changed || snapshot.stage == Stage::Idle {
            writeln!(out, "{}", Console::line(snapshot))
        } else {
            Ok(())
        };
        // Console write failures only lose display output
        if let Err(e) = result {
            debug!("console write failed: {e}");
        }
        if changed {
            self.last_message.clone_from(&snapshot.message);
        }
    }
}

/// Console plus an optional in-memory recording for CSV export.
struct Sinks {
    console: Console,
    recorder: Option<Recorder>,
}

impl Telemetry for Sinks {
    fn emit(&mut self, snapshot: &Snapshot) {
        self.console.emit(snapshot);
        if let Some(rec) = self.recorder.as_mut() {
            rec.emit(snapshot);
        }
    }
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

fn read_target(stdin: &mut impl BufRead) -> io::Result<Option<Vector3<f64>>> {
    loop {
        print!("\nEnter the new target coordinates (x y z): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        match parse_target(trimmed) {
            Ok(v) => return Ok(Some(v)),
            Err(e) => eprintln!("Invalid input: {e}. Please enter 3 signed numbers separated by spaces (x y z)."),
        }
    }
}

fn run<C: Clock>(mut sim: AttitudeSimulator<C>, args: &Args) -> Result<(), Box<dyn Error>> {
    let mut sinks = Sinks {
        console: Console { live: !args.instant, last_message: String::new() },
        recorder: args.csv.as_ref().map(|_| Recorder::new()),
    };
    let mut last_report: Option<ReorientReport> = None;

    sim.announce("Welcome to the Ideal Cube Satellite Simulator!", &mut sinks);

    let mut queued = args.targets.clone().into_iter();
    let interactive = args.targets.is_empty();
    let mut stdin = io::stdin().lock();

    loop {
        let next = if interactive {
            read_target(&mut stdin)?
        } else {
            queued.next()
        };
        let Some(target) = next else { break };

        match sim.reorient(target, &mut sinks) {
            Ok(report) => last_report = Some(report),
            Err(e) => error!("Reorientation aborted: {e}"),
        }
        sim.announce("", &mut sinks);
    }
    println!();

    if let (Some(path), Some(rec)) = (&args.csv, &sinks.recorder) {
        csv::write_telemetry_file(path, &rec.snapshots)?;
        info!("Wrote {} snapshots to {path}", rec.len());
    }
    if let (Some(path), Some(report)) = (&args.summary, &last_report) {
        json::write_summary_file(path, sim.satellite(), report)?;
        info!("Wrote summary to {path}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = SimConfig {
        refresh_rate: args.refresh_rate,
        zoom_rate: args.zoom_rate,
        ..SimConfig::default()
    };
    let sat = presets::ideal_cube();

    if args.instant {
        run(AttitudeSimulator::with_clock(sat, config, ManualClock::new()), &args)
    } else {
        run(AttitudeSimulator::new(sat, config), &args)
    }
}
