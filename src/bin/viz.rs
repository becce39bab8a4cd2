use eframe::egui;
use egui_plot::{Legend, Line, Plot};
use nalgebra::Vector3;

use cubesat_sim::dynamics::{SimConfig, Snapshot};
use cubesat_sim::sim::{AttitudeSimulator, ManualClock, Recorder, ReorientReport};
use cubesat_sim::vehicle::{presets, CubeSat};

fn main() -> eframe::Result {
    let targets = [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(-1.0, 2.0, 0.5),
        Vector3::new(0.3, -0.4, -2.0),
        Vector3::new(2.0, 2.0, 2.0),
    ];

    let mut sim = AttitudeSimulator::with_clock(presets::ideal_cube(), SimConfig::default(), ManualClock::new());
    let mut recorder = Recorder::new();
    let mut reports = Vec::new();
    for t in targets {
        match sim.reorient(t, &mut recorder) {
            Ok(r) => reports.push(r),
            Err(e) => eprintln!("skipping target {t:?}: {e}"),
        }
    }

    let app = SimViz {
        snapshots: recorder.snapshots,
        reports,
        sat: sim.satellite().clone(),
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Cube Satellite Attitude Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct SimViz {
    snapshots: Vec<Snapshot>,
    reports: Vec<ReorientReport>,
    sat: CubeSat,
}

fn series(samples: &[&Snapshot], f: impl Fn(&Snapshot) -> f64) -> Vec<[f64; 2]> {
    samples.iter().map(|s| [s.time, f(s)]).collect()
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.snapshots.len() / 2000).max(1);
        let sampled: Vec<&Snapshot> = self.snapshots.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Satellite: {}", self.sat.name));
            let peak = self
                .reports
                .iter()
                .flat_map(|r| [r.roll.peak_saturation, r.secondary.peak_saturation])
                .fold(0.0_f64, f64::max);
            ui.label(format!(
                "Inertia: {:.4} kg·m²  |  Reorientations: {}  |  Peak wheel saturation: {:.1} %  |  Elapsed: {:.1} s",
                self.sat.inertia(),
                self.reports.len(),
                peak,
                self.snapshots.last().map_or(0.0, |s| s.time),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Wheel saturation vs Time
                ui.vertical(|ui| {
                    ui.label("Wheel Saturation (%)");
                    Plot::new("saturation")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Roll", series(&sampled, |s| s.saturation.roll)));
                            plot_ui.line(Line::new("Pitch", series(&sampled, |s| s.saturation.pitch)));
                            plot_ui.line(Line::new("Yaw", series(&sampled, |s| s.saturation.yaw)));
                        });
                });

                // Body rates vs Time
                ui.vertical(|ui| {
                    ui.label("Body Rates (deg/s)");
                    Plot::new("rates")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Roll", series(&sampled, |s| s.omega.roll.to_degrees())));
                            plot_ui.line(Line::new("Pitch", series(&sampled, |s| s.omega.pitch.to_degrees())));
                            plot_ui.line(Line::new("Yaw", series(&sampled, |s| s.omega.yaw.to_degrees())));
                        });
                });
            });

            ui.horizontal(|ui| {
                // Boresight angles vs Time
                ui.vertical(|ui| {
                    ui.label("Current Point, Local Frame (deg)");
                    Plot::new("angles")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Polar θ", series(&sampled, |s| s.current.spherical().theta.to_degrees())));
                            plot_ui.line(Line::new("Azimuth φ", series(&sampled, |s| s.current.spherical().phi.to_degrees())));
                        });
                });

                // Zoom vs Time
                ui.vertical(|ui| {
                    ui.label("Optical Zoom (distance)");
                    Plot::new("zoom")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Zoom", series(&sampled, |s| s.zoom)));
                        });
                });
            });
        });
    }
}
