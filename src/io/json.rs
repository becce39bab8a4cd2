use std::io::{self, Write};

use crate::sim::{ManeuverReport, ReorientReport};
use crate::vehicle::CubeSat;

/// Quote and escape a string as a JSON string literal.
fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn write_maneuver<W: Write>(writer: &mut W, key: &str, m: &ManeuverReport, last: bool) -> io::Result<()> {
    writeln!(writer, "    \"{key}\": {{")?;
    writeln!(writer, "      \"axis\": {},", quoted(m.axis.name()))?;
    writeln!(writer, "      \"sign\": {:.0},", m.sign)?;
    writeln!(writer, "      \"angle_deg\": {:.4},", m.angle.to_degrees())?;
    writeln!(writer, "      \"t_accel_s\": {:.4},", m.profile.t_accel)?;
    writeln!(writer, "      \"t_coast_s\": {:.4},", m.profile.t_coast)?;
    writeln!(writer, "      \"t_decel_s\": {:.4},", m.profile.t_decel)?;
    writeln!(writer, "      \"alpha_rads2\": {:.6},", m.profile.alpha)?;
    writeln!(writer, "      \"peak_saturation_pct\": {:.2},", m.peak_saturation)?;
    writeln!(writer, "      \"ticks\": {}", m.ticks)?;
    writeln!(writer, "    }}{}", if last { "" } else { "," })
}

/// Write a reorientation summary as JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, sat: &CubeSat, report: &ReorientReport) -> io::Result<()> {
    let t = &report.target_global;
    let r = &report.rotation;
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"satellite\": {{")?;
    writeln!(writer, "    \"name\": {},", quoted(&sat.name))?;
    writeln!(writer, "    \"mass_kg\": {:.3},", sat.mass)?;
    writeln!(writer, "    \"inertia_kgm2\": {:.6}", sat.inertia())?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"target\": {{")?;
    writeln!(writer, "    \"global\": [{:.6}, {:.6}, {:.6}],", t.x, t.y, t.z)?;
    writeln!(writer, "    \"local_rho\": {:.6},", report.target_local.rho)?;
    writeln!(writer, "    \"local_theta_deg\": {:.4},", report.target_local.theta.to_degrees())?;
    writeln!(writer, "    \"local_phi_deg\": {:.4}", report.target_local.phi.to_degrees())?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"maneuvers\": {{")?;
    write_maneuver(writer, "roll", &report.roll, false)?;
    write_maneuver(writer, "secondary", &report.secondary, true)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"zoom\": {{")?;
    writeln!(writer, "    \"from\": {:.6},", report.zoom_from)?;
    writeln!(writer, "    \"to\": {:.6},", report.zoom_to)?;
    writeln!(writer, "    \"duration_s\": {:.4}", report.zoom_time)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"elapsed_s\": {:.4},", report.finished - report.started)?;
    writeln!(writer, "  \"events\": {},", report.events.len())?;
    writeln!(
        writer,
        "  \"rotation\": [[{:.6}, {:.6}, {:.6}], [{:.6}, {:.6}, {:.6}], [{:.6}, {:.6}, {:.6}]]",
        r[(0, 0)], r[(0, 1)], r[(0, 2)],
        r[(1, 0)], r[(1, 1)], r[(1, 2)],
        r[(2, 0)], r[(2, 1)], r[(2, 2)],
    )?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write a reorientation summary JSON to a file.
pub fn write_summary_file(path: &str, sat: &CubeSat, report: &ReorientReport) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, sat, report)
}
