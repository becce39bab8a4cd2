use std::io::{self, Write};

use crate::dynamics::Snapshot;

/// Write snapshot telemetry in CSV format.
///
/// Columns: time, stage, phase,
///          cur_gx, cur_gy, cur_gz, cur_rho, cur_theta, cur_phi,
///          tgt_gx, tgt_gy, tgt_gz, tgt_rho, tgt_theta, tgt_phi,
///          omega_roll, omega_pitch, omega_yaw,
///          sat_roll, sat_pitch, sat_yaw, zoom, octant,
///          r11..r33 (global → local, row-major)
pub fn write_telemetry<W: Write>(writer: &mut W, snapshots: &[Snapshot]) -> io::Result<()> {
    writeln!(
        writer,
        "time,stage,phase,\
         cur_gx,cur_gy,cur_gz,cur_rho,cur_theta,cur_phi,\
         tgt_gx,tgt_gy,tgt_gz,tgt_rho,tgt_theta,tgt_phi,\
         omega_roll,omega_pitch,omega_yaw,\
         sat_roll,sat_pitch,sat_yaw,zoom,octant,\
         r11,r12,r13,r21,r22,r23,r31,r32,r33"
    )?;

    for s in snapshots {
        let c = s.current.global();
        let cs = s.current.spherical();
        let t = s.target.global();
        let ts = s.target.spherical();
        let r = &s.rotation;
        writeln!(
            writer,
            "{:.4},{},{},\
             {:.6},{:.6},{:.6},{:.6},{:.6},{:.6},\
             {:.6},{:.6},{:.6},{:.6},{:.6},{:.6},\
             {:.6},{:.6},{:.6},\
             {:.3},{:.3},{:.3},{:.6},{},\
             {:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            s.time,
            s.stage.label(),
            s.phase.map_or_else(String::new, |p| p.to_string()),
            c.x, c.y, c.z, cs.rho, cs.theta, cs.phi,
            t.x, t.y, t.z, ts.rho, ts.theta, ts.phi,
            s.omega.roll, s.omega.pitch, s.omega.yaw,
            s.saturation.roll, s.saturation.pitch, s.saturation.yaw,
            s.zoom,
            s.octant.map_or("", |o| o.body()),
            r[(0, 0)], r[(0, 1)], r[(0, 2)],
            r[(1, 0)], r[(1, 1)], r[(1, 2)],
            r[(2, 0)], r[(2, 1)], r[(2, 2)],
        )?;
    }

    Ok(())
}

/// Write telemetry to a CSV file at the given path.
pub fn write_telemetry_file(path: &str, snapshots: &[Snapshot]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_telemetry(&mut file, snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{AttitudeSimulator, ManualClock, Recorder};
    use crate::dynamics::SimConfig;
    use crate::vehicle::presets;
    use nalgebra::Vector3;

    #[test]
    fn csv_output_has_header_and_rows() {
        let mut sim = AttitudeSimulator::with_clock(
            presets::ideal_cube(),
            SimConfig { refresh_rate: 10.0, ..SimConfig::default() },
            ManualClock::new(),
        );
        let mut rec = Recorder::new();
        sim.announce("hello", &mut rec);
        sim.reorient(Vector3::new(1.0, 1.0, 1.0), &mut rec).unwrap();

        let mut buf = Vec::new();
        write_telemetry(&mut buf, &rec.snapshots).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time,stage,phase,"));
        assert_eq!(lines.len(), rec.len() + 1);
        assert!(lines[1].starts_with("0.0000,Idle,,"));
        assert!(lines.iter().any(|l| l.contains(",RollManeuver,Accelerating,") || l.contains(",RollManeuver,Decelerating,")));
        assert!(lines.last().unwrap().contains(",ZoomAdjust,,"));

        let columns = lines[0].split(',').count();
        assert!(lines.iter().all(|l| l.split(',').count() == columns));
    }
}
