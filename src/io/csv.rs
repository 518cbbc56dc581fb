use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::dynamics::Body;
use crate::error::{io_err, Result};
use crate::sim::PathSample;

/// Write final body states as CSV.
///
/// Columns: name, mass, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z (SI units)
pub fn write_bodies<W: Write>(writer: &mut W, bodies: &[Body]) -> Result<()> {
    writeln!(writer, "name,mass,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z")?;
    for b in bodies {
        writeln!(
            writer,
            "{},{:e},{:.1},{:.1},{:.1},{:.4},{:.4},{:.4}",
            b.name, b.mass,
            b.pos.x, b.pos.y, b.pos.z,
            b.vel.x, b.vel.y, b.vel.z,
        )?;
    }
    Ok(())
}

/// Write sampled paths as CSV, one row per (body, sample).
///
/// Columns: name, time, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z
pub fn write_paths<W: Write>(writer: &mut W, paths: &[(String, Vec<PathSample>)]) -> Result<()> {
    writeln!(writer, "name,time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z")?;
    for (name, samples) in paths {
        for s in samples {
            writeln!(
                writer,
                "{},{:.1},{:.1},{:.1},{:.1},{:.4},{:.4},{:.4}",
                name, s.time,
                s.pos.x, s.pos.y, s.pos.z,
                s.vel.x, s.vel.y, s.vel.z,
            )?;
        }
    }
    Ok(())
}

/// Write paths to a CSV file at `path`.
pub fn write_paths_file(path: impl AsRef<Path>, paths: &[(String, Vec<PathSample>)]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_err(path, e))?;
    let mut writer = BufWriter::new(file);
    write_paths(&mut writer, paths)?;
    writer.flush().map_err(|e| io_err(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::Vec3;

    #[test]
    fn bodies_have_header_and_rows() {
        let bodies = vec![
            Body::sun(),
            Body::new("earth", Vec3::new(1.5e11, 0.0, 0.0), Vec3::new(0.0, 29780.0, 0.0), 5.9724e24),
        ];
        let mut buf = Vec::new();
        write_bodies(&mut buf, &bodies).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("name,"));
        assert_eq!(lines.len(), 3); // header + 2 rows
        assert!(lines[2].starts_with("earth,5.9724e24,150000000000.0,"));
    }

    #[test]
    fn paths_flatten_per_sample() {
        let sample = |t: f64| PathSample { time: t, pos: Vec3::new(t, 0.0, 0.0), vel: Vec3::zeros() };
        let paths = vec![
            ("mars".to_string(), vec![sample(0.0), sample(60.0)]),
            ("venus".to_string(), vec![sample(0.0)]),
        ];
        let mut buf = Vec::new();
        write_paths(&mut buf, &paths).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("mars,60.0,60.0,"));
        assert!(lines[3].starts_with("venus,0.0,"));
    }
}
