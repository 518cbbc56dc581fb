//! Top-down PNG rendering of the system, Sun at the centre, +y up.

use std::path::Path;

use image::{Rgb, RgbImage};
use tracing::info;

use crate::dynamics::{Body, Vec3};
use crate::error::{Error, Result};
use crate::physics::constants::AU;
use crate::sim::PathSample;

pub const SUN: Rgb<u8> = Rgb([255, 255, 0]);
pub const PATH: Rgb<u8> = Rgb([0, 255, 0]);
pub const FINAL: Rgb<u8> = Rgb([255, 0, 0]);
pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Map `x` from [0, curr_max] onto [0, new_max].
pub fn scale_value(x: f64, curr_max: f64, new_max: f64) -> Result<f64> {
    if curr_max == 0.0 {
        return Err(Error::InvalidArgument("curr_max cannot be zero".into()));
    }
    Ok(new_max * (x / curr_max))
}

/// How non-Sun bodies are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Path,
    Final,
}

pub struct Canvas {
    img: RgbImage,
    system_size: f64, // AU from centre to edge
}

impl Canvas {
    /// Square canvas `side` pixels wide covering ±`system_size` AU.
    pub fn new(side: u32, system_size: f64) -> Result<Self> {
        if side == 0 {
            return Err(Error::InvalidArgument("image side must be non-zero".into()));
        }
        if !(system_size.is_finite() && system_size > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "system size must be positive, got {}",
                system_size
            )));
        }
        Ok(Self {
            img: RgbImage::from_pixel(side, side, BACKGROUND),
            system_size,
        })
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.img.get_pixel_checked(x, y).copied()
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    /// Set a pixel; points off the canvas are dropped.
    pub fn set(&mut self, x: i64, y: i64, color: Rgb<u8>) -> bool {
        if x < 0 || y < 0 || x >= self.img.width() as i64 || y >= self.img.height() as i64 {
            return false;
        }
        self.img.put_pixel(x as u32, y as u32, color);
        true
    }

    /// Pixel for a heliocentric position (m). Image y grows downward.
    pub fn to_pixel(&self, pos: &Vec3) -> Result<(i64, i64)> {
        let half = (self.img.width() / 2) as f64;
        let x = scale_value(pos.x / AU, self.system_size, half)? + half;
        let y = scale_value(-pos.y / AU, self.system_size, half)? + half;
        Ok((x.floor() as i64, y.floor() as i64))
    }

    pub fn plot(&mut self, pos: &Vec3, color: Rgb<u8>) -> Result<bool> {
        let (x, y) = self.to_pixel(pos)?;
        Ok(self.set(x, y, color))
    }

    /// Sun in yellow, everything else green (`Path`) or red (`Final`).
    pub fn draw_bodies(&mut self, bodies: &[Body], mark: Mark) -> Result<()> {
        for b in bodies {
            let color = if b.is_sun() {
                SUN
            } else {
                match mark {
                    Mark::Path => PATH,
                    Mark::Final => FINAL,
                }
            };
            self.plot(&b.pos, color)?;
        }
        Ok(())
    }

    /// Every sample of every path in green. The Sun's path is skipped.
    pub fn draw_paths(&mut self, paths: &[(String, Vec<PathSample>)]) -> Result<()> {
        for (name, samples) in paths {
            if name.eq_ignore_ascii_case("sun") {
                continue;
            }
            for s in samples {
                self.plot(&s.pos, PATH)?;
            }
        }
        Ok(())
    }

    /// Nearest-neighbour enlargement by an integer factor.
    pub fn upscale(&mut self, factor: u32) -> Result<()> {
        if factor == 0 {
            return Err(Error::InvalidArgument("scale factor must be non-zero".into()));
        }
        if factor == 1 {
            return Ok(());
        }
        let (Some(w), Some(h)) = (self.img.width().checked_mul(factor), self.img.height().checked_mul(factor))
        else {
            return Err(Error::InvalidArgument(format!(
                "scale factor {} overflows a {}x{} image",
                factor,
                self.img.width(),
                self.img.height()
            )));
        };
        let mut out = RgbImage::new(w, h);
        // Each source pixel becomes a factor x factor block
        for (x, y, pixel) in self.img.enumerate_pixels() {
            for dy in 0..factor {
                for dx in 0..factor {
                    out.put_pixel(x * factor + dx, y * factor + dy, *pixel);
                }
            }
        }
        self.img = out;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.img.save(path)?;
        info!("Saved image {:?} ({}x{})", path, self.img.width(), self.img.height());
        Ok(())
    }
}

/// Paths in green, final positions in red, Sun in yellow on top.
pub fn render_system(
    bodies: &[Body],
    paths: &[(String, Vec<PathSample>)],
    side: u32,
    system_size: f64,
) -> Result<Canvas> {
    let mut canvas = Canvas::new(side, system_size)?;
    canvas.draw_paths(paths)?;
    let (suns, planets): (Vec<Body>, Vec<Body>) = bodies.iter().cloned().partition(Body::is_sun);
    canvas.draw_bodies(&planets, Mark::Final)?;
    canvas.draw_bodies(&suns, Mark::Final)?;
    Ok(canvas)
}
