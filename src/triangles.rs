//! Integer triangle fixtures: a count line, then one triangle per line as
//! nine space-separated coordinates.

use std::{fmt::Display, fs, path::Path};

use rand::Rng;
use tracing::debug;

use crate::{Error, Result};

pub const COORD_MIN: i32 = -100;
pub const COORD_MAX: i32 = 100;
pub const TRIANGLES_PER_FILE: usize = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Point {
        Point {
            x: rng.gen_range(COORD_MIN..=COORD_MAX),
            y: rng.gen_range(COORD_MIN..=COORD_MAX),
            z: rng.gen_range(COORD_MIN..=COORD_MAX),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Triangle {
        let a = Point::random(rng);
        let b = Point::random(rng);
        let c = Point::random(rng);
        Triangle { a, b, c }
    }

    pub fn coords(&self) -> [i32; 9] {
        let Triangle { a, b, c } = self;
        [a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z]
    }
}

impl Display for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, coord) in self.coords().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{coord}")?;
        }
        Ok(())
    }
}

/// Full text of a fixture holding `count` random triangles.
pub fn render<R: Rng + ?Sized>(count: usize, rng: &mut R) -> String {
    let mut text = format!("{count}\n");
    for _ in 0..count {
        text.push_str(&Triangle::random(rng).to_string());
        text.push('\n');
    }
    text
}

pub fn write_fixture<R: Rng + ?Sized>(path: &Path, count: usize, rng: &mut R) -> Result<()> {
    let text = render(count, rng);
    fs::write(path, &text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), triangles = count, bytes = text.len(), "wrote triangle fixture");
    Ok(())
}
