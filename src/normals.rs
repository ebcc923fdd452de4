//! Scalar fixtures drawn from three normal distributions.
//!
//! Every value is written as its shortest round-trip string cut to
//! [`FIELD_WIDTH`] characters. The cut is not a rounding: it can drop digits,
//! leave a trailing `.`, or split an exponent.

use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};
use tracing::debug;

use crate::{Error, Result};

pub const RECORDS_PER_FILE: usize = 100;
pub const WRAP_EVERY: usize = 50;
pub const FIELD_WIDTH: usize = 6;

/// (mean, standard deviation) of each of the three fields.
pub const FIELD_PARAMS: [(f64, f64); 3] = [(0.0, 7.0), (3.0, 40.0), (9.0, 100.0)];

pub fn truncate_field(value: f64) -> String {
    let mut field = format!("{value:?}");
    field.truncate(FIELD_WIDTH);
    field
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Triple {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Triple {
    pub fn fields(&self) -> [String; 3] {
        [self.a, self.b, self.c].map(truncate_field)
    }
}

// `Normal::new` only rejects a non-finite deviation; a negative one would
// silently mirror the distribution.
fn normal((mean, std_dev): (f64, f64)) -> Result<Normal<f64>> {
    if !(std_dev > 0.0 && std_dev.is_finite()) {
        return Err(NormalError::BadVariance.into());
    }
    Ok(Normal::new(mean, std_dev)?)
}

#[derive(Clone, Debug)]
pub struct TripleSampler {
    fields: [Normal<f64>; 3],
}

impl TripleSampler {
    pub fn new() -> Result<TripleSampler> {
        TripleSampler::with_params(FIELD_PARAMS)
    }

    pub fn with_params(params: [(f64, f64); 3]) -> Result<TripleSampler> {
        let [a, b, c] = params;
        Ok(TripleSampler {
            fields: [normal(a)?, normal(b)?, normal(c)?],
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Triple {
        let [a, b, c] = &self.fields;
        Triple {
            a: a.sample(rng),
            b: b.sample(rng),
            c: c.sample(rng),
        }
    }
}

/// Writes the count line and `count` records. The pending line is pushed to
/// `out` after every [`WRAP_EVERY`] records and once more at the end if any
/// records are left over.
pub fn write_records<W: Write, R: Rng + ?Sized>(
    out: &mut W,
    count: usize,
    sampler: &TripleSampler,
    rng: &mut R,
) -> io::Result<()> {
    writeln!(out, "{count}")?;

    let mut line = String::new();
    for i in 1..=count {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&sampler.sample(rng).fields().join(" "));

        if i % WRAP_EVERY == 0 {
            line.push('\n');
            out.write_all(line.as_bytes())?;
            line.clear();
        }
    }

    if !line.is_empty() {
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }

    out.flush()
}

pub fn write_fixture<R: Rng + ?Sized>(
    path: &Path,
    count: usize,
    sampler: &TripleSampler,
    rng: &mut R,
) -> Result<()> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_error)?;
    write_records(&mut file, count, sampler, rng).map_err(write_error)?;
    debug!(path = %path.display(), records = count, "wrote normals fixture");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn render(count: usize, seed: u64) -> String {
        let sampler = TripleSampler::new().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut out = Vec::new();
        write_records(&mut out, count, &sampler, &mut rng).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn truncation_cuts_instead_of_rounding() {
        assert_eq!(truncate_field(-123.456789), "-123.4");
        assert_eq!(truncate_field(0.999999999), "0.9999");
        assert_eq!(truncate_field(0.1 + 0.2), "0.3000");
        assert_eq!(truncate_field(3.0), "3.0");
        assert_eq!(truncate_field(-12345.0), "-12345");
        assert_eq!(truncate_field(-123456.0), "-12345");
        assert_eq!(truncate_field(1e-7), "1e-7");
        assert_eq!(truncate_field(-1.25e-7), "-1.25e");
    }

    #[test]
    fn default_file_wraps_every_fifty_records() {
        let text = render(RECORDS_PER_FILE, 3);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "100");
        for line in &lines[1..] {
            assert_eq!(line.split(' ').count(), WRAP_EVERY * 3);
        }

        let tokens: Vec<&str> = lines[1..].iter().flat_map(|l| l.split_whitespace()).collect();
        assert_eq!(tokens.len(), 300);
        assert!(tokens.iter().all(|t| !t.is_empty() && t.len() <= FIELD_WIDTH));
    }

    #[test]
    fn partial_last_line_is_terminated() {
        let text = render(60, 11);
        assert!(text.ends_with('\n'));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].split(' ').count(), 150);
        assert_eq!(lines[2].split(' ').count(), 30);
    }

    #[test]
    fn zero_records_is_just_the_count() {
        assert_eq!(render(0, 0), "0\n");
    }

    #[test]
    fn samples_follow_field_means() {
        let sampler = TripleSampler::new().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;

        let mut sums = [0.0; 3];
        for _ in 0..n {
            let t = sampler.sample(&mut rng);
            sums[0] += t.a;
            sums[1] += t.b;
            sums[2] += t.c;
        }

        for (sum, (mean, std_dev)) in sums.iter().zip(FIELD_PARAMS) {
            let observed = sum / n as f64;
            // Five standard errors.
            assert!((observed - mean).abs() < 5.0 * std_dev / (n as f64).sqrt());
        }
    }

    #[test]
    fn bad_std_dev_is_rejected() {
        for std_dev in [-1.0, 0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = TripleSampler::with_params([(0.0, 1.0), (0.0, std_dev), (0.0, 1.0)]);
            assert!(
                matches!(result, Err(Error::Distribution(NormalError::BadVariance))),
                "{std_dev}"
            );
        }
    }

    #[test]
    fn default_params_are_accepted() {
        assert!(TripleSampler::with_params(FIELD_PARAMS).is_ok());
    }
}
