use std::path::{Path, PathBuf};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use strum_macros::{AsRefStr, EnumString};
use tracing::info;

use crate::{normals, triangles, Result};

pub const FILE_COUNT: usize = 10;

/// Which record format a fixture file uses.
#[derive(AsRefStr, EnumString, Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Triangles,
    Normals,
}

impl Layout {
    pub fn fields_per_record(self) -> usize {
        match self {
            Layout::Triangles => 9,
            Layout::Normals => 3,
        }
    }

    pub fn records_per_file(self) -> usize {
        match self {
            Layout::Triangles => triangles::TRIANGLES_PER_FILE,
            Layout::Normals => normals::RECORDS_PER_FILE,
        }
    }
}

/// `test_01.in`, `test_02.in`, ... for 1-based `index`.
pub fn fixture_name(index: usize) -> String {
    format!("test_{index:02}.in")
}

pub fn fixture_paths(dir: &Path, count: usize) -> impl Iterator<Item = PathBuf> + '_ {
    (1..=count).map(move |i| dir.join(fixture_name(i)))
}

/// Seeded when `seed` is given, otherwise seeded from the OS.
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    pub dir: PathBuf,
    pub files: usize,
    pub records: usize,
}

impl GenerateOptions {
    pub fn new(layout: Layout) -> GenerateOptions {
        GenerateOptions {
            dir: PathBuf::from("."),
            files: FILE_COUNT,
            records: layout.records_per_file(),
        }
    }
}

/// Writes `options.files` fixtures one after another, overwriting existing
/// files. Stops at the first failure; files already written are left in place.
pub fn generate<R: Rng + ?Sized>(
    layout: Layout,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    let sampler = match layout {
        Layout::Triangles => None,
        Layout::Normals => Some(normals::TripleSampler::new()?),
    };

    let mut written = Vec::with_capacity(options.files);
    for path in fixture_paths(&options.dir, options.files) {
        match &sampler {
            None => triangles::write_fixture(&path, options.records, rng)?,
            Some(sampler) => normals::write_fixture(&path, options.records, sampler, rng)?,
        }
        written.push(path);
    }

    info!(
        layout = layout.as_ref(),
        dir = %options.dir.display(),
        files = written.len(),
        records = options.records,
        "generated fixtures"
    );
    Ok(written)
}
