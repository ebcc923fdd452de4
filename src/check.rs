//! Reading fixtures back: structural validation of generated files, and the
//! loader a triangle-intersection program would use on them.

use std::{
    fs,
    path::{Path, PathBuf},
    str::Lines,
};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    fixture::Layout,
    normals::FIELD_WIDTH,
    triangles::{COORD_MAX, COORD_MIN},
    Error, Result,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FixtureReport {
    pub path: PathBuf,
    pub layout: Layout,
    /// Count from the header line.
    pub declared: usize,
    pub records: usize,
    /// Including the header.
    pub lines: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Normals tokens whose truncation left something that is not a number.
    pub malformed: usize,
}

impl FixtureReport {
    fn new(path: &Path, layout: Layout, declared: usize) -> FixtureReport {
        FixtureReport {
            path: path.to_path_buf(),
            layout,
            declared,
            records: 0,
            lines: 1,
            min: None,
            max: None,
            malformed: 0,
        }
    }

    fn observe(&mut self, value: f64) {
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }
}

fn malformed(path: &Path, line: usize, message: impl Into<String>) -> Error {
    Error::Malformed {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

fn parse_count(path: &Path, header: &str) -> Result<usize> {
    header.trim().parse().map_err(|_| Error::Header {
        path: path.to_path_buf(),
        header: header.to_string(),
    })
}

fn split_header<'a>(path: &Path, text: &'a str) -> Result<(usize, Lines<'a>)> {
    let mut lines = text.lines();
    let declared = parse_count(path, lines.next().unwrap_or_default())?;
    Ok((declared, lines))
}

pub fn check_text(path: &Path, text: &str, layout: Layout) -> Result<FixtureReport> {
    let (declared, body) = split_header(path, text)?;
    let mut report = FixtureReport::new(path, layout, declared);

    match layout {
        Layout::Triangles => check_triangle_body(&mut report, body)?,
        Layout::Normals => check_normals_body(&mut report, body)?,
    }

    if report.records != declared {
        return Err(Error::CountMismatch {
            path: path.to_path_buf(),
            declared,
            found: report.records,
        });
    }

    // Line-independent load, as the intersection program reads its input.
    if layout == Layout::Triangles {
        read_triangles(path, text)?;
    }

    debug!(
        path = %path.display(),
        layout = layout.as_ref(),
        records = report.records,
        malformed = report.malformed,
        "fixture ok"
    );
    Ok(report)
}

fn check_triangle_body(report: &mut FixtureReport, body: Lines<'_>) -> Result<()> {
    let fields = Layout::Triangles.fields_per_record();

    for (i, line) in body.enumerate() {
        let line_no = i + 2;
        report.lines += 1;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != fields {
            return Err(malformed(
                &report.path,
                line_no,
                format!("expected {fields} coordinates, found {}", tokens.len()),
            ));
        }

        for token in tokens {
            let value: i64 = token.parse().map_err(|_| {
                malformed(&report.path, line_no, format!("{token:?} is not an integer"))
            })?;
            if value < i64::from(COORD_MIN) || value > i64::from(COORD_MAX) {
                return Err(Error::OutOfRange {
                    path: report.path.clone(),
                    line: line_no,
                    value,
                    min: COORD_MIN,
                    max: COORD_MAX,
                });
            }
            report.observe(value as f64);
        }
        report.records += 1;
    }
    Ok(())
}

fn check_normals_body(report: &mut FixtureReport, body: Lines<'_>) -> Result<()> {
    let fields = Layout::Normals.fields_per_record();
    let mut tokens = 0;

    for (i, line) in body.enumerate() {
        let line_no = i + 2;
        report.lines += 1;

        for token in line.split_whitespace() {
            tokens += 1;
            if token.len() > FIELD_WIDTH {
                return Err(malformed(
                    &report.path,
                    line_no,
                    format!("{token:?} is wider than {FIELD_WIDTH} characters"),
                ));
            }
            match fast_float::parse::<f64, _>(token) {
                Ok(value) => report.observe(value),
                Err(_) => {
                    warn!(path = %report.path.display(), line = line_no, token, "truncated field is not a number");
                    report.malformed += 1;
                }
            }
        }
    }

    if tokens % fields != 0 {
        return Err(malformed(
            &report.path,
            report.lines,
            format!("{tokens} fields do not form whole records of {fields}"),
        ));
    }
    report.records = tokens / fields;
    Ok(())
}

pub fn check_file(path: &Path, layout: Layout) -> Result<FixtureReport> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    check_text(path, &text, layout)
}

/// Checks every file on the rayon pool. Results come back in input order.
pub fn check_files(paths: &[PathBuf], layout: Layout) -> Vec<Result<FixtureReport>> {
    paths
        .par_iter()
        .map(|path| check_file(path, layout))
        .collect()
}

/// Loads triangle input the way the consuming program reads it: a count,
/// then that many groups of nine numbers, with line breaks carrying no
/// meaning. Anything after the last triangle is ignored.
pub fn read_triangles(path: &Path, text: &str) -> Result<Vec<[f64; 9]>> {
    let mut tokens = text
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |token| (i + 1, token)));

    let declared = match tokens.next() {
        Some((_, header)) => parse_count(path, header)?,
        None => parse_count(path, "")?,
    };

    let mut triangles = Vec::new();
    for found in 0..declared {
        let mut coords = [0.0; 9];
        for coord in &mut coords {
            let (line, token) = tokens.next().ok_or_else(|| Error::CountMismatch {
                path: path.to_path_buf(),
                declared,
                found,
            })?;
            *coord = fast_float::parse(token)
                .map_err(|_| malformed(path, line, format!("{token:?} is not a number")))?;
        }
        triangles.push(coords);
    }
    Ok(triangles)
}
