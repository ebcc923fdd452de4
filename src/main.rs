use clap::{Args, Parser, Subcommand};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::error;
use trigen::{
    check,
    fixture::{self, FILE_COUNT},
    logging, GenerateOptions, Layout,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write fixtures of integer triangles
    Triangles(GenerateArgs),

    /// Write fixtures of truncated normal samples
    Normals(GenerateArgs),

    /// Validate existing fixtures
    Check {
        /// Record layout of the files
        #[arg(long, short, default_value = "triangles")]
        layout: Layout,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,

        /// Files to check, test_01.in..test_10.in when empty
        files: Vec<PathBuf>,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Output directory
    #[arg(long, short, default_value = ".")]
    dir: PathBuf,

    /// Number of files
    #[arg(long, default_value_t = FILE_COUNT)]
    files: usize,

    /// Records per file, layout default when unset
    #[arg(long)]
    records: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn run_generate(layout: Layout, args: GenerateArgs) -> trigen::Result<()> {
    let options = GenerateOptions {
        dir: args.dir,
        files: args.files,
        records: args.records.unwrap_or(layout.records_per_file()),
    };

    for path in trigen::generate(layout, &options, &mut fixture::rng(args.seed))? {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_check(layout: Layout, json: bool, mut files: Vec<PathBuf>) -> bool {
    if files.is_empty() {
        files = fixture::fixture_paths(Path::new("."), FILE_COUNT).collect();
    }

    let mut reports = Vec::new();
    let mut ok = true;
    for result in check::check_files(&files, layout) {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                error!("{err}");
                ok = false;
            }
        }
    }

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                error!("failed to encode reports: {err}");
                ok = false;
            }
        }
    } else {
        for report in &reports {
            println!(
                "{}: {} records, {} lines, {} malformed",
                report.path.display(),
                report.records,
                report.lines,
                report.malformed
            );
        }
    }

    ok
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let ok = match cli.command {
        Command::Triangles(args) => run_generate(Layout::Triangles, args)
            .map_err(|err| error!("{err}"))
            .is_ok(),
        Command::Normals(args) => run_generate(Layout::Normals, args)
            .map_err(|err| error!("{err}"))
            .is_ok(),
        Command::Check {
            layout,
            json,
            files,
        } => run_check(layout, json, files),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
