use std::process::ExitCode;

use tracing::error;
use trigen::{fixture, logging, GenerateOptions, Layout};

fn main() -> ExitCode {
    logging::init("info");

    let layout = Layout::Normals;
    match trigen::generate(layout, &GenerateOptions::new(layout), &mut fixture::rng(None)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
