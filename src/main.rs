use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use yolo2yolov8::{convert_with_options, Args};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Starting the conversion process...");

    let options = args.to_convert_options();
    match convert_with_options(&args.source_dir, args.dest_dir.as_deref(), &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to convert dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
