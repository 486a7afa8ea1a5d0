use std::fs::File;
use std::io::{BufWriter, Result};
use std::sync::Arc;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

mod output;
mod pool;
mod utils;

use crate::utils::{error, Settings};

fn main() -> Result<()> {
    let settings = Settings::parse();

    if settings.verbose > 0 {
        tracing_subscriber::fmt::fmt()
            .with_writer(std::io::stderr)
            .init();
        log::set_max_level(log::LevelFilter::Debug);
    }

    let scan_settings = settings.scan_settings()?;
    let scan = gaf::Scan::new(scan_settings).map_err(|e| error(&e.to_string()))?;

    let num_seeds = scan.seeds().len();
    let num_threads = if let Some(jobs) = settings.jobs {
        jobs
    } else {
        num_cpus::get()
    }
    .min(num_seeds)
    .max(1);

    log::info!(
        "Scanning {num_seeds} seeds with {num_threads} threads (N={}, {} basis)",
        scan.settings().order,
        scan.settings().basis
    );

    let progress_style = ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
    )
    .map_err(|e| error(&e.to_string()))?;

    let pb = if settings.verbose == 0 {
        ProgressBar::new(num_seeds as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(progress_style);
    pb.set_message("Solving");

    let raw = pool::solve_seeds(
        Arc::new(scan.series().clone()),
        scan.seeds(),
        scan.settings().solver,
        num_threads,
        &pb,
    );
    pb.finish_and_clear();

    let zeros = scan.collect(raw);

    if let Some(path) = &settings.output {
        let mut writer = BufWriter::new(File::create(path)?);
        output::write_zeros(&mut writer, &zeros, settings.format)?;
        log::info!("Wrote {} zeros to {path}", zeros.roots.len());
    } else {
        let stdout = std::io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        output::write_zeros(&mut writer, &zeros, settings.format)?;
    }

    Ok(())
}
