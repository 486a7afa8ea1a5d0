use std::io::Result;

use clap::Parser;
use gaf::{BasisFamily, ScanSettings};

pub fn error(message: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Ron,
    Text,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Zeros of a random analytic function", long_about = None)]
pub struct Settings {
    /// Scan settings in RON format. Flags given on the command line take precedence.
    #[arg(short, long)]
    pub config: Option<String>,
    /// Basis family: normalized (z^n / sqrt(n!)) or plain (z^n)
    #[arg(short, long)]
    pub basis: Option<BasisFamily>,
    /// Truncation order N
    #[arg(short = 'n', long)]
    pub order: Option<usize>,
    #[arg(long, allow_negative_numbers = true)]
    pub x_min: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub x_max: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub y_min: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub y_max: Option<f64>,
    /// Seeds per unit length along each axis
    #[arg(short, long)]
    pub density: Option<f64>,
    #[arg(long)]
    pub tolerance: Option<f64>,
    #[arg(long)]
    pub max_iterations: Option<usize>,
    /// Minimum distance between two reported zeros
    #[arg(short, long)]
    pub epsilon: Option<f64>,
    /// Seed for the coefficient draw
    #[arg(short, long)]
    pub seed: Option<u64>,
    #[arg(short, long)]
    pub jobs: Option<usize>,
    /// Write the zeros here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Settings {
    pub fn scan_settings(&self) -> Result<ScanSettings> {
        let mut scan = if let Some(path) = &self.config {
            let text = std::fs::read_to_string(path)?;
            ron::from_str::<ScanSettings>(&text)
                .map_err(|e| error(format!("Could not parse {path}: {e}").as_str()))?
        } else {
            ScanSettings::default()
        };

        if let Some(basis) = self.basis {
            scan.basis = basis;
        }
        if let Some(order) = self.order {
            scan.order = order;
        }
        if let Some(x_min) = self.x_min {
            scan.region.x_min = x_min;
        }
        if let Some(x_max) = self.x_max {
            scan.region.x_max = x_max;
        }
        if let Some(y_min) = self.y_min {
            scan.region.y_min = y_min;
        }
        if let Some(y_max) = self.y_max {
            scan.region.y_max = y_max;
        }
        if let Some(density) = self.density {
            scan.density = density;
        }
        if let Some(tolerance) = self.tolerance {
            scan.solver.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            scan.solver.max_iterations = max_iterations;
        }
        if let Some(epsilon) = self.epsilon {
            scan.dedup_epsilon = epsilon;
        }
        if self.seed.is_some() {
            scan.seed = self.seed;
        }

        scan.validate().map_err(|e| error(&e.to_string()))?;
        Ok(scan)
    }
}
