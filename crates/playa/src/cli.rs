//! Command-line arguments

use clap::Parser;
use playa_core::AddressUnit;
use playa_io::{ConfigFile, DEFAULT_DUMP_FILE};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "playa")]
#[command(version)]
#[command(about = "Lay out light bases on curved rings and pack them into Art-Net universes", long_about = None)]
pub struct Args {
    /// Config file (.toml, .ron or .json); defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the polar coordinate dump
    #[arg(short = 'o', long)]
    pub debug_dump: bool,

    /// Path of the polar coordinate dump
    #[arg(long, default_value = DEFAULT_DUMP_FILE)]
    pub dump_path: PathBuf,

    /// Write the layout document to a file (.json or .ron) instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write the effective config to this path and exit
    #[arg(long)]
    pub write_default_config: Option<PathBuf>,

    /// Number of bases required
    #[arg(long)]
    pub bases: Option<usize>,

    /// Addressable points per base
    #[arg(long)]
    pub points_per_base: Option<usize>,

    /// Distance between bases and between rings
    #[arg(long)]
    pub spacing: Option<f64>,

    /// Diameter of the empty center
    #[arg(long)]
    pub center_diameter: Option<f64>,

    /// Art-Net target host
    #[arg(long)]
    pub host: Option<String>,

    /// Aisles per ring
    #[arg(long)]
    pub aisles: Option<usize>,

    /// Linear aisle width
    #[arg(long)]
    pub aisle_width: Option<f64>,

    /// Per-ring aisle curve in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub aisle_curve: Option<f64>,

    /// Unit of output start/num fields: fixture or point
    #[arg(long)]
    pub address_unit: Option<AddressUnit>,

    /// Label of the generated fixture group
    #[arg(long)]
    pub label: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also write logs to the log directory
    #[arg(long)]
    pub log_file: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply_overrides(&self, file: &mut ConfigFile) {
        let venue = &mut file.venue;
        if let Some(bases) = self.bases {
            venue.bases_required = bases;
        }
        if let Some(points) = self.points_per_base {
            venue.points_per_base = points;
        }
        if let Some(spacing) = self.spacing {
            venue.base_spacing = spacing;
        }
        if let Some(diameter) = self.center_diameter {
            venue.center_diameter = diameter;
        }
        if let Some(host) = &self.host {
            venue.host = host.clone();
        }
        if let Some(aisles) = self.aisles {
            venue.aisles = aisles;
        }
        if let Some(width) = self.aisle_width {
            venue.aisle_width = width;
        }
        if let Some(curve) = self.aisle_curve {
            venue.aisle_curve_degrees = curve;
        }
        if let Some(unit) = self.address_unit {
            venue.address_unit = unit;
        }
        if let Some(label) = &self.label {
            venue.label = label.clone();
        }

        let logging = &mut file.logging;
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if self.log_file {
            logging.file_output = true;
        }
    }
}
