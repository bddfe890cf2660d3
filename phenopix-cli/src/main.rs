//!
//! Command-line interface for phenopix image analysis.
#![allow(clippy::cast_possible_truncation, clippy::too_many_lines)]

use clap::{Parser, Subcommand, ValueEnum};

use phenopix_analyze::{analyze_distribution, DistributionOptions};
use phenopix_core::{Bounds, Observations, Region};
use phenopix_io::{read_gray, read_labeled, read_mask, save_results, write_figure};
use phenopix_viz::{pseudocolor, Background, Colormap, PseudocolorOptions};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    PhenopixIo(#[from] phenopix_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] phenopix_core::Error),
}

/// Colormap selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CmapArg {
    /// Viridis (perceptually uniform)
    Viridis,
    /// Inferno (perceptually uniform)
    Inferno,
    /// Plasma (perceptually uniform)
    Plasma,
    /// Jet (classic rainbow)
    Jet,
    /// Hot (thermal)
    Hot,
    /// Grayscale
    Gray,
    /// Green
    Green,
}

impl From<CmapArg> for Colormap {
    fn from(arg: CmapArg) -> Self {
        match arg {
            CmapArg::Viridis => Colormap::Viridis,
            CmapArg::Inferno => Colormap::Inferno,
            CmapArg::Plasma => Colormap::Plasma,
            CmapArg::Jet => Colormap::Jet,
            CmapArg::Hot => Colormap::Hot,
            CmapArg::Gray => Colormap::Gray,
            CmapArg::Green => Colormap::Green,
        }
    }
}

/// Background fill selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackgroundArg {
    /// Keep the grayscale image as background
    Image,
    /// White background (requires a mask)
    White,
    /// Black background (requires a mask)
    Black,
}

impl From<BackgroundArg> for Background {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::Image => Background::Image,
            BackgroundArg::White => Background::White,
            BackgroundArg::Black => Background::Black,
        }
    }
}

/// Plant phenotyping image analysis toolkit.
#[derive(Parser)]
#[command(name = "phenopix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a grayscale image through a colormap
    Pseudocolor {
        /// Input grayscale image
        input: PathBuf,

        /// Output figure path
        #[arg(short, long)]
        output: PathBuf,

        /// Binary mask restricting colorization to foreground pixels
        #[arg(short, long)]
        mask: Option<PathBuf>,

        /// Colormap to apply
        #[arg(short, long, value_enum, default_value = "viridis")]
        colormap: CmapArg,

        /// Fill for masked-out pixels
        #[arg(short, long, value_enum, default_value = "image")]
        background: BackgroundArg,

        /// Lower clip bound (defaults to the observed minimum)
        #[arg(long)]
        min_value: Option<f32>,

        /// Upper clip bound (defaults to the observed maximum)
        #[arg(long)]
        max_value: Option<f32>,

        /// Crop to a region of interest: X Y WIDTH HEIGHT
        #[arg(long, num_args = 4, value_names = ["X", "Y", "WIDTH", "HEIGHT"])]
        roi: Option<Vec<usize>>,

        /// Skip the colorbar
        #[arg(long)]
        no_colorbar: bool,

        /// Draw a tick-marked frame around the image area
        #[arg(long)]
        axes: bool,

        /// Figure title (metadata only)
        #[arg(long)]
        title: Option<String>,

        /// Integer output upscaling factor
        #[arg(long, default_value = "1")]
        scale: u32,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a grayscale image
    Info {
        /// Input grayscale image
        input: PathBuf,
    },

    /// Analyze the X/Y spatial distribution of labeled mask objects
    Distribution {
        /// Labeled mask image (luma values are object labels)
        input: PathBuf,

        /// Output JSON results path
        #[arg(short, long)]
        output: PathBuf,

        /// Number of labeled objects (defaults to the highest label)
        #[arg(short, long)]
        n_labels: Option<u32>,

        /// Histogram bin width in pixels along X
        #[arg(long, default_value = "100")]
        bin_size_x: usize,

        /// Histogram bin width in pixels along Y
        #[arg(long, default_value = "100")]
        bin_size_y: usize,

        /// Sample label prefix for recorded observations
        #[arg(short, long, default_value = "default")]
        label: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Pseudocolor {
            input,
            output,
            mask,
            colormap,
            background,
            min_value,
            max_value,
            roi,
            no_colorbar,
            axes,
            title,
            scale,
            verbose,
        } => {
            if verbose {
                eprintln!("Reading: {}", input.display());
            }
            let img = read_gray(&input)?;
            let mask = mask.as_deref().map(read_mask).transpose()?;

            let region = match roi.as_deref() {
                Some([x, y, w, h]) => Some(Region::from_bounds(Bounds::new(*x, *y, *w, *h))),
                _ => None,
            };

            let opts = PseudocolorOptions {
                colormap: colormap.into(),
                background: background.into(),
                min_value,
                max_value,
                colorbar: !no_colorbar,
                axes,
                title,
                scale,
            };

            if verbose {
                eprintln!("Colormap: {}", opts.colormap);
                eprintln!("Background: {}", opts.background);
            }

            let figure = pseudocolor(&img, mask.as_ref(), region.as_ref(), &opts)?;
            let (range_min, range_max) = figure.value_range();
            write_figure(&figure, &output)?;

            println!(
                "Rendered {}x{} image over range {range_min} - {range_max}",
                img.width(),
                img.height()
            );
            println!("Figure written to: {}", output.display());
        }

        Commands::Info { input } => {
            let img = read_gray(&input)?;
            println!("File: {}", input.display());
            println!("Size: {}x{} pixels", img.width(), img.height());
            if let Some((min, max)) = img.min_max() {
                println!("Value range: {min} - {max}");
            } else {
                println!("Value range: empty");
            }
        }

        Commands::Distribution {
            input,
            output,
            n_labels,
            bin_size_x,
            bin_size_y,
            label,
            verbose,
        } => {
            if verbose {
                eprintln!("Reading: {}", input.display());
            }
            let labeled = read_labeled(&input)?;
            let n_labels = n_labels.unwrap_or_else(|| labeled.max_label());

            if verbose {
                eprintln!("Objects: {n_labels}");
                eprintln!("Bin sizes: {bin_size_x}x{bin_size_y} pixels");
            }

            let opts = DistributionOptions {
                bin_size_x,
                bin_size_y,
            };
            let mut observations = Observations::new();
            analyze_distribution(&labeled, n_labels, opts, &label, &mut observations)?;
            save_results(&observations, &output)?;

            println!("Analyzed {n_labels} object(s)");
            println!("Results written to: {}", output.display());
        }
    }

    Ok(())
}
