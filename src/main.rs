use clap::{Parser, Subcommand};
use photo_mosaic::imaging::row_height;
use photo_mosaic::{collect, config, output, run};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Overrides for values otherwise taken from `mosaic.toml`.
#[derive(clap::Args, Clone)]
struct ComposeArgs {
    /// Output JPEG file
    #[arg(long, default_value = "mosaic.jpg")]
    output: PathBuf,

    /// Printed width in centimetres
    #[arg(long)]
    width_cm: Option<f64>,

    /// Printed height in centimetres
    #[arg(long)]
    height_cm: Option<f64>,

    /// Print resolution in dots per inch
    #[arg(long)]
    dpi: Option<f64>,

    /// JPEG quality (1-100)
    #[arg(long)]
    quality: Option<u32>,

    /// Fixed shuffle seed for a reproducible arrangement
    #[arg(long)]
    seed: Option<u64>,

    /// Skip photos that cannot be decoded instead of aborting
    #[arg(long)]
    skip_unreadable: bool,

    /// Also write a JSON report with per-image timings
    #[arg(long)]
    report: Option<PathBuf>,
}

impl ComposeArgs {
    /// `mosaic.toml` from `source` with these flags applied on top, validated
    /// as a whole so a bad flag fails like the same value in the file.
    fn resolve_config(&self, source: &Path) -> Result<config::MosaicConfig, config::ConfigError> {
        let mut mosaic_config = config::load_config(source)?;
        self.apply(&mut mosaic_config);
        mosaic_config.validate()?;
        Ok(mosaic_config)
    }

    fn apply(&self, config: &mut config::MosaicConfig) {
        if let Some(width_cm) = self.width_cm {
            config.canvas.width_cm = width_cm;
        }
        if let Some(height_cm) = self.height_cm {
            config.canvas.height_cm = height_cm;
        }
        if let Some(dpi) = self.dpi {
            config.canvas.dpi = dpi;
        }
        if let Some(quality) = self.quality {
            config.output.quality = quality;
        }
        if self.seed.is_some() {
            config.layout.seed = self.seed;
        }
        if self.skip_unreadable {
            config.layout.skip_unreadable = true;
        }
    }
}

#[derive(Parser)]
#[command(name = "photo-mosaic")]
#[command(version, about = "Compose a print-sized mosaic from a folder of photos")]
#[command(long_about = "\
Compose a print-sized mosaic from a folder of photos

Every .jpg/.jpeg/.JPG/.JPEG file directly inside the source directory is
scaled to a common row height (canvas height / 11) and packed left to
right, top to bottom, in random order. Photos that no longer fit once the
canvas is full are left out.

Settings come from mosaic.toml in the source directory, if present, and
are overridden by command-line flags.

Run 'photo-mosaic gen-config' to generate a documented mosaic.toml.")]
struct Cli {
    /// Directory of source photos
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose the mosaic and write it as JPEG
    Compose(ComposeArgs),
    /// List which entries would be used and the resulting canvas size
    Check,
    /// Print a stock mosaic.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Compose(args) => {
            let mosaic_config = args.resolve_config(&cli.source)?;
            let request = run::RunRequest::from_config(&cli.source, &args.output, &mosaic_config);

            println!(
                "==> Composing {} → {}",
                cli.source.display(),
                args.output.display()
            );
            let (tx, rx) = std::sync::mpsc::channel();
            let worker = run::spawn(request, tx)?;
            let mut formatter = output::EventFormatter::new();
            for event in rx {
                for line in formatter.format(&event) {
                    println!("{}", line);
                }
            }
            let summary = worker.join().map_err(|_| "mosaic worker panicked")??;
            output::print_summary(&summary);

            if let Some(report) = &args.report {
                let json = serde_json::to_string_pretty(&summary)?;
                std::fs::write(report, json)?;
                println!("Report: {}", report.display());
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let mosaic_config = config::load_config(&cli.source)?;
            let scan = collect::scan_directory(&cli.source)?;
            output::print_check_output(&scan);

            let request = run::RunRequest::from_config(&cli.source, "", &mosaic_config);
            request.validate()?;
            let (width, height) = request.pixel_dimensions();
            println!(
                "Canvas: {} x {} px, row height {} px",
                width,
                height,
                row_height(height)
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
