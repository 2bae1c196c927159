//! retro-targets CLI: find the target pair in a frame and report the steering offset.

use clap::{Args, Parser, Subcommand, ValueEnum};
use image::ImageReader;
use log::{info, warn};
use retro_targets::detect;
use retro_targets::detector::{
    TargetDetectConfig, TargetDetectReport, TargetDetectionResult, TargetDetectorParams,
};
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "retro-targets")]
#[command(about = "Detect a pair of retro-reflective vision targets and report their horizontal offset")]
#[command(version)]
struct Cli {
    /// Log verbosity.
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect targets in a single image.
    Detect(DetectArgs),

    /// Run a detection described by a JSON config file.
    Run {
        /// Path to a `TargetDetectConfig` JSON file.
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct DetectArgs {
    /// Path to the input image.
    image: PathBuf,

    /// JSON file holding `TargetDetectorParams`; defaults are used when omitted.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Reference column in pixels. Defaults to the image center.
    #[arg(long)]
    reference_column: Option<f64>,

    /// Write the HSV mask as a PNG.
    #[arg(long)]
    mask_out: Option<PathBuf>,

    /// Write a JSON report.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level)?;

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Run { config } => run_config(&config),
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LogLevel) -> CliResult<()> {
    env_logger::Builder::new()
        .parse_filters(level.as_str())
        .parse_default_env()
        .try_init()?;
    Ok(())
}

/// Spans and `log` records both go to stderr, filtered by `level`.
#[cfg(feature = "tracing")]
fn init_logging(level: LogLevel) -> CliResult<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.as_str()))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init()?;
    Ok(())
}

fn load_params(path: Option<&Path>) -> CliResult<TargetDetectorParams> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(TargetDetectorParams::default()),
    }
}

fn run_detect(args: &DetectArgs) -> CliResult<()> {
    info!("Loading image: {}", args.image.display());
    let img = ImageReader::open(&args.image)?.decode()?.to_rgb8();
    let (w, h) = img.dimensions();
    info!("Image size: {w}x{h}");

    let mut params = load_params(args.params.as_deref())?;
    params.reference_column = args.reference_column.unwrap_or(0.5 * w as f64);

    let result = detect::detect_targets(&img, params)?;
    print_offset(&result);

    if let Some(mask_path) = &args.mask_out {
        write_mask(&result, mask_path)?;
    }
    if let Some(report_path) = &args.report {
        let mut report = TargetDetectReport::new(
            args.image.to_string_lossy(),
            args.params.as_deref(),
            w as usize,
            h as usize,
            params.reference_column,
        );
        report.set_detection(&result);
        report.write_json(report_path)?;
        info!("Report written to {}", report_path.display());
    }
    Ok(())
}

fn run_config(config_path: &Path) -> CliResult<()> {
    let cfg = TargetDetectConfig::load_json(config_path)?;
    let detector = cfg.build_detector()?;

    info!("Loading image: {}", cfg.image_path);
    let img = ImageReader::open(&cfg.image_path)?.decode()?.to_rgb8();
    let (w, h) = img.dimensions();

    let mut report = TargetDetectReport::new(
        cfg.image_path.clone(),
        Some(config_path),
        w as usize,
        h as usize,
        cfg.params.reference_column,
    );
    match detector.detect(&detect::rgb_view(&img)) {
        Ok(result) => {
            print_offset(&result);
            if let Some(mask_path) = &cfg.mask_path {
                write_mask(&result, Path::new(mask_path))?;
            }
            report.set_detection(&result);
        }
        Err(err) => {
            warn!("detection failed: {err}");
            report.set_error(&err);
        }
    }

    let out = cfg.output_path();
    report.write_json(&out)?;
    info!("Report written to {}", out.display());
    Ok(())
}

fn print_offset(result: &TargetDetectionResult) {
    info!(
        "{} contours, {} after filtering, {} candidates",
        result.contours.len(),
        result.filtered.len(),
        result.candidates.len()
    );
    match result.offset_pixels() {
        Some(px) => println!("offset: {px:.3}"),
        None => println!("offset: not found"),
    }
}

fn write_mask(result: &TargetDetectionResult, path: &Path) -> CliResult<()> {
    let mask = detect::mask_to_image(&result.mask).ok_or("mask dimensions exceed u32")?;
    mask.save(path)?;
    info!("Mask written to {}", path.display());
    Ok(())
}
