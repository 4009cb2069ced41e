use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use valocoach::advice::{
    api_key_from_env, AdviceGenerator, AdviceRequest, GeminiClient, RoleCategory, SkillTier,
};
use valocoach::config::Config;
use valocoach::error::AppResult;
use valocoach::logging;
use valocoach::ocr::{ImagePreprocessor, TesseractRecognizer};
use valocoach::{analyze_text, MatchReport, PipelineError, ScoreboardPipeline};

/// Exit code when the screenshot had no readable stat line
const EXIT_NO_STATS: u8 = 2;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "valocoach",
    version,
    about = "Scan a post-match scoreboard and get a coaching verdict"
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract stats from a screenshot and print the verdict.
    Scan(ScanArgs),
    /// Scan a screenshot, then ask the coaching model for a custom plan.
    Advise(AdviseArgs),
    /// Run the stat parser on already recognized text (file or stdin).
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct ImageArgs {
    /// Scoreboard screenshot (PNG or JPEG)
    image: PathBuf,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the binarization threshold (1-255)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    threshold: Option<u8>,
}

#[derive(Debug, Args)]
struct ScanArgs {
    #[command(flatten)]
    input: ImageArgs,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Save the binarized image for inspection
    #[arg(long, value_name = "PATH")]
    save_binary: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct AdviseArgs {
    #[command(flatten)]
    input: ImageArgs,

    /// Current rank bracket
    #[arg(long, value_enum)]
    tier: SkillTier,

    /// Role of the agent played
    #[arg(long, value_enum)]
    role: RoleCategory,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Text file with OCR output; stdin when omitted
    file: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = logging::initialize_tracing(cli.verbose);
    logging::log_runtime_environment();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(PipelineError::NoStatsFound) = err.downcast_ref::<PipelineError>() {
                eprintln!("✗ {}", PipelineError::NoStatsFound);
                return ExitCode::from(EXIT_NO_STATS);
            }
            tracing::error!("{:#}", err);
            eprintln!("✗ {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> AppResult<()> {
    match command {
        Command::Scan(args) => run_scan(args),
        Command::Advise(args) => run_advise(args),
        Command::Parse(args) => run_parse(args),
    }
}

fn load_config(input: &ImageArgs) -> AppResult<Config> {
    let mut config = match &input.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    if let Some(threshold) = input.threshold {
        config.threshold = threshold;
    }

    Ok(config)
}

/// Read the image and run the pipeline
fn scan_image(
    input: &ImageArgs,
    config: &Config,
    keep_binary: bool,
) -> AppResult<valocoach::ScanOutcome> {
    let bytes = std::fs::read(&input.image)
        .with_context(|| format!("Failed to read image {}", input.image.display()))?;

    let recognizer = TesseractRecognizer::new(&config.recognizer_settings())
        .context("Tesseract is required; install it or set tessdata_path in the config")?;

    let mut pipeline =
        ScoreboardPipeline::new(ImagePreprocessor::new(config.threshold), recognizer)
            .with_binary_retained(keep_binary);

    Ok(pipeline.scan(&bytes)?)
}

fn run_scan(args: ScanArgs) -> AppResult<()> {
    let config = load_config(&args.input)?;
    let outcome = scan_image(&args.input, &config, args.save_binary.is_some())?;

    if let (Some(path), Some(binary)) = (&args.save_binary, &outcome.binary) {
        save_binary(path, binary)?;
    }

    print_report(&outcome.report, args.json)
}

fn run_advise(args: AdviseArgs) -> AppResult<()> {
    let config = load_config(&args.input)?;
    let outcome = scan_image(&args.input, &config, false)?;
    print_report(&outcome.report, false)?;

    let request = AdviceRequest::new(outcome.report.record, args.tier, args.role);

    println!("\n🧠 AI Coach Analysis\n");

    // Advice failures are reported without discarding the extracted stats
    let advice = api_key_from_env()
        .and_then(|key| GeminiClient::new(key, &config.advice).generate(&request));

    match advice {
        Ok(text) => println!("{}", text),
        Err(e) => {
            tracing::warn!("[advice] {}", e);
            eprintln!("System Error: {}", e);
        }
    }

    Ok(())
}

fn run_parse(args: ParseArgs) -> AppResult<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let report = analyze_text(&text)?;
    print_report(&report, args.json)
}

fn print_report(report: &MatchReport, json: bool) -> AppResult<()> {
    if json {
        println!("{}", report.render_json()?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

fn save_binary(path: &Path, binary: &image::GrayImage) -> AppResult<()> {
    binary
        .save(path)
        .with_context(|| format!("Failed to save binary image to {}", path.display()))?;
    tracing::info!("Saved binary image to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_args() {
        let cli = Cli::parse_from([
            "valocoach",
            "scan",
            "board.png",
            "--json",
            "--threshold",
            "140",
            "--save-binary",
            "out.png",
        ]);

        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.input.image, PathBuf::from("board.png"));
                assert_eq!(args.input.threshold, Some(140));
                assert!(args.json);
                assert_eq!(args.save_binary, Some(PathBuf::from("out.png")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_advise_args() {
        let cli = Cli::parse_from([
            "valocoach",
            "advise",
            "board.png",
            "--tier",
            "ascendant-plus",
            "--role",
            "sentinel",
        ]);

        match cli.command {
            Command::Advise(args) => {
                assert_eq!(args.tier, SkillTier::AscendantPlus);
                assert_eq!(args.role, RoleCategory::Sentinel);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let result = Cli::try_parse_from(["valocoach", "scan", "board.png", "--threshold", "0"]);
        assert!(result.is_err());
    }
}
