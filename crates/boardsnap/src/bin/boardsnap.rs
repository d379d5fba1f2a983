//! boardsnap CLI: FEN inspection, recognizer payloads and evaluation bars.

use std::path::PathBuf;

use boardsnap::core::{view_to_normalized, ViewSize};
use boardsnap::fen::{decode_fen_with, Color};
use boardsnap::io::{FenReport, SnapConfig};
use boardsnap::{
    CornerSet, EvalBar, EvaluationResult, FenDefaults, FitPolicy, ImageSize, PixelRounding,
    Position, RecognizeRequest, RecognizeResponse,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "boardsnap")]
#[command(about = "Inspect FEN strings, build recognizer payloads and render evaluation bars")]
#[command(version)]
struct Cli {
    /// Log level for the stderr logger (off, error, warn, info, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a FEN, print the board and check the kings.
    Fen(CliFenArgs),

    /// Build the recognizer request JSON for a photo.
    Corners(CliCornersArgs),

    /// Map a view-space point to normalized image coordinates.
    ViewToNorm(CliViewArgs),

    /// Render the evaluation bar for a score, mate or error.
    Eval(CliEvalArgs),

    /// Apply a recognizer response to a configured session.
    Apply(CliApplyArgs),
}

#[derive(Debug, Clone, Args)]
struct CliFenArgs {
    /// FEN or bare piece placement.
    fen: String,

    /// Assume every castling right when the castling field is missing.
    #[arg(long)]
    all_castling: bool,

    /// Rotate the board 180 degrees before printing.
    #[arg(long)]
    flip: bool,

    /// Print a JSON report instead of the diagram.
    #[arg(long)]
    json: bool,

    /// Write the JSON report to this path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Exit with an error unless each side has exactly one king.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Args)]
struct CliCornersArgs {
    /// JSON session config (image size, corners, rounding).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image width in pixels (overrides the config).
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels (overrides the config).
    #[arg(long)]
    height: Option<u32>,

    /// Inset margin for the default outline, as a fraction of each side.
    #[arg(long)]
    inset: Option<f64>,

    /// Pixel rounding for the payload (overrides the config).
    #[arg(long, value_enum)]
    rounding: Option<RoundingArg>,
}

#[derive(Debug, Clone, Args)]
struct CliViewArgs {
    #[arg(long)]
    image_width: u32,
    #[arg(long)]
    image_height: u32,
    #[arg(long)]
    view_width: f64,
    #[arg(long)]
    view_height: f64,

    /// How the photo is scaled into the view.
    #[arg(long, value_enum, default_value_t = FitArg::Fit)]
    fit: FitArg,

    /// View-space x.
    #[arg(allow_negative_numbers = true)]
    x: f64,

    /// View-space y.
    #[arg(allow_negative_numbers = true)]
    y: f64,
}

#[derive(Debug, Clone, Args)]
struct CliEvalArgs {
    /// Advantage in pawns, positive for white.
    #[arg(long, allow_negative_numbers = true)]
    score: Option<f64>,

    /// Mate distance in moves, negative when black mates.
    #[arg(long, allow_negative_numbers = true)]
    mate: Option<i32>,

    /// Evaluator error message.
    #[arg(long)]
    error: Option<String>,

    /// Print JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Args)]
struct CliApplyArgs {
    /// JSON session config; must name the image size.
    #[arg(long)]
    config: PathBuf,

    /// Recognizer response JSON.
    #[arg(long)]
    response: PathBuf,

    /// Side to move written into the FEN.
    #[arg(long, value_enum)]
    side: Option<SideArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoundingArg {
    Truncate,
    Exact,
}

impl RoundingArg {
    fn to_core(self) -> PixelRounding {
        match self {
            Self::Truncate => PixelRounding::Truncate,
            Self::Exact => PixelRounding::Exact,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FitArg {
    Fit,
    Fill,
}

impl FitArg {
    fn to_core(self) -> FitPolicy {
        match self {
            Self::Fit => FitPolicy::AspectFit,
            Self::Fill => FitPolicy::AspectFill,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    White,
    Black,
}

impl SideArg {
    fn to_core(self) -> Color {
        match self {
            Self::White => Color::White,
            Self::Black => Color::Black,
        }
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Fen(args) => run_fen(&args),
        Commands::Corners(args) => run_corners(&args),
        Commands::ViewToNorm(args) => run_view_to_norm(&args),
        Commands::Eval(args) => run_eval(&args),
        Commands::Apply(args) => run_apply(&args),
    }
}

fn init_logging(level: Option<&str>) {
    // tracing reads RUST_LOG; --log-level only drives the plain stderr logger
    #[cfg(feature = "tracing")]
    {
        let _ = level;
        let _ = LogTracer::init();
        boardsnap::core::init_tracing(false);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let raw = level
            .map(str::to_string)
            .or_else(|| std::env::var(boardsnap::core::LOG_ENV).ok());
        let filter = boardsnap::core::level_from_str(raw.as_deref(), log::LevelFilter::Warn);
        let _ = boardsnap::core::init_with_level(filter);
    }
}

fn run_fen(args: &CliFenArgs) -> CliResult<()> {
    let defaults = if args.all_castling {
        FenDefaults::all_castling()
    } else {
        FenDefaults::default()
    };
    let mut position = decode_fen_with(&args.fen, &defaults);
    if args.flip {
        position.board = position.board.rotated_180();
    }
    let report = FenReport::new(&args.fen, &position);

    if let Some(path) = &args.out {
        report.write_json(path)?;
        log::info!("wrote FEN report to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", position.board.diagram());
        println!("fen:    {}", report.fen);
        println!("pieces: {}", report.pieces);
        if report.is_valid() {
            println!("kings:  ok");
        } else {
            println!("kings:  {}", report.problems.join(", "));
        }
    }

    if args.strict && !report.is_valid() {
        return Err(report.problems.join(", ").into());
    }
    Ok(())
}

fn run_corners(args: &CliCornersArgs) -> CliResult<()> {
    let cfg = match &args.config {
        Some(path) => SnapConfig::load_json(path)?,
        None => SnapConfig::default(),
    };

    let image = match (args.width, args.height, cfg.image) {
        (Some(w), Some(h), _) => ImageSize::new(w, h)?,
        (None, None, Some(image)) => image,
        (None, None, None) => {
            return Err("image size missing; pass --width and --height or a config".into())
        }
        _ => return Err("pass both --width and --height".into()),
    };

    let corners = match (args.inset, cfg.corners) {
        (Some(margin), _) => CornerSet::inset(margin),
        (None, Some(corners)) => corners,
        (None, None) => CornerSet::default(),
    };
    let rounding = args.rounding.map_or(cfg.rounding, RoundingArg::to_core);

    let request = RecognizeRequest::new(&corners, image, rounding);
    println!("{}", request.to_json()?);
    Ok(())
}

fn run_view_to_norm(args: &CliViewArgs) -> CliResult<()> {
    let image = ImageSize::new(args.image_width, args.image_height)?;
    let view = ViewSize::new(args.view_width, args.view_height)?;
    let p = view_to_normalized(Point2::new(args.x, args.y), view, image, args.fit.to_core());
    println!("{:.6} {:.6}", p.x, p.y);
    Ok(())
}

fn run_eval(args: &CliEvalArgs) -> CliResult<()> {
    let result = EvaluationResult::from_parts(args.score, args.mate, args.error.clone());
    let bar = EvalBar::from_result(result.as_ref());
    if args.json {
        println!("{}", serde_json::to_string(&bar)?);
    } else {
        println!("{:.3} {}", bar.fraction, bar.text);
    }
    Ok(())
}

fn run_apply(args: &CliApplyArgs) -> CliResult<()> {
    let cfg = SnapConfig::load_json(&args.config)?;
    if cfg.image.is_none() {
        return Err("config has no image size".into());
    }
    let raw = std::fs::read_to_string(&args.response)?;
    let response: RecognizeResponse = serde_json::from_str(&raw)?;

    let mut session = cfg.build_session(Position::empty());
    session.apply_recognition(&response);
    if let Some(side) = args.side {
        session.set_side_to_move(side.to_core());
    }

    println!("{}", session.fen());
    for (role, [x, y]) in boardsnap::CornerRole::ALL
        .iter()
        .zip(session.corners().percentages())
    {
        println!("{role:?}: {x:.1}% {y:.1}%");
    }
    Ok(())
}
