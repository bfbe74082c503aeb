use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use pixel_ripple::{
    CanvasRenderer, CpuSurface, FrameOutcome, ManualScheduler, Point, PointerEvent, PointerKind,
    Rect, RippleConfig, Size, TransitionController,
};

type Controller = TransitionController<CanvasRenderer<CpuSurface>, ManualScheduler>;

#[derive(Parser, Debug)]
#[command(name = "pixel-ripple", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the ripple at one point in time as a PNG.
    Frame(FrameArgs),
    /// Render a full expand + contract cycle as numbered PNGs.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct SurfaceArgs {
    /// Surface width in logical units.
    #[arg(long, default_value_t = 300.0)]
    width: f64,

    /// Surface height in logical units.
    #[arg(long, default_value_t = 300.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Entry point x (defaults to the surface center).
    #[arg(long)]
    x: Option<f64>,

    /// Entry point y (defaults to the surface center).
    #[arg(long)]
    y: Option<f64>,

    /// Ripple configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed override for a reproducible grid.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Sweep direction.
    #[arg(long, value_enum, default_value_t = DirectionChoice::Expanding)]
    direction: DirectionChoice,

    /// Time since the sweep started, in milliseconds.
    #[arg(long)]
    elapsed_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Expanding,
    Contracting,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn load_config(args: &SurfaceArgs) -> anyhow::Result<RippleConfig> {
    let mut config = match &args.config {
        Some(path) => RippleConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => RippleConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn mount(args: &SurfaceArgs) -> anyhow::Result<(Controller, Rect, Point)> {
    let config = load_config(args)?;
    let logical = Size::new(args.width, args.height);
    let surface = CpuSurface::new(logical, args.dpr).with_context(|| "allocate cpu surface")?;
    let mut ctl = TransitionController::new(
        &config,
        CanvasRenderer::new(surface),
        ManualScheduler::new(),
    );
    ctl.resize(logical, args.dpr)?;

    let bounds = Rect::from_origin_size(Point::ZERO, logical);
    let entry = Point::new(
        args.x.unwrap_or(args.width / 2.0),
        args.y.unwrap_or(args.height / 2.0),
    );
    Ok((ctl, bounds, entry))
}

/// Deliver the single pending frame at `now_ms`.
fn deliver(ctl: &mut Controller, now_ms: f64) -> anyhow::Result<FrameOutcome> {
    let mut outcome = FrameOutcome::Stale;
    for token in ctl.scheduler_mut().take_due() {
        outcome = ctl.on_frame(token, now_ms)?;
    }
    Ok(outcome)
}

fn run_to_completion(ctl: &mut Controller, start_ms: f64) -> anyhow::Result<f64> {
    let end = start_ms + ctl.settings().duration_ms;
    deliver(ctl, end)?;
    Ok(end)
}

fn write_png(ctl: &mut Controller, out: &Path) -> anyhow::Result<()> {
    let frame = ctl.renderer_mut().surface_mut().snapshot_straight()?;

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut ctl, bounds, entry) = mount(&args.surface)?;

    ctl.handle_pointer(PointerEvent::new(PointerKind::Enter, entry), bounds, 0.0)?;
    let mut start = 0.0;
    if matches!(args.direction, DirectionChoice::Contracting) {
        start = run_to_completion(&mut ctl, start)?;
        ctl.handle_pointer(PointerEvent::new(PointerKind::Leave, entry), bounds, start)?;
    }

    let outcome = deliver(&mut ctl, start + args.elapsed_ms.max(0.0))?;
    tracing::info!(?outcome, "rendered frame");

    write_png(&mut ctl, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("fps must be positive, got {}", args.fps);
    }
    let frame_ms = 1000.0 / args.fps;
    let (mut ctl, bounds, entry) = mount(&args.surface)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut index = 0u64;
    let mut now = 0.0;
    for kind in [PointerKind::Enter, PointerKind::Leave] {
        ctl.handle_pointer(PointerEvent::new(kind, entry), bounds, now)?;
        loop {
            now += frame_ms;
            let outcome = deliver(&mut ctl, now)?;
            let out = args.out_dir.join(format!("frame_{index:05}.png"));
            write_png(&mut ctl, &out)?;
            index += 1;
            match outcome {
                FrameOutcome::Running { .. } => {}
                FrameOutcome::Completed { .. } | FrameOutcome::Stale => break,
            }
        }
    }

    eprintln!("wrote {index} frames to {}", args.out_dir.display());
    Ok(())
}
