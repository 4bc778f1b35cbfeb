use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use photostrip::{
    AssetRef, BoothConfig, CaptureProvider, CapturedImage, Compositor, DirAssetSource, DirSink,
    DirectoryCapture, Frame, FrameId, ManualScheduler, Mirrored, SHOT_COUNT, Session,
    SessionOpts, StateKind, SyntheticCapture, Transition,
};

#[derive(Parser, Debug)]
#[command(name = "photostrip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the selectable frames.
    Frames(FramesArgs),
    /// Composite four existing photos into a frame template.
    Compose(ComposeArgs),
    /// Run a full unattended session and download the strip.
    Shoot(ShootArgs),
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Booth config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Frame template image (PNG, JPEG or SVG).
    #[arg(long)]
    frame_image: PathBuf,

    /// Shot images in slot order; exactly four.
    #[arg(long = "shot", required = true, num_args = 1)]
    shots: Vec<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Booth config JSON (slot geometry).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ShootArgs {
    /// Frame id from the catalog.
    #[arg(long)]
    frame: String,

    /// Directory frame assets are resolved against.
    #[arg(long)]
    assets: PathBuf,

    /// Still images handed out in order instead of synthetic captures.
    #[arg(long = "captures", num_args = 1..)]
    captures: Vec<PathBuf>,

    /// Directory the strip is downloaded into.
    #[arg(long)]
    out_dir: PathBuf,

    /// Booth config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the real-time countdown waits.
    #[arg(long, default_value_t = false)]
    fast: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Shoot(args) => cmd_shoot(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BoothConfig> {
    match path {
        Some(p) => Ok(BoothConfig::from_path(p)?),
        None => Ok(BoothConfig::default()),
    }
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    for frame in cfg.catalog()?.iter() {
        println!("{}\t{}\t{}", frame.id, frame.name, frame.asset);
    }
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    if args.shots.len() != SHOT_COUNT {
        anyhow::bail!(
            "expected {SHOT_COUNT} --shot images, got {}",
            args.shots.len()
        );
    }
    let cfg = load_config(args.config.as_deref())?;

    let root = args
        .frame_image
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = args
        .frame_image
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid frame image path '{}'", args.frame_image.display()))?;
    let frame = Frame {
        id: FrameId::from("custom"),
        name: file_name.to_string(),
        asset: AssetRef::new(file_name)?,
    };

    let mut shots: [Option<CapturedImage>; SHOT_COUNT] = Default::default();
    for (slot, path) in shots.iter_mut().zip(&args.shots) {
        let bytes =
            std::fs::read(path).with_context(|| format!("read shot '{}'", path.display()))?;
        *slot = Some(CapturedImage::from_encoded(bytes));
    }

    let compositor = Compositor::new(cfg.geometry, DirAssetSource::new(root));
    let strip = compositor.composite(&frame, &shots)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, strip.png())
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_shoot(args: ShootArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let catalog = cfg.catalog()?;
    let frame = catalog
        .get(&FrameId(args.frame.clone()))
        .cloned()
        .with_context(|| format!("unknown frame '{}'", args.frame))?;

    let mut camera: Box<dyn CaptureProvider> = if args.captures.is_empty() {
        Box::new(SyntheticCapture::new(cfg.capture_width, cfg.capture_height))
    } else {
        Box::new(DirectoryCapture::new(args.captures.clone()))
    };
    if cfg.mirror_captures {
        camera = Box::new(Mirrored::new(camera));
    }

    let clock = ManualScheduler::new();
    let mut session = Session::new(SessionOpts::from(&cfg), clock.clone());
    session.select_frame(frame);
    session.start_countdown();

    while session.kind() != StateKind::Reviewing {
        if session.kind() == StateKind::Previewing {
            session.keep_and_next();
            continue;
        }
        if let Some(e) = session.capture_error() {
            anyhow::bail!("capture unavailable: {}", e.reason);
        }
        let Some(wait) = clock.next_due_in() else {
            anyhow::bail!("session stalled in state {}", session.kind());
        };
        if !args.fast {
            std::thread::sleep(wait);
        }
        for id in clock.advance(wait) {
            session.on_tick(id, camera.as_mut());
        }
        if let Some(c) = session.countdown() {
            tracing::info!(remaining = c.remaining(), "countdown");
        }
    }

    let compositor = Compositor::new(cfg.geometry, DirAssetSource::new(&args.assets));
    if session.create_strip(&compositor) != Transition::Applied {
        anyhow::bail!(
            "composite failed: {}",
            session.composite_error().unwrap_or("unknown error")
        );
    }

    let mut sink = DirSink::new(&args.out_dir);
    session.download(&mut sink);
    let Some(path) = sink.written().last() else {
        anyhow::bail!("strip was not written to '{}'", args.out_dir.display());
    };
    eprintln!("wrote {}", path.display());
    Ok(())
}
