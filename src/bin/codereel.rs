use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use codereel::{
    FingerprintSink, FrameIndex, FrameRange, JsonLinesSink, Registry, RenderSession,
    RenderSessionOpts,
};

#[derive(Parser, Debug)]
#[command(name = "codereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in compositions.
    List,
    /// Evaluate a single frame and write its scene graph as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and write one scene per line (JSON lines).
    Render(RenderArgs),
    /// Evaluate every frame sequentially and in parallel and compare fingerprints.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct CompArgs {
    /// Composition id (see `list`).
    #[arg(long)]
    comp: String,

    /// JSON props file; defaults are used when omitted.
    #[arg(long)]
    props: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    comp: CompArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    comp: CompArgs,

    /// Output JSON lines path.
    #[arg(long)]
    out: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    from: u64,

    /// Last frame (exclusive); the composition's end when omitted.
    #[arg(long)]
    to: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per evaluation chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Only write frames whose scene differs from the previous frame.
    #[arg(long, default_value_t = false)]
    changes_only: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    comp: CompArgs,

    /// Override rayon worker threads for the parallel pass.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load_props(path: Option<&Path>) -> anyhow::Result<Option<serde_json::Value>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read props '{}'", path.display()))?;
    let v = serde_json::from_str(&text)
        .with_context(|| format!("parse props '{}'", path.display()))?;
    Ok(Some(v))
}

fn open_session(args: &CompArgs, opts: RenderSessionOpts) -> anyhow::Result<RenderSession> {
    let props = load_props(args.props.as_deref())?;
    let comp = Registry::builtin()
        .create(&args.comp, props)
        .with_context(|| format!("create composition '{}'", args.comp))?;
    Ok(RenderSession::new(comp, opts)?)
}

fn create_out(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

fn cmd_list() -> anyhow::Result<()> {
    let registry = Registry::builtin();
    let mut out = std::io::stdout().lock();
    for id in registry.ids() {
        let comp = registry.create(id, None)?;
        let meta = comp.meta();
        writeln!(
            out,
            "{id:<26} {}x{:<5} {:>3} fps {:>6} frames ({:.1}s)  {}",
            meta.canvas.width,
            meta.canvas.height,
            meta.fps.as_f64(),
            meta.duration_in_frames,
            meta.duration_secs(),
            registry.summary(id).unwrap_or_default(),
        )?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let sess = open_session(&args.comp, RenderSessionOpts::default())?;
    let scene = sess.render_frame(FrameIndex(args.frame))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&scene)?
    } else {
        serde_json::to_string(&scene)?
    };
    match &args.out {
        Some(path) => {
            let mut w = create_out(path)?;
            writeln!(w, "{json}").with_context(|| format!("write '{}'", path.display()))?;
            w.flush()?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = RenderSessionOpts {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let sess = open_session(&args.comp, opts)?;
    let total = sess.full_range().end.0;
    let range = FrameRange::new(FrameIndex(args.from), FrameIndex(args.to.unwrap_or(total)))?
        .clip_to(total);

    let mut sink = JsonLinesSink::new(create_out(&args.out)?, args.changes_only);
    let stats = sess.render_range(range, &mut sink)?;

    eprintln!(
        "wrote {} ({} frames, {} changed, {} lines)",
        args.out.display(),
        stats.frames_total,
        stats.frames_changed,
        sink.written()
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let seq = open_session(&args.comp, RenderSessionOpts::default())?;
    let par = open_session(
        &args.comp,
        RenderSessionOpts {
            parallel: true,
            threads: args.threads,
            ..RenderSessionOpts::default()
        },
    )?;
    let range = seq.full_range();

    let mut a = FingerprintSink::default();
    seq.render_range(range, &mut a)?;
    let mut b = FingerprintSink::default();
    par.render_range(range, &mut b)?;

    if let Some(((idx, _), _)) = a
        .fingerprints
        .iter()
        .zip(&b.fingerprints)
        .find(|((_, x), (_, y))| x != y)
    {
        anyhow::bail!("frame {} differs between sequential and parallel runs", idx.0);
    }
    if a.fingerprints.len() != b.fingerprints.len() {
        anyhow::bail!(
            "frame count differs: {} sequential, {} parallel",
            a.fingerprints.len(),
            b.fingerprints.len()
        );
    }
    println!("ok: {} frames of '{}' match", a.fingerprints.len(), args.comp.comp);
    Ok(())
}
