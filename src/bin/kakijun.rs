use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kakijun", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a stroke-order SVG as an animated GIF.
    Render(RenderArgs),
    /// Render a single animation frame as a PNG.
    Frame(FrameArgs),
    /// Print the computed stroke timeline as JSON without rendering.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input stroke-order SVG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path. Defaults to the input path with a .gif extension.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Settings JSON (all fields optional).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input stroke-order SVG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Settings JSON (all fields optional).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input stroke-order SVG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Settings JSON (all fields optional).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<kakijun::Config> {
    let Some(path) = path else {
        return Ok(kakijun::Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open config '{}'", path.display()))?;
    let cfg: kakijun::Config =
        serde_json::from_str(&text).with_context(|| "parse config JSON")?;
    Ok(cfg)
}

fn read_svg(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("open svg '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let svg = read_svg(&args.in_path)?;

    let out = args
        .out
        .unwrap_or_else(|| args.in_path.with_extension("gif"));

    let plan = kakijun::render_to_gif(&svg, &out, &cfg)?;

    eprintln!(
        "wrote {} ({} strokes, {} frames, {:.2}s)",
        out.display(),
        plan.strokes.len(),
        plan.timeline.frame_count(),
        plan.timeline.animation_time
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let svg = read_svg(&args.in_path)?;

    let plan = kakijun::plan_animation(&svg, &cfg)?;
    let frame = kakijun::render_frame(&plan, args.frame, &cfg)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let svg = read_svg(&args.in_path)?;

    let plan = kakijun::plan_animation(&svg, &cfg)?;

    let json = serde_json::json!({
        "strokes": plan.strokes,
        "timeline": plan.timeline,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
