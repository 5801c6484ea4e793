use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use thumbforge::{
    BaseImage, CallPhase, Color, Compositor, EditorState, EmotionalVibe, FontBook, GeminiClient,
    LayerPatch, Niche, Studio, StudioSettings, VisualStyle, encode_png, export_file_name,
};

#[derive(Parser, Debug)]
#[command(name = "thumbforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite text layers over an image and export a 1280x720 PNG.
    Render(RenderArgs),
    /// Generate copy and a base image, then export the seeded thumbnail.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Base image (any format the `image` crate decodes).
    #[arg(long)]
    image: PathBuf,

    /// JSON array of layers, e.g. `[{"text": "Big win", "posY": 20, "fontSize": 160}]`.
    #[arg(long)]
    layers: PathBuf,

    /// Output PNG path, or a directory to receive `thumbnail-<millis>.png`.
    #[arg(long)]
    out: PathBuf,

    /// Directory with `.ttf`/`.otf` faces.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Draw the selection box around the layer at this index (preview output).
    #[arg(long)]
    select: Option<usize>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Video topic or title.
    #[arg(long)]
    topic: String,

    #[arg(long, default_value = "Gaming")]
    niche: Niche,

    #[arg(long, default_value = "Cinematic")]
    style: VisualStyle,

    #[arg(long, default_value = "Excited/Hype")]
    vibe: EmotionalVibe,

    #[arg(long, default_value = "#2563eb")]
    primary: Color,

    #[arg(long, default_value = "#f59e0b")]
    accent: Color,

    /// Settings JSON (endpoint, models, timeout, fonts_dir).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Generate(args) => cmd_generate(args).await,
    }
}

fn load_fonts(dir: Option<&Path>) -> anyhow::Result<FontBook> {
    match dir {
        Some(dir) => Ok(FontBook::from_dir(dir)?),
        None => Ok(FontBook::empty()),
    }
}

fn read_layers(path: &Path) -> anyhow::Result<EditorState> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read layers '{}'", path.display()))?;
    let patches: Vec<LayerPatch> =
        serde_json::from_str(&text).with_context(|| "parse layers JSON")?;

    let mut state = EditorState::new();
    for patch in &patches {
        let id = state.add_layer(patch.text.clone().unwrap_or_default());
        state.update_layer(id, patch);
    }
    Ok(state)
}

fn output_path(out: &Path) -> PathBuf {
    if out.is_dir() {
        out.join(export_file_name(chrono::Utc::now()))
    } else {
        out.to_path_buf()
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let base = BaseImage::decode(&bytes)?;
    let state = read_layers(&args.layers)?;

    let active = match args.select {
        Some(i) => Some(
            state
                .layers()
                .get(i)
                .map(|l| l.id)
                .with_context(|| format!("--select {i} is out of range"))?,
        ),
        None => None,
    };

    let mut compositor = Compositor::new(load_fonts(args.fonts.as_deref())?);
    let frame = compositor.render(Some(&base), state.layers(), active)?;
    let png = encode_png(&frame)?;

    let path = output_path(&args.out);
    std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

async fn wait_for(studio: &mut Studio, image: bool) -> anyhow::Result<()> {
    loop {
        let phase = if image {
            studio.image_phase()
        } else {
            studio.insights_phase()
        };
        match phase {
            CallPhase::Pending { .. } => {
                studio.next_completion().await;
            }
            CallPhase::Resolved(Ok(())) => return Ok(()),
            CallPhase::Resolved(Err(msg)) => anyhow::bail!("{msg}"),
            CallPhase::Idle => anyhow::bail!("no request was started"),
        }
    }
}

async fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let settings = StudioSettings::load(args.settings.as_deref())?;
    let fonts = load_fonts(settings.fonts_dir.as_deref())?;
    let client = GeminiClient::new(&settings)?;

    let mut studio = Studio::new(Arc::new(client), Compositor::new(fonts));
    {
        let config = studio.config_mut();
        config.topic = args.topic;
        config.niche = args.niche;
        config.style = args.style;
        config.vibe = args.vibe;
        config.primary_color = args.primary;
        config.accent_color = args.accent;
    }

    studio.generate()?;
    wait_for(&mut studio, false).await?;
    if let Some(result) = studio.result() {
        println!("prompt: {}", result.prompt);
        println!("why: {}", result.explanation);
    }

    studio.preview_image()?;
    wait_for(&mut studio, true).await?;

    let png = studio.export_png()?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create '{}'", args.out.display()))?;
    let path = png.save_in(&args.out)?;
    println!("{}", path.display());
    Ok(())
}
