use clap::Parser;
use rand::prelude::*;
use std::path::PathBuf;

use pixelbonsai::{
    Bonsai, BitmapBuffer, BonsaiConfig, DirFrameSink, Result, TextBuffer,
};

#[derive(Parser)]
#[command(name = "pixelbonsai")]
#[command(version)]
#[command(about = "Procedural bonsai trees as ANSI text or pixel-glyph PNG frames", long_about = None)]
struct Cli {
    /// Initial branch life (higher = bigger tree)
    #[arg(short = 'L', long, default_value = "32")]
    life: u32,

    /// Branch multiplier (higher = bushier)
    #[arg(short = 'M', long, default_value = "5")]
    multiplier: u32,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Leaf characters (comma-separated)
    #[arg(short = 'c', long, default_value = "&")]
    leaf: String,

    /// Canvas width in cells (text mode defaults to the terminal width)
    #[arg(short, long)]
    width: Option<i32>,

    /// Canvas height in cells
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Render 7x7 pixel glyphs into a PNG frame sequence instead of text
    #[arg(short, long)]
    pixel: bool,

    /// Parent directory for the timestamped frame directory (pixel mode)
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Show diagnostics (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose > 0 { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "pixelbonsai={log_level}"
        )))
        .with_writer(std::io::stderr)
        .init();

    let config = BonsaiConfig {
        life_start: cli.life.min(200),
        multiplier: cli.multiplier.clamp(1, 20),
        leaves: cli.leaf.split(',').map(str::to_string).collect(),
        verbosity: cli.verbose,
    };

    let seed = cli.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0) // fallback seed for misconfigured system clocks
    });
    let mut rng = StdRng::seed_from_u64(seed);

    if cli.pixel {
        let width = cli.width.unwrap_or(70).max(1);
        let height = cli.height.unwrap_or(70).max(5);
        let sink = DirFrameSink::create(&cli.out_dir)?;
        let dir = sink.dir().to_path_buf();

        let mut bonsai = Bonsai::new(BitmapBuffer::new(width, height, sink));
        bonsai.run(&config, &mut rng)?;

        let frames = bonsai.into_buffer().sink().frames_written();
        eprintln!("{frames} frames written to {}", dir.display());
    } else {
        let (term_w, term_h) = crossterm::terminal::size().unwrap_or((139, 30));
        let width = cli.width.unwrap_or(term_w as i32).max(1);
        let height = cli.height.unwrap_or(term_h as i32).max(5);

        let mut bonsai = Bonsai::new(TextBuffer::new(width, height));
        let tree = bonsai.run(&config, &mut rng)?;
        println!("{tree}");
    }

    Ok(())
}
