use std::{path::PathBuf, time::Duration};

use carousel_core::{
    load_items, CarouselConfig, CarouselItem, PointerEvent, SimEvent, Simulation, CAROUSEL_ROLE,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() -> carousel_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { source, width } => run_layout(&source, width),
        Commands::Simulate {
            source,
            width,
            seconds,
            fps,
            hover_at,
            hover_for,
        } => run_simulate(&source, width, seconds, fps, hover_at, hover_for),
    }
}

fn run_layout(source: &SourceArgs, width: f64) -> carousel_core::Result<()> {
    let (items, config) = source.load()?;
    tracing::info!(items = items.len(), width, "computing layout");

    let sim = Simulation::new(items, config, width, Duration::ZERO)?;
    let carousel = sim.carousel();
    let state = carousel.state();

    println!("role: {CAROUSEL_ROLE}");
    println!("clone count: {}", state.clone_count);
    match carousel.metrics() {
        Some(metrics) => println!(
            "start left: {:.1}  span width: {:.1}  stride: {:.1}",
            metrics.start_left, metrics.span_width, metrics.stride
        ),
        None => println!("nothing to measure"),
    }
    for slide in carousel.slides() {
        let marker = if slide.is_active { '>' } else { ' ' };
        let kind = if slide.is_clone { "clone" } else { "item" };
        println!(
            "{marker} {:>3} {:<5} {}",
            slide.display_index, kind, slide.aria.label
        );
    }
    Ok(())
}

fn run_simulate(
    source: &SourceArgs,
    width: f64,
    seconds: f64,
    fps: u32,
    hover_at: Option<f64>,
    hover_for: f64,
) -> carousel_core::Result<()> {
    if fps == 0 {
        return Err("fps must be positive".into());
    }
    let (items, config) = source.load()?;
    tracing::info!(
        items = items.len(),
        width,
        seconds,
        fps,
        "starting simulation"
    );

    let mut sim = Simulation::new(items, config, width, Duration::from_millis(300))?;
    let frame = Duration::from_secs_f64(1.0 / f64::from(fps));
    let end = Duration::from_secs_f64(seconds.max(0.0));
    let hover = hover_at.map(|start| {
        let start = Duration::from_secs_f64(start.max(0.0));
        (start, start + Duration::from_secs_f64(hover_for.max(0.0)))
    });
    let mut hovering = false;

    if let Some(item) = sim.carousel().active_item() {
        tracing::info!(item = %item.name, "initial active item");
    }

    while sim.now() + frame <= end {
        if let Some((start, stop)) = hover {
            let inside = sim.now() >= start && sim.now() < stop;
            if inside != hovering {
                hovering = inside;
                let event = if inside {
                    PointerEvent::HoverEnter
                } else {
                    PointerEvent::HoverLeave
                };
                tracing::info!(at = ?sim.now(), ?event, "pointer");
                sim.pointer(event);
            }
        }

        for event in sim.step(frame) {
            report(&sim, &event);
        }
    }

    sim.unmount();
    tracing::info!(
        normalizations = sim.carousel().normalization_count(),
        offset = sim.scroll_offset(),
        "simulation finished"
    );
    Ok(())
}

fn report(sim: &Simulation, event: &SimEvent) {
    match event {
        SimEvent::ActiveChanged {
            at,
            display_index,
            item_id,
        } => {
            let name = sim
                .carousel()
                .items()
                .iter()
                .find(|item| &item.id == item_id)
                .map(|item| item.name.as_str())
                .unwrap_or_default();
            tracing::info!(?at, display_index, item = %name, "active item changed");
        }
        SimEvent::Normalized { at, offset } => {
            tracing::info!(?at, offset, "normalization jump");
        }
    }
}

fn demo_items() -> Vec<CarouselItem> {
    [
        ("1", "Midnight City", "M83", "Hurry Up, We're Dreaming"),
        ("2", "Digital Love", "Daft Punk", "Discovery"),
        ("3", "Teardrop", "Massive Attack", "Mezzanine"),
        ("4", "Everything In Its Right Place", "Radiohead", "Kid A"),
        ("5", "Windowlicker", "Aphex Twin", "Windowlicker"),
    ]
    .into_iter()
    .map(|(id, name, artist, album)| {
        CarouselItem::new(id, name)
            .with_artist(artist)
            .with_album(album)
    })
    .collect()
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Infinite carousel engine driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct SourceArgs {
    /// JSON array of items. A demo playlist is used when omitted.
    #[arg(short, long)]
    items: Option<PathBuf>,
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn load(&self) -> carousel_core::Result<(Vec<CarouselItem>, CarouselConfig)> {
        let items = match &self.items {
            Some(path) => load_items(path)?,
            None => demo_items(),
        };
        let config = match &self.config {
            Some(path) => CarouselConfig::from_path(path)?,
            None => CarouselConfig::default(),
        };
        Ok((items, config))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the extended sequence and metrics for a container width.
    Layout {
        #[command(flatten)]
        source: SourceArgs,
        /// Container width in pixels.
        #[arg(short, long, default_value_t = 800.0)]
        width: f64,
    },
    /// Run the autoplay loop on a synthetic strip and log what happens.
    Simulate {
        #[command(flatten)]
        source: SourceArgs,
        /// Container width in pixels.
        #[arg(short, long, default_value_t = 800.0)]
        width: f64,
        /// Simulated duration in seconds.
        #[arg(short, long, default_value_t = 30.0)]
        seconds: f64,
        /// Frames per second delivered to the engine.
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Start hovering the strip at this time, in seconds.
        #[arg(long)]
        hover_at: Option<f64>,
        /// How long the hover lasts, in seconds.
        #[arg(long, default_value_t = 5.0)]
        hover_for: f64,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
