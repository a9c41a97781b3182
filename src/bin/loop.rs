use std::path::PathBuf;
use std::process;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use loop_wm::common::config::{Config, config_file, keybinds_file};
use loop_wm::common::log;
use loop_wm::placement::keybinds;
use loop_wm::placement::snap::{classify_drag, classify_radial};
use loop_wm::placement::{Direction, FrameResolver, PlacementContext, WindowAction};
use loop_wm::sys::geometry::{Point, Rect};
use loop_wm::sys::window::{WindowId, WindowSnapshot};
use tracing::debug;

#[derive(Parser)]
#[command(about = "Window placement calculations, without touching any windows")]
struct Cli {
    /// Path to configuration file to use (overrides default).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Log level for our own crates, e.g. `debug` or `trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the frame a direction resolves to.
    Resolve {
        /// Direction tag, e.g. `topLeftQuarter`.
        direction: String,
        /// Screen bounds as `x,y,width,height`.
        #[arg(long, value_parser = parse_rect)]
        bounds: Rect,
        /// Current window frame as `x,y,width,height`.
        #[arg(long, value_parser = parse_rect)]
        window: Option<Rect>,
        /// Resolve as a preview, ignoring the screen padding.
        #[arg(long)]
        preview: bool,
    },
    /// Print the radial menu direction under a pointer.
    Radial {
        /// Where the menu was opened, as `x,y`.
        #[arg(long, value_parser = parse_point)]
        origin: Point,
        #[arg(long, value_parser = parse_point)]
        pointer: Point,
    },
    /// Print the snap direction for a dragged window's pointer.
    Snap {
        #[arg(long, value_parser = parse_point)]
        pointer: Point,
        #[arg(long, value_parser = parse_rect)]
        bounds: Rect,
        /// Direction currently shown, for the bottom edge's two-thirds.
        #[arg(long)]
        current: Option<String>,
    },
    /// Inspect keybind files.
    Keybinds {
        #[command(subcommand)]
        command: KeybindCommands,
    },
    /// Check the configuration file for problems.
    Validate,
}

#[derive(Subcommand)]
enum KeybindCommands {
    /// Load a keybind file and report conflicts.
    Check { path: Option<PathBuf> },
    /// Write the default keybinds, to stdout when no path is given.
    ExportDefaults { path: Option<PathBuf> },
}

fn main() {
    let opt = Cli::parse();
    log::init_logging_with(opt.log_level.as_deref());

    if let Err(e) = run(opt) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

fn run(opt: Cli) -> anyhow::Result<()> {
    let config_path = opt.config.or_else(config_file);
    let config = Config::read_or_default(config_path.as_deref())
        .with_context(|| format!("failed to read config {config_path:?}"))?;

    match opt.command {
        Commands::Resolve { direction, bounds, window, preview } => {
            let direction = direction_from_tag(&direction)?;
            let window = window.map(|frame| WindowSnapshot { id: WindowId(0), frame });
            let resolver = FrameResolver::new(&config.settings, Some(bounds));
            let mut ctx = PlacementContext::new();
            let frame = resolver.resolve(
                &mut ctx,
                &WindowAction::new(direction),
                window.as_ref(),
                bounds,
                preview,
            );
            println!("{}", serde_json::to_string(&frame)?);
        }
        Commands::Radial { origin, pointer } => {
            let direction = classify_radial(origin, pointer, &config.settings.radial_menu);
            println!("{}", direction.kind().tag());
        }
        Commands::Snap { pointer, bounds, current } => {
            let current = match current {
                Some(tag) => direction_from_tag(&tag)?,
                None => Direction::NoAction,
            };
            let direction = classify_drag(pointer, bounds, &config.settings.snapping, &current);
            println!("{}", direction.kind().tag());
        }
        Commands::Keybinds { command: KeybindCommands::Check { path } } => {
            let Some(path) = path.or_else(keybinds_file) else {
                bail!("no keybind file given and no home directory to look in");
            };
            let actions = keybinds::load(&path)?;
            let issues = keybinds::check(&actions);
            debug!(count = actions.len(), "loaded keybinds");
            if !issues.is_empty() {
                for issue in issues {
                    eprintln!("{issue}");
                }
                process::exit(1);
            }
            println!("{} keybinds ok", actions.len());
        }
        Commands::Keybinds { command: KeybindCommands::ExportDefaults { path } } => {
            let defaults = keybinds::default_keybinds();
            match path {
                Some(path) => keybinds::save(&path, &defaults)?,
                None => println!("{}", keybinds::export(&defaults)?),
            }
        }
        Commands::Validate => {
            let issues = config.validate();
            if issues.is_empty() {
                println!("Config validation passed");
            } else {
                for issue in issues {
                    eprintln!("{issue}");
                }
                process::exit(1);
            }
        }
    }
    Ok(())
}

fn direction_from_tag(tag: &str) -> anyhow::Result<Direction> {
    let kind = keybinds::parse_direction(tag)?;
    match Direction::from_kind(kind) {
        Some(direction) => Ok(direction),
        None => bail!("`{tag}` needs more than a tag; use a keybind file"),
    }
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("`{p}`: {e}")))
        .collect::<Result<_, _>>()?;
    parts.try_into().map_err(|_| format!("expected {N} comma separated numbers, got `{s}`"))
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x, y, w, h] = parse_numbers::<4>(s)?;
    Ok(Rect::new(x, y, w, h))
}

fn parse_point(s: &str) -> Result<Point, String> {
    let [x, y] = parse_numbers::<2>(s)?;
    Ok(Point::new(x, y))
}
