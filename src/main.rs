mod app;
mod braille;
mod config;
mod logging;
mod particle;
mod scheduler;
mod settings;
mod simulation;
mod surface;
mod typewriter;
mod ui;

use app::{App, HostEvent};
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use settings::{ParticleSettings, ATTR_EASE, ATTR_QUANTITY, ATTR_STATICITY};
use simulation::{ParticleField, Viewport};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use typewriter::Typewriter;

#[derive(Parser, Debug)]
#[command(name = "particle-field")]
#[command(about = "Drifting, mouse-reactive particle field in the terminal")]
struct Args {
    // === Particle Attributes ===
    /// Number of particles (non-numeric or zero falls back to 30)
    #[arg(short = 'q', long)]
    quantity: Option<String>,

    /// Inverse attraction strength (non-numeric or zero falls back to 50)
    #[arg(short = 's', long)]
    staticity: Option<String>,

    /// Smoothing denominator, higher follows slower (falls back to 50)
    #[arg(short = 'e', long)]
    ease: Option<String>,

    // === Rendering ===
    /// Backing-store pixels per logical pixel (0.25-4.0)
    #[arg(long = "pixel-ratio")]
    pixel_ratio: Option<f64>,

    /// Animation frames per second (1-240)
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for reproducible particle generation
    #[arg(long)]
    seed: Option<u64>,

    /// Typewriter phrase (repeat for several)
    #[arg(long = "phrase")]
    phrases: Vec<String>,

    // === Config & Logging ===
    /// Load configuration from this JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this JSON file and exit
    #[arg(long = "save-config")]
    save_config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

/// Merge command-line arguments over the loaded config
fn apply_args(config: &mut AppConfig, args: &Args) {
    config.set_attribute(ATTR_QUANTITY, args.quantity.clone());
    config.set_attribute(ATTR_STATICITY, args.staticity.clone());
    config.set_attribute(ATTR_EASE, args.ease.clone());

    if let Some(ratio) = args.pixel_ratio {
        config.pixel_ratio = ratio;
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if !args.phrases.is_empty() {
        config.phrases = args.phrases.clone();
    }

    let ratio = if config.pixel_ratio.is_finite() {
        config.pixel_ratio
    } else {
        1.0
    };
    config.pixel_ratio = ratio.clamp(0.25, 4.0);
    config.fps = config.fps.clamp(1, 240);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init_logger(args.log_file.as_deref(), args.log_level.as_deref())?;

    let mut config = AppConfig::load(args.config.as_deref())?;
    apply_args(&mut config, &args);

    if let Some(path) = &args.save_config {
        config.save_to_file(path)?;
        println!("Saved config to {}", path.display());
        return Ok(());
    }

    let settings = ParticleSettings::resolve(&config.attributes);
    let field = match args.seed {
        Some(seed) => ParticleField::with_seed(settings, config.pixel_ratio, seed),
        None => ParticleField::new(settings, config.pixel_ratio),
    };
    let typewriter = Typewriter::new(&config.phrases, config.typewriter);
    let mut app = App::new(field, typewriter, config.fps);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app);
    app.teardown();

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Point the field at the canvas for this terminal size and return the
/// canvas viewport
fn relayout(app: &mut App, width: u16, height: u16) -> Viewport {
    let canvas = ui::canvas_rect(Rect::new(0, 0, width, height), app.fullscreen_mode);
    let (left, top) = ui::canvas_origin(canvas);
    app.field.set_canvas_origin(left, top);
    ui::viewport_for(canvas)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let size = terminal.size()?;
    let viewport = relayout(app, size.width, size.height);
    app.mount(viewport, Instant::now());
    info!("Terminal {}x{}", size.width, size.height);

    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Sleep until the next frame or typewriter step, waking early for input
        while event::poll(app.next_wakeup(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_pause(Instant::now()),
                        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
                        KeyCode::Char('v') | KeyCode::Char('V') => {
                            app.toggle_fullscreen();
                            let size = terminal.size()?;
                            let viewport = relayout(app, size.width, size.height);
                            app.handle_event(HostEvent::Resize(viewport));
                        }
                        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                            app.toggle_help()
                        }
                        KeyCode::Esc if app.show_help => app.toggle_help(),
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                        let (x, y) = ui::pointer_position(mouse.column, mouse.row);
                        app.handle_event(HostEvent::PointerMove { x, y });
                    }
                }
                Event::Resize(width, height) => {
                    let viewport = relayout(app, width, height);
                    app.handle_event(HostEvent::Resize(viewport));
                }
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
}
