use std::env;
use std::fs;
use std::process;

use keyfall::clock::{FrameOutcome, ManualTime, Playhead};
use keyfall::render::BackgroundImage;
use keyfall::{FrameQueue, KeyfallError, Piece, Player, RenderConfig, Renderer, Surface};

const USAGE: &str = "Usage: keyfall [--config FILE] [--size WxH] (--demo NAME | <piece.yaml>) [--at SECONDS | --simulate FPS]
       keyfall --list";

struct Options {
    source: Source,
    config_path: Option<String>,
    surface: Surface,
    mode: Mode,
}

enum Source {
    Demo(String),
    File(String),
}

enum Mode {
    Frame(f64),
    Simulate(f64),
}

fn usage_exit() -> ! {
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn parse_number(flag: &str, value: Option<&String>) -> f64 {
    match value.and_then(|v| v.parse::<f64>().ok()) {
        Some(n) if n.is_finite() => n,
        _ => {
            eprintln!("{} expects a number", flag);
            usage_exit();
        }
    }
}

fn parse_size(value: Option<&String>) -> Surface {
    let parsed = value.and_then(|v| {
        let (w, h) = v.split_once('x')?;
        Some(Surface::new(w.parse().ok()?, h.parse().ok()?))
    });
    match parsed {
        Some(surface) if surface.is_drawable() => surface,
        _ => {
            eprintln!("--size expects WIDTHxHEIGHT, e.g. 1280x720");
            usage_exit();
        }
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut source = None;
    let mut config_path = None;
    let mut surface = Surface::new(1280.0, 720.0);
    let mut mode = Mode::Frame(0.0);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--demo" => {
                i += 1;
                let name = args.get(i).cloned().unwrap_or_else(|| usage_exit());
                source = Some(Source::Demo(name));
            }
            "--config" => {
                i += 1;
                config_path = Some(args.get(i).cloned().unwrap_or_else(|| usage_exit()));
            }
            "--size" => {
                i += 1;
                surface = parse_size(args.get(i));
            }
            "--at" => {
                i += 1;
                mode = Mode::Frame(parse_number("--at", args.get(i)));
            }
            "--simulate" => {
                i += 1;
                let fps = parse_number("--simulate", args.get(i));
                if fps <= 0.0 {
                    eprintln!("--simulate expects a positive frame rate");
                    usage_exit();
                }
                mode = Mode::Simulate(fps);
            }
            flag if flag.starts_with("--") => {
                eprintln!("Unknown option '{}'", flag);
                usage_exit();
            }
            path => source = Some(Source::File(path.to_string())),
        }
        i += 1;
    }

    let source = source.unwrap_or_else(|| usage_exit());
    Options {
        source,
        config_path,
        surface,
        mode,
    }
}

fn load_piece(source: &Source) -> Result<Piece, KeyfallError> {
    match source {
        Source::Demo(name) => keyfall::load_demo(name),
        Source::File(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                KeyfallError::PieceParse(format!("cannot read '{}': {}", path, e))
            })?;
            keyfall::load_piece(&content)
        }
    }
}

fn load_config(path: Option<&str>) -> Result<RenderConfig, KeyfallError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                KeyfallError::ConfigError(format!("cannot read '{}': {}", path, e))
            })?;
            RenderConfig::from_yaml(&content)
        }
        None => Ok(RenderConfig::default()),
    }
}

/// The terminal host only checks that a local image exists; otherwise the gradient is drawn.
fn load_background(renderer: &Renderer) -> bool {
    let Some(source) = renderer.config().background.clone() else {
        return false;
    };
    match fs::metadata(&source) {
        Ok(_) => renderer.background().fill(BackgroundImage { source }),
        Err(e) => {
            log::debug!("background image unavailable, using gradient: {}: {}", source, e);
            false
        }
    }
}

fn print_frame(renderer: &Renderer, piece: &Piece, at: f64, surface: Surface) {
    // Clamp the same way a seek would
    let at = at.clamp(0.0, piece.total_duration());
    let frame = renderer.render(piece, Playhead::at(at), surface);
    match serde_json::to_string_pretty(&frame) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing frame: {}", e);
            process::exit(1);
        }
    }
}

/// Play the piece on simulated time at a fixed frame rate.
fn simulate(renderer: &Renderer, piece: &Piece, fps: f64, surface: Surface) {
    let mut player = Player::new(ManualTime::new(), FrameQueue::new(), piece.total_duration());
    let frame_interval = 1.0 / fps;
    let mut frames = 0usize;
    let mut next_report = 0.0;

    player.play();
    loop {
        player.clock().time_source().advance(frame_interval);
        let tokens = player.scheduler_mut().drain();
        if tokens.is_empty() {
            break;
        }
        for token in tokens {
            let outcome = player.on_frame(token);
            let rendered = renderer.render(piece, player.clock().playhead(), surface);
            frames += 1;
            if rendered.current_time >= next_report || outcome == FrameOutcome::Finished {
                println!(
                    "t={:7.3}s  notes={:3}  keys={:?}",
                    rendered.current_time, rendered.visible_notes, rendered.active_pitches
                );
                next_report += 1.0;
            }
        }
    }

    println!(
        "finished: {} frames, current_time={:.3}s, playing={}",
        frames,
        player.clock().current_time(),
        player.clock().is_playing()
    );
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage_exit();
    }

    if args[1] == "--list" {
        for name in keyfall_pieces::list_pieces() {
            println!("{}", name);
        }
        return;
    }

    let options = parse_args(&args);

    let config = match load_config(options.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let piece = match load_piece(&options.source) {
        Ok(piece) => piece,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    };
    log::info!(
        "{}: {} notes over {:.2}s",
        piece.title.as_deref().unwrap_or("untitled"),
        piece.note_count(),
        piece.total_duration()
    );

    let renderer = Renderer::new(config);
    load_background(&renderer);

    match options.mode {
        Mode::Frame(at) => print_frame(&renderer, &piece, at, options.surface),
        Mode::Simulate(fps) => simulate(&renderer, &piece, fps, options.surface),
    }
}
