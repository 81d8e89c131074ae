use clap::Parser;
use replay_rs::config::ViewerConfig;
use replay_rs::panel::{CopyAction, Facet};
use replay_rs::render::format::{format_clock, format_duration};
use replay_rs::store::DiskStore;
use replay_rs::timeline::ClockSource;
use replay_rs::viewer::Viewer;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(
    name = "replay-view",
    about = "Replay a recorded browser session's console and network logs against a playback clock"
)]
struct Args {
    /// Directory holding recordings (`<data-dir>/<id>/...`)
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Recording id (lowercase hex)
    #[arg(long)]
    id: String,

    /// Seek to this media time (ms) before reporting
    #[arg(long)]
    at_ms: Option<i64>,

    /// Simulate playback for this many wall-clock ms (after any seek)
    #[arg(long)]
    play_ms: Option<u64>,

    /// Wall-clock step of the simulated playback loop (ms)
    #[arg(long, default_value_t = 50)]
    step_ms: u64,

    /// Playback rate for the simulated run
    #[arg(long, default_value_t = 1.0)]
    rate: f64,

    /// Console facet: all, log, info, warn, error, debug, exception, browser
    #[arg(long)]
    console_facet: Option<String>,

    /// Network facet: all, fetch, js, css, img, doc, font, media, ws, other
    #[arg(long)]
    network_facet: Option<String>,

    /// Open the detail pane of this network row
    #[arg(long)]
    open_network: Option<usize>,

    /// Open the frame list of this WebSocket connection
    #[arg(long)]
    open_ws: Option<usize>,

    /// Open the detail pane of this console row
    #[arg(long)]
    open_console: Option<usize>,

    /// Print the cURL command of the open network row
    #[arg(long)]
    print_curl: bool,

    /// Write a JSON snapshot of the viewer state to this file
    #[arg(long)]
    snapshot_json: Option<PathBuf>,

    /// Viewer config JSON (all fields optional)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ViewerConfig::load(path).unwrap_or_else(|e| fail(e)),
        None => ViewerConfig::default(),
    };

    let store = DiskStore::new(&args.data_dir);
    let snapshot = store.load(&args.id).unwrap_or_else(|e| fail(e));
    let mut viewer = Viewer::from_snapshot(&snapshot, &config);

    if let Some(panel) = viewer.console_mut() {
        if let Some(facet) = &args.console_facet {
            panel.set_facet(Facet::parse(facet));
        }
        if let Some(row) = args.open_console {
            panel.toggle_detail(row).unwrap_or_else(|e| fail(e));
        }
    }
    if let Some(panel) = viewer.network_mut() {
        if let Some(facet) = &args.network_facet {
            panel.set_facet(Facet::parse(facet));
        }
        if let Some(row) = args.open_network {
            panel.toggle_detail(row).unwrap_or_else(|e| fail(e));
        }
        if let Some(conn) = args.open_ws {
            panel.toggle_ws_detail(conn).unwrap_or_else(|e| fail(e));
        }
    }

    if let Some(ms) = args.at_ms {
        viewer.seek(ms);
    }
    if let Some(wall_ms) = args.play_ms {
        viewer.clock_mut().set_rate(args.rate);
        let emitted = viewer.play_for(wall_ms, args.step_ms);
        println!("played: {emitted} time updates");
    }

    println!("title: {}", viewer.title());
    if let Some(d) = viewer.duration_ms() {
        println!("duration: {}", format_duration(Some(d)));
    }
    println!("clock: {}", format_clock(viewer.clock().current_time_ms()));
    println!("markers: {}", viewer.markers().len());

    if let Some(panel) = viewer.console() {
        let state = panel.state();
        println!(
            "console: {}/{} shown ({}), active {}",
            panel.displayed_indices().len(),
            panel.rows().len(),
            panel.facet(),
            state
                .reveal
                .active
                .map(|i| i.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    if let Some(panel) = viewer.network() {
        println!("network: {}", panel.summary());
        println!("network shown: {}", panel.displayed_indices().len());
        if args.print_curl {
            if let Some(curl) = panel.copy_text(CopyAction::Curl) {
                println!("{curl}");
            }
        }
    }

    if let Some(path) = args.snapshot_json {
        let json = serde_json::to_string_pretty(&viewer.snapshot()).unwrap_or_else(|e| fail(e));
        fs::write(&path, json).unwrap_or_else(|e| fail(e));
        eprintln!("wrote viewer snapshot to {}", path.display());
    }
}
