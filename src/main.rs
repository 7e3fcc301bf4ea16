#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::fs::OpenOptions;
use std::path::Path;

const LOG_FILE: &str = "midi_track_processor.log";

fn main() -> eframe::Result {
    // Debug utility: print per-track summaries and exit.
    // Usage:
    //   midi_track_processor --tracks <input.mid>
    {
        let argv: Vec<String> = std::env::args().skip(1).collect();
        if argv.first().map(String::as_str) == Some("--tracks") {
            let input = argv
                .get(1)
                .cloned()
                .expect("Missing input path for --tracks");

            let doc = match midi_track_processor::midi::MidiDocument::open(Path::new(&input)) {
                Ok(doc) => doc,
                Err(e) => {
                    eprintln!("Error loading MIDI file: {e}");
                    std::process::exit(1);
                }
            };

            for summary in midi_track_processor::midi::summary::summarize_tracks(&doc) {
                let kinds = summary
                    .message_counts
                    .iter()
                    .map(|(kind, count)| format!("{kind}: {count}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "Track {}: {} ({} messages; {})",
                    summary.index,
                    summary.name,
                    summary.message_total(),
                    kinds
                );
            }
            return Ok(());
        }
    }

    init_logging();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "MIDI Track Processor",
        native_options,
        Box::new(|cc| Ok(Box::new(midi_track_processor::App::new(cc)))),
    )
}

/// Operator-facing append-only log file with timestamped lines; falls back
/// to stderr when the file cannot be opened. `RUST_LOG` still controls the
/// level.
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => env_logger::Builder::from_env(env)
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init(),
        Err(_) => env_logger::Builder::from_env(env).init(),
    }
}
