//! `slateboard <board.json> [config.json]`: print what the board viewport
//! would show for a saved board, as JSON draw commands.

use slateboard_app::{ViewportId, Whiteboard, WhiteboardResult, load_config};
use slateboard_core::BoardConfig;
use slateboard_render::CommandRecorder;
use std::process::ExitCode;

fn run(board_path: &str, config_path: Option<&str>) -> WhiteboardResult<String> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => BoardConfig::default(),
    };
    let margin = config.fit_margin;
    let mut whiteboard = Whiteboard::new(config)?;

    let json = std::fs::read_to_string(board_path)?;
    whiteboard.load_json(&json)?;
    log::info!(
        "Loaded {} vectors from {board_path}",
        whiteboard.board().store.len()
    );
    if !whiteboard.fit_to_content(ViewportId::Board, margin) {
        log::warn!("{board_path} holds no committed vectors");
    }

    let mut recorder = CommandRecorder::new();
    whiteboard.render(ViewportId::Board, &mut recorder)?;
    Ok(serde_json::to_string_pretty(&recorder.last_frame())?)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(board_path) = args.get(1) else {
        eprintln!("usage: slateboard <board.json> [config.json]");
        return ExitCode::from(2);
    };

    match run(board_path, args.get(2).map(String::as_str)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
