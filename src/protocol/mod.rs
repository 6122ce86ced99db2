//! # Text protocol
//! A line based protocol to play a game from a terminal or another program.
//!
//! ## Constraints and guarantees
//! - all communication is done **through standard I/O**, one command per line
//! - every command gets at least one reply
//! - the implementation is **fault tolerant**: unknown or malformed commands
//!   are reported and ignored, illegal moves never change the game
//! - the only fatal error is a move history that no longer replays, which
//!   ends the session
//!
//! ## Pointer commands
//! `press`, `drag` and `release` take screen coordinates over a virtual board
//! whose top-left corner is at (0, 0), with square cells of the configured
//! size.

use std::io::{Read, Write};

use crate::{
    engine::RulesEngine,
    game::{colour::Colour, notation::notate},
    input::{BoardRect, DragController, DropOutcome},
    session::{GameSession, HistoryError},
};

pub mod commands;
pub mod endpoint;

use commands::{Command, Reply};
use endpoint::{CommandReader, ReplyWriter};

const VIRTUAL_BOARD: BoardRect = BoardRect {
    left: 0.0,
    top: 0.0,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientConfig {
    /// Side shown at the bottom of the board.
    pub perspective: Colour,
    /// Size in pixels of a cell of the virtual board.
    pub cell_size: f32,
    /// Print a prompt before reading each command.
    pub prompt: bool,
}
impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            perspective: Colour::White,
            cell_size: 60.0,
            prompt: true,
        }
    }
}

/// Plays a game over standard I/O.
pub fn play_client(config: ClientConfig) -> std::io::Result<()> {
    let mut session = GameSession::new();
    run(&mut session, config, std::io::stdin(), std::io::stdout())?;
    Ok(())
}

/// Reads commands from `input` until it is exhausted or `quit` is received,
/// and returns the output stream.
pub fn run<E: RulesEngine, I: Read, O: Write>(
    session: &mut GameSession<E>,
    config: ClientConfig,
    input: I,
    output: O,
) -> std::io::Result<O> {
    let mut reader = CommandReader::new(input);
    let mut writer = ReplyWriter::new(output);
    let mut drag = DragController::new(config.cell_size);

    writer.send(Reply::Board(
        session.current_position().render(config.perspective),
    ))?;
    'session: loop {
        if config.prompt {
            writer.prompt()?;
        }
        let Some(line) = reader.read_line()? else {
            break 'session;
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                log::warn!("Failed to parse command {:?}: {e}", line.trim());
                writer.send(Reply::Error(e.to_string()))?;
                continue;
            }
        };
        log::debug!("Received command {command:?}");
        if command == Command::Quit {
            break 'session;
        }

        match execute(command, session, &mut drag, &config) {
            Ok(replies) => {
                for reply in replies {
                    writer.send(reply)?;
                }
            }
            Err(e) => {
                log::error!("Ending session: {e}");
                writer.send(Reply::Error(format!("internal error: {e}")))?;
                return Err(std::io::Error::other(e));
            }
        }
    }

    writer.into_inner()
}

fn execute<E: RulesEngine>(
    command: Command<'_>,
    session: &mut GameSession<E>,
    drag: &mut DragController,
    config: &ClientConfig,
) -> Result<Vec<Reply>, HistoryError> {
    Ok(match command {
        Command::Move(notation) => match session.play_notation(&notation) {
            Ok(mv) => played(session, notate(&mv)),
            Err(rejection) => vec![Reply::Error(rejection.to_string())],
        },
        Command::Press { x, y } => match drag.cell_at(VIRTUAL_BOARD, x, y) {
            Some(cell) if drag.on_gesture_start(&session.current_position(), cell, x, y) => {
                vec![Reply::Info(format!("picked up the piece on {cell}"))]
            }
            Some(cell) => vec![Reply::Error(format!("there is no piece on {cell}"))],
            None => vec![Reply::Error("pressed outside of the board".to_string())],
        },
        Command::Drag { x, y } => {
            drag.on_gesture_move(x, y);
            vec![]
        }
        Command::Release { x, y } => match drag.on_gesture_end(x, y, Some(VIRTUAL_BOARD), session) {
            DropOutcome::Moved(mv) => played(session, notate(&mv)),
            DropOutcome::Rejected(rejection) => vec![Reply::Error(rejection.to_string())],
            DropOutcome::OffBoard => vec![Reply::Info("dropped outside of the board".to_string())],
            DropOutcome::Cancelled => vec![Reply::Info("drag cancelled".to_string())],
            DropOutcome::NoDrag => vec![Reply::Error("no piece is being dragged".to_string())],
        },
        Command::Cancel => {
            drag.cancel();
            vec![Reply::Info("drag cancelled".to_string())]
        }
        Command::View(index) => {
            session.view_position(index)?;
            vec![board(session, config), status(session)]
        }
        Command::Back => {
            session.step_back()?;
            vec![board(session, config), status(session)]
        }
        Command::Forward => {
            session.step_forward()?;
            vec![board(session, config), status(session)]
        }
        Command::Return => {
            session.return_to_current()?;
            vec![board(session, config), status(session)]
        }
        Command::Branch => {
            session.branch_here();
            vec![status(session)]
        }
        Command::NewGame => {
            session.new_game();
            vec![board(session, config)]
        }
        Command::ShowBoard(side) => vec![Reply::Board(
            session
                .current_position()
                .render(side.unwrap_or(config.perspective)),
        )],
        Command::ShowHistory => vec![Reply::History {
            pairs: session.notation_pairs(),
            current: session.current_move_index(),
        }],
        Command::ShowLegalMoves => vec![Reply::LegalMoves(session.legal_moves())],
        Command::ShowStatus => vec![status(session)],
        Command::Help => vec![Reply::Help],
        Command::Quit => vec![],
    })
}

fn board<E: RulesEngine>(session: &GameSession<E>, config: &ClientConfig) -> Reply {
    Reply::Board(session.current_position().render(config.perspective))
}

fn played<E: RulesEngine>(session: &GameSession<E>, notation: String) -> Vec<Reply> {
    let mut replies = vec![Reply::Info(format!("played {notation}"))];
    if session.is_game_over() {
        replies.push(status(session));
    }
    replies
}

fn status<E: RulesEngine>(session: &GameSession<E>) -> Reply {
    Reply::Status {
        status: session.status(),
        turn: session.current_turn(),
        index: session.current_move_index(),
        viewing: session.is_viewing_history(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn transcript(session: &mut GameSession, input: &str) -> String {
        let config = ClientConfig {
            prompt: false,
            ..ClientConfig::default()
        };
        let output = run(session, config, input.as_bytes(), Vec::new()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn plays_and_navigates() {
        let mut session = GameSession::new();
        let out = transcript(
            &mut session,
            "move e2e4\nmove e7e5\nview 0\nmove g1f3\nreturn\nhistory\n",
        );
        assert!(out.contains("played e2e4"));
        assert!(out.contains("played e7e5"));
        assert!(out.contains("error: Moves cannot be played while viewing history"));
        assert!(out.contains("1. e2e4 e7e5*"));
        assert_eq!(session.move_history().len(), 2);
        assert!(!session.is_viewing_history());
    }

    #[test]
    fn pointer_gestures() {
        let mut session = GameSession::new();
        // e2 is row 6, col 4; e4 is row 4, col 4.
        let out = transcript(
            &mut session,
            "press 270 390\ndrag 270 300\nrelease 270 270\npress 10 250\n",
        );
        assert!(out.contains("picked up the piece on e2"));
        assert!(out.contains("played e2e4"));
        assert!(out.contains("there is no piece on a4"));
        assert_eq!(session.move_history().len(), 1);
    }

    #[test]
    fn bad_commands_are_reported() {
        let mut session = GameSession::new();
        let out = transcript(&mut session, "jump\nmove e2e5\nview x\nquit\nmove e2e4\n");
        assert!(out.contains("error: Unknown command verb: jump"));
        assert!(out.contains("error: Illegal move e2e5"));
        assert!(out.contains("error: Invalid parameter"));
        assert!(session.move_history().is_empty());
    }

    #[test]
    fn checkmate_is_announced() {
        let mut session = GameSession::new();
        let out = transcript(&mut session, "m f2f3\nm e7e5\nm g2g4\nm d8h4\nlegal\n");
        assert!(out.contains("checkmate, black wins"));
    }
}
