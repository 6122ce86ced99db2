//! # Commands/Replies
//! Commands read from the player, one per line, and the replies sent back.

use std::borrow::Cow;

use thiserror::Error;

use crate::{
    engine::{GameStatus, LegalMoves},
    game::colour::Colour,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError<'a> {
    #[error("Unknown command verb: {0}")]
    UnknownCommandVerb(Cow<'a, str>),
    #[error("Empty command")]
    EmptyCommand,
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid parameter: expected {expected}, got {got}")]
    InvalidParameter {
        got: Cow<'a, str>,
        expected: &'static str,
    },
}

/// Commands that can be sent to a game session.
#[derive(Clone, PartialEq, Debug)]
pub enum Command<'a> {
    /// Plays a move in engine notation.
    Move(Cow<'a, str>),
    /// Pointer pressed at screen coordinates.
    Press { x: f32, y: f32 },
    /// Pointer moved.
    Drag { x: f32, y: f32 },
    /// Pointer released.
    Release { x: f32, y: f32 },
    /// Drag abandoned.
    Cancel,
    View(isize),
    Back,
    Forward,
    Return,
    Branch,
    NewGame,
    ShowBoard(Option<Colour>),
    ShowHistory,
    ShowLegalMoves,
    ShowStatus,
    Help,
    Quit,
}
impl std::fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Move(m) => writeln!(f, "move {m}"),
            Self::Press { x, y } => writeln!(f, "press {x} {y}"),
            Self::Drag { x, y } => writeln!(f, "drag {x} {y}"),
            Self::Release { x, y } => writeln!(f, "release {x} {y}"),
            Self::Cancel => writeln!(f, "cancel"),
            Self::View(index) => writeln!(f, "view {index}"),
            Self::Back => writeln!(f, "back"),
            Self::Forward => writeln!(f, "forward"),
            Self::Return => writeln!(f, "return"),
            Self::Branch => writeln!(f, "branch"),
            Self::NewGame => writeln!(f, "new"),
            Self::ShowBoard(Some(colour)) => writeln!(f, "board {colour}"),
            Self::ShowBoard(None) => writeln!(f, "board"),
            Self::ShowHistory => writeln!(f, "history"),
            Self::ShowLegalMoves => writeln!(f, "legal"),
            Self::ShowStatus => writeln!(f, "status"),
            Self::Help => writeln!(f, "help"),
            Self::Quit => writeln!(f, "quit"),
        }
    }
}
impl<'a> Command<'a> {
    /// Parses a command from a single line.
    pub fn parse(s: &'a str) -> Result<Self, CommandError<'a>> {
        let mut tokens = s.split_whitespace();
        match tokens.next().ok_or(CommandError::EmptyCommand)? {
            "move" | "m" => Ok(Command::Move(Cow::Borrowed(
                tokens.next().ok_or(CommandError::MissingParameter("<move>"))?,
            ))),
            "press" => {
                let (x, y) = parse_point(&mut tokens)?;
                Ok(Command::Press { x, y })
            }
            "drag" => {
                let (x, y) = parse_point(&mut tokens)?;
                Ok(Command::Drag { x, y })
            }
            "release" => {
                let (x, y) = parse_point(&mut tokens)?;
                Ok(Command::Release { x, y })
            }
            "cancel" => Ok(Command::Cancel),
            "view" => {
                let index = tokens.next().ok_or(CommandError::MissingParameter("<index>"))?;
                index
                    .parse()
                    .map(Command::View)
                    .map_err(|_| CommandError::InvalidParameter {
                        got: Cow::Borrowed(index),
                        expected: "a move index",
                    })
            }
            "back" => Ok(Command::Back),
            "forward" => Ok(Command::Forward),
            "return" => Ok(Command::Return),
            "branch" => Ok(Command::Branch),
            "new" => Ok(Command::NewGame),
            "board" => match tokens.next() {
                None => Ok(Command::ShowBoard(None)),
                Some(side) => side
                    .parse()
                    .map(|colour| Command::ShowBoard(Some(colour)))
                    .map_err(|_| CommandError::InvalidParameter {
                        got: Cow::Borrowed(side),
                        expected: "[white | black]",
                    }),
            },
            "history" => Ok(Command::ShowHistory),
            "legal" => Ok(Command::ShowLegalMoves),
            "status" => Ok(Command::ShowStatus),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            verb => Err(CommandError::UnknownCommandVerb(Cow::Borrowed(verb))),
        }
    }
}

fn parse_point<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<(f32, f32), CommandError<'a>> {
    let mut coordinate = |name: &'static str| -> Result<f32, CommandError<'a>> {
        let token = tokens.next().ok_or(CommandError::MissingParameter(name))?;
        token.parse().map_err(|_| CommandError::InvalidParameter {
            got: Cow::Borrowed(token),
            expected: "a number",
        })
    };
    let x = coordinate("<x>")?;
    let y = coordinate("<y>")?;
    Ok((x, y))
}

/// Replies sent back after each command.
#[derive(Clone, PartialEq, Debug)]
pub enum Reply {
    Board(String),
    History {
        pairs: Vec<(usize, String, Option<String>)>,
        current: isize,
    },
    LegalMoves(LegalMoves),
    Status {
        status: GameStatus,
        turn: Colour,
        index: isize,
        viewing: bool,
    },
    Info(String),
    Error(String),
    Help,
}
impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Board(board) => write!(f, "{board}"),
            Self::History { pairs, current } => {
                if pairs.is_empty() {
                    return writeln!(f, "no moves");
                }
                // The cursor marks the last displayed half-move.
                let marker = |index: isize| if index == *current { "*" } else { "" };
                for (number, white, black) in pairs {
                    let white_index = (*number as isize - 1) * 2;
                    write!(f, "{number}. {white}{}", marker(white_index))?;
                    if let Some(black) = black {
                        write!(f, " {black}{}", marker(white_index + 1))?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
            Self::LegalMoves(moves) => {
                let moves: Vec<String> = moves
                    .iter()
                    .map(|(from, to)| format!("{from}{to}"))
                    .collect();
                writeln!(f, "{}", moves.join(" "))
            }
            Self::Status {
                status,
                turn,
                index,
                viewing,
            } => writeln!(
                f,
                "{status}, {turn} to move, move index {index}{}",
                if *viewing { " (viewing history)" } else { "" }
            ),
            Self::Info(message) => writeln!(f, "{message}"),
            Self::Error(message) => writeln!(f, "error: {message}"),
            Self::Help => {
                writeln!(f, "move <e2e4>        play a move")?;
                writeln!(f, "press <x> <y>      pick up the piece under the pointer")?;
                writeln!(f, "drag <x> <y>       move the pointer")?;
                writeln!(f, "release <x> <y>    drop the piece")?;
                writeln!(f, "cancel             abandon the drag")?;
                writeln!(f, "view <index>       view the position after a move (-1 for the start)")?;
                writeln!(f, "back | forward     step through history")?;
                writeln!(f, "return             go back to the latest move")?;
                writeln!(f, "branch             play on from the viewed position")?;
                writeln!(f, "new                start a new game")?;
                writeln!(f, "board [side]       show the board")?;
                writeln!(f, "history | legal | status | help | quit")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(
            Command::parse("move e2e4"),
            Ok(Command::Move(Cow::Borrowed("e2e4")))
        );
        assert_eq!(Command::parse("  view -1 "), Ok(Command::View(-1)));
        assert_eq!(
            Command::parse("press 10.5 20"),
            Ok(Command::Press { x: 10.5, y: 20.0 })
        );
        assert_eq!(
            Command::parse("board black"),
            Ok(Command::ShowBoard(Some(Colour::Black)))
        );
        assert_eq!(Command::parse("board"), Ok(Command::ShowBoard(None)));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Command::parse("   "), Err(CommandError::EmptyCommand));
        assert_eq!(
            Command::parse("castle"),
            Err(CommandError::UnknownCommandVerb(Cow::Borrowed("castle")))
        );
        assert_eq!(
            Command::parse("move"),
            Err(CommandError::MissingParameter("<move>"))
        );
        assert_eq!(
            Command::parse("release 3"),
            Err(CommandError::MissingParameter("<y>"))
        );
        assert!(matches!(
            Command::parse("view two"),
            Err(CommandError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn display_round_trips() {
        for line in ["move e7e8q", "view 3", "board white", "history", "release 1 2"] {
            let command = Command::parse(line).unwrap();
            assert_eq!(command.to_string(), format!("{line}\n"));
        }
    }

    #[test]
    fn history_marks_cursor() {
        let reply = Reply::History {
            pairs: vec![
                (1, "e2e4".to_string(), Some("e7e5".to_string())),
                (2, "Ng1f3".to_string(), None),
            ],
            current: 1,
        };
        assert_eq!(reply.to_string(), "1. e2e4 e7e5*\n2. Ng1f3\n");
    }
}
