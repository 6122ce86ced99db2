use clap::{Parser, Subcommand, ValueEnum};
use retrace::{
    game::colour::Colour,
    protocol::{play_client, ClientConfig},
    session::GameSession,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays a game through standard I/O (DEFAULT)
    Play {
        /// Side shown at the bottom of the board
        #[arg(short, long, value_enum, default_value_t = Side::White)]
        perspective: Side,
        /// Size in pixels of a board cell, for pointer commands
        #[arg(long, default_value_t = 60.0)]
        cell_size: f32,
        /// Does not print a prompt before each command
        #[arg(long)]
        no_prompt: bool,
    },
    /// Plays a list of moves and shows the resulting game
    Replay {
        /// Moves in long algebraic notation (e2e4 e7e5 ...)
        moves: Vec<String>,
        /// Side shown at the bottom of the board
        #[arg(short, long, value_enum, default_value_t = Side::White)]
        perspective: Side,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}
impl From<Side> for Colour {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Colour::White,
            Side::Black => Colour::Black,
        }
    }
}

pub fn main() {
    let args = Arguments::parse();
    env_logger::init();

    let command = args.command.unwrap_or(Command::Play {
        perspective: Side::White,
        cell_size: 60.0,
        no_prompt: false,
    });
    match command {
        Command::Play {
            perspective,
            cell_size,
            no_prompt,
        } => {
            let config = ClientConfig {
                perspective: perspective.into(),
                cell_size,
                prompt: !no_prompt,
            };
            if let Err(e) = play_client(config) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Command::Replay { moves, perspective } => replay(&moves, perspective.into()),
    }
}

fn replay(moves: &[String], perspective: Colour) {
    let mut session = GameSession::new();
    for notation in moves {
        if let Err(e) = session.play_notation(notation) {
            eprintln!("{notation}: {e}");
            break;
        }
    }

    print!("{}", session.current_position().render(perspective));
    for (number, white, black) in session.notation_pairs() {
        println!("{number}. {white} {}", black.unwrap_or_default());
    }
    println!("{}", session.status());
}
