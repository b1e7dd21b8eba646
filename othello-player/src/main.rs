//! Play Othello in the terminal, against the computer, or with a peer over TCP.

use async_std::task;
use clap::Parser;
use othello_engine::{Game, Position, Side};
use othello_player::connectors::{Connector, RelayConnector, Seat};
use othello_player::{save, Session, SessionError, SessionOutcome, DEFAULT_SAVE_PATH};
use std::path::PathBuf;
use std::process::ExitCode;

/// Othello with undo, save files and a network relay.
#[derive(Parser)]
#[command(name = "othello")]
#[command(about = "Play Othello in the terminal, against the computer or over the network")]
struct Args {
    /// Who plays Black: human, uniform, greedy or positional
    #[arg(long, default_value = "human")]
    black: Seat,

    /// Who plays White: human, uniform, greedy or positional
    #[arg(long, default_value = "human")]
    white: Seat,

    /// Seed for computer players, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Resume from a save file
    #[arg(long)]
    load: Option<PathBuf>,

    /// File written by a bare `save` command
    #[arg(long, default_value = DEFAULT_SAVE_PATH)]
    save_path: PathBuf,

    /// Host a network game on this address and play Black
    #[arg(long, conflicts_with_all = ["join", "white"])]
    host: Option<String>,

    /// Join a network game at this address and play White
    #[arg(long, conflicts_with = "black")]
    join: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    match task::block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), SessionError> {
    let position = match &args.load {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading game");
            save::load_position(path).await?
        }
        None => Position::default(),
    };

    // Give the two computer seats different streams from the same seed.
    let black_seed = args.seed;
    let white_seed = args.seed.map(|seed| seed.wrapping_add(1));

    let (black, white): (Box<dyn Connector>, Box<dyn Connector>) = match (&args.host, &args.join) {
        (Some(addr), _) => {
            let peer: Box<dyn Connector> = Box::new(RelayConnector::host(addr.as_str()).await?);
            (args.black.connector(Side::Black, black_seed), peer)
        }
        (None, Some(addr)) => {
            let peer: Box<dyn Connector> = Box::new(RelayConnector::join(addr.as_str()).await?);
            (peer, args.white.connector(Side::White, white_seed))
        }
        (None, None) => (
            args.black.connector(Side::Black, black_seed),
            args.white.connector(Side::White, white_seed),
        ),
    };

    let outcome = Session::new(Game::from_position(position), black, white)
        .with_save_path(args.save_path)
        .run()
        .await?;

    report(&outcome);
    Ok(())
}

fn report(outcome: &SessionOutcome) {
    let board = outcome.game().board();
    println!("\n{}\n", board.pretty());

    if let SessionOutcome::Quit { side, .. } = outcome {
        println!("{} left the game.", side);
    }

    println!(
        "Final score - Black: {}, White: {}",
        board.count(Side::Black),
        board.count(Side::White)
    );

    if let SessionOutcome::Finished(game) = outcome {
        match game.winner() {
            Some(winner) => println!("Winner: {}.", winner),
            None => println!("Draw."),
        }
    }
}
