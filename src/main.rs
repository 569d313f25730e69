use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use schnapsen::game::{round_win_value, GameState, WINNING_POINTS};
use schnapsen::notice::{Notice, NoticeSink, RoundEndReason};
use schnapsen::player::{HeuristicPlayer, HumanPlayer, TurnProvider};
use schnapsen::{GameError, Seat};

/// Schnapsen, a trick-taking card game for two players.
#[derive(Parser)]
#[command(about = "Schnapsen, a two-player trick-taking card game")]
struct Args {
    /// Name of the first player
    #[arg(long, default_value = "Human")]
    name: String,

    /// Name of the second player
    #[arg(long, default_value = "Computer")]
    opponent: String,

    /// Number of human players; 0 lets the computer play itself
    #[arg(long, default_value_t = 1)]
    humans: usize,

    /// Cosmetic delay between moves, in milliseconds
    #[arg(long, default_value_t = 1500)]
    delay_ms: u64,
}

/// Renders core notices on the terminal, addressing the human as "you".
struct ConsolePresenter {
    names: [String; 2],
    human: [bool; 2],
    delay: Duration,
}

impl ConsolePresenter {
    fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl NoticeSink for ConsolePresenter {
    fn notice(&mut self, notice: Notice) {
        match notice {
            Notice::Shuffled { trump_card } => {
                println!("The cards are shuffled. Trump card: {}", trump_card);
                println!();
            }
            Notice::CardDrawn { seat, card } => {
                if self.human[seat] {
                    println!("You draw a card: {}", card);
                } else {
                    println!("{} draws a card.", self.names[seat]);
                }
            }
            Notice::StockLow => {
                println!();
                println!("There are only two more cards in the stock.");
                println!();
            }
            Notice::StockExhausted => {
                println!();
                println!("The last card has been drawn!");
                println!("Players must match suits and take tricks if they can.");
            }
            Notice::StockClosed => {
                println!("The stock is closed. Players can't draw any more cards.");
                println!("Players must match suits and take tricks if they can.");
            }
            Notice::TrumpExchanged { seat, taken, new_trump } => {
                println!();
                if self.human[seat] {
                    println!("< You take the {}.", taken);
                } else {
                    println!("< {} takes the {}.", self.names[seat], taken);
                }
                println!("New trump card: {}", new_trump);
            }
            Notice::CardPlayed { seat, card } => {
                self.pause();
                if self.human[seat] {
                    println!("> You play the {}.", card);
                } else {
                    println!("> {} plays the {}.", self.names[seat], card);
                }
            }
            Notice::MarriageDeclared { seat, suit, points, pending } => {
                if self.human[seat] {
                    println!("You marry the couple of {} ({} points).", suit, points);
                } else {
                    println!("{} marries the couple of {} ({} points).", self.names[seat], suit, points);
                }
                if pending {
                    println!("Points will be added after the first trick taken.");
                }
            }
            Notice::MarriageBanked { .. } => {
                println!("Marriage points added.");
            }
            Notice::TrickTaken { seat } => {
                self.pause();
                println!();
                if self.human[seat] {
                    println!("You take this trick.");
                } else {
                    println!("{} takes this trick.", self.names[seat]);
                }
            }
            Notice::PointsUpdated { seat, points } => {
                if self.human[seat] {
                    println!("Your points: {} / {}", points, WINNING_POINTS);
                } else {
                    println!("{}'s points: {} / {}", self.names[seat], points, WINNING_POINTS);
                }
            }
            Notice::RoundOver { reason: RoundEndReason::Exhausted, .. } => {
                println!();
                println!("We've run out of cards.");
                println!("The player who took the last trick wins.");
            }
            Notice::RoundOver { reason: RoundEndReason::Victory, .. } => {}
        }
    }
}

fn read_line() -> String {
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().to_string()
}

/// Declare the round winner, raise the score, and show the results.
fn show_results(game: &mut GameState, winner: Seat, presenter: &ConsolePresenter) {
    println!();
    if presenter.human[winner] {
        println!("You WIN this round!");
    } else {
        println!("{} WINS this round!", game.players[winner].name);
    }
    if presenter.human.iter().any(|&h| h) {
        print!("Press Enter to see the results. ");
        io::stdout().flush().unwrap();
        read_line();
    }

    let loser_points = game.players[1 - winner].points;
    game.players[winner].score += round_win_value(loser_points);

    println!();
    println!("POINTS");
    let mut by_points: Vec<_> = game.players.iter().collect();
    by_points.sort_by(|a, b| b.points.cmp(&a.points));
    for player in by_points {
        println!("{}: {}", player.name, player.points);
    }

    println!();
    println!("TOTAL SCORE");
    let mut by_score: Vec<_> = game.players.iter().collect();
    by_score.sort_by(|a, b| b.score.cmp(&a.score));
    for player in by_score {
        println!("{}: {}", player.name, player.score);
    }
}

fn main() -> Result<(), GameError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    println!("SCHNAPSEN");
    println!();
    println!(
        "Welcome, {} and {}! {}, you will begin.",
        args.name, args.opponent, args.name
    );

    let mut game = GameState::new([&args.name, &args.opponent]);
    let mut presenter = ConsolePresenter {
        names: [args.name.clone(), args.opponent.clone()],
        human: [args.humans >= 1, args.humans >= 2],
        delay: Duration::from_millis(args.delay_ms),
    };
    let mut providers: [Box<dyn TurnProvider>; 2] = [
        provider_for(presenter.human[0]),
        provider_for(presenter.human[1]),
    ];
    let mut rng = rand::thread_rng();

    loop {
        game.start_round(&mut rng, &mut presenter);
        let outcome = game.play_round(&mut providers, &mut presenter)?;
        show_results(&mut game, outcome.winner(), &presenter);

        let answer = loop {
            println!();
            print!("Start a new game? (y/n) ");
            io::stdout().flush().unwrap();
            let answer = read_line().to_lowercase();
            if answer == "y" || answer == "n" {
                break answer;
            }
        };
        if answer == "n" {
            break;
        }
        println!("Both players will keep their current score.");
    }
    Ok(())
}

fn provider_for(human: bool) -> Box<dyn TurnProvider> {
    if human {
        Box::new(HumanPlayer)
    } else {
        Box::new(HeuristicPlayer)
    }
}
