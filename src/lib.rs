use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Jack,
    Queen,
    King,
    Ten,
    Ace,
}

impl Rank {
    /// Card points counted toward the 66 needed to win a round.
    pub fn points(self) -> u32 {
        match self {
            Rank::Jack => 2,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ten => "Ten",
            Rank::Ace => "Ace",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn points(&self) -> u32 {
        self.rank.points()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// Return the 20-card Schnapsen deck in canonical order, suit-major and
/// rank-minor. Shuffling happens in [`stock::Stock::shuffled`].
pub fn deck() -> Vec<Card> {
    use Rank::*;
    use Suit::*;
    let mut cards = Vec::with_capacity(20);
    let ranks = [Jack, Queen, King, Ten, Ace];
    for &suit in &[Clubs, Diamonds, Hearts, Spades] {
        for &rank in &ranks {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

/// Index of a participant, stable across turn rotation: 0 or 1.
pub type Seat = usize;

/// Failures that indicate a defect in the calling code, not a recoverable
/// game situation. Illegal human selections are re-requested at the prompt
/// and never reach these paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("card not in hand: {0}")]
    CardNotFound(Card),
    #[error("no trump jack in hand")]
    NoTrumpJack,
    #[error("trump exchange unavailable: the stock is closed")]
    ExchangeUnavailable,
    #[error("no couple of {0} in hand")]
    InvalidMarriage(Suit),
}


pub mod game;
pub mod hand;
pub mod notice;
pub mod player;
pub mod stock;
