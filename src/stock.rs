use rand::seq::SliceRandom;
use rand::Rng;

use crate::notice::{Notice, NoticeSink};
use crate::{deck, Card, GameError, Suit};

/// The face-down draw pile. Index 0 is the bottom card: the trump card,
/// drawn last. Draws come off the end.
///
/// `closed` flips false to true exactly once, either by a participant's
/// action or automatically when the pile runs dry, and changes the legal-play
/// rules for the rest of the round.
#[derive(Debug, Clone)]
pub struct Stock {
    cards: Vec<Card>,
    trump: Card,
    closed: bool,
}

impl Stock {
    /// Shuffle the canonical deck into a fresh stock.
    pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut cards = deck();
        cards.shuffle(rng);
        Self::from_cards(cards)
    }

    /// Build a stock in an explicit order. The first card is the trump card.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        assert!(!cards.is_empty(), "a stock needs at least one card");
        let trump = cards[0];
        Self {
            cards,
            trump,
            closed: false,
        }
    }

    /// The visible trump card. Stays queryable after the stock drains.
    pub fn trump_card(&self) -> Card {
        self.trump
    }

    pub fn trump_suit(&self) -> Suit {
        self.trump.suit
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Draw the top card. `None` on a closed stock is a legal no-op: the
    /// draw phase is simply skipped, never an error.
    pub fn draw(&mut self, sink: &mut dyn NoticeSink) -> Option<Card> {
        if self.closed {
            return None;
        }
        let card = self.cards.pop()?;
        if self.cards.len() == 2 {
            sink.notice(Notice::StockLow);
        } else if self.cards.is_empty() {
            self.closed = true;
            sink.notice(Notice::StockExhausted);
        }
        Some(card)
    }

    /// Close the stock. Closing an already-closed stock is a no-op.
    pub fn close(&mut self, sink: &mut dyn NoticeSink) {
        if self.closed {
            return;
        }
        self.closed = true;
        sink.notice(Notice::StockClosed);
    }

    /// Swap `jack` into the trump position at the bottom of the stock and
    /// return the displaced trump card. Only legal while the stock is open.
    pub fn exchange_trump_jack(&mut self, jack: Card) -> Result<Card, GameError> {
        if self.closed {
            return Err(GameError::ExchangeUnavailable);
        }
        let displaced = self.trump;
        self.cards[0] = jack;
        self.trump = jack;
        Ok(displaced)
    }
}
