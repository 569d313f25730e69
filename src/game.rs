use rand::Rng;
use tracing::debug;

use crate::notice::{Notice, NoticeSink, RoundEndReason};
use crate::player::{Player, TurnProvider, TurnView};
use crate::stock::Stock;
use crate::{deck, Card, GameError, Rank, Seat, Suit};

/// Points needed to win a round.
pub const WINNING_POINTS: u32 = 66;
pub const HAND_SIZE: usize = 5;

/// Decide which seat takes a completed trick. Pure: the trick entries are in
/// play order, first the leader, then the follower.
///
/// Same suit: the higher point value takes it (values within a suit are all
/// distinct). Different suits: only the follower's card being trump can
/// override the leader; leading as such confers no priority.
pub fn decide_taker(trick: &[(Card, Seat); 2], trump_suit: Suit) -> Seat {
    let (first, leader) = trick[0];
    let (second, follower) = trick[1];
    if first.suit == second.suit {
        if second.points() > first.points() {
            follower
        } else {
            leader
        }
    } else if second.suit == trump_suit {
        follower
    } else {
        leader
    }
}

/// The cards in `hand` that may legally answer `lead`. With the stock open
/// anything goes. Once it is closed: follow suit, beat the led card when
/// able, trump when void in the led suit.
pub fn legal_follows(hand: &[Card], lead: Card, trump_suit: Suit, closed: bool) -> Vec<Card> {
    if !closed {
        return hand.to_vec();
    }
    let same: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead.suit).collect();
    if !same.is_empty() {
        let winners: Vec<Card> = same
            .iter()
            .copied()
            .filter(|c| c.points() > lead.points())
            .collect();
        return if winners.is_empty() { same } else { winners };
    }
    if lead.suit != trump_suit {
        let trumps: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|c| c.suit == trump_suit)
            .collect();
        if !trumps.is_empty() {
            return trumps;
        }
    }
    hand.to_vec()
}

/// How a round ended. A normal control outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A participant reached [`WINNING_POINTS`].
    Victory { winner: Seat },
    /// Cards ran out; the taker of the last trick wins.
    Exhausted { winner: Seat },
}

impl RoundOutcome {
    pub fn winner(self) -> Seat {
        match self {
            RoundOutcome::Victory { winner } => winner,
            RoundOutcome::Exhausted { winner } => winner,
        }
    }
}

/// Rounds-won value of a finished round: 3 against a loser with no points,
/// 2 below 33, otherwise 1.
pub fn round_win_value(loser_points: u32) -> u32 {
    if loser_points == 0 {
        3
    } else if loser_points < 33 {
        2
    } else {
        1
    }
}

pub struct GameState {
    pub players: [Player; 2],
    pub stock: Stock,
    /// Seat leading the next trick.
    pub leader: Seat,
}

impl GameState {
    pub fn new(names: [&str; 2]) -> Self {
        Self {
            players: [Player::new(names[0], 0), Player::new(names[1], 1)],
            stock: Stock::from_cards(deck()),
            leader: 0,
        }
    }

    /// Reset round state, shuffle a fresh stock and deal five cards to each
    /// seat, leader first.
    pub fn start_round<R: Rng>(&mut self, rng: &mut R, sink: &mut dyn NoticeSink) {
        for player in self.players.iter_mut() {
            player.reset_round();
        }
        self.stock = Stock::shuffled(rng);
        sink.notice(Notice::Shuffled {
            trump_card: self.stock.trump_card(),
        });
        debug!(trump = %self.stock.trump_card(), leader = self.leader, "round dealt");
        for seat in [self.leader, 1 - self.leader] {
            for _ in 0..HAND_SIZE {
                if let Some(card) = self.stock.draw(sink) {
                    self.players[seat].hand.add(card);
                    sink.notice(Notice::CardDrawn { seat, card });
                }
            }
        }
    }

    /// The legal context for a seat's decision, given the trick so far.
    pub fn turn_view(&self, seat: Seat, trick: &[(Card, Seat)]) -> TurnView<'_> {
        let hand = &self.players[seat].hand;
        let lead = trick.first().map(|&(card, _)| card);
        let legal = match lead {
            Some(lead) => legal_follows(
                hand.cards(),
                lead,
                self.stock.trump_suit(),
                self.stock.is_closed(),
            ),
            None => hand.cards().to_vec(),
        };
        TurnView {
            hand,
            trump_card: self.stock.trump_card(),
            trump_suit: self.stock.trump_suit(),
            closed: self.stock.is_closed(),
            lead,
            legal,
            couples: hand.couples(),
            can_exchange: lead.is_none()
                && !self.stock.is_closed()
                && hand.has_trump_jack(self.stock.trump_suit()),
        }
    }

    /// Run the round to its end: tricks in turn order, the taker leading the
    /// next, draws replenishing both hands until the stock closes, and the
    /// round ending on victory or card exhaustion.
    pub fn play_round(
        &mut self,
        providers: &mut [Box<dyn TurnProvider>; 2],
        sink: &mut dyn NoticeSink,
    ) -> Result<RoundOutcome, GameError> {
        let mut last_taker = self.leader;
        loop {
            let mut trick: Vec<(Card, Seat)> = Vec::with_capacity(2);
            for seat in [self.leader, 1 - self.leader] {
                if self.players[seat].hand.is_empty() {
                    sink.notice(Notice::RoundOver {
                        winner: last_taker,
                        reason: RoundEndReason::Exhausted,
                    });
                    return Ok(RoundOutcome::Exhausted { winner: last_taker });
                }

                // Only the leader may act, and only while the stock is open.
                if trick.is_empty() && !self.stock.is_closed() {
                    let action = providers[seat].pre_trick_action(&self.turn_view(seat, &trick));
                    if action.exchange {
                        self.exchange_trump_jack(seat, sink)?;
                    }
                    if action.close {
                        self.stock.close(sink);
                    }
                }

                let play = providers[seat].choose_card(&self.turn_view(seat, &trick));
                if play.marriage {
                    self.apply_marriage(seat, play.card, sink)?;
                }
                self.players[seat].hand.remove(play.card)?;
                sink.notice(Notice::CardPlayed {
                    seat,
                    card: play.card,
                });

                // A marriage can end the round before the trick completes.
                if self.players[seat].points >= WINNING_POINTS {
                    sink.notice(Notice::RoundOver {
                        winner: seat,
                        reason: RoundEndReason::Victory,
                    });
                    return Ok(RoundOutcome::Victory { winner: seat });
                }
                trick.push((play.card, seat));
            }

            let trick = [trick[0], trick[1]];
            let taker = decide_taker(&trick, self.stock.trump_suit());
            debug!(taker, "trick resolved");
            sink.notice(Notice::TrickTaken { seat: taker });
            let trick_points = trick.iter().map(|(card, _)| card.points()).sum();
            self.players[taker].award_trick(trick_points, sink);
            last_taker = taker;
            // The taker always leads the next trick.
            self.leader = taker;

            if self.players[taker].points >= WINNING_POINTS {
                sink.notice(Notice::RoundOver {
                    winner: taker,
                    reason: RoundEndReason::Victory,
                });
                return Ok(RoundOutcome::Victory { winner: taker });
            }

            for seat in [self.leader, 1 - self.leader] {
                if let Some(card) = self.stock.draw(sink) {
                    self.players[seat].hand.add(card);
                    sink.notice(Notice::CardDrawn { seat, card });
                }
            }
        }
    }

    /// Swap the seat's trump jack for the visible trump card. The displaced
    /// trump card joins the seat's hand, keeping the 20-card count intact.
    fn exchange_trump_jack(&mut self, seat: Seat, sink: &mut dyn NoticeSink) -> Result<(), GameError> {
        let jack = self.players[seat].hand.pop_trump_jack(self.stock.trump_suit())?;
        let displaced = self.stock.exchange_trump_jack(jack)?;
        self.players[seat].hand.add(displaced);
        sink.notice(Notice::TrumpExchanged {
            seat,
            taken: displaced,
            new_trump: jack,
        });
        Ok(())
    }

    fn apply_marriage(&mut self, seat: Seat, card: Card, sink: &mut dyn NoticeSink) -> Result<(), GameError> {
        let couple = matches!(card.rank, Rank::King | Rank::Queen)
            && self.players[seat].hand.couples().contains(&card.suit);
        if !couple {
            return Err(GameError::InvalidMarriage(card.suit));
        }
        let trump_suit = self.stock.trump_suit();
        self.players[seat].declare_marriage(card.suit, trump_suit, sink);
        Ok(())
    }
}
