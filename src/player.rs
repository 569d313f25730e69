use rand::seq::SliceRandom;
use std::io::{self, Write};

use crate::hand::Hand;
use crate::notice::{Notice, NoticeSink};
use crate::{Card, Rank, Seat, Suit};

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub seat: Seat,
    pub hand: Hand,
    /// Round points from taken tricks and banked marriages.
    pub points: u32,
    /// Marriage points declared before the first taken trick, waiting to be
    /// banked by it.
    pub marriage_points: u32,
    /// Rounds-won score; persists across rounds.
    pub score: u32,
}

impl Player {
    pub fn new(name: &str, seat: Seat) -> Self {
        Self {
            name: name.to_string(),
            seat,
            hand: Hand::new(),
            points: 0,
            marriage_points: 0,
            score: 0,
        }
    }

    /// Clear round-scoped state; `score` carries over.
    pub fn reset_round(&mut self) {
        self.hand.clear();
        self.points = 0;
        self.marriage_points = 0;
    }

    /// Score a marriage: 40 points in the trump suit, 20 otherwise. Until
    /// the player has taken a trick the award stays pending; a marriage
    /// only counts once its declarer has proven it can take a trick.
    pub fn declare_marriage(&mut self, suit: Suit, trump_suit: Suit, sink: &mut dyn NoticeSink) {
        let points = if suit == trump_suit { 40 } else { 20 };
        let pending = self.points == 0;
        if pending {
            self.marriage_points += points;
        } else {
            self.points += points;
        }
        sink.notice(Notice::MarriageDeclared {
            seat: self.seat,
            suit,
            points,
            pending,
        });
    }

    /// Add the points of a taken trick, banking any pending marriage.
    pub fn award_trick(&mut self, trick_points: u32, sink: &mut dyn NoticeSink) {
        self.points += trick_points;
        if self.marriage_points > 0 {
            self.points += self.marriage_points;
            self.marriage_points = 0;
            sink.notice(Notice::MarriageBanked { seat: self.seat });
        }
        sink.notice(Notice::PointsUpdated {
            seat: self.seat,
            points: self.points,
        });
    }
}

/// Everything a seat may see when asked for a decision.
pub struct TurnView<'a> {
    pub hand: &'a Hand,
    pub trump_card: Card,
    pub trump_suit: Suit,
    pub closed: bool,
    /// The led card when following; `None` when leading.
    pub lead: Option<Card>,
    /// The cards that may legally be played right now.
    pub legal: Vec<Card>,
    /// Suits with a complete king-queen couple in hand.
    pub couples: Vec<Suit>,
    /// Trump-jack exchange is on offer: leading, stock open, jack in hand.
    pub can_exchange: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreTrickAction {
    pub exchange: bool,
    pub close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub card: Card,
    /// Declare the couple of the card's suit along with the play.
    pub marriage: bool,
}

/// How a seat decides its turns. The round orchestrator drives both kinds of
/// participant through this one interface.
pub trait TurnProvider {
    /// Leader-only window before the trick while the stock is open.
    fn pre_trick_action(&mut self, view: &TurnView) -> PreTrickAction;

    /// Choose a card from the hand. The selection must come from the hand;
    /// for a human this is enforced by re-prompting.
    fn choose_card(&mut self, view: &TurnView) -> Play;
}

/// The automated participant. Stateless; every decision is a function of the
/// current view.
pub struct HeuristicPlayer;

impl TurnProvider for HeuristicPlayer {
    fn pre_trick_action(&mut self, view: &TurnView) -> PreTrickAction {
        // Always exchange when eligible; never close.
        PreTrickAction {
            exchange: view.can_exchange,
            close: false,
        }
    }

    fn choose_card(&mut self, view: &TurnView) -> Play {
        match view.lead {
            None => lead_card(view),
            Some(lead) => Play {
                card: follow_card(view.hand.cards(), lead, view.trump_suit, view.closed),
                marriage: false,
            },
        }
    }
}

/// Leading: marry if possible, preferring the trump couple; otherwise play
/// the first available card.
fn lead_card(view: &TurnView) -> Play {
    let mut rng = rand::thread_rng();
    if !view.couples.is_empty() {
        let suit = if view.couples.contains(&view.trump_suit) {
            view.trump_suit
        } else {
            *view.couples.choose(&mut rng).unwrap()
        };
        let rank = *[Rank::King, Rank::Queen].choose(&mut rng).unwrap();
        Play {
            card: Card::new(suit, rank),
            marriage: true,
        }
    } else {
        Play {
            card: view.hand.cards()[0],
            marriage: false,
        }
    }
}

/// Following: win as cheaply as possible; if the stock is closed and winning
/// is out of reach, follow suit losing cheaply; otherwise spend the lowest
/// trump, or shed the cheapest non-trump card.
fn follow_card(hand: &[Card], lead: Card, trump_suit: Suit, closed: bool) -> Card {
    let lowest = |cards: &[Card]| cards.iter().copied().min_by_key(Card::points);

    let higher: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|c| c.suit == lead.suit && c.points() > lead.points())
        .collect();
    if let Some(card) = lowest(&higher) {
        return card;
    }

    if closed {
        let lower: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|c| c.suit == lead.suit && c.points() < lead.points())
            .collect();
        if let Some(card) = lowest(&lower) {
            return card;
        }
    }

    if lead.suit != trump_suit {
        let trumps: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|c| c.suit == trump_suit)
            .collect();
        if let Some(card) = lowest(&trumps) {
            return card;
        }
    }

    let no_trumps: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|c| c.suit != trump_suit)
        .collect();
    lowest(&no_trumps)
        .or_else(|| lowest(hand))
        .expect("follower holds no cards")
}

/// The interactive participant: prompts on stdout, reads selections from
/// stdin, and re-prompts in place until the selection is legal.
pub struct HumanPlayer;

impl HumanPlayer {
    fn read_line() -> String {
        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        input.trim().to_string()
    }

    fn prompt(text: &str) -> String {
        print!("{}", text);
        io::stdout().flush().unwrap();
        Self::read_line()
    }

    fn show_cards(cards: &[Card], trump_suit: Suit) {
        println!();
        for (number, card) in cards.iter().enumerate() {
            let mark = if card.suit == trump_suit { "*" } else { "" };
            println!("{} - {}{}", number + 1, card, mark);
        }
    }

    fn choose_couple_card(view: &TurnView) -> Play {
        let couple_cards: Vec<Card> = view
            .couples
            .iter()
            .flat_map(|&suit| [Card::new(suit, Rank::King), Card::new(suit, Rank::Queen)])
            .collect();
        Self::show_cards(&couple_cards, view.trump_suit);
        loop {
            println!();
            if let Ok(number) = Self::prompt("Choose a card: ").parse::<usize>() {
                if (1..=couple_cards.len()).contains(&number) {
                    return Play {
                        card: couple_cards[number - 1],
                        marriage: true,
                    };
                }
            }
        }
    }
}

impl TurnProvider for HumanPlayer {
    fn pre_trick_action(&mut self, view: &TurnView) -> PreTrickAction {
        let mut action = PreTrickAction::default();
        let mut can_exchange = view.can_exchange;
        println!();
        println!("It's your turn. Do you want to perform an action?");
        loop {
            println!();
            println!("1 - Close the stock");
            if can_exchange {
                println!(
                    "2 - Exchange your {} for the {}",
                    Card::new(view.trump_suit, Rank::Jack),
                    view.trump_card
                );
            }
            println!();
            let input = Self::prompt("Choose an action or press Enter to continue: ");
            match input.as_str() {
                "1" => {
                    action.close = true;
                    break;
                }
                "2" if can_exchange => {
                    action.exchange = true;
                    can_exchange = false;
                    println!("Okay, do you want to perform another action?");
                }
                "" => break,
                _ => continue,
            }
        }
        action
    }

    fn choose_card(&mut self, view: &TurnView) -> Play {
        let cards = view.hand.sorted();
        let can_marry = view.lead.is_none() && !view.couples.is_empty();
        Self::show_cards(&cards, view.trump_suit);
        if can_marry {
            println!("M - Marry a couple");
        }
        loop {
            println!();
            if view.lead.is_some() && view.closed {
                println!("You have to match suit and take the trick if you can.");
            }
            let input = Self::prompt("Your choice: ");
            if let Ok(number) = input.parse::<usize>() {
                if (1..=cards.len()).contains(&number) {
                    let card = cards[number - 1];
                    if view.legal.contains(&card) {
                        return Play {
                            card,
                            marriage: false,
                        };
                    }
                    println!("You can't play the {} now.", card);
                    continue;
                }
            }
            if can_marry && input.eq_ignore_ascii_case("m") {
                return Self::choose_couple_card(view);
            }
            println!("Choose one of the options above.");
        }
    }
}
