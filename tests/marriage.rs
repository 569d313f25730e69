use std::collections::VecDeque;

use schnapsen::game::{GameState, RoundOutcome};
use schnapsen::notice::{Notice, NoticeLog};
use schnapsen::player::{Play, PreTrickAction, TurnProvider, TurnView};
use schnapsen::stock::Stock;
use schnapsen::{Card, Rank::*, Suit::*};

struct Scripted {
    plays: VecDeque<Play>,
}

impl Scripted {
    fn plays(plays: &[Play]) -> Self {
        Self {
            plays: plays.iter().copied().collect(),
        }
    }
}

impl TurnProvider for Scripted {
    fn pre_trick_action(&mut self, _view: &TurnView) -> PreTrickAction {
        PreTrickAction::default()
    }

    fn choose_card(&mut self, _view: &TurnView) -> Play {
        self.plays.pop_front().expect("script ran out of plays")
    }
}

fn play(card: Card) -> Play {
    Play {
        card,
        marriage: false,
    }
}

fn marry(card: Card) -> Play {
    Play {
        card,
        marriage: true,
    }
}

/// Fixed deal: trump is Hearts and seat 0 holds the trump couple.
fn trump_couple_game() -> GameState {
    let mut game = GameState::new(["A", "B"]);
    game.stock = Stock::from_cards(vec![
        Card::new(Hearts, Ace),
        Card::new(Hearts, Ten),
        Card::new(Hearts, Jack),
        Card::new(Diamonds, King),
        Card::new(Diamonds, Ace),
        Card::new(Spades, King),
        Card::new(Spades, Queen),
        Card::new(Spades, Ten),
        Card::new(Clubs, Queen),
        Card::new(Clubs, Jack),
    ]);
    for &card in &[
        Card::new(Hearts, King),
        Card::new(Hearts, Queen),
        Card::new(Clubs, Ace),
        Card::new(Clubs, Ten),
        Card::new(Diamonds, Jack),
    ] {
        game.players[0].hand.add(card);
    }
    for &card in &[
        Card::new(Clubs, King),
        Card::new(Spades, Ace),
        Card::new(Spades, Jack),
        Card::new(Diamonds, Queen),
        Card::new(Diamonds, Ten),
    ] {
        game.players[1].hand.add(card);
    }
    game
}

#[test]
fn trump_marriage_stays_pending_until_the_first_trick_banks_it() {
    let mut game = trump_couple_game();

    let mut providers: [Box<dyn TurnProvider>; 2] = [
        Box::new(Scripted::plays(&[
            marry(Card::new(Hearts, Queen)),
            play(Card::new(Clubs, Ace)),
            play(Card::new(Hearts, King)),
        ])),
        Box::new(Scripted::plays(&[
            play(Card::new(Diamonds, Queen)),
            play(Card::new(Clubs, King)),
            play(Card::new(Spades, Jack)),
        ])),
    ];

    let mut log = NoticeLog::new();
    let outcome = game.play_round(&mut providers, &mut log).unwrap();

    // declared on 0 points: the 40 were pending, not scored
    assert_eq!(
        log.count(|n| matches!(
            n,
            Notice::MarriageDeclared {
                seat: 0,
                suit: Hearts,
                points: 40,
                pending: true,
            }
        )),
        1
    );
    assert_eq!(log.count(|n| matches!(n, Notice::MarriageBanked { seat: 0 })), 1);

    // 6 trick points plus the banked 40, then 15, then the winning 6
    let scores: Vec<u32> = log
        .notices
        .iter()
        .filter_map(|n| match n {
            Notice::PointsUpdated { seat: 0, points } => Some(*points),
            _ => None,
        })
        .collect();
    assert_eq!(scores, vec![46, 61, 67]);

    assert_eq!(outcome, RoundOutcome::Victory { winner: 0 });
    assert_eq!(game.players[0].points, 67);
    assert_eq!(game.players[0].marriage_points, 0);
}

#[test]
fn marriage_can_end_the_round_without_resolving_the_trick() {
    let mut game = trump_couple_game();
    // seat 0 already took tricks, so the marriage scores immediately
    game.players[0].points = 30;

    let mut providers: [Box<dyn TurnProvider>; 2] = [
        Box::new(Scripted::plays(&[marry(Card::new(Hearts, King))])),
        // never reached: the round ends before seat 1 may answer
        Box::new(Scripted::plays(&[])),
    ];

    let mut log = NoticeLog::new();
    let outcome = game.play_round(&mut providers, &mut log).unwrap();

    assert_eq!(outcome, RoundOutcome::Victory { winner: 0 });
    assert_eq!(game.players[0].points, 70);
    assert_eq!(
        log.count(|n| matches!(
            n,
            Notice::MarriageDeclared {
                seat: 0,
                pending: false,
                ..
            }
        )),
        1
    );
    // the partial trick was never resolved
    assert_eq!(log.count(|n| matches!(n, Notice::TrickTaken { .. })), 0);
    assert_eq!(game.players[1].hand.len(), 5);
    assert_eq!(game.players[0].hand.len(), 4);
}

#[test]
fn non_trump_marriage_scores_twenty() {
    let mut game = GameState::new(["A", "B"]);
    game.stock = Stock::from_cards(vec![
        Card::new(Hearts, Ace),
        Card::new(Hearts, Ten),
        Card::new(Hearts, Jack),
        Card::new(Hearts, King),
        Card::new(Hearts, Queen),
        Card::new(Diamonds, King),
        Card::new(Diamonds, Ace),
        Card::new(Diamonds, Queen),
        Card::new(Clubs, Queen),
        Card::new(Clubs, Jack),
    ]);
    for &card in &[
        Card::new(Spades, King),
        Card::new(Spades, Queen),
        Card::new(Clubs, Ace),
        Card::new(Clubs, Ten),
        Card::new(Diamonds, Jack),
    ] {
        game.players[0].hand.add(card);
    }
    for &card in &[
        Card::new(Clubs, King),
        Card::new(Spades, Ace),
        Card::new(Spades, Jack),
        Card::new(Spades, Ten),
        Card::new(Diamonds, Ten),
    ] {
        game.players[1].hand.add(card);
    }
    game.players[0].points = 46;

    let mut providers: [Box<dyn TurnProvider>; 2] = [
        Box::new(Scripted::plays(&[marry(Card::new(Spades, Queen))])),
        Box::new(Scripted::plays(&[])),
    ];

    let mut log = NoticeLog::new();
    let outcome = game.play_round(&mut providers, &mut log).unwrap();

    assert_eq!(
        log.count(|n| matches!(
            n,
            Notice::MarriageDeclared {
                seat: 0,
                suit: Spades,
                points: 20,
                pending: false,
            }
        )),
        1
    );
    // 46 + 20 reaches 66 on the spot
    assert_eq!(outcome, RoundOutcome::Victory { winner: 0 });
    assert_eq!(game.players[0].points, 66);
}
