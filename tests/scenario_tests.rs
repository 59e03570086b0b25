//! End-to-end scenarios driven through the public state/action graph.

use oriflamme::core::{
    Board, Card, Deck, Decks, Effect, FamilyId, GameConfig, GameState, Kind, Phase, Scores, StateRecord,
};
use oriflamme::setup::{GameRng, GameSetup};

fn f(id: u8) -> FamilyId {
    FamilyId::new(id)
}

fn act_state(cards: &[Card], scores: &[i32], index: usize) -> GameState {
    let board: Board = cards.iter().copied().collect();
    let decks = Decks::uniform(scores.len(), Deck::default()).unwrap();
    GameState::new(Phase::Act, board, decks, Scores::new(scores.iter().copied()).unwrap(), index).unwrap()
}

fn effects(state: &GameState) -> Vec<Effect> {
    state.actions().unwrap().iter().map(|a| *a.effect()).collect()
}

/// Every state along one seeded random line of play, with the effects
/// taken between them.
fn line_of_play(families: usize, hand: usize, seed: u64) -> (Vec<GameState>, Vec<Effect>) {
    let mut state = GameSetup::new()
        .family_count(families)
        .hand_size(hand)
        .build(seed)
        .unwrap();
    let mut rng = GameRng::new(seed).fork();
    let mut states = vec![state.clone()];
    let mut taken = Vec::new();

    while !state.is_finished() {
        let actions = state.actions().unwrap();
        let action = &actions[rng.index(actions.len())];
        taken.push(*action.effect());
        let next = action.next_state().unwrap().clone();
        states.push(next.clone());
        state = next;
    }
    (states, taken)
}

fn trajectory(families: usize, hand: usize, seed: u64) -> Vec<GameState> {
    line_of_play(families, hand, seed).0
}

#[test]
fn test_first_placement_on_empty_board() {
    let decks = Decks::new([Deck::new([Kind::Archer]), Deck::new([Kind::Soldier])]).unwrap();
    let state = GameState::new(Phase::Place, Board::new(), decks, Scores::uniform(2, 0).unwrap(), 0).unwrap();

    let actions = state.actions().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(*actions[0].effect(), Effect::Place { kind: Kind::Archer, index: 0 });

    let next = actions[0].next_state().unwrap();
    assert_eq!(next.phase(), Phase::Place);
    assert_eq!(next.index(), 1);
    assert_eq!(next.board().len(), 1);
    assert_eq!(next.board().get(0).unwrap(), &Card::hidden(Kind::Archer, f(0)));
    assert!(next.decks().get(f(0)).unwrap().is_empty());
}

#[test]
fn test_second_placement_offers_front_and_back() {
    let decks = Decks::new([Deck::new([Kind::Archer]), Deck::new([Kind::Soldier])]).unwrap();
    let state = GameState::new(Phase::Place, Board::new(), decks, Scores::uniform(2, 0).unwrap(), 0).unwrap();
    let second = state.actions().unwrap()[0].next_state().unwrap();

    assert_eq!(
        effects(second),
        vec![
            Effect::Place { kind: Kind::Soldier, index: 0 },
            Effect::Place { kind: Kind::Soldier, index: 1 },
        ]
    );
}

#[test]
fn test_lord_between_allies_earns_three() {
    let state = act_state(
        &[
            Card::face_up(Kind::Heir, f(0)),
            Card::face_up(Kind::Lord, f(0)),
            Card::hidden(Kind::Archer, f(0)),
        ],
        &[2, 5],
        1,
    );

    let actions = state.actions().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(*actions[0].effect(), Effect::Earn { amount: 3 });

    let next = actions[0].next_state().unwrap();
    assert_eq!(next.scores().get(f(0)).unwrap(), 5);
    assert_eq!(next.scores().get(f(1)).unwrap(), 5);
    assert_eq!(next.index(), 2);
    assert_eq!(next.phase(), Phase::Reveal);
    assert_eq!(next.board(), state.board());
}

#[test]
fn test_heir_with_face_up_rival_does_nothing() {
    let state = act_state(
        &[
            Card::face_up(Kind::Heir, f(0)),
            Card::hidden(Kind::Lord, f(1)),
            Card::face_up(Kind::Heir, f(1)),
        ],
        &[3, 4],
        0,
    );

    assert_eq!(effects(&state), vec![Effect::None]);

    let next = state.actions().unwrap()[0].next_state().unwrap();
    assert_eq!(next.scores(), state.scores());
    assert_eq!(next.board(), state.board());
    assert_eq!(next.index(), 1);
    assert_eq!(next.phase(), Phase::Reveal);
}

#[test]
fn test_last_card_acting_starts_next_round() {
    let state = GameState::try_from(StateRecord {
        phase: Phase::Act,
        board: [Card::hidden(Kind::Lord, f(1)), Card::face_up(Kind::Lord, f(0))]
            .into_iter()
            .collect(),
        decks: Decks::uniform(2, Deck::new([Kind::Spy])).unwrap(),
        scores: Scores::uniform(2, 0).unwrap(),
        index: 1,
        round: 0,
        config: GameConfig::default(),
    })
    .unwrap();

    let next = state.actions().unwrap()[0].next_state().unwrap();
    assert_eq!(next.phase(), Phase::Place);
    assert_eq!(next.index(), 0);
    assert_eq!(next.round(), 1);
    assert_eq!(next.board().len(), 2);
}

#[test]
fn test_place_action_count_matches_distinct_kinds() {
    for seed in 0..8 {
        for state in trajectory(3, 5, seed) {
            if state.phase() != Phase::Place {
                continue;
            }
            let family = state.current_family().unwrap();
            let k = state.decks().get(family).unwrap().distinct().len();
            let expected = if state.board().is_empty() { k } else { 2 * k };
            assert_eq!(state.actions().unwrap().len(), expected, "seed {seed}");
        }
    }
}

#[test]
fn test_cards_conserved_while_placing() {
    for seed in 0..8 {
        let states = trajectory(4, 4, seed);
        for pair in states.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if before.phase() != Phase::Place {
                continue;
            }
            assert_eq!(
                before.decks().total_len() + before.board().len(),
                after.decks().total_len() + after.board().len(),
                "seed {seed}"
            );
        }
    }
}

#[test]
fn test_revealed_cards_stay_revealed() {
    for seed in 0..8 {
        let (states, taken) = line_of_play(3, 5, seed);
        for (pair, &effect) in states.windows(2).zip(&taken) {
            let (before, after) = (&pair[0], &pair[1]);

            // Line both boards up card for card
            let (old, new) = match effect {
                Effect::Place { index, .. } => (before.board().clone(), after.board().remove(index).unwrap()),
                Effect::Kill { target } => (before.board().remove(target).unwrap(), after.board().clone()),
                _ => (before.board().clone(), after.board().clone()),
            };
            assert_eq!(old.len(), new.len());
            for (was, now) in old.iter().zip(new.iter()) {
                assert_eq!(was.kind, now.kind);
                if was.is_revealed() {
                    assert!(now.is_revealed(), "seed {seed}: {was:?} went face-down");
                } else if !now.is_revealed() {
                    assert!(now.tokens >= was.tokens);
                }
            }
        }
    }
}

#[test]
fn test_every_reached_state_is_valid() {
    for seed in 0..8 {
        for state in trajectory(2, 6, seed) {
            assert_eq!(state.validate(), Ok(()));
            let rebuilt = GameState::try_from(state.to_record()).unwrap();
            assert_eq!(rebuilt, state);
        }
    }
}

#[test]
fn test_games_end_with_outcome() {
    for seed in 0..8 {
        let states = trajectory(4, 7, seed);
        let last = states.last().unwrap();

        assert!(last.is_finished());
        assert!(last.actions().unwrap().is_empty());
        assert!(last.round() <= 6);

        let outcome = last.outcome().unwrap();
        let best = last.scores().iter().map(|(_, s)| s).max().unwrap();
        for (family, score) in last.scores().iter() {
            assert_eq!(outcome.is_winner(family), score == best);
        }
    }
}
