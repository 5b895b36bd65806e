use rookery::selfplay::{play_games, SelfPlayParams};

#[test]
fn random_games_keep_the_rules() {
    let params = SelfPlayParams { games: 4, max_plies: 60, seed: 7, use_engine: false, plies: 1 };
    let games = play_games(&params);
    assert_eq!(games.len(), 4);
    for g in &games {
        assert!(g.king_safe, "seed {} left a king in check", g.seed);
        assert!(g.turns_alternate, "seed {} broke turn order", g.seed);
        assert_eq!(g.moves.len(), g.plies);
        assert!(g.plies == 60 || g.status.is_terminal());
    }
}

#[test]
fn same_seed_same_games() {
    let params = SelfPlayParams { games: 2, max_plies: 30, seed: 11, use_engine: false, plies: 1 };
    let a: Vec<Vec<String>> = play_games(&params).into_iter().map(|g| g.moves).collect();
    let b: Vec<Vec<String>> = play_games(&params).into_iter().map(|g| g.moves).collect();
    assert_eq!(a, b);
}

#[test]
fn engine_can_answer_random_moves() {
    let params = SelfPlayParams { games: 1, max_plies: 6, seed: 3, use_engine: true, plies: 1 };
    let games = play_games(&params);
    assert!(games[0].king_safe);
    assert!(games[0].turns_alternate);
    assert!(games[0].plies > 0);
    let json = serde_json::to_string(&games[0]).unwrap();
    assert!(json.contains("\"moves\""));
}
