//! Live games through the participant and renderer ports

use qttt::{
    Error,
    adapters::{ConsoleHuman, ConsoleRenderer, RandomParticipant, ScriptedParticipant},
    pipeline::{play_game, play_series},
    ports::Renderer,
    q_learning::QLearningAgent,
    tictactoe::{Board, GameStatus, Player},
};

#[derive(Default)]
struct CountingRenderer {
    renders: usize,
    finals: usize,
    fail: bool,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, _board: &Board, _first_player_turn: bool) -> qttt::Result<()> {
        self.renders += 1;
        if self.fail {
            return Err(Error::InvalidConfiguration {
                message: "display unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn render_final(&mut self, _board: &Board) -> qttt::Result<()> {
        self.finals += 1;
        if self.fail {
            return Err(Error::InvalidConfiguration {
                message: "display unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[test]
fn scripted_game_reports_winner_and_moves() {
    let mut x = ScriptedParticipant::new("X", vec![0, 1, 2]);
    let mut o = ScriptedParticipant::new("O", vec![3, 4]);
    let mut renderer = CountingRenderer::default();

    let report = play_game(&mut x, &mut o, Some(&mut renderer)).unwrap();

    assert_eq!(report.status, GameStatus::Won(Player::X));
    assert_eq!(report.moves, vec![0, 3, 1, 4, 2]);
    assert_eq!(report.final_board.state_key().as_str(), "111220000");
    assert_eq!(renderer.renders, 5);
    assert_eq!(renderer.finals, 1);
}

#[test]
fn scripted_game_can_tie() {
    let mut x = ScriptedParticipant::new("X", vec![0, 2, 3, 7, 8]);
    let mut o = ScriptedParticipant::new("O", vec![1, 4, 5, 6]);

    let report = play_game(&mut x, &mut o, None).unwrap();

    assert!(report.is_tie());
    assert_eq!(report.winner(), None);
    assert_eq!(report.moves.len(), 9);
}

#[test]
fn occupied_cell_forfeits_the_game() {
    let mut x = ScriptedParticipant::new("X", vec![4, 0]);
    let mut o = ScriptedParticipant::new("O", vec![4]);

    let report = play_game(&mut x, &mut o, None).unwrap();

    assert!(report.cheated());
    assert_eq!(report.winner(), Some(Player::X));
    assert_eq!(report.moves, vec![4, 4]);
    assert_eq!(report.final_board.state_key().as_str(), "000010000");
}

#[test]
fn renderer_failures_do_not_stop_the_game() {
    let mut x = ScriptedParticipant::new("X", vec![0, 1, 2]);
    let mut o = ScriptedParticipant::new("O", vec![3, 4]);
    let mut renderer = CountingRenderer {
        fail: true,
        ..CountingRenderer::default()
    };

    let report = play_game(&mut x, &mut o, Some(&mut renderer)).unwrap();
    assert_eq!(report.winner(), Some(Player::X));
    assert_eq!(renderer.finals, 1);
}

#[test]
fn out_of_range_action_is_an_error() {
    let mut x = ScriptedParticipant::new("X", vec![9]);
    let mut o = ScriptedParticipant::new("O", vec![]);

    let err = play_game(&mut x, &mut o, None).unwrap_err();
    assert!(matches!(err, Error::InvalidPosition { position: 9 }));
}

#[test]
fn human_input_drives_the_game() {
    let mut human = ConsoleHuman::new(
        "Player X",
        std::io::Cursor::new("0\n0\n1\n2\n"),
        Vec::new(),
    );
    let mut o = ScriptedParticipant::new("O", vec![3, 4]);
    let mut renderer = ConsoleRenderer::new(Vec::new());

    let report = play_game(&mut human, &mut o, Some(&mut renderer)).unwrap();

    assert_eq!(report.moves, vec![0, 3, 1, 4, 2]);
    let shown = String::from_utf8(renderer.into_inner()).unwrap();
    assert!(shown.ends_with("X|X|X|\nO|O| |\n | | |\n"));
}

#[test]
fn closed_human_input_aborts_the_game() {
    let mut human = ConsoleHuman::new("Player X", std::io::Cursor::new(""), Vec::new());
    let mut o = ScriptedParticipant::new("O", vec![]);

    assert!(matches!(
        play_game(&mut human, &mut o, None),
        Err(Error::InputClosed { .. })
    ));
}

#[test]
fn agents_complete_games_without_cheating() {
    let mut x = QLearningAgent::new().with_seed(1);
    let mut o = QLearningAgent::new().with_seed(2);

    let result = play_series(&mut x, &mut o, 25).unwrap();

    assert_eq!(result.games, 25);
    assert_eq!(result.cheats, 0);
    assert_eq!(result.first_wins + result.second_wins + result.ties, 25);
}

#[test]
fn random_series_tallies_every_game() {
    let mut x = RandomParticipant::with_seed("X", 3);
    let mut o = RandomParticipant::with_seed("O", 4);

    let result = play_series(&mut x, &mut o, 50).unwrap();
    assert_eq!(result.games, 50);
    assert_eq!(result.first_wins + result.second_wins + result.ties, 50);
    assert_eq!(result.cheats, 0);
}
