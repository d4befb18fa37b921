pub mod scheduler;
pub mod snapshot;

use crate::core::{Board, GameMode, Move, Outcome, Player, Symbol};
use crate::logic::{apply_move, evaluate, next_to_vanish};
use crate::player::{selector_for, MoveSelector, SearchConfig};
use rand::Rng;
use tracing::{debug, info, instrument};

/// Board, history and turn bookkeeping for the round in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub mode: GameMode,
    pub board: Board,
    pub moves: Vec<Move>,
    pub current_player_index: usize,
    pub outcome: Outcome,
    /// Seat that opened the current round; drives the round robin.
    pub last_starter_index: usize,
}

impl GameState {
    pub fn fresh(mode: GameMode, starter: usize) -> Self {
        GameState {
            mode,
            board: Board::new(),
            moves: Vec::new(),
            current_player_index: starter,
            outcome: Outcome::Ongoing,
            last_starter_index: starter,
        }
    }

    pub fn current_symbol(&self) -> Symbol {
        Symbol::from_index(self.current_player_index)
    }
}

/// Partial player edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub is_bot: Option<bool>,
    pub difficulty: Option<crate::core::Difficulty>,
}

/// Ticket for a delayed bot move, tied to the session generation it was issued at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotTurn {
    pub generation: u64,
    pub player_index: usize,
}

/// A whole session: both seats plus the current round.
///
/// Every operation builds the next [`GameState`] and swaps it in with a single
/// assignment. `generation` advances on each applied move and each reset so
/// that delayed bot turns can tell they are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    players: [Player; 2],
    state: GameState,
    generation: u64,
}

impl Session {
    pub fn new(starter: usize) -> Self {
        Self::restore(Player::defaults(), GameState::fresh(GameMode::Classic, starter & 1))
    }

    /// Fresh session with a coin-flip starter.
    pub fn new_random() -> Self {
        Self::new(random_starter())
    }

    /// Seat indices outside 0..2 are folded back onto the two seats.
    pub fn restore(players: [Player; 2], state: GameState) -> Self {
        let state = GameState {
            current_player_index: state.current_player_index & 1,
            last_starter_index: state.last_starter_index & 1,
            ..state
        };
        Session {
            players,
            state,
            generation: 0,
        }
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.state.current_player_index]
    }

    pub fn player_for(&self, symbol: Symbol) -> &Player {
        &self.players[symbol.index()]
    }

    /// Plays `cell` for the current player.
    ///
    /// Returns `false` without touching anything when the cell is out of range
    /// or occupied, or the round is already decided.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn submit_move(&mut self, cell: usize) -> bool {
        if self.state.outcome.is_over() || !self.state.board.is_empty_at(cell) {
            debug!("move ignored");
            return false;
        }

        let symbol = self.state.current_symbol();
        let (board, moves) = apply_move(
            &self.state.board,
            &self.state.moves,
            symbol,
            cell,
            self.state.mode,
        );
        let outcome = evaluate(&board);

        let mut players = self.players.clone();
        let current_player_index = match outcome {
            Outcome::Ongoing => 1 - self.state.current_player_index,
            Outcome::Win { symbol, line } => {
                players[symbol.index()].wins += 1;
                info!(%symbol, ?line, "round won");
                self.state.current_player_index
            }
            Outcome::Draw => {
                info!("round drawn");
                self.state.current_player_index
            }
        };

        let next = GameState {
            board,
            moves,
            outcome,
            current_player_index,
            ..self.state.clone()
        };
        self.commit(players, next);
        true
    }

    /// Clears the board and hands the opening move to the other seat.
    #[instrument(skip(self))]
    pub fn start_new_round(&mut self) {
        let starter = 1 - self.state.last_starter_index;
        let next = GameState::fresh(self.state.mode, starter);
        self.commit(self.players.clone(), next);
    }

    /// Clears the board; the same seat opens again.
    #[instrument(skip(self))]
    pub fn restart_round(&mut self) {
        let next = GameState::fresh(self.state.mode, self.state.last_starter_index);
        self.commit(self.players.clone(), next);
    }

    /// Switches rules and restarts the round. Returns `false` if `mode` is already active.
    #[instrument(skip(self))]
    pub fn change_mode(&mut self, mode: GameMode) -> bool {
        if mode == self.state.mode {
            return false;
        }
        let next = GameState::fresh(mode, self.state.last_starter_index);
        self.commit(self.players.clone(), next);
        true
    }

    #[instrument(skip(self))]
    pub fn update_player(&mut self, index: usize, update: PlayerUpdate) -> bool {
        if index >= self.players.len() {
            return false;
        }
        let mut players = self.players.clone();
        let player = &mut players[index];
        if let Some(name) = update.name {
            player.name = name;
        }
        if let Some(is_bot) = update.is_bot {
            player.is_bot = is_bot;
        }
        if let Some(difficulty) = update.difficulty {
            player.difficulty = difficulty;
        }
        self.players = players;
        true
    }

    pub fn reset_scores(&mut self) {
        for player in self.players.iter_mut() {
            player.wins = 0;
        }
    }

    /// Default players, classic rules, coin-flip starter.
    #[instrument(skip(self))]
    pub fn factory_reset(&mut self) {
        let next = GameState::fresh(GameMode::Classic, random_starter());
        self.commit(Player::defaults(), next);
    }

    /// Cell the current player will lose on their next placement, for preview.
    pub fn next_vanishing_cell(&self) -> Option<usize> {
        if self.state.mode != GameMode::Disappearing || self.state.outcome.is_over() {
            return None;
        }
        next_to_vanish(&self.state.moves, self.state.current_symbol())
    }

    /// Ticket for the bot whose turn it is, if any.
    pub fn pending_bot_turn(&self) -> Option<BotTurn> {
        if self.state.outcome.is_over() || !self.current_player().is_bot {
            return None;
        }
        Some(BotTurn {
            generation: self.generation,
            player_index: self.state.current_player_index,
        })
    }

    pub fn is_current(&self, turn: BotTurn) -> bool {
        turn.generation == self.generation
            && turn.player_index == self.state.current_player_index
            && self.pending_bot_turn().is_some()
    }

    /// Redeems a bot ticket using the default search limits.
    pub fn play_bot_turn(&mut self, turn: BotTurn) -> bool {
        let selector = selector_for(self.current_player().difficulty, SearchConfig::default());
        self.play_bot_turn_with(turn, selector.as_ref())
    }

    /// Redeems a bot ticket. Stale tickets are dropped; the chosen cell goes
    /// through [`Session::submit_move`] like a human move.
    #[instrument(skip(self, selector), fields(selector = selector.name()))]
    pub fn play_bot_turn_with(&mut self, turn: BotTurn, selector: &dyn MoveSelector) -> bool {
        if !self.is_current(turn) {
            debug!(current = self.generation, "stale bot turn discarded");
            return false;
        }
        let state = &self.state;
        match selector.choose_move(&state.board, &state.moves, state.current_symbol(), state.mode) {
            Some(cell) => self.submit_move(cell),
            None => false,
        }
    }

    fn commit(&mut self, players: [Player; 2], state: GameState) {
        self.players = players;
        self.state = state;
        self.generation += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new_random()
    }
}

pub(crate) fn random_starter() -> usize {
    rand::thread_rng().gen_range(0..2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Difficulty, CELL_COUNT};

    fn play(session: &mut Session, cells: &[usize]) {
        for &cell in cells {
            assert!(session.submit_move(cell), "cell {} rejected", cell);
        }
    }

    #[test]
    fn test_x_wins_top_row_then_new_round() {
        let mut session = Session::new(0);
        play(&mut session, &[0, 3, 1, 4, 2]);

        let state = session.state();
        assert_eq!(
            state.outcome,
            Outcome::Win {
                symbol: Symbol::X,
                line: [0, 1, 2]
            }
        );
        assert_eq!(session.players()[0].wins, 1);
        assert_eq!(session.players()[1].wins, 0);
        // The winner stays current.
        assert_eq!(state.current_player_index, 0);

        session.start_new_round();
        let state = session.state();
        assert_eq!(state.board, Board::new());
        assert!(state.moves.is_empty());
        assert_eq!(state.outcome, Outcome::Ongoing);
        assert_eq!(state.last_starter_index, 1);
        assert_eq!(state.current_player_index, 1);
        assert_eq!(session.players()[0].wins, 1);
    }

    #[test]
    fn test_restore_keeps_seat_indices_in_range() {
        let mut players = Player::defaults();
        players[0].is_bot = true;
        let state = GameState {
            current_player_index: 2,
            last_starter_index: 5,
            ..GameState::fresh(GameMode::Classic, 0)
        };
        let mut session = Session::restore(players, state);
        assert_eq!(session.state().current_player_index, 0);
        assert_eq!(session.state().last_starter_index, 1);

        let turn = session.pending_bot_turn().unwrap();
        assert_eq!(turn.player_index, 0);
        assert!(session.play_bot_turn(turn));
    }

    #[test]
    fn test_turn_alternates_only_while_ongoing() {
        let mut session = Session::new(1);
        for cell in [0, 4, 1, 8] {
            let before = session.state().current_player_index;
            session.submit_move(cell);
            assert_eq!(session.state().current_player_index, 1 - before);
        }
        // O (seat 1) completes 0-1-2.
        let before = session.state().current_player_index;
        assert_eq!(before, 1);
        session.submit_move(2);
        assert!(session.state().outcome.is_over());
        assert_eq!(session.state().current_player_index, before);
    }

    #[test]
    fn test_draw_keeps_scores() {
        let mut session = Session::new(0);
        // X O X / X O O / O X X
        play(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(session.state().outcome, Outcome::Draw);
        assert_eq!(session.players()[0].wins, 0);
        assert_eq!(session.players()[1].wins, 0);
    }

    #[test]
    fn test_illegal_moves_are_ignored() {
        let mut session = Session::new(0);
        play(&mut session, &[4]);
        let snapshot = session.clone();

        assert!(!session.submit_move(4));
        assert!(!session.submit_move(CELL_COUNT));
        assert_eq!(session, snapshot);

        play(&mut session, &[0, 3, 1, 5]);
        assert!(session.state().outcome.is_over());
        let finished = session.clone();
        assert!(!session.submit_move(8));
        assert_eq!(session, finished);
    }

    #[test]
    fn test_round_robin_starter() {
        for start in [0, 1] {
            let mut session = Session::new(start);
            for k in 1..=5 {
                session.start_new_round();
                assert_eq!(session.state().last_starter_index, (start + k) % 2);
                assert_eq!(session.state().current_player_index, (start + k) % 2);
            }
        }
    }

    #[test]
    fn test_restart_and_mode_change_keep_starter() {
        let mut session = Session::new(1);
        play(&mut session, &[0, 4]);
        session.restart_round();
        assert_eq!(session.state().current_player_index, 1);
        assert!(session.state().moves.is_empty());

        play(&mut session, &[0]);
        assert!(!session.change_mode(GameMode::Classic));
        assert_eq!(session.state().moves.len(), 1);

        assert!(session.change_mode(GameMode::Disappearing));
        let state = session.state();
        assert_eq!(state.mode, GameMode::Disappearing);
        assert_eq!(state.current_player_index, 1);
        assert_eq!(state.last_starter_index, 1);
        assert!(state.moves.is_empty());
        assert_eq!(state.board, Board::new());
    }

    #[test]
    fn test_disappearing_session_evicts_and_previews() {
        let mut session = Session::new(0);
        session.change_mode(GameMode::Disappearing);
        // X: 0, 1, 5   O: 3, 4, 8
        play(&mut session, &[0, 3, 1, 4, 5, 8]);
        assert_eq!(session.state().outcome, Outcome::Ongoing);
        assert_eq!(session.next_vanishing_cell(), Some(0));

        play(&mut session, &[6]);
        let state = session.state();
        assert_eq!(state.board[0], None);
        assert_eq!(state.board[6], Some(Symbol::X));
        assert_eq!(state.board.count(Symbol::X), 3);
        assert_eq!(session.next_vanishing_cell(), Some(3));
    }

    #[test]
    fn test_update_player_and_scores() {
        let mut session = Session::new(0);
        assert!(session.update_player(
            1,
            PlayerUpdate {
                name: Some("Bot".to_string()),
                is_bot: Some(true),
                difficulty: Some(Difficulty::Hard),
            },
        ));
        assert!(!session.update_player(2, PlayerUpdate::default()));

        let p = &session.players()[1];
        assert_eq!(p.name, "Bot");
        assert!(p.is_bot);
        assert_eq!(p.difficulty, Difficulty::Hard);
        assert_eq!(p.symbol, Symbol::O);

        play(&mut session, &[0, 3, 1, 4, 2]);
        assert_eq!(session.players()[0].wins, 1);
        session.reset_scores();
        assert!(session.players().iter().all(|p| p.wins == 0));
    }

    #[test]
    fn test_factory_reset_restores_defaults() {
        let mut session = Session::new(0);
        session.update_player(
            0,
            PlayerUpdate {
                name: Some("Ann".to_string()),
                ..Default::default()
            },
        );
        session.change_mode(GameMode::Disappearing);
        play(&mut session, &[0, 3, 1, 4, 2]);

        session.factory_reset();
        assert_eq!(session.players(), &Player::defaults());
        let state = session.state();
        assert_eq!(state.mode, GameMode::Classic);
        assert!(state.moves.is_empty());
        assert_eq!(state.current_player_index, state.last_starter_index);
    }

    #[test]
    fn test_bot_turn_plays_through_move_path() {
        let mut session = Session::new(0);
        session.update_player(
            1,
            PlayerUpdate {
                is_bot: Some(true),
                difficulty: Some(Difficulty::Hard),
                ..Default::default()
            },
        );
        assert_eq!(session.pending_bot_turn(), None);

        play(&mut session, &[0]);
        let turn = session.pending_bot_turn().unwrap();
        assert_eq!(turn.player_index, 1);
        assert!(session.play_bot_turn(turn));
        assert_eq!(session.state().board[4], Some(Symbol::O));
        assert_eq!(session.state().current_player_index, 0);

        // Already redeemed.
        assert!(!session.play_bot_turn(turn));
    }

    #[test]
    fn test_stale_bot_turn_is_discarded() {
        let mut session = Session::new(1);
        session.update_player(
            1,
            PlayerUpdate {
                is_bot: Some(true),
                ..Default::default()
            },
        );
        let turn = session.pending_bot_turn().unwrap();
        session.restart_round();

        let before = session.clone();
        assert!(!session.play_bot_turn(turn));
        assert_eq!(session, before);

        let fresh = session.pending_bot_turn().unwrap();
        assert_ne!(fresh, turn);
        assert!(session.play_bot_turn(fresh));
        assert_eq!(session.state().moves.len(), 1);
    }
}
