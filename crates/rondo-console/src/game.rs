//! The interactive console game: human versus engine.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use rondo_core::{Board, Color, Move, generate_legal_moves, in_check};
use rondo_engine::{DrawContext, Searcher};

use crate::book::OpeningBook;
use crate::error::GameError;
use crate::render::render_board;

/// Knobs for a console game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Which side the human plays.
    pub human_side: Color,
    /// Iterative-deepening depth cap for the engine.
    pub max_depth: u32,
    /// Per-move thinking time for the engine.
    pub move_time: Duration,
    /// The book is consulted only for the first this-many plies.
    pub max_book_plies: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_side: Color::White,
            max_depth: 6,
            move_time: Duration::from_secs(2),
            max_book_plies: 12,
        }
    }
}

/// Terminal state of a game, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate {
        /// The side that delivered mate.
        winner: Color,
    },
    Stalemate,
    FiftyMoveDraw,
    RepetitionDraw,
}

/// One console game: board, engine, book, and the hash history that feeds
/// repetition detection.
pub struct Game {
    board: Board,
    searcher: Searcher,
    book: OpeningBook,
    /// Hash of every position seen so far, the current one included.
    history: Vec<u64>,
    /// Plies played since the start of the game.
    ply: u32,
    config: GameConfig,
}

impl Game {
    /// Start a fresh game from the standard position.
    pub fn new(config: GameConfig) -> Game {
        let board = Board::starting_position();
        Game {
            history: vec![board.hash()],
            board,
            searcher: Searcher::new(),
            book: OpeningBook::standard(),
            ply: 0,
            config,
        }
    }

    /// The current position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// How often the current position has occurred.
    fn repetition_count(&self) -> u32 {
        let current = self.board.hash();
        self.history.iter().filter(|&&h| h == current).count() as u32
    }

    /// Determine whether the game is over and how.
    pub fn status(&self) -> GameStatus {
        if generate_legal_moves(&self.board).is_empty() {
            return if in_check(&self.board, self.board.side_to_move()) {
                GameStatus::Checkmate {
                    winner: self.board.side_to_move().flip(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        if self.board.halfmove_clock() >= 100 {
            return GameStatus::FiftyMoveDraw;
        }
        if self.repetition_count() >= 3 {
            return GameStatus::RepetitionDraw;
        }
        GameStatus::InProgress
    }

    /// Play `mv` if it is legal, returning whether it was accepted.
    pub fn play_move(&mut self, mv: Move) -> bool {
        if !generate_legal_moves(&self.board).contains(&mv) {
            return false;
        }
        let mover = self.board.side_to_move();
        self.board.apply(mv);
        self.board.set_side_to_move(mover.flip());
        self.history.push(self.board.hash());
        self.ply += 1;
        true
    }

    /// Choose and play the engine's move: the opening book first, then a
    /// deadline-bounded search. Returns `None` when no legal move exists.
    pub fn engine_move(&mut self) -> Option<Move> {
        let legal = generate_legal_moves(&self.board);
        if legal.is_empty() {
            return None;
        }

        if let Some(book_move) =
            self.book
                .lookup(&self.board, &legal, self.ply, self.config.max_book_plies)
        {
            info!(mv = %book_move, "book move");
            self.play_move(book_move);
            return Some(book_move);
        }

        let draw = DrawContext {
            current_ply: self.ply,
            max_plies: None,
            repetition_count: self.repetition_count(),
        };
        let deadline = Instant::now() + self.config.move_time;
        let outcome =
            self.searcher
                .search_timed(&mut self.board, self.config.max_depth, deadline, draw);
        debug!(
            score = outcome.score,
            depth = outcome.depth_reached,
            nodes = outcome.nodes,
            qnodes = outcome.qnodes,
            "search finished"
        );

        let mv = outcome.best_move.expect("legal moves exist");
        self.play_move(mv);
        Some(mv)
    }

    /// Run the interactive loop on stdin/stdout until the game ends or the
    /// human quits.
    pub fn run(&mut self) -> Result<(), GameError> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        let mut out = io::stdout();

        writeln!(out, "rondo console chess")?;
        write!(out, "Play as [w]hite or [b]lack? ")?;
        out.flush()?;
        match lines.next().transpose()? {
            Some(line) if line.trim().eq_ignore_ascii_case("b") => {
                self.config.human_side = Color::Black;
            }
            Some(_) => self.config.human_side = Color::White,
            None => return Ok(()),
        }

        loop {
            match self.status() {
                GameStatus::InProgress => {}
                status => {
                    writeln!(out, "{}", render_board(&self.board))?;
                    writeln!(out, "{}", describe_status(status))?;
                    return Ok(());
                }
            }

            if self.board.side_to_move() == self.config.human_side {
                writeln!(out, "{}\n", render_board(&self.board))?;
                if !self.prompt_human_move(&mut lines, &mut out)? {
                    return Ok(());
                }
            } else {
                let mv = self.engine_move().expect("status said in progress");
                writeln!(out, "rondo plays: {mv}")?;
            }
        }
    }

    /// Prompt until the human enters a legal move or a command. Returns
    /// `false` when the human quits or input closes.
    fn prompt_human_move(
        &mut self,
        lines: &mut impl Iterator<Item = io::Result<String>>,
        out: &mut impl Write,
    ) -> Result<bool, GameError> {
        loop {
            write!(out, "Your move: ")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                return Ok(false);
            };
            let input = line.trim();

            match input {
                "quit" => return Ok(false),
                "moves" => {
                    let all: Vec<String> = generate_legal_moves(&self.board)
                        .iter()
                        .map(|m| m.to_uci())
                        .collect();
                    writeln!(out, "{}", all.join(" "))?;
                    continue;
                }
                _ => {}
            }

            match Move::parse_uci(input) {
                Some(mv) if self.play_move(mv) => return Ok(true),
                _ => writeln!(out, "Illegal move")?,
            }
        }
    }
}

/// Human-readable description of a terminal status.
fn describe_status(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "game in progress",
        GameStatus::Checkmate {
            winner: Color::White,
        } => "White wins by checkmate.",
        GameStatus::Checkmate {
            winner: Color::Black,
        } => "Black wins by checkmate.",
        GameStatus::Stalemate => "Stalemate.",
        GameStatus::FiftyMoveDraw => "Draw by the fifty-move rule.",
        GameStatus::RepetitionDraw => "Draw by threefold repetition.",
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, GameConfig, GameStatus};
    use rondo_core::{Color, Move, generate_legal_moves};
    use std::time::Duration;

    fn quick_config() -> GameConfig {
        GameConfig {
            max_depth: 3,
            move_time: Duration::from_millis(100),
            ..GameConfig::default()
        }
    }

    #[test]
    fn fresh_game_is_in_progress() {
        let game = Game::new(quick_config());
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn play_move_rejects_illegal_input() {
        let mut game = Game::new(quick_config());
        assert!(!game.play_move(Move::parse_uci("e2e5").unwrap()));
        assert!(!game.play_move(Move::parse_uci("a1a5").unwrap()));
        assert!(game.play_move(Move::parse_uci("e2e4").unwrap()));
        assert_eq!(game.board().side_to_move(), Color::Black);
    }

    #[test]
    fn engine_opens_with_a_book_move() {
        let mut game = Game::new(quick_config());
        let mv = game.engine_move().unwrap();
        // All book lines start with e4, d4 or c4.
        assert!(["e2e4", "d2d4", "c2c4"].contains(&mv.to_uci().as_str()));
    }

    #[test]
    fn engine_answers_outside_the_book() {
        let mut game = Game::new(GameConfig {
            max_book_plies: 0,
            ..quick_config()
        });
        game.play_move(Move::parse_uci("e2e4").unwrap());
        let before = *game.board();
        let legal = generate_legal_moves(&before);
        let mv = game.engine_move().unwrap();
        assert!(legal.contains(&mv));
        assert_eq!(game.board().side_to_move(), Color::White);
    }

    #[test]
    fn repetition_is_detected_after_three_occurrences() {
        let mut game = Game::new(quick_config());
        // Shuffle the knights back and forth twice; the start position (with
        // its hash) recurs for the third time on the final move.
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
            assert_eq!(game.status(), GameStatus::InProgress);
            assert!(game.play_move(Move::parse_uci(uci).unwrap()));
        }
        assert_eq!(game.status(), GameStatus::RepetitionDraw);
    }

    #[test]
    fn checkmate_is_reported_for_the_winner() {
        let mut game = Game::new(quick_config());
        // Fool's mate.
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            assert!(game.play_move(Move::parse_uci(uci).unwrap()));
        }
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
    }
}
