//! Opening book: canned lines mapped from position hash to moves.

use std::collections::HashMap;

use tracing::warn;

use rondo_core::{Board, Move, generate_legal_moves};

/// Opening lines as UCI move sequences from the starting position.
const BOOK_LINES: &[&[&str]] = &[
    &["e2e4", "e7e5", "g1f3", "b8c6"],
    &["e2e4", "c7c5"],
    &["d2d4", "d7d5"],
    &["d2d4", "g8f6"],
    &["c2c4"],
    &["d2d4", "d7d5", "c1g5"], // Trompowsky-style line
    &["e2e4", "d7d5"],         // Scandinavian
];

/// A map from position hash to the book moves known for that position.
///
/// Built once by replaying each line from the starting position; every
/// replayed move is validated against the legal-move set, so the book can
/// never suggest an illegal move for the position it was recorded in.
pub struct OpeningBook {
    entries: HashMap<u64, Vec<Move>>,
}

impl OpeningBook {
    /// Build the standard book from the built-in lines.
    pub fn standard() -> OpeningBook {
        let mut book = OpeningBook {
            entries: HashMap::new(),
        };
        for line in BOOK_LINES {
            book.add_line(line);
        }
        book
    }

    /// Replay one line from the start, recording each position's move.
    /// A line that goes illegal mid-way is abandoned at that point.
    fn add_line(&mut self, line: &[&str]) {
        let mut board = Board::starting_position();
        for &uci in line {
            let Some(mv) = Move::parse_uci(uci) else {
                warn!(uci, "unparseable book move, dropping rest of line");
                return;
            };
            if !generate_legal_moves(&board).contains(&mv) {
                warn!(uci, "illegal book move, dropping rest of line");
                return;
            }

            let known = self.entries.entry(board.hash()).or_default();
            if !known.contains(&mv) {
                known.push(mv);
            }

            let mover = board.side_to_move();
            board.apply(mv);
            board.set_side_to_move(mover.flip());
        }
    }

    /// Look up a book move for `board`.
    ///
    /// Returns the first recorded move that is in `legal`, provided the game
    /// is still within the first `max_book_plies` plies.
    pub fn lookup(
        &self,
        board: &Board,
        legal: &[Move],
        ply_count: u32,
        max_book_plies: u32,
    ) -> Option<Move> {
        if ply_count >= max_book_plies {
            return None;
        }
        self.entries
            .get(&board.hash())?
            .iter()
            .copied()
            .find(|mv| legal.contains(mv))
    }

    /// Number of distinct positions the book knows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::OpeningBook;
    use rondo_core::{Board, Move, generate_legal_moves};

    #[test]
    fn book_knows_the_starting_position() {
        let book = OpeningBook::standard();
        let board = Board::starting_position();
        let legal = generate_legal_moves(&board);
        let mv = book.lookup(&board, &legal, 0, 12).expect("book move");
        assert!(legal.contains(&mv));
    }

    #[test]
    fn book_follows_a_known_line() {
        let book = OpeningBook::standard();
        let mut board = Board::starting_position();
        for uci in ["e2e4", "e7e5", "g1f3"] {
            let legal = generate_legal_moves(&board);
            let expected = Move::parse_uci(uci).unwrap();
            // Each prefix position of the 1.e4 e5 line is in the book.
            let got = book.lookup(&board, &legal, 0, 12);
            assert!(got.is_some(), "no book move before {uci}");
            let mover = board.side_to_move();
            board.apply(expected);
            board.set_side_to_move(mover.flip());
        }
    }

    #[test]
    fn ply_cap_silences_the_book() {
        let book = OpeningBook::standard();
        let board = Board::starting_position();
        let legal = generate_legal_moves(&board);
        assert!(book.lookup(&board, &legal, 12, 12).is_none());
        assert!(book.lookup(&board, &legal, 13, 12).is_none());
    }

    #[test]
    fn unknown_position_misses() {
        let book = OpeningBook::standard();
        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let legal = generate_legal_moves(&board);
        assert!(book.lookup(&board, &legal, 0, 12).is_none());
    }

    #[test]
    fn every_book_entry_is_nonempty() {
        let book = OpeningBook::standard();
        assert!(!book.is_empty());
        assert!(book.len() >= 4, "several distinct positions expected");
    }
}
