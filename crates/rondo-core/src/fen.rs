//! FEN parsing and serialization for [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::file::File;
use crate::piece::Piece;
use crate::rank::Rank;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    /// Parse a FEN string. The halfmove clock and fullmove number are
    /// optional; the fullmove number is accepted and discarded because the
    /// position model does not carry it. Parsing is all-or-nothing: the
    /// board is only produced after full validation.
    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let mut board = Board::empty();

        // Piece placement, rank 8 first.
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        for (rank_index, rank_str) in ranks.iter().enumerate() {
            let rank = Rank::from_index(7 - rank_index as u8)
                .expect("rank_index ranges over 0..8");
            let mut file_index: u8 = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file_index += digit as u8;
                } else {
                    let piece = Piece::from_fen_char(c)
                        .ok_or(FenError::InvalidPieceChar { character: c })?;
                    if file_index >= 8 {
                        return Err(FenError::BadRankLength {
                            rank_index,
                            length: file_index as usize + 1,
                        });
                    }
                    let file = File::from_index(file_index).expect("file_index checked above");
                    board.set_piece_at(Square::new(rank, file), Some(piece));
                    file_index += 1;
                }
            }

            if file_index != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file_index as usize,
                });
            }
        }

        // Active color.
        match fields[1] {
            "w" => board.set_side_to_move(Color::White),
            "b" => board.set_side_to_move(Color::Black),
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        }

        // Castling rights.
        board.set_castling(CastleRights::from_fen(fields[2])?);

        // En passant target.
        if fields[3] != "-" {
            let sq = Square::from_algebraic(fields[3]).ok_or_else(|| {
                FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                }
            })?;
            board.set_en_passant(Some(sq));
        }

        // Optional halfmove clock.
        if let Some(halfmove) = fields.get(4) {
            let clock = halfmove
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock {
                    found: halfmove.to_string(),
                })?;
            board.set_halfmove_clock(clock);
        }

        // Optional fullmove number: syntax-checked, then dropped.
        if let Some(fullmove) = fields.get(5)
            && fullmove.parse::<u32>().is_err()
        {
            return Err(FenError::InvalidHalfmoveClock {
                found: fullmove.to_string(),
            });
        }

        board.validate()?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    /// Write the position as FEN. The fullmove number is not part of the
    /// position model and is always emitted as `1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_idx in (0u8..8).rev() {
            let mut empty_run = 0u8;
            for file_idx in 0u8..8 {
                let sq = Square::from_index(rank_idx * 8 + file_idx)
                    .expect("rank and file in range");
                match self.piece_at(sq) {
                    Some(piece) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank_idx > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {}", self.side_to_move())?;
        write!(f, " {}", self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} 1", self.halfmove_clock())
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::board::Board;
    use crate::castle_rights::CastleRights;
    use crate::color::Color;
    use crate::square::Square;

    fn roundtrip(fen: &str) {
        let board: Board = fen.parse().unwrap();
        let reparsed: Board = format!("{board}").parse().unwrap();
        assert!(board == reparsed, "semantic FEN roundtrip failed for {fen}");
    }

    #[test]
    fn parse_starting_position() {
        let board: Board = STARTING_FEN.parse().unwrap();
        assert!(board == Board::starting_position());
        assert_eq!(board.hash(), Board::starting_position().hash());
    }

    #[test]
    fn parse_fields() {
        let board: Board = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR b Kq c6 4 2"
            .parse()
            .unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(
            board.castling(),
            CastleRights::WHITE_KING.insert(CastleRights::BLACK_QUEEN)
        );
        assert_eq!(board.en_passant(), Some(Square::C6));
        assert_eq!(board.halfmove_clock(), 4);
    }

    #[test]
    fn halfmove_and_fullmove_are_optional() {
        let short: Board = "4k3/8/8/8/8/8/8/4K3 w - -".parse().unwrap();
        assert_eq!(short.halfmove_clock(), 0);
        let with_clock: Board = "4k3/8/8/8/8/8/8/4K3 w - - 12".parse().unwrap();
        assert_eq!(with_clock.halfmove_clock(), 12);
        let full: Board = "4k3/8/8/8/8/8/8/4K3 w - - 12 34".parse().unwrap();
        assert_eq!(full.halfmove_clock(), 12);
    }

    #[test]
    fn roundtrips() {
        roundtrip(STARTING_FEN);
        roundtrip("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2");
        roundtrip("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        roundtrip("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
        roundtrip("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn parsed_hash_matches_recompute() {
        let board: Board = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq - 0 1"
            .parse()
            .unwrap();
        assert_eq!(board.hash(), board.recompute_hash());
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!("e4".parse::<Board>().is_err());
        assert!("8/8/8/8/8/8/8/8 w - - 0 1 extra".parse::<Board>().is_err());
    }

    #[test]
    fn rejects_bad_placement() {
        // Seven ranks.
        assert!("8/8/8/8/8/8/4k2K w - -".parse::<Board>().is_err());
        // Rank too short.
        assert!(
            "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
                .parse::<Board>()
                .is_err()
        );
        // Rank too long.
        assert!(
            "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
                .parse::<Board>()
                .is_err()
        );
        // Unknown piece letter.
        assert!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"
                .parse::<Board>()
                .is_err()
        );
        // Zero is not a valid empty-run digit.
        assert!("8/8/8/8/8/8/08/4k2K w - -".parse::<Board>().is_err());
    }

    #[test]
    fn rejects_bad_side_castling_en_passant() {
        assert!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"
                .parse::<Board>()
                .is_err()
        );
        assert!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KX - 0 1"
                .parse::<Board>()
                .is_err()
        );
        assert!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkqK - 0 1"
                .parse::<Board>()
                .is_err()
        );
        assert!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"
                .parse::<Board>()
                .is_err()
        );
        assert!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - minus 1"
                .parse::<Board>()
                .is_err()
        );
    }

    #[test]
    fn rejects_semantically_invalid_positions() {
        // No black king.
        assert!("8/8/8/8/8/8/8/4K3 w - -".parse::<Board>().is_err());
        // Two white kings.
        assert!("4k3/8/8/8/8/8/8/2K1K3 w - -".parse::<Board>().is_err());
        // Pawn on the eighth rank.
        assert!("P3k3/8/8/8/8/8/8/4K3 w - -".parse::<Board>().is_err());
        // En passant square with no pawn behind it.
        assert!("4k3/8/8/8/8/8/8/4K3 w - d6".parse::<Board>().is_err());
        // En passant square on a nonsense rank.
        assert!("4k3/8/8/8/8/8/8/4K3 w - d4".parse::<Board>().is_err());
    }
}
