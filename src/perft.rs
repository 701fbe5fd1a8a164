//! Move-generation oracle: count leaf nodes of the legal move tree.

use crate::board::{Board, Move};

impl Board {
    /// Number of leaf positions reachable in exactly `depth` legal plies.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            let backup = self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv, backup);
        }
        nodes
    }

    /// Leaf counts below each legal root move, in generation order.
    pub fn perft_divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let moves = self.generate_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for mv in moves {
            let backup = self.make_move(mv);
            counts.push((mv, self.perft(depth - 1)));
            self.unmake_move(mv, backup);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;

    #[test]
    fn divide_sums_to_perft() {
        let mut board = Board::new();
        let divide = board.perft_divide(3);
        assert_eq!(divide.len(), 20);
        let total: u64 = divide.iter().map(|(_, n)| n).sum();
        assert_eq!(total, board.perft(3));
        assert_eq!(total, 8902);
    }

    #[test]
    fn depth_zero_counts_the_root() {
        let mut board = Board::new();
        assert_eq!(board.perft(0), 1);
        assert!(board.perft_divide(0).is_empty());
    }
}
