//! Search score bounds and move ordering priorities.

use crate::board::MAX_PLY;

// ============================================================================
// SCORES
// ============================================================================

/// Larger than any score the search can return
pub const INFINITY: i32 = 32000;

/// Score of the side to move being checkmated at the root, before ply bias
pub const MATE_SCORE: i32 = 31000;

/// Scores with absolute value >= this are checkmate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores are tried earlier: TT > captures > promotions > killers > history

/// Hash move from the transposition table
pub const TT_MOVE_SCORE: i32 = 1 << 20;

/// Base for captures, ranked among themselves by MVV-LVA
pub const CAPTURE_SCORE: i32 = 1 << 18;

/// Base for quiet promotions, ranked by the promoted piece
pub const PROMOTION_SCORE: i32 = 1 << 17;

/// First killer move (quiet that caused a beta cutoff at the same ply)
pub const KILLER1_SCORE: i32 = 20000;

/// Second killer move (the displaced first killer)
pub const KILLER2_SCORE: i32 = 10000;

/// History scores saturate here so they never outrank a killer
pub const HISTORY_MAX: i32 = KILLER2_SCORE - 1;

// ============================================================================
// LIMITS
// ============================================================================

/// Quiescence falls back to the static evaluation at this ply
pub const MAX_QUIESCENCE_PLY: usize = MAX_PLY;

/// Stop flag, clock and node limit are polled once per this many nodes
pub const NODE_CHECK_INTERVAL: u64 = 1024;
