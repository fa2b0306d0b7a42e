use enumset::{EnumSet, EnumSetType};

/// Operational characteristics of a compiled game. Used by callers to pick
/// specialised state representations and algorithms.
#[derive(Debug, PartialOrd, Ord, Hash, EnumSetType)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[enumset(repr = "u32")]
pub enum GameFlag {
    /// Uses dice or random draws.
    Stochastic,
    HiddenInfo,
    /// More than one piece may occupy a site.
    Stacking,
    /// Sites carry a piece count.
    Count,
    /// Pieces carry a local state value.
    SiteState,
    /// Pieces carry a component value used by rules.
    PieceValue,
    Team,
    /// Legal moves are filtered by a repetition check.
    RepetitionCheck,
    Score,
    PendingValues,
    /// The mover can skip their turn.
    Pass,
    /// Moves carry consequences applied when the move is committed.
    Consequences,
    /// The rules query the legal moves of another player.
    Stalemate,
}

pub type GameFlags = EnumSet<GameFlag>;
