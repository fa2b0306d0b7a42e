use enumset::{EnumSet, EnumSetType};

/// Taxonomy of the rule constructs a game uses. Only used for classification,
/// never for selecting algorithms.
#[derive(Debug, PartialOrd, Ord, Hash, EnumSetType)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[enumset(repr = "u128")]
pub enum Concept {
    // Equipment
    Board,
    SquareTiling,
    Dice,
    // Arithmetic
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Maximum,
    Minimum,
    Random,
    // Logic
    Conjunction,
    Disjunction,
    Negation,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    // Queries
    IsEmpty,
    IsFriend,
    IsEnemy,
    IsIn,
    CanMove,
    NoMoves,
    NoPiece,
    AllSites,
    AllValues,
    AllDiceUsed,
    AllPassed,
    PieceCount,
    PieceValue,
    // Decisions and effects
    AddDecision,
    StepDecision,
    HopDecision,
    HopCapture,
    ReplacementCapture,
    RemoveEffect,
    PromotionEffect,
    PassDecision,
    SetNextPlayer,
    Scoring,
    SetPending,
    Team,
    Stacking,
    Roll,
    // Control
    ForEachSite,
    ForEachValue,
    ForEachPlayer,
    ForEachLevel,
    ForEachDie,
    Then,
    Conditional,
    MoveFilter,
    MaxCapture,
    MinCapture,
    MaxDistance,
    MinDistance,
    // Repetition
    PositionalSuperko,
    SituationalSuperko,
    TurnKo,
    SituationalTurnKo,
    // Outcomes
    Win,
    Loss,
    Draw,
}

pub type Concepts = EnumSet<Concept>;
