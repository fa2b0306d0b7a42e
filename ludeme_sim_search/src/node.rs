use atree::{Arena, Token};
use ludeme_sim::data_structures::PlayerVec;
use ludeme_sim::prelude::{Move, TrialStatus};

/// Read access to a search tree node. Child `n` is the node reached by the `n`-th legal move
/// of the node's state.
pub trait SearchNode: Sized {
    fn num_legal_moves(&self) -> usize;

    /// `None` if the node was not expanded yet or `n` is out of range.
    fn child_for_nth_legal_move(&self, n: usize) -> Option<Self>;

    /// Mean score in `[0, 1]` of `player` over the playouts through this node.
    fn average_score(&self, player: u8) -> f32;

    fn num_visits(&self) -> u32;
}

#[derive(Debug, Clone)]
pub struct NodeData {
    /// Move leading to this node, `None` for the root.
    pub m: Option<Move>,
    pub expanded: bool,
    pub visits: u32,
    /// Sum of playout scores, indexed by player (index 0 unused).
    pub score_sums: PlayerVec<f32>,
    /// Status of the trial when the node was last reached.
    pub status: TrialStatus,
}

impl NodeData {
    #[inline]
    pub fn new(m: Option<Move>, num_players: u8) -> Self {
        Self {
            m,
            expanded: false,
            visits: 0,
            score_sums: (0..=num_players).map(|_| 0.0).collect(),
            status: TrialStatus::Ongoing,
        }
    }

    #[inline]
    pub fn mover(&self) -> Option<u8> {
        self.m.as_ref().map(|m| m.mover)
    }

    #[inline]
    pub fn average_score(&self, player: u8) -> f32 {
        if self.visits == 0 {
            return 0.0;
        }
        self.score_sums.get(player as usize).copied().unwrap_or_default() / self.visits as f32
    }

    /// Adds one playout ending in `status`.
    pub fn record(&mut self, status: TrialStatus, num_players: u8) {
        self.visits += 1;
        for player in 1..=num_players {
            if let Some(sum) = self.score_sums.get_mut(player as usize) {
                *sum += status.score_for(player, num_players);
            }
        }
    }
}

/// Borrowed view of one node of a search tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub arena: &'a Arena<NodeData>,
    pub token: Token,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub fn new(arena: &'a Arena<NodeData>, token: Token) -> Self {
        Self { arena, token }
    }

    #[inline]
    pub fn data(&self) -> Option<&'a NodeData> {
        self.arena.get(self.token).map(|node| &node.data)
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let arena = self.arena;
        self.arena
            .get(self.token)
            .into_iter()
            .flat_map(move |node| node.children_tokens(arena))
            .map(move |token| NodeRef::new(arena, token))
    }
}

impl<'a> SearchNode for NodeRef<'a> {
    fn num_legal_moves(&self) -> usize {
        self.children().count()
    }

    fn child_for_nth_legal_move(&self, n: usize) -> Option<Self> {
        self.children().nth(n)
    }

    fn average_score(&self, player: u8) -> f32 {
        self.data().map(|d| d.average_score(player)).unwrap_or_default()
    }

    fn num_visits(&self) -> u32 {
        self.data().map(|d| d.visits).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates_scores_per_player() {
        let mut data = NodeData::new(None, 3);
        data.record(TrialStatus::Won(2), 3);
        data.record(TrialStatus::Lost(1), 3);
        assert_eq!(2, data.visits);
        assert_eq!(0.0, data.average_score(1));
        assert_eq!(0.75, data.average_score(2));
        assert_eq!(0.25, data.average_score(3));
    }

    #[test]
    fn test_children_follow_append_order() {
        let (mut arena, root) = Arena::with_data(NodeData::new(None, 2));
        for to in 0..3 {
            let mut m = Move::pass(1);
            m.to = to;
            root.append(&mut arena, NodeData::new(Some(m), 2));
        }
        let view = NodeRef::new(&arena, root);
        assert_eq!(3, view.num_legal_moves());
        let second = view.child_for_nth_legal_move(1).unwrap();
        assert_eq!(Some(1), second.data().and_then(|d| d.m.as_ref()).map(|m| m.to));
        assert!(view.child_for_nth_legal_move(3).is_none());
        assert_eq!(0, second.num_visits());
        assert_eq!(0, second.num_legal_moves());
    }
}
