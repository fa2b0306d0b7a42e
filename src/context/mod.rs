use std::ops::{Deref, DerefMut};

use crate::game::Game;
use crate::rng::RngState;
use crate::state::{State, Trial, Turn};
use crate::types::logging::EventLog;
use crate::types::{EvalContext, EvalContextData};

/// Everything one playthrough evaluates against: the shared compiled game, the mutable
/// state and history, and the transient fields bound by combinators.
///
/// A `Context` is driven by a single thread. Parallel callers clone one per worker.
#[derive(Debug, Clone)]
pub struct Context<'g> {
    pub game: &'g Game,
    pub state: State,
    pub trial: Trial,
    pub rng: RngState,
    eval: EvalContext,
    computing_stalemate: bool,
    pub log: Box<EventLog>,
}

impl<'g> Context<'g> {
    /// Fresh context with the initial state of `game`. Start rules are not applied;
    /// see `Game::start`.
    pub fn new(game: &'g Game) -> Self {
        ContextBuilder::new(game).build()
    }

    /// Value of a transient field, `OFF` when unbound.
    #[inline]
    pub fn get(&self, field: EvalContextData) -> i32 {
        self.eval.get(field)
    }

    /// Overwrites a field already guarded by an enclosing `Scoped`.
    #[inline]
    pub(crate) fn rebind(&mut self, field: EvalContextData, value: i32) {
        self.eval.replace(field, value);
    }

    #[inline]
    pub fn eval_context(&self) -> &EvalContext {
        &self.eval
    }

    #[inline]
    pub fn is_computing_stalemate(&self) -> bool {
        self.computing_stalemate
    }

    /// Binds `field` to `value` until the returned guard is dropped.
    #[inline]
    pub fn bind(&mut self, field: EvalContextData, value: i32) -> Scoped<'_, 'g> {
        let previous = self.eval.replace(field, value);
        Scoped {
            context: self,
            restore: Restore::Field(field, previous),
        }
    }

    /// Marks the context as computing a stalemate check until the guard is dropped.
    /// Returns `None` if a check is already in progress.
    #[inline]
    pub fn enter_stalemate_check(&mut self) -> Option<Scoped<'_, 'g>> {
        if self.computing_stalemate {
            return None;
        }
        self.computing_stalemate = true;
        Some(Scoped {
            context: self,
            restore: Restore::Stalemate(false),
        })
    }

    /// Hands the turn to `player` until the guard is dropped.
    #[inline]
    pub fn swap_turn(&mut self, player: u8) -> Scoped<'_, 'g> {
        let turn = Turn {
            mover: player,
            next: self.state.successor(player),
            prev: self.state.mover(),
        };
        let previous = self.state.set_turn(turn);
        Scoped {
            context: self,
            restore: Restore::Turn(previous),
        }
    }
}

enum Restore {
    Field(EvalContextData, i32),
    Stalemate(bool),
    Turn(Turn),
}

/// Scope guard over a `Context`. Restores what it changed when dropped, on every exit path.
pub struct Scoped<'c, 'g> {
    context: &'c mut Context<'g>,
    restore: Restore,
}

impl<'c, 'g> Scoped<'c, 'g> {
    /// Rebinds the guarded field. The value restored on drop is unchanged.
    #[inline]
    pub fn set(&mut self, value: i32) {
        if let Restore::Field(field, _) = self.restore {
            self.context.eval.replace(field, value);
        }
    }
}

impl<'c, 'g> Deref for Scoped<'c, 'g> {
    type Target = Context<'g>;

    #[inline]
    fn deref(&self) -> &Context<'g> {
        self.context
    }
}

impl<'c, 'g> DerefMut for Scoped<'c, 'g> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Context<'g> {
        self.context
    }
}

impl<'c, 'g> Drop for Scoped<'c, 'g> {
    #[inline]
    fn drop(&mut self) {
        match self.restore {
            Restore::Field(field, previous) => {
                self.context.eval.replace(field, previous);
            }
            Restore::Stalemate(previous) => self.context.computing_stalemate = previous,
            Restore::Turn(previous) => {
                self.context.state.set_turn(previous);
            }
        }
    }
}

#[derive(Clone)]
pub struct ContextBuilder<'g> {
    pub game: &'g Game,
    pub seed: u64,
    pub enable_log: bool,
}

impl<'g> ContextBuilder<'g> {
    pub fn new(game: &'g Game) -> Self {
        Self {
            game,
            seed: 0,
            enable_log: false,
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub fn with_enable_log(self, enable_log: bool) -> Self {
        Self { enable_log, ..self }
    }

    pub fn build(self) -> Context<'g> {
        let info = &self.game.info;
        let mut state = State::new(info.num_players, info.board.num_sites(), info.num_dice());
        for (index, players) in info.teams.iter().enumerate() {
            for &player in players {
                state.set_team(player, index as u8 + 1);
            }
        }
        Context {
            game: self.game,
            state,
            trial: Trial::new(),
            rng: RngState::seed_from_u64(self.seed),
            eval: EvalContext::default(),
            computing_stalemate: false,
            log: Box::new(EventLog::new(self.enable_log)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::types::OFF;

    #[test]
    fn test_bind_restores_on_drop() {
        let game = demo::breakthrough(4).unwrap();
        let mut ctx = Context::new(&game);
        {
            let mut scope = ctx.bind(EvalContextData::Site, 3);
            assert_eq!(3, scope.get(EvalContextData::Site));
            scope.set(5);
            {
                let inner = scope.bind(EvalContextData::Site, 9);
                assert_eq!(9, inner.get(EvalContextData::Site));
            }
            assert_eq!(5, scope.get(EvalContextData::Site));
        }
        assert_eq!(OFF, ctx.get(EvalContextData::Site));
    }

    #[test]
    fn test_stalemate_guard_is_not_reentrant() {
        let game = demo::breakthrough(4).unwrap();
        let mut ctx = Context::new(&game);
        {
            let mut guard = ctx.enter_stalemate_check().unwrap();
            assert!(guard.is_computing_stalemate());
            assert!(guard.enter_stalemate_check().is_none());
        }
        assert!(!ctx.is_computing_stalemate());
    }

    #[test]
    fn test_swap_turn_restores_turn_and_hash() {
        let game = demo::breakthrough(4).unwrap();
        let mut ctx = Context::new(&game);
        let before = ctx.state.clone();
        {
            let scope = ctx.swap_turn(2);
            assert_eq!(2, scope.state.mover());
            assert_eq!(1, scope.state.next());
        }
        assert_eq!(before, ctx.state);
    }
}
