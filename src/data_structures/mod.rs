/// Actions of one move. Most moves carry one or two.
pub type ActionList<T> = smallvec::SmallVec<[T; 4]>;

/// Undo records of one applied move, including its consequences and the turn change.
pub type StepList<T> = smallvec::SmallVec<[T; 6]>;

/// Per-player values, indexed by player (index 0 is the shared player).
pub type PlayerVec<T> = smallvec::SmallVec<[T; 5]>;

pub type Vector<T> = smallvec::SmallVec<[T; 4]>;

#[macro_export]
macro_rules! action_list {
    () => {
        $crate::smallvec::SmallVec::<[_; 4]>::new()
    };
    ($($e : expr),+ $(,)?) => {
        {
            let v: $crate::smallvec::SmallVec<[_; 4]> = $crate::smallvec::smallvec![$($e),+];
            v
        }
    }
}
