use enum_map::{Enum, EnumMap};
use enumset::{EnumSet, EnumSetType};

use super::OFF;

/// Transient scratch fields of an `EvalContext`.
#[derive(Debug, PartialOrd, Ord, Hash, EnumSetType, Enum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[enumset(repr = "u16")]
pub enum EvalContextData {
    From,
    To,
    Between,
    Site,
    Level,
    Value,
    Player,
    Pips,
}

/// Read or write set over the transient fields.
pub type ContextFields = EnumSet<EvalContextData>;

/// The transient part of an evaluation context. Every field starts as `OFF`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalContext(EnumMap<EvalContextData, i32>);

impl Default for EvalContext {
    #[inline]
    fn default() -> Self {
        Self(EnumMap::from_fn(|_| OFF))
    }
}

impl EvalContext {
    #[inline]
    pub fn get(&self, field: EvalContextData) -> i32 {
        self.0[field]
    }

    /// Overwrites `field`, returning the previous value.
    #[inline]
    pub fn replace(&mut self, field: EvalContextData, value: i32) -> i32 {
        std::mem::replace(&mut self.0[field], value)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (EvalContextData, i32)> + '_ {
        self.0.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_off() {
        let ec = EvalContext::default();
        assert!(ec.iter().all(|(_, v)| v == OFF));
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut ec = EvalContext::default();
        assert_eq!(OFF, ec.replace(EvalContextData::To, 4));
        assert_eq!(4, ec.replace(EvalContextData::To, 7));
        assert_eq!(7, ec.get(EvalContextData::To));
        assert_eq!(OFF, ec.get(EvalContextData::From));
    }
}
