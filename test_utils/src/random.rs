//! Deterministic [`RandomSource`] for scripting NPC decisions.

use promenade::wander::RandomSource;

/// Replays a fixed list of unit values, repeating the last one forever.
///
/// An empty script yields `0.0`.
///
/// # Examples
/// ```
/// use promenade::wander::RandomSource;
/// use test_utils::ScriptedRandom;
/// let mut rng = ScriptedRandom::new([0.25, 0.75]);
/// assert_eq!(rng.unit(), 0.25);
/// assert_eq!(rng.unit(), 0.75);
/// assert_eq!(rng.unit(), 0.75);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Creates a source that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f32 {
        let value = self
            .values
            .get(self.cursor)
            .or_else(|| self.values.last())
            .copied()
            .unwrap_or(0.0);
        self.cursor += 1;
        value
    }
}
