use rand::Rng;

/// Every random decision in the library goes through this trait.
///
/// It's implemented for every `rand::Rng`, so a seeded `StdRng` or the
/// thread rng can be passed anywhere a `RandomSource` is wanted. For tests
/// that need to know exactly which branch every draw takes use
/// [`ScriptedRandom`].
pub trait RandomSource {
    /// A uniform integer in `low..=high`.
    ///
    /// An empty range returns `low`.
    fn uniform_int(&mut self, low: i64, high: i64) -> i64;

    /// A uniform real in `low..high`.
    ///
    /// An empty range returns `low`.
    fn uniform_real(&mut self, low: f64, high: f64) -> f64;

    /// Pick an index into a slice of `len` items.
    fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "can't choose from nothing");
        self.uniform_int(0, len as i64 - 1) as usize
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.random_range(low..=high)
    }

    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        if high.partial_cmp(&low) != Some(std::cmp::Ordering::Greater) {
            return low;
        }
        self.random_range(low..high)
    }
}

/// A `RandomSource` that replays a fixed script.
///
/// Each value is a fraction in `[0, 1)` that is scaled into whatever range
/// the next draw asks for. So `0.0` always takes the lowest value and
/// `0.999` always the highest. The script loops when it runs out, and an
/// empty script behaves like an endless run of `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: Vec<f64>,
    idx: usize,
}

impl ScriptedRandom {
    pub fn new(script: Vec<f64>) -> Self {
        let script = script.into_iter().map(|v| v.clamp(0.0, 0.999_999)).collect();
        Self { script, idx: 0 }
    }

    /// A script that always draws the same fraction.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// How many draws have been taken so far.
    pub fn draws(&self) -> usize {
        self.idx
    }

    fn next_fraction(&mut self) -> f64 {
        let value = if self.script.is_empty() {
            0.0
        } else {
            self.script[self.idx % self.script.len()]
        };
        self.idx += 1;
        value
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        let fraction = self.next_fraction();
        if high <= low {
            return low;
        }
        let span = high - low;
        let offset = (fraction * (span + 1) as f64) as i64;
        low + offset.min(span)
    }

    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        let fraction = self.next_fraction();
        if high.partial_cmp(&low) != Some(std::cmp::Ordering::Greater) {
            return low;
        }
        low + fraction * (high - low)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_scripted_extremes() {
        let mut low = ScriptedRandom::constant(0.0);
        assert_eq!(18, low.uniform_int(18, 36));
        assert_relative_eq!(2.0, low.uniform_real(2.0, 10.0));

        let mut high = ScriptedRandom::constant(0.999);
        assert_eq!(36, high.uniform_int(18, 36));
        assert!(high.uniform_real(2.0, 10.0) < 10.0);
        assert_eq!(2, high.draws());
    }

    #[test]
    fn test_scripted_loops() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5]);
        assert_eq!(0, rng.uniform_int(0, 100));
        assert_eq!(50, rng.uniform_int(0, 100));
        assert_eq!(0, rng.uniform_int(0, 100));
    }

    #[test]
    fn test_empty_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(5, rng.uniform_int(5, 5));
        assert_eq!(5, rng.uniform_int(5, 1));
        assert_relative_eq!(1.5, rng.uniform_real(1.5, 1.5));
    }

    #[test]
    fn test_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(420);
        for _ in 0..1000 {
            let v = rng.uniform_int(150, 200);
            assert!((150..=200).contains(&v));
            let r = rng.uniform_real(0.0, 92.5);
            assert!((0.0..92.5).contains(&r));
        }
    }
}
