//! Identifier arithmetic on the ring (spec.md component 4.A).
//!
//! A `ModRange` is the half-open interval `[start, stop) mod divisor`,
//! possibly wrapping past zero. Pure and side-effect free; it owns nothing
//! outside itself.

/// `start == stop` is the *full ring* (spec.md open question 4; matches
/// `original_source/chord_node.py`'s `ModRange.__init__`, which falls
/// through to its two-sub-range `else` branch whenever `start < stop` is
/// false and `stop != 0` — including when `start == stop`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModRange {
    start: u32,
    stop: u32,
    divisor: u32,
}

impl ModRange {
    pub fn new(start: u32, stop: u32, divisor: u32) -> Self {
        assert!(divisor > 0, "ModRange divisor must be positive");
        ModRange {
            start: start % divisor,
            stop: stop % divisor,
            divisor,
        }
    }

    /// The (up to two) non-wrapping sub-intervals this range decomposes into.
    fn sub_intervals(&self) -> Vec<(u32, u32)> {
        if self.start < self.stop {
            vec![(self.start, self.stop)]
        } else if self.stop == 0 {
            vec![(self.start, self.divisor)]
        } else {
            vec![(self.start, self.divisor), (0, self.stop)]
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        let id = id % self.divisor;
        self.sub_intervals()
            .iter()
            .any(|&(lo, hi)| id >= lo && id < hi)
    }

    pub fn len(&self) -> u32 {
        self.sub_intervals().iter().map(|&(lo, hi)| hi - lo).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.sub_intervals().into_iter().flat_map(|(lo, hi)| lo..hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_wrapping_range() {
        let r = ModRange::new(10, 20, 128);
        assert!(r.contains(10));
        assert!(r.contains(19));
        assert!(!r.contains(20));
        assert!(!r.contains(9));
        assert_eq!(r.len(), 10);
    }

    #[test]
    fn wrapping_range() {
        let r = ModRange::new(120, 5, 128);
        assert!(r.contains(120));
        assert!(r.contains(127));
        assert!(r.contains(0));
        assert!(r.contains(4));
        assert!(!r.contains(5));
        assert!(!r.contains(119));
        assert_eq!(r.len(), 13);
    }

    #[test]
    fn full_ring_when_start_equals_stop() {
        let r = ModRange::new(42, 42, 128);
        assert!(!r.is_empty());
        assert_eq!(r.len(), 128);
        assert!(r.contains(42));
        assert!(r.contains(0));
        assert!(r.contains(127));
        assert_eq!(r.iter().count(), 128);
    }

    #[test]
    fn full_ring_when_start_equals_stop_at_zero() {
        let r = ModRange::new(0, 0, 128);
        assert_eq!(r.len(), 128);
        assert!(r.contains(0));
        assert!(r.contains(127));
    }

    #[test]
    fn full_ring_when_stop_wraps_to_start_value_zero() {
        let r = ModRange::new(5, 0, 128);
        assert_eq!(r.len(), 123);
        assert!(r.contains(5));
        assert!(r.contains(127));
        assert!(!r.contains(0));
    }

    /// `protocol::find_predecessor`'s membership test is
    /// `ModRange(id(p)+1, id(successor_of(p))+1, NODES)`; on a single-node
    /// ring `p == successor_of(p) == self`, so this degenerates to exactly
    /// the `start == stop` case and must contain every id, or routing never
    /// terminates (a single node must answer for the whole ring).
    #[test]
    fn single_node_ring_membership_contains_every_id() {
        let self_id = 42;
        let membership = ModRange::new((self_id + 1) % 128, (self_id + 1) % 128, 128);
        for id in 0..128 {
            assert!(membership.contains(id), "single-node ring must own id {id}");
        }
    }

    #[test]
    fn iteration_concatenates_sub_intervals() {
        let r = ModRange::new(126, 2, 128);
        let items: Vec<u32> = r.iter().collect();
        assert_eq!(items, vec![126, 127, 0, 1]);
    }

    #[test]
    fn normalizes_start_and_stop_modulo_divisor() {
        let r = ModRange::new(130, 260, 128);
        assert_eq!(r, ModRange::new(2, 4, 128));
    }
}
