//! Cyclic index arithmetic for the home carousel.

/// A cyclic cursor over `len` entries.
///
/// `next`/`prev` wrap modulo `len` and are no-ops while the carousel is
/// empty, so there is never a modulo-by-zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resets the entry count, e.g. when a fetch completes. The cursor
    /// restarts at the first entry.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_visits_each_index_once_per_cycle() {
        for n in 1..=8 {
            let mut carousel = Carousel::new(n);
            let mut visited = Vec::new();
            for _ in 0..n {
                visited.push(carousel.index());
                carousel.next();
            }
            visited.sort_unstable();
            assert_eq!(visited, (0..n).collect::<Vec<_>>());
            // Wrapped back to the start after a full cycle
            assert_eq!(carousel.index(), 0);
        }
    }

    #[test]
    fn test_next_and_prev_are_mutual_inverses() {
        for n in 1..=8 {
            for start in 0..n {
                let mut carousel = Carousel::new(n);
                for _ in 0..start {
                    carousel.next();
                }
                assert_eq!(carousel.index(), start);

                carousel.next();
                carousel.prev();
                assert_eq!(carousel.index(), start);

                carousel.prev();
                carousel.next();
                assert_eq!(carousel.index(), start);
            }
        }
    }

    #[test]
    fn test_prev_wraps_to_last_entry() {
        let mut carousel = Carousel::new(5);
        carousel.prev();
        assert_eq!(carousel.index(), 4);
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut carousel = Carousel::new(0);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        carousel.prev();
        assert_eq!(carousel.index(), 0);
    }
}
