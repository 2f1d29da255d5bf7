/// Rolling window of recent frame times (seconds). Storage is allocated once.
pub struct FrameHistory {
    samples: Vec<f64>,
    capacity: usize,
    next: usize,
    filled: bool,
}

/// Summary of the frames currently in the window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub fps: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            next: 0,
            filled: false,
        }
    }

    /// Record one frame, dropping the oldest once the window is full.
    pub fn push(&mut self, dt: f64) {
        if !self.filled {
            self.samples.push(dt);
            if self.samples.len() == self.capacity {
                self.filled = true;
            }
            return;
        }
        self.samples[self.next] = dt;
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Frame times from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.samples.split_at(self.next);
        older.iter().chain(newer).copied()
    }

    pub fn stats(&self) -> FrameStats {
        if self.is_empty() {
            return FrameStats::default();
        }
        let mut sum = 0.0;
        let mut min = f64::MAX;
        let mut max = 0.0f64;
        for t in self.iter() {
            sum += t;
            min = min.min(t);
            max = max.max(t);
        }
        let avg = sum / self.len() as f64;
        FrameStats {
            fps: if avg > 0.0 { 1.0 / avg } else { 0.0 },
            avg,
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_frames_in_order() {
        let mut history = FrameHistory::new(3);
        for dt in [0.01, 0.02, 0.03, 0.04, 0.05] {
            history.push(dt);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.iter().collect::<Vec<_>>(), vec![0.03, 0.04, 0.05]);
    }

    #[test]
    fn partial_window_starts_at_first_frame() {
        let mut history = FrameHistory::new(4);
        history.push(0.5);
        history.push(0.25);
        assert_eq!(history.iter().collect::<Vec<_>>(), vec![0.5, 0.25]);
    }

    #[test]
    fn stats_cover_window() {
        let mut history = FrameHistory::new(8);
        assert_eq!(history.stats(), FrameStats::default());

        for dt in [0.010, 0.020, 0.030] {
            history.push(dt);
        }
        let stats = history.stats();
        assert!((stats.avg - 0.020).abs() < 1e-12);
        assert!((stats.fps - 50.0).abs() < 1e-9);
        assert_eq!(stats.min, 0.010);
        assert_eq!(stats.max, 0.030);
    }
}
