use std::time::{Duration, Instant};

/// Per-session statistics shown next to the playfield. Nothing is persisted.
pub struct GameMetrics {
    pub round_start: Instant,
    pub round_time: Duration,
    pub high_score: u32,
    pub rounds_played: u32,
    round_running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            round_time: Duration::ZERO,
            high_score: 0,
            rounds_played: 0,
            round_running: true,
        }
    }

    /// Refresh the round clock; frozen once the round is over
    pub fn update(&mut self) {
        if self.round_running {
            self.round_time = self.round_start.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.round_time = Duration::ZERO;
        self.round_running = true;
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.update();
        self.round_running = false;
        self.rounds_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.round_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.round_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.round_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.round_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_round_over(100);
        assert_eq!(metrics.high_score, 100);
        assert_eq!(metrics.rounds_played, 1);

        metrics.on_round_start();
        metrics.on_round_over(50);
        assert_eq!(metrics.high_score, 100);
        assert_eq!(metrics.rounds_played, 2);

        metrics.on_round_start();
        metrics.on_round_over(150);
        assert_eq!(metrics.high_score, 150);
        assert_eq!(metrics.rounds_played, 3);
    }

    #[test]
    fn test_clock_freezes_after_round_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_round_over(0);
        let frozen = metrics.round_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.round_time, frozen);

        metrics.on_round_start();
        assert_eq!(metrics.round_time, Duration::ZERO);
    }
}
