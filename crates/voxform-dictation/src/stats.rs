use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Counters for one start -> stop cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleStats {
    pub cycle_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Successful restarts after the engine ended on its own.
    pub engine_restarts: usize,
    /// Restart attempts the engine rejected.
    pub failed_restarts: usize,
    pub final_segments: usize,
    pub engine_errors: usize,
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleStats {
    pub fn new() -> Self {
        Self {
            cycle_id: Uuid::new_v4(),
            started_at: Utc::now(),
            engine_restarts: 0,
            failed_restarts: 0,
            final_segments: 0,
            engine_errors: 0,
        }
    }

    /// Seconds since the cycle started.
    pub fn elapsed_secs(&self) -> f32 {
        let elapsed = Utc::now() - self.started_at;
        elapsed.num_milliseconds() as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cycle_is_zeroed() {
        let stats = CycleStats::new();
        assert!(!stats.cycle_id.is_nil());
        assert_eq!(stats.engine_restarts, 0);
        assert_eq!(stats.failed_restarts, 0);
        assert_eq!(stats.final_segments, 0);
        assert_eq!(stats.engine_errors, 0);
        assert!(stats.elapsed_secs() < 1.0);
    }

    #[test]
    fn test_cycles_get_distinct_ids() {
        assert_ne!(CycleStats::new().cycle_id, CycleStats::new().cycle_id);
    }
}
