use serde::{Deserialize, Serialize};

/// Rest days counted against a goal. Derived on every load, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Progress {
    pub current: i64,
    pub target: i32,
    /// 0..=100
    pub percentage: f64,
}

impl Progress {
    pub fn remaining(&self) -> i64 {
        (i64::from(self.target) - self.current).max(0)
    }

    pub fn is_met(&self) -> bool {
        self.target > 0 && self.current >= i64::from(self.target)
    }
}
