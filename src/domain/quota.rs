/// Usage above this percentage is reported as a warning
pub const QUOTA_WARN_THRESHOLD_PCT: f64 = 80.0;

/// Private repository quota consumption of an account
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaStatus {
    pub used: u64,
    pub limit: u64,
    /// Percentage of the limit in use, rounded to two decimals
    pub used_pct: f64,
    pub over_threshold: bool,
}

impl QuotaStatus {
    pub fn new(used: u64, limit: u64) -> Self {
        let used_pct = used_percentage(used, limit);
        Self {
            used,
            limit,
            used_pct,
            over_threshold: used_pct > QUOTA_WARN_THRESHOLD_PCT,
        }
    }
}

impl std::fmt::Display for QuotaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} ({:.2}%) private repositories used",
            self.used, self.limit, self.used_pct
        )
    }
}

/// `used / limit * 100`, rounded half away from zero to two decimals.
///
/// A zero limit is 0% when nothing is used and 100% otherwise.
fn used_percentage(used: u64, limit: u64) -> f64 {
    if limit == 0 {
        return if used == 0 { 0.0 } else { 100.0 };
    }
    let pct = used as f64 / limit as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
