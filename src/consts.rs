/// Depth of the flat network and of the leadership breakaway.
pub const LEVELS: usize = 7;

/// Flat network commission per level, in percent (level 1 first).
pub const NETWORK_LEVEL_RATES: [f64; LEVELS] = [10.0, 5.0, 3.0, 2.0, 1.0, 0.5, 0.5];

/// Leadership override paid on each qualifying level, in percent.
pub const LEADERSHIP_OVERRIDE_PERCENT: f64 = 2.0;

// Setting keys used by the backend's settings table.
pub const SETTING_CYCLE_AMOUNT: &str = "binary_cycle_amount";
pub const SETTING_CYCLE_COMMISSION: &str = "binary_cycle_commission";
pub const SETTING_MAX_CYCLES_PER_DAY: &str = "binary_max_cycles_per_day";
pub const SETTING_SPONSOR_BONUS_PERCENT: &str = "binary_sponsor_bonus_percent";
