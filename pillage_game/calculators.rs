use pillage_types::common::{GameDuration, ResourceGroup, ResourceKind};

/// Highest level the curves are tuned for.
pub const MAX_LEVEL: i32 = 30;

/// Population a house provides at `level`.
pub fn house_capacity(level: i32) -> u32 {
    if level <= 0 {
        return 0;
    }
    let level = level as f64;
    (8.0 * level.powf(2.0) + 10.0 * 1.32f64.powf(level)) as u32
}

/// Hourly output of a building producing `kind` at `level`.
pub fn production_per_hour(kind: ResourceKind, level: i32) -> u32 {
    if level <= 0 {
        return 0;
    }
    let level = level as f64;
    let value = match kind {
        ResourceKind::Beer => 10.0 + 6.0 * level.powf(1.15),
        ResourceKind::Wood | ResourceKind::Stone | ResourceKind::Hop => {
            20.0 + 12.0 * level.powf(1.2)
        }
    };
    value as u32
}

/// Wood and stone needed to raise a charcoal kiln from `level`. Level 0 is
/// the cost of placing it.
pub fn charcoal_kiln_cost(level: u32) -> ResourceGroup {
    ResourceGroup::new(
        45u32.saturating_add(level.saturating_mul(5)),
        80u32.saturating_add(level.saturating_mul(30)),
        0,
        0,
    )
}

/// Construction time of a charcoal kiln raised from `level`.
pub fn charcoal_kiln_construction_time(level: u32) -> GameDuration {
    GameDuration::from_secs(u64::from(level) * 30 + 40)
}
