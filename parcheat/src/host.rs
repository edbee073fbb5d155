use std::time::Duration;

use parcheat_lib::{CodePlugin, MemoryAccessor};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

pub const DEFAULT_INTERVAL_MS: u64 = 16;
pub const DEFAULT_CYCLES: u32 = 60;

/// Calls `execute` once per tick. The plugin must already be started.
pub async fn drive_cycles(
    plugin: &dyn CodePlugin,
    memory: &mut dyn MemoryAccessor,
    cycles: u32,
    period: Duration,
) {
    let mut ticker = interval(period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    for cycle in 0..cycles {
        let _ = ticker.tick().await;
        plugin.execute(memory);
        debug!("cycle {}", cycle);
    }
    info!("{}: {} cycles done", plugin.name(), cycles);
}
