use super::Config;
use super::GameEngine;
use gfl_storage::Store;
use std::sync::Arc;
use std::time::Duration;

/// Drives the periodic maintenance routines.
///
/// Each tick is an interval task funneling into the same engine
/// methods the request handlers call — timers get no special lock or
/// state view. A tick that finds nothing to do is a no-op; a tick
/// that fails is logged and retried at the next interval, never
/// allowed to kill its loop.
pub struct Scheduler;

impl Scheduler {
    pub fn spawn(engine: Arc<GameEngine>, store: Arc<Store>, config: &Config) {
        log::info!(
            "scheduling ticks: drain {:?}, cleanup {:?}, clear {:?}, resize {:?}, flush {:?}",
            config.queue_tick,
            config.cleanup_tick,
            config.clear_tick,
            config.resize_tick,
            config.store_tick,
        );
        tokio::spawn(Self::drive(config.queue_tick, {
            let engine = engine.clone();
            move || {
                if let Err(e) = engine.queue_tick() {
                    log::error!("[scheduler] queue drain failed: {}", e);
                }
            }
        }));
        tokio::spawn(Self::drive(config.cleanup_tick, {
            let engine = engine.clone();
            move || engine.cleanup_tick()
        }));
        tokio::spawn(Self::drive(config.clear_tick, {
            let engine = engine.clone();
            move || engine.clear_tick()
        }));
        tokio::spawn(Self::drive(config.resize_tick, {
            let engine = engine.clone();
            move || engine.resize_tick()
        }));
        tokio::spawn(Self::drive(config.store_tick, move || {
            if let Err(e) = store.save() {
                log::error!("[scheduler] score flush failed: {}", e);
            }
        }));
    }

    /// Fires `tick` every `period`, starting one period from now.
    async fn drive(period: Duration, mut tick: impl FnMut()) {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            tick();
        }
    }
}
