//! Batch-break decision logic.
//!
//! One entry point per host hook: [`handle_left_click`] for the intercepted
//! menu click, [`tick`] for the per-frame update, [`flush_pending`] for
//! session teardown. All of them take the host, the engine state and the
//! current configuration explicitly; configuration is re-read on every
//! call, so external edits apply immediately.

use log::{debug, warn};

use crate::config::{GeodeBreakMode, ModConfig};
use crate::host::{AnimationFrame, GeodeClass, GeodeHost, HeldSource, HostError};
use crate::input::{find_region_at, ClickEvent};

use super::rewards::{self, BatchOutcome};
use super::state::{BreakState, UNIT_COST};
use super::ClickOutcome;

/// Anvil sound, played once per batch no matter the size.
const BREAK_SOUND: &str = "stoneStep";

/// The blacksmith's six-frame hammer swing, unscaled.
const BREAK_ANIMATION: [AnimationFrame; 6] = [
    AnimationFrame { frame: 8, duration_ms: 300 },
    AnimationFrame { frame: 9, duration_ms: 200 },
    AnimationFrame { frame: 10, duration_ms: 80 },
    AnimationFrame { frame: 11, duration_ms: 200 },
    AnimationFrame { frame: 12, duration_ms: 100 },
    AnimationFrame { frame: 8, duration_ms: 300 },
];

/// Overlay lifetime in frames at multiplier 1.0.
const OVERLAY_BASE_FRAMES: f32 = 120.0;
/// Reward delivery delay at multiplier 1.0, matching animation completion.
const DELIVERY_BASE_MS: f32 = 2700.0;

const WIGGLE_MS: u32 = 500;
const ALERT_MS: u32 = 1500;

pub const MSG_INVENTORY_FULL: &str = "Inventory full";
pub const MSG_NOT_ENOUGH_SPACE: &str = "Not enough space in your inventory";

/// Overlay frame count for the current configuration.
pub fn overlay_frames(config: &ModConfig) -> u32 {
    (OVERLAY_BASE_FRAMES * config.animation_speed_multiplier).round() as u32
}

/// Delivery delay (and animation-busy duration) for the current configuration.
pub fn delivery_delay_ms(config: &ModConfig) -> u32 {
    (DELIVERY_BASE_MS * config.animation_speed_multiplier).round() as u32
}

fn scaled_animation(config: &ModConfig) -> [AnimationFrame; 6] {
    let multiplier = config.animation_speed_multiplier;
    BREAK_ANIMATION.map(|f| AnimationFrame {
        frame: f.frame,
        duration_ms: (f.duration_ms as f32 * multiplier).round() as u32,
    })
}

/// How many geodes this click should break under the configured policy.
///
/// `max_breakable` is already capped by both the held stack and the player's
/// money; `held_stack` and `free_slots` only steer the inventory-fit rules.
pub fn target_batch_size(
    mode: GeodeBreakMode,
    held_stack: u32,
    max_breakable: u32,
    free_slots: u32,
) -> u32 {
    match mode {
        GeodeBreakMode::AllIfInventoryFits => {
            if held_stack <= free_slots {
                held_stack.min(max_breakable)
            } else {
                // Keep one slot free for whatever remains of the held stack.
                max_breakable.min(free_slots.saturating_sub(1))
            }
        }
        GeodeBreakMode::AllExtraFallsOnGround => max_breakable,
        GeodeBreakMode::Unrecognized => 1,
    }
}

/// Intercepted menu click. [`ClickOutcome::PassThrough`] means the host's
/// default single-break handler should run; [`ClickOutcome::Handled`] means
/// the click is fully consumed (including the two feedback-message paths).
pub fn handle_left_click<H: GeodeHost>(
    host: &mut H,
    state: &mut BreakState<H::Item>,
    config: &ModConfig,
    click: ClickEvent,
) -> ClickOutcome {
    if state.menu.waiting_for_server {
        return ClickOutcome::PassThrough;
    }

    let (held, source) = match resolve_held(host, state, config, click) {
        Some(pair) => pair,
        None => return ClickOutcome::PassThrough,
    };

    let class = match host.classify(&held) {
        Ok(class) => class,
        Err(e) => return decline_on_error(config, "classifying held item", &e),
    };
    if class == GeodeClass::NotGeode {
        return ClickOutcome::PassThrough;
    }
    if state.player.money < UNIT_COST {
        return ClickOutcome::PassThrough;
    }
    if state.menu.animation_ms_left > 0 {
        return ClickOutcome::PassThrough;
    }

    let stack = match host.stack_size(&held) {
        Ok(stack) => stack,
        Err(e) => return decline_on_error(config, "reading held stack", &e),
    };

    let max_affordable = state.player.money / UNIT_COST;
    let max_breakable = stack.min(max_affordable);
    if max_breakable == 0 {
        // Feedback, not decline: the click is consumed.
        host.show_message(MSG_INVENTORY_FULL);
        state.menu.wiggle_ms = WIGGLE_MS;
        state.menu.alert_ms = ALERT_MS;
        return ClickOutcome::Handled;
    }

    let free_slots = host.free_inventory_slots();
    let target = target_batch_size(config.geodes_to_break, stack, max_breakable, free_slots);
    if target == 0 {
        host.show_message(MSG_NOT_ENOUGH_SPACE);
        return ClickOutcome::Handled;
    }

    // Generate before touching anything: a failing reward draw must leave
    // money, stack, stats and the global stream exactly as they were.
    let batch = match rewards::generate_batch(host, &state.player, &held, target) {
        Ok(batch) => batch,
        Err(e) => return decline_on_error(config, "generating rewards", &e),
    };
    let single = match host.single_of(&held) {
        Ok(single) => single,
        Err(e) => return decline_on_error(config, "splitting processing geode", &e),
    };

    commit(host, state, config, source, target, single, batch);
    ClickOutcome::Handled
}

/// Work out which stack the click refers to. `None` declines: the click
/// missed the geode spot (desktop) or every inventory slot (mobile), or
/// there is nothing there to break.
fn resolve_held<H: GeodeHost>(
    host: &H,
    state: &BreakState<H::Item>,
    config: &ModConfig,
    click: ClickEvent,
) -> Option<(H::Item, HeldSource)> {
    if config.use_mobile_geode_fix {
        // Touch builds have no cursor item; the tapped slot is the stack.
        let regions = host.inventory_slot_regions();
        let slot = find_region_at(&regions, click.x, click.y)?;
        let item = host.item_in_slot(slot)?;
        Some((item, HeldSource::Slot(slot)))
    } else {
        if !state.menu.geode_slot.contains(click.x, click.y) {
            return None;
        }
        let item = host.held_item()?;
        Some((item, HeldSource::Cursor))
    }
}

fn decline_on_error(config: &ModConfig, phase: &str, error: &HostError) -> ClickOutcome {
    if config.debug_mode {
        debug!("falling back to single break while {phase}: {error}");
    }
    ClickOutcome::PassThrough
}

/// Apply the whole transaction. Infallible by design: everything that can
/// fail already ran, and feedback failures past this point never roll back.
fn commit<H: GeodeHost>(
    host: &mut H,
    state: &mut BreakState<H::Item>,
    config: &ModConfig,
    source: HeldSource,
    target: u32,
    single: H::Item,
    batch: BatchOutcome<H::Item>,
) {
    state.overlay.arm(target, overlay_frames(config));

    // One geode stays visible on the anvil while the batch cracks.
    host.set_processing_item(single);
    host.shrink_stack(source, target);

    state.player.money -= UNIT_COST * target;
    state.player.stats.geodes_cracked += batch.geodes_cracked;
    state.player.stats.boxes_opened += batch.boxes_opened;
    state.player.golden_coconut_cracked |= batch.golden_coconut_awarded;
    state.player.rng = batch.rng;

    if let Err(e) = host.play_sound(BREAK_SOUND) {
        if config.debug_mode {
            warn!("break sound failed: {e}");
        }
    }
    if let Err(e) = host.set_animation(&scaled_animation(config), false) {
        if config.debug_mode {
            warn!("break animation failed: {e}");
        }
    }

    let delay = delivery_delay_ms(config);
    state.deliveries.schedule(delay, batch.rewards);
    state.menu.animation_ms_left = delay;
}

/// Per-frame update: menu timers and any delivery whose delay has elapsed.
pub fn tick<H: GeodeHost>(
    host: &mut H,
    state: &mut BreakState<H::Item>,
    config: &ModConfig,
    delta_ms: u32,
) {
    state.menu.animation_ms_left = state.menu.animation_ms_left.saturating_sub(delta_ms);
    state.menu.wiggle_ms = state.menu.wiggle_ms.saturating_sub(delta_ms);
    state.menu.alert_ms = state.menu.alert_ms.saturating_sub(delta_ms);

    for rewards in state.deliveries.advance(delta_ms) {
        deliver(host, config, rewards);
    }
}

/// Deliver everything still queued, e.g. when the menu closes mid-animation.
/// The player already paid, so the rewards are handed over immediately
/// instead of being dropped.
pub fn flush_pending<H: GeodeHost>(
    host: &mut H,
    state: &mut BreakState<H::Item>,
    config: &ModConfig,
) {
    for rewards in state.deliveries.drain() {
        deliver(host, config, rewards);
    }
}

/// Hand one batch to the player: inventory first, ground on overflow. One
/// bad reward is skipped, never the rest of the batch.
fn deliver<H: GeodeHost>(host: &mut H, config: &ModConfig, rewards: Vec<H::Item>) {
    for item in rewards {
        match host.place_in_inventory(&item) {
            Ok(true) => {}
            Ok(false) => {
                let position = host.player_position();
                let facing = host.player_facing();
                host.spawn_on_ground(&item, position, facing);
            }
            Err(e) => {
                if config.debug_mode {
                    warn!("skipping undeliverable reward: {e}");
                }
            }
        }
    }
}
