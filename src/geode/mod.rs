//! Bulk geode breaking — decision engine, overlay and delayed delivery.

pub mod logic;
pub mod render;
pub mod rewards;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use crate::config::ModConfig;
use crate::host::{GeodeHost, TextRenderer};
use crate::input::{ClickEvent, Region};

use state::{BreakState, PlayerState};

/// What the input dispatcher should do with a click the engine has seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The engine consumed the click; the default handler must not run.
    Handled,
    /// Not ours; run the host's default single-break behavior.
    PassThrough,
}

/// Facade bundling the engine state with its entry points. Hosts that prefer
/// free functions can use [`logic`] directly; the behavior is identical.
pub struct GeodeBreaker<I> {
    pub state: BreakState<I>,
}

impl<I: Clone> GeodeBreaker<I> {
    pub fn new(geode_slot: Region, player: PlayerState) -> Self {
        Self { state: BreakState::new(geode_slot, player) }
    }

    /// Click interception point. Register ahead of the default handler and
    /// only run the default on [`ClickOutcome::PassThrough`].
    pub fn handle_left_click<H: GeodeHost<Item = I>>(
        &mut self,
        host: &mut H,
        config: &ModConfig,
        click: ClickEvent,
    ) -> ClickOutcome {
        logic::handle_left_click(host, &mut self.state, config, click)
    }

    /// Frame update: timers and due reward deliveries.
    pub fn tick<H: GeodeHost<Item = I>>(
        &mut self,
        host: &mut H,
        config: &ModConfig,
        delta_ms: u32,
    ) {
        logic::tick(host, &mut self.state, config, delta_ms);
    }

    /// Draw hook for the menu's render pass.
    pub fn draw_overlay<R: TextRenderer>(&mut self, renderer: &mut R, config: &ModConfig) {
        render::draw_overlay(renderer, &mut self.state.overlay, self.state.menu.geode_slot, config);
    }

    /// Deliver everything still queued, e.g. when the menu is closing.
    pub fn flush_pending<H: GeodeHost<Item = I>>(&mut self, host: &mut H, config: &ModConfig) {
        logic::flush_pending(host, &mut self.state, config);
    }
}
