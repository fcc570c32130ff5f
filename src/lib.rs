//! Batch geode breaking for a farming-sim host.
//!
//! The host game cracks one geode per click at the blacksmith's anvil. This
//! crate intercepts that click and cracks as many as the player can afford
//! and carry in a single interaction, then delivers every reward after the
//! usual crack animation, with a transient "xN" counter drawn over the menu.
//!
//! The crate is deliberately host-agnostic: items, inventory, reward tables,
//! rendering, sounds and persistence all stay on the host's side of the
//! [`host::GeodeHost`] and [`host::TextRenderer`] traits. The engine owns
//! only its own context objects ([`geode::state::BreakState`]) and a
//! tick-driven delivery queue ([`schedule::DelayedQueue`]); there are no
//! process-wide singletons.
//!
//! Wiring it up amounts to three hooks on the host's single UI thread:
//!
//! 1. route shop-menu clicks through [`geode::GeodeBreaker::handle_left_click`]
//!    before the default handler, and only run the default on
//!    [`geode::ClickOutcome::PassThrough`];
//! 2. call [`geode::GeodeBreaker::tick`] once per frame with the elapsed
//!    milliseconds;
//! 3. call [`geode::GeodeBreaker::draw_overlay`] from the menu's draw pass.

pub mod config;
pub mod geode;
pub mod host;
pub mod input;
pub mod schedule;

pub use config::{GeodeBreakMode, ModConfig};
pub use geode::{ClickOutcome, GeodeBreaker};
