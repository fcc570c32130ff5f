//! Engine-side state: menu, player/economy, overlay, pending deliveries.
//!
//! These are plain context objects owned by the host glue and passed into
//! the entry points by `&mut`; nothing here is a process-wide singleton.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::input::Region;
use crate::schedule::DelayedQueue;

/// Cost of a single break, in the host's currency.
pub const UNIT_COST: u32 = 25;

/// The slice of the shop menu's transient state the engine reads and arms.
#[derive(Clone, Debug)]
pub struct MenuState {
    /// Screen bounds of the "held geode" spot on the anvil.
    pub geode_slot: Region,
    /// The menu is blocked on a network/server round-trip.
    pub waiting_for_server: bool,
    /// Remaining break-animation time; non-zero blocks new batches.
    pub animation_ms_left: u32,
    /// Description-text wiggle, armed on the inventory-full feedback path.
    pub wiggle_ms: u32,
    /// Alert flash, armed together with the wiggle.
    pub alert_ms: u32,
}

impl MenuState {
    pub fn new(geode_slot: Region) -> Self {
        Self {
            geode_slot,
            waiting_for_server: false,
            animation_ms_left: 0,
            wiggle_ms: 0,
            alert_ms: 0,
        }
    }
}

/// Crack statistics kept per save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CrackStats {
    pub geodes_cracked: u64,
    /// Mystery boxes and golden mystery boxes count here instead.
    pub boxes_opened: u64,
}

/// Save identity feeding the per-unit reward seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveIdentity {
    pub game_instance_id: u64,
    pub days_played: u32,
    /// Host clock time, e.g. 1330 for 1:30pm.
    pub time_of_day: u32,
}

/// Player and economy state the engine mutates on a committed batch.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub money: u32,
    pub save: SaveIdentity,
    pub stats: CrackStats,
    /// The first-ever golden coconut for this save was already paid out.
    pub golden_coconut_cracked: bool,
    /// Save-deterministic global stream; advances exactly once per broken
    /// unit so the rest of the host stays in step.
    pub rng: ChaCha8Rng,
}

impl PlayerState {
    pub fn new(money: u32, save: SaveIdentity, stream_seed: u64) -> Self {
        Self {
            money,
            save,
            stats: CrackStats::default(),
            golden_coconut_cracked: false,
            rng: ChaCha8Rng::seed_from_u64(stream_seed),
        }
    }
}

/// Countdown plus last batch size, consumed by the draw hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayState {
    /// Decremented once per rendered frame, floor 0.
    pub remaining_display_frames: u32,
    /// Stale once the countdown reaches zero, but kept; the draw hook never
    /// reads it then.
    pub last_batch_size: u32,
}

impl OverlayState {
    /// Start (or restart) the counter for a fresh batch.
    pub fn arm(&mut self, batch_size: u32, frames: u32) {
        self.remaining_display_frames = frames;
        self.last_batch_size = batch_size;
    }
}

/// Everything the engine owns, bundled for the host glue.
pub struct BreakState<I> {
    pub menu: MenuState,
    pub player: PlayerState,
    pub overlay: OverlayState,
    /// Reward batches waiting out the animation delay. Each payload is one
    /// committed batch, delivered in generation order.
    pub deliveries: DelayedQueue<Vec<I>>,
}

impl<I> BreakState<I> {
    pub fn new(geode_slot: Region, player: PlayerState) -> Self {
        Self {
            menu: MenuState::new(geode_slot),
            player,
            overlay: OverlayState::default(),
            deliveries: DelayedQueue::new(),
        }
    }
}
