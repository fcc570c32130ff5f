//! Collaborator contracts — the narrow interface to the host game.
//!
//! Everything the host owns (items, the player's inventory, the reward
//! table, sprites, sounds) stays behind [`GeodeHost`]; the overlay's text
//! drawing goes through [`TextRenderer`]. Items are opaque handles: the
//! engine clones, inspects and passes them around but never looks inside.

use rand::RngCore;

use crate::input::Region;

/// Failure reported by a host collaborator call.
///
/// Host internals vary too much to enumerate, so each variant carries the
/// host's own description; the variants only distinguish which engine phase
/// tripped.
#[derive(thiserror::Error, Debug)]
pub enum HostError {
    #[error("item data unavailable: {0}")]
    Item(String),
    #[error("reward generation failed: {0}")]
    Reward(String),
    #[error("host call failed: {0}")]
    Call(String),
}

/// How the cracking logic treats a consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeodeClass {
    /// Not crackable at the anvil; the engine declines the click.
    NotGeode,
    /// Any ordinary geode kind. Counts toward "geodes cracked".
    Geode,
    /// The rare coconut: the first one ever cracked on a save pays a fixed
    /// reward.
    GoldenCoconut,
    /// Mystery box or golden mystery box. Counts toward "boxes opened"
    /// instead of "geodes cracked".
    MysteryBox,
}

/// Which reference holds the stack being broken.
///
/// Desktop builds break the item held on the cursor; the mobile input path
/// breaks a stack sitting in an inventory slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeldSource {
    Cursor,
    Slot(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Up,
    Right,
    Down,
    Left,
}

/// One frame of the blacksmith's break animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Sprite-sheet frame index.
    pub frame: u16,
    pub duration_ms: u32,
}

/// Straight (non-premultiplied) RGBA with 0..=1 channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const YELLOW: Rgba = Rgba { r: 1.0, g: 1.0, b: 0.0, a: 1.0 };

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba { a, ..self }
    }
}

/// The host game, as seen from the batch-break engine.
///
/// Read accessors may fail ([`HostError`]) wherever the underlying item data
/// can be missing or mid-mutation; the engine treats any such failure as a
/// reason to fall back to the game's default single-break behavior.
pub trait GeodeHost {
    /// Opaque item handle. Cloning a handle must not duplicate the item.
    type Item: Clone;

    // ── held item and inventory ─────────────────────────────────────

    /// The item currently held on the cursor, if any.
    fn held_item(&self) -> Option<Self::Item>;

    /// Screen regions of every inventory slot, in slot order. Used only by
    /// the mobile input path.
    fn inventory_slot_regions(&self) -> Vec<Region>;

    fn item_in_slot(&self, slot: usize) -> Option<Self::Item>;

    fn free_inventory_slots(&self) -> u32;

    // ── item inspection ─────────────────────────────────────────────

    fn classify(&self, item: &Self::Item) -> Result<GeodeClass, HostError>;

    fn stack_size(&self, item: &Self::Item) -> Result<u32, HostError>;

    /// A fresh single-unit instance of the same kind (the host's `getOne`).
    fn single_of(&self, item: &Self::Item) -> Result<Self::Item, HostError>;

    // ── mutation ────────────────────────────────────────────────────

    /// Shrink the referenced stack by `by` units and return the remaining
    /// count. At zero the host clears the cursor reference or removes the
    /// inventory slot, matching `source`. The engine never calls this with
    /// `by` larger than the stack it just read.
    fn shrink_stack(&mut self, source: HeldSource, by: u32) -> u32;

    /// Put a single geode into the menu's "currently cracking" display slot.
    fn set_processing_item(&mut self, item: Self::Item);

    // ── rewards ─────────────────────────────────────────────────────

    /// Draw a reward for cracking `geode`, using the supplied generator for
    /// every random decision.
    fn reward_from_geode(
        &mut self,
        geode: &Self::Item,
        rng: &mut dyn RngCore,
    ) -> Result<Self::Item, HostError>;

    /// Materialize an item by kind id (fixed special-case rewards).
    fn create_item(&mut self, kind: &str) -> Result<Self::Item, HostError>;

    // ── delivery ────────────────────────────────────────────────────

    /// Try to add the item to the player's inventory. `Ok(false)` means no
    /// space; the item is untouched.
    fn place_in_inventory(&mut self, item: &Self::Item) -> Result<bool, HostError>;

    /// Drop the item as pickup-able debris.
    fn spawn_on_ground(&mut self, item: &Self::Item, position: (f32, f32), facing: Facing);

    fn player_position(&self) -> (f32, f32);

    fn player_facing(&self) -> Facing;

    // ── feedback ────────────────────────────────────────────────────

    fn play_sound(&mut self, name: &str) -> Result<(), HostError>;

    fn set_animation(&mut self, frames: &[AnimationFrame], looping: bool)
        -> Result<(), HostError>;

    /// Show a transient message in the menu (e.g. "Inventory full").
    fn show_message(&mut self, text: &str);
}

/// Text drawing for the overlay. Assumed infallible; a host whose renderer
/// can fail should swallow the error on its side of this trait.
pub trait TextRenderer {
    /// Width in pixels of `text` rendered at `scale`.
    fn measure_width(&self, text: &str, scale: f32) -> f32;

    fn draw(&mut self, text: &str, position: (f32, f32), color: Rgba, scale: f32);
}
