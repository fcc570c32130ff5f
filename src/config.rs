//! Mod configuration.
//!
//! The configuration lives in a small key/value JSON document that the host
//! persists and hot-reloads; this module only parses, clamps and re-emits it.
//!
//! ## Compatibility policy
//!
//! Documents written by other versions of the mod must keep loading: missing
//! keys fall back to defaults (`#[serde(default)]`), unknown keys are
//! ignored, and a `GeodesToBreak` value this build doesn't know collapses to
//! [`GeodeBreakMode::Unrecognized`] instead of failing the whole document.
//!
//! Callers pass `&ModConfig` into every engine entry point rather than
//! caching fields, so an edited document takes effect on the very next click.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Lower/upper bounds for `AnimationSpeedMultiplier`.
pub const ANIMATION_SPEED_RANGE: (f32, f32) = (0.1, 1.0);
/// Lower/upper bounds for `OverlayScale`.
pub const OVERLAY_SCALE_RANGE: (f32, f32) = (0.1, 2.0);

/// How many geodes a single click should try to break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeodeBreakMode {
    /// Break everything affordable if the whole stack fits in the inventory;
    /// otherwise keep one slot free for the remainder of the stack.
    AllIfInventoryFits,
    /// Break everything affordable; rewards that don't fit drop to the ground.
    AllExtraFallsOnGround,
    /// A value written by some other build of the mod. Breaks one geode per
    /// click, same as the game's default.
    Unrecognized,
}

impl GeodeBreakMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeodeBreakMode::AllIfInventoryFits => "AllIfInventoryFits",
            GeodeBreakMode::AllExtraFallsOnGround => "AllExtraFallsOnGround",
            GeodeBreakMode::Unrecognized => "Unrecognized",
        }
    }
}

impl Serialize for GeodeBreakMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GeodeBreakMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "AllIfInventoryFits" => GeodeBreakMode::AllIfInventoryFits,
            "AllExtraFallsOnGround" => GeodeBreakMode::AllExtraFallsOnGround,
            _ => GeodeBreakMode::Unrecognized,
        })
    }
}

/// Player-facing configuration, persisted by the host as JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ModConfig {
    pub geodes_to_break: GeodeBreakMode,
    /// Scales every timing in the break sequence (animation frames, overlay
    /// lifetime, delivery delay). 1.0 is the game's native pace.
    pub animation_speed_multiplier: f32,
    /// Pixel offset of the "xN" counter from its anchor. Positive moves
    /// right/down.
    pub overlay_offset_x: i32,
    pub overlay_offset_y: i32,
    pub overlay_scale: f32,
    /// Touch builds have no cursor item; resolve the tapped inventory slot
    /// instead of the held item.
    pub use_mobile_geode_fix: bool,
    pub debug_mode: bool,
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            geodes_to_break: GeodeBreakMode::AllIfInventoryFits,
            animation_speed_multiplier: 0.3,
            overlay_offset_x: 40,
            overlay_offset_y: 60,
            overlay_scale: 1.0,
            use_mobile_geode_fix: false,
            debug_mode: false,
        }
    }
}

impl ModConfig {
    /// Parse a configuration document. Out-of-range values are clamped, not
    /// rejected.
    pub fn from_document(doc: &str) -> Result<Self, serde_json::Error> {
        let mut config: ModConfig = serde_json::from_str(doc)?;
        config.normalize();
        Ok(config)
    }

    /// Serialize back into the document the host persists.
    pub fn to_document(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn set_overlay_scale(&mut self, value: f32) {
        self.overlay_scale = value.clamp(OVERLAY_SCALE_RANGE.0, OVERLAY_SCALE_RANGE.1);
    }

    pub fn set_animation_speed_multiplier(&mut self, value: f32) {
        self.animation_speed_multiplier =
            value.clamp(ANIMATION_SPEED_RANGE.0, ANIMATION_SPEED_RANGE.1);
    }

    /// Re-apply all range constraints, e.g. after deserializing a document
    /// that was edited by hand.
    pub fn normalize(&mut self) {
        self.set_overlay_scale(self.overlay_scale);
        self.set_animation_speed_multiplier(self.animation_speed_multiplier);
    }
}
