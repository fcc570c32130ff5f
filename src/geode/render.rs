//! Overlay draw hook: the transient "xN" counter over the geode spot.

use crate::config::ModConfig;
use crate::host::{Rgba, TextRenderer};
use crate::input::Region;

use super::state::OverlayState;

/// Anchor inside the geode-spot sprite the counter hangs off, before the
/// configured offsets.
const ANCHOR_X: i32 = 360;
const ANCHOR_Y: i32 = 160;

const SHADOW_OFFSET: f32 = 2.0;
const SHADOW_ALPHA: f32 = 0.75;

/// Called once per rendered frame from the menu's draw pass. Decrements the
/// countdown and draws the counter while it is live; no other side effects.
pub fn draw_overlay<R: TextRenderer>(
    renderer: &mut R,
    overlay: &mut OverlayState,
    geode_slot: Region,
    config: &ModConfig,
) {
    if overlay.remaining_display_frames == 0 {
        return;
    }
    overlay.remaining_display_frames -= 1;

    let text = format!("x{}", overlay.last_batch_size);
    let scale = config.overlay_scale;
    let width = renderer.measure_width(&text, scale);

    // Horizontally centered on the anchor.
    let x = (geode_slot.x + ANCHOR_X + config.overlay_offset_x) as f32 - width / 2.0;
    let y = (geode_slot.y + ANCHOR_Y + config.overlay_offset_y) as f32;

    renderer.draw(
        &text,
        (x + SHADOW_OFFSET, y + SHADOW_OFFSET),
        Rgba::BLACK.with_alpha(SHADOW_ALPHA),
        scale,
    );
    renderer.draw(&text, (x, y), Rgba::YELLOW, scale);
}
