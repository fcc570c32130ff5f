//! Reward generation: one global-stream draw per unit, with an isolated
//! generator handed to the host's reward table for each draw.
//!
//! Nothing in here mutates the player. Results are staged in a
//! [`BatchOutcome`] and committed by the caller only when the whole batch
//! generated cleanly, so a failing reward draw leaves stats, the
//! golden-coconut flag and the global stream exactly as they were.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::host::{GeodeClass, GeodeHost, HostError};

use super::state::{PlayerState, SaveIdentity};

/// Fixed reward kind for the first golden coconut ever cracked on a save.
pub const GOLDEN_COCONUT_FIRST_REWARD: &str = "golden-helmet";

/// Staged result of generating a batch of rewards.
pub struct BatchOutcome<I> {
    /// Generated rewards, in crack order. Delivery preserves this order.
    pub rewards: Vec<I>,
    pub geodes_cracked: u64,
    pub boxes_opened: u64,
    /// This batch contained the save's first golden coconut.
    pub golden_coconut_awarded: bool,
    /// Global stream state after one draw per unit.
    pub rng: ChaCha8Rng,
}

/// Seed for one reward draw, derived the way the host derives its
/// save-deterministic seeds: identity fields plus the stream draw, summed.
fn reward_seed(save: &SaveIdentity, draw: u32) -> u64 {
    save.game_instance_id
        .wrapping_add(save.days_played as u64)
        .wrapping_add(save.time_of_day as u64)
        .wrapping_add(draw as u64)
}

/// Generate `count` rewards for cracking units of `held`.
///
/// Per unit, in order: classify the kind; handle the golden-coconut
/// first-crack special case (decided before the crack counter moves); bump
/// the staged counter; draw once from the (cloned) global stream; seed a
/// fresh generator from that draw and ask the host for the reward, unless
/// the special case already fixed it, in which case the stream has still
/// advanced for that unit.
pub fn generate_batch<H: GeodeHost>(
    host: &mut H,
    player: &PlayerState,
    held: &H::Item,
    count: u32,
) -> Result<BatchOutcome<H::Item>, HostError> {
    let mut stream = player.rng.clone();
    let mut rewards = Vec::with_capacity(count as usize);
    let mut geodes_cracked = 0u64;
    let mut boxes_opened = 0u64;
    let mut golden_done = player.golden_coconut_cracked;
    let mut golden_awarded = false;

    for _ in 0..count {
        let class = host.classify(held)?;

        let fixed = if class == GeodeClass::GoldenCoconut && !golden_done {
            golden_done = true;
            golden_awarded = true;
            Some(host.create_item(GOLDEN_COCONUT_FIRST_REWARD)?)
        } else {
            None
        };

        match class {
            GeodeClass::MysteryBox => boxes_opened += 1,
            _ => geodes_cracked += 1,
        }

        let draw = stream.next_u32();
        let reward = match fixed {
            Some(item) => item,
            None => {
                let mut unit_rng = ChaCha8Rng::seed_from_u64(reward_seed(&player.save, draw));
                host.reward_from_geode(held, &mut unit_rng)?
            }
        };
        rewards.push(reward);
    }

    Ok(BatchOutcome {
        rewards,
        geodes_cracked,
        boxes_opened,
        golden_coconut_awarded: golden_awarded,
        rng: stream,
    })
}
