//! In-memory host double shared by the unit tests.

use rand::RngCore;

use crate::host::{AnimationFrame, Facing, GeodeClass, GeodeHost, HeldSource, HostError};
use crate::input::Region;

/// A fake item: just a kind string and a stack count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestItem {
    pub kind: String,
    pub stack: u32,
}

pub fn item(kind: &str, stack: u32) -> TestItem {
    TestItem { kind: kind.to_string(), stack }
}

/// Scripted host that records every collaborator call.
pub struct TestHost {
    pub held: Option<TestItem>,
    pub slots: Vec<Option<TestItem>>,
    pub slot_regions: Vec<Region>,
    pub free_slots: u32,
    /// `place_in_inventory` succeeds until this many items were placed.
    pub inventory_capacity: usize,

    pub processing: Option<TestItem>,
    pub placed: Vec<TestItem>,
    pub grounded: Vec<(TestItem, (f32, f32), Facing)>,
    pub sounds: Vec<String>,
    pub animations: Vec<(Vec<AnimationFrame>, bool)>,
    pub messages: Vec<String>,
    /// First value drawn from each per-unit reward generator, in call order.
    pub reward_rng_draws: Vec<u32>,

    /// Fail `reward_from_geode` after this many successful calls.
    pub fail_generation_after: Option<usize>,
    pub fail_classify: bool,
    pub fail_sound: bool,
    pub fail_animation: bool,
    /// Kinds whose delivery blows up instead of reporting full/placed.
    pub fail_place_kinds: Vec<String>,

    next_reward_id: u32,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            held: None,
            slots: Vec::new(),
            slot_regions: Vec::new(),
            free_slots: 36,
            inventory_capacity: usize::MAX,
            processing: None,
            placed: Vec::new(),
            grounded: Vec::new(),
            sounds: Vec::new(),
            animations: Vec::new(),
            messages: Vec::new(),
            reward_rng_draws: Vec::new(),
            fail_generation_after: None,
            fail_classify: false,
            fail_sound: false,
            fail_animation: false,
            fail_place_kinds: Vec::new(),
            next_reward_id: 0,
        }
    }

    /// Desktop-style setup: `stack` geodes held on the cursor.
    pub fn holding(kind: &str, stack: u32) -> Self {
        let mut host = Self::new();
        host.held = Some(item(kind, stack));
        host
    }
}

impl GeodeHost for TestHost {
    type Item = TestItem;

    fn held_item(&self) -> Option<TestItem> {
        self.held.clone()
    }

    fn inventory_slot_regions(&self) -> Vec<Region> {
        self.slot_regions.clone()
    }

    fn item_in_slot(&self, slot: usize) -> Option<TestItem> {
        self.slots.get(slot).cloned().flatten()
    }

    fn free_inventory_slots(&self) -> u32 {
        self.free_slots
    }

    fn classify(&self, item: &TestItem) -> Result<GeodeClass, HostError> {
        if self.fail_classify {
            return Err(HostError::Item("classify scripted to fail".into()));
        }
        Ok(match item.kind.as_str() {
            "golden-coconut" => GeodeClass::GoldenCoconut,
            "mystery-box" | "golden-mystery-box" => GeodeClass::MysteryBox,
            kind if kind.ends_with("geode") => GeodeClass::Geode,
            _ => GeodeClass::NotGeode,
        })
    }

    fn stack_size(&self, item: &TestItem) -> Result<u32, HostError> {
        Ok(item.stack)
    }

    fn single_of(&self, source: &TestItem) -> Result<TestItem, HostError> {
        Ok(item(&source.kind, 1))
    }

    fn shrink_stack(&mut self, source: HeldSource, by: u32) -> u32 {
        let slot = match source {
            HeldSource::Cursor => &mut self.held,
            HeldSource::Slot(i) => &mut self.slots[i],
        };
        let remaining = match slot {
            Some(item) => {
                item.stack = item.stack.saturating_sub(by);
                item.stack
            }
            None => 0,
        };
        if remaining == 0 {
            *slot = None;
        }
        remaining
    }

    fn set_processing_item(&mut self, item: TestItem) {
        self.processing = Some(item);
    }

    fn reward_from_geode(
        &mut self,
        _geode: &TestItem,
        rng: &mut dyn RngCore,
    ) -> Result<TestItem, HostError> {
        if let Some(limit) = self.fail_generation_after {
            if self.reward_rng_draws.len() >= limit {
                return Err(HostError::Reward("reward table scripted to fail".into()));
            }
        }
        self.reward_rng_draws.push(rng.next_u32());
        self.next_reward_id += 1;
        Ok(item(&format!("reward-{}", self.next_reward_id), 1))
    }

    fn create_item(&mut self, kind: &str) -> Result<TestItem, HostError> {
        Ok(item(kind, 1))
    }

    fn place_in_inventory(&mut self, placed: &TestItem) -> Result<bool, HostError> {
        if self.fail_place_kinds.contains(&placed.kind) {
            return Err(HostError::Call("delivery scripted to fail".into()));
        }
        if self.placed.len() < self.inventory_capacity {
            self.placed.push(placed.clone());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn spawn_on_ground(&mut self, item: &TestItem, position: (f32, f32), facing: Facing) {
        self.grounded.push((item.clone(), position, facing));
    }

    fn player_position(&self) -> (f32, f32) {
        (32.0, 64.0)
    }

    fn player_facing(&self) -> Facing {
        Facing::Down
    }

    fn play_sound(&mut self, name: &str) -> Result<(), HostError> {
        if self.fail_sound {
            return Err(HostError::Call("sound scripted to fail".into()));
        }
        self.sounds.push(name.to_string());
        Ok(())
    }

    fn set_animation(
        &mut self,
        frames: &[AnimationFrame],
        looping: bool,
    ) -> Result<(), HostError> {
        if self.fail_animation {
            return Err(HostError::Call("animation scripted to fail".into()));
        }
        self.animations.push((frames.to_vec(), looping));
        Ok(())
    }

    fn show_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
