//! Property tests: random play never corrupts the object graph.

mod common;

use common::*;
use proptest::prelude::*;
use rustc_hash::FxHashMap;
use taleforge::{ActionIntent, GameState, ObjectId, StatCalculator};

const ITEMS: &[&str] = &[
    "sword", "dagger", "boulder", "backpack", "pouch", "mushroom", "ring", "gem", "idol",
    "left-hand", "right-hand",
];

const CONTAINERS: &[&str] = &["backpack", "pouch", "left-hand", "right-hand", "sword"];

const SLOTS: &[&str] = &["strap", "thumb", "ring", "pinky"];

fn op_strategy() -> impl Strategy<Value = ActionIntent> {
    prop_oneof![
        4 => prop::sample::select(ITEMS).prop_map(pickup),
        2 => prop::sample::select(ITEMS).prop_map(drop),
        3 => (prop::sample::select(ITEMS), prop::sample::select(CONTAINERS))
            .prop_map(|(item, container)| transfer(item, container)),
        1 => (
            prop::sample::select(ITEMS),
            prop::sample::select(CONTAINERS),
            prop::sample::select(SLOTS),
        )
            .prop_map(|(item, container, slot)| transfer(item, container).with_slot(slot)),
        1 => prop::sample::select(&["north", "south"][..]).prop_map(go),
        1 => Just(intent("items")),
    ]
}

/// Every place an object id can be held, counted.
fn holdings(state: &GameState) -> FxHashMap<ObjectId, usize> {
    let mut counts = FxHashMap::default();
    for character in state.characters.values() {
        for entry in &character.inventory {
            *counts.entry(entry.id.clone()).or_insert(0) += 1;
        }
    }
    for object in state.objects.values() {
        for child in object.children() {
            *counts.entry(child.clone()).or_insert(0) += 1;
        }
    }
    for ids in state.scene_objects.values() {
        for id in ids {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// True if `start` can reach itself by following children.
fn reaches_itself(state: &GameState, start: &ObjectId) -> bool {
    let mut stack: Vec<ObjectId> = state
        .object(start)
        .map(|o| o.children().cloned().collect())
        .unwrap_or_default();
    let mut seen = Vec::new();
    while let Some(id) = stack.pop() {
        if &id == start {
            return true;
        }
        if seen.contains(&id) {
            continue;
        }
        if let Some(object) = state.object(&id) {
            stack.extend(object.children().cloned());
        }
        seen.push(id);
    }
    false
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_play_keeps_graph_sound(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut world = World::new();
        let object_count = world.state.objects.len();

        for op in ops {
            let turn = world.state.world.turn;
            let output = world.try_act(op);
            prop_assert!(output.is_ok(), "turn {} aborted: {:?}", turn, output.as_ref().err());
            world.state = output.unwrap().state;

            prop_assert_eq!(world.state.world.turn, turn + 1);
            prop_assert_eq!(world.state.objects.len(), object_count);

            for (id, count) in holdings(&world.state) {
                prop_assert!(count <= 1, "{} is held in {} places", id, count);
            }
            for id in world.state.objects.keys() {
                prop_assert!(!reaches_itself(&world.state, id), "{} contains itself", id);
            }

            let calculator = StatCalculator::new(world.processor.config());
            let hero = world.hero();
            prop_assert!(calculator.is_consistent(hero, &world.state));
        }
    }

    #[test]
    fn failed_turns_only_touch_bookkeeping(item in prop::sample::select(&["unicorn", "gem", "idol", "boulder"][..])) {
        let mut world = World::new();
        let before = world.state.clone();

        let output = world.try_act(pickup(item)).unwrap();
        prop_assert_eq!(output.resolution.outcome, taleforge::Outcome::Failure);
        world.state = output.state;

        prop_assert_eq!(&world.state.objects, &before.objects);
        prop_assert_eq!(&world.state.scene_objects, &before.scene_objects);
        prop_assert_eq!(&world.state.characters, &before.characters);
        prop_assert_eq!(world.state.log.len(), 1);
    }
}
