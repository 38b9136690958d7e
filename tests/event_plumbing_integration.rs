//! Integration tests for the typed event plumbing: queue ordering, no-op
//! triggers, observer toggles, and the one-shot gesture latch.

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;

use vantageengine::events::assets::ResourcesReadyEvent;
use vantageengine::events::audio::AudioCmd;
use vantageengine::events::input::{FirstGestureEvent, InputAction, InputEvent};
use vantageengine::events::switchdebug::{SwitchDebugEvent, switch_debug_observer};
use vantageengine::resources::debugmode::DebugMode;
use vantageengine::resources::input::InputState;

#[test]
fn triggering_an_unobserved_event_is_a_noop() {
    let mut world = World::new();
    // no observers registered anywhere: nothing happens, nothing panics
    world.trigger(ResourcesReadyEvent {
        loaded: 0,
        failed: 0,
    });
    world.trigger(FirstGestureEvent);
}

#[test]
fn message_queue_preserves_write_order() {
    #[derive(Resource, Default)]
    struct Names(Vec<String>);

    fn write_three(mut writer: MessageWriter<AudioCmd>) {
        for name in ["first", "second", "third"] {
            writer.write(AudioCmd::Stop { name: name.into() });
        }
    }

    fn advance(mut messages: ResMut<Messages<AudioCmd>>) {
        messages.update();
    }

    fn collect(mut reader: MessageReader<AudioCmd>, mut names: ResMut<Names>) {
        for cmd in reader.read() {
            if let AudioCmd::Stop { name } = cmd {
                names.0.push(name.clone());
            }
        }
    }

    let mut world = World::new();
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Names>();

    let mut schedule = Schedule::default();
    schedule.add_systems((write_three, advance, collect).chain());
    schedule.run(&mut world);

    assert_eq!(world.resource::<Names>().0, vec!["first", "second", "third"]);
}

#[test]
fn observers_run_for_every_trigger() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    let mut world = World::new();
    world.spawn(Observer::new(
        move |trigger: On<InputEvent>| {
            sink.lock().unwrap().push((trigger.event().action, trigger.event().pressed));
        },
    ));
    world.flush();

    world.trigger(InputEvent {
        action: InputAction::Up,
        pressed: true,
    });
    world.trigger(InputEvent {
        action: InputAction::Up,
        pressed: false,
    });

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![(InputAction::Up, true), (InputAction::Up, false)]
    );
}

#[test]
fn switch_debug_toggles_resource_presence() {
    let mut world = World::new();
    world.spawn(Observer::new(switch_debug_observer));
    world.flush();

    assert!(!world.contains_resource::<DebugMode>());

    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(world.contains_resource::<DebugMode>());

    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(!world.contains_resource::<DebugMode>());
}

#[test]
fn gesture_latch_fires_the_event_exactly_once() {
    #[derive(Resource, Default)]
    struct GestureCount(usize);

    fn count_gestures(_trigger: On<FirstGestureEvent>, mut count: ResMut<GestureCount>) {
        count.0 += 1;
    }

    let mut world = World::new();
    world.init_resource::<GestureCount>();
    world.insert_resource(InputState::default());
    world.spawn(Observer::new(count_gestures));
    world.flush();

    // three mouse presses, one event
    for _ in 0..3 {
        let fired = world.resource_mut::<InputState>().note_gesture();
        if fired {
            world.trigger(FirstGestureEvent);
        }
    }

    assert_eq!(world.resource::<GestureCount>().0, 1);
}
