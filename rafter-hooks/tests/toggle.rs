//! Tests for the toggle hook.

use rafter_hooks::prelude::*;

fn toggle_instance(initial: bool) -> Instance<(), Toggle> {
    Instance::new(move |hooks: &mut Hooks<'_>, _: &()| hooks.use_toggle(initial))
}

#[test]
fn test_initial_value() {
    let mut off = toggle_instance(false);
    let mut on = toggle_instance(true);

    assert!(!off.render(&()).unwrap().value);
    assert!(on.render(&()).unwrap().value);
}

#[test]
fn test_lazy_initial_value_runs_once() {
    let calls = Ref::new(0);
    let counter = calls.clone();
    let mut instance = Instance::new(move |hooks: &mut Hooks<'_>, _: &()| {
        let counter = counter.clone();
        hooks.use_toggle_with(move || {
            counter.update(|n| *n += 1);
            true
        })
    });

    for _ in 0..3 {
        assert!(instance.render(&()).unwrap().value);
    }
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_enable_disable() {
    let mut instance = toggle_instance(false);
    let toggle = instance.render(&()).unwrap();

    toggle.enable.emit();
    assert!(instance.render(&()).unwrap().value);

    toggle.disable.emit();
    assert!(!instance.render(&()).unwrap().value);
}

#[test]
fn test_enable_when_enabled_schedules_nothing() {
    let mut instance = toggle_instance(true);
    let toggle = instance.render(&()).unwrap();

    toggle.enable.emit();
    assert!(!instance.is_dirty());
    assert_eq!(instance.updates(), 0);

    toggle.disable.emit();
    toggle.disable.emit();
    assert_eq!(instance.updates(), 1);
}

#[test]
fn test_toggle_flips_each_call() {
    let mut instance = toggle_instance(false);
    let toggle = instance.render(&()).unwrap();

    toggle.toggle.emit();
    assert!(instance.render(&()).unwrap().value);

    // Two flips between renders read the live value, not a stale copy
    toggle.toggle.emit();
    toggle.toggle.emit();
    assert!(instance.render(&()).unwrap().value);
    assert_eq!(instance.updates(), 3);
}

#[test]
fn test_set_toggle_with_value_and_updater() {
    let mut instance = toggle_instance(false);
    let toggle = instance.render(&()).unwrap();

    toggle.set_toggle.call(true);
    assert!(instance.render(&()).unwrap().value);

    toggle.set_toggle.call(Update::with(|v: &bool| !v));
    assert!(!instance.render(&()).unwrap().value);

    toggle.set_toggle.call(false);
    assert!(!instance.is_dirty());
    assert_eq!(instance.updates(), 2);
}

#[test]
fn test_operations_keep_identity_across_renders() {
    let mut instance = toggle_instance(false);
    let first = instance.render(&()).unwrap();

    first.toggle.emit();
    let second = instance.render(&()).unwrap();

    assert!(second.value);
    assert_eq!(first.enable, second.enable);
    assert_eq!(first.disable, second.disable);
    assert_eq!(first.toggle, second.toggle);
    assert_eq!(first.set_toggle, second.set_toggle);
}

#[test]
fn test_operations_from_old_render_still_work() {
    let mut instance = toggle_instance(false);
    let stale = instance.render(&()).unwrap();
    for _ in 0..3 {
        instance.render(&()).unwrap();
    }

    stale.enable.emit();
    assert!(instance.render(&()).unwrap().value);
}

#[test]
fn test_remount_resets_value() {
    let mut instance = toggle_instance(false);
    instance.render(&()).unwrap().enable.emit();
    assert!(instance.render(&()).unwrap().value);
    drop(instance);

    let mut remounted = toggle_instance(false);
    assert!(!remounted.render(&()).unwrap().value);
}

#[test]
fn test_into_parts() {
    let mut instance = toggle_instance(false);
    let (value, enable, _disable, toggle, _set_toggle) = instance.render(&()).unwrap().into_parts();

    assert!(!value);
    enable.emit();
    toggle.emit();
    assert!(!instance.render(&()).unwrap().value);
}

#[test]
fn test_two_toggles_are_independent() {
    let mut instance = Instance::new(|hooks: &mut Hooks<'_>, _: &()| {
        (hooks.use_toggle(false), hooks.use_toggle(true))
    });

    let (a, b) = instance.render(&()).unwrap();
    a.enable.emit();
    b.disable.emit();

    let (a, b) = instance.render(&()).unwrap();
    assert!(a.value);
    assert!(!b.value);
    assert_ne!(a.toggle, b.toggle);
}
