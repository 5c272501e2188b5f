//! Tests for instances and the hooks API.

use std::sync::{Arc, Mutex};

use rafter::prelude::*;

type Log = Arc<Mutex<Vec<String>>>;

fn push(log: &Log, entry: impl Into<String>) {
    log.lock().unwrap().push(entry.into());
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

// =============================================================================
// State
// =============================================================================

#[test]
fn test_state_persists_across_renders() {
    let mut instance = Instance::new(|hooks: &mut Hooks<'_>, _: &()| {
        let count = hooks.use_state(0);
        count.update(|v| *v += 1);
        count.get()
    });

    assert_eq!(instance.render(&()).unwrap(), 1);
    assert_eq!(instance.render(&()).unwrap(), 2);
    assert_eq!(instance.render(&()).unwrap(), 3);
}

#[test]
fn test_lazy_initial_state_runs_once() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let mut instance = Instance::new(move |hooks: &mut Hooks<'_>, _: &()| {
        let counter = Arc::clone(&counter);
        hooks
            .use_state_with(move || {
                *counter.lock().unwrap() += 1;
                "ready"
            })
            .get()
    });

    for _ in 0..3 {
        assert_eq!(instance.render(&()).unwrap(), "ready");
    }
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn test_state_writes_schedule_render() {
    let mut instance =
        Instance::new(|hooks: &mut Hooks<'_>, _: &()| hooks.use_state(false));

    let flag = instance.render(&()).unwrap();
    assert!(!instance.is_dirty());
    assert_eq!(instance.updates(), 0);

    flag.set(true);
    assert!(instance.is_dirty());
    assert_eq!(instance.updates(), 1);

    instance.render(&()).unwrap();
    assert!(!instance.is_dirty());
    assert!(instance.render_if_dirty(&()).unwrap().is_none());

    // Applying the current value is not an update
    assert!(!flag.apply(true));
    assert_eq!(instance.updates(), 1);
    assert!(flag.apply(Update::with(|v: &bool| !v)));
    assert_eq!(instance.updates(), 2);
    assert!(instance.render_if_dirty(&()).unwrap().is_some());
}

#[test]
fn test_props_reach_render() {
    let mut instance =
        Instance::new(|_: &mut Hooks<'_>, props: &String| format!("hello {props}"));

    assert_eq!(instance.render(&"world".to_string()).unwrap(), "hello world");
}

// =============================================================================
// Memo and callbacks
// =============================================================================

#[test]
fn test_callback_identity_follows_deps() {
    let mut instance = Instance::new(|hooks: &mut Hooks<'_>, dep: &u32| {
        hooks.use_callback(*dep, |()| {})
    });

    let first = instance.render(&1).unwrap();
    let same = instance.render(&1).unwrap();
    let changed = instance.render(&2).unwrap();

    assert!(first.ptr_eq(&same));
    assert_eq!(first, same);
    assert!(!first.ptr_eq(&changed));
}

#[test]
fn test_memo_recomputes_on_dep_change_only() {
    let computed = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&computed);
    let mut instance = Instance::new(move |hooks: &mut Hooks<'_>, dep: &u32| {
        let counter = Arc::clone(&counter);
        hooks.use_memo(*dep, move || {
            *counter.lock().unwrap() += 1;
            dep * 10
        })
    });

    assert_eq!(instance.render(&1).unwrap(), 10);
    assert_eq!(instance.render(&1).unwrap(), 10);
    assert_eq!(instance.render(&3).unwrap(), 30);
    assert_eq!(*computed.lock().unwrap(), 2);
}

// =============================================================================
// Effects
// =============================================================================

fn effect_component(log: Log) -> Instance<u32, ()> {
    Instance::new(move |hooks: &mut Hooks<'_>, dep: &u32| {
        let log = Arc::clone(&log);
        let dep = *dep;
        hooks.use_effect(dep, move || {
            push(&log, format!("run {dep}"));
            Some(Box::new(move || push(&log, format!("cleanup {dep}"))) as Cleanup)
        });
    })
}

#[test]
fn test_effect_runs_when_deps_change() {
    let log: Log = Arc::default();
    let mut instance = effect_component(Arc::clone(&log));

    instance.render(&1).unwrap();
    instance.render(&1).unwrap();
    instance.render(&2).unwrap();

    assert_eq!(entries(&log), vec!["run 1", "cleanup 1", "run 2"]);
}

#[test]
fn test_unmount_runs_cleanups_once() {
    let log: Log = Arc::default();
    let mut instance = effect_component(Arc::clone(&log));

    instance.render(&1).unwrap();
    instance.unmount();
    instance.unmount();

    assert_eq!(entries(&log), vec!["run 1", "cleanup 1"]);
    assert!(!instance.is_mounted());
    assert!(matches!(
        instance.render(&1),
        Err(RenderError::Unmounted { .. })
    ));
}

#[test]
fn test_drop_runs_cleanups() {
    let log: Log = Arc::default();
    {
        let mut instance = effect_component(Arc::clone(&log));
        instance.render(&7).unwrap();
    }
    assert_eq!(entries(&log), vec!["run 7", "cleanup 7"]);
}

#[test]
fn test_cleanups_run_before_new_effects() {
    let log: Log = Arc::default();
    let effect_log = Arc::clone(&log);
    let mut instance = Instance::new(move |hooks: &mut Hooks<'_>, dep: &u32| {
        for name in ["a", "b"] {
            let log = Arc::clone(&effect_log);
            let dep = *dep;
            hooks.use_effect(dep, move || {
                push(&log, format!("run {name}{dep}"));
                Some(Box::new(move || push(&log, format!("cleanup {name}{dep}"))) as Cleanup)
            });
        }
    });

    instance.render(&1).unwrap();
    instance.render(&2).unwrap();

    assert_eq!(
        entries(&log),
        vec!["run a1", "run b1", "cleanup a1", "cleanup b1", "run a2", "run b2"]
    );
}

// =============================================================================
// Hook order
// =============================================================================

fn conditional_component(config: InstanceConfig) -> Instance<bool, ()> {
    Instance::with_config(config, |hooks: &mut Hooks<'_>, use_ref_first: &bool| {
        if *use_ref_first {
            hooks.use_ref(0u8);
        } else {
            hooks.use_state(0u8);
        }
    })
}

#[test]
fn test_hook_order_change_is_an_error() {
    let mut instance = conditional_component(InstanceConfig::new("Conditional"));

    instance.render(&false).unwrap();
    let err = instance.render(&true).unwrap_err();

    match err {
        RenderError::HookOrder { name, index, .. } => {
            assert_eq!(name, "Conditional");
            assert_eq!(index, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lenient_config_reinitialises_slot() {
    let mut instance = conditional_component(InstanceConfig::new("Conditional").lenient());

    instance.render(&false).unwrap();
    assert!(instance.render(&true).is_ok());
    assert!(instance.render(&true).is_ok());
}

#[test]
fn test_hook_count_change_is_an_error() {
    let mut instance = Instance::new(|hooks: &mut Hooks<'_>, count: &usize| {
        for _ in 0..*count {
            hooks.use_ref(());
        }
    });

    instance.render(&2).unwrap();
    assert!(matches!(
        instance.render(&1),
        Err(RenderError::HookCountChanged {
            expected: 2,
            found: 1,
            ..
        })
    ));
}

#[test]
fn test_failed_render_does_not_swallow_effect() {
    let log: Log = Arc::default();
    let effect_log = Arc::clone(&log);
    let mut instance = Instance::new(move |hooks: &mut Hooks<'_>, &(on, extra): &(bool, bool)| {
        let log = Arc::clone(&effect_log);
        hooks.use_effect(on, move || {
            push(&log, format!("run {on}"));
            None
        });
        if extra {
            hooks.use_ref(());
        }
    });

    instance.render(&(false, false)).unwrap();
    assert!(matches!(
        instance.render(&(true, true)),
        Err(RenderError::HookCountChanged { .. })
    ));
    assert_eq!(entries(&log), vec!["run false"]);

    instance.render(&(true, true)).unwrap();
    instance.render(&(true, true)).unwrap();
    assert_eq!(entries(&log), vec!["run false", "run true"]);
}

#[test]
fn test_render_error_display() {
    let mut instance = conditional_component(InstanceConfig::new("Menu"));
    instance.render(&false).unwrap();
    let message = instance.render(&true).unwrap_err().to_string();

    assert!(message.contains("Menu"));
    assert!(message.contains(&instance.id().to_string()));
}

#[test]
fn test_clear_dirty_drops_request() {
    let mut instance = Instance::new(|hooks: &mut Hooks<'_>, _: &()| hooks.use_state(0));

    let count = instance.render(&()).unwrap();
    count.set(1);
    assert!(instance.is_dirty());

    instance.clear_dirty();
    assert!(!instance.is_dirty());
    assert_eq!(instance.render_if_dirty(&()).unwrap().map(|s| s.get()), None);
    assert_eq!(instance.updates(), 1);
}
