//! Integration tests for Zentropy

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tracing_test::traced_test;
use zentropy::{make_state, Listener, Reducers, State, StateError};

#[derive(Clone, Debug, PartialEq)]
struct Person {
    name: String,
    email: String,
    online: bool,
}

fn make_person() -> Person {
    Person {
        name: "Evrick".to_string(),
        email: "evrick@state.com".to_string(),
        online: false,
    }
}

fn presence() -> Reducers<Person> {
    Reducers::new()
        .on("login", |p: &Person, _: Option<&()>| Person {
            online: true,
            ..p.clone()
        })
        .on("logout", |p: &Person, _: Option<&()>| Person {
            online: false,
            ..p.clone()
        })
}

/// Records every value a listener receives.
fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    (seen, move |value: &T| seen_clone.lock().unwrap().push(value.clone()))
}

#[test]
fn creates_state_with_initial_value() {
    let initial = make_person();
    let state = State::new(initial.clone());
    assert_eq!(state.value(), initial);
}

#[test]
fn calls_subscribers_on_change() {
    let initial = make_person();
    let state = State::new(initial.clone());

    let (sub1, record1) = recorder::<Person>();
    let (sub2, record2) = recorder::<Person>();
    state.subscribe(record1);
    state.subscribe(record2);

    assert!(sub1.lock().unwrap().is_empty());
    assert!(sub2.lock().unwrap().is_empty());

    let updated = Person {
        name: "Eric".to_string(),
        ..initial
    };
    state.update(updated.clone());
    assert_eq!(state.value(), updated);

    assert_eq!(*sub1.lock().unwrap(), vec![updated.clone()]);
    assert_eq!(*sub2.lock().unwrap(), vec![updated]);
}

#[test]
fn calls_subscriber_on_action_invoke() {
    let state = State::with_reducers(make_person(), presence());
    let (sub1, record) = recorder::<Person>();
    state.subscribe(record);

    assert!(!state.value().online);

    state.actions().get("login").unwrap().invoke();
    assert!(state.value().online);
    assert_eq!(sub1.lock().unwrap().len(), 1);
    assert_eq!(sub1.lock().unwrap().last(), Some(&state.value()));

    state.actions().get("logout").unwrap().invoke();
    assert!(!state.value().online);
    assert_eq!(sub1.lock().unwrap().len(), 2);
    assert_eq!(sub1.lock().unwrap().last(), Some(&state.value()));
}

#[test]
fn calls_subscriber_on_dispatch() {
    let state = State::with_reducers(make_person(), presence());
    let (sub1, record) = recorder::<Person>();
    state.subscribe(record);

    state.dispatch("login", None);
    assert!(state.value().online);
    assert_eq!(sub1.lock().unwrap().len(), 1);

    state.dispatch("logout", None);
    assert!(!state.value().online);
    assert_eq!(sub1.lock().unwrap().len(), 2);
    assert_eq!(sub1.lock().unwrap().last(), Some(&state.value()));
}

#[test]
fn has_all_reducers_available() {
    let state = make_state(
        1,
        Reducers::new()
            .on("a", |t: &i32, _: Option<&()>| *t)
            .on("b", |t: &i32, _: Option<&()>| *t)
            .on("c", |t: &i32, _: Option<&()>| *t)
            .on("d", |t: &i32, _: Option<&()>| *t),
    );

    let actions = state.actions();
    assert_eq!(actions.len(), 4);
    for name in ["a", "b", "c", "d"] {
        assert!(actions.contains(name), "missing action {name}");
    }
}

#[test]
fn unsubscribes_callback() {
    let initial = make_person();
    let state = State::new(initial.clone());

    let (sub1, record1) = recorder::<Person>();
    let (sub2, record2) = recorder::<Person>();
    state.subscribe(record1);
    let listener2 = Listener::new(record2);
    state.subscribe_listener(&listener2);

    state.unsubscribe(&listener2);

    let updated = Person {
        name: "Eric".to_string(),
        ..initial
    };
    state.update(updated.clone());

    assert_eq!(*sub1.lock().unwrap(), vec![updated]);
    assert!(sub2.lock().unwrap().is_empty());
}

#[test]
fn subscription_handle_unsubscribes() {
    let state = State::new(0);
    let (seen, record) = recorder::<i32>();
    let handle = state.subscribe(record);

    state.update(1);
    assert!(handle.unsubscribe());
    state.update(2);

    assert_eq!(*seen.lock().unwrap(), vec![1]);
    assert!(!handle.is_active());
    // Releasing again is harmless.
    assert!(!handle.unsubscribe());
}

#[test]
fn resets_to_initial_value() {
    let initial = make_person();
    let state = State::with_reducers(initial.clone(), presence());
    let (seen, record) = recorder::<Person>();
    state.subscribe(record);

    state.dispatch("login", None);
    state.update(Person {
        name: "Eric".to_string(),
        ..state.value()
    });
    state.reset();

    assert_eq!(state.value(), initial);
    assert_eq!(seen.lock().unwrap().len(), 3);
    assert_eq!(seen.lock().unwrap().last(), Some(&initial));
}

#[test]
fn middleware_sees_candidate_then_is_removed() {
    let state = make_state(
        0,
        Reducers::new().on("increment", |s: &i32, _: Option<&String>| s + 1),
    );
    let order = Arc::new(Mutex::new(Vec::new()));

    let order_clone = order.clone();
    let unregister = state.use_middleware(move |value, action, payload| {
        order_clone
            .lock()
            .unwrap()
            .push(format!("middleware({value}, {action}, {payload:?})"));
    });
    let order_clone = order.clone();
    state.subscribe(move |value| order_clone.lock().unwrap().push(format!("listener({value})")));

    state.dispatch("increment", Some("tag".to_string()));
    assert_eq!(
        *order.lock().unwrap(),
        vec![
            "middleware(1, increment, Some(\"tag\"))".to_string(),
            "listener(1)".to_string(),
        ]
    );

    unregister.unsubscribe();
    unregister.unsubscribe();
    state.dispatch("increment", None);
    assert_eq!(order.lock().unwrap().last().unwrap(), "listener(2)");
    assert_eq!(order.lock().unwrap().len(), 3);
}

#[traced_test]
#[test]
fn unknown_action_is_reported_not_raised() {
    let state = State::with_reducers(make_person(), presence());
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    state.subscribe(move |_| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(state.dispatch("doesNotExist", None), None);
    assert_eq!(state.value(), make_person());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(logs_contain("reducer doesNotExist not found"));

    assert_eq!(
        state.try_dispatch("doesNotExist", None).unwrap_err(),
        StateError::UnknownAction {
            action: "doesNotExist".to_string()
        }
    );
}

#[test]
fn shared_across_threads() {
    let state = make_state(
        0usize,
        Reducers::new().on("increment", |n: &usize, _: Option<&()>| n + 1),
    );
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    state.subscribe(move |_| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let state = state.clone();
            std::thread::spawn(move || {
                for _ in 0..10 {
                    state.dispatch("increment", None);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Dispatches from different threads commit one at a time.
    assert_eq!(calls.load(Ordering::SeqCst), 40);
    assert_eq!(state.value(), 40);
}
