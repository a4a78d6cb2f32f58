//! Counter application: reducers, payloads, middleware and reset together

use tracing_subscriber::EnvFilter;
use zentropy::{middleware, Reducers, State};

#[derive(Clone, Debug)]
struct CounterState {
    count: i32,
    step: i32,
    history: Vec<i32>,
}

impl CounterState {
    fn new() -> Self {
        Self {
            count: 0,
            step: 1,
            history: vec![0],
        }
    }

    fn with_count(&self, count: i32) -> Self {
        let mut history = self.history.clone();
        history.push(count);
        Self {
            count,
            step: self.step,
            history,
        }
    }
}

fn reducers() -> Reducers<CounterState, i32> {
    Reducers::new()
        .on("increment", |s: &CounterState, _: Option<&i32>| {
            s.with_count(s.count + s.step)
        })
        .on("decrement", |s: &CounterState, _: Option<&i32>| {
            s.with_count(s.count - s.step)
        })
        .on("set_step", |s: &CounterState, step: Option<&i32>| CounterState {
            step: step.copied().unwrap_or(1),
            ..s.clone()
        })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Complete Counter Application ===\n");

    println!("1. Initializing counter");
    let counter = State::builder(CounterState::new())
        .name("counter")
        .reducers(reducers())
        .middleware(middleware::logging())
        .build();

    // Setup a subscriber to log changes
    let sub = counter.subscribe(|state| {
        println!("   [State] Count: {}, Step: {}", state.count, state.step);
    });

    println!("\n2. Available actions:");
    for name in counter.actions().names() {
        println!("   - {}", name);
    }

    println!("\n3. Incrementing...");
    let actions = counter.actions();
    if let Some(increment) = actions.get("increment") {
        for _ in 0..3 {
            increment.invoke();
        }
    }

    println!("\n4. Changing step size to 5");
    counter.dispatch("set_step", Some(5));

    println!("\n5. Incrementing with new step...");
    counter.dispatch("increment", None);

    println!("\n6. Decrementing...");
    for _ in 0..3 {
        counter.dispatch("decrement", None);
    }

    println!("\n7. Dispatching an unknown action (logged, ignored)");
    counter.dispatch("multiply", Some(2));

    println!("\n8. History:");
    counter.read(|state| {
        println!("   {:?}", state.history);
    });

    println!("\n9. Resetting...");
    counter.reset();

    println!("\n10. Unsubscribing and incrementing silently");
    sub.unsubscribe();
    counter.dispatch("increment", None);
    println!("   Count is now {}", counter.value().count);

    println!("\n✓ Counter application complete!");
}
