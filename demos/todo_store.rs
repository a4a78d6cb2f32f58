//! Demonstration of a todo list kept in a State

use zentropy::{Reducers, State};

#[derive(Clone, Debug)]
struct TodoItem {
    id: usize,
    title: String,
    completed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TodoFilter {
    All,
    Active,
    Completed,
}

#[derive(Clone, Debug)]
struct AppState {
    todos: Vec<TodoItem>,
    filter: TodoFilter,
}

/// Payload shared by every todo action.
#[derive(Debug)]
enum TodoArg {
    Title(String),
    Id(usize),
    Filter(TodoFilter),
}

impl AppState {
    fn new() -> Self {
        Self {
            todos: Vec::new(),
            filter: TodoFilter::All,
        }
    }

    fn filtered_todos(&self) -> Vec<&TodoItem> {
        match self.filter {
            TodoFilter::All => self.todos.iter().collect(),
            TodoFilter::Active => self.todos.iter().filter(|t| !t.completed).collect(),
            TodoFilter::Completed => self.todos.iter().filter(|t| t.completed).collect(),
        }
    }

    fn stats(&self) -> (usize, usize, usize) {
        let total = self.todos.len();
        let completed = self.todos.iter().filter(|t| t.completed).count();
        let active = total - completed;
        (total, active, completed)
    }
}

fn add_todo(state: &AppState, arg: Option<&TodoArg>) -> AppState {
    let mut next = state.clone();
    if let Some(TodoArg::Title(title)) = arg {
        next.todos.push(TodoItem {
            id: next.todos.len(),
            title: title.clone(),
            completed: false,
        });
    }
    next
}

fn toggle_todo(state: &AppState, arg: Option<&TodoArg>) -> AppState {
    let mut next = state.clone();
    if let Some(TodoArg::Id(id)) = arg {
        if let Some(todo) = next.todos.iter_mut().find(|t| t.id == *id) {
            todo.completed = !todo.completed;
        }
    }
    next
}

fn set_filter(state: &AppState, arg: Option<&TodoArg>) -> AppState {
    match arg {
        Some(TodoArg::Filter(filter)) => AppState {
            filter: *filter,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

fn print_todos(store: &State<AppState, TodoArg>) {
    store.read(|state| {
        for todo in state.filtered_todos() {
            let status = if todo.completed { "✓" } else { " " };
            println!("   [{}] {}", status, todo.title);
        }
    });
}

fn main() {
    println!("=== State Example: Todo App ===\n");

    let store = State::with_reducers(
        AppState::new(),
        Reducers::new()
            .on("add_todo", add_todo)
            .on("toggle_todo", toggle_todo)
            .on("set_filter", set_filter),
    );

    println!("1. Setting up subscriber");
    store.subscribe(|state| {
        let (total, active, completed) = state.stats();
        println!(
            "   [Store Update] Total: {}, Active: {}, Completed: {}",
            total, active, completed
        );
    });

    println!("\n2. Logging middleware");
    store.use_middleware(|_, action, arg| {
        println!("   [Middleware] {} {:?}", action, arg);
    });

    println!("\n3. Adding todos");
    for title in ["Learn Rust", "Build state container", "Write documentation"] {
        store.dispatch("add_todo", Some(TodoArg::Title(title.to_string())));
    }

    println!("\n4. Current todos:");
    print_todos(&store);

    println!("\n5. Completing first two todos");
    store.dispatch("toggle_todo", Some(TodoArg::Id(0)));
    store.dispatch("toggle_todo", Some(TodoArg::Id(1)));

    println!("\n6. Active todos:");
    store.dispatch("set_filter", Some(TodoArg::Filter(TodoFilter::Active)));
    print_todos(&store);

    println!("\n7. Completed todos:");
    store.dispatch("set_filter", Some(TodoArg::Filter(TodoFilter::Completed)));
    print_todos(&store);

    println!("\n8. Final statistics:");
    let (total, active, completed) = store.read(|state| state.stats());
    println!("   Total: {}", total);
    println!("   Active: {}", active);
    println!("   Completed: {}", completed);

    println!("\n✓ Example complete!");
}
