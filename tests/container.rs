use named_di::{dependency, Container, Error, Module};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> &'static str + Send + Sync + 'static) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    (calls, move || {
        counted.fetch_add(1, Ordering::SeqCst);
        "x"
    })
}

#[test]
fn it_registers_function() {
    let mut container = Container::named("it_registers_function");
    container.register("foo", (), || String::from("baz"));
    container.validate().unwrap();

    let foo: String = container.get("foo").unwrap();

    assert_eq!(foo, "baz");
}

#[test]
fn it_registers_named_function() {
    fn foo() -> i32 {
        1
    }

    let module = Module::from_fn(foo);
    let mut container = Container::new();
    container.register_module(module.clone());
    container.validate().unwrap();

    let by_reference: i32 = container.get(&module).unwrap();
    let by_name = container.lookup(module.name()).unwrap();

    assert_eq!(by_reference, 1);
    assert!(container.lookup(&module).unwrap().ptr_eq(&by_name));
}

#[test]
fn it_looks_up_dependency_by_reference() {
    let foo = Module::new("foo", || "foo");
    let mut container = Container::new();
    container.register_as("foo", foo.clone());
    container.validate().unwrap();

    assert_eq!(container.get::<&str>(&foo).unwrap(), "foo");
}

#[test]
fn it_registers_function_with_dependencies() {
    #[derive(Debug, Clone, PartialEq)]
    struct Foo {
        bar: i32,
        baz: i32,
    }

    let mut container = Container::new();
    container
        .register("bar", (), || 1)
        .register("baz", (), || 2)
        .register("foo", ["bar", "baz"], |bar: i32, baz: i32| Foo { bar, baz });
    container.validate().unwrap();

    let foo: Foo = container.get("foo").unwrap();

    assert_eq!(foo, Foo { bar: 1, baz: 2 });
}

#[test]
fn dependencies_are_passed_in_declared_order_regardless_of_registration_order() {
    let mut container = Container::new();
    container
        .register("foo", ["bar", "baz"], |b: &'static str, z: &'static str| (b, z))
        .register("baz", (), || "baz")
        .register("bar", (), || "bar");

    let foo: (&str, &str) = container.get("foo").unwrap();

    assert_eq!(foo, ("bar", "baz"));
}

#[test]
fn factory_is_invoked_once() {
    let (calls, factory) = counter();
    let mut container = Container::new();
    container.register("x", (), factory);

    container.lookup("x").unwrap();
    container.lookup("x").unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn re_registration_only_invokes_last_factory() {
    let (first_calls, first) = counter();
    let (second_calls, second) = counter();
    let mut container = Container::new();
    container.register("x", (), first);
    container.register("x", (), second);

    container.lookup("x").unwrap();
    container.lookup("x").unwrap();

    assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn re_registration_discards_resolved_value() {
    let (first_calls, first) = counter();
    let mut container = Container::new();
    container.register("x", (), first);
    container.lookup("x").unwrap();

    container.register("x", (), || "y");

    assert_eq!(container.get::<&str>("x").unwrap(), "y");
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn it_looks_up_multiple_dependencies() {
    let mut container = Container::new();
    container
        .register("foo", (), || "foo")
        .register("bar", (), || "bar")
        .register("baz", (), || "baz");
    container.validate().unwrap();

    let values = container.get_many(["foo", "bar", "baz"]).unwrap();
    let values: Vec<_> = values
        .iter()
        .map(|(id, value)| (id.as_str(), *value.downcast_ref::<&str>().unwrap()))
        .collect();

    assert_eq!(values, [("foo", "foo"), ("bar", "bar"), ("baz", "baz")]);
}

#[test]
fn batch_lookup_fails_as_a_whole() {
    let mut container = Container::new();
    container.register("foo", (), || "foo");

    let err = container.get_many(vec![String::from("foo"), String::from("bar")]).unwrap_err();

    assert_eq!(err.module(), Some("bar"));
    assert_eq!(err.parent(), None);
}

#[test]
fn missing_dependency_fails_validation_and_lookup() {
    let mut container = Container::named("missing");
    container.register("foo", "bar", |bar: i32| bar);

    let validation = container.validate().unwrap_err();
    let lookup = container.lookup("foo").unwrap_err();

    assert_eq!(validation.errors(), &[lookup.clone()]);
    assert_eq!(lookup.module(), Some("bar"));
    assert_eq!(lookup.parent(), Some("foo"));
    assert_eq!(lookup.to_string(), "Missing \"foo\"'s dependency \"bar\" in container \"missing\"");
}

#[test]
fn it_validates_against_missing_dependencies() {
    let mut container = Container::new();
    container
        .register("foo", "bar", |_: i32| "foo")
        .register("baz", "test", |_: i32| "baz");

    let err = container.validate().unwrap_err();

    assert!(matches!(err, Error::Validation { ref errors } if errors.len() == 2));
}

#[test]
fn it_validates_against_cyclical_dependencies() {
    let mut container = Container::new();
    container
        .register("foo", "bar", |_: i32| "foo")
        .register("bar", "baz", |_: i32| "bar")
        .register("baz", "foo", |_: i32| "baz");

    let err = container.validate().unwrap_err();

    assert_eq!(err.errors().len(), 1);
    match &err.errors()[0] {
        Error::CyclicDependency { path, .. } => {
            assert_eq!(path, &["foo", "bar", "baz", "foo"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn lookup_on_cycle_returns_error() {
    let mut container = Container::new();
    container
        .register("foo", "bar", |_: i32| 1)
        .register("bar", "foo", |_: i32| 2);

    let err = container.lookup("foo").unwrap_err();

    assert!(matches!(err, Error::CyclicDependency { .. }));
    assert!(!container.is_resolved("foo"));
    assert!(!container.is_resolved("bar"));
}

#[test]
fn it_adds_dependencies_to_a_function() {
    fn bar() -> &'static str {
        "bar"
    }
    fn baz() -> &'static str {
        "baz"
    }
    fn foo(bar: &'static str, baz: &'static str) -> [&'static str; 2] {
        [bar, baz]
    }

    let bar = Module::from_fn(bar);
    let baz = Module::from_fn(baz);
    let mut foo = Module::from_fn(foo);
    dependency(&mut foo, [&bar]);
    dependency(&mut foo, [&baz]);

    let mut container = Container::new();
    container
        .register_module(baz)
        .register_module(bar)
        .register_module(foo.clone());
    container.validate().unwrap();

    let declared: Vec<_> = container
        .dependencies(&foo)
        .unwrap()
        .iter()
        .map(|key| key.name())
        .collect();

    assert_eq!(declared, ["bar", "baz"]);
    assert_eq!(container.get::<[&str; 2]>(&foo).unwrap(), ["bar", "baz"]);
}

#[test]
fn unregistered_module_reference_is_missing() {
    let registered = Module::new("foo", || 1);
    let stranger = Module::new("foo", || 1);
    let mut container = Container::new();
    container.register_module(registered);

    let err = container.lookup(&stranger).unwrap_err();

    assert_eq!(err.module(), Some("foo"));
    assert!(matches!(err, Error::MissingDependency { parent: None, .. }));
}

#[test]
fn dependency_on_overridden_module_is_missing() {
    let bar = Module::new("bar", || 1);
    let foo = Module::new("foo", |bar: i32| bar).depends_on(&bar);

    let mut container = Container::new();
    container
        .register_module(bar)
        .register_module(foo)
        .register("bar", (), || 2);
    for i in 0..64 {
        container.register_module(Module::new(format!("filler{i}"), move || i));
    }

    let err = container.get::<i32>("foo").unwrap_err();

    assert_eq!(err.module(), Some("bar"));
    assert_eq!(err.parent(), Some("foo"));
    assert!(container.validate().is_err());
}

#[test]
fn re_registering_shared_module_keeps_first_id() {
    let shared = Module::new("shared", || 1);
    let mut container = Container::new();
    container
        .register_as("a", shared.clone())
        .register_as("b", shared.clone())
        .register_as("a", shared.clone());

    container.lookup(&shared).unwrap();

    assert_eq!(container.ids().collect::<Vec<_>>(), ["a", "b"]);
    assert!(container.is_resolved("a"));
    assert!(!container.is_resolved("b"));
}
