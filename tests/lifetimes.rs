use lifestyle::{Container, InstantiatorErrorKind, Registration, ResolveErrorKind, ServiceKey};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

trait IA: Send + Sync {
    fn do_something(&self) -> String;
}

struct A {
    name: String,
}

impl IA for A {
    fn do_something(&self) -> String {
        self.name.clone()
    }
}

trait IB: Send + Sync {
    fn execute(&self) -> String;
    fn a(&self) -> Arc<dyn IA>;
}

struct B {
    a: Arc<dyn IA>,
}

impl IB for B {
    fn execute(&self) -> String {
        "123".to_owned()
    }

    fn a(&self) -> Arc<dyn IA> {
        self.a.clone()
    }
}

fn counted_a(counter: &Arc<AtomicUsize>, name: &str) -> Registration<dyn IA> {
    let counter = counter.clone();
    Registration::<dyn IA>::new()
        .constructor(move |args| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(A { name: args.get("name")? }) as Arc<dyn IA>)
        })
        .param("name", name.to_owned())
}

fn b() -> Registration<dyn IB> {
    Registration::<dyn IB>::new()
        .constructor(|args| Ok(Arc::new(B { a: args.dependency("a")? }) as Arc<dyn IB>))
        .dependency::<dyn IA>("a")
}

#[test]
fn test_second_registration_replaces_first() {
    let counter = Arc::new(AtomicUsize::new(0));

    let container = Container::new();
    container.register(counted_a(&counter, "first").singleton()).unwrap();
    container.register(counted_a(&counter, "second")).unwrap();

    let a_1 = container.resolve::<dyn IA>().unwrap();
    let a_2 = container.resolve::<dyn IA>().unwrap();

    assert_eq!(a_1.do_something(), "second");
    // The newest registration is per-request
    assert!(!Arc::ptr_eq(&a_1, &a_2));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_singleton_constructed_once() {
    let counter = Arc::new(AtomicUsize::new(0));

    let container = Container::new();
    container.register(counted_a(&counter, "x").singleton()).unwrap();

    let first = container.resolve::<dyn IA>().unwrap();
    for _ in 0..10 {
        assert!(Arc::ptr_eq(&first, &container.resolve::<dyn IA>().unwrap()));
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_per_request_always_new() {
    let counter = Arc::new(AtomicUsize::new(0));

    let container = Container::new();
    container.register(counted_a(&counter, "x").per_request()).unwrap();

    let first = container.resolve::<dyn IA>().unwrap();
    let second = container.resolve::<dyn IA>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_scoped_per_scope() {
    let counter = Arc::new(AtomicUsize::new(0));

    let container = Container::new();
    container.register(counted_a(&counter, "x").scoped()).unwrap();

    let (first_1, first_2) = container.scope(|container| {
        (
            container.resolve::<dyn IA>().unwrap(),
            container.resolve::<dyn IA>().unwrap(),
        )
    });
    let second = container.scope(|container| container.resolve::<dyn IA>().unwrap());

    assert!(Arc::ptr_eq(&first_1, &first_2));
    assert!(!Arc::ptr_eq(&first_1, &second));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_scoped_without_scope() {
    let container = Container::new();
    container
        .register(counted_a(&Arc::new(AtomicUsize::new(0)), "x").scoped())
        .unwrap();

    match container.resolve::<dyn IA>() {
        Err(ResolveErrorKind::NoActiveScope { service }) => assert_eq!(service, ServiceKey::of::<dyn IA>()),
        Err(err) => panic!("unexpected error: {err}"),
        Ok(_) => panic!("resolved a scoped service without a scope"),
    }
}

#[test]
fn test_unregistered() {
    let container = Container::new();

    match container.resolve::<dyn IA>() {
        Err(ResolveErrorKind::NoRegistration { service }) => assert_eq!(service, ServiceKey::of::<dyn IA>()),
        Err(err) => panic!("unexpected error: {err}"),
        Ok(_) => panic!("resolved an unregistered service"),
    }
}

#[test]
fn test_nested_scope_restores_outer_cache() {
    let counter = Arc::new(AtomicUsize::new(0));

    let container = Container::new();
    container.register(counted_a(&counter, "x").scoped()).unwrap();

    let scope_a = container.enter_scope();
    let cached_in_a = scope_a.resolve::<dyn IA>().unwrap();

    let cached_in_b = {
        let scope_b = container.enter_scope();
        scope_b.resolve::<dyn IA>().unwrap()
    };

    let after_b = scope_a.resolve::<dyn IA>().unwrap();

    assert!(!Arc::ptr_eq(&cached_in_a, &cached_in_b));
    assert!(Arc::ptr_eq(&cached_in_a, &after_b));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_scope_restored_on_early_return() {
    fn failing(container: &Container) -> Result<(), ResolveErrorKind> {
        let _scope = container.enter_scope();
        container.resolve::<dyn IB>()?;
        Ok(())
    }

    let container = Container::new();
    container.register(b()).unwrap();

    assert!(failing(&container).is_err());
    assert_eq!(container.scope_depth(), 0);
}

#[test]
fn test_dependency_injection() {
    let container = Container::new();
    container
        .register(counted_a(&Arc::new(AtomicUsize::new(0)), "x"))
        .unwrap();
    container.register(b()).unwrap();

    let b = container.resolve::<dyn IB>().unwrap();

    assert_eq!(b.execute(), "123");
    assert_eq!(b.a().do_something(), "x");
}

#[test]
fn test_dependency_unregistered() {
    let container = Container::new();
    container.register(b()).unwrap();

    match container.resolve::<dyn IB>() {
        Err(ResolveErrorKind::Instantiator(InstantiatorErrorKind::Deps(err))) => {
            assert!(matches!(*err, ResolveErrorKind::NoRegistration { .. }));
        }
        Err(err) => panic!("unexpected error: {err}"),
        Ok(_) => panic!("resolved a service with an unregistered dependency"),
    }
}

#[test]
fn test_scoped_dependency_of_singleton() {
    let counter = Arc::new(AtomicUsize::new(0));

    let container = Container::new();
    container.register(counted_a(&counter, "x").scoped()).unwrap();
    container.register(b().singleton()).unwrap();

    let (b_1, a_1) = container.scope(|container| {
        (
            container.resolve::<dyn IB>().unwrap(),
            container.resolve::<dyn IA>().unwrap(),
        )
    });
    let b_2 = container.scope(|container| container.resolve::<dyn IB>().unwrap());

    // The singleton keeps the scoped instance it was built with
    assert!(Arc::ptr_eq(&b_1, &b_2));
    assert!(Arc::ptr_eq(&b_1.a(), &a_1));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
