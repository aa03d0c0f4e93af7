use super::*;
use std::sync::Arc;

#[test]
fn test_empty_string_is_none_atom() {
    let interner = ShardedInterner::new();
    assert_eq!(interner.intern(""), Atom::NONE);
    assert_eq!(&*interner.resolve(Atom::NONE), "");
}

#[test]
fn test_interning_deduplicates() {
    let interner = ShardedInterner::new();
    let a = interner.intern("Derived");
    let b = interner.intern("Derived");
    let c = interner.intern("Base");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(&*interner.resolve(a), "Derived");
}

#[test]
fn test_common_names_are_preinterned() {
    let interner = ShardedInterner::new();
    assert!(interner.lookup("GetHashCode").is_some());
    assert!(interner.lookup("op_Equality").is_some());
    assert!(interner.lookup("NeverSeenBefore").is_none());
}

#[test]
fn test_concurrent_interning_agrees() {
    let interner = Arc::new(ShardedInterner::new());
    let names: Vec<String> = (0..32).map(|i| format!("M{}", i % 4)).collect();
    let atoms: Vec<Atom> = std::thread::scope(|scope| {
        let handles: Vec<_> = names
            .iter()
            .map(|name| {
                let interner = Arc::clone(&interner);
                scope.spawn(move || interner.intern(name))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("interning thread panicked"))
            .collect()
    });
    for (i, atom) in atoms.iter().enumerate() {
        assert_eq!(*atom, atoms[i % 4]);
        assert_eq!(&*interner.resolve(*atom), format!("M{}", i % 4));
    }
}
