//! Integration tests for the public container contract.
//!
//! The `Probe` type plays the role of a value with observable lifecycle
//! events: every construction, clone, and drop is counted through a shared
//! log, so the tests can assert that assignment destroys the old value
//! exactly once, that moves neither clone nor drop, and that every value is
//! dropped exactly once by the end of its scope.

use std::{
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use altslot::{Alt1, Alt2, AlternativeSet, Variant};

/// Shared counters for one test's worth of `Probe` values.
#[derive(Debug, Default)]
struct ProbeLog {
    constructed: AtomicUsize,
    cloned: AtomicUsize,
    dropped: AtomicUsize,
}

impl ProbeLog {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn constructed(&self) -> usize {
        self.constructed.load(Ordering::Relaxed)
    }

    fn cloned(&self) -> usize {
        self.cloned.load(Ordering::Relaxed)
    }

    fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Value type with observable construct, clone, and drop events.
#[derive(Debug)]
struct Probe {
    id: i32,
    log: Arc<ProbeLog>,
}

impl Probe {
    fn new(id: i32, log: &Arc<ProbeLog>) -> Self {
        log.constructed.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            log: Arc::clone(log),
        }
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        self.log.cloned.fetch_add(1, Ordering::Relaxed);
        Self {
            id: self.id,
            log: Arc::clone(&self.log),
        }
    }
}

impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.log.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

type Demo = (i32, String, Probe);

#[test]
fn test_construction_from_each_alternative() {
    let log = ProbeLog::new();

    let v: Variant<Demo> = Variant::new(10i32);
    assert_eq!(v.index(), <Demo as AlternativeSet>::index_of::<i32>());
    assert!(v.holds::<i32>());

    let v: Variant<Demo> = Variant::new(String::from("hello"));
    assert_eq!(v.index(), Some(1));
    assert_eq!(v.get::<String>().map(String::as_str), Ok("hello"));

    let v: Variant<Demo> = Variant::new(Probe::new(1, &log));
    assert_eq!(v.index(), Some(2));
    assert!(v.holds::<Probe>());
    drop(v);
    assert_eq!(log.dropped(), 1);
}

#[test]
fn test_scenario_construct_from_int() {
    let v: Variant<Demo> = Variant::new(10i32);
    assert_eq!(v.index(), Some(0));
    assert_eq!(v.get::<i32>(), Ok(&10));
}

#[test]
fn test_scenario_assignment_destroys_old_and_constructs_new_once() {
    let log = ProbeLog::new();
    let mut v: Variant<(i32, Probe)> = Variant::new(100i32);
    assert_eq!(v.index(), Some(0));

    v.set(Probe::new(1, &log));
    assert_eq!(v.index(), Some(1));
    assert_eq!(v.get::<Probe>().unwrap().id, 1);
    // Exactly one probe exists and nothing was cloned or dropped yet; the
    // displaced i32 had no destructor to run.
    assert_eq!(log.constructed(), 1);
    assert_eq!(log.cloned(), 0);
    assert_eq!(log.dropped(), 0);

    drop(v);
    assert_eq!(log.dropped(), 1);
}

#[test]
fn test_scenario_copy_construction() {
    let log = ProbeLog::new();
    let c1: Variant<Demo> = Variant::new(Probe::new(3, &log));
    let c2 = c1.clone();

    assert_eq!(c1.index(), Some(2));
    assert_eq!(c2.index(), Some(2));
    assert_eq!(c1.get::<Probe>().unwrap().id, 3);
    assert_eq!(c2.get::<Probe>().unwrap().id, 3);
    // Exactly one additional probe was produced, by cloning.
    assert_eq!(log.constructed(), 1);
    assert_eq!(log.cloned(), 1);
    assert_eq!(log.dropped(), 0);

    drop(c1);
    drop(c2);
    assert_eq!(log.dropped(), 2);
}

#[test]
fn test_scenario_move_construction_empties_source() {
    let log = ProbeLog::new();
    let mut c2: Variant<Demo> = Variant::new(Probe::new(3, &log));
    let c3 = c2.take();

    assert_eq!(c3.index(), Some(2));
    assert_eq!(c3.get::<Probe>().unwrap().id, 3);
    assert_eq!(c2.index(), None);
    // The move produced no clone and dropped nothing.
    assert_eq!(log.constructed(), 1);
    assert_eq!(log.cloned(), 0);
    assert_eq!(log.dropped(), 0);

    drop(c2);
    drop(c3);
    assert_eq!(log.dropped(), 1);
}

#[test]
fn test_scenario_move_assignment_over_int() {
    let log = ProbeLog::new();
    let mut c3: Variant<Demo> = Variant::new(Probe::new(3, &log));
    let mut v6: Variant<Demo> = Variant::new(999i32);
    assert_eq!(v6.get::<i32>(), Ok(&999));

    v6 = c3.take();
    assert_eq!(v6.index(), Some(2));
    assert_eq!(v6.get::<Probe>().unwrap().id, 3);
    assert_eq!(c3.index(), None);
    assert_eq!(log.cloned(), 0);
    assert_eq!(log.dropped(), 0);

    drop(v6);
    drop(c3);
    assert_eq!(log.dropped(), 1);
}

#[test]
fn test_every_value_dropped_exactly_once() {
    let log = ProbeLog::new();
    {
        let a: Variant<Demo> = Variant::new(Probe::new(1, &log));
        let b = a.clone();
        let mut c = b.clone();
        c.set(String::from("displaces the probe"));
        let _d = c.take();
    }
    // Three probes ever existed (one constructed, two cloned); each was
    // dropped exactly once.
    assert_eq!(log.constructed(), 1);
    assert_eq!(log.cloned(), 2);
    assert_eq!(log.dropped(), 3);
}

#[test]
fn test_equality_follows_discriminant_then_value() {
    let log = ProbeLog::new();

    let int_ten: Variant<Demo> = Variant::new(10i32);
    let int_ten_again: Variant<Demo> = Variant::new(10i32);
    let text_ten: Variant<Demo> = Variant::new(String::from("10"));
    let probe: Variant<Demo> = Variant::new(Probe::new(10, &log));

    assert_eq!(int_ten, int_ten_again);
    assert_ne!(int_ten, text_ten);
    assert_ne!(int_ten, probe);
    assert_eq!(probe, probe.clone());

    let empty_a = Variant::<Demo>::empty();
    let empty_b = Variant::<Demo>::empty();
    assert_eq!(empty_a, empty_b);
    assert_ne!(empty_a, int_ten);
}

#[test]
fn test_take_on_empty_is_noop() {
    let mut v = Variant::<Demo>::empty();
    let taken = v.take();
    assert!(v.is_empty());
    assert!(taken.is_empty());
}

#[test]
fn test_take_value_roundtrip() {
    let log = ProbeLog::new();
    let mut v: Variant<Demo> = Variant::new(Probe::new(5, &log));

    let probe: Probe = v.take_value().unwrap();
    assert_eq!(probe.id, 5);
    assert!(v.is_empty());
    assert_eq!(log.dropped(), 0);

    drop(probe);
    drop(v);
    assert_eq!(log.dropped(), 1);
}

#[test]
fn test_index_markers_against_live_state() {
    let v: Variant<Demo> = Variant::new(String::from("indexed"));
    assert!(v.holds_at::<Alt1>());
    assert!(!v.holds_at::<Alt2>());
    assert_eq!(v.at::<Alt1>().map(String::as_str), Ok("indexed"));
    assert!(v.at::<Alt2>().is_err());
}

#[test]
fn test_debug_output() {
    let v: Variant<(i32, String)> = Variant::new(7i32);
    assert_eq!(format!("{v:?}"), "Variant(7)");

    let v: Variant<(i32, String)> = Variant::new(String::from("x"));
    assert_eq!(format!("{v:?}"), "Variant(\"x\")");
}

#[test]
fn test_thread_safety_follows_alternatives() {
    static_assertions::assert_impl_all!(Variant<(u32, String)>: Send, Sync);
    static_assertions::assert_not_impl_any!(Variant<(Rc<u8>, u32)>: Send, Sync);
}

#[test]
fn test_tables_are_per_instantiation_not_per_instance() {
    use std::mem::size_of;

    // The dispatch tables belong to the set, not to any instance: a
    // container is exactly a discriminant plus the storage region, with no
    // table pointer stored per instance.
    assert_eq!(
        size_of::<Variant<(u64,)>>(),
        size_of::<Option<usize>>() + size_of::<u64>()
    );
}
