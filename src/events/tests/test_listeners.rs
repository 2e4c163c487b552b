use std::{cell::RefCell, rc::Rc};

use anyhow::{bail, Result};
use heapkit_events::*;
use pretty_assertions::assert_eq;

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, name: &'static str, consume: bool) -> impl FnMut(&i32) -> Result<bool> {
    let log = log.clone();
    move |event: &i32| {
        log.borrow_mut().push(format!("{}:{}", name, event));
        Ok(consume)
    }
}

struct Threshold {
    limit: i32,
    seen: usize,
}

impl EventListener<i32> for Threshold {
    fn on_event(&mut self, event: &i32) -> Result<bool> {
        self.seen += 1;
        if *event > self.limit {
            bail!("{} exceeds {}", event, self.limit);
        }
        Ok(false)
    }
}

#[test]
fn test_dispatch_stops_when_consumed() {
    let log = Log::default();
    let mut listeners = Listeners::new();
    listeners.register_fn("a", recorder(&log, "a", false));
    listeners.register_fn("b", recorder(&log, "b", true));
    listeners.register_fn("c", recorder(&log, "c", false));
    assert_eq!(listeners.len(), 3);

    assert!(listeners.dispatch(&7).unwrap());
    assert_eq!(*log.borrow(), vec!["a:7", "b:7"]);

    assert!(listeners.unregister("b"));
    assert!(!listeners.unregister("b"));
    assert!(!listeners.dispatch(&8).unwrap());
    assert_eq!(*log.borrow(), vec!["a:7", "b:7", "a:8", "c:8"]);
}

#[test]
fn test_dispatch_propagates_failures() {
    let log = Log::default();
    let mut listeners = Listeners::new();
    listeners.register("threshold", Threshold { limit: 10, seen: 0 });
    listeners.register_fn("after", recorder(&log, "after", false));

    assert!(!listeners.dispatch(&3).unwrap());
    let err = listeners.dispatch(&30).unwrap_err();
    assert_eq!(err.to_string(), "listener \"threshold\" failed");
    assert_eq!(err.root_cause().to_string(), "30 exceeds 10");
    assert_eq!(*log.borrow(), vec!["after:3"]);
}

#[test]
fn test_dispatch_with_reports_and_continues() {
    let log = Log::default();
    let mut listeners = Listeners::new();
    listeners.register("threshold", Threshold { limit: 10, seen: 0 });
    listeners.register_fn("after", recorder(&log, "after", true));

    let mut failures = Vec::new();
    let consumed = listeners.dispatch_with(&30, |name, err| {
        failures.push(format!("{}: {}", name, err));
    });
    assert!(consumed);
    assert_eq!(failures, vec!["threshold: 30 exceeds 10"]);
    assert_eq!(*log.borrow(), vec!["after:30"]);

    assert!(listeners.dispatch_or_log(&50));
}

#[test]
fn test_empty_registry() {
    let mut listeners: Listeners<i32> = Listeners::default();
    assert!(listeners.is_empty());
    assert!(!listeners.dispatch(&1).unwrap());
    assert!(!listeners.dispatch_or_log(&1));
}

#[test]
fn test_property_listeners() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let mut property = Property::new(1);
    {
        let changes = changes.clone();
        property
            .listeners_mut()
            .register_fn("record", move |old, new| {
                changes.borrow_mut().push((*old, *new));
                Ok(false)
            });
    }

    assert!(property.set(2).unwrap());
    assert!(!property.set(2).unwrap());
    assert!(property.set_or_log(5));
    assert_eq!(*property.get(), 5);
    assert_eq!(*changes.borrow(), vec![(1, 2), (2, 5)]);
}

#[test]
fn test_property_failure_keeps_new_value() {
    let mut property = Property::new("idle");
    property
        .listeners_mut()
        .register_fn("reject", |_old, new| bail!("rejected {}", new));
    property
        .listeners_mut()
        .register_fn("accept", |_old, _new| Ok(true));

    let err = property.set("busy").unwrap_err();
    assert_eq!(err.root_cause().to_string(), "rejected busy");
    assert_eq!(*property.get(), "busy");

    let mut failures = 0;
    let consumed = property
        .listeners_mut()
        .notify_with(&"busy", &"done", |_, _| failures += 1);
    assert!(consumed);
    assert_eq!(failures, 1);
    assert_eq!(property.into_inner(), "busy");
}
