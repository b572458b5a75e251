use std::cell::RefCell;
use std::rc::Rc;

use chart_kit::error::ChartError;
use chart_kit::events::{
    ChartEvent, EventHandler, EventMap, SELECTED_CHANGE_EVENT, dom_event_name, inject,
};

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> EventHandler<ChartEvent>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let make = move |label: &'static str| -> EventHandler<ChartEvent> {
        let sink = Rc::clone(&sink);
        Rc::new(move |_: &ChartEvent| sink.borrow_mut().push(label.to_owned()))
    };
    (log, make)
}

fn legend_event() -> ChartEvent {
    ChartEvent::Legend { slot: 0 }
}

#[test]
fn dom_event_names_drop_first_on_and_lowercase() {
    assert_eq!(dom_event_name("onMouseOver"), "mouseover");
    assert_eq!(dom_event_name("onClick"), "click");
    assert_eq!(dom_event_name("dragon"), "drag");
}

#[test]
fn injected_handler_runs_before_original() {
    let (log, make) = recorder();
    let mut events = EventMap::new();
    events.insert_rc("onClick", make("original"));

    let injected = inject(&events, &["onClick", "onMouseOver"], vec![make("first"), make("hover")])
        .expect("arity matches");
    assert!(injected.dispatch("onClick", &legend_event()));
    assert!(injected.dispatch("onMouseOver", &legend_event()));
    assert_eq!(*log.borrow(), vec!["first", "original", "hover"]);

    log.borrow_mut().clear();
    assert!(events.dispatch("onClick", &legend_event()));
    assert_eq!(*log.borrow(), vec!["original"]);
}

#[test]
fn inject_rejects_mismatched_lengths() {
    let (_, make) = recorder();
    let err = inject(&EventMap::new(), &["onClick", "onMouseOver"], vec![make("only")])
        .expect_err("lengths differ");
    assert!(matches!(err, ChartError::InjectArity { names: 2, handlers: 1 }));
}

#[test]
fn selected_change_is_stripped_for_shapes() {
    let events: EventMap = EventMap::new()
        .with_handler("onClick", |_| {})
        .with_handler(SELECTED_CHANGE_EVENT, |_| {})
        .with_handler("onMouseLeave", |_| {});
    let shape_events = events.without_selected_change();
    assert_eq!(shape_events.names().collect::<Vec<_>>(), vec!["onClick", "onMouseLeave"]);
    assert!(events.contains(SELECTED_CHANGE_EVENT));

    let dom: Vec<String> = shape_events.dom_events().map(|(name, _)| name).collect();
    assert_eq!(dom, vec!["click", "mouseleave"]);
}

#[test]
fn dispatch_reports_missing_handlers() {
    let events: EventMap = EventMap::new();
    assert!(events.is_empty());
    assert!(!events.dispatch("onClick", &legend_event()));
}
