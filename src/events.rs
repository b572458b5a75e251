//! Named event handlers passed from the host down to shapes.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::{DataPoint, Key};
use crate::error::{ChartError, ChartResult};
use crate::interaction::SelectedDatum;

/// Name under which the legacy selection callback is registered.
pub const SELECTED_CHANGE_EVENT: &str = "onSelectedChange";

pub type EventHandler<E> = Rc<dyn Fn(&E)>;

/// Event delivered to shape handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// Pointer activity on item `index`.
    Shape {
        index: usize,
        datum: Option<DataPoint>,
        client: Option<(f64, f64)>,
    },
    /// Click on series `index` of a per-series chart, with the series key
    /// and every mapped record belonging to it.
    Series {
        index: usize,
        key: Option<Key>,
        data: Vec<DataPoint>,
    },
    /// Legend entry `slot` was targeted.
    Legend { slot: usize },
    /// Legacy selection report: every record with its selection flag.
    SelectedChange(Vec<SelectedDatum>),
}

/// Ordered map from event name (`onClick`, `onMouseOver`, ...) to handler.
pub struct EventMap<E = ChartEvent> {
    handlers: IndexMap<String, EventHandler<E>>,
}

impl<E> Default for EventMap<E> {
    fn default() -> Self {
        Self {
            handlers: IndexMap::new(),
        }
    }
}

impl<E> Clone for EventMap<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<E> fmt::Debug for EventMap<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl<E: 'static> EventMap<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_handler<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&E) + 'static,
    {
        self.insert(name, handler);
        self
    }

    pub fn insert<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&E) + 'static,
    {
        self.handlers.insert(name.into(), Rc::new(handler));
    }

    pub fn insert_rc(&mut self, name: impl Into<String>, handler: EventHandler<E>) {
        self.handlers.insert(name.into(), handler);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EventHandler<E>> {
        self.handlers.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Calls the handler registered under `name`. Returns whether one existed.
    pub fn dispatch(&self, name: &str, event: &E) -> bool {
        match self.handlers.get(name) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    /// Copy without the legacy selection callback, suitable for shapes.
    #[must_use]
    pub fn without_selected_change(&self) -> Self {
        let mut handlers = self.handlers.clone();
        handlers.shift_remove(SELECTED_CHANGE_EVENT);
        Self { handlers }
    }

    /// Handlers keyed by their DOM event name (`onMouseOver` → `mouseover`).
    pub fn dom_events(&self) -> impl Iterator<Item = (String, &EventHandler<E>)> {
        self.handlers
            .iter()
            .map(|(name, handler)| (dom_event_name(name), handler))
    }
}

/// `onMouseOver` → `mouseover`: the first `on` is dropped and the rest lowercased.
#[must_use]
pub fn dom_event_name(name: &str) -> String {
    name.replacen("on", "", 1).to_lowercase()
}

/// Wraps the handlers named in `names` so that the matching entry of
/// `handlers` runs first and the original handler, if any, runs after it.
///
/// Names without an original handler get the injected one alone. The input
/// map is left untouched.
pub fn inject<E: 'static>(
    events: &EventMap<E>,
    names: &[&str],
    handlers: Vec<EventHandler<E>>,
) -> ChartResult<EventMap<E>> {
    if names.len() != handlers.len() {
        return Err(ChartError::InjectArity {
            names: names.len(),
            handlers: handlers.len(),
        });
    }

    let mut injected = events.clone();
    for (name, handler) in names.iter().zip(handlers) {
        let original = events.get(name).cloned();
        let wrapped: EventHandler<E> = Rc::new(move |event: &E| {
            handler(event);
            if let Some(original) = &original {
                original(event);
            }
        });
        injected.insert_rc(*name, wrapped);
    }
    Ok(injected)
}
