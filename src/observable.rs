//! Observable values
//!
//! A value with an explicit setter that synchronously notifies registered
//! observers. Used for engine settings such as the mute flag.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer<T> = Box<dyn FnMut(&T, &T)>;

pub struct Observable<T> {
    value: T,
    observers: Vec<(ObserverId, Observer<T>)>,
    next_id: u64,
}

impl<T: PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Store `value` and call every observer with `(old, new)`.
    /// Setting an equal value notifies nobody. Returns true if it changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        let old = std::mem::replace(&mut self.value, value);
        for (_, observer) in self.observers.iter_mut() {
            observer(&old, &self.value);
        }
        true
    }

    /// Observers are called in subscription order.
    pub fn subscribe(&mut self, observer: impl FnMut(&T, &T) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T: PartialEq + Copy> Observable<T> {
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: PartialEq + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_notifies_with_old_and_new() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut muted = Observable::new(false);
        let sink = seen.clone();
        muted.subscribe(move |old, new| sink.borrow_mut().push((*old, *new)));

        assert!(muted.set(true));
        assert!(!muted.set(true));
        assert!(muted.set(false));
        assert_eq!(*seen.borrow(), vec![(false, true), (true, false)]);
        assert!(!muted.value());
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let count = Rc::new(RefCell::new(0));
        let mut volume = Observable::new(10u8);
        let c = count.clone();
        let id = volume.subscribe(move |_, _| *c.borrow_mut() += 1);

        volume.set(5);
        assert!(volume.unsubscribe(id));
        assert!(!volume.unsubscribe(id));
        volume.set(7);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(*volume.get(), 7);
        assert_eq!(volume.observer_count(), 0);
    }
}
