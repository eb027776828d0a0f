//! Ordered broadcast listener lists for dialogue lifecycle notifications.

use std::fmt;

use crate::interp::Interpreter;

/// Identifier for one registered listener, used to disconnect it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotId(u64);

/// Ordered listener list for one notification.
pub struct Signal<T> {
    slots: Vec<(SlotId, Box<dyn FnMut(&T)>)>,
    next: u64,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next: 0,
        }
    }
}

impl<T> Signal<T> {
    pub fn connect(&mut self, listener: impl FnMut(&T) + 'static) -> SlotId {
        let id = SlotId(self.next);
        self.next += 1;
        self.slots.push((id, Box::new(listener)));
        id
    }

    pub fn disconnect(&mut self, id: SlotId) {
        self.slots.retain(|(slot, _)| *slot != id);
    }

    /// Invokes listeners in registration order.
    pub fn emit(&mut self, payload: &T) {
        for (_, listener) in self.slots.iter_mut() {
            listener(payload);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.slots.len())
            .finish()
    }
}

/// Listener list whose callbacks receive a read-only notice plus a mutable
/// handle to the thing being presented, so listeners can customize it in
/// place.
pub struct SignalMut<N, H> {
    slots: Vec<(SlotId, Box<dyn FnMut(&N, &mut H)>)>,
    next: u64,
}

impl<N, H> Default for SignalMut<N, H> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next: 0,
        }
    }
}

impl<N, H> SignalMut<N, H> {
    pub fn connect(&mut self, listener: impl FnMut(&N, &mut H) + 'static) -> SlotId {
        let id = SlotId(self.next);
        self.next += 1;
        self.slots.push((id, Box::new(listener)));
        id
    }

    pub fn disconnect(&mut self, id: SlotId) {
        self.slots.retain(|(slot, _)| *slot != id);
    }

    /// Invokes listeners in registration order.
    pub fn emit(&mut self, notice: &N, handle: &mut H) {
        for (_, listener) in self.slots.iter_mut() {
            listener(notice, handle);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<N, H> fmt::Debug for SignalMut<N, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalMut")
            .field("listeners", &self.slots.len())
            .finish()
    }
}

/// Listener list for the bind/unbind interpreter hook windows.
///
/// Hooks receive the live interpreter so host callables can be registered at
/// session start and released at teardown; no hook may retain the reference
/// past its invocation.
#[derive(Default)]
pub struct Hooks {
    slots: Vec<(SlotId, Box<dyn FnMut(&mut dyn Interpreter)>)>,
    next: u64,
}

impl Hooks {
    pub fn connect(&mut self, hook: impl FnMut(&mut dyn Interpreter) + 'static) -> SlotId {
        let id = SlotId(self.next);
        self.next += 1;
        self.slots.push((id, Box::new(hook)));
        id
    }

    pub fn disconnect(&mut self, id: SlotId) {
        self.slots.retain(|(slot, _)| *slot != id);
    }

    pub fn invoke(&mut self, interpreter: &mut dyn Interpreter) {
        for (_, hook) in self.slots.iter_mut() {
            hook(interpreter);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("listeners", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn listeners_fire_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::<u32>::default();
        let first = Rc::clone(&seen);
        signal.connect(move |value| first.borrow_mut().push(("a", *value)));
        let second = Rc::clone(&seen);
        signal.connect(move |value| second.borrow_mut().push(("b", *value)));
        signal.emit(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn mutable_listeners_can_edit_the_handle() {
        let mut signal = SignalMut::<usize, String>::default();
        signal.connect(|position, text| text.push_str(&position.to_string()));
        let mut text = String::from("entry ");
        signal.emit(&3, &mut text);
        assert_eq!(text, "entry 3");
    }

    #[test]
    fn disconnect_removes_only_that_listener() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::<()>::default();
        let first = Rc::clone(&seen);
        let id = signal.connect(move |_| first.borrow_mut().push("a"));
        let second = Rc::clone(&seen);
        signal.connect(move |_| second.borrow_mut().push("b"));
        signal.disconnect(id);
        signal.emit(&());
        assert_eq!(*seen.borrow(), vec!["b"]);
    }
}
