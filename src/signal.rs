use std::sync::{Arc, Mutex};

/// A published value with last-value-wins semantics.
///
/// The producer overwrites the value, readers take the latest one; there
/// is no queue and no notification. Handles are cheap clones sharing the
/// same slot, so the producer and its consumers can be wired up without
/// threading a setter through them.
#[derive(Debug, Clone)]
pub(crate) struct Signal<T: Copy> {
    value: Arc<Mutex<T>>,
}

impl<T: Copy> Signal<T> {
    pub(crate) fn new(initial: T) -> Self {
        Self { value: Arc::new(Mutex::new(initial)) }
    }

    pub(crate) fn publish(&self, value: T) {
        *self.value.lock().unwrap() = value;
    }

    pub(crate) fn get(&self) -> T {
        *self.value.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_published_value_wins() {
        let signal = Signal::new(0.0);
        signal.publish(0.25);
        signal.publish(0.75);
        assert_eq!(signal.get(), 0.75);
    }

    #[test]
    fn handles_share_the_same_slot() {
        let signal = Signal::new(1);
        let reader = signal.clone();
        signal.publish(42);
        assert_eq!(reader.get(), 42);
    }
}
