#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    Increment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterState {
    pub count: u64,
}

/// Reducer-style store for the counter shown in the status bar.
#[derive(Debug, Default)]
pub struct CounterStore {
    state: CounterState,
}

impl CounterStore {
    pub fn new(initial: CounterState) -> Self {
        Self { state: initial }
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn dispatch(&mut self, action: CounterAction) -> CounterState {
        self.state = reduce(self.state, action);
        self.state
    }
}

fn reduce(state: CounterState, action: CounterAction) -> CounterState {
    match action {
        CounterAction::Increment => CounterState {
            count: state.count.saturating_add(1),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{CounterAction, CounterState, CounterStore};

    #[test]
    fn increment_dispatch_adds_one() {
        let mut store = CounterStore::default();
        store.dispatch(CounterAction::Increment);
        let state = store.dispatch(CounterAction::Increment);
        assert_eq!(state, CounterState { count: 2 });
    }

    #[test]
    fn counter_saturates_instead_of_wrapping() {
        let mut store = CounterStore::new(CounterState { count: u64::MAX });
        assert_eq!(store.dispatch(CounterAction::Increment).count, u64::MAX);
    }
}
