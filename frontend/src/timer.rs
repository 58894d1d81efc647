use gloo_timers::callback::Timeout;

/// Runs a task once after a delay. Dropping the returned handle cancels the
/// task if it has not run yet.
pub trait Scheduler: Clone + 'static {
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// Coalesces bursts of triggers: only the last trigger of a burst runs,
/// `delay_ms` after it happened.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: None,
        }
    }

    pub fn trigger<F>(&mut self, task: F)
    where
        F: FnOnce() + 'static,
    {
        // Replacing the handle drops (and cancels) the previous one.
        self.pending = Some(self.scheduler.schedule(self.delay_ms, Box::new(task)));
    }
}

#[cfg(test)]
pub use virtual_clock::VirtualClock;

#[cfg(test)]
mod virtual_clock {
    use super::Scheduler;
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    struct Queued {
        id: u64,
        due: u64,
        task: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct State {
        now: u64,
        next_id: u64,
        queue: Vec<Queued>,
    }

    /// Scheduler whose time only moves when `advance` is called.
    #[derive(Clone, Default)]
    pub struct VirtualClock {
        state: Rc<RefCell<State>>,
    }

    pub struct VirtualTimer {
        id: u64,
        state: Weak<RefCell<State>>,
    }

    impl Drop for VirtualTimer {
        fn drop(&mut self) {
            if let Some(state) = self.state.upgrade() {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.queue.retain(|queued| queued.id != self.id);
                }
            }
        }
    }

    impl Scheduler for VirtualClock {
        type Handle = VirtualTimer;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> VirtualTimer {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            let due = state.now + u64::from(delay_ms);
            state.queue.push(Queued { id, due, task });
            VirtualTimer {
                id,
                state: Rc::downgrade(&self.state),
            }
        }
    }

    impl VirtualClock {
        pub fn now(&self) -> u64 {
            self.state.borrow().now
        }

        pub fn pending(&self) -> usize {
            self.state.borrow().queue.len()
        }

        /// Moves time forward, running every task that falls due on the way
        /// in deadline order. Tasks scheduled by tasks run too if they are due.
        pub fn advance(&self, ms: u64) {
            let target = self.now() + ms;
            loop {
                let next = {
                    let mut state = self.state.borrow_mut();
                    let index = state
                        .queue
                        .iter()
                        .enumerate()
                        .filter(|(_, queued)| queued.due <= target)
                        .min_by_key(|(_, queued)| (queued.due, queued.id))
                        .map(|(index, _)| index);
                    match index {
                        Some(index) => {
                            let queued = state.queue.remove(index);
                            state.now = queued.due;
                            Some(queued.task)
                        }
                        None => {
                            state.now = target;
                            None
                        }
                    }
                };
                match next {
                    Some(task) => task(),
                    None => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn virtual_clock_runs_tasks_in_deadline_order() {
        let clock = VirtualClock::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        let _late = {
            let order = order.clone();
            clock.schedule(300, Box::new(move || order.borrow_mut().push("late")))
        };
        let _early = {
            let order = order.clone();
            clock.schedule(100, Box::new(move || order.borrow_mut().push("early")))
        };

        clock.advance(299);
        assert_eq!(*order.borrow(), vec!["early"]);
        clock.advance(1);
        assert_eq!(*order.borrow(), vec!["early", "late"]);
        assert_eq!(clock.now(), 300);
    }

    #[test]
    fn dropping_a_handle_cancels_the_task() {
        let clock = VirtualClock::default();
        let ran = Rc::new(Cell::new(false));
        let handle = {
            let ran = ran.clone();
            clock.schedule(10, Box::new(move || ran.set(true)))
        };
        drop(handle);

        clock.advance(50);
        assert!(!ran.get());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn debouncer_only_runs_the_last_trigger_of_a_burst() {
        let clock = VirtualClock::default();
        let runs = Rc::new(Cell::new(0));
        let mut debouncer = Debouncer::new(clock.clone(), 80);

        for _ in 0..3 {
            let runs = runs.clone();
            debouncer.trigger(move || runs.set(runs.get() + 1));
            clock.advance(50);
        }
        // Last trigger happened at t=100.
        clock.advance(29);
        assert_eq!(runs.get(), 0);
        clock.advance(1);
        assert_eq!(runs.get(), 1);
        assert_eq!(clock.now(), 180);
    }

    #[test]
    fn debouncer_runs_separated_triggers_each_time() {
        let clock = VirtualClock::default();
        let runs = Rc::new(Cell::new(0));
        let mut debouncer = Debouncer::new(clock.clone(), 80);

        for _ in 0..2 {
            let runs = runs.clone();
            debouncer.trigger(move || runs.set(runs.get() + 1));
            clock.advance(100);
        }
        assert_eq!(runs.get(), 2);
    }
}
