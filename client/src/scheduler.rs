use common::log;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Who a pending timer belongs to. Scheduling for an owner replaces whatever
/// that owner had pending.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerOwner {
    DiceCycle,
    Notice(u64),
    ChatBubble(String),
}

/// Short-lived UI timers as cancellable tasks on the network runtime.
/// Without a runtime (plain unit tests) nothing is ever spawned.
pub struct Scheduler {
    runtime: Option<Handle>,
    tasks: HashMap<TimerOwner, JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            runtime: Handle::try_current().ok(),
            tasks: HashMap::new(),
        }
    }

    pub fn schedule<F>(&mut self, owner: TimerOwner, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel(&owner);
        self.tasks.retain(|_, handle| !handle.is_finished());
        if let Some(runtime) = &self.runtime {
            self.tasks.insert(owner, runtime.spawn(task));
        }
    }

    pub fn schedule_after<F>(&mut self, owner: TimerOwner, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule(owner, async move {
            tokio::time::sleep(delay).await;
            action();
        });
    }

    /// Safe to call for owners with nothing pending.
    pub fn cancel(&mut self, owner: &TimerOwner) -> bool {
        match self.tasks.remove(owner) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            log!("Cancelling {} pending timers", self.tasks.len());
        }
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    pub fn is_pending(&self, owner: &TimerOwner) -> bool {
        self.tasks.get(owner).is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_timer_fires() {
        let mut scheduler = Scheduler::new();
        let fired = Arc::new(AtomicU32::new(0));
        let counter = fired.clone();
        scheduler.schedule_after(TimerOwner::Notice(1), Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_pending(&TimerOwner::Notice(1)));
    }

    #[tokio::test]
    async fn test_rescheduling_replaces_pending_timer() {
        let mut scheduler = Scheduler::new();
        let fired = Arc::new(AtomicU32::new(0));
        for value in [1, 10] {
            let counter = fired.clone();
            scheduler.schedule_after(TimerOwner::ChatBubble("Ann".to_string()), Duration::from_millis(20), move || {
                counter.fetch_add(value, Ordering::SeqCst);
            });
        }
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_cancel_all_is_idempotent() {
        let mut scheduler = Scheduler::new();
        let fired = Arc::new(AtomicU32::new(0));
        let counter = fired.clone();
        scheduler.schedule_after(TimerOwner::DiceCycle, Duration::from_millis(20), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(scheduler.is_pending(&TimerOwner::DiceCycle));
        scheduler.cancel_all();
        scheduler.cancel_all();
        assert!(!scheduler.cancel(&TimerOwner::DiceCycle));
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_without_runtime_nothing_is_spawned() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(TimerOwner::Notice(7), Duration::from_millis(1), || {});
        assert!(!scheduler.is_pending(&TimerOwner::Notice(7)));
    }
}
