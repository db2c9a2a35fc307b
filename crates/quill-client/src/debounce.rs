use std::time::Duration;

/// Quiet period after the last keystroke before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces a burst of values into the last one.
///
/// Every `schedule` hands out a ticket and supersedes what was pending. When
/// the caller's timer for a ticket runs out it calls `fire`; only the newest
/// ticket yields its value, so N quick edits end in a single request.
#[derive(Clone, Debug)]
pub struct DebounceGate<T> {
    delay: Duration,
    generation: u64,
    pending: Option<T>,
}

impl<T> DebounceGate<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    pub fn fire(&mut self, ticket: u64) -> Option<T> {
        if ticket != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drops whatever is pending; outstanding tickets become stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for DebounceGate<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(feature = "remote")]
pub use self::task::Debouncer;

#[cfg(feature = "remote")]
mod task {
    use std::time::Duration;

    use tokio::sync::mpsc;
    use tokio::time::sleep;

    /// Tokio driven debouncer: values pushed in, settled values out on
    /// the channel given to `spawn`.
    pub struct Debouncer<T> {
        tx: mpsc::UnboundedSender<T>,
    }

    impl<T: Send + 'static> Debouncer<T> {
        pub fn spawn(delay: Duration, out: mpsc::UnboundedSender<T>) -> Self {
            let (tx, mut rx) = mpsc::unbounded_channel::<T>();

            tokio::spawn(async move {
                while let Some(first) = rx.recv().await {
                    let mut latest = first;
                    loop {
                        tokio::select! {
                            next = rx.recv() => match next {
                                Some(value) => latest = value,
                                None => {
                                    let _ = out.send(latest);
                                    return;
                                }
                            },
                            _ = sleep(delay) => {
                                if out.send(latest).is_err() {
                                    return;
                                }
                                break;
                            }
                        }
                    }
                }
            });

            Self { tx }
        }

        /// Returns false once the background task has stopped.
        pub fn push(&self, value: T) -> bool {
            self.tx.send(value).is_ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_fires() {
        let mut gate = DebounceGate::new(SEARCH_DEBOUNCE);
        let t1 = gate.schedule("r".to_string());
        let t2 = gate.schedule("ru".to_string());
        let t3 = gate.schedule("rust".to_string());

        assert_eq!(gate.fire(t1), None);
        assert_eq!(gate.fire(t2), None);
        assert_eq!(gate.fire(t3).as_deref(), Some("rust"));
        assert_eq!(gate.fire(t3), None, "a ticket fires at most once");
    }

    #[test]
    fn cancel_invalidates_pending_ticket() {
        let mut gate = DebounceGate::default();
        let ticket = gate.schedule(1);
        gate.cancel();

        assert!(!gate.is_pending());
        assert_eq!(gate.fire(ticket), None);
    }

    #[tokio::test]
    async fn keystroke_burst_issues_one_request() {
        use std::sync::{Arc, Mutex};

        let gate = Arc::new(Mutex::new(DebounceGate::new(Duration::from_millis(40))));
        let issued = Arc::new(Mutex::new(Vec::<String>::new()));

        for query in ["c", "cv", "cve", "cve-2024"] {
            let ticket = gate.lock().unwrap().schedule(query.to_string());
            let gate = gate.clone();
            let issued = issued.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(40)).await;
                if let Some(q) = gate.lock().unwrap().fire(ticket) {
                    issued.lock().unwrap().push(q);
                }
            });
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(*issued.lock().unwrap(), vec!["cve-2024".to_string()]);
    }

    #[cfg(feature = "remote")]
    #[tokio::test]
    async fn debouncer_emits_settled_value() {
        let (out, mut settled) = tokio::sync::mpsc::unbounded_channel();
        let debouncer = Debouncer::spawn(Duration::from_millis(30), out);

        for query in ["s", "sq", "sql"] {
            assert!(debouncer.push(query.to_string()));
        }

        let first = tokio::time::timeout(Duration::from_secs(1), settled.recv())
            .await
            .unwrap();
        assert_eq!(first.as_deref(), Some("sql"));

        debouncer.push("sqli".to_string());
        let second = tokio::time::timeout(Duration::from_secs(1), settled.recv())
            .await
            .unwrap();
        assert_eq!(second.as_deref(), Some("sqli"));
    }
}
