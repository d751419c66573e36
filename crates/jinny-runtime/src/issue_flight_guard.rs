use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
/// Tracks issue numbers currently being answered so overlapping cycles do not
/// reply to the same issue twice.
pub struct IssueFlightGuard {
    in_flight: Arc<Mutex<HashSet<u64>>>,
}

impl IssueFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `issue_number`, or returns `None` when another cycle holds it.
    pub fn try_acquire(&self, issue_number: u64) -> Option<IssueFlightPermit> {
        if !lock_in_flight(&self.in_flight).insert(issue_number) {
            return None;
        }
        Some(IssueFlightPermit {
            in_flight: Arc::clone(&self.in_flight),
            issue_number,
        })
    }

    pub fn is_in_flight(&self, issue_number: u64) -> bool {
        lock_in_flight(&self.in_flight).contains(&issue_number)
    }
}

#[derive(Debug)]
/// Releases its issue number when dropped.
pub struct IssueFlightPermit {
    in_flight: Arc<Mutex<HashSet<u64>>>,
    issue_number: u64,
}

impl Drop for IssueFlightPermit {
    fn drop(&mut self) {
        lock_in_flight(&self.in_flight).remove(&self.issue_number);
    }
}

fn lock_in_flight(in_flight: &Mutex<HashSet<u64>>) -> MutexGuard<'_, HashSet<u64>> {
    in_flight
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
