//! Ordered queue of actions awaiting execution.

use std::collections::BTreeMap;

use park_core::Action;

/// Actions keyed by the tick they must run on, then by arrival order.
///
/// Every peer drains the queue in the same order, which is what keeps
/// replicated execution deterministic.
#[derive(Debug, Default)]
pub struct NetworkActionQueue {
    pending: BTreeMap<(u32, u64), Action>,
    next_arrival: u64,
}

impl NetworkActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: u32, action: Action) {
        self.pending.insert((tick, self.next_arrival), action);
        self.next_arrival += 1;
    }

    /// Removes and returns every action scheduled at or before `tick`, in
    /// execution order.
    pub fn pop_ready(&mut self, tick: u32) -> Vec<(u32, Action)> {
        let ready = match tick.checked_add(1) {
            Some(next) => {
                let later = self.pending.split_off(&(next, 0));
                std::mem::replace(&mut self.pending, later)
            }
            None => std::mem::take(&mut self.pending),
        };
        ready
            .into_iter()
            .map(|((tick, _), action)| (tick, action))
            .collect()
    }

    /// Tick of the earliest pending action.
    pub fn next_tick(&self) -> Option<u32> {
        self.pending.keys().next().map(|(tick, _)| *tick)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use park_core::{GameAction, GroupId, PlayerId, PlayerSetGroupAction};

    fn action(player: i32) -> Action {
        Action::from(PlayerSetGroupAction::new(PlayerId(player), GroupId::USER))
    }

    #[test]
    fn drains_by_tick_then_arrival() {
        let mut queue = NetworkActionQueue::new();
        queue.push(5, action(1));
        queue.push(3, action(2));
        queue.push(5, action(3));
        queue.push(9, action(4));

        let ready = queue.pop_ready(5);
        let order: Vec<_> = ready
            .iter()
            .map(|(tick, action)| match action {
                Action::PlayerSetGroup(set) => (*tick, set.target().0),
                other => panic!("unexpected {}", other.action_type()),
            })
            .collect();
        assert_eq!(order, vec![(3, 2), (5, 1), (5, 3)]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_tick(), Some(9));
    }

    #[test]
    fn max_tick_drains_everything() {
        let mut queue = NetworkActionQueue::new();
        queue.push(u32::MAX, action(1));
        assert_eq!(queue.pop_ready(u32::MAX).len(), 1);
        assert!(queue.is_empty());
    }
}
