use nalgebra as na;
use std::collections::VecDeque;

/// One experienced step: (observation, joint action index, reward, next
/// observation, terminal flag).
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: na::DVector<f64>,
    pub action: usize,
    pub reward: f64,
    pub next_state: na::DVector<f64>,
    pub done: bool,
}

/// Bounded FIFO store of past transitions; the oldest entry is evicted when
/// a push exceeds capacity.
#[derive(Debug)]
pub struct ReplayBuffer {
    entries: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, transition: Transition) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(transition);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Indexed access, oldest first.
    pub fn get(&self, index: usize) -> &Transition {
        &self.entries[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: usize) -> Transition {
        Transition {
            state: na::DVector::zeros(1),
            action: 0,
            reward: tag as f64,
            next_state: na::DVector::zeros(1),
            done: false,
        }
    }

    #[test]
    fn eviction_is_fifo_and_capacity_holds() {
        let capacity = 8;
        let extra = 3;
        let mut buffer = ReplayBuffer::new(capacity);
        for tag in 0..capacity + extra {
            buffer.push(tagged(tag));
        }
        assert_eq!(buffer.len(), capacity);
        // The oldest `extra` tags are gone; the survivors are in insertion
        // order starting at `extra`.
        let tags: Vec<usize> = buffer.iter().map(|t| t.reward as usize).collect();
        let expected: Vec<usize> = (extra..capacity + extra).collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn stays_below_capacity_until_full() {
        let mut buffer = ReplayBuffer::new(4);
        assert!(buffer.is_empty());
        buffer.push(tagged(0));
        buffer.push(tagged(1));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(0).reward, 0.0);
    }
}
