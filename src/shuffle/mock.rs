use parking_lot::RwLock;
use std::sync::Arc;

use super::Shuffler;

/// Reverses the options and counts how often it was asked to.
#[derive(Clone, Debug, Default)]
pub struct ReverseShuffler {
    calls: Arc<RwLock<usize>>,
}

impl ReverseShuffler {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn calls(&self) -> usize {
        *self.calls.read()
    }
}

impl Shuffler for ReverseShuffler {
    fn permute(&mut self, options: &[String]) -> Vec<String> {
        *self.calls.write() += 1;
        options.iter().rev().cloned().collect()
    }
}

/// Applies the same index permutation to every question.
#[derive(Clone, Debug)]
pub struct FixedShuffler {
    order: Vec<usize>,
}

impl FixedShuffler {
    pub fn new(order: Vec<usize>) -> Self {
        FixedShuffler { order }
    }
}

impl Shuffler for FixedShuffler {
    fn permute(&mut self, options: &[String]) -> Vec<String> {
        self.order.iter().map(|&i| options[i].clone()).collect()
    }
}
