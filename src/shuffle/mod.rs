use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(test)]
pub mod mock;

/// Produces the display order of a question's options.
pub trait Shuffler {
    fn permute(&mut self, options: &[String]) -> Vec<String>;
}

/// Uniform permutations from a `StdRng`.
#[derive(Debug)]
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomShuffler { rng }
    }
}

impl Default for RandomShuffler {
    fn default() -> Self {
        RandomShuffler::new(None)
    }
}

impl Shuffler for RandomShuffler {
    fn permute(&mut self, options: &[String]) -> Vec<String> {
        let mut shuffled = options.to_vec();
        shuffled.shuffle(&mut self.rng);
        shuffled
    }
}
