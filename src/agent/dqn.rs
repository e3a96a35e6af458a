use super::checkpoint::CheckpointError;
use super::network::ValueNetwork;
use super::replay::{ReplayBuffer, Transition};
use crate::constants::{MAX_ANGLE_DELTA, NUM_ACTIONS, NUM_ANGLE_BINS, NUM_THRUST_BINS};
use nalgebra as na;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Agent parameters, fixed at construction. The exploration rate is the only
/// one mutated at runtime (it decays each learning step).
#[derive(Debug, Clone, Copy)]
pub struct Hyperparameters {
    pub discount: f64,
    pub exploration: f64,
    pub exploration_min: f64,
    pub exploration_decay: f64,
    pub learning_rate: f64,
    pub batch_size: usize,
    pub replay_capacity: usize,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            discount: 0.95,
            exploration: 1.0,
            exploration_min: 0.05,
            exploration_decay: 0.99995,
            learning_rate: 1e-4,
            batch_size: 128,
            replay_capacity: 10_000,
        }
    }
}

/// A discretized action: the continuous values the bins stand for, plus the
/// bin indices the replay buffer stores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChosenAction {
    pub thrust: f64,
    pub angle_delta: f64,
    pub thrust_idx: usize,
    pub angle_idx: usize,
}

impl ChosenAction {
    pub fn joint_index(&self) -> usize {
        self.thrust_idx * NUM_ANGLE_BINS + self.angle_idx
    }

    pub fn from_joint_index(index: usize) -> Self {
        Self::from_bins(index / NUM_ANGLE_BINS, index % NUM_ANGLE_BINS)
    }

    fn from_bins(thrust_idx: usize, angle_idx: usize) -> Self {
        ChosenAction {
            thrust: thrust_bin(thrust_idx),
            angle_delta: angle_bin(angle_idx),
            thrust_idx,
            angle_idx,
        }
    }
}

/// Thrust fractions evenly spaced over [0, 1].
fn thrust_bin(index: usize) -> f64 {
    index as f64 / (NUM_THRUST_BINS - 1) as f64
}

/// Angle deltas evenly spaced over [-MAX_ANGLE_DELTA, MAX_ANGLE_DELTA].
fn angle_bin(index: usize) -> f64 {
    -MAX_ANGLE_DELTA + index as f64 * (2.0 * MAX_ANGLE_DELTA / (NUM_ANGLE_BINS - 1) as f64)
}

/// Epsilon-greedy value-based agent with experience replay. The replay
/// buffer and network parameters are exclusively owned here.
pub struct DqnAgent {
    network: ValueNetwork,
    replay: ReplayBuffer,
    hyper: Hyperparameters,
    exploration: f64,
    rng: StdRng,
}

impl DqnAgent {
    pub fn new(observation_len: usize, hyper: Hyperparameters, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let network = ValueNetwork::new(&[observation_len, 64, 64, NUM_ACTIONS], &mut rng);
        DqnAgent {
            network,
            replay: ReplayBuffer::new(hyper.replay_capacity),
            exploration: hyper.exploration,
            hyper,
            rng,
        }
    }

    pub fn exploration(&self) -> f64 {
        self.exploration
    }

    pub fn replay_len(&self) -> usize {
        self.replay.len()
    }

    /// Epsilon-greedy action selection: explore with independent uniform
    /// thrust/angle bins, exploit by argmaxing the value network and decoding
    /// the joint index.
    pub fn act(&mut self, observation: &na::DVector<f64>) -> ChosenAction {
        if self.rng.gen::<f64>() <= self.exploration {
            let thrust_idx = self.rng.gen_range(0..NUM_THRUST_BINS);
            let angle_idx = self.rng.gen_range(0..NUM_ANGLE_BINS);
            ChosenAction::from_bins(thrust_idx, angle_idx)
        } else {
            self.greedy(observation)
        }
    }

    /// Pure exploitation path (also the evaluation-mode pilot).
    pub fn greedy(&self, observation: &na::DVector<f64>) -> ChosenAction {
        let values = self.network.forward(observation);
        let mut best = 0;
        let mut best_value = values[0];
        for (index, &value) in values.iter().enumerate().skip(1) {
            if value > best_value {
                best_value = value;
                best = index;
            }
        }
        ChosenAction::from_joint_index(best)
    }

    pub fn remember(&mut self, transition: Transition) {
        self.replay.push(transition);
    }

    /// One learning step: silently a no-op until the buffer holds a full
    /// batch. Samples uniformly without replacement, regresses the taken
    /// action's value onto the one-step TD target (all other action slots
    /// keep their current predictions), then decays the exploration rate.
    pub fn replay(&mut self) {
        let batch_size = self.hyper.batch_size;
        if self.replay.len() < batch_size {
            return;
        }

        let picks = rand::seq::index::sample(&mut self.rng, self.replay.len(), batch_size);

        let mut states = na::DMatrix::zeros(self.network.input_size(), batch_size);
        let mut targets = na::DMatrix::zeros(self.network.output_size(), batch_size);

        for (column, index) in picks.iter().enumerate() {
            let transition = self.replay.get(index);
            let mut target = self.network.forward(&transition.state);

            let value = if transition.done {
                transition.reward
            } else {
                let next_values = self.network.forward(&transition.next_state);
                transition.reward + self.hyper.discount * next_values.max()
            };
            target[transition.action] = value;

            states.set_column(column, &transition.state);
            targets.set_column(column, &target);
        }

        self.network
            .train_batch(&states, &targets, self.hyper.learning_rate);

        self.exploration =
            (self.exploration * self.hyper.exploration_decay).max(self.hyper.exploration_min);
    }

    /// Persists the value-function parameters only; neither the replay buffer
    /// nor the exploration rate survives a save/load cycle.
    pub fn save(&self, path: &Path) -> Result<(), CheckpointError> {
        let file = fs::File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), &self.network)?;
        Ok(())
    }

    pub fn load(&mut self, path: &Path) -> Result<(), CheckpointError> {
        let file = fs::File::open(path)?;
        self.network = serde_json::from_reader(BufReader::new(file))?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn network(&self) -> &ValueNetwork {
        &self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn observation() -> na::DVector<f64> {
        na::DVector::from_fn(4, |i, _| i as f64 / 4.0)
    }

    fn tiny_agent(batch_size: usize) -> DqnAgent {
        let hyper = Hyperparameters {
            batch_size,
            replay_capacity: 64,
            exploration_decay: 0.5,
            ..Hyperparameters::default()
        };
        DqnAgent::new(4, hyper, 99)
    }

    fn transition(reward: f64, done: bool) -> Transition {
        Transition {
            state: observation(),
            action: 3,
            reward,
            next_state: observation(),
            done,
        }
    }

    #[test]
    fn bins_cover_the_action_ranges() {
        assert_abs_diff_eq!(thrust_bin(0), 0.0);
        assert_abs_diff_eq!(thrust_bin(NUM_THRUST_BINS - 1), 1.0);
        assert_abs_diff_eq!(angle_bin(0), -MAX_ANGLE_DELTA);
        assert_abs_diff_eq!(angle_bin(NUM_ANGLE_BINS / 2), 0.0);
        assert_abs_diff_eq!(angle_bin(NUM_ANGLE_BINS - 1), MAX_ANGLE_DELTA);
    }

    #[test]
    fn joint_index_round_trips_through_div_mod() {
        for index in 0..NUM_ACTIONS {
            let action = ChosenAction::from_joint_index(index);
            assert_eq!(action.joint_index(), index);
            assert!(action.thrust_idx < NUM_THRUST_BINS);
            assert!(action.angle_idx < NUM_ANGLE_BINS);
        }
    }

    #[test]
    fn act_always_returns_in_range_bins() {
        let mut agent = tiny_agent(8);
        for _ in 0..100 {
            let action = agent.act(&observation());
            assert!(action.thrust >= 0.0 && action.thrust <= 1.0);
            assert!(action.angle_delta.abs() <= MAX_ANGLE_DELTA);
        }
    }

    #[test]
    fn undersized_buffer_makes_replay_a_no_op() {
        let mut agent = tiny_agent(8);
        for _ in 0..7 {
            agent.remember(transition(1.0, false));
        }
        let before = agent.network().clone();
        let exploration = agent.exploration();
        agent.replay();
        assert_eq!(agent.network(), &before);
        assert_eq!(agent.exploration(), exploration);
    }

    #[test]
    fn replay_updates_parameters_and_decays_exploration() {
        let mut agent = tiny_agent(4);
        for i in 0..8 {
            agent.remember(transition(i as f64, i % 2 == 0));
        }
        let before = agent.network().clone();
        agent.replay();
        assert_ne!(agent.network(), &before);
        assert_abs_diff_eq!(agent.exploration(), 0.5);
        // The floor holds under repeated decay.
        for i in 0..8 {
            agent.remember(transition(i as f64, false));
        }
        for _ in 0..20 {
            agent.replay();
        }
        assert_abs_diff_eq!(agent.exploration(), agent.hyper.exploration_min);
    }

    #[test]
    fn checkpoint_round_trip_is_bit_exact() {
        let dir = std::env::temp_dir().join(format!("landfall_dqn_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("policy_episode_1.json");

        let agent = tiny_agent(8);
        agent.save(&path).unwrap();

        let mut restored = tiny_agent(123);
        restored.load(&path).unwrap();

        for trial in 0..16 {
            let obs = na::DVector::from_fn(4, |i, _| ((trial * 7 + i) as f64).sin());
            let original = agent.network().forward(&obs);
            let reloaded = restored.network().forward(&obs);
            for (a, b) in original.iter().zip(reloaded.iter()) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
