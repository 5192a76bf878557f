//! Batch generation of trajectory datasets.
//!
//! For every network, a fixed number of synchronous and asynchronous trajectories is
//! sampled. The frequency and length of each trajectory are drawn uniformly from inclusive
//! ranges. Networks are processed in parallel, each with its own generator derived from the
//! run seed and the network index, so the output does not depend on scheduling.
//!
//! The result can be written as JSON or as one BNFinder input table per network
//! (see [to_bnfinder_table]).

use crate::dynamics::{NetworkDynamics, UpdateSemantics};
use crate::trajectory::{
    generate_trajectory, TrajectoryConfig, TrajectoryRecord, DEFAULT_MAX_STEPS,
};
use crate::{Error, ValidationError};
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// **(internal)** Export of datasets to BNFinder tables and JSON files.
mod _impl_export;

pub use _impl_export::{to_bnfinder_table, write_bnfinder_tables, write_dataset};

/// Parameters of a dataset run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub frequency_low: usize,
    pub frequency_high: usize,
    pub length_low: usize,
    pub length_high: usize,
    /// Number of synchronous trajectories per network.
    pub synchronous_count: usize,
    /// Number of asynchronous trajectories per network.
    pub asynchronous_count: usize,
    pub target_ratio: f64,
    pub max_steps: usize,
    pub seed: u64,
    /// Log and skip trajectories which exceed the step limit instead of failing the run.
    pub skip_failed: bool,
}

/// All trajectories of one network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkTrajectories {
    pub bn_id: usize,
    pub trajectories: Vec<TrajectoryRecord>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            frequency_low: 1,
            frequency_high: 1,
            length_low: 10,
            length_high: 500,
            synchronous_count: 100,
            asynchronous_count: 0,
            target_ratio: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
            seed: 42,
            skip_failed: false,
        }
    }
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.frequency_low == 0 {
            return Err(ValidationError::ZeroFrequency);
        }
        if self.frequency_low > self.frequency_high {
            return Err(ValidationError::InvalidRange {
                name: "frequency",
                low: self.frequency_low,
                high: self.frequency_high,
            });
        }
        if self.length_low == 0 {
            return Err(ValidationError::ZeroLength);
        }
        if self.length_low > self.length_high {
            return Err(ValidationError::InvalidRange {
                name: "length",
                low: self.length_low,
                high: self.length_high,
            });
        }
        // Remaining parameters are checked by the trajectory configuration.
        self.trajectory_config(UpdateSemantics::Synchronous, self.frequency_low, self.length_low)
            .validate()
    }

    fn trajectory_config(
        &self,
        semantics: UpdateSemantics,
        frequency: usize,
        length: usize,
    ) -> TrajectoryConfig {
        TrajectoryConfig::new(semantics, frequency, length)
            .with_target_ratio(self.target_ratio)
            .with_max_steps(self.max_steps)
    }
}

/// Sample all trajectories of one network. Synchronous trajectories come first.
pub fn generate_network_trajectories<R: Rng + ?Sized>(
    dynamics: &NetworkDynamics,
    bn_id: usize,
    config: &DatasetConfig,
    rng: &mut R,
) -> Result<NetworkTrajectories, Error> {
    config.validate()?;
    info!(
        "Generating trajectories for network {} ({}) with {} nodes.",
        bn_id,
        dynamics.label(),
        dynamics.num_vars()
    );
    let total = config.synchronous_count + config.asynchronous_count;
    let mut trajectories = Vec::with_capacity(total);
    for i in 0..total {
        let semantics = UpdateSemantics::from_synchronous(i < config.synchronous_count);
        let frequency = rng.gen_range(config.frequency_low..=config.frequency_high);
        let length = rng.gen_range(config.length_low..=config.length_high);
        let trajectory_config = config.trajectory_config(semantics, frequency, length);
        match generate_trajectory(dynamics, &trajectory_config, rng) {
            Ok(trajectory) => trajectories.push(trajectory.to_record(dynamics.num_vars())),
            Err(Error::Generation(e)) if config.skip_failed => {
                warn!("Skipping trajectory {} of network {}: {}", i, bn_id, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(NetworkTrajectories {
        bn_id,
        trajectories,
    })
}

/// Sample trajectories of all `networks` in parallel.
///
/// Network `i` uses a generator seeded with `config.seed + i`.
pub fn generate_dataset(
    networks: &[NetworkDynamics],
    config: &DatasetConfig,
) -> Result<Vec<NetworkTrajectories>, Error> {
    config.validate()?;
    let result = networks
        .par_iter()
        .enumerate()
        .map(|(i, dynamics)| {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));
            generate_network_trajectories(dynamics, i, config, &mut rng)
        })
        .collect::<Result<Vec<_>, Error>>()?;
    info!(
        "Generated {} trajectories for {} networks.",
        result.iter().map(|it| it.trajectories.len()).sum::<usize>(),
        result.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::dataset::{generate_dataset, generate_network_trajectories, DatasetConfig};
    use crate::dynamics::NetworkDynamics;
    use crate::test_utils::{init_logger, mk_network, mk_oscillator, mk_rng, mk_shift_register};
    use crate::{Error, ValidationError};

    fn small_config() -> DatasetConfig {
        DatasetConfig {
            frequency_low: 1,
            frequency_high: 3,
            length_low: 5,
            length_high: 12,
            synchronous_count: 4,
            asynchronous_count: 2,
            target_ratio: 0.2,
            ..Default::default()
        }
    }

    fn networks() -> Vec<NetworkDynamics> {
        vec![
            NetworkDynamics::new(mk_shift_register()),
            NetworkDynamics::new(mk_oscillator()),
            NetworkDynamics::new(mk_network(&[("a", "!b | c"), ("b", "a ^ c"), ("c", "a & b")])),
        ]
    }

    #[test]
    fn dataset_layout() {
        init_logger();
        let config = small_config();
        let dataset = generate_dataset(&networks(), &config).unwrap();
        assert_eq!(3, dataset.len());
        for (i, entry) in dataset.iter().enumerate() {
            assert_eq!(i, entry.bn_id);
            assert_eq!(6, entry.trajectories.len());
            for (k, record) in entry.trajectories.iter().enumerate() {
                assert_eq!(k < 4, record.synchronous);
                assert!((1..=3).contains(&record.frequency));
                assert!((5..=12).contains(&record.length));
                assert_eq!(record.length, record.states.len());
            }
        }
    }

    #[test]
    fn dataset_is_reproducible() {
        let config = small_config();
        let first = generate_dataset(&networks(), &config).unwrap();
        let second = generate_dataset(&networks(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_trajectories_are_skipped() {
        let dynamics = NetworkDynamics::new(mk_shift_register());
        let config = DatasetConfig {
            length_low: 10,
            length_high: 10,
            synchronous_count: 3,
            max_steps: 2,
            ..Default::default()
        };
        assert!(matches!(
            generate_network_trajectories(&dynamics, 0, &config, &mut mk_rng(0)),
            Err(Error::Generation(_))
        ));
        let config = DatasetConfig {
            skip_failed: true,
            ..config
        };
        let result = generate_network_trajectories(&dynamics, 0, &config, &mut mk_rng(0)).unwrap();
        assert!(result.trajectories.is_empty());
    }

    #[test]
    fn invalid_ranges() {
        let config = DatasetConfig {
            length_low: 20,
            length_high: 10,
            ..Default::default()
        };
        assert_eq!(
            Err(ValidationError::InvalidRange {
                name: "length",
                low: 20,
                high: 10
            }),
            config.validate()
        );
        let config = DatasetConfig {
            frequency_low: 0,
            ..Default::default()
        };
        assert_eq!(Err(ValidationError::ZeroFrequency), config.validate());
        let config = DatasetConfig {
            target_ratio: -0.5,
            ..Default::default()
        };
        assert_eq!(Err(ValidationError::InvalidRatio(-0.5)), config.validate());
    }
}
