//! This module provides a mock data sampler that generates random recording stores.
//!
//! # Examples
//!
//! ```rust
//! use visual_stim::sampler::MockSampler;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Set the random number generator seed
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // Create a sampler generating 5 subjects with 2 repetitions each
//! let sampler = MockSampler::build(5, 2).unwrap();
//!
//! // Sample a store from the distribution
//! let store = sampler.sample(&mut rng).unwrap();
//!
//! assert_eq!(store.subject_ids(), vec![1, 2, 3, 4, 5]);
//! assert_eq!(store.num_repetitions(1).unwrap(), 2);
//! ```
use nalgebra::DMatrix;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::StimError;
use crate::recording::{Attributes, Subject};
use crate::store::LabeledRecordingStore;
use crate::{ELECTRODE_WINDOW, EXPERIMENTER_NAMES, NUM_SAMPLES, RAT_GENDERS};

/// The room temperature of the mock recordings.
pub const MOCK_ROOM_TEMP: &str = "25";
/// The room humidity of the mock recordings.
pub const MOCK_ROOM_HUMIDITY: &str = "20";
/// The number of samples before the stimulus onset, within an electrode window.
pub const PRE_STIM_SAMPLES: usize = 500;
/// The number of samples during the stimulus, within an electrode window.
pub const DUR_STIM_SAMPLES: usize = 50;

/// The phase of the stimulus at a given sample.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum StimPhase {
    Pre,
    Dur,
    Post,
}

impl StimPhase {
    /// Returns the phase at a position of an electrode window.
    pub fn at(position: usize) -> Self {
        match position % ELECTRODE_WINDOW {
            n if n < PRE_STIM_SAMPLES => StimPhase::Pre,
            n if n < PRE_STIM_SAMPLES + DUR_STIM_SAMPLES => StimPhase::Dur,
            _ => StimPhase::Post,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            StimPhase::Pre => "pre",
            StimPhase::Dur => "dur",
            StimPhase::Post => "post",
        }
    }
}

/// Returns the cosmetic stimulus tag of every sample, e.g., `pre_12`, `dur_510` or `post_999`.
/// The tag number restarts at every electrode window, so tags are not unique along the axis.
pub fn stim_index_labels() -> Vec<String> {
    (0..NUM_SAMPLES)
        .map(|pos| {
            format!(
                "{}_{}",
                StimPhase::at(pos).prefix(),
                pos % ELECTRODE_WINDOW
            )
        })
        .collect()
}

/// Sampler of mock recording stores.
#[derive(Debug, PartialEq)]
pub struct MockSampler {
    /// the number of subjects, with ids 1 to `num_subjects`
    num_subjects: usize,
    /// the number of repetitions per subject
    num_repetitions: usize,
}

impl Default for MockSampler {
    fn default() -> Self {
        MockSampler {
            num_subjects: 9,
            num_repetitions: 4,
        }
    }
}

impl MockSampler {
    /// Create a sampler with the specified parameters.
    /// The function returns an error if there is no subject or no repetition.
    pub fn build(num_subjects: usize, num_repetitions: usize) -> Result<Self, StimError> {
        if num_subjects == 0 {
            return Err(StimError::InvalidParameter(
                "the number of subjects must be positive".to_string(),
            ));
        }
        if num_repetitions == 0 {
            return Err(StimError::InvalidParameter(
                "the number of repetitions must be positive".to_string(),
            ));
        }
        Ok(MockSampler {
            num_subjects,
            num_repetitions,
        })
    }

    /// Sample a store from the distribution.
    /// Voltages are uniform in [0, 1); experimenter and gender are chosen uniformly.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<LabeledRecordingStore, StimError> {
        let voltage_dist = Uniform::new(0.0, 1.0);

        let subjects = (1..=self.num_subjects)
            .map(|id| {
                let experimenter = EXPERIMENTER_NAMES
                    .choose(rng)
                    .ok_or_else(|| StimError::InvalidParameter("no experimenter".to_string()))?;
                let rat_gender = RAT_GENDERS
                    .choose(rng)
                    .ok_or_else(|| StimError::InvalidParameter("no gender".to_string()))?;
                let voltage = DMatrix::from_fn(NUM_SAMPLES, self.num_repetitions, |_, _| {
                    voltage_dist.sample(rng)
                });
                let attributes = Attributes::new(
                    id,
                    experimenter,
                    rat_gender,
                    MOCK_ROOM_TEMP,
                    MOCK_ROOM_HUMIDITY,
                );
                Subject::build(id, voltage, attributes)
            })
            .collect::<Result<Vec<Subject>, StimError>>()?;

        log::debug!(
            "Sampled {} mock subjects with {} repetitions",
            self.num_subjects,
            self.num_repetitions
        );
        LabeledRecordingStore::build(subjects)?.with_stim_index(stim_index_labels())
    }
}

/// Create a mock store with the default sampler, seeded for reproducibility.
pub fn mock_stim_data(seed: u64) -> Result<LabeledRecordingStore, StimError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    MockSampler::default().sample(&mut rng)
}
