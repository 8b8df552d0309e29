//! This crate provides data access and summary statistics for a visual stimulus
//! electrophysiology experiment.
//!
//! Each recorded rat (a *subject*) carries a voltage array indexed by stimulus sample
//! and repetition, together with a few metadata attributes. The sample axis is split
//! into 10 fixed electrode windows of 1000 samples each.
//!
//! # Selecting Electrode Traces
//!
//! ```rust
//! use visual_stim::sampler::mock_stim_data;
//!
//! let store = mock_stim_data(42).unwrap();
//!
//! // Electrodes 1, 3 and 7 of rat 4 during repetition 2
//! let traces = store.select_electrode_trace(4, 2, &[1, 3, 7]).unwrap();
//!
//! assert_eq!(traces.len(), 3);
//! assert_eq!(traces[1].electrode, 3);
//! assert_eq!(traces[1].y.len(), 1000);
//! ```
//!
//! # Experimenter Bias
//!
//! ```rust
//! use visual_stim::sampler::mock_stim_data;
//!
//! let store = mock_stim_data(42).unwrap();
//! let bias = store.aggregate_by_experimenter(&["Daniel", "Anna", "Nobody"]);
//!
//! // One entry per requested name, in order, even for empty groups
//! assert_eq!(bias.means().len(), 3);
//! assert!(bias.means()[2].is_nan());
//! ```

pub mod electrode;
pub mod error;
pub mod plot;
pub mod recording;
pub mod sampler;
pub mod stats;
pub mod store;

/// The number of stimulus samples recorded per repetition.
pub const NUM_SAMPLES: usize = 10_000;
/// The number of electrodes sharing the sample axis.
pub const NUM_ELECTRODES: usize = 10;
/// The number of consecutive samples covered by one electrode.
pub const ELECTRODE_WINDOW: usize = NUM_SAMPLES / NUM_ELECTRODES;
/// The experimenters compared by default in the bias statistics.
pub const EXPERIMENTER_NAMES: [&str; 2] = ["Daniel", "Anna"];
/// The possible genders of a rat.
pub const RAT_GENDERS: [&str; 2] = ["Male", "Female"];
