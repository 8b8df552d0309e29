//! The labeled recording store and its two core operations.
//!
//! The store is built once, validated, and only read afterwards.
use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::electrode::{electrode_window, ElectrodeTrace};
use crate::error::StimError;
use crate::recording::Subject;
use crate::stats::SummaryStats;
use crate::{EXPERIMENTER_NAMES, NUM_SAMPLES};

/// Statistics of the per-subject mean voltages of one experimenter.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    /// The name of the experimenter.
    pub experimenter: String,
    /// The number of subjects recorded by the experimenter.
    pub num_subjects: usize,
    /// The statistics, or `None` if the experimenter has no subject.
    pub stats: Option<SummaryStats>,
}

impl GroupSummary {
    pub fn is_empty(&self) -> bool {
        self.stats.is_none()
    }
}

/// The result of an experimenter grouping, aligned with the requested names.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ExperimenterBias {
    pub groups: Vec<GroupSummary>,
}

impl ExperimenterBias {
    pub fn names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.experimenter.as_str()).collect()
    }

    /// The mean of the subject means per experimenter (NaN for an empty group).
    pub fn means(&self) -> Vec<f64> {
        self.collect(|s| s.mean)
    }

    /// The standard deviation of the subject means per experimenter (NaN for an empty group).
    pub fn stds(&self) -> Vec<f64> {
        self.collect(|s| s.std)
    }

    /// The median of the subject means per experimenter (NaN for an empty group).
    pub fn medians(&self) -> Vec<f64> {
        self.collect(|s| s.median)
    }

    fn collect(&self, f: impl Fn(&SummaryStats) -> f64) -> Vec<f64> {
        self.groups
            .iter()
            .map(|g| g.stats.as_ref().map_or(f64::NAN, &f))
            .collect()
    }
}

/// A mapping from subject id to recorded subject.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecordingStore {
    subjects: BTreeMap<usize, Subject>,
    stim_index: Option<Vec<String>>,
}

impl LabeledRecordingStore {
    /// Create a store from the provided subjects.
    /// The function returns an error if two subjects share the same id.
    pub fn build(subjects: Vec<Subject>) -> Result<Self, StimError> {
        let mut map = BTreeMap::new();
        for subject in subjects {
            let id = subject.id();
            if map.insert(id, subject).is_some() {
                return Err(StimError::DuplicateSubject(id));
            }
        }
        log::info!("Recording store built with {} subjects", map.len());
        Ok(LabeledRecordingStore {
            subjects: map,
            stim_index: None,
        })
    }

    /// Attach a label to every position of the sample axis.
    /// The function returns an error if there is not exactly one label per sample.
    pub fn with_stim_index(mut self, labels: Vec<String>) -> Result<Self, StimError> {
        if labels.len() != NUM_SAMPLES {
            return Err(StimError::IncompatibleShape(format!(
                "{} stimulus labels provided",
                labels.len()
            )));
        }
        self.stim_index = Some(labels);
        Ok(self)
    }

    pub fn subject(&self, subject_id: usize) -> Result<&Subject, StimError> {
        self.subjects
            .get(&subject_id)
            .ok_or(StimError::NotFound(subject_id))
    }

    /// Returns the subject ids in increasing order.
    pub fn subject_ids(&self) -> Vec<usize> {
        self.subjects.keys().copied().collect()
    }

    pub fn subjects_iter(&self) -> impl Iterator<Item = &Subject> + '_ {
        self.subjects.values()
    }

    pub fn num_subjects(&self) -> usize {
        self.subjects.len()
    }

    pub fn num_repetitions(&self, subject_id: usize) -> Result<usize, StimError> {
        Ok(self.subject(subject_id)?.num_repetitions())
    }

    pub fn stim_index(&self) -> Option<&[String]> {
        self.stim_index.as_deref()
    }

    /// Returns the distinct experimenter names, in order of first appearance by subject id.
    pub fn experimenters(&self) -> Vec<&str> {
        self.subjects
            .values()
            .map(|s| s.attributes().experimenter.as_str())
            .unique()
            .collect()
    }

    /// Returns the mean voltage of a subject across all samples and repetitions.
    pub fn subject_mean(&self, subject_id: usize) -> Result<f64, StimError> {
        Ok(self.subject(subject_id)?.mean_voltage())
    }

    /// Extract the voltage windows of the given electrodes for one subject and repetition.
    /// The traces follow the order of `electrode_numbers`, repeats included.
    pub fn select_electrode_trace(
        &self,
        subject_id: usize,
        repetition_number: usize,
        electrode_numbers: &[usize],
    ) -> Result<Vec<ElectrodeTrace>, StimError> {
        let subject = self.subject(subject_id)?;
        if repetition_number >= subject.num_repetitions() {
            return Err(StimError::OutOfRange(format!(
                "repetition {} is not in 0..{} for subject {}",
                repetition_number,
                subject.num_repetitions(),
                subject_id
            )));
        }

        let windows = electrode_numbers
            .iter()
            .map(|&k| electrode_window(k).map(|w| (k, w)))
            .collect::<Result<Vec<_>, StimError>>()?;

        let rep_values = subject.voltage().column(repetition_number);
        let traces: Vec<ElectrodeTrace> = windows
            .into_iter()
            .map(|(k, (start, end))| {
                ElectrodeTrace::new(k, rep_values.rows(start, end - start).iter().copied().collect())
            })
            .collect();

        log::debug!(
            "Selected {} electrode traces for subject {} (repetition {})",
            traces.len(),
            subject_id,
            repetition_number
        );
        Ok(traces)
    }

    /// Group the subjects by experimenter and summarize their mean voltages.
    /// There is one summary per name, in the order of `experimenter_names`; an experimenter
    /// without any subject gets an empty summary instead of an error.
    pub fn aggregate_by_experimenter(&self, experimenter_names: &[&str]) -> ExperimenterBias {
        let groups = experimenter_names
            .iter()
            .map(|&name| {
                let subject_means: Vec<f64> = self
                    .subjects
                    .values()
                    .filter(|s| s.attributes().experimenter == name)
                    .map(|s| s.mean_voltage())
                    .collect();

                if subject_means.is_empty() {
                    log::warn!("No subject recorded by experimenter {}", name);
                }

                GroupSummary {
                    experimenter: name.to_string(),
                    num_subjects: subject_means.len(),
                    stats: SummaryStats::from_values(&subject_means),
                }
            })
            .collect();

        ExperimenterBias { groups }
    }

    /// Summarize the mean voltages for the default experimenters.
    pub fn experimenter_bias(&self) -> ExperimenterBias {
        self.aggregate_by_experimenter(&EXPERIMENTER_NAMES)
    }
}
