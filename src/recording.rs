//! Module implementing a recorded subject, i.e., one rat with its voltage array and metadata.
use std::collections::HashMap;

use derivative::Derivative;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::StimError;
use crate::NUM_SAMPLES;

/// Key of the rat id in a raw attribute map.
pub const KEY_RAT_ID: &str = "RatID";
/// Key of the experimenter name in a raw attribute map.
pub const KEY_EXPERIMENTER: &str = "Experimenter";
/// Key of the rat gender in a raw attribute map.
pub const KEY_RAT_GENDER: &str = "Rat_gender";
/// Key of the room temperature in a raw attribute map.
pub const KEY_ROOM_TEMP: &str = "Room_temp";
/// Key of the room humidity in a raw attribute map.
pub const KEY_ROOM_HUMIDITY: &str = "Room_humidity";

/// Metadata recorded along with a subject.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Attributes {
    /// The ID of the rat.
    #[serde(rename = "RatID")]
    pub rat_id: usize,
    /// The name of the experimenter who ran the recording.
    #[serde(rename = "Experimenter")]
    pub experimenter: String,
    /// The gender of the rat.
    #[serde(rename = "Rat_gender")]
    pub rat_gender: String,
    /// The room temperature during the recording.
    #[serde(rename = "Room_temp")]
    pub room_temp: String,
    /// The room humidity during the recording.
    #[serde(rename = "Room_humidity")]
    pub room_humidity: String,
}

impl Attributes {
    pub fn new(
        rat_id: usize,
        experimenter: &str,
        rat_gender: &str,
        room_temp: &str,
        room_humidity: &str,
    ) -> Self {
        Attributes {
            rat_id,
            experimenter: experimenter.to_string(),
            rat_gender: rat_gender.to_string(),
            room_temp: room_temp.to_string(),
            room_humidity: room_humidity.to_string(),
        }
    }

    /// Build the attributes from a loosely-typed map, as delivered by the acquisition pipeline.
    /// The rat id is optional and defaults to `subject_id`.
    /// The function returns an error if a required key is missing or the rat id is not an integer.
    pub fn from_map(
        subject_id: usize,
        attrs: &HashMap<String, String>,
    ) -> Result<Self, StimError> {
        let get = |key: &str| {
            attrs
                .get(key)
                .cloned()
                .ok_or_else(|| StimError::MissingAttribute(key.to_string()))
        };

        let rat_id = match attrs.get(KEY_RAT_ID) {
            Some(value) => value.trim().parse::<usize>().map_err(|e| {
                StimError::InvalidParameter(format!("{} must be an integer: {}", KEY_RAT_ID, e))
            })?,
            None => subject_id,
        };

        Ok(Attributes {
            rat_id,
            experimenter: get(KEY_EXPERIMENTER)?,
            rat_gender: get(KEY_RAT_GENDER)?,
            room_temp: get(KEY_ROOM_TEMP)?,
            room_humidity: get(KEY_ROOM_HUMIDITY)?,
        })
    }
}

/// A recorded rat.
#[derive(Derivative, Clone, PartialEq)]
#[derivative(Debug)]
pub struct Subject {
    id: usize,
    /// Voltage indexed by (sample index, repetition number).
    #[derivative(Debug = "ignore")]
    voltage: DMatrix<f64>,
    attributes: Attributes,
}

impl Subject {
    /// Create a subject with the specified parameters.
    /// The function returns an error if the voltage array does not have `NUM_SAMPLES` rows or has no repetition.
    pub fn build(id: usize, voltage: DMatrix<f64>, attributes: Attributes) -> Result<Self, StimError> {
        if voltage.nrows() != NUM_SAMPLES {
            return Err(StimError::IncompatibleShape(format!(
                "subject {} has {} samples",
                id,
                voltage.nrows()
            )));
        }
        if voltage.ncols() == 0 {
            return Err(StimError::IncompatibleShape(format!(
                "subject {} has no repetition",
                id
            )));
        }
        Ok(Subject {
            id,
            voltage,
            attributes,
        })
    }

    /// Create a subject from a raw attribute map, validating the required keys.
    pub fn from_raw(
        id: usize,
        voltage: DMatrix<f64>,
        attrs: &HashMap<String, String>,
    ) -> Result<Self, StimError> {
        let attributes = Attributes::from_map(id, attrs)?;
        Subject::build(id, voltage, attributes)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn voltage(&self) -> &DMatrix<f64> {
        &self.voltage
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn num_repetitions(&self) -> usize {
        self.voltage.ncols()
    }

    /// Returns the mean voltage across all samples and repetitions.
    /// Missing (NaN) samples are skipped; the mean is NaN only if every sample is missing.
    pub fn mean_voltage(&self) -> f64 {
        let (sum, count) = self
            .voltage
            .iter()
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            return f64::NAN;
        }
        sum / count as f64
    }
}
