use std::collections::HashMap;

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use visual_stim::error::StimError;
use visual_stim::recording::{Attributes, Subject};
use visual_stim::sampler::{mock_stim_data, MockSampler};
use visual_stim::store::LabeledRecordingStore;
use visual_stim::{ELECTRODE_WINDOW, NUM_ELECTRODES, NUM_SAMPLES};

const SEED: u64 = 42;

/// A store where subjects {1, 3, 5} belong to Daniel with means 0.1, 0.3, 0.5
/// and subjects {2, 4} belong to Anna with means 0.2, 0.8.
fn bias_store() -> LabeledRecordingStore {
    let mut rng = StdRng::seed_from_u64(SEED);
    let subjects = [
        (1, "Daniel", 0.1),
        (2, "Anna", 0.2),
        (3, "Daniel", 0.3),
        (4, "Anna", 0.8),
        (5, "Daniel", 0.5),
    ]
    .into_iter()
    .map(|(id, experimenter, mean)| {
        // zero-mean noise around the target mean, in +/- pairs
        let noise: Vec<f64> = (0..NUM_SAMPLES / 2)
            .map(|_| rng.gen_range(-0.05..0.05))
            .collect();
        let voltage = DMatrix::from_fn(NUM_SAMPLES, 2, |i, _| {
            let n = noise[i / 2];
            if i % 2 == 0 {
                mean + n
            } else {
                mean - n
            }
        });
        Subject::build(id, voltage, Attributes::new(id, experimenter, "Male", "25", "20")).unwrap()
    })
    .collect();
    LabeledRecordingStore::build(subjects).unwrap()
}

#[test]
fn test_select_electrode_trace_matches_voltage() {
    let store = mock_stim_data(SEED).unwrap();

    for subject_id in store.subject_ids() {
        let voltage = store.subject(subject_id).unwrap().voltage();
        for rep in 0..store.num_repetitions(subject_id).unwrap() {
            let electrodes: Vec<usize> = (1..=NUM_ELECTRODES).collect();
            let traces = store.select_electrode_trace(subject_id, rep, &electrodes).unwrap();

            for (k, trace) in electrodes.iter().zip(traces.iter()) {
                assert_eq!(trace.electrode, *k);
                assert_eq!(trace.len(), ELECTRODE_WINDOW);
                let start = (k - 1) * ELECTRODE_WINDOW;
                assert!(trace
                    .y
                    .iter()
                    .enumerate()
                    .all(|(i, v)| *v == voltage[(start + i, rep)]));
            }
        }
    }
}

#[test]
fn test_select_electrode_trace_order_and_errors() {
    let store = mock_stim_data(SEED).unwrap();

    let traces = store.select_electrode_trace(4, 2, &[7, 3, 7, 1]).unwrap();
    assert_eq!(
        traces.iter().map(|t| t.electrode).collect::<Vec<_>>(),
        vec![7, 3, 7, 1]
    );
    assert_eq!(traces[0], traces[2]);

    assert!(matches!(
        store.select_electrode_trace(4, 2, &[0]),
        Err(StimError::OutOfRange(_))
    ));
    assert!(matches!(
        store.select_electrode_trace(4, 2, &[11]),
        Err(StimError::OutOfRange(_))
    ));
    assert!(matches!(
        store.select_electrode_trace(4, 4, &[1]),
        Err(StimError::OutOfRange(_))
    ));
    assert_eq!(
        store.select_electrode_trace(10, 0, &[1]),
        Err(StimError::NotFound(10))
    );
}

#[test]
fn test_aggregate_by_experimenter() {
    let store = bias_store();
    for (id, mean) in [(1, 0.1), (2, 0.2), (3, 0.3), (4, 0.8), (5, 0.5)] {
        assert!((store.subject_mean(id).unwrap() - mean).abs() < 1e-9);
    }

    let bias = store.aggregate_by_experimenter(&["Daniel", "Anna"]);
    assert_eq!(bias.groups.len(), 2);

    let (means, stds, medians) = (bias.means(), bias.stds(), bias.medians());
    assert!((means[0] - 0.3).abs() < 1e-9);
    assert!((stds[0] - 0.163299).abs() < 1e-6);
    assert!((medians[0] - 0.3).abs() < 1e-9);
    assert!((means[1] - 0.5).abs() < 1e-9);
    assert!((stds[1] - 0.3).abs() < 1e-9);
    assert!((medians[1] - 0.5).abs() < 1e-9);

    // the order of the names drives the order of the output
    let reversed = store.aggregate_by_experimenter(&["Anna", "Daniel"]);
    assert_eq!(reversed.groups[0], bias.groups[1]);
    assert_eq!(reversed.groups[1], bias.groups[0]);
}

#[test]
fn test_aggregate_unknown_experimenter() {
    let store = mock_stim_data(SEED).unwrap();

    let bias = store.aggregate_by_experimenter(&["Unknown"]);
    assert_eq!(bias.groups.len(), 1);
    assert_eq!(bias.means().len(), 1);
    assert!(bias.groups[0].stats.is_none());
    assert!(bias.means()[0].is_nan());

    let bias = store.aggregate_by_experimenter(&["Daniel", "Unknown", "Anna"]);
    assert_eq!(bias.medians().len(), 3);
    assert!(bias.medians()[1].is_nan());
}

#[test]
fn test_mock_generator_groups_cover_all_subjects() {
    let store = mock_stim_data(SEED).unwrap();
    assert_eq!(store.num_subjects(), 9);

    let bias = store.experimenter_bias();
    let total: usize = bias.groups.iter().map(|g| g.num_subjects).sum();
    assert_eq!(total, 9);
    for group in bias.groups.iter().filter(|g| !g.is_empty()) {
        // uniform voltages in [0, 1) average close to 0.5
        let stats = group.stats.unwrap();
        assert!((stats.mean - 0.5).abs() < 0.01);
    }
}

#[test]
fn test_operations_are_deterministic() {
    let store = MockSampler::build(4, 3)
        .unwrap()
        .sample(&mut StdRng::seed_from_u64(SEED))
        .unwrap();

    assert_eq!(
        store.select_electrode_trace(2, 1, &[2, 9]).unwrap(),
        store.select_electrode_trace(2, 1, &[2, 9]).unwrap()
    );

    let bias_1 = store.aggregate_by_experimenter(&["Daniel", "Anna"]);
    let bias_2 = store.aggregate_by_experimenter(&["Daniel", "Anna"]);
    assert_eq!(bias_1.names(), bias_2.names());
    assert_eq!(
        serde_json::to_string(&bias_1).unwrap(),
        serde_json::to_string(&bias_2).unwrap()
    );
}

#[test]
fn test_store_from_raw_attributes() {
    let mut raw: HashMap<String, String> = [
        ("Experimenter", "Anna"),
        ("Rat_gender", "Female"),
        ("Room_temp", "25"),
        ("Room_humidity", "20"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let subject = Subject::from_raw(7, DMatrix::zeros(NUM_SAMPLES, 1), &raw).unwrap();
    let store = LabeledRecordingStore::build(vec![subject]).unwrap();
    assert_eq!(store.experimenters(), vec!["Anna"]);
    assert_eq!(store.subject(7).unwrap().attributes().rat_id, 7);

    raw.remove("Experimenter");
    assert_eq!(
        Subject::from_raw(7, DMatrix::zeros(NUM_SAMPLES, 1), &raw),
        Err(StimError::MissingAttribute("Experimenter".to_string()))
    );
}
