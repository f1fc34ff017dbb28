//! End-to-end runs through the animation driver.

use explorer_core::{ExplorerConfig, FrameRecorder, LandmarkSet};
use explorer_sim::{AnimationDriver, ExplorerExport, SimContext, VirtualPacer};
use proptest::prelude::*;

#[test]
fn test_hundred_frame_run_fixed_seed() {
    let config = ExplorerConfig { seed: 2024, ..Default::default() };
    let mut driver = AnimationDriver::new(config).unwrap();
    let mut recorder = FrameRecorder::new();

    let report = driver.run(&mut recorder, &mut VirtualPacer::new()).unwrap();

    assert_eq!(report.path.len(), 101);
    assert_eq!(recorder.frames().len(), 100);
    assert!(report.boundary_is_monotonic());

    for (i, update) in recorder.frames().iter().enumerate() {
        assert_eq!(update.frame_index, i as u64);
        assert_eq!(update.coordinates.len(), i + 2);
        for p in &report.path.positions()[..i + 2] {
            assert!(update.boundary.contains(p));
        }
    }
}

#[test]
fn test_landmarks_fixed_seed_in_cube() {
    let config = ExplorerConfig { seed: 77, ..Default::default() };
    let driver = AnimationDriver::new(config.clone()).unwrap();

    let a = driver.landmarks().unwrap();
    let b = LandmarkSet::seeded(
        20,
        config.boundary_limit,
        SimContext::new(77).landmark_seed(),
    )
    .unwrap();

    assert_eq!(a, b);
    assert_eq!(a.len(), 20);
    for p in a.positions() {
        assert!(p.amax() <= config.boundary_limit);
    }
}

#[test]
fn test_recorder_sees_run_landmarks() {
    let mut driver = AnimationDriver::new(ExplorerConfig::default()).unwrap();
    let mut recorder = FrameRecorder::new();
    let report = driver.run(&mut recorder, &mut VirtualPacer::new()).unwrap();

    assert_eq!(recorder.landmarks(), Some(&report.landmarks));
    assert_eq!(recorder.initial_boundary(), Some(report.initial_boundary));
}

#[test]
fn test_export_written_to_disk() {
    let config = ExplorerConfig { frame_count: 30, ..Default::default() };
    let report = AnimationDriver::new(config.clone()).unwrap().run_headless().unwrap();
    let export = ExplorerExport::from_report(&config, &report);

    let path = std::env::temp_dir().join(format!("explorer_export_{}.json", std::process::id()));
    export.write_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    let loaded = ExplorerExport::from_json(&text).unwrap();

    assert_eq!(loaded.frames.len(), 30);
    assert_eq!(loaded.landmarks.len(), 20);
    assert_eq!(loaded.seed, config.seed);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_any_seed_grows_and_never_shrinks(seed in 1u64..u64::MAX) {
        let config = ExplorerConfig { seed, ..Default::default() };
        let report = AnimationDriver::new(config).unwrap().run_headless().unwrap();

        prop_assert_eq!(report.path.len(), 101);
        prop_assert!(report.boundary_is_monotonic());
        for p in report.path.positions() {
            prop_assert!(report.final_boundary().contains(p));
        }
    }
}
