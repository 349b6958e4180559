use std::path::PathBuf;

use hypercon::{
    models::{construct, FrameTopology, SamplingParameters},
    settings::{SettingsError, SettingsFile},
};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("hypercon-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn save_and_load_settings() {
    let path = scratch_path("saved.toml");

    let topology = FrameTopology {
        clockwise: false,
        bottom_left_corner: false,
        top_count: 20,
        bottom_count: 12,
        left_count: 11,
        right_count: 10,
        first_led_offset: -4,
        ..Default::default()
    };
    let sampling = SamplingParameters {
        horizontal_depth: 0.12,
        vertical_gap: 0.03,
        overlap_fraction: 0.2,
        ..Default::default()
    };

    let mut file = SettingsFile::new();
    file.store(&topology);
    file.store(&sampling);
    file.save(&path).expect("Failed to save settings");

    let loaded = SettingsFile::load(&path).expect("Failed to load settings");
    assert_eq!(loaded, file);

    let mut restored_topology = FrameTopology::default();
    let mut restored_sampling = SamplingParameters::default();
    loaded.restore(&mut restored_topology).unwrap();
    loaded.restore(&mut restored_sampling).unwrap();

    assert_eq!(restored_topology, topology);
    assert_eq!(restored_sampling, sampling);
    assert_eq!(
        construct(&restored_topology, &restored_sampling).unwrap(),
        construct(&topology, &sampling).unwrap()
    );

    std::fs::remove_file(&path).ok();
}

#[test]
fn load_missing_file() {
    let result = SettingsFile::load(&scratch_path("missing.toml"));
    assert!(matches!(result, Err(SettingsError::Io(_))));
}

#[test]
fn load_malformed_file() {
    let path = scratch_path("malformed.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "this is = not [ toml").unwrap();

    let result = SettingsFile::load(&path);
    assert!(matches!(result, Err(SettingsError::Toml(_))));

    std::fs::remove_file(&path).ok();
}
