use jstack_flame::aggregator::CollapsedStack;
use jstack_flame::flamegraph::{generate_flamegraph, FlamegraphConfig};
use jstack_flame::output::{read_profile, write_folded_file, write_profile, write_svg};
use jstack_flame::parser::schema::{HotPath, Profile};
use std::collections::BTreeMap;
use tempfile::NamedTempFile;

fn create_test_profile() -> Profile {
    let mut state_tally = BTreeMap::new();
    state_tally.insert("RUNNABLE".to_string(), 4);
    state_tally.insert("WAITING".to_string(), 2);

    Profile {
        version: "1.0.0".to_string(),
        inputs: vec!["dumps.txt".to_string()],
        total_samples: 4,
        unique_stacks: 2,
        included_states: vec!["RUNNABLE".to_string()],
        state_tally,
        hot_paths: vec![HotPath {
            stack: "main;com.example.Main.main".to_string(),
            samples: 3,
            percentage: 75.0,
        }],
        generated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[test]
fn test_write_and_read_profile() {
    let profile = create_test_profile();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    // Write
    write_profile(&profile, path).unwrap();

    // Read back
    let loaded = read_profile(path).unwrap();

    assert_eq!(loaded.version, profile.version);
    assert_eq!(loaded.inputs, profile.inputs);
    assert_eq!(loaded.total_samples, 4);
    assert_eq!(loaded.state_tally.get("WAITING"), Some(&2));
    assert_eq!(loaded.hot_paths[0].stack, "main;com.example.Main.main");
}

#[test]
fn test_profile_without_tally_omits_field() {
    let mut profile = create_test_profile();
    profile.state_tally.clear();

    let temp_file = NamedTempFile::new().unwrap();
    write_profile(&profile, temp_file.path()).unwrap();

    let raw = std::fs::read_to_string(temp_file.path()).unwrap();
    assert!(!raw.contains("state_tally"));

    let loaded = read_profile(temp_file.path()).unwrap();
    assert!(loaded.state_tally.is_empty());
}

#[test]
fn test_read_profile_rejects_garbage() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "not json").unwrap();

    assert!(read_profile(temp_file.path()).is_err());
}

#[test]
fn test_write_folded_file_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("out.folded");

    let stacks = vec![
        CollapsedStack::new("main;a", 2),
        CollapsedStack::new("main;b", 1),
    ];
    write_folded_file(&stacks, &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "main;a 2\nmain;b 1\n");
}

#[test]
fn test_write_folded_file_rejects_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(write_folded_file(&[], temp_dir.path()).is_err());
}

#[test]
fn test_write_svg_from_generated_flamegraph() {
    let stacks = vec![
        CollapsedStack::new("main;java.lang.Thread.run;com.example.Worker.loop", 5),
        CollapsedStack::new("main;java.lang.Thread.run;com.example.Worker.idle", 1),
    ];
    let config = FlamegraphConfig::new().with_title("Worker dump");
    let svg = generate_flamegraph(&stacks, Some(&config)).unwrap();

    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("profile.svg");
    write_svg(&svg, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<svg"));
    assert!(written.contains("Worker dump"));
}
