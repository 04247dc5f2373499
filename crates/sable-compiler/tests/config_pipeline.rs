//! Integration tests for the configuration pipeline
//!
//! Drives resolve → load → link end to end against real `.sblib` files on
//! disk, and checks the memoization contract under concurrent first access.

use sable_compiler::config::{CompilerConfig, CompilerOptions, ConfigError, Distribution};
use sable_compiler::metadata::{write_library, Declaration, DeclarationKind, LibraryMetadata};
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;

fn write_test_library(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(format!("{name}.sblib"));
    let mut metadata = LibraryMetadata::new(name, "1.0.0");
    metadata.declarations.push(Declaration {
        name: format!("{name}.main"),
        kind: DeclarationKind::Function,
    });
    write_library(&path, &metadata).unwrap();
    path
}

fn test_distribution(dir: &Path) -> Distribution {
    let dist = Distribution::new(dir.join("dist"));
    std::fs::create_dir_all(dist.lib_dir()).unwrap();
    write_library(&dist.stdlib(), &LibraryMetadata::new("stdlib", "0.3.0")).unwrap();
    dist
}

#[test]
fn test_full_pipeline_resolve_load_link() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_test_library(temp_dir.path(), "a");
    let b = write_test_library(temp_dir.path(), "b");
    let dist = test_distribution(temp_dir.path());

    let config = CompilerConfig::new(
        CompilerOptions {
            module_name: "app".to_string(),
            libraries: vec![a.clone(), b.clone()],
            ..Default::default()
        },
        dist.clone(),
    );

    // Resolution: explicit order, stdlib last.
    assert_eq!(config.libraries(), vec![a, b, dist.stdlib()]);

    // Loading: descriptors in resolved order, metadata intact.
    let set = config.module_set().unwrap();
    let names: Vec<_> = set.iter().map(|m| m.name().to_string()).collect();
    assert_eq!(names, ["a", "b", "stdlib"]);
    assert_eq!(set.get(set.ids().next().unwrap()).unwrap().metadata().version, "1.0.0");

    // Linking: flat all-to-all, self included.
    let all: Vec<_> = set.ids().collect();
    for module in set.iter() {
        assert_eq!(module.dependencies(), all.as_slice());
    }
}

#[test]
fn test_missing_library_aborts_whole_session() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_test_library(temp_dir.path(), "a");
    let missing = temp_dir.path().join("missing.sblib");
    let dist = test_distribution(temp_dir.path());

    let config = CompilerConfig::new(
        CompilerOptions {
            module_name: "app".to_string(),
            libraries: vec![a, missing.clone()],
            ..Default::default()
        },
        dist,
    );

    let err = config.module_set().unwrap_err();
    match err {
        ConfigError::LibraryNotFound(path) => assert_eq!(path, missing),
        other => panic!("expected LibraryNotFound, got {other:?}"),
    }
}

#[test]
fn test_concurrent_first_reads_share_one_result() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_test_library(temp_dir.path(), "a");
    let dist = test_distribution(temp_dir.path());

    let config = CompilerConfig::new(
        CompilerOptions {
            module_name: "app".to_string(),
            libraries: vec![a],
            ..Default::default()
        },
        dist,
    );
    config.profiler().set_enabled(true);

    let addresses: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| config.module_set().unwrap() as *const _ as usize))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Every thread observed the same memoized set.
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));

    // The loader ran exactly once: one sample per library (a + stdlib).
    assert_eq!(config.profiler().sample_count(), 2);
}

#[test]
fn test_repeated_loads_are_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_test_library(temp_dir.path(), "a");
    let dist = test_distribution(temp_dir.path());

    let options = CompilerOptions {
        module_name: "app".to_string(),
        libraries: vec![a],
        ..Default::default()
    };

    // Two independent sessions over the same files agree exactly.
    let first = CompilerConfig::new(options.clone(), dist.clone());
    let second = CompilerConfig::new(options, dist);
    assert_eq!(first.module_set().unwrap(), second.module_set().unwrap());
}
