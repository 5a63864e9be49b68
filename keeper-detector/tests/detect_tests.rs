//! Supervisor detection tests.
//!
//! Each case gets an isolated `TempDir` standing in for a `PATH` entry.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;

use keeper_core::{Config, Service};
use keeper_detector::{detect_in, Backend, BackendKind};
use keeper_runit::RunitSettings;
use rstest::rstest;
use tempfile::TempDir;

fn bin_dir(binaries: &[(&str, u32)]) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    for (name, mode) in binaries {
        let path = dir.path().join(name);
        fs::write(&path, "#!/bin/sh\n").expect("write fake binary");
        fs::set_permissions(&path, fs::Permissions::from_mode(*mode)).expect("chmod");
    }
    dir
}

#[rstest]
#[case(&[("runsvdir", 0o755)], Some(BackendKind::Runit))]
#[case(&[("runsvdir", 0o755), ("sv", 0o755)], Some(BackendKind::Runit))]
#[case(&[("runsvdir", 0o644)], None)]
#[case(&[("sv", 0o755)], None)]
#[case(&[], None)]
fn detects_runit_by_runsvdir(
    #[case] binaries: &[(&str, u32)],
    #[case] expected: Option<BackendKind>,
) {
    let dir = bin_dir(binaries);
    assert_eq!(detect_in(dir.path()), expected);
}

#[test]
fn searches_every_path_entry() {
    let empty = bin_dir(&[]);
    let runit = bin_dir(&[("runsvdir", 0o755)]);
    let path = std::env::join_paths([empty.path(), runit.path()]).expect("join paths");
    assert_eq!(detect_in(path), Some(BackendKind::Runit));
}

#[test]
fn backend_for_kind_delegates_to_runit() {
    let backend = Backend::for_kind(
        BackendKind::Runit,
        Config::new("web").with_display_name("Web Frontend"),
        RunitSettings::default(),
    );
    assert_eq!(backend.kind(), BackendKind::Runit);
    assert_eq!(backend.platform(), "linux-runit");
    assert_eq!(backend.display_name(), "Web Frontend");
    assert_eq!(BackendKind::Runit.to_string(), "runit");
}
