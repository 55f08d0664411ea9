// Integration tests for board detection through the public API

use piso_wifi::hardware::{BoardConfig, BoardDetector, BoardRegistry, DetectError};
use std::fs;
use tempfile::TempDir;

fn device_tree(tokens: &[&str]) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compatible");
    let mut raw = Vec::new();
    for token in tokens {
        raw.extend_from_slice(token.as_bytes());
        raw.push(0);
    }
    fs::write(&path, raw).unwrap();
    (dir, path)
}

#[test]
fn every_registry_board_is_detectable_from_device_tree() {
    for (key, expected) in BoardRegistry::builtin().iter() {
        let (_dir, path) = device_tree(&[key, "allwinner,sun8i-h3"]);
        let board = BoardDetector::new()
            .with_arch("aarch64")
            .with_compatible_path(&path)
            .detect()
            .unwrap();
        assert_eq!(board, expected, "{key}");
    }
}

#[test]
fn orange_pi_one_on_armv7() {
    let (_dir, path) = device_tree(&["xunlong,orangepi-one", "allwinner,sun8i-h3"]);
    let board = BoardDetector::new()
        .with_arch("arm")
        .with_compatible_path(&path)
        .detect()
        .unwrap();
    assert_eq!(board.id, "Orange Pi One");
    assert_eq!(board.variant, Some("OP0100"));
    assert_eq!(board.pins.relay_pin, 11);
}

#[test]
fn desktop_ignores_override_and_device_tree() {
    let (_dir, path) = device_tree(&["raspberrypi,5-model-b"]);
    let board = BoardDetector::new()
        .with_arch("x86_64")
        .with_override(Some("xunlong,orangepi-one".to_string()))
        .with_compatible_path(&path)
        .detect()
        .unwrap();
    assert_eq!(*board, BoardConfig::GENERIC_X86);
}

#[test]
fn recognized_override_beats_valid_device_tree() {
    let (_dir, path) = device_tree(&["raspberrypi,5-model-b"]);
    let board = BoardDetector::new()
        .with_arch("aarch64")
        .with_override(Some("friendlyarm,nanopi-m1".to_string()))
        .with_compatible_path(&path)
        .detect()
        .unwrap();
    assert_eq!(board.name, "NanoPi M1");
}

// Unknown overrides are deliberately permissive today; a strict mode would
// turn this into an error.
#[test]
fn unrecognized_override_without_device_tree_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BoardDetector::new()
        .with_arch("aarch64")
        .with_override(Some("raspberrypi,400".to_string()))
        .with_compatible_path(dir.path().join("missing"))
        .detect()
        .unwrap_err();
    assert!(matches!(err, DetectError::IdentitySource { .. }));
}

#[test]
fn unsupported_board_message_lists_tokens() {
    let (_dir, path) = device_tree(&["pine64,pine64-plus", "allwinner,sun50i-a64"]);
    let err = BoardDetector::new()
        .with_arch("aarch64")
        .with_compatible_path(&path)
        .detect()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported board (compatible: pine64,pine64-plus, allwinner,sun50i-a64)"
    );
}
