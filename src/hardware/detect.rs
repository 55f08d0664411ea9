//! Resolves the running platform to one entry of the board table.
//!
//! Resolution order:
//! 1. x86-family hosts get [`BoardConfig::GENERIC_X86`] without any probing.
//! 2. A non-empty override naming a known board wins. Unknown overrides are
//!    ignored with a warning and detection falls through to probing.
//! 3. The device-tree `compatible` list is read and the first token present
//!    in the table selects the board.
//! 4. Anything else is [`DetectError::UnsupportedBoard`].

use super::DetectError;
use piso_shared::board_config::{BoardConfig, BoardRegistry};
use std::path::{Path, PathBuf};

/// NUL-separated compatible list, most specific first.
pub const DEVICE_TREE_COMPATIBLE: &str = "/proc/device-tree/compatible";

/// Desktop/server architectures that never carry the coin circuit.
pub fn is_desktop_arch(arch: &str) -> bool {
    matches!(arch, "x86_64" | "x86")
}

/// Split a raw `compatible` property into its non-empty tokens, in order.
pub fn parse_compatible(raw: &[u8]) -> Vec<String> {
    raw.split(|b| *b == 0)
        .filter(|token| !token.is_empty())
        .map(|token| String::from_utf8_lossy(token).into_owned())
        .collect()
}

#[derive(Debug, Clone)]
pub struct BoardDetector {
    arch: String,
    board_override: Option<String>,
    compatible_path: PathBuf,
    registry: &'static BoardRegistry,
}

impl Default for BoardDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardDetector {
    /// Detector for this process: compiled architecture, no override, the kernel's device tree.
    pub fn new() -> Self {
        Self {
            arch: std::env::consts::ARCH.to_string(),
            board_override: None,
            compatible_path: PathBuf::from(DEVICE_TREE_COMPATIBLE),
            registry: BoardRegistry::builtin(),
        }
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Operator override; an empty string counts as unset.
    pub fn with_override(mut self, board_override: Option<String>) -> Self {
        self.board_override = board_override.filter(|value| !value.is_empty());
        self
    }

    pub fn with_compatible_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.compatible_path = path.into();
        self
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    pub fn compatible_path(&self) -> &Path {
        &self.compatible_path
    }

    pub fn detect(&self) -> Result<&'static BoardConfig, DetectError> {
        let registry = self.registry;

        if is_desktop_arch(&self.arch) {
            tracing::debug!("Architecture {} has no GPIO header; using generic board", self.arch);
            return Ok(&BoardConfig::GENERIC_X86);
        }

        if let Some(ref key) = self.board_override {
            match registry.lookup(key) {
                Some(board) => {
                    tracing::info!("Board override '{}' selects {}", key, board.name);
                    return Ok(board);
                }
                None => {
                    tracing::warn!("Ignoring unknown board override '{}'; probing device tree", key);
                }
            }
        }

        let raw = std::fs::read(&self.compatible_path).map_err(|source| DetectError::IdentitySource {
            path: self.compatible_path.clone(),
            source,
        })?;
        let compatible = parse_compatible(&raw);
        tracing::debug!("Device tree compatible: {:?}", compatible);

        if let Some(board) = compatible.iter().find_map(|token| registry.lookup(token)) {
            return Ok(board);
        }
        Err(DetectError::UnsupportedBoard { compatible })
    }
}
