// src/hardware/mod.rs - board detection and relay GPIO control
pub mod detect;
pub mod gpio;
pub mod sysfs;

pub use detect::{BoardDetector, DEVICE_TREE_COMPATIBLE};
pub use gpio::GpioPin;
pub use sysfs::{SysfsGpio, SYSFS_GPIO_ROOT};

pub use piso_shared::board_config::{ActiveLevel, BoardConfig, BoardRegistry, Edge, PinConfig, UNWIRED_PIN};
pub use piso_shared::hardware_traits::{Direction, LogicLevel, PinController};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why the running platform could not be mapped to a pin layout.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to read platform identity from {}: {source}", .path.display())]
    IdentitySource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unsupported board (compatible: {})", .compatible.join(", "))]
    UnsupportedBoard { compatible: Vec<String> },
}

/// A failed step while driving a GPIO line. The OS error is kept as the source.
#[derive(Debug, Error)]
pub enum GpioError {
    #[error("failed to export GPIO {pin}: {source}")]
    Export {
        pin: u32,
        #[source]
        source: io::Error,
    },
    #[error("failed to set GPIO {pin} direction to {direction}: {source}")]
    Direction {
        pin: u32,
        direction: Direction,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {level} to GPIO {pin}: {source}")]
    Value {
        pin: u32,
        level: LogicLevel,
        #[source]
        source: io::Error,
    },
}

impl GpioError {
    pub fn pin(&self) -> u32 {
        match self {
            GpioError::Export { pin, .. } | GpioError::Direction { pin, .. } | GpioError::Value { pin, .. } => *pin,
        }
    }

    /// The underlying OS error, unchanged.
    pub fn io_error(&self) -> &io::Error {
        match self {
            GpioError::Export { source, .. }
            | GpioError::Direction { source, .. }
            | GpioError::Value { source, .. } => source,
        }
    }
}
