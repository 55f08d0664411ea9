// src/hardware/sysfs.rs - PinController over the legacy /sys/class/gpio interface

use piso_shared::hardware_traits::{Direction, LogicLevel, PinController};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// `export`, `gpioN/direction` and `gpioN/value` under a sysfs GPIO root.
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
}

impl Default for SysfsGpio {
    fn default() -> Self {
        Self::new(SYSFS_GPIO_ROOT)
    }
}

impl SysfsGpio {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pin_dir(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{pin}"))
    }
}

impl PinController for SysfsGpio {
    fn is_exported(&self, pin: u32) -> bool {
        self.pin_dir(pin).exists()
    }

    fn export(&self, pin: u32) -> io::Result<()> {
        if self.is_exported(pin) {
            return Ok(());
        }
        match fs::write(self.root.join("export"), pin.to_string()) {
            Ok(()) => Ok(()),
            // The kernel answers EBUSY when someone else exported it first.
            Err(e) if e.kind() == io::ErrorKind::ResourceBusy && self.is_exported(pin) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn set_direction(&self, pin: u32, direction: Direction) -> io::Result<()> {
        fs::write(self.pin_dir(pin).join("direction"), direction.as_str())
    }

    fn set_value(&self, pin: u32, level: LogicLevel) -> io::Result<()> {
        fs::write(self.pin_dir(pin).join("value"), level.as_str())
    }
}
