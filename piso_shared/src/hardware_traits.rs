// Trait-based interface over the OS GPIO control points (shared)

use std::fmt;
use std::io;

/// Direction of a GPIO line as written to its `direction` control file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw logic level as written to a `value` control file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicLevel {
    Low,
    High,
}

impl LogicLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicLevel::Low => "0",
            LogicLevel::High => "1",
        }
    }
}

impl fmt::Display for LogicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export / direction / value operations for numbered GPIO lines.
///
/// Pin numbers here are always wired pins; the unwired sentinel is handled
/// by the caller before any controller is touched.
pub trait PinController: Send + Sync {
    /// Whether the pin's control files are already available to user space.
    fn is_exported(&self, pin: u32) -> bool;

    /// Ask the OS to make the pin available. Exporting an exported pin is not an error.
    fn export(&self, pin: u32) -> io::Result<()>;

    fn set_direction(&self, pin: u32, direction: Direction) -> io::Result<()>;

    fn set_value(&self, pin: u32, level: LogicLevel) -> io::Result<()>;
}
