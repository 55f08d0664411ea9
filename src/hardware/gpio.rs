// src/hardware/gpio.rs - polarity-aware output line

use super::GpioError;
use piso_shared::board_config::{ActiveLevel, BoardConfig};
use piso_shared::hardware_traits::{Direction, LogicLevel, PinController};

/// Target of a single output operation: a pin number and what "active" means on it.
///
/// Built from a [`BoardConfig`] right before use. A negative number is the
/// unwired sentinel and turns every write into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioPin {
    pub number: i32,
    pub active_level: ActiveLevel,
}

impl GpioPin {
    pub fn new(number: i32, active_level: ActiveLevel) -> Self {
        Self { number, active_level }
    }

    /// The relay output of `board`.
    pub fn relay(board: &BoardConfig) -> Self {
        Self::new(board.pins.relay_pin, board.pins.relay_active)
    }

    /// Logic level that puts the line in the requested state.
    pub fn level_for(&self, active: bool) -> LogicLevel {
        match (active, self.active_level) {
            (true, ActiveLevel::High) | (false, ActiveLevel::Low) => LogicLevel::High,
            (true, ActiveLevel::Low) | (false, ActiveLevel::High) => LogicLevel::Low,
        }
    }

    /// Drive the line active or inactive: export if needed, set direction, write level.
    ///
    /// The first failing step aborts the rest and its OS error is returned.
    pub fn write<C: PinController + ?Sized>(&self, gpio: &C, active: bool) -> Result<(), GpioError> {
        let Ok(pin) = u32::try_from(self.number) else {
            tracing::debug!("GPIO {} not wired; skipping write (active={})", self.number, active);
            return Ok(());
        };

        ensure_exported(gpio, pin)?;

        gpio.set_direction(pin, Direction::Out)
            .map_err(|source| GpioError::Direction { pin, direction: Direction::Out, source })?;

        let level = self.level_for(active);
        tracing::debug!("GPIO {} <- {} (active={}, active level {})", pin, level, active, self.active_level);
        gpio.set_value(pin, level)
            .map_err(|source| GpioError::Value { pin, level, source })
    }
}

fn ensure_exported<C: PinController + ?Sized>(gpio: &C, pin: u32) -> Result<(), GpioError> {
    if gpio.is_exported(pin) {
        return Ok(());
    }
    tracing::debug!("Exporting GPIO {}", pin);
    gpio.export(pin).map_err(|source| GpioError::Export { pin, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Export(u32),
        Direction(u32, Direction),
        Value(u32, LogicLevel),
    }

    #[derive(Default)]
    struct RecordingGpio {
        exported: Mutex<HashSet<u32>>,
        ops: Mutex<Vec<Op>>,
        fail_direction: bool,
        fail_value: bool,
        probes: Mutex<u32>,
    }

    impl RecordingGpio {
        fn with_exported(pin: u32) -> Self {
            let gpio = Self::default();
            gpio.exported.lock().unwrap().insert(pin);
            gpio
        }

        fn ops(&self) -> Vec<Op> {
            self.ops.lock().unwrap().clone()
        }
    }

    impl PinController for RecordingGpio {
        fn is_exported(&self, pin: u32) -> bool {
            *self.probes.lock().unwrap() += 1;
            self.exported.lock().unwrap().contains(&pin)
        }

        fn export(&self, pin: u32) -> io::Result<()> {
            self.ops.lock().unwrap().push(Op::Export(pin));
            self.exported.lock().unwrap().insert(pin);
            Ok(())
        }

        fn set_direction(&self, pin: u32, direction: Direction) -> io::Result<()> {
            if self.fail_direction {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "direction is read-only"));
            }
            self.ops.lock().unwrap().push(Op::Direction(pin, direction));
            Ok(())
        }

        fn set_value(&self, pin: u32, level: LogicLevel) -> io::Result<()> {
            if self.fail_value {
                return Err(io::Error::from_raw_os_error(5));
            }
            self.ops.lock().unwrap().push(Op::Value(pin, level));
            Ok(())
        }
    }

    #[test]
    fn unwired_pin_does_no_io() {
        let gpio = RecordingGpio::default();
        let pin = GpioPin::new(-1, ActiveLevel::High);
        pin.write(&gpio, true).unwrap();
        pin.write(&gpio, false).unwrap();
        assert!(gpio.ops().is_empty());
        assert_eq!(*gpio.probes.lock().unwrap(), 0);
    }

    #[test]
    fn active_high_mapping() {
        let gpio = RecordingGpio::with_exported(11);
        let pin = GpioPin::new(11, ActiveLevel::High);
        pin.write(&gpio, true).unwrap();
        pin.write(&gpio, false).unwrap();
        assert_eq!(
            gpio.ops(),
            vec![
                Op::Direction(11, Direction::Out),
                Op::Value(11, LogicLevel::High),
                Op::Direction(11, Direction::Out),
                Op::Value(11, LogicLevel::Low),
            ]
        );
    }

    #[test]
    fn active_low_inverts() {
        let pin = GpioPin::new(11, ActiveLevel::Low);
        assert_eq!(pin.level_for(true), LogicLevel::Low);
        assert_eq!(pin.level_for(false), LogicLevel::High);

        let gpio = RecordingGpio::with_exported(11);
        pin.write(&gpio, true).unwrap();
        assert_eq!(gpio.ops().last(), Some(&Op::Value(11, LogicLevel::Low)));
    }

    #[test]
    fn exports_once_then_reuses() {
        let gpio = RecordingGpio::default();
        let pin = GpioPin::new(228, ActiveLevel::High);
        pin.write(&gpio, true).unwrap();
        pin.write(&gpio, true).unwrap();
        let exports = gpio.ops().iter().filter(|op| matches!(op, Op::Export(_))).count();
        assert_eq!(exports, 1);
        assert_eq!(gpio.ops()[0], Op::Export(228));
    }

    #[test]
    fn direction_failure_stops_before_value() {
        let gpio = RecordingGpio {
            fail_direction: true,
            ..RecordingGpio::with_exported(3)
        };
        let err = GpioPin::new(3, ActiveLevel::High).write(&gpio, true).unwrap_err();
        assert!(matches!(err, GpioError::Direction { pin: 3, .. }));
        assert_eq!(err.io_error().kind(), io::ErrorKind::PermissionDenied);
        assert!(gpio.ops().is_empty());
    }

    #[test]
    fn value_failure_keeps_os_error() {
        let gpio = RecordingGpio {
            fail_value: true,
            ..RecordingGpio::with_exported(229)
        };
        let err = GpioPin::new(229, ActiveLevel::Low).write(&gpio, true).unwrap_err();
        assert!(matches!(err, GpioError::Value { pin: 229, level: LogicLevel::Low, .. }));
        assert_eq!(err.pin(), 229);
        assert_eq!(err.io_error().raw_os_error(), Some(5));
        assert_eq!(gpio.ops(), vec![Op::Direction(229, Direction::Out)]);
    }

    #[test]
    fn relay_pin_comes_from_board() {
        let pin = GpioPin::relay(&BoardConfig::GENERIC_X86);
        assert_eq!(pin.number, -1);
        assert_eq!(pin.active_level, ActiveLevel::High);
    }
}
