//! Board table and pin mapping for supported single-board computers (shared)

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Pin number meaning "not wired / unavailable".
pub const UNWIRED_PIN: i32 = -1;

/// Edge a coin or bill acceptor pulses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Rising,
    Falling,
}

/// Logic level that means "energized" for an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActiveLevel {
    High,
    Low,
}

impl fmt::Display for ActiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveLevel::High => f.write_str("HIGH"),
            ActiveLevel::Low => f.write_str("LOW"),
        }
    }
}

/// Physical wiring of the coin acceptor, relay and bill acceptor on one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PinConfig {
    pub coin_pin: i32,
    pub relay_pin: i32,
    pub bill_pin: i32,
    pub coin_edge: Edge,
    pub bill_edge: Edge,
    pub relay_active: ActiveLevel,
}

impl PinConfig {
    /// Layout with nothing wired, used when the platform has no GPIO.
    pub const UNWIRED: PinConfig = PinConfig {
        coin_pin: UNWIRED_PIN,
        relay_pin: UNWIRED_PIN,
        bill_pin: UNWIRED_PIN,
        coin_edge: Edge::Rising,
        bill_edge: Edge::Falling,
        relay_active: ActiveLevel::High,
    };

    /// The three pin numbers in coin, relay, bill order.
    pub fn numbers(&self) -> [i32; 3] {
        [self.coin_pin, self.relay_pin, self.bill_pin]
    }
}

/// One supported platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub variant: Option<&'static str>,
    pub has_gpio: bool,
    pub pins: PinConfig,
}

impl BoardConfig {
    /// Synthetic entry for desktop/server hosts; every hardware write is a no-op.
    pub const GENERIC_X86: BoardConfig = BoardConfig {
        id: "Generic x86_64",
        name: "Generic x86_64",
        variant: None,
        has_gpio: false,
        pins: PinConfig::UNWIRED,
    };
}

// Sunxi header: PA12 coin, PA11 relay, PA6 bill.
const ORANGE_PI_PINS: PinConfig = PinConfig {
    coin_pin: 12,
    relay_pin: 11,
    bill_pin: 6,
    coin_edge: Edge::Rising,
    bill_edge: Edge::Falling,
    relay_active: ActiveLevel::High,
};

// H618 numbering: PH5 coin, PH4 relay, PC9 bill.
const ORANGE_PI_ZERO3_PINS: PinConfig = PinConfig {
    coin_pin: 229,
    relay_pin: 228,
    bill_pin: 73,
    ..ORANGE_PI_PINS
};

// BCM numbering.
const RASPBERRY_PI_PINS: PinConfig = PinConfig {
    coin_pin: 2,
    relay_pin: 3,
    bill_pin: 4,
    coin_edge: Edge::Rising,
    bill_edge: Edge::Falling,
    relay_active: ActiveLevel::High,
};

const fn board(name: &'static str, pins: PinConfig) -> BoardConfig {
    BoardConfig {
        id: name,
        name,
        variant: None,
        has_gpio: true,
        pins,
    }
}

const fn board_variant(name: &'static str, variant: &'static str, pins: PinConfig) -> BoardConfig {
    BoardConfig {
        variant: Some(variant),
        ..board(name, pins)
    }
}

const BOARDS: &[(&str, BoardConfig)] = &[
    ("xunlong,orangepi-one", board_variant("Orange Pi One", "OP0100", ORANGE_PI_PINS)),
    ("xunlong,orangepi-pc", board_variant("Orange Pi PC", "OP0600", ORANGE_PI_PINS)),
    ("xunlong,orangepi-pc-plus", board("Orange Pi PC Plus", ORANGE_PI_PINS)),
    ("xunlong,orangepi-plus2e", board("Orange Pi Plus 2E", ORANGE_PI_PINS)),
    ("xunlong,orangepi-zero", board("Orange Pi Zero", ORANGE_PI_PINS)),
    ("xunlong,orangepi-zero2", board("Orange Pi Zero 2", ORANGE_PI_PINS)),
    ("xunlong,orangepi-zero3", board("Orange Pi Zero 3", ORANGE_PI_ZERO3_PINS)),
    ("xunlong,orangepi-3", board("Orange Pi 3", ORANGE_PI_PINS)),
    ("xunlong,orangepi-4", board("Orange Pi 4", ORANGE_PI_PINS)),
    ("xunlong,orangepi-5", board("Orange Pi 5", ORANGE_PI_PINS)),
    ("xunlong,orangepi-5b", board("Orange Pi 5B", ORANGE_PI_PINS)),
    ("xunlong,orangepi-5-plus", board("Orange Pi 5 Plus", ORANGE_PI_PINS)),
    ("xunlong,orangepi-5-ultra", board("Orange Pi 5 Ultra", ORANGE_PI_PINS)),
    ("friendlyarm,nanopi-neo", board("NanoPi NEO", ORANGE_PI_PINS)),
    ("friendlyarm,nanopi-neo2", board("NanoPi NEO2", ORANGE_PI_PINS)),
    ("friendlyarm,nanopi-m1", board("NanoPi M1", ORANGE_PI_PINS)),
    ("raspberrypi,model-zero-w", board("Raspberry Pi Zero W", RASPBERRY_PI_PINS)),
    ("raspberrypi,model-zero-2-w", board("Raspberry Pi Zero 2 W", RASPBERRY_PI_PINS)),
    ("raspberrypi,3-model-b", board("Raspberry Pi 3B", RASPBERRY_PI_PINS)),
    ("raspberrypi,3-model-b-plus", board("Raspberry Pi 3B+", RASPBERRY_PI_PINS)),
    ("raspberrypi,4-model-b", board("Raspberry Pi 4B", RASPBERRY_PI_PINS)),
    ("raspberrypi,5-model-b", board("Raspberry Pi 5", RASPBERRY_PI_PINS)),
];

static BUILTIN: LazyLock<BoardRegistry> = LazyLock::new(|| BoardRegistry::from_entries(BOARDS));

/// Read-only map from device-tree compatible string (`vendor,model`) to board.
///
/// Keys are matched exactly; there is no prefix or case-insensitive matching.
#[derive(Debug)]
pub struct BoardRegistry {
    boards: HashMap<&'static str, BoardConfig>,
}

impl BoardRegistry {
    fn from_entries(entries: &[(&'static str, BoardConfig)]) -> Self {
        Self {
            boards: entries.iter().copied().collect(),
        }
    }

    /// The table of every board this terminal supports.
    pub fn builtin() -> &'static BoardRegistry {
        &BUILTIN
    }

    pub fn lookup(&self, compatible: &str) -> Option<&BoardConfig> {
        self.boards.get(compatible)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &BoardConfig)> {
        self.boards.iter().map(|(key, board)| (*key, board))
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_key_round_trips() {
        let registry = BoardRegistry::builtin();
        assert_eq!(registry.len(), BOARDS.len());
        for (key, expected) in BOARDS {
            assert_eq!(registry.lookup(key), Some(expected), "lookup({key})");
        }
    }

    #[test]
    fn registry_pins_are_wired_and_distinct() {
        for (key, board) in BoardRegistry::builtin().iter() {
            assert!(board.has_gpio, "{key} should expose GPIO");
            let numbers = board.pins.numbers();
            assert!(numbers.iter().all(|n| *n >= 0), "{key} has an unwired pin");
            let unique: HashSet<_> = numbers.iter().collect();
            assert_eq!(unique.len(), 3, "{key} reuses a pin number");
        }
    }

    #[test]
    fn lookup_is_exact_match() {
        let registry = BoardRegistry::builtin();
        assert!(registry.lookup("xunlong,orangepi-one").is_some());
        assert!(registry.lookup("Xunlong,OrangePi-One").is_none());
        assert!(registry.lookup("xunlong,orangepi").is_none());
        assert!(registry.lookup(" xunlong,orangepi-one").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn variants_and_special_layouts() {
        let registry = BoardRegistry::builtin();
        let one = registry.lookup("xunlong,orangepi-one").unwrap();
        assert_eq!(one.variant, Some("OP0100"));
        assert_eq!(registry.lookup("xunlong,orangepi-pc").unwrap().variant, Some("OP0600"));
        assert_eq!(registry.lookup("xunlong,orangepi-5").unwrap().variant, None);

        let zero3 = registry.lookup("xunlong,orangepi-zero3").unwrap();
        assert_eq!(zero3.pins.numbers(), [229, 228, 73]);

        let pi4 = registry.lookup("raspberrypi,4-model-b").unwrap();
        assert_eq!(pi4.name, "Raspberry Pi 4B");
        assert_eq!(pi4.pins.relay_pin, 3);
        assert_eq!(pi4.pins.relay_active, ActiveLevel::High);
    }

    #[test]
    fn generic_board_is_unwired() {
        let generic = BoardConfig::GENERIC_X86;
        assert!(!generic.has_gpio);
        assert_eq!(generic.pins.numbers(), [UNWIRED_PIN; 3]);
        assert_eq!(generic.pins.coin_edge, Edge::Rising);
        assert_eq!(generic.pins.bill_edge, Edge::Falling);
    }
}
