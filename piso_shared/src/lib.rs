// piso_shared: board table, GPIO traits and auth types shared by the terminal host

pub mod auth_backend;
pub mod board_config;
pub mod hardware_traits;

pub use auth_backend::{AuthBackend, InMemoryAuthBackend};
pub use board_config::{ActiveLevel, BoardConfig, BoardRegistry, Edge, PinConfig, UNWIRED_PIN};
pub use hardware_traits::{Direction, LogicLevel, PinController};
