// piso-wifi: coin-operated WiFi terminal host

pub mod config;
pub mod hardware;
pub mod web;
