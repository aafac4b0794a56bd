//! Browser event wiring: pointer clicks resolve to hotspot navigation,
//! the movement key drives the forward-walk flag.

pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_movement_keys;
pub use pointer::wire_click_handler;
