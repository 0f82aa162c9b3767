//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module     | Commands handled                                  |
//! |------------|---------------------------------------------------|
//! | `channels` | `Channels Publish`                                |
//! | `rooms`    | `Rooms Messages Send`, `Rooms Reactions Send`     |
//! | `config`   | `Config`                                          |
//! | `send`     | shared batch funnel behind the three send commands|

pub mod channels;
pub mod config;
pub mod rooms;
pub mod send;

pub use channels::cmd_publish;
pub use config::cmd_config;
pub use rooms::{cmd_send_message, cmd_send_reaction};
