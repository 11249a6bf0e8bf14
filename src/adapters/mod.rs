//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to            |
//! |------------|------------------|------------------------|
//! | `hardware` | PanelPort        | ESP32 GPIO outputs     |
//! |            | DisplayPort      | GPIO input + serial log|
//! | `log_sink` | EventSink        | Serial log output      |

pub mod hardware;
pub mod log_sink;
