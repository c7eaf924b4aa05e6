//! Refresh orchestration for the dashboard panels.
//!
//! A table of panels (name + interval + bound operation) drives one
//! independent timer task per panel. Every tick invokes the panel's
//! operation and publishes the resulting record to the display sink; no
//! panel's failure or latency affects another.

pub mod panel;
pub mod scheduler;
pub mod sink;

pub use panel::{Panel, PanelUpdate};
pub use scheduler::{Scheduler, SchedulerHandle};
pub use sink::DisplaySink;
