pub mod config;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod nav;
pub mod schedule;
pub mod scroller;
pub mod service;

pub use config::{AppConfig, ScrollConfig};
pub use error::{Error, Result};
pub use motion::{FixedPreference, MotionPreference};
pub use nav::{FlatRow, NavLink, NavNode, NavSection, NavTree, ScrollState};
pub use scroller::{adjust_scroll_to_active, Adjustment};
pub use service::{NavSignal, Readiness, ScrollerService};
