pub mod cursor;
pub mod geometry;
pub mod ipc;
pub mod label;
pub mod layout;
pub mod render;
pub mod theme;
pub mod ticks;
pub mod wheel;

pub use layout::{Padding, TextExtent, TextMetrics};
pub use render::{Surface, render};
pub use theme::{Theme, ThemeColors};
pub use wheel::{Wheel, WheelListener, WheelOptions};
