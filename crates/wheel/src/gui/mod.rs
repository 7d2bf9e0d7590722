pub mod app;
pub mod canvas;

pub const APP_ID: &str = "org.tickwheel.wheel";
pub const TITLE: &str = "Wheel";
pub const DEFAULT_WIDTH: i32 = 480;
