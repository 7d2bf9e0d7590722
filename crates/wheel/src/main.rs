use anyhow::Context;
use relm4::prelude::*;
use tickwheel::Wheel;
use wheel::config;
use wheel::gui::APP_ID;
use wheel::gui::app::AppModel;
use wheel::gui::canvas::CairoMetrics;
use wheel::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    if let Err(e) = config::write_default_config() {
        log::warn!("Could not write default config: {}", e);
    }
    let config = config::load_or_default();

    let metrics = CairoMetrics::new(&config.font).context("Failed to set up text metrics")?;
    let wheel = Wheel::new(config.wheel, Box::new(metrics));

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new(APP_ID);
    app.run::<AppModel>((wheel, config.font, rx));
    Ok(())
}
