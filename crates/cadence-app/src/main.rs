use cadence_app::input::read_calendar;
use cadence_app::report::render;
use cadence_core::config::load_config;
use cadence_schedule::Event;
use chrono::{TimeDelta, Utc};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;
    config.validate()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let path = std::env::args().nth(1);
    let text = read_calendar(path.as_deref())?;
    let event = Event::from_ical(&text, Some(&config.schedule.timezone))?;

    let now = Utc::now();
    let until = now + TimeDelta::days(i64::from(config.schedule.lookahead_days));

    print!("{}", render(&event, now, until));

    Ok(())
}
