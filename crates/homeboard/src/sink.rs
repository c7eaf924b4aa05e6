//! Minimal stand-in for the real display surface: renders each published
//! update as lines on stdout. The actual dashboard UI is an external
//! collaborator; anything implementing `DisplaySink` can replace this.

use homeboard_commute::RouteOption;
use homeboard_panels::{DisplaySink, PanelUpdate};
use homeboard_weather::icon_url;

pub struct TerminalSink;

impl DisplaySink for TerminalSink {
    fn publish(&self, panel: &str, update: PanelUpdate) {
        match update {
            PanelUpdate::Clock(time) => println!("[{panel}] {time}"),
            PanelUpdate::Weather(record) => {
                println!(
                    "[{panel}] {} {} | {} | {}",
                    record.temperature_text(),
                    record.description,
                    record.wind_text(),
                    icon_url(&record.icon_code),
                );
            }
            PanelUpdate::Forecast(record) => {
                println!(
                    "[{panel}] {} ({}) {} | {} | {}",
                    record.temperature_text(),
                    record.high_low_text(),
                    record.description,
                    record.wind_text(),
                    icon_url(&record.icon_code),
                );
            }
            PanelUpdate::Commute(routes) => render_routes(panel, &routes),
        }
    }
}

fn render_routes(panel: &str, routes: &[RouteOption]) {
    if routes.is_empty() {
        println!("[{panel}] no routes");
        return;
    }
    for route in routes {
        println!("[{panel}] {}: {}", route.label, route.duration_text);
    }
}
