//! Human-readable text output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, Report};

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        match report {
            Report::Places { places } => {
                if places.is_empty() {
                    output.push_str("No matches\n");
                }
                for (i, place) in places.iter().enumerate() {
                    output.push_str(&format!(
                        "{}. {} ({})\n",
                        i + 1,
                        place.display_name,
                        place.coordinate
                    ));
                }
            }
            Report::Distance { from, to, distance } => {
                output.push_str(&format!("From: {}\n", from));
                output.push_str(&format!("To: {}\n", to));
                output.push_str(&format!(
                    "Distance: {} ({:.1} m)\n",
                    distance.display_km(),
                    distance.meters
                ));
            }
            Report::Route { route } => {
                output.push_str(&format!("From: {}\n", route.origin.display_name));
                output.push_str(&format!("To: {}\n", route.destination.display_name));
                output.push_str(&format!("Mode: {}\n", route.mode));
                output.push_str(&format!("Distance: {}\n", route.distance.display_km()));
                output.push_str(&format!("Duration: {:.0} min\n", route.duration_minutes()));
            }
            Report::Nearby {
                origin,
                origin_name,
                radius_meters,
                results,
            } => {
                match origin_name {
                    Some(name) => output.push_str(&format!("Origin: {} ({})\n", name, origin)),
                    None => output.push_str(&format!("Origin: {}\n", origin)),
                }
                output.push_str(&format!("Radius: {}m\n\n", radius_meters));

                if results.is_empty() {
                    output.push_str("Nothing in range\n");
                }
                for r in results {
                    let label = if r.candidate.name.is_empty() {
                        r.candidate.id.as_str()
                    } else {
                        r.candidate.name.as_str()
                    };
                    output.push_str(&format!("  {:>8}  {}", r.distance.display_km(), label));
                    if let Some(category) = &r.candidate.category {
                        output.push_str(&format!(" [{}]", category));
                    }
                    output.push('\n');
                }
            }
        }

        Ok(output)
    }
}
