//! GPX output formatter
//!
//! Routes become a track; places and search results become waypoints.

use crate::coord::Coordinate;
use crate::error::Result;
use crate::format::{OutputFormatter, Report};

/// GPX formatter - outputs a GPX 1.1 document
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoints or route track"
    }

    fn format(&self, report: &Report) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="career-geo">"#);
        gpx.push('\n');

        match report {
            Report::Places { places } => {
                for place in places {
                    push_waypoint(&mut gpx, place.coordinate, &place.display_name, None);
                }
            }
            Report::Distance { from, to, distance } => {
                push_waypoint(&mut gpx, *from, "From", None);
                push_waypoint(&mut gpx, *to, "To", Some(&distance.display_km()));
            }
            Report::Route { route } => {
                push_waypoint(&mut gpx, route.origin.coordinate, &route.origin.display_name, None);
                push_waypoint(
                    &mut gpx,
                    route.destination.coordinate,
                    &route.destination.display_name,
                    None,
                );

                gpx.push_str("  <trk>\n");
                gpx.push_str(&format!(
                    "    <name>{} to {}</name>\n",
                    escape(&route.origin.display_name),
                    escape(&route.destination.display_name)
                ));
                gpx.push_str(&format!(
                    "    <desc>{}, {}, {:.0} min</desc>\n",
                    route.mode,
                    route.distance.display_km(),
                    route.duration_minutes()
                ));
                gpx.push_str("    <trkseg>\n");
                for point in &route.geometry {
                    gpx.push_str(&format!(
                        "      <trkpt lat=\"{}\" lon=\"{}\"/>\n",
                        point.lat, point.lng
                    ));
                }
                gpx.push_str("    </trkseg>\n");
                gpx.push_str("  </trk>\n");
            }
            Report::Nearby {
                origin,
                origin_name,
                radius_meters,
                results,
            } => {
                push_waypoint(
                    &mut gpx,
                    *origin,
                    origin_name.as_deref().unwrap_or("Origin"),
                    Some(&format!("Search origin, radius: {}m", radius_meters)),
                );
                for r in results {
                    let name = if r.candidate.name.is_empty() {
                        &r.candidate.id
                    } else {
                        &r.candidate.name
                    };
                    let desc = r.distance.display_km();
                    push_waypoint(&mut gpx, r.candidate.coordinate, name, Some(&desc));
                }
            }
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

fn push_waypoint(gpx: &mut String, at: Coordinate, name: &str, desc: Option<&str>) {
    gpx.push_str(&format!(r#"  <wpt lat="{}" lon="{}">"#, at.lat, at.lng));
    gpx.push('\n');
    gpx.push_str(&format!("    <name>{}</name>\n", escape(name)));
    if let Some(desc) = desc {
        gpx.push_str(&format!("    <desc>{}</desc>\n", escape(desc)));
    }
    gpx.push_str("  </wpt>\n");
}

/// Escape XML text content
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
