use canteen_core::interact::{MapPin, MapRenderer, MapSession};
use canteen_core::{Point, Result};
use std::fs;

/// Writes the campus map with a user pin and labeled canteen pins as an SVG
/// file at the session's output path.
#[derive(Default)]
pub struct SvgRenderer;

impl MapRenderer for SvgRenderer {
    fn render(&mut self, session: &mut MapSession, user: Point, pins: &[MapPin]) -> Result<()> {
        let svg = overlay(session, user, pins);
        fs::write(session.output(), svg)?;
        tracing::info!(path = %session.output().display(), pins = pins.len(), "map overlay written");
        println!("Map written to {}", session.output().display());
        Ok(())
    }
}

fn overlay(session: &MapSession, user: Point, pins: &[MapPin]) -> String {
    let (w, h) = (session.width(), session.height());
    let mut out = vec![
        format!(r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#),
        format!(
            r#"  <image x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="none" xlink:href="{}"/>"#,
            escape(&session.image().to_string_lossy())
        ),
    ];
    for pin in pins {
        out.push(format!(
            r##"  <circle cx="{}" cy="{}" r="8" fill="#e4572e" stroke="#000"/>"##,
            pin.point.x, pin.point.y
        ));
        out.push(format!(
            r#"  <text x="{}" y="{}" font-family="Arial" font-size="10" text-anchor="middle" fill="white" stroke="black" stroke-width="0.3">{}</text>"#,
            pin.point.x,
            pin.point.y - 14,
            escape(&pin.label)
        ));
    }
    out.push(format!(
        r##"  <circle cx="{}" cy="{}" r="9" fill="#2e86de" stroke="#fff" stroke-width="2"/>"##,
        user.x, user.y
    ));
    out.push("</svg>".to_string());
    out.join("\n")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_core::config::MapSettings;

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape(r#"Fine & "Good" <Food>"#), "Fine &amp; &quot;Good&quot; &lt;Food&gt;");
    }

    #[test]
    fn overlay_contains_every_pin() {
        let session = MapSession::open(&MapSettings::default());
        let pins = vec![
            MapPin { label: "Canteen 1 (12m)".into(), point: Point::new(100, 200), distance: 12.3 },
            MapPin { label: "Canteen 2 (40m)".into(), point: Point::new(300, 400), distance: 40.0 },
        ];
        let svg = overlay(&session, Point::new(110, 210), &pins);
        assert!(svg.contains("Canteen 1 (12m)"));
        assert!(svg.contains("Canteen 2 (40m)"));
        assert!(svg.contains(r#"width="620" height="750""#));
    }

    #[test]
    fn render_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = MapSettings { output: tmp.path().join("out.svg"), ..MapSettings::default() };
        let mut session = MapSession::open(&settings);
        session.render_with(&mut SvgRenderer, Point::new(1, 1), &[]).unwrap();
        assert_eq!(session.renders(), 1);
        assert!(tmp.path().join("out.svg").exists());
        session.close();
    }
}
