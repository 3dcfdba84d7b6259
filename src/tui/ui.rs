use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::layout::{HorizontalAnchor as H, LayoutGeometry, Region, VerticalAnchor as V};
use crate::core::state::{Location, WeatherSnapshot};
use crate::tui::component::Component;
use crate::tui::components::{Field, RegionPanel, StatusLine, Tone};

const PLACEHOLDER: &str = "--";

/// Everything one frame needs. Built fresh by the loop every tick.
pub struct RenderProps<'a> {
    pub location: &'a Location,
    pub snapshot: Option<&'a WeatherSnapshot>,
    pub geometry: &'a LayoutGeometry,
    pub spinner: &'a str,
    pub verbose: bool,
    /// Shown on the status line in verbose mode.
    pub diagnostic: &'a str,
}

pub fn draw_dashboard(frame: &mut Frame, props: &RenderProps) {
    let fields = region_fields(props);
    for (region, fields) in props.geometry.regions.iter().zip(fields) {
        RegionPanel::new(fields).render(frame, to_rect(region));
    }

    if props.verbose
        && let Some(status) = props.geometry.status_line
    {
        StatusLine {
            text: props.diagnostic,
        }
        .render(frame, to_rect(&status));
    }
}

/// The nine fields, grouped left / center / right.
pub fn region_fields(props: &RenderProps) -> [Vec<Field>; 3] {
    let snapshot = props.snapshot;
    let label = |f: fn(&WeatherSnapshot) -> String| {
        snapshot.map(f).unwrap_or_else(|| PLACEHOLDER.to_string())
    };

    let left = vec![
        Field::new(V::Top, H::Left, props.location.display_name(), Tone::Primary),
        Field::new(V::Top, H::Right, props.spinner, Tone::Accent),
        Field::new(V::Bottom, H::Left, label(WeatherSnapshot::status_label), Tone::Secondary),
    ];
    let center = vec![
        Field::new(V::Top, H::Center, label(WeatherSnapshot::temperature_label), Tone::Primary),
        Field::new(V::Bottom, H::Left, label(WeatherSnapshot::wind_label), Tone::Secondary),
        Field::new(V::Bottom, H::Right, label(WeatherSnapshot::humidity_label), Tone::Secondary),
    ];
    let right = vec![
        Field::new(V::Top, H::Right, props.location.ip.as_str(), Tone::Primary),
        Field::new(V::Top, H::Left, props.spinner, Tone::Accent),
        Field::new(V::Bottom, H::Right, label(WeatherSnapshot::updated_label), Tone::Secondary),
    ];
    [left, center, right]
}

fn to_rect(region: &Region) -> Rect {
    Rect::new(region.x, region.y, region.width, region.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::compute;
    use crate::test_support::{sample_location, sample_snapshot};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    fn draw(width: u16, height: u16, verbose: bool, snapshot: Option<&WeatherSnapshot>) -> Buffer {
        let location = sample_location();
        let geometry = compute(width, height);
        let diagnostic = location.diagnostic_json();
        let props = RenderProps {
            location: &location,
            snapshot,
            geometry: &geometry,
            spinner: "/",
            verbose,
            diagnostic: &diagnostic,
        };
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_dashboard(f, &props)).unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_nine_fields_at_their_anchors() {
        let snapshot = sample_snapshot(14);
        let buffer = draw(90, 4, false, Some(&snapshot));
        let top = row_text(&buffer, 0);
        let bottom = row_text(&buffer, 1);

        // Region 1: columns 0..30
        assert_eq!(&top.chars().skip(1).take(6).collect::<String>(), "SF, CA");
        assert_eq!(buffer[(28, 0)].symbol(), "/");
        assert_eq!(&bottom.chars().skip(1).take(9).collect::<String>(), "Clear sky");

        // Region 2: columns 30..60; "61.5 °F" is 7 wide → 30 + 15 - 3
        assert_eq!(&top.chars().skip(42).take(7).collect::<String>(), "61.5 °F");
        assert_eq!(&bottom.chars().skip(31).take(7).collect::<String>(), "4.1 m/s");
        // "72 %" right-anchored: 30 + 30 - 1 - 4
        assert_eq!(&bottom.chars().skip(55).take(4).collect::<String>(), "72 %");

        // Region 3: columns 60..90
        assert_eq!(buffer[(61, 0)].symbol(), "/");
        assert_eq!(&top.chars().skip(82).take(7).collect::<String>(), "1.2.3.4");
        assert!(bottom.ends_with("Updated: 09:14:00 AM┘"));
    }

    #[test]
    fn test_borders_drawn_for_each_region() {
        let snapshot = sample_snapshot(0);
        let buffer = draw(90, 2, false, Some(&snapshot));
        for x in [0u16, 30, 60] {
            assert_eq!(buffer[(x, 0)].symbol(), "┌");
            assert_eq!(buffer[(x, 1)].symbol(), "└");
            assert_eq!(buffer[(x + 29, 0)].symbol(), "┐");
            assert_eq!(buffer[(x + 29, 1)].symbol(), "┘");
        }
    }

    #[test]
    fn test_placeholders_without_snapshot() {
        let buffer = draw(90, 2, false, None);
        let bottom = row_text(&buffer, 1);
        assert_eq!(&bottom.chars().skip(1).take(2).collect::<String>(), "--");
        assert_eq!(&row_text(&buffer, 0).chars().skip(44).take(2).collect::<String>(), "--");
    }

    #[test]
    fn test_verbose_writes_location_json_on_status_line() {
        let snapshot = sample_snapshot(0);
        let quiet = draw(200, 4, false, Some(&snapshot));
        assert_eq!(row_text(&quiet, 2).trim(), "");

        let verbose = draw(200, 4, true, Some(&snapshot));
        let line = row_text(&verbose, 2);
        assert!(line.starts_with(&sample_location().diagnostic_json()));
    }

    #[test]
    fn test_verbose_without_room_is_skipped() {
        let snapshot = sample_snapshot(0);
        // Two rows: no status line, must not panic
        let buffer = draw(90, 2, true, Some(&snapshot));
        assert_eq!(buffer.area.height, 2);
    }

    #[test]
    fn test_render_is_idempotent() {
        let snapshot = sample_snapshot(30);
        assert_eq!(draw(100, 5, true, Some(&snapshot)), draw(100, 5, true, Some(&snapshot)));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let snapshot = sample_snapshot(30);
        draw(2, 1, true, Some(&snapshot));
    }
}
