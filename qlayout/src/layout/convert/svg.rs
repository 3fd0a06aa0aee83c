//! SVG rendering of a [`Library`].

use std::fmt::Write;
use std::path::Path;

use qgeom::bbox::{Bbox, BoundBox};
use qgeom::Point;

use crate::error::{ErrorSource, Result};
use crate::io::write_string;
use crate::layout::library::Library;

const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Renders a [`Library`] as an SVG document of a given pixel width.
#[derive(Debug, Clone)]
pub struct SvgExporter<'a> {
    lib: &'a Library,
    width: f64,
}

impl<'a> SvgExporter<'a> {
    pub fn new(lib: &'a Library, width: f64) -> Self {
        Self { lib, width }
    }

    /// Produces the SVG text.
    ///
    /// Layout y grows upward while SVG y grows downward, so y is flipped.
    pub fn export(&self) -> Result<String> {
        let bbox = self.lib.bbox();
        if bbox.is_degenerate() {
            return Err(ErrorSource::GeometryDegenerate {
                width: bbox.width(),
                height: bbox.height(),
            }
            .into());
        }
        if !(self.width > 0.) {
            return Err(ErrorSource::InvalidOption(format!(
                "SVG width must be positive, got {}",
                self.width
            ))
            .into());
        }
        let scale = self.width / bbox.width();
        let height = bbox.height() * scale;

        let mut out = String::new();
        // Writing to a `String` cannot fail.
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            fmt_num(self.width),
            fmt_num(height),
            fmt_num(self.width),
            fmt_num(height)
        );
        for cell in self.lib.chips() {
            let _ = writeln!(out, r#"  <g id="{}">"#, escape(cell.name()));
            for elem in cell.elems() {
                let poly = elem.inner.to_polygon();
                if poly.points.len() < 3 {
                    continue;
                }
                let points = poly
                    .points
                    .iter()
                    .map(|p| {
                        let p = to_svg(*p, &bbox, scale);
                        format!("{},{}", fmt_num(p.x), fmt_num(p.y))
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                let color = PALETTE[elem.layer.layer.unsigned_abs() as usize % PALETTE.len()];
                let _ = writeln!(
                    out,
                    r#"    <polygon points="{points}" fill="{color}" fill-opacity="0.6" stroke="none"/>"#
                );
            }
            let _ = writeln!(out, "  </g>");
        }
        let _ = writeln!(out, "</svg>");
        Ok(out)
    }
}

fn to_svg(p: Point, bbox: &Bbox, scale: f64) -> Point {
    Point::new((p.x - bbox.p0.x) * scale, (bbox.p1.y - p.y) * scale)
}

fn fmt_num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Library {
    /// Renders the library as SVG text scaled to `width` user units.
    pub fn to_svg(&self, width: f64) -> Result<String> {
        SvgExporter::new(self, width).export()
    }

    /// Saves an SVG rendering of the library.
    pub fn save_svg(&self, path: impl AsRef<Path>, width: f64) -> Result<()> {
        let text = self.to_svg(width)?;
        write_string(path, &text)
    }
}

#[cfg(test)]
mod tests {
    use qgeom::Rect;

    use super::*;
    use crate::layout::cell::{Cell, Element};
    use crate::layout::layers::LayerSpec;

    #[test]
    fn test_svg_scaling_and_flip() {
        let mut lib = Library::new("design");
        let mut cell = Cell::new("chip0");
        cell.add_element(Element::new(
            LayerSpec::new(3, 0),
            Rect::new(Point::zero(), Point::new(200., 100.)),
        ));
        cell.add_element(Element::new(
            LayerSpec::new(3, 0),
            Rect::new(Point::new(0., 90.), Point::new(10., 100.)),
        ));
        lib.add_chip(cell).unwrap();

        let svg = lib.to_svg(400.).unwrap();
        assert!(svg.contains(r#"width="400" height="200""#));
        // The top-left square lands at the SVG origin.
        assert!(svg.contains(r#"points="0,20 20,20 20,0 0,0""#));
    }

    #[test]
    fn test_svg_degenerate() {
        let mut lib = Library::new("design");
        let mut cell = Cell::new("chip0");
        cell.add_element(Element::new(
            LayerSpec::new(3, 0),
            Rect::new(Point::zero(), Point::new(0., 10.)),
        ));
        lib.add_chip(cell).unwrap();
        assert!(matches!(
            lib.to_svg(100.).unwrap_err().into_inner(),
            ErrorSource::GeometryDegenerate { .. }
        ));
    }
}
