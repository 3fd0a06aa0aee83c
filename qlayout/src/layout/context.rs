//! Context for drawing one component.

use std::f64::consts::PI;

use arcstr::ArcStr;
use qgeom::path::{dedup, strip, Path};
use qgeom::transform::{Transform, Transformation};
use qgeom::{Point, Polygon, Rect, Shape};

use super::cell::{Cell, Element};
use super::layers::LayerSpec;
use crate::config::LayoutConfig;

/// Context for creating the layout view of a [`Component`](crate::component::Component).
///
/// Shapes are collected on the default layer; the
/// [`LayoutBuilder`](super::builder::LayoutBuilder) moves them onto their chip's layer.
pub struct LayoutCtx<'a> {
    pub(crate) config: &'a LayoutConfig,
    pub(crate) cell: Cell,
}

impl<'a> LayoutCtx<'a> {
    pub fn new(name: impl Into<ArcStr>, config: &'a LayoutConfig) -> Self {
        Self {
            config,
            cell: Cell::new(name),
        }
    }

    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        self.config
    }

    /// Adds a shape to the cell being drawn.
    pub fn draw(&mut self, shape: impl Into<Shape>) {
        self.cell
            .add_element(Element::new(LayerSpec::default(), shape));
    }

    /// Adds a rectangle given in local coordinates, placed with `trans`.
    pub fn draw_rect_with(&mut self, rect: Rect, trans: Transformation) {
        self.draw(rect.to_polygon().transform(trans));
    }

    /// Adds a polygon given in local coordinates, placed with `trans`.
    pub fn draw_polygon_with(&mut self, points: Vec<Point>, trans: Transformation) {
        self.draw(Polygon::new(points).transform(trans));
    }

    /// Adds a discretized circle.
    pub fn draw_circle(&mut self, center: Point, radius: f64) {
        let n = self.config.arc_segments.max(3);
        let points = (0..n)
            .map(|i| {
                let theta = 2. * PI * i as f64 / n as f64;
                center + Point::new(radius, 0.).rotated_rad(theta)
            })
            .collect();
        self.draw(Polygon::new(points));
    }

    /// Adds the two gap strips of a coplanar waveguide along `points`.
    ///
    /// The centerline is filleted with `radius` first. The strips span from
    /// `width / 2` to `width / 2 + gap` on either side of the centerline.
    pub fn draw_cpw(&mut self, points: &[Point], width: f64, gap: f64, radius: f64) {
        let points = dedup(points);
        if points.len() < 2 {
            return;
        }
        let center = Path::new(points, width).fillet(radius, self.config.arc_step);
        let half = width / 2.;
        self.draw(strip(&center, half, half + gap));
        self.draw(strip(&center, -half - gap, -half));
    }

    pub fn into_cell(self) -> Cell {
        self.cell
    }
}

#[cfg(test)]
mod tests {
    use qgeom::bbox::BoundBox;

    use super::*;

    #[test]
    fn test_cpw_strips() {
        let cfg = LayoutConfig::default();
        let mut ctx = LayoutCtx::new("line", &cfg);
        ctx.draw_cpw(&[Point::new(0., 0.), Point::new(100., 0.)], 10., 6., 0.);
        let cell = ctx.into_cell();
        let elems: Vec<_> = cell.elems().collect();
        assert_eq!(elems.len(), 2);
        let upper = elems[0].inner.to_polygon();
        assert!(upper.contains(Point::new(50., 8.)));
        assert!(!upper.contains(Point::new(50., 0.)));
        let bbox = cell.bbox();
        assert_eq!(bbox.p0, Point::new(0., -11.));
        assert_eq!(bbox.p1, Point::new(100., 11.));
    }
}
