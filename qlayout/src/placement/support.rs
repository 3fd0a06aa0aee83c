use qgeom::intersect::polygons_intersect;
use qgeom::transform::{Transform, Transformation};
use qgeom::{Point, Polygon, Rect};

use super::Placement;
use crate::config::PlacementConfig;

/// The support rectangle of a placed element.
///
/// Spans `support_length` along the path tangent and `support_width` across it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Support {
    pub(crate) placement: Placement,
    outline: Polygon,
}

impl Support {
    pub(crate) fn new(placement: Placement, cfg: &PlacementConfig) -> Self {
        let outline = Rect::from_center_dims(Point::zero(), cfg.support_length, cfg.support_width)
            .to_polygon()
            .transform(Transformation::with_loc_and_angle(
                placement.position,
                placement.rotation,
            ));
        Self { placement, outline }
    }

    #[inline]
    pub(crate) fn conflicts_with(&self, other: &Support) -> bool {
        polygons_intersect(&self.outline, &other.outline)
    }
}
