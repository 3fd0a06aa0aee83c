//! Utilities for GDS conversion.
//!
//! Converts a [`Library`] to [`gds21`] structures.

use std::path::Path;

use derivative::Derivative;
use qgeom::{Point, Shape};

use crate::config::LayoutConfig;
use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};
use crate::io::write_atomic;
use crate::layout::cell::{Cell, Element, Instance};
use crate::layout::library::Library;

/// A GDSII exporter.
///
/// Converts a [`Library`] to a GDSII library ([`gds21::GdsLibrary`]).
/// User units are one micron; coordinates are rounded to database units.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct GdsExporter<'a> {
    #[derivative(Debug = "ignore")]
    lib: &'a Library,
    config: &'a LayoutConfig,
}

impl<'a> GdsExporter<'a> {
    pub fn new(lib: &'a Library, config: &'a LayoutConfig) -> Self {
        Self { lib, config }
    }

    /// Exports to a [`gds21::GdsLibrary`].
    pub fn export_lib(&self) -> Result<gds21::GdsLibrary> {
        let mut gdslib = gds21::GdsLibrary::new(self.lib.top().name().as_str());
        gdslib.units = gds21::GdsUnits::new(
            self.config.db_unit / self.config.user_unit,
            self.config.db_unit,
        );
        for cell in self.lib.chips() {
            gdslib.structs.push(self.export_cell(cell)?);
        }
        gdslib.structs.push(self.export_cell(self.lib.top())?);
        Ok(gdslib)
    }

    /// Converts a [`Cell`] to a [`gds21::GdsStruct`] cell definition.
    fn export_cell(&self, cell: &Cell) -> Result<gds21::GdsStruct> {
        let mut elems = Vec::new();
        for inst in cell.insts() {
            elems.push(gds21::GdsElement::GdsStructRef(self.export_instance(inst)?));
        }
        for elem in cell.elems() {
            if let Some(e) = self.export_element(elem)? {
                elems.push(e);
            }
        }
        let mut strukt = gds21::GdsStruct::new(cell.name().as_str());
        strukt.elems = elems;
        Ok(strukt)
    }

    fn export_instance(&self, inst: &Instance) -> Result<gds21::GdsStructRef> {
        Ok(gds21::GdsStructRef {
            name: inst.cell.to_string().into(),
            xy: self.export_point(inst.loc)?,
            ..Default::default()
        })
    }

    /// Converts an [`Element`] to a [`gds21::GdsBoundary`].
    ///
    /// GDS boundaries include an explicit repetition of their origin for closure.
    /// So an N-sided polygon is described by a (N+1)-point vector.
    /// Shapes with fewer than three vertices are dropped.
    fn export_element(&self, elem: &Element) -> Result<Option<gds21::GdsElement>> {
        let poly = match &elem.inner {
            Shape::Rect(r) => r.to_polygon(),
            Shape::Polygon(p) => p.clone(),
        };
        if poly.points.len() < 3 {
            return Ok(None);
        }
        let mut xy = poly
            .points
            .iter()
            .map(|p| self.export_point(*p))
            .collect::<Result<Vec<_>>>()?;
        xy.push(xy[0].clone());
        Ok(Some(gds21::GdsElement::GdsBoundary(gds21::GdsBoundary {
            layer: elem.layer.layer,
            datatype: elem.layer.datatype,
            xy,
            ..Default::default()
        })))
    }

    fn export_point(&self, p: Point) -> Result<gds21::GdsPoint> {
        let scale = self.config.db_per_user();
        let convert = |v: f64| -> Result<i32> {
            let scaled = (v * scale).round();
            if scaled.is_finite() && scaled >= i32::MIN as f64 && scaled <= i32::MAX as f64 {
                Ok(scaled as i32)
            } else {
                Err(ErrorSource::Gds(format!("coordinate {v} does not fit in a GDS point")).into())
            }
        };
        Ok(gds21::GdsPoint::new(convert(p.x)?, convert(p.y)?))
    }
}

impl Library {
    /// Converts the library to a GDSII library.
    pub fn to_gds_lib(&self, config: &LayoutConfig) -> Result<gds21::GdsLibrary> {
        with_err_context(GdsExporter::new(self, config).export_lib(), || {
            ErrorContext::Task(arcstr::literal!("converting library to GDS"))
        })
    }

    /// Saves the library to a GDS file.
    ///
    /// The file is written in full to a scratch location first;
    /// `path` is never left partially written.
    pub fn save_gds(&self, path: impl AsRef<Path>, config: &LayoutConfig) -> Result<()> {
        let gdslib = self.to_gds_lib(config)?;
        write_atomic(path, |staged| {
            gdslib
                .save(staged)
                .map_err(|e| ErrorSource::Gds(format!("{e:?}")))?;
            Ok(())
        })
    }
}
