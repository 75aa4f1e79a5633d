//! Arc profiles taken from DXF drawings.
//!
//! Only the first ARC entity of the ENTITIES section is used; other entity
//! kinds are skipped. Angles are kept in degrees as DXF stores them.
use crate::error::{Error, Result};
use crate::planner::ArcProfile;
use dxf::entities::EntityType;
use dxf::Drawing;
use log::debug;
use std::fs::File;
use std::path::Path;

/// First ARC of an already parsed drawing.
pub fn first_arc(drawing: &Drawing) -> Option<ArcProfile> {
    drawing.entities().find_map(|entity| match &entity.specific {
        EntityType::Arc(arc) => Some(ArcProfile {
            center: [arc.center.x, arc.center.y],
            radius: arc.radius,
            start_angle: arc.start_angle,
            end_angle: arc.end_angle,
        }),
        _ => None,
    })
}

/// Read the drawing at `path` and return its first ARC.
pub fn load_dxf_arc(path: &Path) -> Result<ArcProfile> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let drawing = Drawing::load(&mut file).map_err(|e| {
        Error::InvalidInput(format!("failed to parse DXF {}: {e}", path.display()))
    })?;
    let arc = first_arc(&drawing).ok_or_else(|| {
        Error::InvalidInput(format!("DXF {} contains no ARC entity", path.display()))
    })?;
    debug!("drawing: {} -> {arc:?}", path.display());
    Ok(arc)
}
