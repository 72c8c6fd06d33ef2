use super::math::{intervals_overlap, project_polygon_to_axis};
use super::polygon::WorldPolygon;
use super::types::Vec2;

// Separating-axis overlap test between two world-positioned convex
// polygons. Only the first polygon's cached axes are consulted: the
// shapes in this engine all come from the same regular-polygon routine,
// so their axis sets are comparable and the one-sided check suffices.
// Do not reuse this for arbitrary convex pairs without adding the second
// polygon's axes.
pub fn sat_collision(a: WorldPolygon<'_>, b: WorldPolygon<'_>) -> bool {
    let Some(normals) = a.polygon.normals.as_ref() else {
        // A polygon without cached normals was never finalized for
        // physics; report no contact rather than guessing.
        tracing::warn!("collision query against a polygon with no cached normals");
        return false;
    };

    let a_vertices: Vec<Vec2> = a
        .polygon
        .points
        .iter()
        .map(|point| *point + a.world_coordinates)
        .collect();
    let b_vertices: Vec<Vec2> = b
        .polygon
        .points
        .iter()
        .map(|point| *point + b.world_coordinates)
        .collect();

    for axis in normals {
        let a_projection = project_polygon_to_axis(&a_vertices, *axis);
        let b_projection = project_polygon_to_axis(&b_vertices, *axis);
        if !intervals_overlap(a_projection, b_projection) {
            // One separating axis is enough to rule out contact.
            return false;
        }
    }

    true
}
