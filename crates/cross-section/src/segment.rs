//! Boundary segmentation: contour rings to label candidates.

use tracing::debug;

use crate::types::{LineSegment, PolygonFeature};

/// Walk every ring of every feature and emit one segment per consecutive
/// point pair, tagged with the feature's band value.
///
/// A ring with `k` points yields `k - 1` segments; rings with fewer than two
/// points yield none. Segment ids follow emission order.
pub fn segment_rings(features: &[PolygonFeature]) -> Vec<LineSegment> {
    let capacity = features
        .iter()
        .flat_map(|f| f.rings.iter())
        .map(|r| r.len().saturating_sub(1))
        .sum();
    let mut segments = Vec::with_capacity(capacity);

    for feature in features {
        for ring in &feature.rings {
            for pair in ring.windows(2) {
                let id = segments.len();
                segments.push(LineSegment::new(id, pair[0], pair[1], feature.value));
            }
        }
    }

    debug!(
        features = features.len(),
        segments = segments.len(),
        "Segmented contour rings"
    );

    segments
}

/// Scale every ring coordinate, e.g. from grid-index space to drawing space.
pub fn scale_features(features: &[PolygonFeature], sx: f64, sy: f64) -> Vec<PolygonFeature> {
    features
        .iter()
        .map(|f| PolygonFeature {
            value: f.value,
            rings: f
                .rings
                .iter()
                .map(|ring| ring.iter().map(|p| p.scaled(sx, sy)).collect())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn test_ids_are_sequential_across_features() {
        let ring = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 0.0)];
        let features = vec![
            PolygonFeature::new(1.0, vec![ring.clone()]),
            PolygonFeature::new(2.0, vec![ring]),
        ];
        let segments = segment_rings(&features);
        let ids: Vec<usize> = segments.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(segments[3].value, 2.0);
    }

    #[test]
    fn test_scale_features() {
        let features = vec![PolygonFeature::new(
            3.0,
            vec![vec![Point::new(1.0, 2.0), Point::new(2.0, 4.0)]],
        )];
        let scaled = scale_features(&features, 10.0, 0.5);
        assert_eq!(scaled[0].rings[0][0], Point::new(10.0, 1.0));
        assert_eq!(scaled[0].rings[0][1], Point::new(20.0, 2.0));
        assert_eq!(scaled[0].value, 3.0);
    }
}
