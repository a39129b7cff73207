//! Descriptor alignment: turns a sparse, unordered descriptor map into
//! the dense, ordered vector a classifier was trained against.
//!
//! The classifiers are keyed to a fixed feature-name order; reordering
//! desyncs feature meaning from position and yields silently wrong
//! predictions. Alignment is the only guard for that invariant.

use crate::config::DESCRIPTOR_CLIP;

use super::types::DescriptorMap;

/// Align `descriptors` to `feature_order`. Applied in this order:
///
/// 1. Empty descriptors or empty feature order → `None`.
/// 2. NaN values are replaced with the mean of the finite values present
///    (not zero, which would bias the classifier's input scale).
/// 3. Every value is clipped to `[-DESCRIPTOR_CLIP, DESCRIPTOR_CLIP]`.
/// 4. Re-index to `feature_order`: features missing from the map get 0,
///    descriptors absent from the order are dropped.
pub fn align(descriptors: &DescriptorMap, feature_order: &[String]) -> Option<Vec<f64>> {
    if descriptors.is_empty() || feature_order.is_empty() {
        return None;
    }

    let finite: Vec<f64> = descriptors
        .values()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    let mean = if finite.is_empty() {
        0.0
    } else {
        finite.iter().sum::<f64>() / finite.len() as f64
    };

    let vector = feature_order
        .iter()
        .map(|name| match descriptors.get(name) {
            Some(value) => {
                let filled = if value.is_nan() { mean } else { *value };
                filled.clamp(-DESCRIPTOR_CLIP, DESCRIPTOR_CLIP)
            }
            None => 0.0,
        })
        .collect();

    Some(vector)
}
