//! Similarity -> visual edge length

use crate::config::GraphConfig;

/// Map a similarity onto an edge length.
///
/// `[threshold, 1.0]` is rescaled linearly onto `[max_length, min_length]`,
/// so more similar pairs sit closer together. The result is truncated toward
/// zero. A threshold of 1.0 or more leaves nothing to rescale and yields
/// `min_length`.
pub fn edge_length(similarity: f64, threshold: f64, config: &GraphConfig) -> u32 {
    if 1.0 - threshold <= 0.0 {
        return config.min_length;
    }

    let min = f64::from(config.min_length);
    let max = f64::from(config.max_length);

    let normalized = (similarity - threshold) / (1.0 - threshold);
    let length = max - normalized * (max - min);
    length.trunc() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_and_midpoint() {
        let config = GraphConfig::default();
        assert_eq!(edge_length(1.0, 0.75, &config), 50);
        assert_eq!(edge_length(0.75, 0.75, &config), 200);
        assert_eq!(edge_length(0.875, 0.75, &config), 125);
    }

    #[test]
    fn test_truncates() {
        let config = GraphConfig::default();
        // 200 - 0.25 * 150 = 162.5
        assert_eq!(edge_length(0.8125, 0.75, &config), 162);
        // 200 - 0.01 * 150 = 198.5
        assert_eq!(edge_length(0.7525, 0.75, &config), 198);
        // 200 - 0.996 * 150 = 50.6
        assert_eq!(edge_length(0.999, 0.75, &config), 50);
    }

    #[test]
    fn test_degenerate_threshold() {
        let config = GraphConfig::default();
        assert_eq!(edge_length(1.0, 1.0, &config), 50);
        assert_eq!(edge_length(0.3, 1.5, &config), 50);
    }

    #[test]
    fn test_zero_threshold_for_rescue_links() {
        let config = GraphConfig::default();
        assert_eq!(edge_length(0.0, 0.0, &config), 200);
        assert_eq!(edge_length(0.5, 0.0, &config), 125);
        // Negative similarity stretches past max_length but stays positive
        assert_eq!(edge_length(-0.2, 0.0, &config), 230);
    }

    #[test]
    fn test_custom_lengths() {
        let config = GraphConfig::default().with_lengths(10, 110);
        assert_eq!(edge_length(1.0, 0.5, &config), 10);
        assert_eq!(edge_length(0.5, 0.5, &config), 110);
        assert_eq!(edge_length(0.75, 0.5, &config), 60);
    }
}
