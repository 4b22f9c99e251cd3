//! Sensor classification
//!
//! Splits the samples of one message into the buckets a layout draws.

use alloc::vec::Vec;

use crate::config::LayoutMode;
use crate::snapshot::SensorSample;

/// Category of the samples drawn in the primary region
pub const PRIMARY_CATEGORY: &str = "Load";

/// Component of the samples drawn in the primary region
pub const PRIMARY_COMPONENT: &str = "CPU";

/// Screen region a bucket is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BucketId {
    /// Whole screen (DataGrid)
    All,
    /// Left region: CPU load sensors
    Primary,
    /// Right region: everything else
    Secondary,
}

/// Samples of one message, grouped by region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub all: Vec<SensorSample>,
    pub primary: Vec<SensorSample>,
    pub secondary: Vec<SensorSample>,
}

impl Buckets {
    pub fn get(&self, id: BucketId) -> &[SensorSample] {
        match id {
            BucketId::All => &self.all,
            BucketId::Primary => &self.primary,
            BucketId::Secondary => &self.secondary,
        }
    }

    /// Number of samples across all buckets
    pub fn len(&self) -> usize {
        self.all.len() + self.primary.len() + self.secondary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sort the primary and secondary buckets by ascending `order`
    ///
    /// The sort is stable: samples sharing an order keep arrival order.
    pub fn sort_by_order(&mut self) {
        self.primary.sort_by_key(|s| s.order);
        self.secondary.sort_by_key(|s| s.order);
    }
}

/// Whether a sample belongs in the primary region
pub fn is_primary(sample: &SensorSample) -> bool {
    sample.category == PRIMARY_CATEGORY && sample.component_name == PRIMARY_COMPONENT
}

/// Assign samples to buckets for `layout`
///
/// Without a recognized layout every bucket stays empty.
pub fn classify(samples: Vec<SensorSample>, layout: Option<LayoutMode>) -> Buckets {
    let mut buckets = Buckets::default();
    match layout {
        Some(LayoutMode::DataGrid) => buckets.all = samples,
        Some(LayoutMode::PrimaryDashboard | LayoutMode::PrimaryDials) => {
            let (primary, secondary) = samples.into_iter().partition(is_primary);
            buckets.primary = primary;
            buckets.secondary = secondary;
        }
        None => {}
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample;

    fn samples() -> Vec<SensorSample> {
        alloc::vec![
            sample("Core 0", "Load", "CPU", 2),
            sample("CPU Temp", "Temperature", "CPU", 1),
            sample("GPU Load", "Load", "GPU", 3),
            sample("Core 1", "load", "CPU", 1),
            sample("Core 2", "Load", "CPU", 1),
        ]
    }

    fn tags(bucket: &[SensorSample]) -> Vec<&str> {
        bucket.iter().map(|s| s.tag.as_str()).collect()
    }

    #[test]
    fn test_data_grid_takes_everything() {
        let buckets = classify(samples(), Some(LayoutMode::DataGrid));
        assert_eq!(buckets.all.len(), 5);
        assert!(buckets.primary.is_empty());
        assert!(buckets.secondary.is_empty());
    }

    #[test]
    fn test_split_is_exact_match() {
        for layout in [LayoutMode::PrimaryDashboard, LayoutMode::PrimaryDials] {
            let buckets = classify(samples(), Some(layout));
            assert!(buckets.all.is_empty());
            assert_eq!(tags(&buckets.primary), ["Core 0", "Core 2"]);
            assert_eq!(tags(&buckets.secondary), ["CPU Temp", "GPU Load", "Core 1"]);
        }
    }

    #[test]
    fn test_unknown_layout_leaves_buckets_empty() {
        let buckets = classify(samples(), None);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_sort_is_stable() {
        let mut buckets = Buckets {
            primary: alloc::vec![
                sample("a", "Load", "CPU", 5),
                sample("b", "Load", "CPU", 1),
                sample("c", "Load", "CPU", 1),
            ],
            ..Default::default()
        };
        buckets.sort_by_order();
        assert_eq!(tags(&buckets.primary), ["b", "c", "a"]);
    }

    #[test]
    fn test_all_bucket_not_sorted() {
        let mut buckets = classify(samples(), Some(LayoutMode::DataGrid));
        buckets.sort_by_order();
        assert_eq!(buckets.all[0].tag, "Core 0");
    }
}
