//! Visibility tracking for registered regions of a scrollable area
//!
//! A [`VisibilityObserver`] is given the row spans of a set of regions and
//! is fed the current viewport each time it moves. It reports the regions
//! whose visibility changed, where "visible" means at least `threshold` of
//! the region's rows are inside the viewport.
//!
//! Only state changes are reported; callers re-evaluate what is on screen
//! when something crossed the threshold and otherwise leave their state
//! alone.

/// Fraction of a region that must be on screen to count as visible
pub const VISIBILITY_THRESHOLD: f32 = 0.3;

/// Row span of one region in content coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: usize,
    pub height: usize,
}

impl Region {
    pub fn new(top: usize, height: usize) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    /// Fraction of this region's rows inside the viewport
    pub fn visible_ratio(&self, viewport: Viewport) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        let top = self.top.max(viewport.offset);
        let bottom = self.bottom().min(viewport.offset + viewport.height);
        bottom.saturating_sub(top) as f32 / self.height as f32
    }
}

/// Visible window of the scrollable area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

/// A region crossed the visibility threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    /// Index into the observed regions
    pub index: usize,
    pub is_visible: bool,
}

#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f32,
    regions: Vec<Region>,
    visible: Vec<bool>,
}

impl VisibilityObserver {
    /// Start observing `regions`; nothing is considered visible yet
    pub fn new(threshold: f32, regions: Vec<Region>) -> Self {
        let visible = vec![false; regions.len()];
        Self {
            threshold,
            regions,
            visible,
        }
    }

    /// Feed the current viewport and collect regions whose visibility changed
    pub fn observe(&mut self, viewport: Viewport) -> Vec<VisibilityChange> {
        let mut changes = Vec::new();
        for (index, region) in self.regions.iter().enumerate() {
            let is_visible = region.visible_ratio(viewport) >= self.threshold;
            if is_visible != self.visible[index] {
                self.visible[index] = is_visible;
                changes.push(VisibilityChange { index, is_visible });
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_regions() -> VisibilityObserver {
        // Rows: [0,10) [10,20) [20,30)
        VisibilityObserver::new(
            VISIBILITY_THRESHOLD,
            vec![Region::new(0, 10), Region::new(10, 10), Region::new(20, 10)],
        )
    }

    #[test]
    fn visible_ratio_clips_to_viewport() {
        let region = Region::new(10, 10);
        let vp = |offset, height| Viewport { offset, height };
        assert_eq!(region.visible_ratio(vp(0, 10)), 0.0);
        assert_eq!(region.visible_ratio(vp(0, 13)), 0.3);
        assert_eq!(region.visible_ratio(vp(12, 100)), 0.8);
        assert_eq!(Region::new(5, 0).visible_ratio(vp(0, 100)), 0.0);
    }

    #[test]
    fn first_observation_reports_everything_on_screen() {
        let mut observer = three_regions();
        let changes = observer.observe(Viewport {
            offset: 0,
            height: 14,
        });
        // Region 1 shows 4 of 10 rows: over the threshold
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].index, 0);
        assert!(changes.iter().all(|c| c.is_visible));
    }

    #[test]
    fn only_crossings_are_reported() {
        let mut observer = three_regions();
        observer.observe(Viewport {
            offset: 0,
            height: 10,
        });

        // Scroll so region 1 is still under threshold
        let changes = observer.observe(Viewport {
            offset: 2,
            height: 10,
        });
        assert!(changes.is_empty());

        // Region 1 crosses 30%, region 0 stays visible
        let changes = observer.observe(Viewport {
            offset: 3,
            height: 10,
        });
        assert_eq!(
            changes,
            vec![VisibilityChange {
                index: 1,
                is_visible: true
            }]
        );

        // Region 0 drops below threshold
        let changes = observer.observe(Viewport {
            offset: 8,
            height: 10,
        });
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].index, 0);
        assert!(!changes[0].is_visible);
    }
}
