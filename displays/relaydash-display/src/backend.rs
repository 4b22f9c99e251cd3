//! Display-list render target
//!
//! [`DisplayList`] applies dashboard instructions to a retained [`Screen`].
//! A driver task renders the screen whenever it is dirty.

use relaydash_core::config::{ConfigSnapshot, LayoutMode, Rgb};
use relaydash_core::layout::{BucketId, CellKind};
use relaydash_core::traits::{BucketUpdate, CellPass, GaugeId, RenderTarget};

use crate::screen::{Cell, Gauge, Region, Screen, GAUGE_MAX, GAUGE_MIN};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// No layout has been built yet
    NotBuilt,
    /// The current layout has no widget for the instruction
    RegionMissing,
}

/// Render target keeping the widget tree in memory
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    screen: Screen,
    text_color: Rgb,
    rebuilds: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Number of layouts built so far
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Text color given by the last rebuild
    pub fn text_color(&self) -> Rgb {
        self.text_color
    }

    fn built(&mut self) -> Result<&mut Screen, DisplayError> {
        match self.screen.layout() {
            Some(_) => Ok(&mut self.screen),
            None => Err(DisplayError::NotBuilt),
        }
    }
}

impl RenderTarget for DisplayList {
    type Error = DisplayError;

    fn show_splash(&mut self, text: &str) -> Result<(), DisplayError> {
        self.screen.show_splash(text);
        Ok(())
    }

    fn rebuild_layout(
        &mut self,
        mode: LayoutMode,
        config: &ConfigSnapshot,
    ) -> Result<(), DisplayError> {
        let primary = config.primary.grid;
        let secondary = config.secondary.grid;

        self.screen.reset_layout(mode, mode.is_split());
        match mode {
            LayoutMode::DataGrid => {
                self.screen.add_region(Region::new(
                    BucketId::All,
                    CellKind::LabelValue,
                    secondary.rows(),
                    secondary.cols(),
                ));
            }
            LayoutMode::PrimaryDashboard | LayoutMode::PrimaryDials => {
                let secondary_kind = match mode {
                    LayoutMode::PrimaryDials => CellKind::RadialGauge,
                    _ => CellKind::LabelValue,
                };
                self.screen.add_region(Region::new(
                    BucketId::Primary,
                    CellKind::LabelValue,
                    primary.rows(),
                    primary.cols(),
                ));
                self.screen.add_region(Region::new(
                    BucketId::Secondary,
                    secondary_kind,
                    secondary.rows(),
                    secondary.cols(),
                ));
            }
        }

        self.text_color = config.text_color;
        self.rebuilds += 1;

        debug!("built {} (rebuild #{})", mode.wire_name(), self.rebuilds);
        Ok(())
    }

    fn update_bucket(&mut self, update: &BucketUpdate<'_>) -> Result<(), DisplayError> {
        let region = self
            .built()?
            .region_mut(update.bucket)
            .filter(|r| r.kind == update.kind)
            .ok_or(DisplayError::RegionMissing)?;

        match (update.kind, update.pass) {
            (CellKind::LabelValue, CellPass::Populate) => {
                region.cells = update
                    .placements
                    .iter()
                    .map(|p| Cell::new(p, &update.style))
                    .collect();
            }
            (CellKind::LabelValue, CellPass::Refresh) => {
                for (cell, placement) in region.cells.iter_mut().zip(update.placements) {
                    cell.refresh(placement, &update.style);
                }
            }
            (CellKind::RadialGauge, CellPass::Populate) => {
                region.gauges = update
                    .placements
                    .iter()
                    .map(|p| Gauge::new(p, &update.style))
                    .collect();
            }
            (CellKind::RadialGauge, CellPass::Refresh) => {
                for (gauge, placement) in region.gauges.iter_mut().zip(update.placements) {
                    gauge.refresh(placement, &update.style);
                }
            }
        }
        Ok(())
    }

    fn set_gauge_value(&mut self, id: GaugeId, value: i32) -> Result<(), DisplayError> {
        let gauge = self
            .built()?
            .region_mut(BucketId::Secondary)
            .and_then(|r| r.gauges.get_mut(id.0))
            .ok_or(DisplayError::RegionMissing)?;
        gauge.set_value(value);
        Ok(())
    }

    fn set_bar_series(&mut self, values: &[i32]) -> Result<(), DisplayError> {
        let bars = self
            .built()?
            .bars_mut()
            .ok_or(DisplayError::RegionMissing)?;
        bars.clear();
        bars.extend(values.iter().map(|&v| v.clamp(GAUGE_MIN, GAUGE_MAX)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use relaydash_core::layout::{partition, GridTemplate};
    use relaydash_core::traits::CellStyle;
    use relaydash_core::SensorSample;

    fn sample(tag: &str, value: &str) -> SensorSample {
        SensorSample {
            tag: tag.to_string(),
            display_value: value.to_string(),
            order: 0,
            category: "Temperature".to_string(),
            component_name: "GPU".to_string(),
        }
    }

    fn style(label_font: i32) -> CellStyle {
        CellStyle {
            label_font,
            value_font: 24,
            padding: 2,
            color: Rgb::from_hex(0x00FF00),
        }
    }

    fn dials() -> DisplayList {
        let mut display = DisplayList::new();
        let config = ConfigSnapshot {
            layout: Some(LayoutMode::PrimaryDials),
            ..Default::default()
        };
        display.rebuild_layout(LayoutMode::PrimaryDials, &config).unwrap();
        display
    }

    fn update<'a>(
        bucket: BucketId,
        pass: CellPass,
        kind: CellKind,
        placements: &'a [relaydash_core::layout::Placement<'a>],
        label_font: i32,
    ) -> BucketUpdate<'a> {
        let dims = relaydash_core::config::GridDims::new(3, 3);
        BucketUpdate {
            bucket,
            pass,
            kind,
            template: GridTemplate::new(dims),
            placements,
            style: style(label_font),
        }
    }

    #[test]
    fn test_not_built_before_rebuild() {
        let mut display = DisplayList::new();
        display.show_splash("Junction Relay").unwrap();
        assert_eq!(display.set_bar_series(&[1]), Err(DisplayError::NotBuilt));
        assert_eq!(display.set_gauge_value(GaugeId(0), 5), Err(DisplayError::NotBuilt));
    }

    #[test]
    fn test_rebuild_creates_regions() {
        let display = dials();
        let screen = display.screen();
        assert_eq!(screen.layout(), Some(LayoutMode::PrimaryDials));
        assert_eq!(screen.region(BucketId::Primary).unwrap().cols, 4);
        assert_eq!(
            screen.region(BucketId::Secondary).unwrap().kind,
            CellKind::RadialGauge
        );
        assert!(screen.region(BucketId::All).is_none());
        assert_eq!(screen.bars(), Some(&[][..]));
        assert_eq!(display.rebuilds(), 1);
    }

    #[test]
    fn test_data_grid_has_no_bars() {
        let mut display = DisplayList::new();
        display
            .rebuild_layout(LayoutMode::DataGrid, &ConfigSnapshot::default())
            .unwrap();
        assert_eq!(display.set_bar_series(&[1, 2]), Err(DisplayError::RegionMissing));
    }

    #[test]
    fn test_gauges_clamped() {
        let mut display = dials();
        let samples = [sample("a", "150 C"), sample("b", "-5 C")];
        let placements: Vec<_> = partition(
            &samples,
            relaydash_core::config::GridDims::new(3, 3),
            CellKind::RadialGauge,
        )
        .collect();
        display
            .update_bucket(&update(
                BucketId::Secondary,
                CellPass::Populate,
                CellKind::RadialGauge,
                &placements,
                18,
            ))
            .unwrap();

        let gauges = &display.screen().region(BucketId::Secondary).unwrap().gauges;
        assert_eq!(gauges[0].value, 100);
        assert_eq!(gauges[1].value, 0);

        display.set_gauge_value(GaugeId(1), 42).unwrap();
        display.set_gauge_value(GaugeId(0), 1000).unwrap();
        let gauges = &display.screen().region(BucketId::Secondary).unwrap().gauges;
        assert_eq!((gauges[0].value, gauges[1].value), (100, 42));

        assert_eq!(
            display.set_gauge_value(GaugeId(2), 1),
            Err(DisplayError::RegionMissing)
        );
    }

    #[test]
    fn test_refresh_keeps_cell_count() {
        let mut display = dials();
        let samples = [sample("Core 0", "10 %"), sample("Core 1", "20 %")];
        let placements: Vec<_> = partition(
            &samples,
            relaydash_core::config::GridDims::new(3, 4),
            CellKind::LabelValue,
        )
        .collect();
        display
            .update_bucket(&update(
                BucketId::Primary,
                CellPass::Populate,
                CellKind::LabelValue,
                &placements[..1],
                18,
            ))
            .unwrap();
        display
            .update_bucket(&update(
                BucketId::Primary,
                CellPass::Refresh,
                CellKind::LabelValue,
                &placements,
                30,
            ))
            .unwrap();

        let cells = &display.screen().region(BucketId::Primary).unwrap().cells;
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].value.as_str(), "10 %");
        assert_eq!(cells[0].label_font, Font::Pt30);
        assert_eq!(cells[0].value_font, Font::Pt24);
        assert_eq!(cells[0].color, Rgb::from_hex(0x00FF00));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut display = dials();
        let err = display.update_bucket(&update(
            BucketId::Secondary,
            CellPass::Populate,
            CellKind::LabelValue,
            &[],
            18,
        ));
        assert_eq!(err, Err(DisplayError::RegionMissing));
    }

    #[test]
    fn test_bar_values_clamped() {
        let mut display = dials();
        display.set_bar_series(&[-3, 55, 240]).unwrap();
        assert_eq!(display.screen().bars(), Some(&[0, 55, 100][..]));
    }
}
