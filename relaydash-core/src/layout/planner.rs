//! Layout planner
//!
//! Holds the state carried from one message to the next and turns each
//! parsed [`Snapshot`] into render instructions.
//!
//! A pass is a REBUILD when no screen is built yet, when the layout differs
//! from the one on screen, or when any of the ten numeric layout fields
//! differs from the last applied configuration. Otherwise it is an UPDATE on
//! the existing widget tree. The text color never forces a rebuild.

use alloc::vec::Vec;

use super::classify::{classify, BucketId, Buckets};
use super::grid::{partition, CellKind, GridTemplate, Placement};
use crate::config::{ConfigSnapshot, LayoutMode, LogLevel, RegionConfig, Rgb};
use crate::snapshot::{SensorSample, Snapshot};
use crate::traits::{BucketUpdate, CellPass, CellStyle, GaugeId, RenderTarget};

/// Decision for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Plan {
    /// Build the widget tree for the layout from scratch
    Rebuild(LayoutMode),
    /// Refresh values on the existing widget tree
    Update(LayoutMode),
    /// No recognized layout; nothing is drawn
    Idle,
}

impl Plan {
    pub fn layout(self) -> Option<LayoutMode> {
        match self {
            Plan::Rebuild(mode) | Plan::Update(mode) => Some(mode),
            Plan::Idle => None,
        }
    }

    pub fn is_rebuild(self) -> bool {
        matches!(self, Plan::Rebuild(_))
    }
}

/// State carried across messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutState {
    /// Configuration of the last processed message
    pub applied: Option<ConfigSnapshot>,
    /// Whether a widget tree was built successfully
    pub screen_built: bool,
    /// Layout of the widget tree on screen
    pub built_mode: Option<LayoutMode>,
    /// Radial gauges created by the last rebuild
    pub gauges_built: usize,
    /// Sorted buckets of the last processed message
    pub buckets: Buckets,
}

/// Rebuild-or-update planner
#[derive(Debug, Default)]
pub struct LayoutPlanner {
    state: LayoutState,
    log_level: LogLevel,
}

impl LayoutPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Current runtime log verbosity
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Decide how `config` is drawn, without changing any state
    pub fn plan(&self, config: &ConfigSnapshot) -> Plan {
        let Some(mode) = config.layout else {
            return Plan::Idle;
        };

        let same_structure = self
            .state
            .applied
            .as_ref()
            .is_some_and(|applied| applied.same_structure(config));

        if !self.state.screen_built || self.state.built_mode != Some(mode) || !same_structure {
            Plan::Rebuild(mode)
        } else {
            Plan::Update(mode)
        }
    }

    /// Classify, plan and render one snapshot
    ///
    /// The configuration becomes the applied one whether or not rendering
    /// succeeds. A `DebugLevel` in the snapshot changes the log level for
    /// this and every later message.
    pub fn apply<T: RenderTarget>(
        &mut self,
        snapshot: Snapshot,
        target: &mut T,
    ) -> Result<Plan, T::Error> {
        let Snapshot {
            config, samples, ..
        } = snapshot;

        if let Some(level) = config.debug_level {
            self.log_level = level;
        }

        let plan = self.plan(&config);
        let mut buckets = classify(samples, config.layout);
        buckets.sort_by_order();
        self.state.buckets = buckets;

        if self.enabled(LogLevel::Info) {
            info!("plan {} with {} sensors", plan, self.state.buckets.len());
        }

        let result = self.render(plan, &config, target);
        self.state.applied = Some(config);

        if result.is_err() && self.enabled(LogLevel::Error) {
            error!("render failed");
        }
        result.map(|()| plan)
    }

    fn enabled(&self, level: LogLevel) -> bool {
        self.log_level.allows(level)
    }

    fn render<T: RenderTarget>(
        &mut self,
        plan: Plan,
        config: &ConfigSnapshot,
        target: &mut T,
    ) -> Result<(), T::Error> {
        let mode = match plan {
            Plan::Idle => {
                if self.enabled(LogLevel::Warn) {
                    warn!("no recognized layout, nothing drawn");
                }
                return Ok(());
            }
            Plan::Rebuild(mode) => {
                self.rebuild(mode, config, target)?;
                mode
            }
            Plan::Update(mode) => mode,
        };

        let buckets = &self.state.buckets;
        let color = config.text_color;
        match mode {
            LayoutMode::DataGrid => send_region(
                target,
                BucketId::All,
                &buckets.all,
                &config.secondary,
                color,
                CellPass::Populate,
                CellKind::LabelValue,
            ),
            LayoutMode::PrimaryDashboard => {
                send_bars(target, &buckets.primary)?;
                send_region(
                    target,
                    BucketId::Primary,
                    &buckets.primary,
                    &config.primary,
                    color,
                    CellPass::Populate,
                    CellKind::LabelValue,
                )?;
                send_region(
                    target,
                    BucketId::Secondary,
                    &buckets.secondary,
                    &config.secondary,
                    color,
                    CellPass::Populate,
                    CellKind::LabelValue,
                )
            }
            LayoutMode::PrimaryDials => {
                send_bars(target, &buckets.primary)?;
                send_region(
                    target,
                    BucketId::Primary,
                    &buckets.primary,
                    &config.primary,
                    color,
                    CellPass::Populate,
                    CellKind::LabelValue,
                )?;

                // Samples beyond the gauges built get no widget until the next rebuild
                let live = buckets.secondary.len().min(self.state.gauges_built);
                let gauges = &buckets.secondary[..live];
                send_region(
                    target,
                    BucketId::Secondary,
                    gauges,
                    &config.secondary,
                    color,
                    CellPass::Refresh,
                    CellKind::RadialGauge,
                )?;

                let verbose = self.enabled(LogLevel::Debug);
                for (i, sample) in gauges.iter().enumerate() {
                    let value = sample.value();
                    if verbose {
                        debug!("gauge {} = {}", i, value);
                    }
                    target.set_gauge_value(GaugeId(i), value)?;
                }
                Ok(())
            }
        }
    }

    fn rebuild<T: RenderTarget>(
        &mut self,
        mode: LayoutMode,
        config: &ConfigSnapshot,
        target: &mut T,
    ) -> Result<(), T::Error> {
        if self.enabled(LogLevel::Info) {
            info!("rebuilding {}", mode.wire_name());
        }

        self.state.screen_built = false;
        self.state.gauges_built = 0;
        target.rebuild_layout(mode, config)?;
        self.state.screen_built = true;
        self.state.built_mode = Some(mode);

        if mode == LayoutMode::PrimaryDials {
            let secondary = &self.state.buckets.secondary;
            send_region(
                target,
                BucketId::Secondary,
                secondary,
                &config.secondary,
                config.text_color,
                CellPass::Populate,
                CellKind::RadialGauge,
            )?;
            self.state.gauges_built = secondary.len();
        }
        Ok(())
    }
}

fn send_bars<T: RenderTarget>(target: &mut T, primary: &[SensorSample]) -> Result<(), T::Error> {
    let values: Vec<i32> = primary.iter().map(SensorSample::value).collect();
    target.set_bar_series(&values)
}

fn send_region<T: RenderTarget>(
    target: &mut T,
    bucket: BucketId,
    samples: &[SensorSample],
    region: &RegionConfig,
    color: Rgb,
    pass: CellPass,
    kind: CellKind,
) -> Result<(), T::Error> {
    let placements: Vec<Placement<'_>> = partition(samples, region.grid, kind).collect();
    target.update_bucket(&BucketUpdate {
        bucket,
        pass,
        kind,
        template: GridTemplate::new(region.grid),
        placements: &placements,
        style: CellStyle::new(region, color),
    })
}
