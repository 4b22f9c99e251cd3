//! Test helpers: sample builders and a recording render target

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::config::{ConfigSnapshot, LayoutMode};
use crate::layout::{BucketId, CellKind, GridTemplate};
use crate::snapshot::SensorSample;
use crate::traits::{BucketUpdate, CellPass, CellStyle, GaugeId, RenderTarget};

pub fn sample(tag: &str, category: &str, component: &str, order: i32) -> SensorSample {
    SensorSample {
        tag: tag.to_string(),
        display_value: "0 %".to_string(),
        order,
        category: category.to_string(),
        component_name: component.to_string(),
    }
}

pub fn sample_with_value(tag: &str, display_value: &str) -> SensorSample {
    SensorSample {
        display_value: display_value.to_string(),
        ..sample(tag, "Temperature", "GPU", 0)
    }
}

/// Owned copy of a [`BucketUpdate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpdate {
    pub bucket: BucketId,
    pub pass: CellPass,
    pub kind: CellKind,
    pub template: GridTemplate,
    pub style: CellStyle,
    pub tags: Vec<String>,
    pub gauges: Vec<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Splash(String),
    Rebuild(LayoutMode),
    Update(RecordedUpdate),
    Gauge(GaugeId, i32),
    Bars(Vec<i32>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refused;

/// Render target that records every instruction
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
    pub fail_rebuild: bool,
}

impl Recorder {
    pub fn rebuilds(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Rebuild(_)))
            .count()
    }

    pub fn gauge_values(&self) -> Vec<(GaugeId, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Gauge(id, value) => Some((*id, *value)),
                _ => None,
            })
            .collect()
    }

    /// Bucket and tags of the update recorded at `index`
    pub fn update_tags(&self, index: usize) -> (BucketId, Vec<&str>) {
        match &self.ops[index] {
            Op::Update(u) => (u.bucket, u.tags.iter().map(String::as_str).collect()),
            other => panic!("expected an update at {}, got {:?}", index, other),
        }
    }
}

impl RenderTarget for Recorder {
    type Error = Refused;

    fn show_splash(&mut self, text: &str) -> Result<(), Refused> {
        self.ops.push(Op::Splash(text.to_string()));
        Ok(())
    }

    fn rebuild_layout(
        &mut self,
        mode: LayoutMode,
        _config: &ConfigSnapshot,
    ) -> Result<(), Refused> {
        if self.fail_rebuild {
            return Err(Refused);
        }
        self.ops.push(Op::Rebuild(mode));
        Ok(())
    }

    fn update_bucket(&mut self, update: &BucketUpdate<'_>) -> Result<(), Refused> {
        self.ops.push(Op::Update(RecordedUpdate {
            bucket: update.bucket,
            pass: update.pass,
            kind: update.kind,
            template: update.template.clone(),
            style: update.style,
            tags: update.placements.iter().map(|p| p.sample.tag.clone()).collect(),
            gauges: update.placements.iter().map(|p| p.gauge).collect(),
        }));
        Ok(())
    }

    fn set_gauge_value(&mut self, id: GaugeId, value: i32) -> Result<(), Refused> {
        self.ops.push(Op::Gauge(id, value));
        Ok(())
    }

    fn set_bar_series(&mut self, values: &[i32]) -> Result<(), Refused> {
        self.ops.push(Op::Bars(values.to_vec()));
        Ok(())
    }
}
