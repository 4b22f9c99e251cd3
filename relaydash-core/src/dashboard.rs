//! Message handling
//!
//! [`Dashboard`] ties the snapshot parser and the layout planner to one
//! render target. It is the single place where layout state is mutated.

use crate::config::LogLevel;
use crate::layout::{LayoutPlanner, Plan};
use crate::snapshot::{parse_snapshot, ParseError};
use crate::traits::RenderTarget;

/// Text shown before the first message arrives
pub const SPLASH_TEXT: &str = "Junction Relay";

/// Failure to handle one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DashboardError<E> {
    /// Message dropped; layout state untouched
    Parse(ParseError),
    /// Render target refused an instruction; configuration still applied
    Render {
        error: E,
        /// Sensor entries dropped for missing fields
        skipped: usize,
    },
}

impl<E> From<ParseError> for DashboardError<E> {
    fn from(e: ParseError) -> Self {
        DashboardError::Parse(e)
    }
}

/// Outcome of one handled message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageReport {
    pub plan: Plan,
    /// Sensor entries dropped for missing fields
    pub skipped: usize,
}

/// Dashboard driving one render target
pub struct Dashboard<T> {
    planner: LayoutPlanner,
    target: T,
}

impl<T: RenderTarget> Dashboard<T> {
    pub fn new(target: T) -> Self {
        Self {
            planner: LayoutPlanner::new(),
            target,
        }
    }

    /// Show the splash screen
    pub fn boot(&mut self) -> Result<(), T::Error> {
        info!("boot");
        self.target.show_splash(SPLASH_TEXT)
    }

    /// Parse one framed message and render it
    pub fn handle_message(
        &mut self,
        payload: &[u8],
    ) -> Result<MessageReport, DashboardError<T::Error>> {
        let snapshot = match parse_snapshot(payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if self.planner.log_level().allows(LogLevel::Error) {
                    error!("dropping message: {}", e);
                }
                return Err(e.into());
            }
        };
        let skipped = snapshot.skipped;

        let plan = self
            .planner
            .apply(snapshot, &mut self.target)
            .map_err(|error| DashboardError::Render { error, skipped })?;

        Ok(MessageReport { plan, skipped })
    }

    pub fn planner(&self) -> &LayoutPlanner {
        &self.planner
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }
}
