//! Offline sizing simulation.
//!
//! Runs a [`ScrollGrid`] against recorded measurements instead of a live
//! DOM. Used by the CLI to inspect how a configuration settles, and handy
//! for reproducing alignment issues without a browser.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollGridError};
use crate::grid::{ScrollGrid, SizingOutcome};
use crate::layout::LayoutState;
use crate::render::GridRender;
use crate::scroller::{Axis, ScrollerViewport, ShrinkMeasure};
use crate::types::GridProps;

/// Follow-up passes allowed after mount before giving up.
const MAX_FOLLOW_UP_PASSES: u32 = 4;

/// Recorded geometry of one section's scroller
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    /// Section index
    pub section: usize,
    /// Natural width of the section's widest shrink cell
    #[serde(default)]
    pub content_width: f32,
    /// Content overflows vertically
    #[serde(default)]
    pub overflows_y: bool,
    /// Content overflows horizontally
    #[serde(default)]
    pub overflows_x: bool,
}

impl ScrollerViewport for Measurement {
    fn needs_scrolling(&self, axis: Axis) -> bool {
        match axis {
            Axis::Vertical => self.overflows_y,
            Axis::Horizontal => self.overflows_x,
        }
    }
}

impl ShrinkMeasure for Measurement {
    fn natural_shrink_width(&self) -> f32 {
        self.content_width
    }
}

/// A grid configuration plus the geometry each section reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub grid: GridProps<Measurement>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl Scenario {
    /// Parse a JSON scenario.
    ///
    /// # Errors
    /// Returns an error if the document is not a valid scenario.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                ScrollGridError::Config(e.to_string())
            } else {
                ScrollGridError::Json(e)
            }
        })
    }
}

/// Settled result of a scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub layout_state: LayoutState,
    pub sizing_passes: u64,
    /// Sections whose measurement could not be mounted (no scroller, or out of range)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_sections: Vec<usize>,
    pub render: GridRender,
}

/// Mount every measured section, run the mount pass and follow-up passes
/// until the layout state stops changing.
pub fn run_scenario(scenario: &Scenario) -> ScenarioReport {
    let mut grid: ScrollGrid<Measurement, Measurement> = ScrollGrid::new(scenario.grid.clone());

    let mut rejected_sections = Vec::new();
    for m in &scenario.measurements {
        if !grid.mount_section(m.section, *m, *m) {
            rejected_sections.push(m.section);
        }
    }

    let mut outcome = grid.did_mount();
    let mut follow_ups = 0;
    while outcome == SizingOutcome::Changed && follow_ups < MAX_FOLLOW_UP_PASSES {
        outcome = grid.did_update();
        follow_ups += 1;
    }
    if outcome == SizingOutcome::Changed {
        tracing::warn!(follow_ups, "layout did not settle");
    }

    ScenarioReport {
        layout_state: grid.layout_state(),
        sizing_passes: grid.sizing_passes(),
        rejected_sections,
        render: grid.render(),
    }
}
