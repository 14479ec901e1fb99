use crate::config::IntakeConfig;
use crate::error::AnalysisError;
use crate::intake;
use crate::model::{CalorieResult, CycleId, FileMeta, ImagePreview, WorkflowState};

/// Owns the widget's state for successive analysis cycles.
///
/// Every selection starts a new cycle. Updates tagged with an older cycle are
/// dropped, so a slow cycle can never overwrite the state of a newer one.
#[derive(Debug, Default)]
pub struct WorkflowController {
    cycle: CycleId,
    state: WorkflowState,
    preview: Option<ImagePreview>,
    policy: IntakeConfig,
}

impl WorkflowController {
    pub fn new(policy: IntakeConfig) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn preview(&self) -> Option<&ImagePreview> {
        self.preview.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, WorkflowState::Analyzing)
    }

    pub fn current_cycle(&self) -> CycleId {
        self.cycle
    }

    /// Starts a cycle for a new selection.
    ///
    /// A rejected selection still supersedes whatever was in flight, and
    /// lands directly in `Error` without passing through `Analyzing`.
    pub fn begin(&mut self, meta: &FileMeta) -> Result<CycleId, AnalysisError> {
        self.cycle = self.cycle.next();
        self.preview = None;

        if let Err(err) = intake::validate(meta, &self.policy) {
            self.state = WorkflowState::Error(err.clone());
            return Err(err);
        }

        log::info!("Cycle {} started for {}", self.cycle, meta.name);
        self.state = WorkflowState::Analyzing;
        Ok(self.cycle)
    }

    pub fn show_preview(&mut self, cycle: CycleId, preview: ImagePreview) -> bool {
        if !self.accepts(cycle, "preview") {
            return false;
        }
        self.preview = Some(preview);
        true
    }

    /// The single exit from `Analyzing`.
    pub fn finish(
        &mut self,
        cycle: CycleId,
        outcome: Result<CalorieResult, AnalysisError>,
    ) -> bool {
        if !self.accepts(cycle, "outcome") {
            return false;
        }

        self.state = match outcome {
            Ok(result) => {
                log::info!(
                    "Cycle {} succeeded: {} kcal of {}",
                    cycle,
                    result.calories,
                    result.detected_food
                );
                WorkflowState::Success(result)
            }
            Err(err) => {
                log::info!("Cycle {} ended with {}", cycle, err.kind());
                WorkflowState::Error(err)
            }
        };
        true
    }

    /// Returns to `Idle`, abandoning any cycle in flight.
    pub fn reset(&mut self) {
        self.cycle = self.cycle.next();
        self.state = WorkflowState::Idle;
        self.preview = None;
    }

    fn accepts(&self, cycle: CycleId, what: &str) -> bool {
        if cycle != self.cycle {
            log::debug!(
                "Discarding stale {} from cycle {} (current {})",
                what,
                cycle,
                self.cycle
            );
            return false;
        }
        if !self.is_analyzing() {
            log::warn!("Ignoring {} for cycle {}: not analyzing", what, cycle);
            return false;
        }
        true
    }
}
