//! The fixed checklist shown while an article is being analyzed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Current,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStep {
    pub label: &'static str,
    pub state: StepState,
}

const STEP_LABELS: [&str; 3] = [
    "Extracting clean text",
    "Estimating reading time",
    "Creating a short summary",
];

/// While processing the first two steps read as done and the last as in
/// progress; once the item is ready everything reads as done. The backend
/// does not report per-step progress, so this is presentational only.
pub fn processing_steps(complete: bool) -> Vec<ProcessingStep> {
    STEP_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| ProcessingStep {
            label,
            state: if complete || i < STEP_LABELS.len() - 1 {
                StepState::Complete
            } else {
                StepState::Current
            },
        })
        .collect()
}

impl ProcessingStep {
    pub fn marker(&self) -> &'static str {
        match self.state {
            StepState::Complete => "[x]",
            StepState::Current => "[~]",
            StepState::Pending => "[ ]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_checklist() {
        let steps = processing_steps(false);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].state, StepState::Complete);
        assert_eq!(steps[1].state, StepState::Complete);
        assert_eq!(steps[2].state, StepState::Current);
    }

    #[test]
    fn test_complete_checklist() {
        let steps = processing_steps(true);
        assert!(steps.iter().all(|s| s.state == StepState::Complete));
    }
}
