/// Which view the submission landed on. The import form has exactly one
/// good exit: navigating away to the editor/result view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandedView {
    ImportForm,
    Editor,
}

/// Everything the classifier gets to look at for one attempt.
#[derive(Debug, Clone)]
pub struct RawOutcome {
    pub landed_view: LandedView,
    pub visible_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Success,
    RetryableFailure { reason: String },
    PermanentFailure { reason: String },
}

// Messages the import site shows for content it will never accept.
const PERMANENT_PATTERNS: &[&str] = &[
    "cannot be imported",
    "could not be imported",
    "this content is not supported",
];

// Messages for conditions that tend to clear up on their own.
const TRANSIENT_PATTERNS: &[&str] = &[
    "try again",
    "something went wrong",
    "temporarily unavailable",
    "too many requests",
    "server is not responding",
];

/// Ordered decision table, first match wins:
/// 1. landed on the editor view -> Success
/// 2. permanent error text      -> PermanentFailure
/// 3. transient error text      -> RetryableFailure
/// 4. no signal at all          -> RetryableFailure (ambiguity is retried,
///    never treated as success or as a dead item)
pub fn classify(outcome: &RawOutcome) -> AttemptResult {
    if outcome.landed_view == LandedView::Editor {
        return AttemptResult::Success;
    }

    let lowered = outcome.visible_text.to_lowercase();

    if let Some(pattern) = PERMANENT_PATTERNS.iter().find(|p| lowered.contains(**p)) {
        return AttemptResult::PermanentFailure {
            reason: matched_line(&outcome.visible_text, pattern),
        };
    }

    if let Some(pattern) = TRANSIENT_PATTERNS.iter().find(|p| lowered.contains(**p)) {
        return AttemptResult::RetryableFailure {
            reason: matched_line(&outcome.visible_text, pattern),
        };
    }

    AttemptResult::RetryableFailure {
        reason: "no result signal on import form".to_string(),
    }
}

// Pull the full line the pattern occurred on, so the reason in the summary
// reads like what the operator saw on screen.
fn matched_line(text: &str, pattern: &str) -> String {
    text.lines()
        .find(|line| line.to_lowercase().contains(pattern))
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| pattern.to_string())
}
