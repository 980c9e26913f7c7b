//! Submission lifecycle: reads the editor, runs one request at a time and
//! turns the reply into log entries.

use std::sync::Arc;

use crate::catalog::{self, Example};
use crate::client::{ExecuteError, ExecutionRequest, ExecutionResult, ExecutionService};
use crate::editor::EditorSurface;
use crate::output::{Category, OutputLog};

pub const NO_CODE: &str = "No code to run!";
pub const RUNNING: &str = "Running code...";
pub const EXECUTED: &str = "Code executed successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
}

/// How the run button should look. Always derived from [`SubmissionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordance {
    pub enabled: bool,
    pub loading: bool,
    pub label: &'static str,
}

impl From<SubmissionState> for Affordance {
    fn from(state: SubmissionState) -> Self {
        match state {
            SubmissionState::Idle => Self {
                enabled: true,
                loading: false,
                label: "▶ Run Code",
            },
            SubmissionState::InFlight => Self {
                enabled: false,
                loading: true,
                label: "⏳ Running...",
            },
        }
    }
}

/// Holds the controller in `InFlight` and puts it back to `Idle` when
/// dropped, whichever way the submission ends.
struct InFlightGuard<'a> {
    state: &'a mut SubmissionState,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(state: &'a mut SubmissionState) -> Self {
        *state = SubmissionState::InFlight;
        Self { state }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.state = SubmissionState::Idle;
    }
}

pub struct ExecutionController<E> {
    editor: E,
    service: Arc<dyn ExecutionService>,
    log: OutputLog,
    state: SubmissionState,
}

impl<E: EditorSurface> ExecutionController<E> {
    pub fn new(editor: E, service: Arc<dyn ExecutionService>) -> Self {
        Self {
            editor,
            service,
            log: OutputLog::new(),
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn affordance(&self) -> Affordance {
        self.state().into()
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn service(&self) -> Arc<dyn ExecutionService> {
        Arc::clone(&self.service)
    }

    pub fn scroll_log_up(&mut self, max: usize) {
        self.log.scroll_up(max);
    }

    pub fn scroll_log_down(&mut self) {
        self.log.scroll_down();
    }

    /// Snapshot the trimmed editor text, or explain why nothing will be sent.
    fn prepare(&mut self) -> Option<ExecutionRequest> {
        if self.state == SubmissionState::InFlight {
            tracing::debug!("submission ignored: a request is already in flight");
            return None;
        }
        let code = self.editor.text().trim();
        if code.is_empty() {
            self.log.push(Category::Error, NO_CODE);
            return None;
        }
        Some(ExecutionRequest::new(code))
    }

    fn announce_running(log: &mut OutputLog) {
        log.clear();
        log.push(Category::Info, RUNNING);
    }

    /// First half of a submission for hosts that run the request elsewhere
    /// (e.g. on a spawned task). On `Some`, the controller is `InFlight`
    /// until [`complete`](Self::complete) is called with the outcome.
    pub fn begin_submit(&mut self) -> Option<ExecutionRequest> {
        let request = self.prepare()?;
        self.state = SubmissionState::InFlight;
        Self::announce_running(&mut self.log);
        tracing::info!(bytes = request.code.len(), "submission started");
        Some(request)
    }

    /// Replace the log with the single entry for `outcome` and return to `Idle`.
    pub fn complete(&mut self, outcome: Result<ExecutionResult, ExecuteError>) {
        render_outcome(&mut self.log, outcome);
        self.state = SubmissionState::Idle;
    }

    /// Full submission: snapshot, request, render. Returns whether a request
    /// was issued. If this future is dropped mid-request the controller is
    /// still released to `Idle`.
    pub async fn submit(&mut self) -> bool {
        let Some(request) = self.prepare() else {
            return false;
        };
        let service = Arc::clone(&self.service);
        let _guard = InFlightGuard::acquire(&mut self.state);
        Self::announce_running(&mut self.log);
        tracing::info!(bytes = request.code.len(), "submission started");

        let outcome = service.execute(&request).await;
        render_outcome(&mut self.log, outcome);
        true
    }

    pub fn clear_editor(&mut self) {
        self.editor.set_text(String::new());
        self.editor.focus();
    }

    pub fn reset_log(&mut self) {
        self.log.clear();
    }

    /// Exact-name load, for structured pickers.
    pub fn load_example(&mut self, name: &str) -> bool {
        self.apply_example(catalog::lookup(name))
    }

    /// Free-text load: case and surrounding whitespace are ignored.
    pub fn load_example_ignore_case(&mut self, name: &str) -> bool {
        self.apply_example(catalog::lookup_ignore_case(name))
    }

    fn apply_example(&mut self, example: Option<&Example>) -> bool {
        let Some(example) = example else {
            return false;
        };
        self.editor.set_text(example.source.to_string());
        self.editor.focus();
        self.log.clear();
        self.log.push(
            Category::Info,
            format!(
                "Loaded {} example. Click \"Run Code\" to execute!",
                example.name
            ),
        );
        tracing::debug!(example = example.name, "example loaded");
        true
    }
}

fn render_outcome(log: &mut OutputLog, outcome: Result<ExecutionResult, ExecuteError>) {
    log.clear();
    match outcome {
        Ok(ExecutionResult::Error(message)) => {
            tracing::info!("execution reported an error");
            log.push(Category::Error, message);
        }
        Ok(ExecutionResult::Output(message)) => {
            tracing::info!("execution finished with output");
            log.push(Category::Success, message);
        }
        Ok(ExecutionResult::Empty) => {
            tracing::info!("execution finished without output");
            log.push(Category::Success, EXECUTED);
        }
        Err(e) => {
            tracing::warn!(error = %e, "submission failed");
            log.push(Category::Error, format!("Network error: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Editor;
    use crate::output::LogEntry;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every request and answers with a scripted outcome.
    struct ScriptedService {
        reply: Result<ExecutionResult, ExecuteError>,
        requests: Mutex<Vec<ExecutionRequest>>,
    }

    impl ScriptedService {
        fn new(reply: Result<ExecutionResult, ExecuteError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ExecutionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExecutionService for ScriptedService {
        async fn execute(
            &self,
            request: &ExecutionRequest,
        ) -> Result<ExecutionResult, ExecuteError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    /// Never answers.
    struct HangingService;

    #[async_trait]
    impl ExecutionService for HangingService {
        async fn execute(&self, _request: &ExecutionRequest) -> Result<ExecutionResult, ExecuteError> {
            std::future::pending().await
        }
    }

    fn controller(
        text: &str,
        reply: Result<ExecutionResult, ExecuteError>,
    ) -> (ExecutionController<Editor>, Arc<ScriptedService>) {
        let service = ScriptedService::new(reply);
        let ctl = ExecutionController::new(Editor::with_text(text), service.clone());
        (ctl, service)
    }

    fn only_entry(ctl: &ExecutionController<Editor>) -> &LogEntry {
        assert_eq!(ctl.log().entries().len(), 1, "log: {:?}", ctl.log().entries());
        &ctl.log().entries()[0]
    }

    #[tokio::test]
    async fn sends_trimmed_code_exactly_once() {
        let (mut ctl, service) = controller("\n  print(7)  \t\n", Ok(ExecutionResult::Empty));
        assert!(ctl.submit().await);
        assert_eq!(service.requests(), vec![ExecutionRequest::new("print(7)")]);
    }

    #[tokio::test]
    async fn whitespace_only_never_hits_the_network() {
        let (mut ctl, service) = controller(" \n\t ", Ok(ExecutionResult::Empty));
        assert!(!ctl.submit().await);
        assert!(service.requests().is_empty());
        assert_eq!(only_entry(&ctl), &LogEntry::new(Category::Error, NO_CODE));
        assert_eq!(ctl.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn output_becomes_success_entry() {
        let (mut ctl, _) = controller("x", Ok(ExecutionResult::Output("7".into())));
        ctl.submit().await;
        assert_eq!(only_entry(&ctl), &LogEntry::new(Category::Success, "7"));
        assert_eq!(ctl.state(), SubmissionState::Idle);
        assert!(ctl.affordance().enabled);
    }

    #[tokio::test]
    async fn service_error_becomes_error_entry() {
        let (mut ctl, _) = controller("x", Ok(ExecutionResult::Error("boom".into())));
        ctl.submit().await;
        assert_eq!(only_entry(&ctl), &LogEntry::new(Category::Error, "boom"));
    }

    #[tokio::test]
    async fn empty_result_gets_confirmation() {
        let (mut ctl, _) = controller("x", Ok(ExecutionResult::Empty));
        ctl.submit().await;
        assert_eq!(only_entry(&ctl), &LogEntry::new(Category::Success, EXECUTED));
    }

    #[tokio::test]
    async fn status_failure_surfaces_code_and_releases() {
        let (mut ctl, _) = controller("x", Err(ExecuteError::Status(500)));
        ctl.submit().await;
        let entry = only_entry(&ctl);
        assert_eq!(entry.category, Category::Error);
        assert!(entry.text.contains("500"), "{}", entry.text);
        assert_eq!(ctl.state(), SubmissionState::Idle);
        assert!(ctl.affordance().enabled);
    }

    #[tokio::test]
    async fn parse_failure_is_an_error_entry() {
        let (mut ctl, _) = controller("x", Err(ExecuteError::Parse("expected value".into())));
        ctl.submit().await;
        let entry = only_entry(&ctl);
        assert_eq!(entry.category, Category::Error);
        assert!(entry.text.contains("expected value"));
        assert_eq!(ctl.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn dropped_submission_still_releases() {
        let mut ctl = ExecutionController::new(Editor::with_text("loop()"), Arc::new(HangingService));
        let timed_out = tokio::time::timeout(Duration::from_millis(20), ctl.submit()).await;
        assert!(timed_out.is_err());
        assert_eq!(ctl.state(), SubmissionState::Idle);
        assert!(ctl.affordance().enabled);
    }

    #[test]
    fn split_submission_shows_running_then_result() {
        let (mut ctl, _) = controller("print(1)", Ok(ExecutionResult::Empty));
        ctl.reset_log();
        let request = ctl.begin_submit().expect("request");
        assert_eq!(request.code, "print(1)");
        assert_eq!(ctl.state(), SubmissionState::InFlight);
        assert_eq!(
            ctl.affordance(),
            Affordance { enabled: false, loading: true, label: "⏳ Running..." }
        );
        assert_eq!(only_entry(&ctl), &LogEntry::new(Category::Info, RUNNING));

        ctl.complete(Ok(ExecutionResult::Output("1".into())));
        assert_eq!(only_entry(&ctl), &LogEntry::new(Category::Success, "1"));
        assert_eq!(ctl.state(), SubmissionState::Idle);
    }

    #[test]
    fn second_submission_while_in_flight_is_refused() {
        let (mut ctl, _) = controller("print(1)", Ok(ExecutionResult::Empty));
        assert!(ctl.begin_submit().is_some());
        assert!(ctl.begin_submit().is_none());
        assert_eq!(only_entry(&ctl), &LogEntry::new(Category::Info, RUNNING));
        assert_eq!(ctl.state(), SubmissionState::InFlight);
    }

    #[test]
    fn request_keeps_text_from_submission_time() {
        let (mut ctl, _) = controller("print(1)", Ok(ExecutionResult::Empty));
        let request = ctl.begin_submit().expect("request");
        ctl.editor_mut().set_text("print(2)".into());
        assert_eq!(request.code, "print(1)");
    }

    #[test]
    fn loading_known_example_replaces_editor_and_log() {
        let (mut ctl, _) = controller("old code", Ok(ExecutionResult::Empty));
        ctl.reset_log();
        ctl.complete(Ok(ExecutionResult::Output("stale".into())));

        assert!(ctl.load_example("factorial"));
        let expected = catalog::lookup("factorial").unwrap().source;
        assert_eq!(ctl.editor().text(), expected);
        assert!(ctl.editor().is_focused());
        let entry = only_entry(&ctl);
        assert_eq!(entry.category, Category::Info);
        assert!(entry.text.contains("factorial"));
    }

    #[test]
    fn unknown_example_changes_nothing() {
        let (mut ctl, _) = controller("keep me", Ok(ExecutionResult::Empty));
        ctl.complete(Ok(ExecutionResult::Output("kept".into())));

        assert!(!ctl.load_example("quicksort"));
        assert!(!ctl.load_example("Hello"));
        assert_eq!(ctl.editor().text(), "keep me");
        assert_eq!(only_entry(&ctl), &LogEntry::new(Category::Success, "kept"));
    }

    #[test]
    fn free_text_example_names_ignore_case() {
        let (mut ctl, _) = controller("", Ok(ExecutionResult::Empty));
        assert!(ctl.load_example_ignore_case("CALCULATOR"));
        assert!(only_entry(&ctl).text.contains("calculator"));
    }

    #[test]
    fn clear_editor_empties_and_focuses() {
        let (mut ctl, _) = controller("print(1)", Ok(ExecutionResult::Empty));
        ctl.clear_editor();
        assert_eq!(ctl.editor().text(), "");
        assert!(ctl.editor().is_focused());
    }

    #[tokio::test]
    async fn no_sequence_leaves_button_disabled() {
        let (mut ctl, _) = controller("x", Err(ExecuteError::Transport("refused".into())));
        for _ in 0..3 {
            ctl.submit().await;
            assert!(ctl.affordance().enabled);
        }
        ctl.editor_mut().set_text("   ".into());
        ctl.submit().await;
        assert!(ctl.affordance().enabled);
    }
}
