use std::time::Duration;

use tracing::{debug, warn};

use crate::model::PageName;
use crate::pages::{DetailView, Page};
use crate::task::{Completion, TaskOutput};

use super::App;

impl App {
    /// Apply every queued task completion. Returns whether a redraw is needed.
    pub fn poll_tasks(&mut self) -> bool {
        let completions = self.completions.drain();
        let changed = !completions.is_empty();
        for completion in completions {
            self.apply(completion);
        }
        changed
    }

    /// Block up to `timeout` for one completion and apply it. Meant for tests
    /// and scripted drivers; the event loop uses `poll_tasks`.
    pub fn wait_for_task(&mut self, timeout: Duration) -> bool {
        match self.completions.wait(timeout) {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, completion: Completion) {
        let Completion { description, result } = completion;
        match result {
            Ok(TaskOutput::Done) => self.set_status(format!("{}: done", description)),
            Ok(TaskOutput::Refreshed(list)) => {
                let kind = list.kind();
                if !self.panels.refresh(list) {
                    warn!(panel = %kind, "refresh for a panel that is not in the set");
                }
                self.set_status(format!("{}: done", description));
            }
            Ok(TaskOutput::Detail(detail)) => {
                if self.pages.is_main_active() {
                    let view = DetailView::new(detail.title, &detail.text, detail.return_to);
                    self.pages.show(PageName::Detail, Page::Detail(view), None);
                    self.set_status(format!("{}: done", description));
                } else {
                    debug!(task = %description, "overlay busy, detail not shown");
                    self.set_status(format!("{}: done, close the open dialog and retry to view", description));
                }
            }
            Err(e) => self.set_error(format!("{}: {}", description, e)),
        }
    }
}
