mod actions;
mod event_loop;
mod input;
mod render;

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, Clear, ClearType},
};
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{error, info};

use crate::client::{ClientError, ResourceClient};
use crate::config::Config;
use crate::docker::DockerClient;
use crate::keymap::{self, Keymap};
use crate::model::PanelKind;
use crate::pages::PageStack;
use crate::panel::{Panel, PanelSet};
use crate::task::{CompletionQueue, Task, TaskRunner};
use crate::view::{Presenter, StatusLine};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Startup failures. Anything after startup is reported in the status line.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to create tokio runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("cannot reach docker daemon: {0}")]
    Unreachable(#[source] ClientError),
}

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Application context: created once at startup, owned by the UI loop.
pub struct App {
    pub panels: PanelSet,
    pub pages: PageStack,
    pub keymap: Keymap,
    tasks: TaskRunner,
    completions: CompletionQueue,
    status: Option<StatusLine>,
    /// Task the open confirmation dialog will start, for the status line.
    pending: Option<String>,
    quit: Arc<AtomicBool>,
}

impl App {
    pub fn new(client: Arc<dyn ResourceClient>, handle: Handle, quit: Arc<AtomicBool>) -> Self {
        let panels = PanelSet::default();
        let mut keymap = Keymap::new(keymap::global_bindings());
        for panel in panels.iter() {
            keymap.bind_panel(panel.kind(), panel.key_bindings());
        }
        let (tasks, completions) = TaskRunner::new(handle, client);

        Self {
            panels,
            pages: PageStack::new(),
            keymap,
            tasks,
            completions,
            status: None,
            pending: None,
            quit,
        }
    }

    /// Populate every panel. Nothing here waits on the daemon.
    pub fn start(&mut self) {
        for kind in PanelKind::ALL {
            self.tasks.run(Task::refresh_panel(kind));
        }
    }

    /// Ask the event loop to finish and signal running tasks to stop. Safe to
    /// call from anywhere, including while applying a completion.
    pub fn stop(&self) {
        self.quit.store(true, Ordering::SeqCst);
        self.tasks.cancel_all();
    }

    pub fn should_quit(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn tasks_in_flight(&self) -> usize {
        self.tasks.in_flight()
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine { text: text.into(), is_error: false });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine { text: text.into(), is_error: true });
    }

    /// Hand `task` to the runner and note it in the status line.
    fn start_task(&mut self, task: Task) {
        self.set_status(format!("{}...", task.description));
        self.tasks.run(task);
    }
}

/// Run the application. Sets up terminal, runs the main loop, restores terminal on exit.
pub fn run(config: &Config, should_quit: Arc<AtomicBool>) -> Result<(), AppError> {
    let rt = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(2)
            .build()
            .map_err(AppError::Runtime)?,
    );

    let client = DockerClient::connect(config.host.as_deref(), config.timeout).map_err(AppError::Unreachable)?;
    rt.block_on(client.ping()).map_err(AppError::Unreachable)?;
    info!(host = config.host.as_deref().unwrap_or("default"), "docker daemon reachable");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, Clear(ClearType::All)) {
        restore_terminal();
        return Err(e.into());
    }

    let mut app = App::new(Arc::new(client), rt.handle().clone(), should_quit);
    app.start();

    let result = main_loop(&mut app);
    app.stop();
    restore_terminal();
    if let Err(ref e) = result {
        error!(error = %e, "event loop failed");
    }
    result.map_err(AppError::from)
}

fn main_loop(app: &mut App) -> io::Result<()> {
    let mut needs_render = true;

    loop {
        if app.should_quit() {
            break;
        }

        if app.poll_tasks() {
            needs_render = true;
        }

        if needs_render {
            let (cols, rows) = terminal::size()?;
            let mut out = io::stdout();
            if !Presenter::render_size_guard(&mut out, cols, rows)? {
                render::render(app, &mut out, cols, rows)?;
            }
            out.flush()?;
            needs_render = false;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        needs_render = true;
                    }
                }
                Event::Resize(_, _) => needs_render = true,
                _ => {}
            }
        }
    }

    Ok(())
}
