//! End-to-end scenarios through the public `App` surface, driven by an
//! in-memory daemon.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{Value, json};

use dockdeck::app::App;
use dockdeck::client::{ClientError, ResourceClient};
use dockdeck::docker::split_reference;
use dockdeck::model::{Container, ContainerOptions, Image, Network, PageName, PanelKind, Volume};
use dockdeck::panel::Panel;

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct Daemon {
    images: Vec<Image>,
    containers: Vec<Container>,
    fail: Option<String>,
}

#[derive(Default)]
struct FakeDaemon(Mutex<Daemon>);

impl FakeDaemon {
    fn lock(&self) -> std::sync::MutexGuard<'_, Daemon> {
        self.0.lock().unwrap()
    }

    fn checked(&self) -> Result<std::sync::MutexGuard<'_, Daemon>, ClientError> {
        let mut daemon = self.lock();
        match daemon.fail.take() {
            Some(message) => Err(ClientError::Other(message)),
            None => Ok(daemon),
        }
    }
}

fn image(repo: &str, tag: &str) -> Image {
    Image {
        id: format!("sha256:{}-{}", repo, tag),
        repo: repo.into(),
        tag: tag.into(),
        created: String::new(),
        size: "5MB".into(),
    }
}

fn container(id: &str, name: &str) -> Container {
    Container {
        id: id.into(),
        name: name.into(),
        image: "nginx:latest".into(),
        status: "Up 2 hours".into(),
        state: "running".into(),
        created: String::new(),
        ports: String::new(),
    }
}

fn missing(kind: &str, key: &str) -> ClientError {
    ClientError::Other(format!("no such {}: {}", kind, key))
}

#[async_trait]
impl ResourceClient for FakeDaemon {
    async fn ping(&self) -> Result<(), ClientError> {
        self.checked().map(|_| ())
    }
    async fn list_images(&self) -> Result<Vec<Image>, ClientError> {
        Ok(self.checked()?.images.clone())
    }
    async fn list_containers(&self) -> Result<Vec<Container>, ClientError> {
        Ok(self.checked()?.containers.clone())
    }
    async fn list_volumes(&self) -> Result<Vec<Volume>, ClientError> {
        self.checked()?;
        Ok(Vec::new())
    }
    async fn list_networks(&self) -> Result<Vec<Network>, ClientError> {
        self.checked()?;
        Ok(Vec::new())
    }
    async fn create_container(&self, options: ContainerOptions) -> Result<(), ClientError> {
        let mut daemon = self.checked()?;
        let id = format!("c{}", daemon.containers.len() + 1);
        let name = options.name.unwrap_or_else(|| id.clone());
        daemon.containers.push(container(&id, &name));
        Ok(())
    }
    async fn pull_image(&self, reference: &str) -> Result<(), ClientError> {
        let mut daemon = self.checked()?;
        let (repo, tag) = split_reference(reference);
        if !daemon.images.iter().any(|i| i.repo == repo && i.tag == tag) {
            daemon.images.push(image(repo, tag));
        }
        Ok(())
    }
    async fn remove_image(&self, id: &str) -> Result<(), ClientError> {
        let mut daemon = self.checked()?;
        let before = daemon.images.len();
        daemon.images.retain(|i| i.id != id);
        if daemon.images.len() == before { Err(missing("image", id)) } else { Ok(()) }
    }
    async fn remove_container(&self, id: &str) -> Result<(), ClientError> {
        let mut daemon = self.checked()?;
        let before = daemon.containers.len();
        daemon.containers.retain(|c| c.id != id);
        if daemon.containers.len() == before { Err(missing("container", id)) } else { Ok(()) }
    }
    async fn remove_volume(&self, name: &str) -> Result<(), ClientError> {
        Err(missing("volume", name))
    }
    async fn remove_network(&self, id: &str) -> Result<(), ClientError> {
        Err(missing("network", id))
    }
    async fn inspect_image(&self, id: &str) -> Result<Value, ClientError> {
        self.checked()?;
        Ok(json!({ "Id": id }))
    }
    async fn inspect_container(&self, id: &str) -> Result<Value, ClientError> {
        self.checked()?;
        Ok(json!({ "Id": id }))
    }
    async fn inspect_volume(&self, name: &str) -> Result<Value, ClientError> {
        self.checked()?;
        Ok(json!({ "Name": name }))
    }
    async fn inspect_network(&self, id: &str) -> Result<Value, ClientError> {
        self.checked()?;
        Ok(json!({ "Id": id }))
    }
}

struct Harness {
    app: App,
    daemon: Arc<FakeDaemon>,
    _rt: tokio::runtime::Runtime,
}

impl Harness {
    fn new(images: Vec<Image>, containers: Vec<Container>) -> Self {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let daemon = Arc::new(FakeDaemon::default());
        {
            let mut state = daemon.lock();
            state.images = images;
            state.containers = containers;
        }
        let mut app = App::new(daemon.clone(), rt.handle().clone(), Arc::new(AtomicBool::new(false)));
        app.start();
        let mut harness = Self { app, daemon, _rt: rt };
        harness.settle();
        harness
    }

    fn key(&mut self, code: KeyCode) {
        self.app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(KeyCode::Char(c));
        }
    }

    /// Apply completions until no task is left in flight.
    fn settle(&mut self) {
        while self.app.tasks_in_flight() > 0 {
            if !self.app.wait_for_task(WAIT) {
                break;
            }
        }
    }

    fn labels(&self, kind: PanelKind) -> Vec<String> {
        self.app.panels.get(kind).unwrap().entry_labels()
    }
}

#[test]
fn tab_cycles_through_all_panels() {
    let mut h = Harness::new(vec![], vec![]);
    assert_eq!(h.app.panels.current_kind(), PanelKind::Images);
    for _ in 0..3 {
        h.key(KeyCode::Tab);
    }
    assert_eq!(h.app.panels.current_kind(), PanelKind::Networks);
    h.key(KeyCode::Tab);
    assert_eq!(h.app.panels.current_kind(), PanelKind::Images);
    h.key(KeyCode::BackTab);
    assert_eq!(h.app.panels.current_kind(), PanelKind::Networks);
}

#[test]
fn startup_populates_every_panel() {
    let h = Harness::new(vec![image("nginx", "latest")], vec![container("a1", "web")]);
    assert_eq!(h.labels(PanelKind::Images), vec!["nginx:latest"]);
    assert_eq!(h.labels(PanelKind::Containers), vec!["web"]);
}

#[test]
fn cancelled_remove_runs_nothing() {
    let mut h = Harness::new(vec![], vec![container("a1", "web"), container("b2", "db")]);
    h.key(KeyCode::Tab);
    h.key(KeyCode::Char('d'));
    assert_eq!(h.app.pages.active(), PageName::Modal);

    h.key(KeyCode::Right);
    h.key(KeyCode::Enter);

    assert_eq!(h.app.tasks_in_flight(), 0);
    assert!(!h.app.wait_for_task(Duration::from_millis(100)));
    assert_eq!(h.app.pages.active(), PageName::Main);
    assert_eq!(h.app.panels.current_kind(), PanelKind::Containers);
    assert_eq!(h.labels(PanelKind::Containers), vec!["web", "db"]);
}

#[test]
fn confirmed_remove_refreshes_containers() {
    let mut h = Harness::new(vec![], vec![container("a1", "web"), container("b2", "db")]);
    h.key(KeyCode::Tab);
    h.key(KeyCode::Char('j'));
    h.key(KeyCode::Char('d'));
    h.key(KeyCode::Enter);
    assert_eq!(h.app.pages.active(), PageName::Main);
    assert_eq!(h.app.status().unwrap().text, "remove container db...");

    h.settle();
    assert_eq!(h.labels(PanelKind::Containers), vec!["web"]);
    assert_eq!(h.app.panels.current_kind(), PanelKind::Containers);
}

#[test]
fn remove_of_vanished_container_reports_error() {
    let mut h = Harness::new(vec![], vec![container("a1", "web")]);
    h.daemon.lock().containers.clear();
    h.key(KeyCode::Tab);
    h.key(KeyCode::Char('d'));
    h.key(KeyCode::Enter);
    h.settle();

    let status = h.app.status().unwrap();
    assert!(status.is_error);
    assert_eq!(status.text, "remove container web: no such container: a1");
    assert_eq!(h.labels(PanelKind::Containers), vec!["web"]);
}

#[test]
fn pull_image_adds_tag_once() {
    let mut h = Harness::new(vec![image("alpine", "3.19")], vec![]);
    h.key(KeyCode::Char('p'));
    assert_eq!(h.app.pages.active(), PageName::Form);

    h.type_text("alpine:latest");
    h.key(KeyCode::Tab);
    h.key(KeyCode::Enter);

    assert_eq!(h.app.pages.active(), PageName::Main);
    assert_eq!(h.app.panels.current_kind(), PanelKind::Images);
    h.settle();

    let labels = h.labels(PanelKind::Images);
    assert_eq!(labels.iter().filter(|l| *l == "alpine:latest").count(), 1);
    assert!(labels.contains(&"alpine:3.19".to_string()));
}

#[test]
fn empty_pull_reference_keeps_form_open() {
    let mut h = Harness::new(vec![], vec![]);
    h.key(KeyCode::Char('p'));
    h.key(KeyCode::Tab);
    h.key(KeyCode::Enter);

    assert_eq!(h.app.pages.active(), PageName::Form);
    assert_eq!(h.app.tasks_in_flight(), 0);
    assert!(h.app.status().unwrap().is_error);
}

#[test]
fn failed_refresh_leaves_entries_alone() {
    let mut h = Harness::new(vec![image("nginx", "latest")], vec![]);
    h.daemon.lock().images.push(image("redis", "7"));
    h.daemon.lock().fail = Some("daemon went away".into());

    h.key(KeyCode::Char('r'));
    h.settle();

    assert_eq!(h.labels(PanelKind::Images), vec!["nginx:latest"]);
    let status = h.app.status().unwrap();
    assert!(status.is_error);
    assert_eq!(status.text, "refresh images: daemon went away");
}

#[test]
fn create_container_needs_selected_image() {
    let mut h = Harness::new(vec![], vec![]);
    h.key(KeyCode::Char('c'));
    assert_eq!(h.app.pages.active(), PageName::Main);
    assert_eq!(h.app.status().unwrap().text, "please select image first");
}

#[test]
fn create_container_from_selected_image() {
    let mut h = Harness::new(vec![image("nginx", "latest")], vec![]);
    h.key(KeyCode::Char('c'));
    assert_eq!(h.app.pages.active(), PageName::Form);

    h.type_text("web");
    // From Name, two steps back wraps past Cancel onto Save.
    h.key(KeyCode::BackTab);
    h.key(KeyCode::BackTab);
    h.key(KeyCode::Enter);

    assert_eq!(h.app.pages.active(), PageName::Main);
    assert_eq!(h.app.panels.current_kind(), PanelKind::Images);
    h.settle();
    assert_eq!(h.labels(PanelKind::Containers), vec!["web"]);
}

#[test]
fn inspect_opens_detail_and_esc_returns() {
    let mut h = Harness::new(vec![image("nginx", "latest")], vec![]);
    h.key(KeyCode::Enter);
    h.settle();
    assert_eq!(h.app.pages.active(), PageName::Detail);

    h.key(KeyCode::Esc);
    assert_eq!(h.app.pages.active(), PageName::Main);
    assert_eq!(h.app.panels.current_kind(), PanelKind::Images);
}

#[test]
fn quit_key_requests_stop() {
    let mut h = Harness::new(vec![], vec![]);
    assert!(!h.app.should_quit());
    h.key(KeyCode::Char('q'));
    assert!(h.app.should_quit());
}
