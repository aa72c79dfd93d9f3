//! In-memory `ResourceClient` for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::client::{ClientError, ResourceClient};
use crate::docker::split_reference;
use crate::model::{Container, ContainerOptions, Image, Network, PanelKind, Volume};

#[derive(Default)]
struct State {
    images: Vec<Image>,
    containers: Vec<Container>,
    volumes: Vec<Volume>,
    networks: Vec<Network>,
    fail_next: Option<String>,
    list_calls: HashMap<PanelKind, usize>,
}

/// Deterministic fake daemon. Mutating calls change the lists that later
/// `list_*` calls return.
#[derive(Default)]
pub struct FakeClient {
    state: Mutex<State>,
}

pub fn image(repo: &str, tag: &str) -> Image {
    Image {
        id: format!("sha256:{}-{}", repo, tag),
        repo: repo.to_string(),
        tag: tag.to_string(),
        created: String::new(),
        size: "1B".to_string(),
    }
}

pub fn container(id: &str, name: &str) -> Container {
    Container {
        id: id.to_string(),
        name: name.to_string(),
        image: "alpine:latest".to_string(),
        status: "Created".to_string(),
        state: "created".to_string(),
        created: String::new(),
        ports: String::new(),
    }
}

pub fn volume(name: &str) -> Volume {
    Volume {
        name: name.to_string(),
        driver: "local".to_string(),
        mountpoint: String::new(),
        created: String::new(),
    }
}

pub fn network(id: &str, name: &str) -> Network {
    Network {
        id: id.to_string(),
        name: name.to_string(),
        driver: "bridge".to_string(),
        scope: "local".to_string(),
    }
}

impl FakeClient {
    pub fn with_images(images: Vec<Image>) -> Self {
        let client = Self::default();
        client.lock().images = images;
        client
    }

    pub fn with_containers(self, containers: Vec<Container>) -> Self {
        self.lock().containers = containers;
        self
    }

    pub fn with_volumes(self, volumes: Vec<Volume>) -> Self {
        self.lock().volumes = volumes;
        self
    }

    pub fn with_networks(self, networks: Vec<Network>) -> Self {
        self.lock().networks = networks;
        self
    }

    /// Make the next call of any kind fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.lock().fail_next = Some(message.to_string());
    }

    pub fn list_calls(&self, kind: PanelKind) -> usize {
        self.lock().list_calls.get(&kind).copied().unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check(&self) -> Result<std::sync::MutexGuard<'_, State>, ClientError> {
        let mut state = self.lock();
        match state.fail_next.take() {
            Some(message) => Err(ClientError::Other(message)),
            None => Ok(state),
        }
    }

    fn listed(&self, kind: PanelKind) -> Result<std::sync::MutexGuard<'_, State>, ClientError> {
        let mut state = self.check()?;
        *state.list_calls.entry(kind).or_default() += 1;
        Ok(state)
    }
}

fn missing(kind: &str, key: &str) -> ClientError {
    ClientError::Other(format!("no such {}: {}", kind, key))
}

#[async_trait]
impl ResourceClient for FakeClient {
    async fn ping(&self) -> Result<(), ClientError> {
        self.check().map(|_| ())
    }

    async fn list_images(&self) -> Result<Vec<Image>, ClientError> {
        Ok(self.listed(PanelKind::Images)?.images.clone())
    }

    async fn list_containers(&self) -> Result<Vec<Container>, ClientError> {
        Ok(self.listed(PanelKind::Containers)?.containers.clone())
    }

    async fn list_volumes(&self) -> Result<Vec<Volume>, ClientError> {
        Ok(self.listed(PanelKind::Volumes)?.volumes.clone())
    }

    async fn list_networks(&self) -> Result<Vec<Network>, ClientError> {
        Ok(self.listed(PanelKind::Networks)?.networks.clone())
    }

    async fn create_container(&self, options: ContainerOptions) -> Result<(), ClientError> {
        let mut state = self.check()?;
        let id = format!("c{}", state.containers.len() + 1);
        let name = options.name.unwrap_or_else(|| id.clone());
        let mut created = container(&id, &name);
        created.image = options.image;
        state.containers.push(created);
        Ok(())
    }

    async fn pull_image(&self, reference: &str) -> Result<(), ClientError> {
        let mut state = self.check()?;
        let (repo, tag) = split_reference(reference);
        if !state.images.iter().any(|i| i.repo == repo && i.tag == tag) {
            state.images.push(image(repo, tag));
        }
        Ok(())
    }

    async fn remove_image(&self, id: &str) -> Result<(), ClientError> {
        let mut state = self.check()?;
        let before = state.images.len();
        state.images.retain(|i| i.id != id);
        if state.images.len() == before { Err(missing("image", id)) } else { Ok(()) }
    }

    async fn remove_container(&self, id: &str) -> Result<(), ClientError> {
        let mut state = self.check()?;
        let before = state.containers.len();
        state.containers.retain(|c| c.id != id);
        if state.containers.len() == before { Err(missing("container", id)) } else { Ok(()) }
    }

    async fn remove_volume(&self, name: &str) -> Result<(), ClientError> {
        let mut state = self.check()?;
        let before = state.volumes.len();
        state.volumes.retain(|v| v.name != name);
        if state.volumes.len() == before { Err(missing("volume", name)) } else { Ok(()) }
    }

    async fn remove_network(&self, id: &str) -> Result<(), ClientError> {
        let mut state = self.check()?;
        let before = state.networks.len();
        state.networks.retain(|n| n.id != id);
        if state.networks.len() == before { Err(missing("network", id)) } else { Ok(()) }
    }

    async fn inspect_image(&self, id: &str) -> Result<Value, ClientError> {
        self.check()?;
        Ok(json!({ "Id": id, "Kind": "image" }))
    }

    async fn inspect_container(&self, id: &str) -> Result<Value, ClientError> {
        self.check()?;
        Ok(json!({ "Id": id, "Kind": "container" }))
    }

    async fn inspect_volume(&self, name: &str) -> Result<Value, ClientError> {
        self.check()?;
        Ok(json!({ "Name": name, "Kind": "volume" }))
    }

    async fn inspect_network(&self, id: &str) -> Result<Value, ClientError> {
        self.check()?;
        Ok(json!({ "Id": id, "Kind": "network" }))
    }
}
