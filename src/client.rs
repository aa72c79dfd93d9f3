//! The resource-client boundary: everything the UI needs from the daemon.
//!
//! The shell only talks to `dyn ResourceClient`; `DockerClient` is the real
//! implementation and tests substitute an in-memory fake.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::model::{
    Container, ContainerOptions, Image, Network, PanelKind, ResourceList, Volume,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("docker: {0}")]
    Docker(#[from] bollard::errors::Error),
    #[error("cancelled")]
    Cancelled,
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Verify the daemon is reachable.
    async fn ping(&self) -> Result<(), ClientError>;

    async fn list_images(&self) -> Result<Vec<Image>, ClientError>;
    async fn list_containers(&self) -> Result<Vec<Container>, ClientError>;
    async fn list_volumes(&self) -> Result<Vec<Volume>, ClientError>;
    async fn list_networks(&self) -> Result<Vec<Network>, ClientError>;

    async fn create_container(&self, options: ContainerOptions) -> Result<(), ClientError>;
    async fn pull_image(&self, reference: &str) -> Result<(), ClientError>;

    async fn remove_image(&self, id: &str) -> Result<(), ClientError>;
    async fn remove_container(&self, id: &str) -> Result<(), ClientError>;
    async fn remove_volume(&self, name: &str) -> Result<(), ClientError>;
    async fn remove_network(&self, id: &str) -> Result<(), ClientError>;

    async fn inspect_image(&self, id: &str) -> Result<Value, ClientError>;
    async fn inspect_container(&self, id: &str) -> Result<Value, ClientError>;
    async fn inspect_volume(&self, name: &str) -> Result<Value, ClientError>;
    async fn inspect_network(&self, id: &str) -> Result<Value, ClientError>;
}

/// Query a fresh, full snapshot of one resource kind.
pub async fn list(client: &dyn ResourceClient, kind: PanelKind) -> Result<ResourceList, ClientError> {
    Ok(match kind {
        PanelKind::Images => ResourceList::Images(client.list_images().await?),
        PanelKind::Containers => ResourceList::Containers(client.list_containers().await?),
        PanelKind::Volumes => ResourceList::Volumes(client.list_volumes().await?),
        PanelKind::Networks => ResourceList::Networks(client.list_networks().await?),
    })
}

pub async fn remove(client: &dyn ResourceClient, kind: PanelKind, key: &str) -> Result<(), ClientError> {
    match kind {
        PanelKind::Images => client.remove_image(key).await,
        PanelKind::Containers => client.remove_container(key).await,
        PanelKind::Volumes => client.remove_volume(key).await,
        PanelKind::Networks => client.remove_network(key).await,
    }
}

/// Inspect one resource and format it as indented JSON for the detail page.
pub async fn inspect(client: &dyn ResourceClient, kind: PanelKind, key: &str) -> Result<String, ClientError> {
    let value = match kind {
        PanelKind::Images => client.inspect_image(key).await?,
        PanelKind::Containers => client.inspect_container(key).await?,
        PanelKind::Volumes => client.inspect_volume(key).await?,
        PanelKind::Networks => client.inspect_network(key).await?,
    };
    serde_json::to_string_pretty(&value).map_err(|e| ClientError::Other(e.to_string()))
}
