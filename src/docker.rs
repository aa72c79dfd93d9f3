use std::collections::HashMap;

use async_trait::async_trait;
use bollard::Docker;
use bollard::container::{
    Config, CreateContainerOptions, InspectContainerOptions, ListContainersOptions,
    RemoveContainerOptions,
};
use bollard::image::{CreateImageOptions, ListImagesOptions, RemoveImageOptions};
use bollard::models::{
    ContainerSummary, HostConfig, ImageSummary, Mount, MountTypeEnum, PortBinding,
};
use bollard::network::{InspectNetworkOptions, ListNetworksOptions};
use bollard::volume::{ListVolumesOptions, RemoveVolumeOptions};
use futures_util::StreamExt;
use serde_json::Value;
use tracing::debug;

use crate::client::{ClientError, ResourceClient};
use crate::model::{
    Container, ContainerOptions, Image, Network, Volume, VolumeMapping, VolumeType,
};

/// Wrapper around bollard's Docker client.
pub struct DockerClient {
    client: Docker,
}

impl DockerClient {
    /// Connect to the daemon. `host` accepts `unix://`, `tcp://` and `http://`
    /// URIs; `None` uses the local defaults (DOCKER_HOST or the default socket).
    pub fn connect(host: Option<&str>, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = match host {
            None => Docker::connect_with_local_defaults()?,
            Some(uri) if uri.starts_with("unix://") => {
                Docker::connect_with_unix(uri, timeout_secs, bollard::API_DEFAULT_VERSION)?
            }
            Some(uri) if uri.starts_with("tcp://") || uri.starts_with("http://") => {
                Docker::connect_with_http(uri, timeout_secs, bollard::API_DEFAULT_VERSION)?
            }
            Some(uri) => {
                return Err(ClientError::Other(format!("unsupported docker host '{}'", uri)));
            }
        };
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceClient for DockerClient {
    async fn ping(&self) -> Result<(), ClientError> {
        self.client.ping().await?;
        Ok(())
    }

    async fn list_images(&self) -> Result<Vec<Image>, ClientError> {
        let options = ListImagesOptions::<String> {
            all: false,
            ..Default::default()
        };
        let summaries = self.client.list_images(Some(options)).await?;
        Ok(summaries.iter().map(image_from_summary).collect())
    }

    async fn list_containers(&self) -> Result<Vec<Container>, ClientError> {
        let options = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };
        let summaries = self.client.list_containers(Some(options)).await?;
        Ok(summaries.iter().map(container_from_summary).collect())
    }

    async fn list_volumes(&self) -> Result<Vec<Volume>, ClientError> {
        let response = self
            .client
            .list_volumes(None::<ListVolumesOptions<String>>)
            .await?;
        let mut volumes: Vec<Volume> = response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(|v| Volume {
                created: v.created_at.as_deref().map(format_rfc3339).unwrap_or_default(),
                name: v.name,
                driver: v.driver,
                mountpoint: v.mountpoint,
            })
            .collect();
        // The daemon returns volumes in no particular order.
        volumes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(volumes)
    }

    async fn list_networks(&self) -> Result<Vec<Network>, ClientError> {
        let networks = self
            .client
            .list_networks(None::<ListNetworksOptions<String>>)
            .await?;
        let mut networks: Vec<Network> = networks
            .into_iter()
            .map(|n| Network {
                id: n.id.unwrap_or_default(),
                name: n.name.unwrap_or_default(),
                driver: n.driver.unwrap_or_default(),
                scope: n.scope.unwrap_or_default(),
            })
            .collect();
        networks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(networks)
    }

    async fn create_container(&self, options: ContainerOptions) -> Result<(), ClientError> {
        let create_options = options.name.clone().map(|name| CreateContainerOptions {
            name,
            platform: None,
        });
        let config = container_config(options);
        let response = self.client.create_container(create_options, config).await?;
        debug!(id = %response.id, "container created");
        Ok(())
    }

    async fn pull_image(&self, reference: &str) -> Result<(), ClientError> {
        let (image, tag) = split_reference(reference);
        let options = CreateImageOptions {
            from_image: image.to_string(),
            tag: tag.to_string(),
            ..Default::default()
        };

        let mut stream = self.client.create_image(Some(options), None, None);
        while let Some(item) = stream.next().await {
            let info = item?;
            if let Some(err) = info.error {
                return Err(ClientError::Other(err));
            }
            if let Some(status) = info.status {
                debug!(reference, %status, "pull progress");
            }
        }
        Ok(())
    }

    async fn remove_image(&self, id: &str) -> Result<(), ClientError> {
        let options = RemoveImageOptions {
            force: false,
            noprune: false,
        };
        self.client.remove_image(id, Some(options), None).await?;
        Ok(())
    }

    async fn remove_container(&self, id: &str) -> Result<(), ClientError> {
        let options = RemoveContainerOptions {
            v: false,
            force: false,
            link: false,
        };
        self.client.remove_container(id, Some(options)).await?;
        Ok(())
    }

    async fn remove_volume(&self, name: &str) -> Result<(), ClientError> {
        self.client
            .remove_volume(name, Some(RemoveVolumeOptions { force: false }))
            .await?;
        Ok(())
    }

    async fn remove_network(&self, id: &str) -> Result<(), ClientError> {
        self.client.remove_network(id).await?;
        Ok(())
    }

    async fn inspect_image(&self, id: &str) -> Result<Value, ClientError> {
        let inspect = self.client.inspect_image(id).await?;
        to_value(&inspect)
    }

    async fn inspect_container(&self, id: &str) -> Result<Value, ClientError> {
        let inspect = self
            .client
            .inspect_container(id, None::<InspectContainerOptions>)
            .await?;
        to_value(&inspect)
    }

    async fn inspect_volume(&self, name: &str) -> Result<Value, ClientError> {
        let inspect = self.client.inspect_volume(name).await?;
        to_value(&inspect)
    }

    async fn inspect_network(&self, id: &str) -> Result<Value, ClientError> {
        let inspect = self
            .client
            .inspect_network(id, None::<InspectNetworkOptions<String>>)
            .await?;
        to_value(&inspect)
    }
}

// --- Free helper functions ---

fn to_value<T: serde::Serialize>(v: &T) -> Result<Value, ClientError> {
    serde_json::to_value(v).map_err(|e| ClientError::Other(e.to_string()))
}

/// Split `repo[:tag]` into its parts, defaulting the tag to `latest`.
/// A colon before the last `/` belongs to a registry host, not a tag. A
/// digest reference (`repo@sha256:...`) stays whole with an empty tag.
pub fn split_reference(reference: &str) -> (&str, &str) {
    if reference.contains('@') {
        return (reference, "");
    }
    let slash = reference.rfind('/').map(|i| i + 1).unwrap_or(0);
    match reference[slash..].rfind(':') {
        Some(i) => (&reference[..slash + i], &reference[slash + i + 1..]),
        None => (reference, "latest"),
    }
}

fn image_from_summary(s: &ImageSummary) -> Image {
    let (repo, tag) = match s.repo_tags.first() {
        Some(repo_tag) if repo_tag != "<none>:<none>" => {
            let (repo, tag) = split_reference(repo_tag);
            (repo.to_string(), tag.to_string())
        }
        _ => ("<none>".to_string(), "<none>".to_string()),
    };

    Image {
        id: s.id.clone(),
        repo,
        tag,
        created: format_timestamp(s.created),
        size: format_size(s.size),
    }
}

fn container_from_summary(s: &ContainerSummary) -> Container {
    let id = s.id.clone().unwrap_or_default();
    let name = s
        .names
        .as_ref()
        .and_then(|n| n.first())
        .map(|n| n.trim_start_matches('/').to_string())
        .unwrap_or_else(|| crate::model::short_id(&id));

    Container {
        name,
        image: s.image.clone().unwrap_or_default(),
        status: s.status.clone().unwrap_or_default(),
        state: s.state.clone().unwrap_or_default(),
        created: format_timestamp(s.created.unwrap_or(0)),
        ports: format_ports(s),
        id,
    }
}

fn container_config(options: ContainerOptions) -> Config<String> {
    let mut exposed_ports = HashMap::new();
    let mut port_bindings = HashMap::new();
    if let Some(port) = options.port {
        exposed_ports.insert(port.container_port.clone(), HashMap::new());
        port_bindings.insert(
            port.container_port,
            Some(vec![PortBinding {
                host_ip: port.host_ip,
                host_port: Some(port.host_port),
            }]),
        );
    }

    let mounts = options.volume.map(|v| vec![mount(v)]);

    let host_config = HostConfig {
        port_bindings: Some(port_bindings),
        mounts,
        ..Default::default()
    };

    Config {
        image: Some(options.image),
        user: options.user,
        env: Some(options.env),
        cmd: if options.cmd.is_empty() { None } else { Some(options.cmd) },
        exposed_ports: Some(exposed_ports),
        attach_stdin: Some(options.attach),
        attach_stdout: Some(options.attach),
        attach_stderr: Some(options.attach),
        open_stdin: Some(options.attach),
        tty: Some(options.attach),
        host_config: Some(host_config),
        ..Default::default()
    }
}

fn mount(v: VolumeMapping) -> Mount {
    let typ = match v.kind {
        VolumeType::Bind => MountTypeEnum::BIND,
        VolumeType::Volume => MountTypeEnum::VOLUME,
    };
    Mount {
        source: Some(v.source),
        target: Some(v.target),
        typ: Some(typ),
        ..Default::default()
    }
}

fn format_timestamp(ts: i64) -> String {
    if ts == 0 {
        return "unknown".to_string();
    }
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y/%m/%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_rfc3339(s: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y/%m/%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| s.to_string())
}

fn format_size(bytes: i64) -> String {
    let bytes = bytes.max(0) as f64;
    if bytes >= 1_000_000_000.0 {
        format!("{:.2}GB", bytes / 1_000_000_000.0)
    } else if bytes >= 1_000_000.0 {
        format!("{:.2}MB", bytes / 1_000_000.0)
    } else if bytes >= 1000.0 {
        format!("{:.2}KB", bytes / 1000.0)
    } else {
        format!("{}B", bytes)
    }
}

fn format_ports(s: &ContainerSummary) -> String {
    let Some(ports) = &s.ports else { return String::new() };
    let mut parts = Vec::new();
    for p in ports {
        let container_port = p.private_port;
        let proto = p.typ.as_ref()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "tcp".to_string());
        if let (Some(ip), Some(pub_port)) = (&p.ip, p.public_port) {
            parts.push(format!("{}:{}->{}/{}", ip, pub_port, container_port, proto));
        } else {
            parts.push(format!("{}/{}", container_port, proto));
        }
    }
    parts.join(", ")
}
