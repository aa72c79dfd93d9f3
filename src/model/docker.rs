use super::app::PanelKind;

// Immutable snapshots of daemon resources. Display fields are formatted
// once when the snapshot is taken.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub id: String,         // full image ID ("sha256:...")
    pub repo: String,       // "<none>" for dangling images
    pub tag: String,
    pub created: String,
    pub size: String,
}

impl Image {
    /// `repo:tag` reference, as used to prefill the create-container form.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.repo, self.tag)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: String,
    pub state: String,
    pub created: String,
    pub ports: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Volume {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
    pub created: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network {
    pub id: String,
    pub name: String,
    pub driver: String,
    pub scope: String,
}

/// A full, ordered snapshot of one resource kind. Panels swap their entries
/// for one of these wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceList {
    Images(Vec<Image>),
    Containers(Vec<Container>),
    Volumes(Vec<Volume>),
    Networks(Vec<Network>),
}

impl ResourceList {
    pub fn kind(&self) -> PanelKind {
        match self {
            ResourceList::Images(_) => PanelKind::Images,
            ResourceList::Containers(_) => PanelKind::Containers,
            ResourceList::Volumes(_) => PanelKind::Volumes,
            ResourceList::Networks(_) => PanelKind::Networks,
        }
    }
}

/// Common shape of a resource summary, so one panel type can list any kind.
pub trait Resource: Clone + Send + 'static {
    const KIND: PanelKind;
    const HEADERS: &'static [&'static str];
    /// Column widths, one per header. The last column takes the remainder.
    const WIDTHS: &'static [usize];

    /// Identifying key handed to the resource client.
    fn key(&self) -> &str;
    /// Human label used in prompts and task descriptions.
    fn label(&self) -> String;
    fn columns(&self) -> Vec<String>;

    fn unwrap(list: ResourceList) -> Option<Vec<Self>>;
}

pub fn short_id(id: &str) -> String {
    id.trim_start_matches("sha256:").chars().take(12).collect()
}

impl Resource for Image {
    const KIND: PanelKind = PanelKind::Images;
    const HEADERS: &'static [&'static str] = &["IMAGE ID", "REPOSITORY", "TAG", "CREATED", "SIZE"];
    const WIDTHS: &'static [usize] = &[14, 36, 18, 21, 10];

    fn key(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.reference()
    }

    fn columns(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            self.repo.clone(),
            self.tag.clone(),
            self.created.clone(),
            self.size.clone(),
        ]
    }

    fn unwrap(list: ResourceList) -> Option<Vec<Self>> {
        match list {
            ResourceList::Images(v) => Some(v),
            _ => None,
        }
    }
}

impl Resource for Container {
    const KIND: PanelKind = PanelKind::Containers;
    const HEADERS: &'static [&'static str] =
        &["CONTAINER ID", "NAME", "IMAGE", "STATUS", "CREATED", "PORTS"];
    const WIDTHS: &'static [usize] = &[14, 22, 28, 22, 21, 30];

    fn key(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn columns(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            self.name.clone(),
            self.image.clone(),
            self.status.clone(),
            self.created.clone(),
            self.ports.clone(),
        ]
    }

    fn unwrap(list: ResourceList) -> Option<Vec<Self>> {
        match list {
            ResourceList::Containers(v) => Some(v),
            _ => None,
        }
    }
}

impl Resource for Volume {
    const KIND: PanelKind = PanelKind::Volumes;
    const HEADERS: &'static [&'static str] = &["NAME", "DRIVER", "CREATED", "MOUNTPOINT"];
    const WIDTHS: &'static [usize] = &[36, 10, 21, 40];

    fn key(&self) -> &str {
        &self.name
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn columns(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.driver.clone(),
            self.created.clone(),
            self.mountpoint.clone(),
        ]
    }

    fn unwrap(list: ResourceList) -> Option<Vec<Self>> {
        match list {
            ResourceList::Volumes(v) => Some(v),
            _ => None,
        }
    }
}

impl Resource for Network {
    const KIND: PanelKind = PanelKind::Networks;
    const HEADERS: &'static [&'static str] = &["NETWORK ID", "NAME", "DRIVER", "SCOPE"];
    const WIDTHS: &'static [usize] = &[14, 30, 12, 10];

    fn key(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn columns(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            self.name.clone(),
            self.driver.clone(),
            self.scope.clone(),
        ]
    }

    fn unwrap(list: ResourceList) -> Option<Vec<Self>> {
        match list {
            ResourceList::Networks(v) => Some(v),
            _ => None,
        }
    }
}
