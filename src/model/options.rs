use std::collections::BTreeMap;

use thiserror::Error;

use super::app::PanelKind;

/// Problems with what the user typed or selected. Reported locally; nothing runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("please select {} first", .0.noun())]
    NoSelection(PanelKind),
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} requires {other}")]
    Requires { field: &'static str, other: &'static str },
    #[error("invalid port '{0}', expected <port> or <port>/<proto>")]
    InvalidPort(String),
    #[error("invalid image reference '{0}'")]
    InvalidReference(String),
}

/// A value entered into one form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

/// Values retrieved from a submitted form, keyed by field label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, FieldValue>,
}

impl FormValues {
    pub fn insert(&mut self, label: impl Into<String>, value: FieldValue) {
        self.values.insert(label.into(), value);
    }

    /// Trimmed text of a text or dropdown field; empty when absent.
    pub fn text(&self, label: &str) -> &str {
        match self.values.get(label) {
            Some(FieldValue::Text(s)) => s.trim(),
            _ => "",
        }
    }

    pub fn checked(&self, label: &str) -> bool {
        matches!(self.values.get(label), Some(FieldValue::Checked(true)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeType {
    Bind,
    Volume,
}

impl VolumeType {
    pub const OPTIONS: [&'static str; 2] = ["bind", "volume"];

    fn parse(s: &str) -> Self {
        if s == "volume" { VolumeType::Volume } else { VolumeType::Bind }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortMapping {
    pub host_ip: Option<String>,
    pub host_port: String,
    /// Container side, always with protocol (e.g. "80/tcp").
    pub container_port: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeMapping {
    pub kind: VolumeType,
    pub source: String,
    pub target: String,
}

/// Everything needed to create a container from the create-container form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerOptions {
    pub name: Option<String>,
    pub image: String,
    pub user: Option<String>,
    pub port: Option<PortMapping>,
    pub volume: Option<VolumeMapping>,
    pub attach: bool,
    pub env: Vec<String>,
    pub cmd: Vec<String>,
}

impl ContainerOptions {
    pub fn from_form(values: &FormValues) -> Result<Self, InputError> {
        let image = values.text("Image");
        if image.is_empty() {
            return Err(InputError::Required("Image"));
        }

        let port = match (values.text("HostPort"), values.text("Port")) {
            ("", "") => None,
            (_, "") => return Err(InputError::Requires { field: "HostPort", other: "Port" }),
            (host_port, port) => Some(PortMapping {
                host_ip: non_empty(values.text("HostIP")),
                host_port: host_port.to_string(),
                container_port: normalize_port(port)?,
            }),
        };

        let volume = match (values.text("HostVolume"), values.text("Volume")) {
            ("", "") => None,
            (_, "") => return Err(InputError::Requires { field: "HostVolume", other: "Volume" }),
            ("", _) => return Err(InputError::Requires { field: "Volume", other: "HostVolume" }),
            (source, target) => Some(VolumeMapping {
                kind: VolumeType::parse(values.text("VolumeType")),
                source: source.to_string(),
                target: target.to_string(),
            }),
        };

        let env = values
            .text("Env")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let cmd = values
            .text("Cmd")
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Ok(Self {
            name: non_empty(values.text("Name")),
            image: image.to_string(),
            user: non_empty(values.text("User")),
            port,
            volume,
            attach: values.checked("Attach"),
            env,
            cmd,
        })
    }
}

/// The `image` field of the pull form: `repo[:tag]` or `repo@digest`.
pub fn image_reference(values: &FormValues) -> Result<String, InputError> {
    let reference = values.text("image");
    if reference.is_empty() {
        return Err(InputError::Required("image"));
    }
    if reference.ends_with([':', '@', '/']) || reference.contains(char::is_whitespace) {
        return Err(InputError::InvalidReference(reference.to_string()));
    }
    Ok(reference.to_string())
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn normalize_port(port: &str) -> Result<String, InputError> {
    let (number, proto) = port.split_once('/').unwrap_or((port, "tcp"));
    if number.parse::<u16>().is_err() || proto.is_empty() {
        return Err(InputError::InvalidPort(port.to_string()));
    }
    Ok(format!("{}/{}", number, proto))
}
