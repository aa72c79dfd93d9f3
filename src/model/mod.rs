// Re-export all model types from submodules.

pub use app::{PageName, PanelKind};
pub use docker::{Container, Image, Network, Resource, ResourceList, Volume, short_id};
pub use options::{
    ContainerOptions, FieldValue, FormValues, InputError, PortMapping, VolumeMapping, VolumeType,
    image_reference,
};

mod app;
mod docker;
mod options;
