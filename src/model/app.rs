use std::fmt;

/// The four resource panels, in display and navigation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Images,
    Containers,
    Volumes,
    Networks,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Images,
        PanelKind::Containers,
        PanelKind::Volumes,
        PanelKind::Networks,
    ];

    /// Stable identifier, unique within the panel set.
    pub fn name(self) -> &'static str {
        match self {
            PanelKind::Images => "images",
            PanelKind::Containers => "containers",
            PanelKind::Volumes => "volumes",
            PanelKind::Networks => "networks",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Images => "Images",
            PanelKind::Containers => "Containers",
            PanelKind::Volumes => "Volumes",
            PanelKind::Networks => "Networks",
        }
    }

    /// Singular noun used in prompts and task descriptions.
    pub fn noun(self) -> &'static str {
        match self {
            PanelKind::Images => "image",
            PanelKind::Containers => "container",
            PanelKind::Volumes => "volume",
            PanelKind::Networks => "network",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Named layers of the page stack. `Main` is always present underneath.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageName {
    Main,
    Modal,
    Form,
    Detail,
}

impl PageName {
    pub fn name(self) -> &'static str {
        match self {
            PageName::Main => "main",
            PageName::Modal => "modal",
            PageName::Form => "form",
            PageName::Detail => "detail",
        }
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
