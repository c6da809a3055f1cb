use std::fmt;

use pnet::util::MacAddr;

/// Boot loaders a provisioning proxy can serve a configuration entry for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PxeKind {
    PxeLinux,
    PxeGrub,
    PxeGrub2,
}

impl PxeKind {
    pub const ALL: [PxeKind; 3] = [PxeKind::PxeLinux, PxeKind::PxeGrub, PxeKind::PxeGrub2];

    /// Name of the template rendering the discovery entry for this loader.
    pub fn discovery_template(&self) -> &'static str {
        match self {
            PxeKind::PxeLinux => "pxelinux_discovery",
            PxeKind::PxeGrub => "pxegrub_discovery",
            PxeKind::PxeGrub2 => "pxegrub2_discovery",
        }
    }
}

impl fmt::Display for PxeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PxeKind::PxeLinux => write!(f, "PXELinux"),
            PxeKind::PxeGrub => write!(f, "PXEGrub"),
            PxeKind::PxeGrub2 => write!(f, "PXEGrub2"),
        }
    }
}

/// Writes per-MAC boot configuration entries on the provisioning network.
pub trait BootConfigurator: Send + Sync {
    fn set(&self, kind: PxeKind, mac: MacAddr, content: &str) -> anyhow::Result<()>;
}
