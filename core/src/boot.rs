//! # Discovery Boot Lock
//!
//! A locked host keeps booting the discovery image until it is provisioned.
//! This writes one per-MAC entry for each boot loader through a
//! [`BootConfigurator`]. Failures are reported and swallowed: a host whose
//! lock could not be written is still discovered.

use pnet::util::MacAddr;
use tracing::{debug, info, warn};

use intake_common::host::{DiscoveredHost, HasInterfaces};
use intake_common::ports::provisioning::{BootConfigurator, PxeKind};

const KERNEL: &str = "boot/fdi-image/vmlinuz0";
const INITRD: &str = "boot/fdi-image/initrd0.img";
const KERNEL_ARGS: &str = "rootflags=loop root=live:/fdi.iso rootfstype=auto ro rd.live.image \
                           acpi=force rd.luks=0 rd.md=0 rd.dm=0 rd.lvm=0 rd.bootif=0 rd.neednet=0 nomodeset";

/// Renders the discovery boot entry of `kind` for `host`.
pub fn render_entry(kind: PxeKind, host: &DiscoveredHost) -> String {
    let mac = host.mac().map(|mac| mac.to_string()).unwrap_or_default();
    let args = format!("{KERNEL_ARGS} fdi.hostname={} BOOTIF=01-{}", host.name, mac.replace(':', "-"));

    match kind {
        PxeKind::PxeLinux => format!(
            "# {template}\nDEFAULT discovery\nLABEL discovery\n  KERNEL {KERNEL}\n  APPEND initrd={INITRD} {args}\n  IPAPPEND 2\n",
            template = kind.discovery_template(),
        ),
        PxeKind::PxeGrub => format!(
            "# {template}\ndefault=0\ntimeout=0\ntitle discovery\n  kernel {KERNEL} {args}\n  initrd {INITRD}\n",
            template = kind.discovery_template(),
        ),
        PxeKind::PxeGrub2 => format!(
            "# {template}\nset default=0\nset timeout=0\nmenuentry 'discovery' {{\n  linux {KERNEL} {args}\n  initrd {INITRD}\n}}\n",
            template = kind.discovery_template(),
        ),
    }
}

/// Writes the discovery entry of every boot loader for `host`'s MAC.
/// Returns how many entries were written.
pub fn lock(boot: &dyn BootConfigurator, host: &DiscoveredHost) -> usize {
    let Some(mac) = host.mac() else {
        warn!("Cannot lock {} into discovery: no primary interface", host.name);
        return 0;
    };

    let written = PxeKind::ALL
        .into_iter()
        .filter(|kind| write_entry(boot, *kind, mac, host))
        .count();

    info!("Locked {} into discovery ({written}/{} boot entries)", host.name, PxeKind::ALL.len());
    written
}

fn write_entry(boot: &dyn BootConfigurator, kind: PxeKind, mac: MacAddr, host: &DiscoveredHost) -> bool {
    match boot.set(kind, mac, &render_entry(kind, host)) {
        Ok(()) => {
            debug!("Wrote {kind} entry for {mac}");
            true
        }
        Err(e) => {
            warn!("Failed to write {kind} entry for {mac}: {e:#}");
            false
        }
    }
}

/// Boot configurator that only logs the entries it would write.
pub struct DryRunBoot;

impl BootConfigurator for DryRunBoot {
    fn set(&self, kind: PxeKind, mac: MacAddr, content: &str) -> anyhow::Result<()> {
        info!("Would write {kind} entry for {mac} ({} bytes)", content.len());
        debug!("{content}");
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
