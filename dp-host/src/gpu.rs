//! GPU descriptor from DRM card devices

use std::fs;
use std::path::Path;

use dp_core::GpuDescriptor;
use dp_error::Result;
use tracing::debug;

use crate::constants::pci;

/// Describe the first DRM card that exposes a PCI vendor id.
///
/// `None` when there is no DRM tree or no usable card, the native equivalent
/// of a host that cannot create a GPU context.
pub fn read_gpu(drm_path: &Path) -> Result<Option<GpuDescriptor>> {
    let Ok(entries) = fs::read_dir(drm_path) else {
        debug!(path = %drm_path.display(), "No DRM tree, no GPU context");
        return Ok(None);
    };

    let mut cards: Vec<_> = entries
        .flatten()
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.starts_with("card") && !name.contains('-')
        })
        .map(|e| e.path())
        .collect();
    cards.sort();

    for card in cards {
        let device = card.join("device");
        let Some(vendor_id) = read_attr(&device, "vendor") else {
            continue;
        };
        let device_id = read_attr(&device, "device");

        let vendor = pci::vendor_name(&vendor_id)
            .map(str::to_string)
            .unwrap_or_else(|| vendor_id.clone());
        let renderer = read_attr(&device, "product_name").unwrap_or_else(|| match &device_id {
            Some(id) => format!("{} {}", vendor, id),
            None => format!("{} GPU", vendor),
        });

        debug!(card = %card.display(), vendor = %vendor, renderer = %renderer, "Found GPU");
        return Ok(Some(GpuDescriptor {
            vendor: Some(vendor),
            renderer: Some(renderer),
        }));
    }

    Ok(None)
}

fn read_attr(dir: &Path, name: &str) -> Option<String> {
    fs::read_to_string(dir.join(name))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add_card(root: &TempDir, card: &str, attrs: &[(&str, &str)]) {
        let device = root.path().join(card).join("device");
        fs::create_dir_all(&device).unwrap();
        for (name, value) in attrs {
            fs::write(device.join(name), format!("{value}\n")).unwrap();
        }
    }

    #[test]
    fn known_vendor_with_product_name() {
        let root = TempDir::new().unwrap();
        add_card(
            &root,
            "card0",
            &[("vendor", "0x1002"), ("device", "0x73bf"), ("product_name", "Radeon RX 6800")],
        );

        let gpu = read_gpu(root.path()).unwrap().unwrap();
        assert_eq!(gpu.vendor.as_deref(), Some("AMD"));
        assert_eq!(gpu.renderer.as_deref(), Some("Radeon RX 6800"));
    }

    #[test]
    fn unknown_vendor_falls_back_to_ids() {
        let root = TempDir::new().unwrap();
        add_card(&root, "card0", &[("vendor", "0x1af4"), ("device", "0x1050")]);

        let gpu = read_gpu(root.path()).unwrap().unwrap();
        assert_eq!(gpu.vendor.as_deref(), Some("0x1af4"));
        assert_eq!(gpu.renderer.as_deref(), Some("0x1af4 0x1050"));
    }

    #[test]
    fn connectors_and_vendorless_cards_are_skipped() {
        let root = TempDir::new().unwrap();
        add_card(&root, "card0", &[]);
        add_card(&root, "card0-HDMI-A-1", &[("vendor", "0x10de")]);
        add_card(&root, "card1", &[("vendor", "0x8086"), ("device", "0x46a6")]);

        let gpu = read_gpu(root.path()).unwrap().unwrap();
        assert_eq!(gpu.vendor.as_deref(), Some("Intel"));
        assert_eq!(gpu.renderer.as_deref(), Some("Intel 0x46a6"));
    }

    #[test]
    fn missing_drm_tree_means_no_context() {
        let root = TempDir::new().unwrap();
        assert_eq!(read_gpu(&root.path().join("drm")).unwrap(), None);
    }
}
