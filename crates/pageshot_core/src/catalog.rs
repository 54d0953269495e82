//! Static device and network emulation tables served by `/devices` and `/networks`.
use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceProfile {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "pixel-ratio")]
    pub pixel_ratio: f32,
    #[serde(rename = "user-agent")]
    pub user_agent: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    pub latency: u32,
    pub download: u32,
    pub upload: u32,
}

struct DeviceSpec {
    title: &'static str,
    kind: &'static str,
    // Portrait (vertical) screen size.
    width: u32,
    height: u32,
    pixel_ratio: f32,
    user_agent: &'static str,
}

const UA_IPHONE_4: &str = "Mozilla/5.0 (iPhone; U; CPU iPhone OS 4_2_1 like Mac OS X; en-us) AppleWebKit/533.17.9 (KHTML, like Gecko) Version/5.0.2 Mobile/8C148 Safari/6533.18.5";
const UA_IOS_7: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 7_0 like Mac OS X; en-us) AppleWebKit/537.51.1 (KHTML, like Gecko) Version/7.0 Mobile/11A465 Safari/9537.53";
const UA_IOS_8: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 8_0 like Mac OS X) AppleWebKit/600.1.3 (KHTML, like Gecko) Version/8.0 Mobile/12A4345d Safari/600.1.4";
const UA_IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 7_0 like Mac OS X) AppleWebKit/537.51.1 (KHTML, like Gecko) Version/7.0 Mobile/11A465 Safari/9537.53";
const UA_NEXUS_5: &str = "Mozilla/5.0 (Linux; Android 4.4.4; en-us; Nexus 5 Build/JOP40D) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/42.0.2307.2 Mobile Safari/537.36";
const UA_NEXUS_7: &str = "Mozilla/5.0 (Linux; Android 4.3; Nexus 7 Build/JSS15Q) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/42.0.2307.2 Safari/537.36";
const UA_GALAXY_S5: &str = "Mozilla/5.0 (Linux; Android 5.0; SM-G900P Build/LRX21T) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/48.0.2564.23 Mobile Safari/537.36";

#[rustfmt::skip]
const DEVICES: &[DeviceSpec] = &[
    DeviceSpec { title: "Apple iPhone 4", kind: "phone", width: 320, height: 480, pixel_ratio: 2.0, user_agent: UA_IPHONE_4 },
    DeviceSpec { title: "Apple iPhone 5", kind: "phone", width: 320, height: 568, pixel_ratio: 2.0, user_agent: UA_IOS_7 },
    DeviceSpec { title: "Apple iPhone 6", kind: "phone", width: 375, height: 667, pixel_ratio: 2.0, user_agent: UA_IOS_8 },
    DeviceSpec { title: "Apple iPhone 6 Plus", kind: "phone", width: 414, height: 736, pixel_ratio: 3.0, user_agent: UA_IOS_8 },
    DeviceSpec { title: "Apple iPad", kind: "tablet", width: 768, height: 1024, pixel_ratio: 2.0, user_agent: UA_IPAD },
    DeviceSpec { title: "Google Nexus 5", kind: "phone", width: 360, height: 640, pixel_ratio: 3.0, user_agent: UA_NEXUS_5 },
    DeviceSpec { title: "Google Nexus 7", kind: "tablet", width: 600, height: 960, pixel_ratio: 2.0, user_agent: UA_NEXUS_7 },
    DeviceSpec { title: "Samsung Galaxy S5", kind: "phone", width: 360, height: 640, pixel_ratio: 3.0, user_agent: UA_GALAXY_S5 },
    DeviceSpec { title: "Laptop with touch", kind: "notebook", width: 950, height: 1280, pixel_ratio: 1.0, user_agent: "" },
];

// (title, latency ms, throughput bytes/s)
const NETWORKS: &[(&str, u32, u32)] = &[
    ("Offline", 0, 0),
    ("GPRS", 500, 50 * 1024 / 8),
    ("Regular 2G", 300, 250 * 1024 / 8),
    ("Good 2G", 150, 450 * 1024 / 8),
    ("Regular 3G", 100, 750 * 1024 / 8),
    ("Good 3G", 40, 1536 * 1024 / 8),
    ("Regular 4G", 20, 4096 * 1024 / 8),
    ("DSL", 5, 2048 * 1024 / 8),
    ("WiFi", 2, 30720 * 1024 / 8),
];

/// Every known device, once upright and once as `horizontal <title>`.
pub fn devices() -> BTreeMap<String, DeviceProfile> {
    let mut map = BTreeMap::new();
    for spec in DEVICES {
        map.insert(
            spec.title.to_string(),
            DeviceProfile {
                kind: spec.kind,
                width: spec.width,
                height: spec.height,
                pixel_ratio: spec.pixel_ratio,
                user_agent: spec.user_agent,
            },
        );
        map.insert(
            format!("horizontal {}", spec.title),
            DeviceProfile {
                kind: spec.kind,
                width: spec.height,
                height: spec.width,
                pixel_ratio: spec.pixel_ratio,
                user_agent: spec.user_agent,
            },
        );
    }
    map
}

/// Network presets; download and upload share the preset's throughput.
pub fn networks() -> BTreeMap<String, NetworkProfile> {
    NETWORKS
        .iter()
        .map(|&(title, latency, throughput)| {
            (
                title.to_string(),
                NetworkProfile {
                    latency,
                    download: throughput,
                    upload: throughput,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_variant_swaps_dimensions() {
        let devices = devices();
        let upright = &devices["Apple iPhone 4"];
        let sideways = &devices["horizontal Apple iPhone 4"];
        assert_eq!((upright.width, upright.height), (320, 480));
        assert_eq!((sideways.width, sideways.height), (480, 320));
        assert_eq!(devices.len(), DEVICES.len() * 2);
    }

    #[test]
    fn networks_include_offline() {
        let networks = networks();
        assert_eq!(
            networks["Offline"],
            NetworkProfile {
                latency: 0,
                download: 0,
                upload: 0
            }
        );
        assert_eq!(networks["GPRS"].download, networks["GPRS"].upload);
    }
}
