//! Server images.

use serde::{Deserialize, Serialize};

use crate::codec::Timestamp;

use super::server::Platform;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageList {
    #[serde(alias = "image-info")]
    pub image_info: Vec<ImageInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageInfo {
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@description")]
    pub description: String,
    #[serde(alias = "@size")]
    pub size: i64,
    #[serde(alias = "@created")]
    pub created: Option<Timestamp>,
    #[serde(alias = "@subscription-id")]
    pub subscription_id: i64,
    #[serde(alias = "@image-of")]
    pub image_of: String,
    #[serde(alias = "@location")]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeImage {
    #[serde(alias = "@id")]
    pub id: i64,
    #[serde(alias = "@bnode-uuid")]
    pub bnode_uuid: String,
    #[serde(alias = "@customer-id")]
    pub customer_id: i64,
    #[serde(alias = "@subscription-id")]
    pub subscription_id: i64,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@hostname")]
    pub hostname: String,
    pub description: String,
    #[serde(alias = "@cpu-number")]
    pub cpu_number: i64,
    #[serde(alias = "@cpu-power")]
    pub cpu_power: i64,
    #[serde(alias = "@ram-size")]
    pub ram_size: i64,
    #[serde(alias = "@bandwidth")]
    pub bandwidth: i64,
    #[serde(alias = "@login")]
    pub login: String,
    #[serde(alias = "@primary-disk-id")]
    pub primary_disk_id: i64,
    #[serde(alias = "@image-size")]
    pub image_size: i64,
    #[serde(alias = "@created")]
    pub created: Option<Timestamp>,
    #[serde(alias = "@image-of")]
    pub image_of: String,
    #[serde(alias = "@no-of-public-ip")]
    pub no_of_public_ip: i64,
    #[serde(alias = "@no-of-public-ipv6")]
    pub no_of_public_ipv6: i64,
    #[serde(alias = "@custom-ns")]
    pub custom_ns: bool,
    pub disks: Vec<ImageDisk>,
    pub platform: Platform,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDisk {
    #[serde(alias = "@id")]
    pub id: i64,
    #[serde(alias = "@type")]
    pub r#type: String,
    #[serde(alias = "@primary")]
    pub primary: bool,
    #[serde(alias = "@size")]
    pub size: i64,
}
