//! Records exchanged with the service.
//!
//! Responses decode from XML through element and attribute aliases, while
//! JSON, TOML and text output use the Rust field names.

pub mod autoscale;
pub mod backup;
pub mod catalog;
pub mod firewall;
pub mod image;
pub mod loadbalancer;
pub mod request;
pub mod server;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::error::{PaciError, PaciResult};

pub use autoscale::{
    Autoscale, AutoscaleData, AutoscaleRule, Limits, ResourceConsumptionAndAutoscaleHistory,
    Threshold, Thresholds,
};
pub use backup::{backup_id, Backup, BackupSchedule, BackupScheduleList, VeBackups};
pub use catalog::{ApplicationList, ApplicationTemplate, Template, TemplateList};
pub use firewall::{Firewall, FirewallRule};
pub use image::{ImageInfo, ImageList, VeImage};
pub use loadbalancer::{LbList, LbSummary, LoadBalancer};
pub use request::{
    AutoscaleBody, ChangeCpu, CreateVe, CreateVeBody, FirewallBody, ReconfigureIp, ReconfigureVe,
    ReconfigureVeBody,
};
pub use server::{PasswordResponse, Ve, VeHistory, VeInfo, VeList, VeResourceUsageReport};

/// Decode a response body.
pub fn from_xml<T: DeserializeOwned>(body: &str) -> PaciResult<T> {
    quick_xml::de::from_str(body).map_err(|e| PaciError::decode("XML", e))
}

/// Encode a request body.
pub fn to_xml<T: Serialize>(value: &T) -> PaciResult<String> {
    quick_xml::se::to_string(value).map_err(|e| PaciError::Encode(e.to_string()))
}
