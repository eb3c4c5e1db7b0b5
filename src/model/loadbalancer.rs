//! Load balancers.

use serde::{Deserialize, Serialize};

use crate::codec::Address;

use super::server::{Admin, BackupScheduleRef, Console, Cpu, Network, Platform, VeDisk};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LbList {
    #[serde(alias = "load-balancer")]
    pub load_balancer: Vec<LbSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LbSummary {
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@state")]
    pub state: String,
    #[serde(alias = "@subscription-id")]
    pub subscription_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadBalancer {
    pub id: i64,
    pub uuid: String,
    #[serde(alias = "hnId")]
    pub hn_id: i64,
    #[serde(alias = "customer-id")]
    pub customer_id: i64,
    pub name: String,
    pub hostname: String,
    pub description: String,
    #[serde(alias = "subscription-id")]
    pub subscription_id: i64,
    pub cpu: Cpu,
    #[serde(alias = "ram-size")]
    pub ram_size: i64,
    pub bandwidth: i64,
    #[serde(alias = "ve-disk")]
    pub ve_disk: VeDisk,
    pub platform: Platform,
    pub network: Network,
    #[serde(alias = "backup-schedule")]
    pub backup_schedule: BackupScheduleRef,
    pub console: Console,
    pub state: String,
    #[serde(alias = "primary-disk-id")]
    pub primary_disk_id: i64,
    #[serde(alias = "template-id")]
    pub template_id: i64,
    pub admin: Admin,
    #[serde(alias = "last-operation-rc")]
    pub last_operation_rc: i64,
    #[serde(alias = "used-by")]
    pub used_by: Vec<UsedBy>,
}

/// Server attached behind the load balancer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsedBy {
    #[serde(alias = "@ve-name")]
    pub ve_name: String,
    #[serde(alias = "@ip")]
    pub ip: Option<Address>,
}
