//! Server (container / virtual machine) payloads.

use serde::{Deserialize, Serialize};

use crate::codec::{Address, Timestamp};

use super::autoscale::Autoscale;

/// Generated credentials returned by create, recreate and console requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordResponse {
    pub message: String,
    pub password: String,
}

/// Servers owned by the current user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeList {
    #[serde(alias = "ve-info")]
    pub ve_info: Vec<VeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeInfo {
    #[serde(alias = "@id")]
    pub id: i64,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@hostname")]
    pub hostname: String,
    #[serde(alias = "@state")]
    pub state: String,
    #[serde(alias = "@subscription-id")]
    pub subscription_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cpu {
    #[serde(alias = "@number")]
    pub number: i64,
    #[serde(alias = "@power")]
    pub power: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeDisk {
    #[serde(alias = "@storage-id")]
    pub storage_id: String,
    #[serde(alias = "@created")]
    pub created: bool,
    #[serde(alias = "@global-id")]
    pub global_id: i64,
    #[serde(alias = "@id")]
    pub id: i64,
    #[serde(alias = "@type")]
    pub r#type: String,
    #[serde(alias = "@size")]
    pub size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    #[serde(alias = "template-info")]
    pub template_info: TemplateInfo,
    #[serde(alias = "os-info")]
    pub os_info: OsInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateInfo {
    #[serde(alias = "@name")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsInfo {
    #[serde(alias = "@type")]
    pub r#type: String,
    #[serde(alias = "@technology")]
    pub technology: String,
    #[serde(alias = "@family")]
    pub family: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    #[serde(alias = "@private-ip")]
    pub private_ip: Option<Address>,
    #[serde(alias = "public-ip")]
    pub public_ip: Vec<PublicIp>,
    #[serde(alias = "public-ip6")]
    pub public_ip6: Vec<PublicIp>,
}

/// Public address assignment; IPv4 entries also carry a chunk reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicIp {
    #[serde(alias = "@chunk-ref")]
    pub chunk_ref: Option<i64>,
    #[serde(alias = "@id")]
    pub id: i64,
    #[serde(alias = "@address")]
    pub address: Option<Address>,
    #[serde(alias = "@gateway")]
    pub gateway: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupScheduleRef {
    #[serde(alias = "@name")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Console {
    pub address: Option<Address>,
    pub port: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Admin {
    #[serde(alias = "@login")]
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Traffic {
    #[serde(alias = "@sent")]
    pub sent: i64,
    #[serde(alias = "@received")]
    pub received: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    #[serde(alias = "@app-template")]
    pub app_template: String,
    #[serde(alias = "@for-os")]
    pub for_os: String,
    #[serde(alias = "@installed-at")]
    pub installed_at: String,
    #[serde(alias = "@installed-ok")]
    pub installed_ok: bool,
    #[serde(alias = "@uninstalled-at")]
    pub uninstalled_at: String,
    #[serde(alias = "@uninstalled-ok")]
    pub uninstalled_ok: bool,
    #[serde(alias = "@app-template-id")]
    pub app_template_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConsumption {
    #[serde(alias = "@cpu")]
    pub cpu: i64,
    #[serde(alias = "@ram")]
    pub ram: i64,
    #[serde(alias = "private-traffic")]
    pub private_traffic: Traffic,
    #[serde(alias = "public-traffic")]
    pub public_traffic: Traffic,
}

/// Full server description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ve {
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
    #[serde(alias = "app-info")]
    pub app_info: Vec<AppInfo>,
    #[serde(alias = "load-balancer")]
    pub load_balancer: String,
    #[serde(alias = "steady-state")]
    pub steady_state: String,
    pub autoscale: Option<Autoscale>,
    #[serde(alias = "current-resource-consumption")]
    pub current_resource_consumption: ResourceConsumption,
}

/// Configuration snapshots of a server over time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeHistory {
    #[serde(alias = "ve-snapshot")]
    pub ve_snapshot: Vec<VeSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeSnapshot {
    #[serde(alias = "@cpu")]
    pub cpu: i64,
    #[serde(alias = "@ram")]
    pub ram: i64,
    #[serde(alias = "@local-disk")]
    pub local_disk: i64,
    #[serde(alias = "@nbd")]
    pub nbd: i64,
    #[serde(alias = "@bandwidth")]
    pub bandwidth: i64,
    #[serde(alias = "@last-touched-from")]
    pub last_touched_from: String,
    #[serde(alias = "@state")]
    pub state: String,
    #[serde(alias = "@steady-state")]
    pub steady_state: String,
    #[serde(alias = "@last-changed-by")]
    pub last_changed_by: String,
    #[serde(alias = "@event-timestamp")]
    pub event_timestamp: Option<Timestamp>,
    #[serde(alias = "@no-of-public-ip")]
    pub no_of_public_ip: i64,
    #[serde(alias = "@no-of-public-ipv6")]
    pub no_of_public_ipv6: i64,
    #[serde(alias = "@is-lb")]
    pub is_lb: bool,
    #[serde(alias = "@private-incoming-traffic")]
    pub private_incoming_traffic: i64,
    #[serde(alias = "@private-outgoing-traffic")]
    pub private_outgoing_traffic: i64,
    #[serde(alias = "@public-incoming-traffic")]
    pub public_incoming_traffic: i64,
    #[serde(alias = "@public-outgoing-traffic")]
    pub public_outgoing_traffic: i64,
}

/// Resource usage of a server within a time window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeResourceUsageReport {
    #[serde(alias = "@ve-name")]
    pub ve_name: String,
    #[serde(alias = "@ve-id")]
    pub ve_id: i64,
    #[serde(alias = "@os")]
    pub os: String,
    #[serde(alias = "@technology")]
    pub technology: String,
    #[serde(alias = "@life-time-in-minutes")]
    pub life_time_in_minutes: i64,
    #[serde(alias = "@is-load-balancer")]
    pub is_load_balancer: bool,
    #[serde(alias = "resource-usage")]
    pub resource_usage: Vec<ResourceUsage>,
    #[serde(alias = "ve-traffic")]
    pub ve_traffic: Vec<VeTraffic>,
    #[serde(alias = "active-backup-schedule")]
    pub active_backup_schedule: Vec<ActiveBackupSchedule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceUsage {
    #[serde(alias = "@value")]
    pub value: i64,
    #[serde(alias = "@resource-usage-type")]
    pub resource_usage_type: String,
    #[serde(alias = "@resource-type")]
    pub resource_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeTraffic {
    #[serde(alias = "@traffic-type")]
    pub traffic_type: String,
    #[serde(alias = "@used")]
    pub used: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveBackupSchedule {
    #[serde(alias = "@schedule-name")]
    pub schedule_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::from_xml;

    const VE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ve>
  <id>12</id>
  <uuid>a1b2</uuid>
  <name>web01</name>
  <hostname>web01.example.com</hostname>
  <description>front end</description>
  <cpu number="2" power="1600"/>
  <ram-size>1024</ram-size>
  <bandwidth>100000</bandwidth>
  <platform>
    <template-info name="centos-7"/>
    <os-info type="linux" technology="CT"/>
  </platform>
  <network private-ip="10.1.0.5/16">
    <public-ip chunk-ref="3" id="7" address="203.0.113.10/24" gateway="203.0.113.1"/>
  </network>
  <console>
    <address>198.51.100.4</address>
    <port>5900</port>
  </console>
  <state>STARTED</state>
  <admin login="root"><password>secret</password></admin>
  <current-resource-consumption cpu="12" ram="256">
    <private-traffic sent="1" received="2"/>
    <public-traffic sent="3" received="4"/>
  </current-resource-consumption>
</ve>"#;

    #[test]
    fn test_decode_ve() {
        let ve: Ve = from_xml(VE_XML).unwrap();
        assert_eq!(ve.id, 12);
        assert_eq!(ve.name, "web01");
        assert_eq!(ve.cpu.number, 2);
        assert_eq!(ve.ram_size, 1024);
        assert_eq!(ve.platform.template_info.name, "centos-7");
        assert_eq!(
            ve.network.private_ip.map(|a| a.to_text()).as_deref(),
            Some("10.1.0.5/16")
        );
        assert_eq!(ve.network.public_ip.len(), 1);
        assert_eq!(ve.network.public_ip[0].chunk_ref, Some(3));
        assert_eq!(ve.console.port, 5900);
        assert_eq!(ve.admin.login, "root");
        assert_eq!(ve.admin.password, "secret");
        assert_eq!(ve.current_resource_consumption.public_traffic.received, 4);
        assert!(ve.autoscale.is_none());
    }

    #[test]
    fn test_decode_history_timestamps() {
        let xml = r#"<ve-history>
  <ve-snapshot cpu="1" ram="512" state="STARTED" event-timestamp="2014-05-20 03:04:05.12+09"/>
  <ve-snapshot cpu="2" ram="1024" state="STOPPED" event-timestamp="2014-05-21 03:04:05-0700"/>
</ve-history>"#;
        let history: VeHistory = from_xml(xml).unwrap();
        assert_eq!(history.ve_snapshot.len(), 2);
        assert_eq!(
            history.ve_snapshot[0].event_timestamp.unwrap().to_text(),
            "2014-05-20 03:04:05.120000+0900"
        );
        assert_eq!(
            history.ve_snapshot[1].event_timestamp.unwrap().to_text(),
            "2014-05-21 03:04:05.000000-0700"
        );
    }

    #[test]
    fn test_decode_rejects_invalid_address() {
        let xml = r#"<network private-ip="10.1.0.5/99"/>"#;
        assert!(from_xml::<Network>(xml).is_err());
    }
}
