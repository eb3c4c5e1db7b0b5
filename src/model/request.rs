//! Request bodies sent to the service.
//!
//! Requests are loaded from setting files with the Rust field names. The
//! `*Body` types borrow them and carry the service's XML names on the way out.

use serde::{Deserialize, Serialize};

use crate::codec::{Address, AddressList, Timestamp};

use super::autoscale::{AutoscaleData, AutoscaleRule, Limits, Threshold, Thresholds};
use super::firewall::{Firewall, FirewallRule};

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// New server specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateVe {
    pub custom_ns: bool,
    pub name: String,
    pub hostname: String,
    pub description: String,
    pub subscription_id: i64,
    pub cpu: CpuSpec,
    pub ram_size: i64,
    pub bandwidth: i64,
    pub no_of_public_ip: i64,
    pub no_of_public_ipv6: i64,
    pub ve_disk: DiskSpec,
    pub platform: PlatformSpec,
    pub backup_schedule: Option<ScheduleSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuSpec {
    pub number: i64,
    pub power: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskSpec {
    pub local: bool,
    pub primary: bool,
    pub size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSpec {
    pub template_info: TemplateSpec,
    pub os_info: OsSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSpec {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsSpec {
    pub r#type: String,
    pub technology: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSpec {
    pub name: String,
}

/// Changes applied to a running server. Absent parts are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconfigureVe {
    pub description: Option<String>,
    pub change_cpu: Option<ChangeCpu>,
    pub ram_size: Option<i64>,
    pub bandwidth: Option<i64>,
    pub reconfigure_ipv4: Option<ReconfigureIp>,
    pub reconfigure_ipv6: Option<ReconfigureIp>,
    pub primary_disk_size: Option<i64>,
    pub custom_ns: Option<i64>,
}

impl ReconfigureVe {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Name of the first address family asked to both add and drop addresses.
    pub fn conflicting_family(&self) -> Option<&'static str> {
        let conflicts = |ip: &Option<ReconfigureIp>| {
            ip.as_ref()
                .is_some_and(|ip| ip.add_ip.is_some() && ip.drop_ip.is_some())
        };
        if conflicts(&self.reconfigure_ipv4) {
            Some("IPv4")
        } else if conflicts(&self.reconfigure_ipv6) {
            Some("IPv6")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeCpu {
    pub number: Option<i64>,
    pub power: Option<i64>,
}

/// Adds public addresses or drops listed ones. A request carrying both is
/// refused before it is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconfigureIp {
    pub add_ip: Option<AddIp>,
    pub drop_ip: Option<DropIp>,
}

impl ReconfigureIp {
    pub fn add(number: i64) -> Self {
        Self {
            add_ip: Some(AddIp { number }),
            drop_ip: None,
        }
    }

    pub fn drop(ip: AddressList) -> Self {
        Self {
            add_ip: None,
            drop_ip: Some(DropIp { ip }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddIp {
    pub number: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropIp {
    pub ip: AddressList,
}

#[derive(Debug, Serialize)]
#[serde(rename = "ve")]
pub struct CreateVeBody<'a> {
    #[serde(rename = "@custom-ns", skip_serializing_if = "is_false")]
    custom_ns: bool,
    name: &'a str,
    hostname: &'a str,
    description: &'a str,
    #[serde(rename = "subscription-id", skip_serializing_if = "is_zero")]
    subscription_id: i64,
    cpu: CpuBody,
    #[serde(rename = "ram-size")]
    ram_size: i64,
    bandwidth: i64,
    #[serde(rename = "no-of-public-ip", skip_serializing_if = "is_zero")]
    no_of_public_ip: i64,
    #[serde(rename = "no-of-public-ipv6", skip_serializing_if = "is_zero")]
    no_of_public_ipv6: i64,
    #[serde(rename = "ve-disk")]
    ve_disk: DiskBody,
    platform: PlatformBody<'a>,
    #[serde(rename = "backup-schedule", skip_serializing_if = "Option::is_none")]
    backup_schedule: Option<NameBody<'a>>,
}

#[derive(Debug, Serialize)]
struct CpuBody {
    #[serde(rename = "@number")]
    number: i64,
    #[serde(rename = "@power")]
    power: i64,
}

#[derive(Debug, Serialize)]
struct DiskBody {
    #[serde(rename = "@local")]
    local: bool,
    #[serde(rename = "@primary", skip_serializing_if = "is_false")]
    primary: bool,
    #[serde(rename = "@size")]
    size: i64,
}

#[derive(Debug, Serialize)]
struct PlatformBody<'a> {
    #[serde(rename = "template-info")]
    template_info: NameBody<'a>,
    #[serde(rename = "os-info")]
    os_info: OsBody<'a>,
}

#[derive(Debug, Serialize)]
struct NameBody<'a> {
    #[serde(rename = "@name")]
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct OsBody<'a> {
    #[serde(rename = "@type")]
    r#type: &'a str,
    #[serde(rename = "@technology")]
    technology: &'a str,
}

impl<'a> From<&'a CreateVe> for CreateVeBody<'a> {
    fn from(ve: &'a CreateVe) -> Self {
        Self {
            custom_ns: ve.custom_ns,
            name: &ve.name,
            hostname: &ve.hostname,
            description: &ve.description,
            subscription_id: ve.subscription_id,
            cpu: CpuBody {
                number: ve.cpu.number,
                power: ve.cpu.power,
            },
            ram_size: ve.ram_size,
            bandwidth: ve.bandwidth,
            no_of_public_ip: ve.no_of_public_ip,
            no_of_public_ipv6: ve.no_of_public_ipv6,
            ve_disk: DiskBody {
                local: ve.ve_disk.local,
                primary: ve.ve_disk.primary,
                size: ve.ve_disk.size,
            },
            platform: PlatformBody {
                template_info: NameBody {
                    name: &ve.platform.template_info.name,
                },
                os_info: OsBody {
                    r#type: &ve.platform.os_info.r#type,
                    technology: &ve.platform.os_info.technology,
                },
            },
            backup_schedule: ve
                .backup_schedule
                .as_ref()
                .map(|schedule| NameBody { name: &schedule.name }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename = "reconfigure-ve")]
pub struct ReconfigureVeBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "change-cpu", skip_serializing_if = "Option::is_none")]
    change_cpu: Option<ChangeCpuBody>,
    #[serde(rename = "ram-size", skip_serializing_if = "Option::is_none")]
    ram_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bandwidth: Option<i64>,
    #[serde(rename = "reconfigure-ipv4", skip_serializing_if = "Option::is_none")]
    reconfigure_ipv4: Option<ReconfigureIpBody<'a>>,
    #[serde(rename = "reconfigure-ipv6", skip_serializing_if = "Option::is_none")]
    reconfigure_ipv6: Option<ReconfigureIpBody<'a>>,
    #[serde(rename = "primary-disk-size", skip_serializing_if = "Option::is_none")]
    primary_disk_size: Option<i64>,
    #[serde(rename = "custom-ns", skip_serializing_if = "Option::is_none")]
    custom_ns: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ChangeCpuBody {
    #[serde(rename = "@number", skip_serializing_if = "Option::is_none")]
    number: Option<i64>,
    #[serde(rename = "@power", skip_serializing_if = "Option::is_none")]
    power: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ReconfigureIpBody<'a> {
    #[serde(rename = "add-ip", skip_serializing_if = "Option::is_none")]
    add_ip: Option<AddIpBody>,
    #[serde(rename = "drop-ip", skip_serializing_if = "Option::is_none")]
    drop_ip: Option<DropIpBody<'a>>,
}

#[derive(Debug, Serialize)]
struct AddIpBody {
    #[serde(rename = "@number")]
    number: i64,
}

#[derive(Debug, Serialize)]
struct DropIpBody<'a> {
    #[serde(rename = "@ip")]
    ip: &'a AddressList,
}

impl<'a> From<&'a ReconfigureVe> for ReconfigureVeBody<'a> {
    fn from(request: &'a ReconfigureVe) -> Self {
        Self {
            description: request.description.as_deref(),
            change_cpu: request.change_cpu.as_ref().map(|cpu| ChangeCpuBody {
                number: cpu.number,
                power: cpu.power,
            }),
            ram_size: request.ram_size,
            bandwidth: request.bandwidth,
            reconfigure_ipv4: request.reconfigure_ipv4.as_ref().map(ReconfigureIpBody::from),
            reconfigure_ipv6: request.reconfigure_ipv6.as_ref().map(ReconfigureIpBody::from),
            primary_disk_size: request.primary_disk_size,
            custom_ns: request.custom_ns,
        }
    }
}

impl<'a> From<&'a ReconfigureIp> for ReconfigureIpBody<'a> {
    fn from(ip: &'a ReconfigureIp) -> Self {
        Self {
            add_ip: ip.add_ip.as_ref().map(|add| AddIpBody { number: add.number }),
            drop_ip: ip.drop_ip.as_ref().map(|drop| DropIpBody { ip: &drop.ip }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename = "firewall")]
pub struct FirewallBody<'a> {
    rule: Vec<FirewallRuleBody<'a>>,
}

#[derive(Debug, Serialize)]
struct FirewallRuleBody<'a> {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(rename = "@name")]
    name: &'a str,
    #[serde(rename = "@protocol")]
    protocol: &'a str,
    #[serde(rename = "@local-port")]
    local_port: i64,
    #[serde(rename = "@remote-port")]
    remote_port: i64,
    #[serde(rename = "remote-net")]
    remote_net: &'a [Address],
}

impl<'a> From<&'a Firewall> for FirewallBody<'a> {
    fn from(firewall: &'a Firewall) -> Self {
        Self {
            rule: firewall.rule.iter().map(FirewallRuleBody::from).collect(),
        }
    }
}

impl<'a> From<&'a FirewallRule> for FirewallRuleBody<'a> {
    fn from(rule: &'a FirewallRule) -> Self {
        Self {
            id: rule.id,
            name: &rule.name,
            protocol: &rule.protocol,
            local_port: rule.local_port,
            remote_port: rule.remote_port,
            remote_net: &rule.remote_net,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename = "autoscale-data")]
pub struct AutoscaleBody<'a> {
    #[serde(rename = "autoscale-rule")]
    autoscale_rule: Vec<AutoscaleRuleBody<'a>>,
}

#[derive(Debug, Serialize)]
struct AutoscaleRuleBody<'a> {
    #[serde(rename = "@enabled", skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(rename = "@deleted", skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
    #[serde(rename = "@metric")]
    metric: &'a str,
    #[serde(rename = "@version", skip_serializing_if = "Option::is_none")]
    version: Option<i64>,
    #[serde(rename = "@updated", skip_serializing_if = "Option::is_none")]
    updated: Option<Timestamp>,
    #[serde(rename = "@update-delivered-ok", skip_serializing_if = "Option::is_none")]
    update_delivered_ok: Option<bool>,
    #[serde(rename = "@update-delivered", skip_serializing_if = "Option::is_none")]
    update_delivered: Option<Timestamp>,
    #[serde(rename = "@allow-migration", skip_serializing_if = "Option::is_none")]
    allow_migration: Option<bool>,
    #[serde(rename = "@allow-restart", skip_serializing_if = "Option::is_none")]
    allow_restart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limits: Option<LimitsBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thresholds: Option<ThresholdsBody>,
}

#[derive(Debug, Serialize)]
struct LimitsBody {
    #[serde(rename = "@min")]
    min: i64,
    #[serde(rename = "@max")]
    max: i64,
    #[serde(rename = "@step")]
    step: i64,
}

#[derive(Debug, Serialize)]
struct ThresholdsBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    up: Option<ThresholdBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    down: Option<ThresholdBody>,
}

#[derive(Debug, Serialize)]
struct ThresholdBody {
    #[serde(rename = "@threshold", skip_serializing_if = "Option::is_none")]
    threshold: Option<i64>,
    #[serde(rename = "@period")]
    period: i64,
}

impl<'a> From<&'a AutoscaleData> for AutoscaleBody<'a> {
    fn from(data: &'a AutoscaleData) -> Self {
        Self {
            autoscale_rule: data.autoscale_rule.iter().map(AutoscaleRuleBody::from).collect(),
        }
    }
}

impl<'a> From<&'a AutoscaleRule> for AutoscaleRuleBody<'a> {
    fn from(rule: &'a AutoscaleRule) -> Self {
        Self {
            enabled: rule.enabled,
            deleted: rule.deleted,
            metric: &rule.metric,
            version: rule.version,
            updated: rule.updated,
            update_delivered_ok: rule.update_delivered_ok,
            update_delivered: rule.update_delivered,
            allow_migration: rule.allow_migration,
            allow_restart: rule.allow_restart,
            limits: rule.limits.as_ref().map(LimitsBody::from),
            thresholds: rule.thresholds.as_ref().map(ThresholdsBody::from),
        }
    }
}

impl From<&Limits> for LimitsBody {
    fn from(limits: &Limits) -> Self {
        Self {
            min: limits.min,
            max: limits.max,
            step: limits.step,
        }
    }
}

impl From<&Thresholds> for ThresholdsBody {
    fn from(thresholds: &Thresholds) -> Self {
        Self {
            up: thresholds.up.as_ref().map(ThresholdBody::from),
            down: thresholds.down.as_ref().map(ThresholdBody::from),
        }
    }
}

impl From<&Threshold> for ThresholdBody {
    fn from(threshold: &Threshold) -> Self {
        Self {
            threshold: threshold.threshold,
            period: threshold.period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::to_xml;

    #[test]
    fn test_reconfigure_body() {
        let request = ReconfigureVe {
            description: Some("web".to_string()),
            change_cpu: Some(ChangeCpu {
                number: Some(2),
                power: None,
            }),
            reconfigure_ipv4: Some(ReconfigureIp::drop(
                vec![
                    Address::parse("192.0.2.1").unwrap(),
                    Address::parse("192.0.2.2").unwrap(),
                ]
                .into(),
            )),
            reconfigure_ipv6: Some(ReconfigureIp::add(1)),
            ..Default::default()
        };
        let xml = to_xml(&ReconfigureVeBody::from(&request)).unwrap();
        assert!(xml.starts_with("<reconfigure-ve>"), "{xml}");
        assert!(xml.contains("<description>web</description>"), "{xml}");
        assert!(xml.contains("number=\"2\""), "{xml}");
        assert!(!xml.contains("power="), "{xml}");
        assert!(xml.contains("<drop-ip ip=\"192.0.2.1 192.0.2.2\""), "{xml}");
        assert!(xml.contains("<add-ip number=\"1\""), "{xml}");
        assert!(!xml.contains("ram-size"), "{xml}");
    }

    #[test]
    fn test_reconfigure_from_setting_file() {
        let toml_text = r#"
description = "db"
ram_size = 2048

[reconfigure_ipv4.drop_ip]
ip = "192.0.2.1 192.0.2.9"

[reconfigure_ipv4.add_ip]
number = 1
"#;
        let request: ReconfigureVe = toml::from_str(toml_text).unwrap();
        assert_eq!(request.ram_size, Some(2048));
        assert_eq!(request.conflicting_family(), Some("IPv4"));

        let single = ReconfigureVe {
            reconfigure_ipv6: Some(ReconfigureIp::add(2)),
            ..Default::default()
        };
        assert_eq!(single.conflicting_family(), None);
    }

    #[test]
    fn test_empty_reconfigure() {
        assert!(ReconfigureVe::default().is_empty());
        let request = ReconfigureVe {
            bandwidth: Some(100),
            ..Default::default()
        };
        assert!(!request.is_empty());
    }

    #[test]
    fn test_create_body_from_setting() {
        let toml_text = r#"
name = "web1"
hostname = "web1.example.com"
ram_size = 1024
bandwidth = 100

[cpu]
number = 2
power = 1600

[ve_disk]
local = true
size = 10

[platform.template_info]
name = "centos-7"

[platform.os_info]
type = "linux"
technology = "CT"
"#;
        let ve: CreateVe = toml::from_str(toml_text).unwrap();
        assert_eq!(ve.cpu.number, 2);
        assert_eq!(ve.platform.os_info.r#type, "linux");

        let xml = to_xml(&CreateVeBody::from(&ve)).unwrap();
        assert!(xml.starts_with("<ve>"), "{xml}");
        assert!(xml.contains("<name>web1</name>"), "{xml}");
        assert!(xml.contains("<ram-size>1024</ram-size>"), "{xml}");
        assert!(xml.contains("name=\"centos-7\""), "{xml}");
        assert!(!xml.contains("subscription-id"), "{xml}");
        assert!(!xml.contains("backup-schedule"), "{xml}");
    }

    #[test]
    fn test_firewall_body() {
        let firewall = Firewall {
            rule: vec![FirewallRule {
                id: None,
                name: "ssh".to_string(),
                protocol: "TCP".to_string(),
                local_port: 22,
                remote_port: 0,
                remote_net: vec![Address::parse("10.0.0.0/8").unwrap()],
            }],
        };
        let xml = to_xml(&FirewallBody::from(&firewall)).unwrap();
        assert!(xml.starts_with("<firewall>"), "{xml}");
        assert!(xml.contains("local-port=\"22\""), "{xml}");
        assert!(!xml.contains("id="), "{xml}");
        assert!(xml.contains("<remote-net>10.0.0.0/8</remote-net>"), "{xml}");
    }

    #[test]
    fn test_autoscale_body() {
        let data = AutoscaleData {
            autoscale_rule: vec![AutoscaleRule {
                metric: "CPU".to_string(),
                enabled: Some(true),
                limits: Some(Limits {
                    min: 1,
                    max: 4,
                    step: 1,
                }),
                ..Default::default()
            }],
        };
        let xml = to_xml(&AutoscaleBody::from(&data)).unwrap();
        assert!(xml.starts_with("<autoscale-data>"), "{xml}");
        assert!(xml.contains("<autoscale-rule"), "{xml}");
        assert!(xml.contains("metric=\"CPU\""), "{xml}");
        assert!(xml.contains("max=\"4\""), "{xml}");
        assert!(!xml.contains("thresholds"), "{xml}");
        assert!(!xml.contains("version="), "{xml}");
    }
}
