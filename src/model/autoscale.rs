//! Autoscale rules and their current state.

use serde::{Deserialize, Serialize};

use crate::codec::Timestamp;

/// One autoscale rule; optional attributes stay absent unless the server sent
/// them, so rules loaded from a setting file only carry what the user wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoscaleRule {
    #[serde(alias = "@enabled")]
    pub enabled: Option<bool>,
    #[serde(alias = "@deleted")]
    pub deleted: Option<bool>,
    #[serde(alias = "@metric")]
    pub metric: String,
    #[serde(alias = "@version")]
    pub version: Option<i64>,
    #[serde(alias = "@updated")]
    pub updated: Option<Timestamp>,
    #[serde(alias = "@update-delivered-ok")]
    pub update_delivered_ok: Option<bool>,
    #[serde(alias = "@update-delivered")]
    pub update_delivered: Option<Timestamp>,
    #[serde(alias = "@allow-migration")]
    pub allow_migration: Option<bool>,
    #[serde(alias = "@allow-restart")]
    pub allow_restart: Option<bool>,
    pub limits: Option<Limits>,
    pub thresholds: Option<Thresholds>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    #[serde(alias = "@min")]
    pub min: i64,
    #[serde(alias = "@max")]
    pub max: i64,
    #[serde(alias = "@step")]
    pub step: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub up: Option<Threshold>,
    pub down: Option<Threshold>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Threshold {
    #[serde(alias = "@threshold")]
    pub threshold: Option<i64>,
    #[serde(alias = "@period")]
    pub period: i64,
}

/// Rules in effect and rules still being delivered to the node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Autoscale {
    pub current: Option<AutoscaleRuleSet>,
    pub ongoing: Option<AutoscaleRuleSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoscaleRuleSet {
    #[serde(alias = "autoscale-rule")]
    pub autoscale_rule: Vec<AutoscaleRule>,
}

/// Rules sent with autoscale-create and autoscale-update, also the shape of an
/// autoscale setting file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoscaleData {
    #[serde(alias = "autoscale-rule")]
    pub autoscale_rule: Vec<AutoscaleRule>,
}

/// Resource samples, scaling events and rule versions within a time window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConsumptionAndAutoscaleHistory {
    #[serde(alias = "resource-consumption-sample")]
    pub resource_consumption_sample: Vec<ResourceConsumptionSample>,
    #[serde(alias = "autoscale-event")]
    pub autoscale_event: Vec<AutoscaleEvent>,
    #[serde(alias = "autoscale-rule")]
    pub autoscale_rule: Vec<AutoscaleRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConsumptionSample {
    #[serde(alias = "@ram-usage")]
    pub ram_usage: i64,
    #[serde(alias = "@cpu-usage")]
    pub cpu_usage: i64,
    #[serde(alias = "@private-incoming-traffic")]
    pub private_incoming_traffic: i64,
    #[serde(alias = "@private-outgoing-traffic")]
    pub private_outgoing_traffic: i64,
    #[serde(alias = "@public-incoming-traffic")]
    pub public_incoming_traffic: i64,
    #[serde(alias = "@public-outgoing-traffic")]
    pub public_outgoing_traffic: i64,
    #[serde(alias = "@node-seq-no")]
    pub node_seq_no: i64,
    #[serde(alias = "@node-timestamp")]
    pub node_timestamp: Option<Timestamp>,
    #[serde(alias = "@paci-timestamp")]
    pub paci_timestamp: Option<Timestamp>,
    #[serde(alias = "@cpu")]
    pub cpu: i64,
    #[serde(alias = "@ram")]
    pub ram: i64,
    #[serde(alias = "@bandwidth")]
    pub bandwidth: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoscaleEvent {
    #[serde(alias = "@direction")]
    pub direction: String,
    #[serde(alias = "@rule-version")]
    pub rule_version: i64,
    #[serde(alias = "@node-seq-no")]
    pub node_seq_no: i64,
    #[serde(alias = "@node-timestamp")]
    pub node_timestamp: Option<Timestamp>,
    #[serde(alias = "@metric")]
    pub metric: String,
    #[serde(alias = "@new-value")]
    pub new_value: i64,
    #[serde(alias = "@node-uuid")]
    pub node_uuid: String,
    #[serde(alias = "@started")]
    pub started: String,
    #[serde(alias = "@ended")]
    pub ended: String,
    #[serde(alias = "@ended-ok")]
    pub ended_ok: bool,
}
