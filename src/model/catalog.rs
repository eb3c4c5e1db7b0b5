//! OS templates and application templates offered by the service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateList {
    pub template: Vec<Template>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    #[serde(alias = "@id")]
    pub id: i64,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@osType")]
    pub os_type: String,
    #[serde(alias = "@technology")]
    pub technology: String,
    #[serde(alias = "@active")]
    pub active: bool,
    #[serde(alias = "@default")]
    pub default: bool,
    #[serde(alias = "@root-login")]
    pub root_login: String,
    #[serde(alias = "@min-hdd-size")]
    pub min_hdd_size: i64,
    #[serde(alias = "@pwd-regex")]
    pub pwd_regex: String,
    #[serde(alias = "@high-watermark-for-delivery")]
    pub high_watermark_for_delivery: i64,
    #[serde(alias = "@low-watermark-for-delivery")]
    pub low_watermark_for_delivery: i64,
    pub option: Vec<TemplateOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOption {
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@value")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationList {
    #[serde(alias = "application-template")]
    pub application_template: Vec<ApplicationTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationTemplate {
    #[serde(alias = "@id")]
    pub id: i64,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@for-os")]
    pub for_os: String,
    pub description: String,
}
