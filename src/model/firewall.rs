//! Firewall rules of a server.

use serde::{Deserialize, Serialize};

use crate::codec::Address;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Firewall {
    pub rule: Vec<FirewallRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallRule {
    /// Assigned by the service
    #[serde(alias = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@protocol")]
    pub protocol: String,
    #[serde(alias = "@local-port")]
    pub local_port: i64,
    #[serde(alias = "@remote-port")]
    pub remote_port: i64,
    #[serde(alias = "remote-net")]
    pub remote_net: Vec<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::from_xml;

    #[test]
    fn test_decode_firewall() {
        let xml = r#"<firewall>
  <rule id="1" name="ssh" protocol="TCP" local-port="22" remote-port="0">
    <remote-net>192.0.2.0/24</remote-net>
    <remote-net>198.51.100.7</remote-net>
  </rule>
  <rule id="2" name="web" protocol="TCP" local-port="80" remote-port="0"/>
</firewall>"#;
        let firewall: Firewall = from_xml(xml).unwrap();
        assert_eq!(firewall.rule.len(), 2);
        assert_eq!(firewall.rule[0].id, Some(1));
        assert_eq!(firewall.rule[0].local_port, 22);
        let nets: Vec<String> = firewall.rule[0].remote_net.iter().map(Address::to_text).collect();
        assert_eq!(nets, vec!["192.0.2.0/24", "198.51.100.7"]);
        assert!(firewall.rule[1].remote_net.is_empty());
    }

    #[test]
    fn test_setting_file_shape() {
        let toml_text = r#"
[[rule]]
name = "ssh"
protocol = "TCP"
local_port = 22
remote_net = ["10.0.0.0/8"]
"#;
        let firewall: Firewall = toml::from_str(toml_text).unwrap();
        assert_eq!(firewall.rule[0].id, None);
        assert_eq!(firewall.rule[0].remote_net[0].to_text(), "10.0.0.0/8");
    }
}
