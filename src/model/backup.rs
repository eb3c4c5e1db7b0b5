//! Backups and backup schedules.

use serde::{Deserialize, Serialize};

use crate::codec::Timestamp;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backup {
    #[serde(alias = "@im-backup-id")]
    pub im_backup_id: i64,
    #[serde(alias = "@cloud-backup-id")]
    pub cloud_backup_id: String,
    #[serde(alias = "@schedule-name")]
    pub schedule_name: String,
    #[serde(alias = "@started")]
    pub started: Option<Timestamp>,
    #[serde(alias = "@ended")]
    pub ended: Option<Timestamp>,
    #[serde(alias = "@successful")]
    pub successful: bool,
    #[serde(alias = "@backup-size")]
    pub backup_size: i64,
    #[serde(alias = "@backup-node-name")]
    pub backup_node_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeBackups {
    pub backup: Vec<Backup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupScheduleList {
    #[serde(alias = "backup-schedule")]
    pub backup_schedule: Vec<BackupSchedule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSchedule {
    #[serde(alias = "@id")]
    pub id: i64,
    #[serde(alias = "@name")]
    pub name: String,
    pub description: String,
    #[serde(alias = "@enabled")]
    pub enabled: bool,
    #[serde(alias = "@backups-to-keep")]
    pub backups_to_keep: i64,
    #[serde(alias = "@no-of-incremental")]
    pub no_of_incremental: i64,
}

/// Backup ids are sent wrapped in braces.
pub fn backup_id(id: &str) -> String {
    let mut wrapped = String::with_capacity(id.len() + 2);
    if !id.starts_with('{') {
        wrapped.push('{');
    }
    wrapped.push_str(id);
    if !id.ends_with('}') {
        wrapped.push('}');
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::from_xml;

    #[test]
    fn test_backup_id_wrapping() {
        assert_eq!(backup_id("abc"), "{abc}");
        assert_eq!(backup_id("{abc}"), "{abc}");
        assert_eq!(backup_id("{abc"), "{abc}");
        assert_eq!(backup_id("abc}"), "{abc}");
    }

    #[test]
    fn test_decode_backups() {
        let xml = r#"<ve-backups>
  <backup im-backup-id="4" cloud-backup-id="{f00}" schedule-name="daily"
          started="2015-03-01 01:00:00.5+0900" ended="Sun Mar  1 01:30:00 UTC 2015"
          successful="true" backup-size="2" backup-node-name="bn1">
    <description>nightly</description>
  </backup>
</ve-backups>"#;
        let backups: VeBackups = from_xml(xml).unwrap();
        let backup = &backups.backup[0];
        assert_eq!(backup.cloud_backup_id, "{f00}");
        assert!(backup.successful);
        assert_eq!(backup.description, "nightly");
        assert_eq!(
            backup.started.unwrap().to_text(),
            "2015-03-01 01:00:00.500000+0900"
        );
        assert_eq!(
            backup.ended.unwrap().to_text(),
            "2015-03-01 01:30:00.000000+0000"
        );
    }
}
