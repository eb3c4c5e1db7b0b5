use crate::cli::args::OutputFormat;
use crate::codec::Timestamp;
use crate::model::{
    ApplicationTemplate, Backup, BackupSchedule, FirewallRule, ImageInfo, LbSummary, Template,
    VeInfo,
};
use crate::model::autoscale::{AutoscaleRule, ResourceConsumptionSample};
use crate::model::loadbalancer::UsedBy;
use crate::model::server::VeSnapshot;
use crate::render;
use serde::Serialize;
use std::io::{self, Write};
use tabled::settings::{object::Rows, Disable, Style};
use tabled::{Table, Tabled};

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("TOML serialization error: {0}")]
    TomlError(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::PaciError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
///
/// JSON and TOML print the whole record. Text prints a table, a custom
/// report, or the indented record dump when verbose.
pub struct ConsoleWriter<W: Write> {
    format: OutputFormat,
    verbose: bool,
    no_header: bool,
    out: W,
}

impl ConsoleWriter<io::Stdout> {
    pub fn stdout(format: OutputFormat, verbose: bool, no_header: bool) -> Self {
        Self::new(format, verbose, no_header, io::stdout())
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(format: OutputFormat, verbose: bool, no_header: bool, out: W) -> Self {
        Self {
            format,
            verbose,
            no_header,
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print `value` in the structured formats; returns false when text
    /// output is left to the caller.
    fn write_structured<T: Serialize>(&mut self, value: &T) -> Result<bool, OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(value)?;
                writeln!(self.out, "{}", output)?;
                Ok(true)
            }
            OutputFormat::Toml => {
                let output = toml::to_string(value)?;
                write!(self.out, "{}", output)?;
                Ok(true)
            }
            OutputFormat::Text => Ok(false),
        }
    }

    /// Detail records: the indented dump in text mode
    pub fn write_record<T: Serialize>(&mut self, value: &T) -> Result<(), OutputError> {
        if !self.write_structured(value)? {
            self.write_dump(value)?;
        }
        Ok(())
    }

    /// List records: a table in text mode, or the dump when verbose
    pub fn write_table<T, R, I>(&mut self, value: &T, rows: I) -> Result<(), OutputError>
    where
        T: Serialize,
        R: Tabled,
        I: IntoIterator<Item = R>,
    {
        if self.write_structured(value)? {
            return Ok(());
        }
        if self.verbose {
            return self.write_dump(value);
        }
        let table = self.table(rows);
        writeln!(self.out, "{}", table)?;
        Ok(())
    }

    /// Records with a hand-made text report; `report` receives the writer
    /// itself so it can mix headings and tables.
    pub fn write_report<T, F>(&mut self, value: &T, report: F) -> Result<(), OutputError>
    where
        T: Serialize,
        F: FnOnce(&mut Self) -> Result<(), OutputError>,
    {
        if self.write_structured(value)? {
            return Ok(());
        }
        if self.verbose {
            return self.write_dump(value);
        }
        report(self)
    }

    /// Free text, printed as is in every format
    pub fn write_message(&mut self, message: &str) -> Result<(), OutputError> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    /// Bare table, honouring `--no-header`
    pub fn write_rows<R: Tabled, I: IntoIterator<Item = R>>(
        &mut self,
        rows: I,
    ) -> Result<(), OutputError> {
        let table = self.table(rows);
        writeln!(self.out, "{}", table)?;
        Ok(())
    }

    fn table<R: Tabled, I: IntoIterator<Item = R>>(&self, rows: I) -> String {
        let mut table = Table::new(rows);
        table.with(Style::blank());
        if self.no_header {
            table.with(Disable::row(Rows::first()));
        }
        table.to_string()
    }

    fn write_dump<T: Serialize>(&mut self, value: &T) -> Result<(), OutputError> {
        render::render_to(&mut self.out, value, 0)?;
        Ok(())
    }
}

fn text<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Table row for `list`
#[derive(Tabled)]
pub struct ServerRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "HOSTNAME")]
    hostname: String,
    #[tabled(rename = "STATE")]
    state: String,
    #[tabled(rename = "SUBSCR_ID")]
    subscription_id: i64,
}

impl From<&VeInfo> for ServerRow {
    fn from(ve: &VeInfo) -> Self {
        Self {
            id: ve.id,
            name: ve.name.clone(),
            hostname: ve.hostname.clone(),
            state: ve.state.clone(),
            subscription_id: ve.subscription_id,
        }
    }
}

/// Table row for server and load balancer history
#[derive(Tabled)]
pub struct SnapshotRow {
    #[tabled(rename = "DATETIME")]
    datetime: String,
    #[tabled(rename = "CPU")]
    cpu: i64,
    #[tabled(rename = "MEMORY")]
    memory: i64,
    #[tabled(rename = "DISK")]
    disk: i64,
    #[tabled(rename = "BANDWIDTH")]
    bandwidth: i64,
    #[tabled(rename = "PUB_IPS")]
    public_ips: i64,
    #[tabled(rename = "STATUS")]
    status: String,
}

impl From<&VeSnapshot> for SnapshotRow {
    fn from(snapshot: &VeSnapshot) -> Self {
        Self {
            datetime: text(&snapshot.event_timestamp),
            cpu: snapshot.cpu,
            memory: snapshot.ram,
            disk: snapshot.local_disk,
            bandwidth: snapshot.bandwidth,
            public_ips: snapshot.no_of_public_ip,
            status: snapshot.state.clone(),
        }
    }
}

/// Table row for the usage report
#[derive(Tabled)]
pub struct UsageRow {
    #[tabled(rename = "RESOURCE_TYPE")]
    pub resource_type: String,
    #[tabled(rename = "USAGE")]
    pub usage: String,
}

/// Table row for `fwlist`; extra remote nets continue on blank rows
#[derive(Tabled)]
pub struct FirewallRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PROTOCOL")]
    protocol: String,
    #[tabled(rename = "LOCAL_PORT")]
    local_port: String,
    #[tabled(rename = "REMOTE_PORT")]
    remote_port: String,
    #[tabled(rename = "REMOTE_NET")]
    remote_net: String,
}

impl FirewallRow {
    pub fn rows(rule: &FirewallRule) -> Vec<Self> {
        let mut nets = rule.remote_net.iter().map(ToString::to_string);
        let mut rows = vec![Self {
            id: text(&rule.id),
            name: rule.name.clone(),
            protocol: rule.protocol.clone(),
            local_port: rule.local_port.to_string(),
            remote_port: rule.remote_port.to_string(),
            remote_net: nets.next().unwrap_or_default(),
        }];
        rows.extend(nets.map(|net| Self {
            id: String::new(),
            name: String::new(),
            protocol: String::new(),
            local_port: String::new(),
            remote_port: String::new(),
            remote_net: net,
        }));
        rows
    }
}

/// Table row for `backup-list`
#[derive(Tabled)]
pub struct BackupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "SCHEDULE")]
    schedule: String,
    #[tabled(rename = "START")]
    start: String,
    #[tabled(rename = "END")]
    end: String,
    #[tabled(rename = "RESULT")]
    result: String,
    #[tabled(rename = "SIZE(GB)")]
    size: String,
    #[tabled(rename = "NODE")]
    node: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

impl From<&Backup> for BackupRow {
    fn from(backup: &Backup) -> Self {
        let schedule = if backup.schedule_name.is_empty() {
            "-".to_string()
        } else {
            backup.schedule_name.clone()
        };
        let result = if backup.successful { "ok" } else { "fail" };
        Self {
            id: backup.cloud_backup_id.clone(),
            schedule,
            start: text(&backup.started),
            end: text(&backup.ended),
            result: result.to_string(),
            size: format!("{:.3}", backup.backup_size as f64 / (1u64 << 30) as f64),
            node: backup.backup_node_name.clone(),
            description: backup.description.clone(),
        }
    }
}

/// Table row for `backup-schedule`
#[derive(Tabled)]
pub struct ScheduleRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "ENABLED")]
    enabled: bool,
    #[tabled(rename = "KEEP")]
    keep: i64,
    #[tabled(rename = "INCREMENTAL")]
    incremental: i64,
}

impl From<&BackupSchedule> for ScheduleRow {
    fn from(schedule: &BackupSchedule) -> Self {
        Self {
            id: schedule.id,
            name: schedule.name.clone(),
            description: schedule.description.clone(),
            enabled: schedule.enabled,
            keep: schedule.backups_to_keep,
            incremental: schedule.no_of_incremental,
        }
    }
}

/// Table row for rule versions in `autoscale-history`
#[derive(Tabled)]
pub struct AutoscaleRuleRow {
    #[tabled(rename = "METRIC")]
    metric: String,
    #[tabled(rename = "VERSION")]
    version: String,
    #[tabled(rename = "UPDATED")]
    updated: String,
    #[tabled(rename = "DELIVERED")]
    delivered: String,
    #[tabled(rename = "DELIVERED-OK")]
    delivered_ok: String,
    #[tabled(rename = "MIGRATION")]
    migration: String,
    #[tabled(rename = "RESTART")]
    restart: String,
    #[tabled(rename = "MIN")]
    min: String,
    #[tabled(rename = "MAX")]
    max: String,
    #[tabled(rename = "STEP")]
    step: String,
    #[tabled(rename = "UP_THRES")]
    up_threshold: String,
    #[tabled(rename = "UP_PERIOD")]
    up_period: String,
    #[tabled(rename = "DOWN_THRES")]
    down_threshold: String,
    #[tabled(rename = "DOWN_PERIOD")]
    down_period: String,
}

impl From<&AutoscaleRule> for AutoscaleRuleRow {
    fn from(rule: &AutoscaleRule) -> Self {
        let limits = rule.limits.as_ref();
        let thresholds = rule.thresholds.as_ref();
        let up = thresholds.and_then(|t| t.up.as_ref());
        let down = thresholds.and_then(|t| t.down.as_ref());
        Self {
            metric: rule.metric.clone(),
            version: text(&rule.version),
            updated: text(&rule.updated),
            delivered: text(&rule.update_delivered),
            delivered_ok: text(&rule.update_delivered_ok),
            migration: text(&rule.allow_migration),
            restart: text(&rule.allow_restart),
            min: text(&limits.map(|l| l.min)),
            max: text(&limits.map(|l| l.max)),
            step: text(&limits.map(|l| l.step)),
            up_threshold: text(&up.and_then(|t| t.threshold)),
            up_period: text(&up.map(|t| t.period)),
            down_threshold: text(&down.and_then(|t| t.threshold)),
            down_period: text(&down.map(|t| t.period)),
        }
    }
}

/// Table row for resource samples in `autoscale-history`
#[derive(Tabled)]
pub struct ConsumptionRow {
    #[tabled(rename = "CPU_USAGE")]
    cpu_usage: i64,
    #[tabled(rename = "RAM_USAGE")]
    ram_usage: i64,
    #[tabled(rename = "PRIV_IN")]
    private_in: i64,
    #[tabled(rename = "PRIV_OUT")]
    private_out: i64,
    #[tabled(rename = "PUB_IN")]
    public_in: i64,
    #[tabled(rename = "PUB_OUT")]
    public_out: i64,
    #[tabled(rename = "DATETIME")]
    datetime: String,
    #[tabled(rename = "CPU")]
    cpu: i64,
    #[tabled(rename = "RAM")]
    ram: i64,
    #[tabled(rename = "BANDWIDTH")]
    bandwidth: i64,
}

impl From<&ResourceConsumptionSample> for ConsumptionRow {
    fn from(sample: &ResourceConsumptionSample) -> Self {
        Self {
            cpu_usage: sample.cpu_usage,
            ram_usage: sample.ram_usage,
            private_in: sample.private_incoming_traffic,
            private_out: sample.private_outgoing_traffic,
            public_in: sample.public_incoming_traffic,
            public_out: sample.public_outgoing_traffic,
            datetime: text(&sample.paci_timestamp),
            cpu: sample.cpu,
            ram: sample.ram,
            bandwidth: sample.bandwidth,
        }
    }
}

/// Table row for `applist`
#[derive(Tabled)]
pub struct ApplicationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "FOROS")]
    for_os: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

impl From<&ApplicationTemplate> for ApplicationRow {
    fn from(app: &ApplicationTemplate) -> Self {
        Self {
            id: app.id,
            name: app.name.clone(),
            for_os: app.for_os.clone(),
            description: app.description.clone(),
        }
    }
}

/// Table row for `imglist`
#[derive(Tabled)]
pub struct ImageRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "SIZE")]
    size: i64,
    #[tabled(rename = "CREATED")]
    created: String,
    #[tabled(rename = "SUBSCR_ID")]
    subscription_id: i64,
    #[tabled(rename = "IMAGE_OF")]
    image_of: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

impl From<&ImageInfo> for ImageRow {
    fn from(image: &ImageInfo) -> Self {
        Self {
            name: image.name.clone(),
            size: image.size,
            created: text(&image.created),
            subscription_id: image.subscription_id,
            image_of: image.image_of.clone(),
            description: image.description.clone(),
        }
    }
}

/// Table row for `lblist`
#[derive(Tabled)]
pub struct LoadBalancerRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "STATE")]
    state: String,
    #[tabled(rename = "SUBSCR_ID")]
    subscription_id: i64,
}

impl From<&LbSummary> for LoadBalancerRow {
    fn from(lb: &LbSummary) -> Self {
        Self {
            name: lb.name.clone(),
            state: lb.state.clone(),
            subscription_id: lb.subscription_id,
        }
    }
}

/// Table row for servers behind a load balancer
#[derive(Tabled)]
pub struct BalancedRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "IPADDR")]
    ip: String,
}

impl From<&UsedBy> for BalancedRow {
    fn from(used_by: &UsedBy) -> Self {
        Self {
            name: used_by.ve_name.clone(),
            ip: text(&used_by.ip),
        }
    }
}

/// Table row for `oslist`
#[derive(Tabled)]
pub struct TemplateRow {
    #[tabled(rename = "TEMPLATE_NAME")]
    name: String,
    #[tabled(rename = "TECHNOLOGY")]
    technology: String,
    #[tabled(rename = "TYPE")]
    os_type: String,
}

impl From<&Template> for TemplateRow {
    fn from(template: &Template) -> Self {
        Self {
            name: template.name.clone(),
            technology: template.technology.clone(),
            os_type: template.os_type.clone(),
        }
    }
}

/// Heading line of a report window, e.g. `  From: 2023-01-15 ...`
pub fn window_line(label: &str, at: &Timestamp) -> String {
    format!("{:>6}: {}", label, at)
}
