use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Command line arguments for Pacicli
#[derive(Parser, Debug)]
#[command(
    name = "pacicli",
    version = env!("CARGO_PKG_VERSION"),
    about = "Command line client for the PACI cloud server API",
    long_about = "Manage containers, virtual machines, firewalls, backups, autoscaling, images and load balancers through the PACI REST API."
)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, env = "PACICLI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbose output: full records instead of tables, debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't output column headers
    #[arg(short = 'H', long, global = true)]
    pub no_header: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Tables and indented reports
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// TOML
    Toml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List servers
    List(SubscriptionArgs),
    /// Start a server
    Start(ServerArgs),
    /// Stop a server
    Stop(ServerArgs),
    /// Create a server from a setting file or the config's server spec
    Create {
        server_name: String,
        #[command(flatten)]
        setting: SettingArgs,
    },
    /// Create a server from an existing image
    CreateFromImage {
        server_name: String,
        image_name: String,
        #[command(flatten)]
        subscription: SubscriptionArgs,
    },
    /// Clone a server
    Clone {
        src_server_name: String,
        dst_server_name: String,
        #[command(flatten)]
        subscription: SubscriptionArgs,
    },
    /// Recreate a server, optionally from another OS template
    Recreate {
        server_name: String,
        /// Template name to recreate from
        #[arg(short = 'T', long)]
        template: Option<String>,
        /// Don't reinstall applications into the recreated server
        #[arg(short = 'D', long)]
        drop_apps: bool,
    },
    /// Modify server configuration
    Modify(ModifyArgs),
    /// Reset the server's administrator password
    ResetPassword(ServerArgs),
    /// Show server details
    Info(ServerArgs),
    /// Show server configuration history
    History {
        server_name: String,
        #[command(flatten)]
        window: HistoryArgs,
    },
    /// Show resource usage within a time window
    Usage {
        server_name: String,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Delete a server
    Delete(ServerArgs),
    /// Open a VNC console session
    Vnc(ServerArgs),

    /// List firewall rules
    Fwlist(ServerArgs),
    /// Create firewall rules
    Fwcreate {
        server_name: String,
        #[command(flatten)]
        setting: SettingArgs,
    },
    /// Replace firewall rules
    Fwmodify {
        server_name: String,
        #[command(flatten)]
        setting: SettingArgs,
    },
    /// Delete all firewall rules
    Fwdelete(ServerArgs),

    /// Assign a backup schedule to a server
    BackupScheduleSet {
        server_name: String,
        schedule_name: String,
    },
    /// Remove the backup schedule from a server
    BackupScheduleRemove(ServerArgs),
    /// Start a backup now
    Backup(ServerArgs),
    /// List backups within a time window
    BackupList {
        server_name: String,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Restore a server from a backup
    BackupRestore(BackupArgs),
    /// Show backup details
    BackupInfo(BackupArgs),
    /// Delete a backup
    BackupDelete(BackupArgs),
    /// List backup schedules
    BackupSchedule,

    /// Show autoscale rules
    Autoscale(ServerArgs),
    /// Create autoscale rules
    AutoscaleCreate {
        server_name: String,
        #[command(flatten)]
        setting: SettingArgs,
    },
    /// Update autoscale rules
    AutoscaleUpdate {
        server_name: String,
        #[command(flatten)]
        setting: SettingArgs,
    },
    /// Drop autoscale rules
    AutoscaleDrop(ServerArgs),
    /// Show resource consumption and autoscale history
    AutoscaleHistory {
        server_name: String,
        #[command(flatten)]
        window: HistoryArgs,
        /// Averaging period in seconds
        #[arg(long)]
        average_period: Option<u32>,
        /// Only the last N samples
        #[arg(long)]
        tail: Option<u32>,
    },

    /// List application templates
    Applist,
    /// Show an application template
    Appinfo { app_name: String, os_name: String },
    /// Install applications into a server
    Appinstall {
        server_name: String,
        #[arg(required = true)]
        app_names: Vec<String>,
    },
    /// Reset applications of a server
    Appreset {
        server_name: String,
        #[arg(required = true)]
        app_names: Vec<String>,
    },
    /// Remove an application from a server
    Appdelete { server_name: String, app_name: String },

    /// List images
    Imglist,
    /// Show image details
    Imginfo { image_name: String },
    /// Create an image from a server
    Imgcreate {
        server_name: String,
        image_name: String,
        #[command(flatten)]
        subscription: SubscriptionArgs,
    },
    /// Delete an image
    Imgdelete { image_name: String },

    /// List load balancers
    Lblist,
    /// Show load balancer details
    Lbinfo { lb_name: String },
    /// Show load balancer history
    Lbhistory {
        lb_name: String,
        /// Number of records
        #[arg(short = 'n', long, required = true)]
        num_records: u32,
    },
    /// Create a load balancer
    Lbcreate {
        lb_name: String,
        #[command(flatten)]
        subscription: SubscriptionArgs,
    },
    /// Restart a load balancer
    Lbrestart { lb_name: String },
    /// Delete a load balancer
    Lbdelete { lb_name: String },
    /// Attach a server to a load balancer
    Lbattach { lb_name: String, server_name: String },
    /// Detach a server from a load balancer
    Lbdetach { lb_name: String, server_name: String },

    /// List OS templates, or show one
    Oslist { os_name: Option<String> },
}

/// Single server argument
#[derive(ClapArgs, Debug, Clone)]
pub struct ServerArgs {
    pub server_name: String,
}

/// Server and backup id; braces around the id are optional
#[derive(ClapArgs, Debug, Clone)]
pub struct BackupArgs {
    pub server_name: String,
    pub backup_id: String,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SubscriptionArgs {
    /// Subscription id
    #[arg(short = 's', long)]
    pub subscription_id: Option<u32>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SettingArgs {
    /// JSON or TOML file with the request data
    #[arg(short = 'f', long)]
    pub setting_file: Option<PathBuf>,
}

/// Mandatory time window, `YYYY-MM-DD hh:mm TZ`
#[derive(ClapArgs, Debug, Clone)]
pub struct WindowArgs {
    /// Window start
    #[arg(long, required = true)]
    pub from: Option<String>,
    /// Window end
    #[arg(long, required = true)]
    pub to: Option<String>,
}

/// Time window or record count
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct HistoryArgs {
    /// Window start, `YYYY-MM-DD hh:mm TZ`
    #[arg(long, requires = "to")]
    pub from: Option<String>,
    /// Window end, `YYYY-MM-DD hh:mm TZ`
    #[arg(long, requires = "from")]
    pub to: Option<String>,
    /// Number of most recent records
    #[arg(short = 'n', long)]
    pub num_records: Option<u32>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ModifyArgs {
    pub server_name: String,
    #[command(flatten)]
    pub setting: SettingArgs,
    /// Server description
    #[arg(long, visible_alias = "desc")]
    pub description: Option<String>,
    /// Number of CPU cores
    #[arg(long)]
    pub cpus: Option<u32>,
    /// CPU clock rate in MHz
    #[arg(long)]
    pub cpu_power: Option<u32>,
    /// RAM size in MB
    #[arg(long, visible_alias = "ram")]
    pub ram_size: Option<u32>,
    /// Bandwidth in kbps
    #[arg(long)]
    pub bandwidth: Option<u32>,
    /// Number of IPv4 addresses to add
    #[arg(long, conflicts_with = "drop_ipv4")]
    pub add_ipv4: Option<u32>,
    /// IPv4 address to remove; repeatable
    #[arg(long)]
    pub drop_ipv4: Vec<String>,
    /// Number of IPv6 addresses to add
    #[arg(long, conflicts_with = "drop_ipv6")]
    pub add_ipv6: Option<u32>,
    /// IPv6 address to remove; repeatable
    #[arg(long)]
    pub drop_ipv6: Vec<String>,
    /// Primary disk size in GB
    #[arg(long)]
    pub disk_size: Option<u32>,
    /// Use custom name servers
    #[arg(long, conflicts_with = "no_custom_ns")]
    pub custom_ns: bool,
    /// Use the default name servers
    #[arg(long)]
    pub no_custom_ns: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_subcommand_names() {
        let command = Args::command();
        let names: Vec<&str> = command.get_subcommands().map(|c| c.get_name()).collect();
        for expected in [
            "list",
            "reset-password",
            "create-from-image",
            "backup-schedule-set",
            "backup-list",
            "autoscale-history",
            "fwlist",
            "imgcreate",
            "lbattach",
            "oslist",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_global_options() {
        let args = Args::try_parse_from([
            "pacicli", "info", "web1", "-o", "json", "--no-header", "-c", "/tmp/Pacifile",
        ])
        .unwrap();
        assert_eq!(args.output, OutputFormat::Json);
        assert!(args.no_header);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/Pacifile")));
        match args.command {
            Command::Info(ServerArgs { server_name }) => assert_eq!(server_name, "web1"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_modify_flags() {
        let args = Args::try_parse_from([
            "pacicli",
            "modify",
            "web1",
            "--ram",
            "2048",
            "--drop-ipv4",
            "192.0.2.1",
            "--drop-ipv4",
            "192.0.2.2",
        ])
        .unwrap();
        match args.command {
            Command::Modify(modify) => {
                assert_eq!(modify.ram_size, Some(2048));
                assert_eq!(modify.drop_ipv4, vec!["192.0.2.1", "192.0.2.2"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Args::try_parse_from([
            "pacicli", "modify", "web1", "--add-ipv4", "1", "--drop-ipv4", "192.0.2.1",
        ])
        .is_err());
    }

    #[test]
    fn test_window_requires_both_ends() {
        assert!(Args::try_parse_from(["pacicli", "usage", "web1", "--from", "2023-01-15 10:30 UTC"]).is_err());
        assert!(Args::try_parse_from(["pacicli", "history", "web1", "--to", "2023-01-15 10:30 UTC"]).is_err());
        assert!(Args::try_parse_from(["pacicli", "history", "web1", "-n", "5"]).is_ok());
    }
}
