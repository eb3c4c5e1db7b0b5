use crate::cli::args::{
    Args, BackupArgs, Command, HistoryArgs, ModifyArgs, ServerArgs, SettingArgs, SubscriptionArgs,
    WindowArgs,
};
use crate::cli::output::{
    window_line, ApplicationRow, AutoscaleRuleRow, BackupRow, BalancedRow, ConsoleWriter,
    ConsumptionRow, FirewallRow, ImageRow, LoadBalancerRow, ScheduleRow, ServerRow, SnapshotRow,
    TemplateRow, UsageRow,
};
use crate::codec::{Address, AddressList, Timestamp};
use crate::domain::config::Config;
use crate::domain::error::{PaciError, PaciResult};
use crate::infrastructure::config::{load_into, ConfigManager};
use crate::infrastructure::http::{ApiClient, Method, Transport};
use crate::model::{
    backup_id, from_xml, to_xml, ApplicationList, ApplicationTemplate, Autoscale, AutoscaleBody,
    AutoscaleData, Backup, BackupScheduleList, ChangeCpu, CreateVe, CreateVeBody, Firewall,
    FirewallBody, ImageList, LbList, LoadBalancer, PasswordResponse, ReconfigureIp, ReconfigureVe,
    ReconfigureVeBody,
    ResourceConsumptionAndAutoscaleHistory, Template, TemplateList, Ve, VeBackups, VeHistory,
    VeImage, VeList, VeResourceUsageReport,
};
use crate::model::request::{AddIp, DropIp};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Execute CLI command
pub async fn execute_command(args: Args) -> PaciResult<()> {
    let config_manager = ConfigManager::new(args.config.clone())?;
    let config = config_manager.load_config()?;
    debug!("Loaded config from {}", config_manager.config_path().display());

    let client = ApiClient::from_config(&config)?;
    let mut writer = ConsoleWriter::stdout(args.output, args.verbose, args.no_header);
    run_command(args.command, &client, &config, &mut writer).await
}

/// Run one command against `transport`, printing through `writer`
pub async fn run_command<T: Transport, W: Write>(
    command: Command,
    transport: &T,
    config: &Config,
    writer: &mut ConsoleWriter<W>,
) -> PaciResult<()> {
    let mut ctx = CommandContext {
        transport,
        config,
        writer,
    };

    match command {
        Command::List(subscription) => ctx.list(subscription).await,
        Command::Start(args) => ctx.start_stop(args, "start").await,
        Command::Stop(args) => ctx.start_stop(args, "stop").await,
        Command::Create {
            server_name,
            setting,
        } => ctx.create(server_name, setting).await,
        Command::CreateFromImage {
            server_name,
            image_name,
            subscription,
        } => {
            let mut path = "/ve".to_string();
            if let Some(id) = subscription.subscription_id {
                path.push_str(&format!("/{}", id));
            }
            path.push_str(&format!("/{}/from/{}", server_name, image_name));
            ctx.accepted(Method::Post, &path, Some(&server_name)).await
        }
        Command::Clone {
            src_server_name,
            dst_server_name,
            subscription,
        } => {
            let mut path = format!("/ve/{}/clone-to/{}", src_server_name, dst_server_name);
            if let Some(id) = subscription.subscription_id {
                path.push_str(&format!("/for/{}", id));
            }
            ctx.password(Method::Post, &path).await
        }
        Command::Recreate {
            server_name,
            template,
            drop_apps,
        } => {
            let mut query = Vec::new();
            if let Some(template) = template {
                query.push(format!("template={}", template));
            }
            if drop_apps {
                query.push("drop-apps=true".to_string());
            }
            let path = with_query(format!("/ve/{}/recreate", server_name), &query);
            ctx.password(Method::Post, &path).await
        }
        Command::Modify(args) => ctx.modify(args).await,
        Command::ResetPassword(ServerArgs { server_name }) => {
            ctx.password(Method::Post, &format!("/ve/{}/reset-password", server_name))
                .await
        }
        Command::Info(ServerArgs { server_name }) => {
            let ve: Ve = ctx.get(&format!("/ve/{}", server_name)).await?;
            ctx.writer.write_record(&ve)?;
            Ok(())
        }
        Command::History {
            server_name,
            window,
        } => {
            let path = history_path(format!("/ve/{}/history/", server_name), &window, &[])?;
            ctx.history(&path).await
        }
        Command::Usage {
            server_name,
            window,
        } => ctx.usage(server_name, window).await,
        Command::Delete(ServerArgs { server_name }) => {
            ctx.accepted(Method::Delete, &format!("/ve/{}", server_name), Some(&server_name))
                .await
        }
        Command::Vnc(ServerArgs { server_name }) => {
            ctx.password(Method::Post, &format!("/ve/{}/console", server_name))
                .await
        }

        Command::Fwlist(ServerArgs { server_name }) => {
            let firewall: Firewall = ctx.get(&format!("/ve/{}/firewall", server_name)).await?;
            let rows: Vec<FirewallRow> = firewall.rule.iter().flat_map(FirewallRow::rows).collect();
            ctx.writer.write_table(&firewall, rows)?;
            Ok(())
        }
        Command::Fwcreate {
            server_name,
            setting,
        } => ctx.firewall(Method::Post, server_name, setting).await,
        Command::Fwmodify {
            server_name,
            setting,
        } => ctx.firewall(Method::Put, server_name, setting).await,
        Command::Fwdelete(ServerArgs { server_name }) => {
            ctx.expect_status(Method::Delete, &format!("/ve/{}/firewall", server_name), 200, None)
                .await
        }

        Command::BackupScheduleSet {
            server_name,
            schedule_name,
        } => {
            let path = format!("/ve/{}/schedule/{}", server_name, schedule_name);
            ctx.accepted(Method::Put, &path, None).await
        }
        Command::BackupScheduleRemove(ServerArgs { server_name }) => {
            ctx.accepted(Method::Put, &format!("/ve/{}/nobackup/", server_name), None)
                .await
        }
        Command::Backup(ServerArgs { server_name }) => {
            ctx.accepted(Method::Post, &format!("/ve/{}/backup", server_name), None)
                .await
        }
        Command::BackupList {
            server_name,
            window,
        } => ctx.backup_list(server_name, window).await,
        Command::BackupRestore(args) => {
            let path = format!("/ve/{}/restore/{}", args.server_name, backup_id(&args.backup_id));
            ctx.accepted(Method::Put, &path, None).await
        }
        Command::BackupInfo(BackupArgs {
            server_name,
            backup_id: id,
        }) => {
            let backup: Backup = ctx
                .get(&format!("/ve/{}/backup/{}", server_name, backup_id(&id)))
                .await?;
            ctx.writer.write_record(&backup)?;
            Ok(())
        }
        Command::BackupDelete(args) => {
            let path = format!("/ve/{}/backup/{}", args.server_name, backup_id(&args.backup_id));
            ctx.accepted(Method::Delete, &path, None).await
        }
        Command::BackupSchedule => {
            let schedules: BackupScheduleList = ctx.get("/schedule").await?;
            let rows: Vec<ScheduleRow> = schedules.backup_schedule.iter().map(ScheduleRow::from).collect();
            ctx.writer.write_table(&schedules, rows)?;
            Ok(())
        }

        Command::Autoscale(ServerArgs { server_name }) => {
            let autoscale: Autoscale = ctx.get(&format!("/ve/{}/autoscale", server_name)).await?;
            ctx.writer.write_record(&autoscale)?;
            Ok(())
        }
        Command::AutoscaleCreate {
            server_name,
            setting,
        } => ctx.autoscale(Method::Post, server_name, setting).await,
        Command::AutoscaleUpdate {
            server_name,
            setting,
        } => ctx.autoscale(Method::Put, server_name, setting).await,
        Command::AutoscaleDrop(ServerArgs { server_name }) => {
            ctx.expect_status(Method::Delete, &format!("/ve/{}/autoscale", server_name), 200, None)
                .await
        }
        Command::AutoscaleHistory {
            server_name,
            window,
            average_period,
            tail,
        } => {
            let mut query = Vec::new();
            if let Some(period) = average_period.filter(|p| *p > 0) {
                query.push(format!("average-period={}", period));
            }
            if let Some(tail) = tail.filter(|t| *t > 0) {
                query.push(format!("tail={}", tail));
            }
            let path = history_path(
                format!("/ve/{}/autoscale/history/", server_name),
                &window,
                &query,
            )?;
            ctx.autoscale_history(&path).await
        }

        Command::Applist => {
            let apps: ApplicationList = ctx.get("/application-template").await?;
            let rows: Vec<ApplicationRow> =
                apps.application_template.iter().map(ApplicationRow::from).collect();
            ctx.writer.write_table(&apps, rows)?;
            Ok(())
        }
        Command::Appinfo { app_name, os_name } => {
            let app: ApplicationTemplate = ctx
                .get(&format!("/application-template/{}/{}", app_name, os_name))
                .await?;
            ctx.writer.write_record(&app)?;
            Ok(())
        }
        Command::Appinstall {
            server_name,
            app_names,
        } => {
            let path = match app_names.as_slice() {
                [single] => format!("/ve/{}/install/{}", server_name, single),
                many => with_query(format!("/ve/{}/install", server_name), &name_query(many)),
            };
            ctx.accepted(Method::Put, &path, None).await
        }
        Command::Appreset {
            server_name,
            app_names,
        } => {
            let path = with_query(
                format!("/ve/{}/application", server_name),
                &name_query(&app_names),
            );
            ctx.accepted(Method::Post, &path, None).await
        }
        Command::Appdelete {
            server_name,
            app_name,
        } => {
            let path = format!("/ve/{}/application/{}", server_name, app_name);
            ctx.accepted(Method::Delete, &path, None).await
        }

        Command::Imglist => {
            let images: ImageList = ctx.get("/image").await?;
            let rows: Vec<ImageRow> = images.image_info.iter().map(ImageRow::from).collect();
            ctx.writer.write_table(&images, rows)?;
            Ok(())
        }
        Command::Imginfo { image_name } => {
            let image: VeImage = ctx.get(&format!("/image/{}", image_name)).await?;
            ctx.writer.write_record(&image)?;
            Ok(())
        }
        Command::Imgcreate {
            server_name,
            image_name,
            subscription,
        } => {
            let path = format!(
                "/image/{}{}/create/{}",
                server_name,
                subscription_segment(&subscription),
                image_name
            );
            ctx.accepted(Method::Post, &path, None).await
        }
        Command::Imgdelete { image_name } => {
            ctx.accepted(Method::Delete, &format!("/image/{}", image_name), Some(&image_name))
                .await
        }

        Command::Lblist => {
            let lbs: LbList = ctx.get("/load-balancer").await?;
            let rows: Vec<LoadBalancerRow> = lbs.load_balancer.iter().map(LoadBalancerRow::from).collect();
            ctx.writer.write_table(&lbs, rows)?;
            Ok(())
        }
        Command::Lbinfo { lb_name } => ctx.lb_info(lb_name).await,
        Command::Lbhistory {
            lb_name,
            num_records,
        } => {
            if num_records == 0 {
                return Err(PaciError::InvalidInput(
                    "--num-records must be greater than zero".to_string(),
                ));
            }
            ctx.history(&format!("/load-balancer/{}/history/{}", lb_name, num_records))
                .await
        }
        Command::Lbcreate {
            lb_name,
            subscription,
        } => {
            let path = format!(
                "/load-balancer{}/create/{}",
                subscription_segment(&subscription),
                lb_name
            );
            ctx.password(Method::Post, &path).await
        }
        Command::Lbrestart { lb_name } => {
            let path = format!("/load-balancer/{}/restart", lb_name);
            ctx.accepted(Method::Put, &path, Some(&lb_name)).await
        }
        Command::Lbdelete { lb_name } => {
            let path = format!("/load-balancer/{}", lb_name);
            ctx.accepted(Method::Delete, &path, Some(&lb_name)).await
        }
        Command::Lbattach {
            lb_name,
            server_name,
        } => {
            let path = format!("/load-balancer/{}/{}", lb_name, server_name);
            ctx.accepted(Method::Post, &path, None).await
        }
        Command::Lbdetach {
            lb_name,
            server_name,
        } => {
            let path = format!("/load-balancer/{}/{}", lb_name, server_name);
            ctx.accepted(Method::Delete, &path, None).await
        }

        Command::Oslist { os_name } => ctx.os_list(os_name).await,
    }
}

struct CommandContext<'a, T, W: Write> {
    transport: &'a T,
    config: &'a Config,
    writer: &'a mut ConsoleWriter<W>,
}

impl<T: Transport, W: Write> CommandContext<'_, T, W> {
    /// GET a record, failing on any error status
    async fn get<R: DeserializeOwned>(&self, path: &str) -> PaciResult<R> {
        self.fetch(Method::Get, path, None).await
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> PaciResult<R> {
        let response = self.transport.send(method, path, body).await?.ensure_success()?;
        from_xml(&response.body)
    }

    /// Send a request that must answer `status`, then print its body
    async fn expect_status(
        &mut self,
        method: Method,
        path: &str,
        status: u16,
        body: Option<String>,
    ) -> PaciResult<()> {
        let response = self
            .transport
            .send(method, path, body)
            .await?
            .expect_status(status)?;
        self.writer.write_message(&response.body)?;
        Ok(())
    }

    /// Actions answered with 202 Accepted; `subject` prefixes the printed body
    async fn accepted(&mut self, method: Method, path: &str, subject: Option<&str>) -> PaciResult<()> {
        let response = self
            .transport
            .send(method, path, None)
            .await?
            .expect_status(202)?;
        let message = match subject {
            Some(subject) => format!("{} {}", subject, response.body),
            None => response.body,
        };
        self.writer.write_message(&message)?;
        Ok(())
    }

    /// Requests answered with generated credentials
    async fn password(&mut self, method: Method, path: &str) -> PaciResult<()> {
        let pwd: PasswordResponse = self.fetch(method, path, None).await?;
        self.writer.write_record(&pwd)?;
        Ok(())
    }

    async fn list(&mut self, subscription: SubscriptionArgs) -> PaciResult<()> {
        let mut path = "/ve".to_string();
        if let Some(id) = subscription.subscription_id.filter(|id| *id > 0) {
            path.push_str(&format!("?subscription={}", id));
        }
        let list: VeList = self.get(&path).await?;
        let rows: Vec<ServerRow> = list.ve_info.iter().map(ServerRow::from).collect();
        self.writer.write_table(&list, rows)?;
        Ok(())
    }

    async fn start_stop(&mut self, args: ServerArgs, action: &str) -> PaciResult<()> {
        let name = args.server_name;
        let path = format!("/ve/{}/{}", name, action);
        let response = self.transport.send(Method::Put, &path, None).await?;
        match response.status {
            202 => {
                self.writer.write_message(&format!("{} {}", name, response.body))?;
                Ok(())
            }
            304 => {
                let state = if action == "stop" { "stopped" } else { "started" };
                Err(PaciError::Api {
                    status: response.status,
                    body: format!("{} has already {}", name, state),
                })
            }
            _ => Err(response.into_error()),
        }
    }

    async fn create(&mut self, server_name: String, setting: SettingArgs) -> PaciResult<()> {
        let mut ve = match load_setting::<CreateVe>(&setting)? {
            Some(mut ve) => {
                ve.name = server_name.clone();
                ve
            }
            None => self
                .config
                .server(&server_name)
                .and_then(|s| s.spec.clone())
                .ok_or_else(|| {
                    PaciError::InvalidInput(format!(
                        "Couldn't find a server spec for '{}'. Use --setting-file or add one to the config file",
                        server_name
                    ))
                })?,
        };
        if ve.name.is_empty() {
            ve.name = server_name;
        }
        if ve.hostname.is_empty() {
            ve.hostname = ve.name.clone();
        }

        info!("Creating server {}", ve.name);
        let pwd: PasswordResponse = self.fetch(Method::Post, "/ve/", Some(to_xml(&CreateVeBody::from(&ve))?)).await?;
        self.writer.write_record(&pwd)?;
        Ok(())
    }

    async fn modify(&mut self, args: ModifyArgs) -> PaciResult<()> {
        let request = reconfigure_request(&args)?;
        let path = format!("/ve/{}", args.server_name);
        let response = self
            .transport
            .send(Method::Put, &path, Some(to_xml(&ReconfigureVeBody::from(&request))?))
            .await?
            .expect_status(202)?;
        self.writer
            .write_message(&format!("{} {}", args.server_name, response.body))?;
        Ok(())
    }

    async fn history(&mut self, path: &str) -> PaciResult<()> {
        let history: VeHistory = self.get(path).await?;
        let rows: Vec<SnapshotRow> = history.ve_snapshot.iter().map(SnapshotRow::from).collect();
        self.writer.write_table(&history, rows)?;
        Ok(())
    }

    async fn usage(&mut self, server_name: String, window: WindowArgs) -> PaciResult<()> {
        let (from, to, range) = time_window(&window)?;
        let usage: VeResourceUsageReport = self
            .get(&format!("/ve/{}/usage/{}", server_name, range))
            .await?;

        self.writer.write_report(&usage, |w| {
            w.write_message("RESOURCE USAGE REPORT")?;
            w.write_message(&format!("Server: {}", usage.ve_name))?;
            w.write_message(&window_line("From", &from))?;
            w.write_message(&window_line("To", &to))?;
            w.write_message("")?;

            let resources = usage.resource_usage.iter().map(|e| {
                let mut name = e.resource_type.clone();
                if !e.resource_usage_type.is_empty() {
                    name.push_str(&format!("({})", e.resource_usage_type));
                }
                UsageRow {
                    resource_type: name,
                    usage: e.value.to_string(),
                }
            });
            let traffic = usage.ve_traffic.iter().map(|e| UsageRow {
                resource_type: e.traffic_type.clone(),
                usage: e.used.to_string(),
            });
            w.write_rows(resources.chain(traffic))
        })?;
        Ok(())
    }

    async fn firewall(&mut self, method: Method, server_name: String, setting: SettingArgs) -> PaciResult<()> {
        let firewall = match load_setting::<Firewall>(&setting)? {
            Some(firewall) => firewall,
            None => self
                .config
                .server(&server_name)
                .and_then(|s| s.firewall.clone())
                .filter(|f| !f.rule.is_empty())
                .ok_or_else(|| {
                    PaciError::InvalidInput(format!(
                        "Couldn't find firewall rules for '{}'",
                        server_name
                    ))
                })?,
        };

        let body = to_xml(&FirewallBody::from(&firewall))?;
        let path = format!("/ve/{}/firewall", server_name);
        self.expect_status(method, &path, 200, Some(body)).await
    }

    async fn backup_list(&mut self, server_name: String, window: WindowArgs) -> PaciResult<()> {
        let (from, to, range) = time_window(&window)?;
        let backups: VeBackups = self
            .get(&format!("/ve/{}/backups/{}", server_name, range))
            .await?;

        self.writer.write_report(&backups, |w| {
            w.write_message("BACKUP LIST")?;
            w.write_message(&format!("Server: {}", server_name))?;
            w.write_message(&window_line("From", &from))?;
            w.write_message(&window_line("To", &to))?;
            w.write_message("")?;
            w.write_rows(backups.backup.iter().map(BackupRow::from))
        })?;
        Ok(())
    }

    async fn autoscale(&mut self, method: Method, server_name: String, setting: SettingArgs) -> PaciResult<()> {
        let data = match load_setting::<AutoscaleData>(&setting)? {
            Some(data) => data,
            None => self
                .config
                .server(&server_name)
                .filter(|s| !s.autoscale_rule.is_empty())
                .map(|s| AutoscaleData {
                    autoscale_rule: s.autoscale_rule.clone(),
                })
                .ok_or_else(|| {
                    PaciError::InvalidInput(format!(
                        "Couldn't find autoscale rules for '{}'",
                        server_name
                    ))
                })?,
        };

        let body = to_xml(&AutoscaleBody::from(&data))?;
        let path = format!("/ve/{}/autoscale", server_name);
        let response = self
            .transport
            .send(method, &path, Some(body))
            .await?
            .expect_status(200)?;
        let autoscale: Autoscale = from_xml(&response.body)?;
        self.writer.write_record(&autoscale)?;
        Ok(())
    }

    async fn autoscale_history(&mut self, path: &str) -> PaciResult<()> {
        let history: ResourceConsumptionAndAutoscaleHistory = self.get(path).await?;

        self.writer.write_report(&history, |w| {
            if !history.autoscale_rule.is_empty() {
                w.write_message("AUTOSCALE RULE HISTORY")?;
                w.write_rows(history.autoscale_rule.iter().map(AutoscaleRuleRow::from))?;
                w.write_message("")?;
            }
            w.write_message("RESOURCE CONSUMPTION")?;
            w.write_rows(
                history
                    .resource_consumption_sample
                    .iter()
                    .map(ConsumptionRow::from),
            )
        })?;
        Ok(())
    }

    async fn lb_info(&mut self, lb_name: String) -> PaciResult<()> {
        let lb: LoadBalancer = self.get(&format!("/load-balancer/{}", lb_name)).await?;

        self.writer.write_report(&lb, |w| {
            let public_ip = lb
                .network
                .public_ip
                .first()
                .and_then(|ip| ip.address)
                .map(|ip| ip.to_string())
                .unwrap_or_default();
            w.write_message("LOAD BALANCER INFO")?;
            w.write_message(&format!("             Name: {}", lb.name))?;
            w.write_message(&format!("  Subscription ID: {}", lb.subscription_id))?;
            w.write_message(&format!("Public IP address: {}", public_ip))?;
            w.write_message(&format!("           Status: {}", lb.state))?;
            w.write_message("")?;
            w.write_message("BALANCED SERVERS")?;
            w.write_rows(lb.used_by.iter().map(BalancedRow::from))
        })?;
        Ok(())
    }

    async fn os_list(&mut self, os_name: Option<String>) -> PaciResult<()> {
        let path = match &os_name {
            Some(name) => format!("/template/{}", name),
            None => "/template".to_string(),
        };
        let response = self
            .transport
            .send(Method::Get, &path, None)
            .await?
            .ensure_success()?;

        if response.body.contains("template-list") {
            let templates: TemplateList = from_xml(&response.body)?;
            let rows: Vec<TemplateRow> = templates.template.iter().map(TemplateRow::from).collect();
            self.writer.write_table(&templates, rows)?;
        } else {
            let template: Template = from_xml(&response.body)?;
            self.writer
                .write_table(&template, [TemplateRow::from(&template)])?;
        }
        Ok(())
    }
}

/// Decode `--setting-file` when given
fn load_setting<S: Serialize + DeserializeOwned + Default>(setting: &SettingArgs) -> PaciResult<Option<S>> {
    match &setting.setting_file {
        Some(path) => Ok(Some(load_file(path)?)),
        None => Ok(None),
    }
}

fn load_file<S: Serialize + DeserializeOwned + Default>(path: &Path) -> PaciResult<S> {
    let mut value = S::default();
    load_into(path, &mut value)?;
    Ok(value)
}

/// Merge `modify` flags over the optional setting file
fn reconfigure_request(args: &ModifyArgs) -> PaciResult<ReconfigureVe> {
    let mut request: ReconfigureVe = load_setting(&args.setting)?.unwrap_or_default();

    if let Some(description) = args.description.as_ref().filter(|d| !d.is_empty()) {
        request.description = Some(description.clone());
    }
    if let Some(cpus) = args.cpus.filter(|n| *n > 0) {
        request.change_cpu.get_or_insert_with(ChangeCpu::default).number = Some(cpus.into());
    }
    if let Some(power) = args.cpu_power.filter(|n| *n > 0) {
        request.change_cpu.get_or_insert_with(ChangeCpu::default).power = Some(power.into());
    }
    if let Some(ram) = args.ram_size.filter(|n| *n > 0) {
        request.ram_size = Some(ram.into());
    }
    if let Some(bandwidth) = args.bandwidth.filter(|n| *n > 0) {
        request.bandwidth = Some(bandwidth.into());
    }
    apply_ip_changes(&mut request.reconfigure_ipv4, args.add_ipv4, &args.drop_ipv4)?;
    apply_ip_changes(&mut request.reconfigure_ipv6, args.add_ipv6, &args.drop_ipv6)?;
    if let Some(size) = args.disk_size.filter(|n| *n > 0) {
        request.primary_disk_size = Some(size.into());
    }
    if args.custom_ns {
        request.custom_ns = Some(1);
    }
    if args.no_custom_ns {
        request.custom_ns = Some(0);
    }

    if request.is_empty() {
        return Err(PaciError::InvalidInput(
            "There is no modification parameter. Please see 'pacicli help modify'".to_string(),
        ));
    }
    if let Some(family) = request.conflicting_family() {
        return Err(PaciError::InvalidInput(format!(
            "Adding and dropping {} addresses can't be requested at the same time",
            family
        )));
    }
    Ok(request)
}

fn apply_ip_changes(
    target: &mut Option<ReconfigureIp>,
    add: Option<u32>,
    drop: &[String],
) -> PaciResult<()> {
    if let Some(number) = add.filter(|n| *n > 0) {
        let ip = target.get_or_insert_with(ReconfigureIp::default);
        ip.add_ip = Some(AddIp {
            number: number.into(),
        });
    }
    if !drop.is_empty() {
        let addresses = drop
            .iter()
            .map(|text| Address::parse(text))
            .collect::<PaciResult<AddressList>>()?;
        let ip = target.get_or_insert_with(ReconfigureIp::default);
        match &mut ip.drop_ip {
            Some(existing) => {
                for address in addresses.iter() {
                    existing.ip.push(*address);
                }
            }
            None => ip.drop_ip = Some(DropIp { ip: addresses }),
        }
    }
    Ok(())
}

/// Validate a `--from`/`--to` pair; returns both instants and the
/// `from/to` path segment built from the original text.
fn time_window(window: &WindowArgs) -> PaciResult<(Timestamp, Timestamp, String)> {
    match (&window.from, &window.to) {
        (Some(from), Some(to)) => window_bounds(from, to),
        _ => Err(PaciError::InvalidInput(
            "This command must be used with a pair of --from and --to arguments".to_string(),
        )),
    }
}

fn window_bounds(from: &str, to: &str) -> PaciResult<(Timestamp, Timestamp, String)> {
    let start = Timestamp::parse_arg(from)?;
    let end = Timestamp::parse_arg(to)?;
    Ok((start, end, format!("{}/{}", from, to)))
}

/// History paths take either a time window or a record count
fn history_path(base: String, window: &HistoryArgs, query: &[String]) -> PaciResult<String> {
    match (&window.from, &window.to, window.num_records) {
        (Some(from), Some(to), _) => {
            let (_, _, range) = window_bounds(from, to)?;
            Ok(with_query(base + &range, query))
        }
        (_, _, Some(n)) if n > 0 => Ok(format!("{}{}", base, n)),
        _ => Err(PaciError::InvalidInput(
            "This command must be used with a pair of --from and --to arguments or --num-records"
                .to_string(),
        )),
    }
}

fn with_query(path: String, query: &[String]) -> String {
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

fn name_query(names: &[String]) -> Vec<String> {
    names.iter().map(|name| format!("name={}", name)).collect()
}

fn subscription_segment(subscription: &SubscriptionArgs) -> String {
    subscription
        .subscription_id
        .filter(|id| *id > 0)
        .map(|id| format!("/{}", id))
        .unwrap_or_default()
}
