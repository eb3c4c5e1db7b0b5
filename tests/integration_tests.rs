use httpmock::prelude::*;
use pacicli::cli::{run_command, Args, ConsoleWriter};
use pacicli::{ApiClient, Config, PaciError};
use clap::Parser;

/// End-to-end tests: parsed arguments through the HTTP client to a mock service
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn config(server: &MockServer) -> Config {
        Config {
            base_url: server.url("/paci/v1.0"),
            username: "user".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        }
    }

    async fn run(server: &MockServer, argv: &[&str]) -> (Result<(), PaciError>, String) {
        let args = Args::try_parse_from(argv).unwrap();
        let config = config(server);
        let client = ApiClient::from_config(&config).unwrap();
        let mut writer = ConsoleWriter::new(args.output, args.verbose, args.no_header, Vec::new());
        let result = run_command(args.command, &client, &config, &mut writer).await;
        (result, String::from_utf8(writer.into_inner()).unwrap())
    }

    #[tokio::test]
    async fn test_list_servers_table() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/paci/v1.0/ve")
                    .query_param("subscription", "1001")
                    .header("authorization", "Basic dXNlcjpzZWNyZXQ=");
                then.status(200).body(
                    r#"<?xml version="1.0" encoding="UTF-8"?>
<ve-list>
  <ve-info id="1" name="web1" hostname="web1.example.com" state="STARTED" subscription-id="1001"/>
  <ve-info id="2" name="db1" hostname="db1.example.com" state="STOPPED" subscription-id="1001"/>
</ve-list>"#,
                );
            })
            .await;

        let (result, out) = run(&server, &["pacicli", "list", "-s", "1001"]).await;
        result.unwrap();
        mock.assert_async().await;

        assert!(out.contains("HOSTNAME"), "{out}");
        assert!(out.contains("db1.example.com"), "{out}");
        assert!(out.contains("STOPPED"), "{out}");
    }

    #[tokio::test]
    async fn test_info_as_toml() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/paci/v1.0/ve/web1");
                then.status(200).body(
                    r#"<ve>
  <name>web1</name>
  <cpu number="2" power="1600"/>
  <ram-size>1024</ram-size>
  <network private-ip="10.1.0.5/16">
    <public-ip id="3" address="203.0.113.7/24" gateway="203.0.113.1"/>
  </network>
  <state>STARTED</state>
</ve>"#,
                );
            })
            .await;

        let (result, out) = run(&server, &["pacicli", "-o", "toml", "info", "web1"]).await;
        result.unwrap();

        let value: toml::Value = toml::from_str(&out).unwrap();
        assert_eq!(value["name"].as_str(), Some("web1"));
        assert_eq!(value["ram_size"].as_integer(), Some(1024));
        assert_eq!(value["cpu"]["power"].as_integer(), Some(1600));
        assert_eq!(
            value["network"]["public_ip"][0]["address"].as_str(),
            Some("203.0.113.7/24")
        );
    }

    #[tokio::test]
    async fn test_stop_already_stopped() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/paci/v1.0/ve/web1/stop");
                then.status(304);
            })
            .await;

        let (result, out) = run(&server, &["pacicli", "stop", "web1"]).await;
        match result {
            Err(PaciError::Api { status, body }) => {
                assert_eq!(status, 304);
                assert_eq!(body, "web1 has already stopped");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_modify_sends_reconfigure_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/paci/v1.0/ve/web1")
                    .header("content-type", "application/xml")
                    .body("<reconfigure-ve><ram-size>2048</ram-size></reconfigure-ve>");
                then.status(202).body("VE reconfiguration started");
            })
            .await;

        let (result, out) = run(&server, &["pacicli", "modify", "web1", "--ram", "2048"]).await;
        result.unwrap();
        mock.assert_async().await;
        assert_eq!(out, "web1 VE reconfiguration started\n");
    }

    #[tokio::test]
    async fn test_history_by_record_count() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/paci/v1.0/ve/web1/history/3");
                then.status(200).body(
                    r#"<ve-history>
  <ve-snapshot cpu="1" ram="512" local-disk="10" bandwidth="100" no-of-public-ip="1" state="STARTED" event-timestamp="2015-01-10 12:00:00.123456+0100"/>
</ve-history>"#,
                );
            })
            .await;

        let (result, out) = run(
            &server,
            &["pacicli", "-H", "history", "web1", "-n", "3"],
        )
        .await;
        result.unwrap();
        mock.assert_async().await;
        assert!(!out.contains("DATETIME"), "{out}");
        assert!(out.contains("2015-01-10 12:00:00.123456+0100"), "{out}");
    }

    #[tokio::test]
    async fn test_service_error_surfaces_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/paci/v1.0/image/missing");
                then.status(404).body("Image 'missing' not found");
            })
            .await;

        let (result, _) = run(&server, &["pacicli", "imginfo", "missing"]).await;
        match result {
            Err(error) => assert_eq!(
                error.to_string(),
                "API error (status 404): Image 'missing' not found"
            ),
            Ok(()) => panic!("expected an API error"),
        }
    }

    #[tokio::test]
    async fn test_json_output_of_backup_schedules() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/paci/v1.0/schedule");
                then.status(200).body(
                    r#"<backup-schedule-list><backup-schedule id="1" name="daily" enabled="true" backups-to-keep="7" no-of-incremental="6"><description>Every day</description></backup-schedule></backup-schedule-list>"#,
                );
            })
            .await;

        let (result, out) = run(&server, &["pacicli", "--output", "json", "backup-schedule"]).await;
        result.unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["backup_schedule"][0]["name"], "daily");
        assert_eq!(value["backup_schedule"][0]["description"], "Every day");
        assert_eq!(value["backup_schedule"][0]["backups_to_keep"], 7);
    }
}
