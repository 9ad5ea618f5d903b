use anyhow::Result;
use career_helper::core::ConfigProvider;
use career_helper::utils::validation::Validate;
use career_helper::{
    HttpRecommendationClient, LocalStorage, RecommendationSession, Settings, SubmissionController,
    TomlConfig,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_toml_config_drives_full_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("out");
    std::fs::create_dir_all(&output_dir)?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/recommend")
            .header("Authorization", "Bearer toml-flow-token")
            .json_body_partial(r#"{"skills": "Go, Kubernetes", "work_style": "Remote"}"#);
        then.status(200).json_body(json!({
            "status": "success",
            "result": [
                {"title": "Platform Engineer", "skills": "- Go\n- Terraform"},
                {"role": "SRE"},
                {"name": "Cloud Architect"},
                {"career": "DevOps Lead"}
            ]
        }));
    });

    std::env::set_var("CAREER_HELPER_FLOW_TOKEN", "toml-flow-token");
    let config_path = temp_dir.path().join("career.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[client]
base_url = "{base_url}"
timeout_seconds = 30

[client.headers]
Authorization = "Bearer ${{CAREER_HELPER_FLOW_TOKEN}}"

[profile]
skills = "Go, Kubernetes"
work_style = "Remote"

[output]
path = "{output}"
write_all_pages = false
"#,
            base_url = server.base_url(),
            output = output_dir.to_str().unwrap().replace('\\', "/"),
        ),
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    let settings = Settings::from(config);
    settings.validate()?;
    assert_eq!(settings.timeout(), Some(Duration::from_secs(30)));

    let client = HttpRecommendationClient::from_config(&settings);
    let controller = SubmissionController::new(client).with_timeout(settings.timeout());
    let mut session = RecommendationSession::new(
        LocalStorage::new(settings.output_path.clone()),
        controller,
        settings.output_path.clone(),
    )
    .with_all_pages(settings.write_all_pages);

    let report = session.run(&settings.profile).await?;

    api_mock.assert();
    assert_eq!(report.card_count, 4);
    assert_eq!(report.files, ["index.html", "page-1.html"]);
    assert!(!output_dir.join("page-2.html").exists());

    let index = std::fs::read_to_string(output_dir.join("index.html"))?;
    assert!(index.contains("Platform Engineer"));
    assert!(index.contains(r#"<span class="skill-tag">Terraform</span>"#));
    assert!(index.contains("SRE"));
    assert!(index.contains("Cloud Architect"));
    assert!(!index.contains("DevOps Lead"));
    assert!(index.contains("Page 1 of 2"));
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = TomlConfig::from_toml_str(
        r#"
[client]
base_url = "not a url"
"#,
    )
    .unwrap();
    assert!(config.validate().is_err());

    let config = TomlConfig::from_toml_str(
        r#"
[client]
base_url = "http://localhost:5000"
timeout_seconds = 99999
"#,
    )
    .unwrap();
    assert!(config.validate().is_err());

    assert!(TomlConfig::from_toml_str("[profile]\nskills = \"Rust\"").is_err());
}
