#[cfg(test)]
mod tests {
    use crate::commands::run::RunOverrides;
    use crate::config::RunConfig;
    use crate::types::ViewportSize;
    use crate::webdriver::BrowserType;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_resolve_without_flags_uses_defaults() {
        let config = RunOverrides::default().resolve().unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{ "seeds": [1, 2, 3], "delay_ms": 250, "browser": "firefox" }"#,
        )
        .unwrap();

        let config = RunOverrides {
            config: Some(file.path().to_path_buf()),
            seeds: Some(vec![89, 90]),
            no_headless: true,
            viewport: Some("1280x720".to_string()),
            user_agent: Some("custom-agent/3.0".to_string()),
            nav_timeout_ms: Some(5_000),
            ..RunOverrides::default()
        }
        .resolve()
        .unwrap();

        assert_eq!(config.seeds, vec![89, 90]);
        // Kept from the file
        assert_eq!(config.delay_ms, 250);
        assert_eq!(config.browser, BrowserType::Firefox);
        assert!(!config.headless);
        assert_eq!(
            config.viewport,
            Some(ViewportSize {
                width: 1280,
                height: 720
            })
        );
        assert_eq!(config.navigation_timeout_ms, 5_000);
        assert_eq!(config.user_agent.as_deref(), Some("custom-agent/3.0"));
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let bad_viewport = RunOverrides {
            viewport: Some("wide".to_string()),
            ..RunOverrides::default()
        };
        assert!(bad_viewport.resolve().is_err());

        let bad_template = RunOverrides {
            url_template: Some("http://reports.test/report".to_string()),
            ..RunOverrides::default()
        };
        assert!(bad_template.resolve().is_err());

        let no_seeds = RunOverrides {
            seeds: Some(vec![]),
            ..RunOverrides::default()
        };
        assert!(no_seeds.resolve().is_err());

        let repeated_seed = RunOverrides {
            seeds: Some(vec![89, 90, 90]),
            ..RunOverrides::default()
        };
        let err = repeated_seed.resolve().unwrap_err();
        assert!(err.to_string().contains("Seed 90 is listed more than once"));
    }
}
