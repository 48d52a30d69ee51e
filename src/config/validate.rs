use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.logging.rust_log.trim().is_empty() {
        errors.push("logging.rust_log must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::AppConfig;

    #[test]
    fn default_config_is_valid() {
        validate(&AppConfig::default()).expect("defaults should validate");
    }

    #[test]
    fn collects_every_problem_in_one_error() {
        let mut cfg = AppConfig::default();
        cfg.general.host = "  ".to_string();
        cfg.database.url = String::new();
        cfg.database.max_connections = 1;
        cfg.database.min_idle = 4;

        let err = validate(&cfg).expect_err("config should be rejected");
        let message = err.to_string();

        assert!(message.contains("general.host must not be empty"));
        assert!(message.contains("database.url must not be empty"));
        assert!(message.contains("database.min_idle (4) must be <= database.max_connections (1)"));
    }

    #[test]
    fn rejects_zero_pool_size() {
        let mut cfg = AppConfig::default();
        cfg.database.max_connections = 0;
        cfg.database.min_idle = 0;

        let err = validate(&cfg).expect_err("zero pool should be rejected");
        assert!(err.to_string().contains("database.max_connections must be > 0"));
    }
}
