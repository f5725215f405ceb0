//! Connection configuration.

use crate::error::{OrmError, OrmResult};
use mysql_async::{Opts, OptsBuilder, PoolConstraints, PoolOpts};
use serde::Deserialize;

/// Standard pool-connection parameters plus the table-prefix extension.
///
/// `prefix` is substituted for every `{pre}` token inside raw SQL text before
/// execution, which keeps multi-tenant table prefixing out of call sites.
#[derive(Clone, Debug, Deserialize)]
pub struct DbConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
    /// Smallest number of pooled connections kept alive.
    #[serde(default = "default_pool_min")]
    pub pool_min: usize,
    /// Pool size cap.
    #[serde(default = "default_pool_max")]
    pub pool_max: usize,
    /// Table-name prefix substituted for `{pre}` tokens.
    #[serde(default)]
    pub prefix: String,
}

fn default_port() -> u16 {
    3306
}

fn default_pool_min() -> usize {
    1
}

fn default_pool_max() -> usize {
    16
}

impl DbConfig {
    pub(crate) fn to_opts(&self) -> OrmResult<Opts> {
        let constraints = PoolConstraints::new(self.pool_min, self.pool_max).ok_or_else(|| {
            OrmError::config(format!(
                "invalid pool bounds {}..{}",
                self.pool_min, self.pool_max
            ))
        })?;
        let builder = OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(Some(self.database.clone()))
            .pool_opts(PoolOpts::default().with_constraints(constraints));
        Ok(builder.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DbConfig {
        serde_json::from_value(serde_json::json!({
            "host": "127.0.0.1",
            "user": "app",
            "password": "secret",
            "database": "app_db",
            "prefix": "t_"
        }))
        .unwrap()
    }

    #[test]
    fn defaults_apply() {
        let config = base();
        assert_eq!(config.port, 3306);
        assert_eq!(config.pool_min, 1);
        assert_eq!(config.pool_max, 16);
        assert_eq!(config.prefix, "t_");
    }

    #[test]
    fn bad_pool_bounds_are_rejected() {
        let mut config = base();
        config.pool_min = 20;
        config.pool_max = 4;
        let err = config.to_opts().unwrap_err();
        assert_eq!(err.code(), "config");
    }

    #[test]
    fn opts_carry_the_target_database() {
        let opts = base().to_opts().unwrap();
        assert_eq!(opts.db_name(), Some("app_db"));
        assert_eq!(opts.tcp_port(), 3306);
    }
}
