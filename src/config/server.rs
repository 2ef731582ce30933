use error_stack::{Result, ResultExt};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use super::ParseError;

/// HTTP server configuration, merged from `roster.yml` (if present) and
/// `ROSTER_`-prefixed environment variables.
#[derive(Debug, Deserialize)]
pub struct Server {
    /// Address the HTTP server binds to.
    ///
    /// **Environment variable**: `ROSTER_IP`
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    /// Port the HTTP server binds to.
    ///
    /// **Environment variable**: `ROSTER_PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Number of HTTP worker threads.
    ///
    /// **Environment variable**: `ROSTER_WORKERS`
    #[serde(default = "Server::default_workers")]
    pub workers: usize,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();
        Self::figment().extract().change_context(ParseError)
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &str = "roster.yml";

    /// Creates the default [`figment::Figment`] used to load the server
    /// configuration. Split out so tests can extract from it directly.
    pub(crate) fn figment() -> figment::Figment {
        use figment::providers::{Env, Format, Yaml};
        use figment::Figment;

        Figment::new()
            .merge(Yaml::file(Self::DEFAULT_CONFIG_FILE))
            .merge(Env::prefixed("ROSTER_"))
    }

    const fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    const fn default_port() -> u16 {
        3000
    }

    const fn default_workers() -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults() {
        Jail::expect_with(|_jail| {
            let config: Server = Server::figment().extract()?;
            assert_eq!(config.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
            assert_eq!(config.port, 3000);
            assert_eq!(config.workers, 1);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("roster.yml", "port: 8080\nworkers: 2\n")?;
            jail.set_env("ROSTER_IP", "0.0.0.0");
            jail.set_env("ROSTER_WORKERS", "4");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.ip, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
            assert_eq!(config.port, 8080);
            assert_eq!(config.workers, 4);
            Ok(())
        });
    }
}
