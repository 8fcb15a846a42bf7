use crate::cli::actions::Action;
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let required = |name: &str| -> Result<String> {
        matches
            .get_one(name)
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{name}"))
    };

    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        auth_url: required("auth-url")?,
        eutype_url: required("eutype-url")?,
        eucloud_url: required("eucloud-url")?,
        dashboard_url: required("dashboard-url")?,
        default_url: required("default-url")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_builds_server_action() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "ensaluti",
            "--auth-url",
            "http://auth.tld:30500/api/auth",
            "--eucloud-url",
            "http://apps.tld:30080",
        ]);

        let Action::Server {
            port,
            auth_url,
            eutype_url,
            eucloud_url,
            ..
        } = handler(&matches)?;

        assert_eq!(port, 8080);
        assert_eq!(auth_url, "http://auth.tld:30500/api/auth");
        assert_eq!(eutype_url, "http://192.168.124.50:30081");
        assert_eq!(eucloud_url, "http://apps.tld:30080");

        Ok(())
    }
}
