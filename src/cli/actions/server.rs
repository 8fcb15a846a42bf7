use crate::{
    cli::{actions::Action, globals::GlobalArgs},
    ensaluti,
    ensaluti::redirect::AppDomainTable,
};
use anyhow::{anyhow, Context, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            auth_url,
            eutype_url,
            eucloud_url,
            dashboard_url,
            default_url,
        } => {
            let auth_url = checked_url("auth-url", &auth_url)?;

            let domains = AppDomainTable::new(
                &checked_url("eutype-url", &eutype_url)?,
                &checked_url("eucloud-url", &eucloud_url)?,
                &checked_url("dashboard-url", &dashboard_url)?,
                &checked_url("default-url", &default_url)?,
            );

            let globals = GlobalArgs::new(auth_url, domains);

            ensaluti::new(port, globals).await?;
        }
    }

    Ok(())
}

// Only http(s) origins may enter the domain table
fn checked_url(name: &str, value: &str) -> Result<String> {
    let url = Url::parse(value).with_context(|| format!("Invalid {name}: {value}"))?;

    match url.scheme() {
        "http" | "https" => Ok(value.trim_end_matches('/').to_string()),
        scheme => Err(anyhow!("Invalid {name}: unsupported scheme {scheme}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_url_accepts_http_and_trims() -> Result<()> {
        assert_eq!(
            checked_url("eutype-url", "http://apps.tld:30081/")?,
            "http://apps.tld:30081"
        );
        assert_eq!(
            checked_url("eucloud-url", "https://apps.tld")?,
            "https://apps.tld"
        );
        Ok(())
    }

    #[test]
    fn test_checked_url_rejects_other_schemes() {
        assert!(checked_url("default-url", "ftp://apps.tld").is_err());
        assert!(checked_url("default-url", "not a url").is_err());
    }
}
