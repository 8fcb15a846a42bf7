use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("ensaluti")
        .about("EUsuite single sign-on portal")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("ENSALUTI_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("auth-url")
                .short('a')
                .long("auth-url")
                .help("Authentication backend base URL, example: http://auth.tld:30500/api/auth")
                .env("ENSALUTI_AUTH_URL")
                .required(true),
        )
        .arg(
            Arg::new("eutype-url")
                .long("eutype-url")
                .help("Origin serving the /eutype application")
                .default_value("http://192.168.124.50:30081")
                .env("ENSALUTI_EUTYPE_URL"),
        )
        .arg(
            Arg::new("eucloud-url")
                .long("eucloud-url")
                .help("Origin serving the /eucloud application")
                .default_value("http://192.168.124.50:30080")
                .env("ENSALUTI_EUCLOUD_URL"),
        )
        .arg(
            Arg::new("dashboard-url")
                .long("dashboard-url")
                .help("Origin serving the /dashboard application")
                .default_value("http://192.168.124.50:30091")
                .env("ENSALUTI_DASHBOARD_URL"),
        )
        .arg(
            Arg::new("default-url")
                .long("default-url")
                .help("Fallback origin when the redirect matches no known application")
                .default_value("http://192.168.124.50:30091")
                .env("ENSALUTI_DEFAULT_URL"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ENSALUTI_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
