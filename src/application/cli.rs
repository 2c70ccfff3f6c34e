use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;

/// What the user asked the binary to do once configuration is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    Ask(String),
    Chat,
    Courses,
    Requirements,
}

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /courses - Loads your shopping cart and enrolled schedule from the portal.
- /requirements - Loads your degree requirements from the portal.
- /quit /exit (/q) - Exit the chat.
- /help (/h) - Provides this help menu.
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Send a single query to the backend and stream the answer to stdout.")
        .arg(
            Arg::new("query")
                .help("The question to ask, exactly as you would type it in the portal search box.")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        );
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("coursechat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(help_text())
        .arg_required_else_help(false)
        .subcommand(subcommand_ask())
        .subcommand(Command::new("chat").about("Start a new chat session."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(Command::new("courses").about("Print your cart and enrolled courses as JSON."))
        .subcommand(Command::new("requirements").about("Print your degree requirements as JSON."))
        .arg(
            Arg::new(ConfigKey::Backend.to_string())
                .short('b')
                .long(ConfigKey::Backend.to_string())
                .env("COURSECHAT_BACKEND")
                .num_args(1)
                .help(format!("The backend protocol to speak when asking questions. [default: {}]", Config::default(ConfigKey::Backend)))
                .value_parser(PossibleValuesParser::new(BackendName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::BackendTimeout.to_string())
                .long(ConfigKey::BackendTimeout.to_string())
                .env("COURSECHAT_BACKEND_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before timing out when doing a healthcheck for the backend. [default: {}]", Config::default(ConfigKey::BackendTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::BackendURL.to_string())
                .short('u')
                .long(ConfigKey::BackendURL.to_string())
                .env("COURSECHAT_BACKEND_URL")
                .num_args(1)
                .help(format!("URL of the local assistant backend. [default: {}]", Config::default(ConfigKey::BackendURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("COURSECHAT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PortalCookie.to_string())
                .long(ConfigKey::PortalCookie.to_string())
                .env("COURSECHAT_PORTAL_COOKIE")
                .num_args(1)
                .help("Cookie header of a signed in portal session, copied from your browser.")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PortalCourseInfoURL.to_string())
                .long(ConfigKey::PortalCourseInfoURL.to_string())
                .env("COURSECHAT_PORTAL_COURSE_INFO_URL")
                .num_args(1)
                .help("Portal page listing your shopping cart and enrolled schedule.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PortalRequirementsURL.to_string())
                .long(ConfigKey::PortalRequirementsURL.to_string())
                .env("COURSECHAT_PORTAL_REQUIREMENTS_URL")
                .num_args(1)
                .help("Portal page embedding your academic requirements report.")
                .global(true),
        );
}

pub async fn parse() -> Result<Option<Invocation>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("ask", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let query = subcmd_matches
                .get_many::<String>("query")
                .map(|parts| return parts.cloned().collect::<Vec<String>>().join(" "))
                .unwrap_or_default();

            return Ok(Some(Invocation::Ask(query)));
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some(("courses", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(Invocation::Courses));
        }
        Some(("requirements", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(Invocation::Requirements));
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(Some(Invocation::Chat));
}
