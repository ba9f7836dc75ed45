mod cli;

use std::{error::Error, path::PathBuf};

use barber_booking::{
    admin::{Action, StatusFilter},
    api,
    config::{self, Config},
    dates::LocalClock,
    form::BookingForm,
    model::{BookingId, BookingStatus, Identity},
    text::Lang,
};
use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Book a visit to the barbershop")]
    #[command(long_about = None)]
    Book(BookArgs),

    #[command(about = "Manage bookings")]
    #[command(long_about = None)]
    Admin(AdminArgs),
}

#[derive(clap::Args)]
struct CommonArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,

    /// Overrides the interface language from the config.
    #[arg(short, long, value_enum)]
    lang: Option<Lang>,
}

#[derive(clap::Args)]
struct BookArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Id of the user provided by the host application.
    #[arg(long)]
    user_id: Option<i64>,

    /// Display name of the user provided by the host application.
    #[arg(long, requires = "user_id")]
    display_name: Option<String>,
}

#[derive(clap::Args)]
struct AdminArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(clap::Subcommand)]
enum AdminCommand {
    #[command(about = "Lists bookings")]
    List {
        #[arg(long, value_enum)]
        status: Option<BookingStatus>,
    },

    #[command(about = "Confirms a pending booking")]
    Confirm { id: BookingId },

    #[command(about = "Completes a confirmed booking")]
    Complete { id: BookingId },

    #[command(about = "Cancels a pending or confirmed booking")]
    Cancel { id: BookingId },

    #[command(about = "Deletes a booking")]
    Delete {
        id: BookingId,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::Book(args) => {
            let (cfg, lang) = setup(&args.common)?;

            let identity = args.user_id.map(|id| Identity {
                id,
                display_name: args.display_name.clone().unwrap_or_default(),
            });

            let client = api::Client::new(&cfg.api_url)?;
            let mut form = BookingForm::new(Box::new(LocalClock), identity);

            cli::book(&mut form, &client, lang, cfg.notice_ttl())?;
        }
        Cli::Admin(args) => {
            let (cfg, lang) = setup(&args.common)?;

            let client = api::Client::new(&cfg.api_url)?;

            match args.command {
                AdminCommand::List { status } => {
                    cli::list(&client, StatusFilter::from(status), lang)?
                }
                AdminCommand::Confirm { id } => cli::act(&client, &id, Action::Confirm, lang)?,
                AdminCommand::Complete { id } => cli::act(&client, &id, Action::Complete, lang)?,
                AdminCommand::Cancel { id } => cli::act(&client, &id, Action::Cancel, lang)?,
                AdminCommand::Delete { id, yes } => cli::remove(&client, &id, yes, lang)?,
            }
        }
    };

    Ok(())
}

fn setup(args: &CommonArgs) -> anyhow::Result<(Config, Lang)> {
    debug!("Подгружаем конфиг из {:?}", args.config_path);
    let cfg = config::load(args.config_path.clone())?;

    let lang = args.lang.unwrap_or(cfg.lang);
    debug!("Используем сервис {} и язык {}", cfg.api_url, lang);

    Ok((cfg, lang))
}
