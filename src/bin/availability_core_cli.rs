//! Interactive dry-run for the availability-rule wizard. Walks the full
//! step flow and journals the request it would send instead of calling the
//! booking backend.

use std::process::ExitCode;

use dialoguer::{theme::ColorfulTheme, Select};
use uuid::Uuid;

use availability_core::cli::{output, CommandError, LoggingCacheHook, TerminalNotifier, WizardRunner};
use availability_core::client::dry_run::DryRunBackend;
use availability_core::config::ConfigManager;
use availability_core::rules::AvailabilityType;
use availability_core::utils::base_dir;

fn main() -> ExitCode {
    availability_core::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CommandError> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load()?;

    let listing_id = parse_listing_arg().or(config.last_listing).unwrap_or_else(|| {
        let id = Uuid::new_v4();
        output::info(format!("No listing given; using a fresh id {id}"));
        id
    });

    let theme = ColorfulTheme::default();
    let availability_type = match Select::with_theme(&theme)
        .with_prompt("How is this listing booked?")
        .items(&[
            AvailabilityType::Date.label(),
            AvailabilityType::Datetime.label(),
        ])
        .default(0)
        .interact()?
    {
        0 => AvailabilityType::Date,
        _ => AvailabilityType::Datetime,
    };

    let mut api = DryRunBackend::new(base_dir().join("dry_run_requests.json"));
    let mut notifier = TerminalNotifier;
    let mut cache = LoggingCacheHook;
    let mut runner = WizardRunner::new(&mut api, &mut notifier, &mut cache);

    match runner.run_create(listing_id, availability_type)? {
        Some(rule) => {
            output::info(format!(
                "Request journaled to {}",
                api.journal_path().display()
            ));
            config.last_listing = Some(rule.listing_id);
            manager.save(&config)?;
        }
        None => output::info("Nothing submitted."),
    }
    Ok(())
}

fn parse_listing_arg() -> Option<Uuid> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--listing" {
            return args.next().and_then(|value| Uuid::parse_str(&value).ok());
        }
    }
    None
}
