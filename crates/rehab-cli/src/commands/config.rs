use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use rehab_infrastructure::ConfigService;

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Turn spoken feedback on or off
    SetAudio {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Set the backend base URL
    SetUrl { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

pub fn run(action: ConfigAction) -> Result<()> {
    let service = ConfigService::new()?;

    match action {
        ConfigAction::Show => {
            let config = service.load()?;
            println!("{} {}", "classifier_url".bold(), config.classifier_url);
            println!(
                "{} {}",
                "session_cookie".bold(),
                if config.session_cookie.is_some() { "<set>" } else { "<unset>" }
            );
            println!("{} {}", "throttle_ms".bold(), config.throttle_ms);
            println!("{} {}", "audio_enabled".bold(), config.audio_enabled);
            println!("{} {}", "history_limit".bold(), config.history_limit);
            println!("{} {}", "request_timeout_secs".bold(), config.request_timeout_secs);
        }
        ConfigAction::Path => {
            println!("{}", service.path().display());
        }
        ConfigAction::SetAudio { state } => {
            let config = service.set_audio_enabled(state == Toggle::On)?;
            println!("audio_enabled = {}", config.audio_enabled);
        }
        ConfigAction::SetUrl { url } => {
            let config = service.set_classifier_url(&url)?;
            println!("classifier_url = {}", config.classifier_url);
        }
    }

    Ok(())
}
