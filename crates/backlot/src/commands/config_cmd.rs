//! Config command handlers (no API client required).

use backlot_config::{self as cfgfile, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&cfgfile::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = cfgfile::load_config_or_default();
            for profile in cfg.profiles.values_mut() {
                if profile.token.is_some() {
                    profile.token = Some("<redacted>".into());
                }
            }
            let rendered = toml::to_string_pretty(&cfg).map_err(cfgfile::ConfigError::from)?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init {
            name,
            api_url,
            token_env,
        } => {
            let profile = Profile {
                api_url,
                token_env,
                ..Profile::default()
            };
            cfgfile::validate_profile(&profile)?;

            let mut cfg = cfgfile::load_config_or_default();
            cfg.profiles.insert(name.clone(), profile);
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(name.clone());
            }
            cfgfile::save_config(&cfg)?;

            if !global.quiet {
                eprintln!(
                    "profile '{name}' saved to {}",
                    cfgfile::config_path().display()
                );
            }
            Ok(())
        }

        ConfigCommand::SetToken { name, token } => {
            cfgfile::store_token(&name, &token)?;
            if !global.quiet {
                eprintln!("token stored in keyring for profile '{name}'");
            }
            Ok(())
        }
    }
}
