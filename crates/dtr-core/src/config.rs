use std::{env, fs, path::Path};

use crate::{
    domain::{DestChatId, SourceChannelId},
    errors::Error,
    Result,
};

/// Typed configuration for the relay.
///
/// Everything comes from the environment (with an optional `.env` file),
/// matching how the bot is deployed: one source channel, one destination
/// chat, one credential per platform.
#[derive(Clone, Debug)]
pub struct Config {
    pub discord_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: DestChatId,
    pub discord_channel_id: SourceChannelId,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let discord_token = required("DISCORD_TOKEN")?;
        let telegram_token = required("TELEGRAM_TOKEN")?;

        let telegram_chat_id = DestChatId(parse_var("TELEGRAM_CHAT_ID")?);
        let discord_channel_id = SourceChannelId(parse_var("DISCORD_CHANNEL_ID")?);

        Ok(Self {
            discord_token,
            telegram_token,
            telegram_chat_id,
            discord_channel_id,
        })
    }
}

fn required(key: &str) -> Result<String> {
    env_str(key)
        .and_then(non_empty)
        .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Result<T> {
    required(key)?
        .trim()
        .parse::<T>()
        .map_err(|_| Error::Config(format!("{key} is not a valid numeric id")))
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}
