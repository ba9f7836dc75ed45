use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::text::Lang;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Адрес сервиса бронирования.
    pub api_url: String,

    /// Язык интерфейса по умолчанию.
    pub lang: Lang,

    /// Сколько секунд показывать уведомления.
    pub notice_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_owned(),
            lang: Lang::default(),
            notice_ttl_secs: 5,
        }
    }
}

impl Config {
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }
}

/// Загружает конфигурацию.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let mut cfg: Config = confy::load_path(&path)
        .with_context(|| format!("load config from {:?}", path))?;

    normalize(&mut cfg)?;

    Ok(cfg)
}

pub fn normalize(cfg: &mut Config) -> anyhow::Result<()> {
    cfg.api_url = cfg.api_url.trim().trim_end_matches('/').to_owned();

    Url::parse(&cfg.api_url).with_context(|| format!("invalid api_url {:?}", cfg.api_url))?;

    Ok(())
}
