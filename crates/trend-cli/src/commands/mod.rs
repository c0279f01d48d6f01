//! CLI 명령어 구현 모듈.

pub mod classify;
pub mod evaluate;
pub mod size;
pub mod states;

use anyhow::Result;

/// 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: text, json", s)),
        }
    }
}
