//! Server configuration.
//!
//! Every option can be given on the command line or through the environment.

use clap::Parser;

use crate::domain::{
    PlazaLimits,
    plaza::{DEFAULT_ART_CAPACITY, DEFAULT_CHAT_CAPACITY, DEFAULT_HOUSE_SLOTS},
};

/// Largest accepted `data:` URI for a published drawing.
pub const DEFAULT_MAX_ART_BYTES: usize = 2 * 1024 * 1024;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "plaza-server")]
#[command(about = "Realtime presence relay for the multiplayer plaza", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Allowed browser origin; any origin is accepted when unset
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Number of purchasable house slots (`house-1` ..= `house-N`)
    #[arg(long, default_value_t = DEFAULT_HOUSE_SLOTS)]
    pub house_slots: u32,

    /// Gallery size before the oldest artwork is evicted
    #[arg(long, default_value_t = DEFAULT_ART_CAPACITY)]
    pub art_capacity: usize,

    /// Chat history length
    #[arg(long, default_value_t = DEFAULT_CHAT_CAPACITY)]
    pub chat_capacity: usize,

    /// Maximum size of a published image in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_ART_BYTES)]
    pub max_art_bytes: usize,
}

impl ServerConfig {
    pub fn limits(&self) -> PlazaLimits {
        PlazaLimits {
            house_slots: self.house_slots,
            art_capacity: self.art_capacity,
            chat_capacity: self.chat_capacity,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            cors_origin: None,
            house_slots: DEFAULT_HOUSE_SLOTS,
            art_capacity: DEFAULT_ART_CAPACITY,
            chat_capacity: DEFAULT_CHAT_CAPACITY,
            max_art_bytes: DEFAULT_MAX_ART_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_arguments() {
        // テスト項目: コマンドライン引数が設定に反映される
        // given (前提条件):
        let args = [
            "plaza-server",
            "--host",
            "0.0.0.0",
            "--port",
            "4000",
            "--cors-origin",
            "http://localhost:5173",
            "--house-slots",
            "12",
            "--art-capacity",
            "5",
        ];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4000);
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
        assert_eq!(
            config.limits(),
            PlazaLimits {
                house_slots: 12,
                art_capacity: 5,
                chat_capacity: DEFAULT_CHAT_CAPACITY,
            }
        );
        assert_eq!(config.max_art_bytes, DEFAULT_MAX_ART_BYTES);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        // テスト項目: 範囲外のポート番号はエラーになる
        let result = ServerConfig::try_parse_from(["plaza-server", "--port", "70000"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_default_limits_match_plaza_defaults() {
        // テスト項目: デフォルト設定の上限値が広場のデフォルトと一致する
        assert_eq!(ServerConfig::default().limits(), PlazaLimits::default());
    }
}
