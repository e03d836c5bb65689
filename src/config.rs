//! API credentials and setup guidance

use crate::error::{PricerError, Result};

pub const CONSUMER_KEY_VAR: &str = "BRICKLINK_CONSUMER_KEY";
pub const CONSUMER_SECRET_VAR: &str = "BRICKLINK_CONSUMER_SECRET";
pub const TOKEN_KEY_VAR: &str = "BRICKLINK_TOKEN_KEY";
pub const TOKEN_SECRET_VAR: &str = "BRICKLINK_TOKEN_SECRET";

/// OAuth1 credentials for the BrickLink store API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token_key: String,
    pub token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &redact(&self.consumer_key))
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("token_key", &redact(&self.token_key))
            .field("token_secret", &redact(&self.token_secret))
            .finish()
    }
}

impl Credentials {
    /// Load credentials from the process environment (after any `.env` file)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through `lookup`; empty values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut get = |name: &'static str| {
            let value = lookup(name).filter(|v| !v.trim().is_empty());
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let credentials = Self {
            consumer_key: get(CONSUMER_KEY_VAR),
            consumer_secret: get(CONSUMER_SECRET_VAR),
            token_key: get(TOKEN_KEY_VAR),
            token_secret: get(TOKEN_SECRET_VAR),
        };

        if missing.is_empty() {
            Ok(credentials)
        } else {
            Err(PricerError::MissingCredentials(missing))
        }
    }

    /// Masked view of every credential for debug output
    pub fn redacted(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Consumer Key", redact(&self.consumer_key)),
            ("Consumer Secret", redact(&self.consumer_secret)),
            ("Token Key", redact(&self.token_key)),
            ("Token Secret", redact(&self.token_secret)),
        ]
    }
}

/// Show at most the first 4 and last 4 characters of a secret
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Instructions for obtaining and configuring API credentials
pub fn setup_instructions() -> String {
    let rule = "=".repeat(60);
    format!(
        "\n{rule}\n\
         SETUP REQUIRED: BrickLink API Credentials\n\
         {rule}\n\
         1. Go to: https://www.bricklink.com/v2/api/register_consumer.page\n\
         2. Register your application and get 4 credentials\n\
         3. Export them or create a .env file in the working directory with:\n\
         \n\
         \x20  {CONSUMER_KEY_VAR}=your_consumer_key\n\
         \x20  {CONSUMER_SECRET_VAR}=your_consumer_secret\n\
         \x20  {TOKEN_KEY_VAR}=your_token_value\n\
         \x20  {TOKEN_SECRET_VAR}=your_token_secret\n\
         {rule}\n"
    )
}
