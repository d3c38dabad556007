use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

pub const CONNECT_PROMPT: &str = "👆🏽 Write a message in the text-field above.";
pub const FILL_FORM: &str = "👆🏽 Please fill out all the fields above.";
pub const CONNECT_HINT: &str = "🦊 Connect to Metamask using the top right button.";
pub const INSTALL_WALLET: &str =
    "🦊 You must install Metamask, a virtual Ethereum wallet, in your browser.";
pub const INSTALL_WALLET_URL: &str = "https://metamask.io/download.html";

pub const ADDRESS_MISSING: &str = "❗Please make sure if address field is filled before transfer.";
pub const AMOUNT_MISSING: &str = "❗Please make sure if amount field is filled before transfer.";
pub const AMOUNT_INVALID: &str = "❗Please make sure if number is correct.";
pub const DIRECTION_INVALID: &str = "❗Please choose a transfer direction: ethToBsc or bscToEth.";
pub const TRANSFER_FAILED: &str = "❗Error on transfer";
pub const TRANSFER_FINISHED: &str = "✅ Finished transfer";

/// Human-readable status shown to the user after a wallet or bridge action.
///
/// `Linked` carries a call to action that points somewhere, e.g. the wallet
/// download page. Renderers without hyperlinks print the url after the text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Status {
    Plain(String),
    Linked(String, Url),
}

impl Status {
    pub fn plain(text: impl Into<String>) -> Self {
        Status::Plain(text.into())
    }

    pub fn install_wallet() -> Self {
        match Url::parse(INSTALL_WALLET_URL) {
            Ok(url) => Status::Linked(INSTALL_WALLET.to_string(), url),
            Err(_) => Status::plain(INSTALL_WALLET),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Status::Plain(text) | Status::Linked(text, _) => text,
        }
    }

    pub fn url(&self) -> Option<&Url> {
        match self {
            Status::Plain(_) => None,
            Status::Linked(_, url) => Some(url),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Plain(String::new())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Plain(text) => f.write_str(text),
            Status::Linked(text, url) => write!(f, "{} ({})", text, url),
        }
    }
}

impl From<&str> for Status {
    fn from(text: &str) -> Self {
        Status::plain(text)
    }
}
