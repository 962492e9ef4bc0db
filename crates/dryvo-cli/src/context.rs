//! Wiring of the session manager for a CLI invocation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use tracing::debug;

use dryvo_auth::{SessionManager, SessionState};
use dryvo_core::{ApiUrl, ErrorChannel, TokenStore, UrlOpener};
use dryvo_file::FileStore;
use dryvo_http::{ApiClient, ClientConfig};

use crate::cli::GlobalArgs;
use crate::output;

/// Prints reported errors to stderr.
#[derive(Debug, Default)]
pub struct TerminalErrors;

impl ErrorChannel for TerminalErrors {
    fn reported(&self, message: &str) {
        if message.is_empty() {
            output::error("Request failed");
        } else {
            output::error(message);
        }
    }
}

/// Prints links instead of launching a browser.
#[derive(Debug, Default)]
pub struct PrintOpener;

impl UrlOpener for PrintOpener {
    fn open(&self, url: &str) {
        println!("{}", url);
    }
}

/// Everything a command needs to talk to the API.
pub struct Context {
    pub manager: SessionManager,
    pub client: Arc<ApiClient>,
}

impl Context {
    pub fn new(global: &GlobalArgs) -> Result<Self> {
        let api = ApiUrl::new(&global.api_url).context("Invalid API URL")?;
        let store_path = match &global.store {
            Some(path) => path.clone(),
            None => default_store_path()?,
        };
        debug!(api = %api, store = %store_path.display(), "Using credential store");

        let tokens = TokenStore::new(Arc::new(FileStore::new(store_path)));
        let client = Arc::new(
            ApiClient::new(ClientConfig::new(api.clone()), tokens.clone())
                .context("Failed to build HTTP client")?,
        );
        let manager = SessionManager::new(
            api,
            client.clone(),
            tokens,
            Arc::new(SessionState::new()),
            Arc::new(TerminalErrors),
            Arc::new(PrintOpener),
        );

        Ok(Self { manager, client })
    }
}

/// Get the default credential store path.
fn default_store_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "dryvo").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("tokens.json"))
}
