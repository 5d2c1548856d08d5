//! Server Configuration
//!
//! The server takes two configuration values: the TCP port and the color
//! palette logins draw from. Port resolution order is the first positional
//! command-line argument, then the `XFPAD_PORT` environment variable, then
//! the default. A value that does not parse is logged and skipped rather
//! than aborting startup.

use crate::shared::color::{Rgb, PALETTE};

/// Port used when neither the command line nor the environment names one.
pub const DEFAULT_PORT: u16 = 4444;

/// Environment variable consulted when no argument is given.
pub const PORT_ENV_VAR: &str = "XFPAD_PORT";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port the listener binds on.
    pub port: u16,
    /// Palette user colors are assigned from, in login order.
    pub palette: Vec<Rgb>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            palette: PALETTE.to_vec(),
        }
    }
}

impl ServerConfig {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// Resolve configuration from command-line arguments (the binary name
    /// already stripped), falling back to the environment.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(raw) = args.into_iter().next() {
            match raw.parse::<u16>() {
                Ok(port) => return Self::new(port),
                Err(_) => {
                    tracing::warn!("ignoring invalid port argument '{}'", raw);
                }
            }
        }
        Self::from_env()
    }

    /// Resolve configuration from the environment alone.
    pub fn from_env() -> Self {
        match std::env::var(PORT_ENV_VAR) {
            Ok(raw) => match raw.parse::<u16>() {
                Ok(port) => Self::new(port),
                Err(_) => {
                    tracing::warn!("ignoring invalid {} value '{}'", PORT_ENV_VAR, raw);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
