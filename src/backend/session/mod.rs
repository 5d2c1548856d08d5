//! Session Registry
//!
//! Process-wide session state: which user names are online, which color
//! each user was assigned, which connection a user is bound to, and the
//! outbound writer handle of every live connection. The whole registry is
//! mutated under the single server-state lock, so its invariants hold
//! without interior locking:
//!
//! - a user name appears at most once in the online set;
//! - every online user is bound to exactly one connection;
//! - writer iteration order is registration order, which fixes the
//!   broadcast order every client observes.
//!
//! Color mappings survive LOGOUT so a returning user keeps their color; a
//! connection loss force-logs the user out and forgets the color.

use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc;

use crate::shared::color::{Rgb, PALETTE};

/// Outbound handle of one connection; the connection's writer task drains
/// the other end onto the socket.
pub type ResponseTx = mpsc::UnboundedSender<String>;

#[derive(Debug)]
struct Writer {
    conn_id: u64,
    tx: ResponseTx,
}

/// Online users, color and connection bindings, and connection writers.
#[derive(Debug)]
pub struct Registry {
    online_users: HashSet<String>,
    user_colors: HashMap<String, Rgb>,
    socket_users: HashMap<u64, String>,
    writers: Vec<Writer>,
    palette: Vec<Rgb>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_palette(PALETTE.to_vec())
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry assigning colors from the given palette.
    pub fn with_palette(palette: Vec<Rgb>) -> Self {
        Self {
            online_users: HashSet::new(),
            user_colors: HashMap::new(),
            socket_users: HashMap::new(),
            writers: Vec::new(),
            palette,
        }
    }

    /// Register a connection's outbound handle. Called once per accepted
    /// connection, before any broadcast can target it.
    pub fn register_writer(&mut self, conn_id: u64, tx: ResponseTx) {
        self.writers.push(Writer { conn_id, tx });
    }

    /// Send one line to a single connection. Used for the `id` handshake,
    /// which must not reach anyone else.
    pub fn send_to(&self, conn_id: u64, line: &str) {
        if let Some(writer) = self.writers.iter().find(|w| w.conn_id == conn_id) {
            let _ = writer.tx.send(line.to_string());
        }
    }

    /// Deliver a response line to every registered writer, in registration
    /// order. Returns how many writers were targeted.
    pub fn broadcast(&self, line: &str) -> usize {
        for writer in &self.writers {
            // a send error means the connection is mid-teardown; the
            // disconnect path removes the writer
            let _ = writer.tx.send(line.to_string());
        }
        self.writers.len()
    }

    /// Log a user in on `conn_id`.
    ///
    /// Fails (returns `false`) when the name is already online. On success
    /// the user gets a palette color if they never had one; the palette
    /// index is the online-user count after this login is recorded, so the
    /// first login of a fresh server lands on the second palette entry.
    pub fn login(&mut self, name: &str, conn_id: u64) -> bool {
        if self.online_users.contains(name) {
            return false;
        }
        self.online_users.insert(name.to_string());
        if !self.palette.is_empty() && !self.user_colors.contains_key(name) {
            let assigned = self.palette[self.online_users.len() % self.palette.len()];
            self.user_colors.insert(name.to_string(), assigned);
        }
        self.socket_users.insert(conn_id, name.to_string());
        true
    }

    /// Log a user out. The color mapping is retained on purpose: the same
    /// name logging back in gets the same color.
    pub fn logout(&mut self, name: &str, conn_id: u64) {
        self.online_users.remove(name);
        self.socket_users.remove(&conn_id);
    }

    /// Tear down a lost connection: force-logout of the bound user (if
    /// any), forgetting their color, and removal of the writer.
    ///
    /// Returns the name of the user that was bound, if there was one.
    pub fn disconnect(&mut self, conn_id: u64) -> Option<String> {
        let user = self.socket_users.remove(&conn_id);
        if let Some(name) = &user {
            self.online_users.remove(name);
            self.user_colors.remove(name);
        }
        self.writers.retain(|writer| writer.conn_id != conn_id);
        user
    }

    pub fn is_online(&self, name: &str) -> bool {
        self.online_users.contains(name)
    }

    pub fn online_count(&self) -> usize {
        self.online_users.len()
    }

    /// How many connections a user name is bound to; the registry keeps
    /// this equal to the online-user count in aggregate.
    pub fn bound_connections(&self) -> usize {
        self.socket_users.len()
    }

    pub fn color_of(&self, name: &str) -> Option<Rgb> {
        self.user_colors.get(name).copied()
    }

    /// Colors for a list of names, in the same order. Names without a
    /// mapping yield `None` (e.g. a collaborator who lost their connection).
    pub fn colors_for<S: AsRef<str>>(&self, names: &[S]) -> Vec<Option<Rgb>> {
        names
            .iter()
            .map(|name| self.color_of(name.as_ref()))
            .collect()
    }
}
