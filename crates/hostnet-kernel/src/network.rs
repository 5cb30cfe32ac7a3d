//! The network: registry of hosts and the command dispatch entry point.
//!
//! Each host sits behind its own mutex. A dispatch step holds exactly one
//! host lock; when a session is relayed the local lock is released before
//! the remote host is locked, so hosts that relay to each other never wait
//! on one another.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use hostnet_types::{ExecResult, NodeDescription};
use tokio::sync::{Mutex, RwLock};

use crate::address::{AddressGenerator, RandomIpv4};
use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::host::{Host, PromptPart, Step};
use crate::session::{RelayLink, SessionId};
use crate::tools::CommandTable;
use crate::vfs::build_tree;

type SharedHost = Arc<Mutex<Host>>;

/// Result of dispatching to one session, plus whether that session closed.
struct Outcome {
    result: ExecResult,
    closed: bool,
}

impl Outcome {
    fn kept(result: ExecResult) -> Self {
        Self { result, closed: false }
    }

    fn closed(result: ExecResult) -> Self {
        Self { result, closed: true }
    }
}

type Dispatch<'a> = Pin<Box<dyn Future<Output = Outcome> + Send + 'a>>;

/// A set of hosts addressable by their network address.
pub struct Network {
    hosts: RwLock<HashMap<String, SharedHost>>,
    addresses: Mutex<Box<dyn AddressGenerator>>,
    commands: CommandTable,
    config: NetworkConfig,
    template: Vec<NodeDescription>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Create an empty network with default configuration.
    pub fn new() -> Self {
        Self::with_config(NetworkConfig::default())
    }

    /// Create an empty network. The root template is not read; see [`Network::from_config`].
    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            hosts: RwLock::new(HashMap::new()),
            addresses: Mutex::new(Box::new(RandomIpv4)),
            commands: CommandTable::with_builtins(),
            config,
            template: Vec::new(),
        }
    }

    /// Create a network, loading the root template named by `config`.
    pub fn from_config(config: NetworkConfig) -> anyhow::Result<Self> {
        let template = config.load_root_template()?;
        Ok(Self::with_config(config).with_template(template))
    }

    /// Seed every host created by [`Network::add_host`] with `template`.
    pub fn with_template(mut self, template: Vec<NodeDescription>) -> Self {
        self.template = template;
        self
    }

    pub fn with_address_generator(mut self, generator: impl AddressGenerator + 'static) -> Self {
        self.addresses = Mutex::new(Box::new(generator));
        self
    }

    /// Replace the command table.
    pub fn with_commands(mut self, commands: CommandTable) -> Self {
        self.commands = commands;
        self
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    // ═══════════════════════════════════════════════════════════════════
    // Host administration
    // ═══════════════════════════════════════════════════════════════════

    /// Create a host seeded with the network's root template.
    pub async fn add_host(&self, username: &str, password: &str) -> Result<String> {
        let template = self.template.clone();
        self.add_host_with_tree(username, password, &template).await
    }

    /// Create a host whose tree is built from `description`.
    pub async fn add_host_with_tree(
        &self,
        username: &str,
        password: &str,
        description: &[NodeDescription],
    ) -> Result<String> {
        let tree = build_tree(description)?;
        let mut hosts = self.hosts.write().await;

        let attempts = self.config.address_attempts;
        let address = {
            let mut generator = self.addresses.lock().await;
            (0..attempts)
                .map(|_| generator.next_address())
                .find(|candidate| !hosts.contains_key(candidate))
                .ok_or(Error::AddressExhausted(attempts))?
        };

        let host = Host::new(address.clone(), username, password, tree)?;
        hosts.insert(address.clone(), Arc::new(Mutex::new(host)));
        tracing::info!(host = %address, username, "added host");
        Ok(address)
    }

    /// Remove a host, its sessions, and the guest sessions it opened elsewhere.
    pub async fn remove_host(&self, address: &str) -> Result<()> {
        let removed = self
            .hosts
            .write()
            .await
            .remove(address)
            .ok_or_else(|| Error::HostNotFound(address.to_string()))?;
        drop(removed);

        let others: Vec<SharedHost> = self.hosts.read().await.values().cloned().collect();
        for host in others {
            let mut host = host.lock().await;
            let closed = host.close_sessions_opened_by(address);
            let cleared = host.clear_relays_to(address);
            if closed + cleared > 0 {
                tracing::debug!(host = %host.address(), closed, cleared, "dropped links to removed host");
            }
        }
        tracing::info!(host = %address, "removed host");
        Ok(())
    }

    /// Addresses of all hosts, sorted.
    pub async fn addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.hosts.read().await.keys().cloned().collect();
        addresses.sort();
        addresses
    }

    pub async fn contains(&self, address: &str) -> bool {
        self.hosts.read().await.contains_key(address)
    }

    /// Run `f` with exclusive access to one host.
    pub async fn with_host<R>(&self, address: &str, f: impl FnOnce(&mut Host) -> R) -> Result<R> {
        let host = self
            .host(address)
            .await
            .ok_or_else(|| Error::HostNotFound(address.to_string()))?;
        let mut guard = host.lock().await;
        Ok(f(&mut guard))
    }

    /// Reinstall a host's integrity marker.
    pub async fn repair(&self, address: &str) -> Result<()> {
        self.with_host(address, Host::repair).await?
    }

    async fn host(&self, address: &str) -> Option<SharedHost> {
        self.hosts.read().await.get(address).cloned()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Dispatch
    // ═══════════════════════════════════════════════════════════════════

    /// Run a command line on a host's main session.
    ///
    /// Never fails: every error, including an unknown host, comes back as a
    /// result with a non-zero code.
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(host = %address, command = line.split_whitespace().next().unwrap_or(""))
    )]
    pub async fn dispatch(&self, address: &str, line: &str) -> ExecResult {
        let Some(host) = self.host(address).await else {
            return Error::HostNotFound(address.to_string()).into();
        };
        self.dispatch_session(host, SessionId::MAIN, line, 0).await.result
    }

    fn dispatch_session<'a>(&'a self, host: SharedHost, session: SessionId, line: &'a str, depth: usize) -> Dispatch<'a> {
        Box::pin(async move {
            let step = host.lock().await.step(session, line, &self.commands);
            match step {
                Step::Done(result) => Outcome::kept(result),
                Step::Closed(result) => Outcome::closed(result),
                Step::Forward(link) => {
                    if depth >= self.config.max_relay_depth {
                        return Outcome::kept(Error::RelayTooDeep(self.config.max_relay_depth).into());
                    }
                    let Some(remote) = self.host(&link.address).await else {
                        host.lock().await.clear_relay(session);
                        return Outcome::kept(Error::HostNotFound(link.address).into());
                    };
                    let outcome = self.dispatch_session(remote, link.session, line, depth + 1).await;
                    if outcome.closed {
                        tracing::info!(remote = %link.address, "remote closed the session, disconnecting");
                        host.lock().await.clear_relay(session);
                    }
                    Outcome::kept(outcome.result)
                }
                Step::Connect { from, to } => Outcome::kept(self.connect(&host, session, &from, &to).await),
                Step::Disconnect(link) => Outcome::kept(self.disconnect(&link).await),
            }
        })
    }

    async fn connect(&self, host: &SharedHost, session: SessionId, from: &str, to: &str) -> ExecResult {
        let Some(remote) = self.host(to).await else {
            return ExecResult::failure(1, format!("connect: {}", Error::HostNotFound(to.to_string())));
        };
        let guest = remote.lock().await.open_session(from);
        let link = RelayLink {
            address: to.to_string(),
            session: guest,
        };
        // The local lock was released between step() and here, so another
        // connect may have landed first. Whichever link loses gets closed.
        let replaced = host.lock().await.set_relay(session, link.clone());
        match replaced {
            Ok(None) => {}
            Ok(Some(stale)) => {
                tracing::debug!(remote = %stale.address, session = %stale.session, "replacing relay");
                self.disconnect(&stale).await;
            }
            Err(err) => {
                self.disconnect(&link).await;
                return ExecResult::failure(1, format!("connect: {err}"));
            }
        }
        tracing::info!(from, to, session = %guest, "connected");
        ExecResult::success("")
    }

    async fn disconnect(&self, link: &RelayLink) -> ExecResult {
        if let Some(remote) = self.host(&link.address).await {
            remote.lock().await.close_session(link.session);
        }
        tracing::info!(remote = %link.address, session = %link.session, "disconnected");
        ExecResult::success("")
    }

    /// Render the prompt for a host's main session, following its relay.
    ///
    /// `alice:/home$ ` for a local session, `10.0.0.1(guest):/$ ` when
    /// relayed to another host.
    pub async fn prompt(&self, address: &str) -> Result<String> {
        let mut host = self
            .host(address)
            .await
            .ok_or_else(|| Error::HostNotFound(address.to_string()))?;
        let mut session = SessionId::MAIN;

        for _ in 0..=self.config.max_relay_depth {
            let part = host.lock().await.prompt_part(session);
            match part {
                Some(PromptPart::Rendered(prompt)) => return Ok(prompt),
                Some(PromptPart::Relayed(link)) => {
                    host = self
                        .host(&link.address)
                        .await
                        .ok_or(Error::HostNotFound(link.address))?;
                    session = link.session;
                }
                None => return Err(Error::NotConnected),
            }
        }
        Err(Error::RelayTooDeep(self.config.max_relay_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Sequential;

    fn network() -> Network {
        Network::new().with_address_generator(Sequential::default())
    }

    #[tokio::test]
    async fn test_add_and_remove_hosts() {
        let net = network();
        let a = net.add_host("alice", "password1").await.unwrap();
        let b = net.add_host("bob", "password2").await.unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("10.0.0.1", "10.0.0.2"));
        assert_eq!(net.addresses().await, vec![a.clone(), b.clone()]);

        net.remove_host(&a).await.unwrap();
        assert!(!net.contains(&a).await);
        assert_eq!(net.remove_host(&a).await, Err(Error::HostNotFound(a)));
    }

    #[tokio::test]
    async fn test_bad_credentials_do_not_register() {
        let net = network();
        assert!(matches!(net.add_host("al", "password1").await, Err(Error::InvalidUsername(_))));
        assert!(net.addresses().await.is_empty());
    }

    #[tokio::test]
    async fn test_address_exhaustion() {
        struct Fixed;
        impl AddressGenerator for Fixed {
            fn next_address(&mut self) -> String {
                "10.9.9.9".into()
            }
        }

        let net = Network::with_config(NetworkConfig {
            address_attempts: 5,
            ..Default::default()
        })
        .with_address_generator(Fixed);
        net.add_host("alice", "password1").await.unwrap();
        assert_eq!(net.add_host("bob", "password2").await, Err(Error::AddressExhausted(5)));
    }

    #[tokio::test]
    async fn test_dispatch_to_unknown_host() {
        let net = network();
        let result = net.dispatch("1.2.3.4", "ls").await;
        assert_eq!(result.code, 1);
        assert!(result.err.contains("host not found"));
    }

    #[tokio::test]
    async fn test_template_seeds_new_hosts() {
        let net = network().with_template(vec![NodeDescription::directory(
            "home",
            vec![NodeDescription::text("motd", "welcome")],
        )]);
        let a = net.add_host("alice", "password1").await.unwrap();
        assert_eq!(net.dispatch(&a, "cat /home/motd").await.out, "welcome");
        assert_eq!(net.dispatch(&a, "ls").await.out, "home\nsystem");
    }

    #[tokio::test]
    async fn test_prompt_follows_relay() {
        let net = network();
        let a = net.add_host("alice", "password1").await.unwrap();
        let b = net.add_host("bob", "password2").await.unwrap();
        assert_eq!(net.prompt(&a).await.unwrap(), "alice:/$ ");

        net.dispatch(&a, &format!("connect {b}")).await;
        net.dispatch(&a, "cd system").await;
        assert_eq!(net.prompt(&a).await.unwrap(), format!("{a}(guest):/system$ "));
        assert_eq!(net.prompt(&b).await.unwrap(), "bob:/$ ");
    }

    #[tokio::test]
    async fn test_overlapping_connects_leave_one_guest() {
        let net = network();
        let a = net.add_host("alice", "password1").await.unwrap();
        let b = net.add_host("bob", "password2").await.unwrap();
        let host_a = net.host(&a).await.unwrap();

        // Both connects were accepted by step() before either set a relay.
        assert!(net.connect(&host_a, SessionId::MAIN, &a, &b).await.ok());
        assert!(net.connect(&host_a, SessionId::MAIN, &a, &b).await.ok());

        let guests: Vec<SessionId> = net
            .with_host(&b, |h| h.sessions().map(|s| s.id()).filter(|&id| id != SessionId::MAIN).collect())
            .await
            .unwrap();
        assert_eq!(guests.len(), 1);
        let relay = host_a.lock().await.main_session().unwrap().relay().cloned();
        assert_eq!(relay.map(|l| l.session), Some(guests[0]));

        assert!(net.dispatch(&a, "disconnect").await.ok());
        assert_eq!(net.with_host(&b, |h| h.sessions().count()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_relay_depth_bound() {
        let net = Network::with_config(NetworkConfig {
            max_relay_depth: 0,
            ..Default::default()
        })
        .with_address_generator(Sequential::default());
        let a = net.add_host("alice", "password1").await.unwrap();
        let b = net.add_host("bob", "password2").await.unwrap();
        assert!(net.dispatch(&a, &format!("connect {b}")).await.ok());
        assert!(net.dispatch(&a, "ls").await.err.contains("relay chain"));
        assert!(net.dispatch(&a, "disconnect").await.ok());
    }
}
