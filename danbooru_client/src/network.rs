use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use hyper::client::connect::dns::Name;
use reqwest::dns::{Addrs, Resolve, Resolving};
use reqwest::Client;

use std::fmt::{Debug, Formatter};
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::error::Result;

/// reqwest has no separate TLS handshake timeout, so the handshake budget is added to the
/// connect timeout, which covers TCP connect plus TLS.
pub const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
pub const IDLE_CONNECTION_TIMEOUT: Duration = Duration::from_secs(90);
pub const MAX_IDLE_CONNECTIONS: usize = 100;

/// Build the HTTP client used for every upstream request.
///
/// Name lookups go to `dns_server` over UDP instead of the system resolver. Nothing is
/// dialed here; DNS and connection failures surface on the first request that needs them.
/// Ambient proxy variables (`HTTP_PROXY`, `HTTPS_PROXY`, `NO_PROXY`) are honored, and
/// HTTP/2 is negotiated over ALPN when the upstream offers it.
pub fn build_client(timeout: Duration, dns_server: SocketAddr) -> Result<Client> {
    let resolver = PinnedResolver::new(dns_server, timeout);
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout + TLS_HANDSHAKE_TIMEOUT)
        .tcp_keepalive(timeout)
        .pool_idle_timeout(IDLE_CONNECTION_TIMEOUT)
        .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS)
        .dns_resolver(Arc::new(resolver))
        .build()?;
    Ok(client)
}

/// A resolver that sends every lookup to one fixed nameserver.
#[derive(Clone)]
pub struct PinnedResolver {
    server: SocketAddr,
    timeout: Duration,
    // Created on first lookup, inside the runtime that drives the client.
    resolver: Arc<OnceLock<TokioAsyncResolver>>,
}

impl PinnedResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        PinnedResolver {
            server,
            timeout,
            resolver: Arc::new(OnceLock::new()),
        }
    }

    fn config(&self) -> (ResolverConfig, ResolverOpts) {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(self.server, Protocol::Udp));

        let mut opts = ResolverOpts::default();
        opts.timeout = self.timeout;
        (config, opts)
    }

    fn resolver(&self) -> &TokioAsyncResolver {
        self.resolver.get_or_init(|| {
            let (config, opts) = self.config();
            TokioAsyncResolver::tokio(config, opts)
        })
    }
}

impl Debug for PinnedResolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinnedResolver")
            .field("server", &self.server)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Resolve for PinnedResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let this = self.clone();
        Box::pin(async move {
            let lookup = this.resolver().lookup_ip(name.as_str()).await?;
            tracing::trace!("Resolved {} via {}", name.as_str(), this.server);
            let addrs: Addrs = Box::new(lookup.into_iter().map(|ip| SocketAddr::new(ip, 0)));
            Ok(addrs)
        })
    }
}
