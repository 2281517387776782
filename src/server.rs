//! TCP transport and server bookkeeping.

use std::collections::HashSet;
use std::io;
use std::net::SocketAddr;
use std::sync::Mutex;

use tokio::net::TcpListener;
use tower_lsp::Server;

use crate::create_service;
use crate::error::ServerError;

type Address = (String, u16);

/// Addresses with a running server, owned by whoever starts servers.
#[derive(Debug, Default)]
pub struct ServerRegistry {
    bound: Mutex<HashSet<Address>>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `(host, port)`. The claim lasts as long as the returned guard.
    pub fn register(&self, host: &str, port: u16) -> Result<Registration<'_>, ServerError> {
        let address = (host.to_string(), port);
        let mut bound = self.bound.lock().unwrap_or_else(|e| e.into_inner());
        if !bound.insert(address.clone()) {
            return Err(ServerError::AlreadyRegistered {
                host: host.to_string(),
                port,
            });
        }
        Ok(Registration {
            registry: self,
            address,
        })
    }

    pub fn is_registered(&self, host: &str, port: u16) -> bool {
        let bound = self.bound.lock().unwrap_or_else(|e| e.into_inner());
        bound.contains(&(host.to_string(), port))
    }

    fn release(&self, address: &Address) {
        let mut bound = self.bound.lock().unwrap_or_else(|e| e.into_inner());
        bound.remove(address);
    }
}

/// Claim on an address in a [`ServerRegistry`], released on drop.
#[derive(Debug)]
pub struct Registration<'r> {
    registry: &'r ServerRegistry,
    address: Address,
}

impl Registration<'_> {
    pub fn host(&self) -> &str {
        &self.address.0
    }

    pub fn port(&self) -> u16 {
        self.address.1
    }
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.registry.release(&self.address);
    }
}

/// A bound listener serving one language server per connection.
#[derive(Debug)]
pub struct TcpServer<'r> {
    listener: TcpListener,
    registration: Registration<'r>,
}

/// Register `(host, port)` in `registry` and bind a listener to it.
pub async fn bind_tcp<'r>(
    registry: &'r ServerRegistry,
    host: &str,
    port: u16,
) -> Result<TcpServer<'r>, ServerError> {
    let registration = registry.register(host, port)?;
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|source| match source.kind() {
            io::ErrorKind::AddrInUse => ServerError::AddressInUse {
                host: host.to_string(),
                port,
            },
            _ => ServerError::Bind {
                host: host.to_string(),
                port,
                source,
            },
        })?;

    Ok(TcpServer {
        listener,
        registration,
    })
}

impl TcpServer<'_> {
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until accepting fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        tracing::info!(
            host = self.registration.host(),
            port = self.registration.port(),
            "autodocstring listening"
        );

        loop {
            let (stream, peer) = self.listener.accept().await.map_err(ServerError::Accept)?;
            tracing::info!(%peer, "client connected");

            tokio::spawn(async move {
                let (read, write) = tokio::io::split(stream);
                let (service, socket) = create_service();
                Server::new(read, write, socket).serve(service).await;
                tracing::info!(%peer, "client disconnected");
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_rejected() {
        let registry = ServerRegistry::new();
        let first = registry.register("localhost", 5000).unwrap();
        assert!(registry.is_registered("localhost", 5000));

        let err = registry.register("localhost", 5000).unwrap_err();
        assert!(matches!(err, ServerError::AlreadyRegistered { port: 5000, .. }));

        // Other addresses are independent.
        let _other = registry.register("localhost", 5001).unwrap();
        let _host = registry.register("127.0.0.1", 5000).unwrap();

        drop(first);
        assert!(!registry.is_registered("localhost", 5000));
        registry.register("localhost", 5000).unwrap();
    }

    #[test]
    fn registries_are_independent() {
        let a = ServerRegistry::new();
        let b = ServerRegistry::new();
        let _claim = a.register("localhost", 5000).unwrap();
        assert!(b.register("localhost", 5000).is_ok());
    }

    #[tokio::test]
    async fn bind_reports_address_in_use() {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = occupied.local_addr().unwrap().port();

        let registry = ServerRegistry::new();
        let err = bind_tcp(&registry, "127.0.0.1", port).await.unwrap_err();
        assert!(matches!(err, ServerError::AddressInUse { .. }));
        assert!(!registry.is_registered("127.0.0.1", port));
    }

    #[tokio::test]
    async fn bind_registers_the_address() {
        let registry = ServerRegistry::new();
        let server = bind_tcp(&registry, "127.0.0.1", 0).await.unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
        assert!(registry.is_registered("127.0.0.1", 0));

        let err = bind_tcp(&registry, "127.0.0.1", 0).await.unwrap_err();
        assert!(matches!(err, ServerError::AlreadyRegistered { .. }));

        drop(server);
        assert!(!registry.is_registered("127.0.0.1", 0));
    }
}
