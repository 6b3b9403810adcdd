//! UDP transport for single DNS exchanges (RFC 1035 §4.2.1)
//!
//! One socket per exchange: the walk queries a different server at almost
//! every hop, so there is nothing to pool. Messages are sent as-is; the
//! EDNS0 OPT on our queries lets responses up to 4096 bytes through.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracewalk_domain::DomainError;
use tracing::{debug, warn};

const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::Transport {
                server: self.server_addr.to_string(),
                detail: format!("failed to bind UDP socket: {}", e),
            }
        })?;

        tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
            .await
            .map_err(|_| DomainError::QueryTimeout {
                server: self.server_addr.to_string(),
            })?
            .map_err(|e| DomainError::Transport {
                server: self.server_addr.to_string(),
                detail: format!("send failed: {}", e),
            })?;

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| DomainError::QueryTimeout {
                    server: self.server_addr.to_string(),
                })?
                .map_err(|e| DomainError::Transport {
                    server: self.server_addr.to_string(),
                    detail: format!("receive failed: {}", e),
                })?;

        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(recv_buf)
    }
}
