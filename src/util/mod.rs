//! Utility functions shared across the application.

mod secret;

pub use secret::SecretString;

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::warn;

/// Consecutive ports tried after the preferred one
const PORT_SEARCH_SPAN: u16 = 10;

/// Find a free address on the preferred address's interface.
///
/// Tries the preferred port and the next few after it before letting the OS
/// pick one.
pub async fn find_available_addr(preferred: SocketAddr) -> std::io::Result<SocketAddr> {
    let start = preferred.port();
    let candidates = (0..=PORT_SEARCH_SPAN).map_while(|offset| start.checked_add(offset));

    for port in candidates {
        let addr = SocketAddr::new(preferred.ip(), port);
        if TcpListener::bind(addr).await.is_ok() {
            if port != start {
                warn!(preferred = start, actual = port, "Preferred port taken");
            }
            return Ok(addr);
        }
    }

    let listener = TcpListener::bind(SocketAddr::new(preferred.ip(), 0)).await?;
    let addr = listener.local_addr()?;
    warn!(preferred = start, actual = addr.port(), "Using OS-assigned port");
    Ok(addr)
}
