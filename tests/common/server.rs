//! Test server management.
//!
//! Spawns and manages lineircd instances for integration testing.

use std::net::TcpListener;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// Server name written into every test config.
pub const SERVER_NAME: &str = "test.server";

/// Banner line written into every test config.
pub const BANNER: &str = "Test banner";

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Holds the config file for as long as the server runs.
    _data_dir: TempDir,
}

impl TestServer {
    /// Spawn a server with the default test configuration.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with_limits(0).await
    }

    /// Spawn a server with an inbound line cap (0 = unbounded).
    pub async fn spawn_with_limits(max_line_bytes: usize) -> anyhow::Result<Self> {
        let port = free_port()?;
        let data_dir = tempfile::tempdir()?;
        let config_path = data_dir.path().join("config.toml");
        let config_content = format!(
            r#"
[server]
name = "{SERVER_NAME}"
welcome = ["{BANNER}"]

[listen]
address = "127.0.0.1:{port}"

[limits]
max_line_bytes = {max_line_bytes}
"#
        );
        std::fs::write(&config_path, config_content)?;

        let child = spawn_binary(&config_path)?;
        let server = Self {
            child,
            port,
            _data_dir: data_dir,
        };

        // Wait for server to start listening
        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Connect a client, consume the banner and claim `nick`.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        let mut client = super::client::TestClient::connect(&self.address()).await?;
        client.expect_banner().await?;
        client.set_nick(nick).await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Kill the server process
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn spawn_binary(config_path: &Path) -> anyhow::Result<Child> {
    let child = Command::new(env!("CARGO_BIN_EXE_lineircd"))
        .arg(config_path)
        .env("RUST_LOG", "warn")
        .stdout(Stdio::null())
        .spawn()?;
    Ok(child)
}

/// Ask the OS for a port nobody is listening on.
fn free_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
