use super::bridge::{Dispatch, ShortcutBridge};
use super::intent::ShortcutIntent;
use anyhow::{Context, Result};
use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

const REPLY_TIMEOUT: Duration = Duration::from_secs(2);
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Accepts shortcut lines on a local socket and hands them to the bridge.
/// The accept thread lives until the process exits.
pub struct ShortcutListener {
    local_addr: SocketAddr,
}

impl ShortcutListener {
    pub fn spawn(addr: &str, bridge: &'static ShortcutBridge) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        let local_addr = listener.local_addr()?;

        thread::Builder::new()
            .name("shortcut-listener".to_string())
            .spawn(move || {
                for stream in listener.incoming() {
                    match stream {
                        Ok(stream) => spawn_connection(stream, bridge),
                        Err(e) => tracing::warn!("shortcut accept failed: {}", e),
                    }
                }
            })?;

        tracing::info!(%local_addr, "listening for shortcuts");
        Ok(Self { local_addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

// A slow or idle client only ever holds up its own thread.
fn spawn_connection(stream: TcpStream, bridge: &'static ShortcutBridge) {
    let spawned = thread::Builder::new()
        .name("shortcut-connection".to_string())
        .spawn(move || {
            if let Err(e) = serve(stream, bridge) {
                tracing::warn!("shortcut connection dropped: {}", e);
            }
        });
    if let Err(e) = spawned {
        tracing::warn!("could not serve shortcut connection: {}", e);
    }
}

fn serve(stream: TcpStream, bridge: &ShortcutBridge) -> io::Result<()> {
    stream.set_read_timeout(Some(READ_TIMEOUT))?;
    let reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(writer, "{}", handle_line(&line, bridge))?;
    }
    Ok(())
}

/// Parses and dispatches one line, producing the reply sent back to the
/// client. Parse failures are reported to the client but never reach the UI;
/// a missing handler is not a failure.
pub fn handle_line(line: &str, bridge: &ShortcutBridge) -> String {
    match ShortcutIntent::parse(line).map(|intent| intent.dispatch(bridge)) {
        Ok(Dispatch::Delivered) => "ok".to_string(),
        Ok(Dispatch::NoHandler) => "no-handler".to_string(),
        Err(e) => {
            tracing::warn!(line, "shortcut ignored: {}", e);
            format!("error: {}", e)
        }
    }
}

/// Sends one shortcut line to a running instance and returns its reply.
pub fn send(addr: &str, line: &str) -> Result<String> {
    let mut stream = TcpStream::connect(addr)
        .with_context(|| format!("No running instance is listening on {}", addr))?;
    stream.set_read_timeout(Some(REPLY_TIMEOUT))?;

    writeln!(stream, "{}", line)?;
    stream.shutdown(Shutdown::Write)?;

    let mut reply = String::new();
    BufReader::new(stream)
        .read_line(&mut reply)
        .context("No reply from running instance")?;
    Ok(reply.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::bridge::ShortcutHandler;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Categories(Mutex<Vec<String>>);

    impl ShortcutHandler for Categories {
        fn trigger_open_basket(&self) {}
        fn trigger_filter_by_health_tag(&self, _tags: Vec<Option<String>>) {}
        fn trigger_filter_by_category(&self, category: String) {
            self.0.lock().unwrap().push(category);
        }
    }

    fn leaked_bridge() -> &'static ShortcutBridge {
        Box::leak(Box::new(ShortcutBridge::new()))
    }

    #[test]
    fn test_handle_line_replies() {
        let bridge = ShortcutBridge::new();
        assert_eq!(handle_line("openBasket", &bridge), "no-handler");
        assert_eq!(
            handle_line("dance", &bridge),
            "error: unknown shortcut action 'dance'"
        );

        let handler = Arc::new(Categories::default());
        bridge.register(&handler);
        assert_eq!(handle_line("filterCategory soup", &bridge), "ok");
        assert_eq!(
            handle_line("filterCategory pizza", &bridge),
            "error: unparseable parameter for 'filterCategory': pizza"
        );
        assert_eq!(*handler.0.lock().unwrap(), vec!["soup".to_string()]);
    }

    #[test]
    fn test_send_round_trip_over_socket() {
        let bridge = leaked_bridge();
        let handler = Arc::new(Categories::default());
        bridge.register(&handler);

        let listener = ShortcutListener::spawn("127.0.0.1:0", bridge).unwrap();
        let addr = listener.local_addr().to_string();

        assert_eq!(send(&addr, "filterCategory dessert").unwrap(), "ok");
        assert_eq!(*handler.0.lock().unwrap(), vec!["dessert".to_string()]);

        drop(handler);
        assert_eq!(send(&addr, "filterCategory drink").unwrap(), "no-handler");
    }

    #[test]
    fn test_idle_client_does_not_block_others() {
        let bridge = leaked_bridge();
        let handler = Arc::new(Categories::default());
        bridge.register(&handler);

        let listener = ShortcutListener::spawn("127.0.0.1:0", bridge).unwrap();
        let addr = listener.local_addr().to_string();

        let _idle = TcpStream::connect(&addr).unwrap();
        let mut half_written = TcpStream::connect(&addr).unwrap();
        write!(half_written, "filterCat").unwrap();

        assert_eq!(send(&addr, "openBasket").unwrap(), "ok");
        assert_eq!(send(&addr, "filterCategory soup").unwrap(), "ok");
        assert_eq!(*handler.0.lock().unwrap(), vec!["soup".to_string()]);
    }

    #[test]
    fn test_send_without_listener_fails() {
        // Bind then drop to get a port nobody listens on
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        assert!(send(&format!("127.0.0.1:{}", port), "openBasket").is_err());
    }
}
