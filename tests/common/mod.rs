//! Common test utilities
//!
//! Provides a synthetic Platinum controller over raw TCP that simulates the
//! device's banner/command/dump exchange for testing without hardware.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Banner line the real gateway sends on connect
pub const BANNER: &str = "Hunter Douglas PowerView Hub";

#[derive(Clone)]
enum Behavior {
    /// Answer `$dat` with these lines, then close the connection
    Respond(Vec<String>),
    /// Accept the command, then send nothing until well past any client
    /// read deadline
    Stall,
}

/// Mock Platinum controller for testing
pub struct MockControllerServer {
    address: String,
    commands: Arc<Mutex<Vec<String>>>,
}

impl MockControllerServer {
    /// Start a mock controller answering `$dat` with the given raw lines
    pub fn start(data_lines: &[&str]) -> Self {
        Self::with_behavior(Behavior::Respond(
            data_lines.iter().map(|line| line.to_string()).collect(),
        ))
    }

    /// Start a mock controller that accepts commands but never responds
    pub fn start_stalled() -> Self {
        Self::with_behavior(Behavior::Stall)
    }

    fn with_behavior(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock controller");
        let address = listener.local_addr().expect("local addr").to_string();
        let commands: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let thread_commands = Arc::clone(&commands);
        thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => handle_connection(stream, &behavior, &thread_commands),
                    Err(_) => break,
                }
            }
        });

        Self { address, commands }
    }

    /// `host:port` the mock controller listens on
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Everything clients have written so far, one entry per connection
    pub fn received_commands(&self) -> Vec<String> {
        self.commands.lock().expect("mock lock poisoned").clone()
    }

    /// Wait until `count` connections have completed their exchange
    pub fn wait_for_commands(&self, count: usize) -> Vec<String> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let commands = self.received_commands();
            if commands.len() >= count {
                return commands;
            }
            assert!(
                Instant::now() < deadline,
                "Mock controller saw {} commands, expected {count}",
                commands.len()
            );
            thread::sleep(Duration::from_millis(10));
        }
    }
}

fn handle_connection(
    mut stream: TcpStream,
    behavior: &Behavior,
    commands: &Arc<Mutex<Vec<String>>>,
) {
    if stream.write_all(format!("{BANNER}\r\n").as_bytes()).is_err() {
        return;
    }
    let _ = stream.flush();

    // Commands arrive without a line terminator; every command token is 4
    // bytes on this protocol
    let mut token = [0u8; 4];
    if stream.read_exact(&mut token).is_err() {
        return;
    }
    let token = String::from_utf8_lossy(&token).to_string();

    match behavior {
        Behavior::Stall => {
            thread::sleep(Duration::from_secs(2));
        }
        Behavior::Respond(data_lines) if token == "$dat" => {
            commands.lock().expect("mock lock poisoned").push(token);
            for line in data_lines {
                if stream.write_all(format!("{line}\r\n").as_bytes()).is_err() {
                    return;
                }
            }
            let _ = stream.flush();
            // Closing here also covers the truncated-dump case: a client
            // still waiting for the sentinel sees EOF
        }
        Behavior::Respond(_) => {
            // Command connection: capture the full byte stream until the
            // client hangs up
            let mut rest = Vec::new();
            let _ = stream.read_to_end(&mut rest);
            let mut full = token;
            full.push_str(&String::from_utf8_lossy(&rest));
            commands.lock().expect("mock lock poisoned").push(full);
        }
    }
}

/// A `host:port` with nothing listening on it
pub fn unused_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let address = listener.local_addr().expect("local addr").to_string();
    drop(listener);
    address
}
