use eyre::{eyre, Result, WrapErr};
use log::{error, info};
use serde::Serialize;
use std::{
    io::{prelude::*, BufReader},
    net::{TcpListener, TcpStream},
};

use crate::configure::Config;
use crate::pool::ThreadPool;

const WORKERS: usize = 4;

#[derive(Serialize)]
struct Greeting {
    msg: String,
}

/// First path segment of the request target, empty for `/` or a target
/// with no slash at all.
fn greeting_for(target: &str) -> Greeting {
    let segment = target.split('/').nth(1).unwrap_or("");
    Greeting {
        msg: format!("Hello World {segment}"),
    }
}

fn handle_connection(mut stream: TcpStream) -> Result<()> {
    let mut headers = [httparse::EMPTY_HEADER; 64];
    let mut req = httparse::Request::new(&mut headers);
    let mut buf = BufReader::new(&mut stream);
    buf.fill_buf().wrap_err("read request")?;
    if req.parse(buf.buffer()).wrap_err("parse request head")?.is_partial() {
        return Err(eyre!("truncated request head"));
    }

    // Method is logged but never dispatched on; every method gets the greeting.
    let method = req.method.unwrap_or("-");
    let target = req.path.unwrap_or("/");
    info!("[ request ] {method} {target}");

    let body = serde_json::to_string(&greeting_for(target))?;
    let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len(),
    );
    stream.write_all(response.as_bytes()).wrap_err("write response")?;
    info!("[ response ] 200 {body}");

    Ok(())
}

pub fn run(config: Config) -> Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .wrap_err_with(|| format!("bind {}:{}", config.host, config.port))?;
    info!("[ ready ] on http://{}:{}", config.host, config.port);

    let pool = ThreadPool::new(WORKERS);
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => pool.execute(move || {
                if let Err(err) = handle_connection(stream) {
                    error!("[ request ] failed: {err:#}");
                }
            }),
            Err(err) => error!("[ accept ] {err}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{greeting_for, handle_connection};
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    fn roundtrip(request: &[u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handler = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            handle_connection(stream).unwrap();
        });

        let mut conn = TcpStream::connect(addr).unwrap();
        conn.write_all(request).unwrap();
        let mut response = String::new();
        conn.read_to_string(&mut response).unwrap();
        handler.join().unwrap();
        response
    }

    fn body_of(response: &str) -> &str {
        response.split("\r\n\r\n").nth(1).unwrap()
    }

    #[test]
    fn get_with_segment_returns_greeting() {
        let response = roundtrip(b"GET /abc123 HTTP/1.1\r\nhost: localhost\r\n\r\n");
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert_eq!(body_of(&response), r#"{"msg":"Hello World abc123"}"#);
    }

    #[test]
    fn root_path_greets_the_empty_segment() {
        let response = roundtrip(b"GET / HTTP/1.1\r\nhost: localhost\r\n\r\n");
        assert_eq!(body_of(&response), r#"{"msg":"Hello World "}"#);
    }

    #[test]
    fn only_the_first_segment_is_echoed() {
        let response = roundtrip(b"GET /abc/def HTTP/1.1\r\nhost: localhost\r\n\r\n");
        assert_eq!(body_of(&response), r#"{"msg":"Hello World abc"}"#);
    }

    #[test]
    fn method_does_not_change_the_answer() {
        let response = roundtrip(b"POST /abc123 HTTP/1.1\r\nhost: localhost\r\n\r\n");
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert_eq!(body_of(&response), r#"{"msg":"Hello World abc123"}"#);
    }

    #[test]
    fn slashless_target_greets_the_empty_segment() {
        assert_eq!(greeting_for("").msg, "Hello World ");
        assert_eq!(greeting_for("abc").msg, "Hello World ");
    }
}
