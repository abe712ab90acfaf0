use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use native_tls::{HandshakeError, TlsConnector, TlsStream};
use tracing::trace;

use super::error::SmtpError;

/// A parsed SMTP reply: the status code and the text of each reply line.
#[derive(Debug, Clone)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }

    pub fn has_capability(&self, cap: &str) -> bool {
        self.lines.iter().any(|line| {
            line.split_whitespace()
                .next()
                .map(|token| token.eq_ignore_ascii_case(cap))
                .unwrap_or(false)
        })
    }
}

#[derive(Debug)]
enum StreamState {
    Plain(TcpStream),
    Tls(TlsStream<TcpStream>),
    Invalid,
}

#[derive(Debug)]
struct SmtpStream {
    state: StreamState,
    buffer: Vec<u8>,
}

impl SmtpStream {
    fn connect(addr: &SocketAddr, timeout: Duration) -> Result<Self, SmtpError> {
        let stream =
            TcpStream::connect_timeout(addr, timeout).map_err(|err| SmtpError::Connect {
                host: addr.to_string(),
                source: err,
            })?;
        stream
            .set_read_timeout(Some(timeout))
            .map_err(|err| SmtpError::Io { source: err })?;
        stream
            .set_write_timeout(Some(timeout))
            .map_err(|err| SmtpError::Io { source: err })?;
        Ok(Self {
            state: StreamState::Plain(stream),
            buffer: Vec::new(),
        })
    }

    fn upgrade_tls(
        &mut self,
        domain: &str,
        connector: &TlsConnector,
        timeout: Duration,
    ) -> Result<(), SmtpError> {
        let mut state = StreamState::Invalid;
        std::mem::swap(&mut self.state, &mut state);
        let plain = match state {
            StreamState::Plain(stream) => stream,
            StreamState::Tls(stream) => {
                self.state = StreamState::Tls(stream);
                return Ok(());
            }
            StreamState::Invalid => {
                return Err(SmtpError::Protocol("invalid stream state".into()));
            }
        };

        let mut tls = complete_handshake(connector, domain, plain)?;
        tls.get_mut()
            .set_read_timeout(Some(timeout))
            .map_err(|err| SmtpError::Io { source: err })?;
        tls.get_mut()
            .set_write_timeout(Some(timeout))
            .map_err(|err| SmtpError::Io { source: err })?;
        self.state = StreamState::Tls(tls);
        Ok(())
    }

    fn send_command(&mut self, command: &str) -> Result<(), SmtpError> {
        let mut data = command.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        match &mut self.state {
            StreamState::Plain(stream) => write_all(stream, &data),
            StreamState::Tls(stream) => write_all(stream, &data),
            StreamState::Invalid => Err(SmtpError::Protocol("invalid stream state".into())),
        }
    }

    fn read_reply(&mut self) -> Result<SmtpReply, SmtpError> {
        let mut lines = Vec::new();
        let mut code: Option<u16> = None;
        loop {
            let line = self.read_line()?;
            if line.len() < 3 {
                return Err(SmtpError::Protocol(format!("invalid reply: {line}")));
            }
            let parsed_code = line[..3]
                .parse::<u16>()
                .map_err(|_| SmtpError::Protocol(format!("invalid code in line: {line}")))?;
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(SmtpError::Protocol(format!(
                        "inconsistent reply codes: {existing} vs {parsed_code}"
                    )));
                }
            } else {
                code = Some(parsed_code);
            }
            let is_last = !line.as_bytes().get(3).map(|b| *b == b'-').unwrap_or(false);
            let text = if line.len() > 4 {
                line[4..].to_string()
            } else {
                String::new()
            };
            lines.push(text);
            if is_last {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or(0),
            lines,
        })
    }

    fn read_line(&mut self) -> Result<String, SmtpError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|byte| *byte == b'\n') {
                let mut line = self.buffer.drain(..=pos).collect::<Vec<_>>();
                if line.ends_with(b"\r\n") {
                    line.truncate(line.len() - 2);
                } else if line.ends_with(b"\n") {
                    line.truncate(line.len() - 1);
                }
                return String::from_utf8(line)
                    .map_err(|err| SmtpError::Protocol(format!("utf8 error: {err}")));
            }

            let mut buf = [0u8; 512];
            let read = match &mut self.state {
                StreamState::Plain(stream) => stream.read(&mut buf),
                StreamState::Tls(stream) => stream.read(&mut buf),
                StreamState::Invalid => {
                    return Err(SmtpError::Protocol("invalid stream state".into()));
                }
            };
            let read = read.map_err(|err| SmtpError::Io { source: err })?;
            if read == 0 {
                return Err(SmtpError::Io {
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed"),
                });
            }
            self.buffer.extend_from_slice(&buf[..read]);
        }
    }
}

fn write_all<S: Write>(stream: &mut S, data: &[u8]) -> Result<(), SmtpError> {
    stream
        .write_all(data)
        .and_then(|()| stream.flush())
        .map_err(|err| SmtpError::Io { source: err })
}

fn complete_handshake(
    connector: &TlsConnector,
    domain: &str,
    stream: TcpStream,
) -> Result<TlsStream<TcpStream>, SmtpError> {
    match connector.connect(domain, stream) {
        Ok(tls) => Ok(tls),
        Err(HandshakeError::Failure(err)) => Err(SmtpError::Tls { source: err }),
        Err(HandshakeError::WouldBlock(mut mid)) => loop {
            match mid.handshake() {
                Ok(tls) => break Ok(tls),
                Err(HandshakeError::Failure(err)) => {
                    break Err(SmtpError::Tls { source: err });
                }
                Err(HandshakeError::WouldBlock(next)) => mid = next,
            }
        },
    }
}

/// One short-lived SMTP conversation with a single exchange host.
pub struct SmtpSession {
    host: String,
    stream: SmtpStream,
}

impl SmtpSession {
    /// Connects to `host:port`, trying each resolved socket address with the
    /// given per-attempt timeout.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, SmtpError> {
        let addrs: Vec<SocketAddr> = format!("{host}:{port}")
            .to_socket_addrs()
            .map_err(|err| SmtpError::Connect {
                host: host.to_string(),
                source: err,
            })?
            .collect();
        let mut last_err = None;
        for addr in &addrs {
            match SmtpStream::connect(addr, timeout) {
                Ok(stream) => {
                    return Ok(Self {
                        host: host.to_string(),
                        stream,
                    });
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| SmtpError::Connect {
            host: host.to_string(),
            source: io::Error::new(io::ErrorKind::AddrNotAvailable, "no socket address resolved"),
        }))
    }

    pub fn read_banner(&mut self) -> Result<SmtpReply, SmtpError> {
        let reply = self.stream.read_reply()?;
        trace!(host = %self.host, code = reply.code, "S: banner");
        Ok(reply)
    }

    pub fn send_command(&mut self, command: &str) -> Result<SmtpReply, SmtpError> {
        trace!(host = %self.host, command, "C");
        self.stream.send_command(command)?;
        let reply = self.stream.read_reply()?;
        trace!(host = %self.host, code = reply.code, "S");
        Ok(reply)
    }

    /// Issues `STARTTLS` and upgrades the stream when the server accepts.
    pub fn starttls(
        &mut self,
        domain: &str,
        connector: &TlsConnector,
        timeout: Duration,
    ) -> Result<SmtpReply, SmtpError> {
        let reply = self.send_command("STARTTLS")?;
        if !reply.is_positive_completion() {
            return Ok(reply);
        }
        self.stream.upgrade_tls(domain, connector, timeout)?;
        Ok(reply)
    }

    /// Best-effort `QUIT`; the reply is read but never required.
    pub fn quit(&mut self) -> Result<(), SmtpError> {
        trace!(host = %self.host, "C: QUIT");
        self.stream.send_command("QUIT")?;
        self.stream.read_reply().ok();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(code: u16, lines: &[&str]) -> SmtpReply {
        SmtpReply {
            code,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn positive_completion_covers_2xx() {
        assert!(reply(250, &["Ok"]).is_positive_completion());
        assert!(!reply(354, &[]).is_positive_completion());
        assert!(!reply(550, &["No such user"]).is_positive_completion());
    }

    #[test]
    fn capability_match_is_case_insensitive() {
        let ehlo = reply(250, &["mx.example.com", "starttls", "SIZE 35882577"]);
        assert!(ehlo.has_capability("STARTTLS"));
        assert!(ehlo.has_capability("size"));
        assert!(!ehlo.has_capability("PIPELINING"));
    }
}
