//! # Gateway Wire Format
//!
//! The gateway's socket API frames every message as a 4-byte big-endian length
//! followed by the payload. Payloads are NUL-terminated ASCII fields, except
//! the version range sent during the handshake, which carries no terminator.

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

pub const API_PREFIX: &[u8] = b"API\0";
pub const MIN_CLIENT_VERSION: i32 = 100;
pub const MAX_CLIENT_VERSION: i32 = 176;
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

const START_API: i32 = 71;
const START_API_VERSION: i32 = 2;
const MIN_SERVER_VER_OPTIONAL_CAPABILITIES: i32 = 72;

const ERR_MSG: i32 = 4;
const NEXT_VALID_ID: i32 = 9;

#[derive(Error, Debug)]
pub enum WireError {
    #[error("connection closed by peer")]
    Closed,

    #[error("frame of {0} bytes exceeds the 16 MiB limit")]
    FrameTooLarge(usize),

    #[error("payload is not valid ASCII text")]
    Encoding,

    #[error("malformed {message} message: {reason}")]
    Malformed { message: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Prefixes `payload` with its big-endian length.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::with_capacity(payload.len() + 4);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Joins `fields` with a trailing NUL after each one.
pub fn encode_fields<T: ToString>(fields: &[T]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    for field in fields {
        out.extend_from_slice(field.to_string().as_bytes());
        out.push(0);
    }
    out
}

pub fn split_fields(payload: &[u8]) -> Result<Vec<&str>, WireError> {
    let text: &str = std::str::from_utf8(payload).map_err(|_| WireError::Encoding)?;
    let mut fields: Vec<&str> = text.split('\0').collect();
    if fields.last() == Some(&"") {
        fields.pop();
    }
    Ok(fields)
}

/// Opening bytes of a session: the API prefix and the supported version range.
pub fn handshake() -> Vec<u8> {
    let versions: String = format!("v{MIN_CLIENT_VERSION}..{MAX_CLIENT_VERSION}");
    let mut out: Vec<u8> = API_PREFIX.to_vec();
    out.extend(frame(versions.as_bytes()));
    out
}

/// `START_API` request announcing `client_id`.
pub fn start_api(client_id: i32, server_version: i32) -> Vec<u8> {
    let mut fields: Vec<String> = vec![
        START_API.to_string(),
        START_API_VERSION.to_string(),
        client_id.to_string(),
    ];
    if server_version >= MIN_SERVER_VER_OPTIONAL_CAPABILITIES {
        fields.push(String::new());
    }
    frame(&encode_fields(&fields))
}

/// Reads one length-prefixed frame. A clean EOF before the header is [`WireError::Closed`].
pub async fn read_frame<R>(reader: &mut R) -> Result<Vec<u8>, WireError>
where
    R: AsyncRead + Unpin,
{
    let mut header: [u8; 4] = [0; 4];
    match reader.read_exact(&mut header).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Err(WireError::Closed),
        Err(e) => return Err(e.into()),
    }

    let len: usize = u32::from_be_bytes(header) as usize;
    if len > MAX_FRAME_LEN {
        return Err(WireError::FrameTooLarge(len));
    }

    let mut payload: Vec<u8> = vec![0; len];
    reader.read_exact(&mut payload).await?;
    Ok(payload)
}

/// First reply of the gateway: its version and local connection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHello {
    pub version: i32,
    pub connection_time: String,
}

impl ServerHello {
    pub fn parse(payload: &[u8]) -> Result<Self, WireError> {
        let fields: Vec<&str> = split_fields(payload)?;
        let version: &str = fields
            .first()
            .copied()
            .ok_or_else(|| malformed("server hello", "empty"))?;
        let version: i32 = parse_field("server hello", "version", version)?;
        let connection_time: String = fields.get(1).map(|s| s.to_string()).unwrap_or_default();
        Ok(Self { version, connection_time })
    }
}

/// Messages the prober cares about. Everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    NextValidId { order_id: i64 },
    Error { request_id: i64, code: i32, message: String },
    Other { id: i32 },
}

impl InboundMessage {
    pub fn parse(payload: &[u8]) -> Result<Self, WireError> {
        let fields: Vec<&str> = split_fields(payload)?;
        let Some((id, rest)) = fields.split_first() else {
            return Err(malformed("inbound", "empty payload"));
        };

        match parse_field::<i32>("inbound", "message id", id)? {
            NEXT_VALID_ID => {
                // [version, order id]
                let order_id: &str = rest
                    .get(1)
                    .copied()
                    .ok_or_else(|| malformed("next valid id", "missing order id"))?;
                Ok(InboundMessage::NextValidId {
                    order_id: parse_field("next valid id", "order id", order_id)?,
                })
            }
            ERR_MSG => {
                // [version, request id, code, message, ...]
                if rest.len() < 4 {
                    let reason: String = format!("expected 5 fields, got {}", fields.len());
                    return Err(malformed("error", reason));
                }
                Ok(InboundMessage::Error {
                    request_id: parse_field("error", "request id", rest[1])?,
                    code: parse_field("error", "code", rest[2])?,
                    message: rest[3].to_string(),
                })
            }
            id => Ok(InboundMessage::Other { id }),
        }
    }
}

fn parse_field<T: std::str::FromStr>(
    message: &'static str,
    name: &str,
    raw: &str,
) -> Result<T, WireError> {
    raw.trim()
        .parse()
        .map_err(|_| malformed(message, format!("bad {name} '{raw}'")))
}

fn malformed(message: &'static str, reason: impl Into<String>) -> WireError {
    WireError::Malformed { message, reason: reason.into() }
}
