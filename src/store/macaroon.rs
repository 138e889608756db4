//! Macaroon (v1) decoding and request binding.
//!
//! The snap store hands out a root macaroon plus a discharge macaroon from
//! the SSO service. Before use, the discharge is bound to the root: its
//! signature is replaced with
//! `HMAC(k0, HMAC(k0, root_sig) ‖ HMAC(k0, discharge_sig))`, where `k0` is
//! 32 zero bytes. Both then travel in a single `Authorization` header.
//!
//! The v1 wire format is URL-safe base64 over a sequence of packets, each
//! `<4 hex digit total length><key> <value>\n`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{ReleaseError, Result};

type HmacSha256 = Hmac<Sha256>;

const KEY_GENERATOR: &[u8] = b"macaroons-key-generator";
const SIGNATURE_LEN: usize = 32;
const MAX_PACKET_LEN: usize = 0xFFFF;

/// One caveat of a macaroon. Third-party caveats carry a `vid` and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caveat {
    pub cid: Vec<u8>,
    pub vid: Option<Vec<u8>>,
    pub location: Option<String>,
}

/// A decoded macaroon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macaroon {
    location: String,
    identifier: Vec<u8>,
    caveats: Vec<Caveat>,
    signature: [u8; SIGNATURE_LEN],
}

impl Macaroon {
    /// Mint a macaroon from a root key.
    pub fn new(location: &str, identifier: &[u8], key: &[u8]) -> Self {
        let derived = hmac(KEY_GENERATOR, key);
        Self {
            location: location.to_string(),
            identifier: identifier.to_vec(),
            caveats: Vec::new(),
            signature: hmac(&derived, identifier),
        }
    }

    /// Add a first-party caveat, chaining the signature.
    pub fn with_first_party_caveat(mut self, predicate: &str) -> Self {
        self.signature = hmac(&self.signature, predicate.as_bytes());
        self.caveats.push(Caveat {
            cid: predicate.as_bytes().to_vec(),
            vid: None,
            location: None,
        });
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn identifier(&self) -> &[u8] {
        &self.identifier
    }

    pub fn caveats(&self) -> &[Caveat] {
        &self.caveats
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_LEN] {
        &self.signature
    }

    /// Decode a v1 serialized macaroon (padded or unpadded, either base64 alphabet).
    pub fn deserialize(encoded: &str) -> Result<Self> {
        let normalized: String = encoded
            .trim()
            .trim_end_matches('=')
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                other => other,
            })
            .collect();

        let data = URL_SAFE_NO_PAD
            .decode(normalized.as_bytes())
            .map_err(|e| malformed(format!("invalid base64: {}", e)))?;

        let mut location = None;
        let mut identifier = None;
        let mut caveats: Vec<Caveat> = Vec::new();
        let mut signature = None;

        for (key, value) in parse_packets(&data)? {
            match key.as_str() {
                "location" => location = Some(utf8(value, "location")?),
                "identifier" => identifier = Some(value),
                "cid" => caveats.push(Caveat {
                    cid: value,
                    vid: None,
                    location: None,
                }),
                "vid" => {
                    let caveat = caveats
                        .last_mut()
                        .ok_or_else(|| malformed("vid before any cid"))?;
                    caveat.vid = Some(value);
                }
                "cl" => {
                    let caveat = caveats
                        .last_mut()
                        .ok_or_else(|| malformed("cl before any cid"))?;
                    caveat.location = Some(utf8(value, "cl")?);
                }
                "signature" => {
                    let bytes: [u8; SIGNATURE_LEN] = value
                        .as_slice()
                        .try_into()
                        .map_err(|_| malformed("signature is not 32 bytes"))?;
                    signature = Some(bytes);
                }
                other => return Err(malformed(format!("unexpected packet '{}'", other))),
            }
        }

        Ok(Self {
            location: location.unwrap_or_default(),
            identifier: identifier.ok_or_else(|| malformed("missing identifier"))?,
            caveats,
            signature: signature.ok_or_else(|| malformed("missing signature"))?,
        })
    }

    /// Encode in the v1 format (URL-safe base64, no padding).
    pub fn serialize(&self) -> Result<String> {
        let mut data = Vec::new();
        write_packet(&mut data, "location", self.location.as_bytes())?;
        write_packet(&mut data, "identifier", &self.identifier)?;
        for caveat in &self.caveats {
            write_packet(&mut data, "cid", &caveat.cid)?;
            if let Some(vid) = &caveat.vid {
                write_packet(&mut data, "vid", vid)?;
            }
            if let Some(cl) = &caveat.location {
                write_packet(&mut data, "cl", cl.as_bytes())?;
            }
        }
        write_packet(&mut data, "signature", &self.signature)?;
        Ok(URL_SAFE_NO_PAD.encode(data))
    }

    /// Bind a discharge macaroon to this (root) macaroon for a request.
    pub fn prepare_for_request(&self, discharge: &Macaroon) -> Macaroon {
        let zero_key = [0u8; SIGNATURE_LEN];
        let mut joined = Vec::with_capacity(SIGNATURE_LEN * 2);
        joined.extend_from_slice(&hmac(&zero_key, &self.signature));
        joined.extend_from_slice(&hmac(&zero_key, &discharge.signature));

        let mut bound = discharge.clone();
        bound.signature = hmac(&zero_key, &joined);
        bound
    }
}

/// Build the `Authorization` header value for a root and bound discharge.
pub fn authorization_header(root: &str, bound_discharge: &str) -> String {
    format!("Macaroon root=\"{}\", discharge=\"{}\"", root, bound_discharge)
}

fn hmac(key: &[u8], data: &[u8]) -> [u8; SIGNATURE_LEN] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

fn parse_packets(data: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut packets = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let header = data
            .get(pos..pos + 4)
            .ok_or_else(|| malformed("truncated packet header"))?;
        let header = std::str::from_utf8(header).map_err(|_| malformed("non-hex packet header"))?;
        let size = usize::from_str_radix(header, 16).map_err(|_| malformed("non-hex packet header"))?;

        // header + "k" + " " + "\n" at minimum
        if size < 7 {
            return Err(malformed(format!("packet length {} too small", size)));
        }
        let body = data
            .get(pos + 4..pos + size)
            .ok_or_else(|| malformed("truncated packet"))?;
        let Some((b'\n', content)) = body.split_last() else {
            return Err(malformed("packet does not end with a newline"));
        };

        let space = content
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| malformed("packet without a key"))?;
        let key = utf8(content[..space].to_vec(), "packet key")?;
        packets.push((key, content[space + 1..].to_vec()));

        pos += size;
    }

    Ok(packets)
}

fn write_packet(out: &mut Vec<u8>, key: &str, value: &[u8]) -> Result<()> {
    let size = 4 + key.len() + 1 + value.len() + 1;
    if size > MAX_PACKET_LEN {
        return Err(malformed(format!("{} packet too large ({} bytes)", key, size)));
    }
    out.extend_from_slice(format!("{:04x}", size).as_bytes());
    out.extend_from_slice(key.as_bytes());
    out.push(b' ');
    out.extend_from_slice(value);
    out.push(b'\n');
    Ok(())
}

fn utf8(bytes: Vec<u8>, what: &str) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| malformed(format!("{} is not UTF-8", what)))
}

fn malformed(message: impl Into<String>) -> ReleaseError {
    ReleaseError::MalformedMacaroon {
        message: message.into(),
    }
}
