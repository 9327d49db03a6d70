//! Navigable addresses.
//!
//! Views are reachable through path strings, so a search result is
//! reproducible from its address alone: the search view derives its
//! query solely from the route, never from component state.

use crate::error::{ButacaError, Result};

/// One navigable address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` - now-playing carousel + top-rated list
    Home,
    /// `/detalles/:id` - detail + cast + comments for one movie
    Details(u64),
    /// `/busqueda?query=...` - search results
    Search(String),
}

impl Route {
    /// Parses a path string into a route.
    pub fn parse(path: &str) -> Result<Self> {
        if path == "/" || path.is_empty() {
            return Ok(Self::Home);
        }

        if let Some(raw_id) = path.strip_prefix("/detalles/") {
            let id = raw_id
                .parse::<u64>()
                .map_err(|_| ButacaError::validation(format!("invalid movie id '{raw_id}'")))?;
            return Ok(Self::Details(id));
        }

        if let Some(rest) = path.strip_prefix("/busqueda") {
            if rest.is_empty() {
                return Ok(Self::Search(String::new()));
            }
            if let Some(encoded) = rest.strip_prefix("?query=") {
                return Ok(Self::Search(decode_query_component(encoded)?));
            }
            return Err(ButacaError::validation(format!("unknown route '{path}'")));
        }

        Err(ButacaError::validation(format!("unknown route '{path}'")))
    }

    /// Formats the route back into its path string.
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Details(id) => format!("/detalles/{id}"),
            Self::Search(query) => format!("/busqueda?query={}", encode_query_component(query)),
        }
    }
}

fn encode_query_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode_query_component(encoded: &str) -> Result<String> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .and_then(|pair| std::str::from_utf8(pair).ok())
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| {
                        ButacaError::validation(format!("malformed query escape in '{encoded}'"))
                    })?;
                out.push(hex);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8(out)
        .map_err(|_| ButacaError::validation(format!("query is not valid UTF-8 in '{encoded}'")))
}
