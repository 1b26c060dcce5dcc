use common::RoomCode;
use url::Url;

use crate::errors::ConnectError;

/// Builds `ws(s)://host[:port]{socket_path}{ROOM}/` from an http(s) origin.
pub fn room_endpoint(base_url: &str, socket_path: &str, room: &RoomCode) -> Result<Url, ConnectError> {
    let mut url = Url::parse(base_url.trim()).map_err(|e| ConnectError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    let socket_scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(ConnectError::UnsupportedScheme(other.to_string())),
    };
    url.set_scheme(socket_scheme)
        .map_err(|_| ConnectError::UnsupportedScheme(url.scheme().to_string()))?;

    let prefix = socket_path.trim_matches('/');
    let path = if prefix.is_empty() {
        format!("/{}/", room)
    } else {
        format!("/{}/{}/", prefix, room)
    };
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
