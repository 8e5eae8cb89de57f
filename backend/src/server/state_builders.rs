//! Builders for HTTP state over the configured users document.

use std::sync::Arc;

use actix_web::web;

use backend::inbound::http::state::HttpState;
use backend::outbound::JsonFileUserStore;

use super::ServerConfig;

/// Build shared HTTP state backed by the JSON document named in `config`.
///
/// # Errors
/// Returns [`std::io::Error`] when the document path has no file name.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let store = JsonFileUserStore::new(config.data_file()).map_err(std::io::Error::other)?;
    Ok(web::Data::new(HttpState::for_store(Arc::new(store))))
}
