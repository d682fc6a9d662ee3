mod actions;
pub(crate) mod args;
mod http;

pub(crate) use actions::handle_request;
#[cfg(test)]
pub(crate) use http::{append_params, parse_header, parse_param};
