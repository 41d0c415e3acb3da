pub mod http;
pub mod services;

#[cfg(test)]
pub(crate) mod fake;
