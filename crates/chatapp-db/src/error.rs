use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no database connection could be established: {0}")]
    Connect(#[source] mongodb::error::Error),

    #[error("query on `{collection}` failed: {source}")]
    Query {
        collection: &'static str,
        source: mongodb::error::Error,
    },

    /// Setup found the collections already in place.
    #[error("app database already exists")]
    AlreadyInitialized,

    #[error("invalid `{collection}` fixture: {message}")]
    Fixture {
        collection: &'static str,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn connect_keeps_the_driver_error_as_source() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let err = StoreError::Connect(mongodb::error::Error::from(refused));

        let source = err.source().expect("driver error is chained");
        assert!(source.downcast_ref::<mongodb::error::Error>().is_some());
        assert!(err.to_string().contains("connection refused"));
    }
}
