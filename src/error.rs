//! Error types shared across the application.

pub type StormResult<T> = Result<T, StormError>;

#[derive(thiserror::Error, Debug)]
pub enum StormError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// A track point that cannot be placed on the map.
    #[error("bad track point {index} of storm {storm}: {reason}")]
    Data {
        storm: String,
        index: usize,
        reason: String,
    },

    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    #[error("unknown basin: {0}")]
    UnknownBasin(String),

    #[error("invalid start date: {0}")]
    InvalidDate(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl StormError {
    pub fn data(storm: impl Into<String>, index: usize, reason: impl Into<String>) -> Self {
        Self::Data {
            storm: storm.into(),
            index,
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_names_storm_and_point() {
        let err = StormError::data("HAGIBIS", 3, "missing latitude");
        let text = err.to_string();
        assert!(text.contains("HAGIBIS"));
        assert!(text.contains("point 3"));
        assert!(text.contains("missing latitude"));
    }

    #[test]
    fn io_errors_convert() {
        fn open() -> StormResult<()> {
            Err(std::io::Error::other("boom"))?;
            Ok(())
        }
        let err = open().unwrap_err();
        assert!(matches!(err, StormError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }
}
