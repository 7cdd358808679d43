pub type KakijunResult<T> = Result<T, KakijunError>;

#[derive(thiserror::Error, Debug)]
pub enum KakijunError {
    #[error("config error: {0}")]
    Config(String),

    #[error("svg error: {0}")]
    Svg(String),

    #[error("timing error: {0}")]
    Timing(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KakijunError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn svg(msg: impl Into<String>) -> Self {
        Self::Svg(msg.into())
    }

    pub fn timing(msg: impl Into<String>) -> Self {
        Self::Timing(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            KakijunError::config("x")
                .to_string()
                .contains("config error:")
        );
        assert!(KakijunError::svg("x").to_string().contains("svg error:"));
        assert!(
            KakijunError::timing("x")
                .to_string()
                .contains("timing error:")
        );
        assert!(
            KakijunError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            KakijunError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = KakijunError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
