pub type ThumbnailerResult<T> = Result<T, ThumbnailerError>;

#[derive(thiserror::Error, Debug)]
pub enum ThumbnailerError {
    #[error("Invalid image type specified: {0}")]
    InvalidImageType(String),

    #[error("Invalid seek time specified: {0}")]
    InvalidSeekTime(String),

    #[error("{0}")]
    Engine(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbnailerError {
    pub fn invalid_image_type(name: impl Into<String>) -> Self {
        Self::InvalidImageType(name.into())
    }

    pub fn invalid_seek_time(value: impl Into<String>) -> Self {
        Self::InvalidSeekTime(value.into())
    }

    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }
}
