use plotters::drawing::DrawingAreaErrorKind;
use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum RenderErrors {
    IoError(io::Error),
    CsvError(csv::Error),
    PlotError(String),
}

impl fmt::Display for RenderErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderErrors::IoError(e) => write!(f, "I/O error: {}", e),
            RenderErrors::CsvError(e) => write!(f, "CSV writing error: {}", e),
            RenderErrors::PlotError(e) => write!(f, "Map plotting error: {}", e),
        }
    }
}

impl Error for RenderErrors {}

impl From<io::Error> for RenderErrors {
    fn from(err: io::Error) -> Self {
        RenderErrors::IoError(err)
    }
}

impl From<csv::Error> for RenderErrors {
    fn from(err: csv::Error) -> Self {
        RenderErrors::CsvError(err)
    }
}

impl<E: Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderErrors {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderErrors::PlotError(err.to_string())
    }
}
