use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by parsing, dispatch and figure output.
#[derive(Error, Debug)]
pub enum WktPlotError {
    /// WKT text did not match the grammar of any supported kind.
    #[error("WKT parse error: {0}")]
    Parse(String),
    /// The geometry (or one of its members) has a kind the mapper cannot draw.
    #[error("Given argument `shape` is of an unsupported type [{kind}]")]
    UnsupportedType { kind: &'static str },
    #[error("Given argument `save_dir` is not a directory. [{}]", .0.display())]
    SaveDir(PathBuf),
    #[error("plot has no output file; construct it with a save_dir")]
    NoOutput,
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = WktPlotError> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn errors() {
        let parse = WktPlotError::Parse("Invalid type encountered".to_string());
        assert_eq!(parse.to_string(), "WKT parse error: Invalid type encountered");

        let unsupported = WktPlotError::UnsupportedType { kind: "Rect" };
        assert_eq!(
            unsupported.to_string(),
            "Given argument `shape` is of an unsupported type [Rect]"
        );

        let save_dir = WktPlotError::SaveDir(PathBuf::from("not_a_directory"));
        assert_eq!(
            save_dir.to_string(),
            "Given argument `save_dir` is not a directory. [not_a_directory]"
        );

        let io_err: WktPlotError = io::Error::new(io::ErrorKind::NotFound, "foofy").into();
        assert_eq!(io_err.to_string(), "foofy");
    }
}
