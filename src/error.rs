use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordSysError {
    #[error("Unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),

    #[error("Unknown datum: {0}")]
    UnknownDatum(String),

    #[error("Vertical datum '{0}' requires an explicit geoid height")]
    MissingVerticalOffset(String),

    #[error("{0} coordinate system used before initialize()")]
    NotInitialized(&'static str),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{0} coordinate system has no geocentric frame")]
    NotGeoreferenced(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Coordinate system error: {0}")]
    CoordSys(#[from] CoordSysError),

    #[error("Dimension mismatch: expected {expected} values per point, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Interleaved buffer of {0} values is not a whole number of points")]
    InterleavedLength(usize),

    #[error("Cannot convert between {src} and {dest} coordinate systems")]
    IncompatibleSystems {
        src: &'static str,
        dest: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoordSysError::UnknownEllipsoid("clrk99".into());
        assert_eq!(err.to_string(), "Unknown ellipsoid: clrk99");

        let err = ConvertError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert!(err.to_string().contains("got 2"));

        let err = ConvertError::IncompatibleSystems {
            src: "Cartesian",
            dest: "Geographic",
        };
        assert_eq!(
            err.to_string(),
            "Cannot convert between Cartesian and Geographic coordinate systems"
        );
    }

    #[test]
    fn test_from_coordsys_error() {
        let err: ConvertError = CoordSysError::NotInitialized("Geographic").into();
        assert!(matches!(
            err,
            ConvertError::CoordSys(CoordSysError::NotInitialized(_))
        ));
    }
}
