// Copyright @yucwang 2026

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RayCastError {
    /// A collaborator needed by the call has not been set.
    Configuration(&'static str),
    /// Source and target cannot define a traversable ray.
    DegenerateRay(String),
}

impl fmt::Display for RayCastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RayCastError::Configuration(what) => write!(f, "configuration error: {} is not set", what),
            RayCastError::DegenerateRay(why) => write!(f, "degenerate ray: {}", why),
        }
    }
}

impl std::error::Error for RayCastError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = RayCastError::Configuration("transform");
        assert_eq!(e.to_string(), "configuration error: transform is not set");
        let e = RayCastError::DegenerateRay("zero length".to_string());
        assert_eq!(e.to_string(), "degenerate ray: zero length");
    }
}
