use crate::Error;
use serde::Deserialize;
use serde::Serialize;
use std::str::FromStr;

/// Which metric a clustering call should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Euclidean,
    #[serde(alias = "wasserstein")]
    Transport,
}

impl FromStr for MetricKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "transport" | "wasserstein" | "emd" => Ok(Self::Transport),
            other => Err(Error::config(
                "metric",
                format!("unknown metric {:?}, expected euclidean or transport", other),
            )),
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Euclidean => write!(f, "euclidean"),
            Self::Transport => write!(f, "transport"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("euclidean".parse::<MetricKind>(), Ok(MetricKind::Euclidean));
        assert_eq!("Wasserstein".parse::<MetricKind>(), Ok(MetricKind::Transport));
        assert_eq!(" transport ".parse::<MetricKind>(), Ok(MetricKind::Transport));
    }

    #[test]
    fn malformed_name_is_config_error() {
        let e = "manhattan".parse::<MetricKind>().unwrap_err();
        assert!(matches!(e, Error::InvalidConfig { param: "metric", .. }));
    }

    #[test]
    fn display_roundtrip() {
        for kind in [MetricKind::Euclidean, MetricKind::Transport] {
            assert_eq!(kind.to_string().parse::<MetricKind>(), Ok(kind));
        }
    }
}
