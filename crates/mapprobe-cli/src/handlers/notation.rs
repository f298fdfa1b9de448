//! DMS conversion, normalization and formatting commands

use crate::commands::{DmsArgs, FormatArgs, FromDmsArgs, NormalizeArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Report;
use mapprobe::geo::{normalize_latitude, normalize_longitude, to_dms, to_dms_parts, Dms};
use serde_json::json;

/// Execute the dms command
pub fn execute_dms(args: &DmsArgs) -> CliResult<Report> {
    let dms = to_dms_parts(args.value, args.longitude);
    Ok(Report::new(
        dms.to_string(),
        json!({
            "decimal": args.value,
            "dms": dms.to_string(),
            "degrees": dms.degrees,
            "minutes": dms.minutes,
            "seconds": dms.seconds,
            "hemisphere": dms.hemisphere,
        }),
    ))
}

/// Execute the from-dms command
pub fn execute_from_dms(args: &FromDmsArgs, config: &CliConfig) -> CliResult<Report> {
    let dms: Dms = args.value.parse().map_err(CliError::invalid_argument)?;
    let decimal = dms.to_decimal();
    let precision = config.precision();
    Ok(Report::new(
        format!("{decimal:.precision$}"),
        json!({ "dms": args.value, "decimal": decimal }),
    ))
}

/// Execute the normalize command
pub fn execute_normalize(args: &NormalizeArgs) -> CliResult<Report> {
    let (kind, normalized) = if args.latitude {
        ("latitude", normalize_latitude(args.value))
    } else {
        ("longitude", normalize_longitude(args.value))
    };
    Ok(Report::new(
        normalized.to_string(),
        json!({ "kind": kind, "input": args.value, "normalized": normalized }),
    ))
}

/// Execute the format command
pub fn execute_format(args: &FormatArgs, config: &CliConfig) -> CliResult<Report> {
    let point = &args.point;
    let text = if args.dms {
        format!("{} {}", to_dms(point.lat, false), to_dms(point.lng, true))
    } else {
        point.format(args.precision.unwrap_or_else(|| config.precision()))
    };
    Ok(Report::new(
        text.clone(),
        json!({ "lat": point.lat, "lng": point.lng, "formatted": text }),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mapprobe::geo::Coordinate;
    use mapprobe::ProbeConfig;

    #[test]
    fn test_dms_latitude() {
        let report = execute_dms(&DmsArgs {
            value: 37.7749,
            longitude: false,
        })
        .unwrap();
        assert_eq!(report.text, "37°46'29.64\"N");
        assert_eq!(report.json["hemisphere"], "N");
        assert_eq!(report.json["minutes"], 46);
    }

    #[test]
    fn test_dms_longitude_west() {
        let report = execute_dms(&DmsArgs {
            value: -122.4194,
            longitude: true,
        })
        .unwrap();
        assert!(report.text.ends_with('W'));
    }

    #[test]
    fn test_from_dms() {
        let config = CliConfig::new().with_probe(ProbeConfig::new().with_precision(4));
        let report = execute_from_dms(
            &FromDmsArgs {
                value: "33°52'4.00\"S".to_string(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(report.text, "-33.8678");
    }

    #[test]
    fn test_from_dms_rejects_garbage() {
        let err = execute_from_dms(
            &FromDmsArgs {
                value: "37 degrees north".to_string(),
            },
            &CliConfig::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { .. }));
    }

    #[test]
    fn test_normalize() {
        let lng = execute_normalize(&NormalizeArgs {
            value: 200.0,
            latitude: false,
        })
        .unwrap();
        assert_eq!(lng.text, "-160");

        let lat = execute_normalize(&NormalizeArgs {
            value: -95.0,
            latitude: true,
        })
        .unwrap();
        assert_eq!(lat.text, "-90");
        assert_eq!(lat.json["kind"], "latitude");
    }

    #[test]
    fn test_format_precision_override() {
        let args = FormatArgs {
            point: Coordinate::new(51.50735, -0.12776),
            precision: Some(2),
            dms: false,
        };
        let report = execute_format(&args, &CliConfig::new()).unwrap();
        assert_eq!(report.text, "51.51, -0.13");
    }

    #[test]
    fn test_format_dms() {
        let args = FormatArgs {
            point: Coordinate::new(37.7749, -122.4194),
            precision: None,
            dms: true,
        };
        let report = execute_format(&args, &CliConfig::new()).unwrap();
        assert_eq!(report.text, "37°46'29.64\"N 122°25'9.84\"W");
    }
}
