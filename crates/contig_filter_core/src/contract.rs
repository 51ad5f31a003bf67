use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::filter::FilterCounts;

pub const CONTIG_SET_TYPE: &str = "KBaseGenomes.ContigSet";

/// Raw `filter_contigs` parameters as they arrive on the wire.
///
/// Every field is optional so that a missing parameter surfaces as a
/// [`ValidationError`] from [`normalize_request`] rather than a decode error.
/// `min_length` may be a JSON integer or a string holding one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterParams {
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub contigset_id: Option<String>,
    #[serde(default)]
    pub min_length: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedFilterRequest {
    pub workspace: String,
    pub contigset_id: String,
    pub min_length: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterResult {
    pub new_contigset_ref: String,
    pub n_initial_contigs: usize,
    pub n_contigs_removed: usize,
    pub n_contigs_remaining: usize,
}

impl FilterResult {
    pub fn new(new_contigset_ref: impl Into<String>, counts: FilterCounts) -> Self {
        Self {
            new_contigset_ref: new_contigset_ref.into(),
            n_initial_contigs: counts.total,
            n_contigs_removed: counts.removed(),
            n_contigs_remaining: counts.remaining,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn normalize_request(params: FilterParams) -> Result<NormalizedFilterRequest, ValidationError> {
    let workspace = required_text(params.workspace, "workspace")?;
    let contigset_id = required_text(params.contigset_id, "contigset_id")?;

    let Some(raw_min_length) = params.min_length else {
        return Err(missing_parameter("min_length"));
    };
    let min_length = parse_min_length(&raw_min_length)?;
    if min_length < 0 {
        return Err(ValidationError::new(format!(
            "min_length parameter shouldn't be negative ({min_length})"
        )));
    }

    Ok(NormalizedFilterRequest {
        workspace,
        contigset_id,
        // Thresholds beyond u64 behave exactly like u64::MAX: nothing survives.
        min_length: u64::try_from(min_length).unwrap_or(u64::MAX),
    })
}

/// Blank names count as missing. Accepted names are passed on exactly as given.
fn required_text(value: Option<String>, name: &str) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing_parameter(name)),
    }
}

fn missing_parameter(name: &str) -> ValidationError {
    ValidationError::new(format!("Parameter {name} is not set in input arguments"))
}

/// Integers pass through, floats truncate toward zero, booleans count as 1 and
/// 0, and strings must hold an optionally signed decimal integer (surrounding
/// whitespace is ignored).
fn parse_min_length(raw: &Value) -> Result<i128, ValidationError> {
    let parsed = match raw {
        Value::Number(number) => {
            if let Some(value) = number.as_i64() {
                Some(i128::from(value))
            } else if let Some(value) = number.as_u64() {
                Some(i128::from(value))
            } else {
                number
                    .as_f64()
                    .filter(|value| value.is_finite())
                    .map(|value| value.trunc() as i128)
            }
        }
        Value::Bool(flag) => Some(i128::from(*flag)),
        Value::String(text) => text.trim().parse::<i128>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        let shown = match raw {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        ValidationError::new(format!("Cannot parse integer from min_length parameter ({shown})"))
    })
}

pub fn request_fingerprint(request: &NormalizedFilterRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(stable_contract_json(request));
    format!("{:x}", hasher.finalize())
}

pub fn stable_contract_json(value: impl Serialize) -> String {
    serde_json::to_string(&value).expect("serialization of contract value should not fail")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(min_length: Value) -> FilterParams {
        FilterParams {
            workspace: Some("my_ws".to_string()),
            contigset_id: Some("assembly".to_string()),
            min_length: Some(min_length),
        }
    }

    #[test]
    fn normalize_request_rejects_missing_workspace() {
        let mut request = params(json!(10));
        request.workspace = None;

        let error = normalize_request(request).expect_err("request should fail");
        assert_eq!(
            error.message(),
            "Parameter workspace is not set in input arguments"
        );
    }

    #[test]
    fn normalize_request_rejects_blank_contigset_id() {
        let mut request = params(json!(10));
        request.contigset_id = Some("  ".to_string());

        let error = normalize_request(request).expect_err("request should fail");
        assert_eq!(
            error.message(),
            "Parameter contigset_id is not set in input arguments"
        );
    }

    #[test]
    fn normalize_request_checks_workspace_before_min_length() {
        let request = FilterParams {
            workspace: None,
            contigset_id: None,
            min_length: Some(json!("abc")),
        };

        let error = normalize_request(request).expect_err("request should fail");
        assert!(error.message().contains("workspace"));
    }

    #[test]
    fn normalize_request_rejects_missing_min_length() {
        let mut request = params(json!(0));
        request.min_length = None;

        let error = normalize_request(request).expect_err("request should fail");
        assert_eq!(
            error.message(),
            "Parameter min_length is not set in input arguments"
        );
    }

    #[test]
    fn normalize_request_rejects_unparseable_min_length() {
        let error = normalize_request(params(json!("abc"))).expect_err("request should fail");
        assert_eq!(
            error.message(),
            "Cannot parse integer from min_length parameter (abc)"
        );

        let error = normalize_request(params(json!([5]))).expect_err("request should fail");
        assert_eq!(
            error.message(),
            "Cannot parse integer from min_length parameter ([5])"
        );
    }

    #[test]
    fn normalize_request_rejects_negative_min_length() {
        let error = normalize_request(params(json!(-5))).expect_err("request should fail");
        assert_eq!(
            error.message(),
            "min_length parameter shouldn't be negative (-5)"
        );

        let error = normalize_request(params(json!(" -7 "))).expect_err("request should fail");
        assert!(error.message().contains("(-7)"));
    }

    #[test]
    fn normalize_request_accepts_integer_strings_and_floats() {
        let from_string = normalize_request(params(json!(" 42 "))).expect("request should pass");
        assert_eq!(from_string.min_length, 42);

        let from_float = normalize_request(params(json!(7.9))).expect("request should pass");
        assert_eq!(from_float.min_length, 7);

        let small_negative = normalize_request(params(json!(-0.5))).expect("request should pass");
        assert_eq!(small_negative.min_length, 0);
    }

    #[test]
    fn normalize_request_treats_booleans_as_zero_or_one() {
        let from_true = normalize_request(params(json!(true))).expect("request should pass");
        assert_eq!(from_true.min_length, 1);

        let from_false = normalize_request(params(json!(false))).expect("request should pass");
        assert_eq!(from_false.min_length, 0);
    }

    #[test]
    fn normalize_request_keeps_names_as_given() {
        let request = FilterParams {
            workspace: Some(" my_ws ".to_string()),
            contigset_id: Some("assembly\n".to_string()),
            min_length: Some(json!(3)),
        };

        let normalized = normalize_request(request).expect("request should pass");
        assert_eq!(normalized.workspace, " my_ws ");
        assert_eq!(normalized.contigset_id, "assembly\n");
    }

    #[test]
    fn normalize_request_saturates_huge_thresholds() {
        let normalized = normalize_request(params(json!("99999999999999999999999")))
            .expect("request should pass");
        assert_eq!(normalized.min_length, u64::MAX);
    }

    #[test]
    fn fingerprint_is_stable_for_equal_requests() {
        let first = normalize_request(params(json!(10))).expect("request should pass");
        let second = normalize_request(params(json!("10"))).expect("request should pass");
        let other = normalize_request(params(json!(11))).expect("request should pass");

        assert_eq!(request_fingerprint(&first), request_fingerprint(&second));
        assert_ne!(request_fingerprint(&first), request_fingerprint(&other));
    }

    #[test]
    fn filter_result_derives_removed_count() {
        let result = FilterResult::new(
            "12/3/4",
            FilterCounts {
                total: 4,
                remaining: 1,
            },
        );

        assert_eq!(result.n_initial_contigs, 4);
        assert_eq!(result.n_contigs_removed, 3);
        assert_eq!(result.n_contigs_remaining, 1);
    }
}
