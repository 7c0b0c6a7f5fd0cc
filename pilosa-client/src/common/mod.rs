//! Response envelopes and the crate error type

use serde::Deserialize;
use serde_json::Value;

pub mod error;

/// The envelope every query response is decoded into. `results` holds one
/// entry per submitted query, in submission order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResponse<T> {
    /// Per-query results
    #[serde(alias = "Results", default)]
    pub results: Vec<T>,
}

impl<T> Default for QueryResponse<T> {
    fn default() -> Self {
        Self { results: Vec::new() }
    }
}

/// Results of a batch of arbitrary queries. The values are opaque to the
/// client.
pub type Results = QueryResponse<Value>;

/// Response to a `SetBit` query
pub type SetBitResponse = QueryResponse<bool>;

/// Response to a `ClearBit` query
pub type ClearBitResponse = QueryResponse<bool>;

/// Response to a `Count(Bitmap(..))` query
pub type CountBitResponse = QueryResponse<i64>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn results_field_accepts_both_spellings() {
        let lower: SetBitResponse = serde_json::from_str(r#"{"results": [true]}"#).unwrap();
        let upper: SetBitResponse = serde_json::from_str(r#"{"Results": [true]}"#).unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower.results, vec![true]);
    }

    #[test]
    fn missing_results_decodes_empty() {
        let resp: CountBitResponse = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert!(resp.results.is_empty());
    }

    #[test]
    fn opaque_results_keep_order() {
        let resp: Results =
            serde_json::from_str(r#"{"results": [{"bits": [1, 2]}, 7, false]}"#).unwrap();

        assert_eq!(
            resp.results,
            vec![json!({"bits": [1, 2]}), json!(7), json!(false)]
        );
    }

    #[test]
    fn typed_projection_rejects_wrong_element_type() {
        let resp = serde_json::from_str::<CountBitResponse>(r#"{"results": ["nope"]}"#);
        assert!(resp.is_err());
    }
}
