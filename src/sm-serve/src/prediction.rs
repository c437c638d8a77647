use serde_json::Value;

use crate::error::{Error, Result};

/// Decode an endpoint response body.
pub fn parse_response(body: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(body)?)
}

/// Pull `predictions.class` out of a decoded response.
///
/// The class is returned as-is; endpoints may answer with a label or a
/// numeric class id.
pub fn predicted_class(response: &Value) -> Result<Value> {
    let predictions = response
        .get("predictions")
        .ok_or(Error::MissingField("predictions"))?;

    predictions
        .get("class")
        .cloned()
        .ok_or(Error::MissingField("predictions.class"))
}
