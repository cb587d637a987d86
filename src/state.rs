use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The loading/data state handed to the render callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseState {
    /// True while the most recent request is outstanding
    pub loading: bool,
    /// Last successfully fetched payload, `{}` before the first success
    pub json: Value,
}

impl Default for ResponseState {
    fn default() -> Self {
        Self {
            loading: false,
            json: Value::Object(Map::new()),
        }
    }
}

impl ResponseState {
    /// Marks a request as dispatched. The previous payload stays visible.
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Replaces the payload with a fresh response body.
    pub fn succeed(&mut self, json: Value) {
        *self = Self {
            loading: false,
            json,
        };
    }

    /// Ends the request without touching the payload.
    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// The payload as a list of records, if the endpoint returned an array.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        self.json.as_array()
    }

    /// The payload as a single record, if the endpoint returned an object.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.json.as_object()
    }
}
