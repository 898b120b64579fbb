use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// `{"success": "..."}` returned by write routes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SuccessBody {
    pub success: String,
}

impl SuccessBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { success: msg.into() }
    }
}

/// `{"message": "..."}` returned by delete.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

/// Marker body for lookups that matched nothing. Existing clients expect the
/// capitalised `Success` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NoDataFound {
    #[serde(rename = "Success")]
    pub success: String,
}

impl Default for NoDataFound {
    fn default() -> Self {
        Self { success: "No data found".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_found_uses_capitalised_key() {
        let v = serde_json::to_value(NoDataFound::default()).unwrap();
        assert_eq!(v, serde_json::json!({"Success": "No data found"}));
    }

    #[test]
    fn success_and_message_bodies_serialize_flat() {
        let s = serde_json::to_value(SuccessBody::new("done")).unwrap();
        assert_eq!(s["success"], "done");
        let m = serde_json::to_value(MessageBody::new("gone")).unwrap();
        assert_eq!(m["message"], "gone");
    }
}
