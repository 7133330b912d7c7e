//! Status acknowledgment responses (`{"status":"ok"}`)

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub msg: Option<String>,
}

impl StatusResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_status() {
        let r: StatusResponse = serde_json::from_value(json!({"status": "ok"})).unwrap();
        assert!(r.is_ok());
    }

    #[test]
    fn test_error_status() {
        let r: StatusResponse =
            serde_json::from_value(json!({"status": "error", "msg": "Record not found"})).unwrap();
        assert!(!r.is_ok());
        assert_eq!(r.msg.as_deref(), Some("Record not found"));
    }

    #[test]
    fn test_missing_status_is_not_ok() {
        let r: StatusResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!r.is_ok());
    }
}
