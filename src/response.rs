use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Body shape shared by every API response.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    pub fn success(data: T, message: &str) -> Self {
        Envelope {
            status: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(message: String) -> Self {
        Envelope {
            status: false,
            data: None,
            message: None,
            error: Some(ErrorBody { message }),
        }
    }
}

/// Body returned for routes that match nothing.
#[derive(Debug, Serialize)]
pub struct NotFound {
    pub status: &'static str,
    pub message: &'static str,
}

impl Default for NotFound {
    fn default() -> Self {
        NotFound {
            status: "error",
            message: "Not Found",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: &'static str,
    pub latency: String,
    pub max_latency: u64,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Unhealthy {
    pub status: &'static str,
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let body = serde_json::to_value(Envelope::success(json!({"submissionId": 3}), "Survey submitted successfully")).unwrap();
        assert_eq!(
            body,
            json!({"status": true, "data": {"submissionId": 3}, "message": "Survey submitted successfully"})
        );
    }

    #[test]
    fn test_failure_envelope() {
        let body = serde_json::to_value(Envelope::<()>::failure("Survey not found".into())).unwrap();
        assert_eq!(body, json!({"status": false, "error": {"message": "Survey not found"}}));
    }
}
